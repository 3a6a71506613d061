//! 中间件

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use campus_auth_core::{Claims, TokenService};
use campus_errors::AppError;
use tracing::{debug, warn};

use crate::error::ApiError;

/// 认证 Claims 提取器
///
/// 应该在 auth_middleware 之后使用
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| {
                ApiError::from(AppError::unauthorized(
                    "Missing claims in request extensions (auth_middleware may not have run)",
                ))
            })
    }
}

/// JWT 认证中间件
///
/// 验证请求中的 JWT token 并将 claims 注入到请求扩展中
pub async fn auth_middleware(
    State(token_service): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        warn!(path = %path, "Missing or invalid authorization header");
        return Err(ApiError::from(AppError::unauthorized("Missing bearer token")).with_instance(path));
    };

    match token_service.validate_token(token) {
        Ok(claims) => {
            debug!(user_id = %claims.sub, role = %claims.role, "Token validated");
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!(error = %e, path = %path, "Token validation failed");
            Err(ApiError::from(e).with_instance(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn token_service(secret: &str, expires_in: i64) -> TokenService {
        TokenService::new(
            secret,
            expires_in,
            "campus-portal".to_string(),
            "campus-gateway".to_string(),
        )
    }

    async fn whoami(AuthClaims(claims): AuthClaims) -> String {
        claims.role
    }

    fn app(token_service: TokenService) -> Router {
        Router::new()
            .route("/", get(whoami))
            .layer(middleware::from_fn_with_state(
                token_service.clone(),
                auth_middleware,
            ))
            .with_state(token_service)
    }

    async fn send(app: Router, auth: Option<String>) -> Response {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_auth_middleware_valid_token() {
        let token_service = token_service("test_secret", 3600);
        let token = token_service
            .generate_access_token("u-1", "faculty")
            .unwrap();

        let response = send(app(token_service), Some(format!("Bearer {}", token))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"faculty");
    }

    #[tokio::test]
    async fn test_auth_middleware_invalid_token() {
        let response = send(
            app(token_service("test_secret", 3600)),
            Some("Bearer invalid_token".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
    }

    #[tokio::test]
    async fn test_auth_middleware_missing_header() {
        let response = send(app(token_service("test_secret", 3600)), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_non_bearer_scheme() {
        let response = send(
            app(token_service("test_secret", 3600)),
            Some("Basic dXNlcjpwYXNz".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_expired_token() {
        let token_service = token_service("test_secret", -3600);
        let token = token_service.generate_access_token("u-1", "admin").unwrap();

        let response = send(app(token_service), Some(format!("Bearer {}", token))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_wrong_secret() {
        let token = token_service("correct_secret", 3600)
            .generate_access_token("u-1", "admin")
            .unwrap();

        let response = send(
            app(token_service("wrong_secret", 3600)),
            Some(format!("Bearer {}", token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
