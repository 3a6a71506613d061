//! API 路由
//!
//! 受保护路由在定义时静态声明所需模块。

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use campus_access_core::{AccessChecker, ModuleId, Role, role_display_name};
use campus_errors::AppError;
use campus_telemetry::HealthStatus;
use serde::Serialize;

use crate::error::ApiError;
use crate::gate::{ModuleGate, ModuleRequirement, module_gate};
use crate::middleware::{AuthClaims, auth_middleware};
use crate::state::AppState;

/// 功能页面及其所需模块
///
/// `AnyOf` 页面可由任一模块进入。
fn feature_pages() -> Vec<(&'static str, ModuleRequirement)> {
    use ModuleRequirement::{AnyOf, Module};

    vec![
        ("/api/examination", Module(ModuleId::Examination)),
        ("/api/examination/schedule", Module(ModuleId::Examination)),
        ("/api/master-setup", Module(ModuleId::MasterSetup)),
        ("/api/master-setup/institutions", Module(ModuleId::MasterSetup)),
        ("/api/permissions", Module(ModuleId::PermissionManagement)),
        (
            "/api/timetable",
            AnyOf(vec![ModuleId::AcademicOperation, ModuleId::Lms]),
        ),
        (
            "/api/results",
            AnyOf(vec![ModuleId::Examination, ModuleId::Reports]),
        ),
    ]
}

pub fn api_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics));

    let protected = protected_routes(&state.checker)
        .route("/api/me/modules", get(my_modules))
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    public
        .merge(protected)
        .fallback(route_not_found)
        .with_state(state)
}

fn protected_routes(checker: &AccessChecker) -> Router<AppState> {
    let mut router = Router::new();

    for module in ModuleId::ALL {
        let gate = ModuleGate::module(checker.clone(), module);
        router = router.route(
            &format!("/api/modules/{}", module.code()),
            get(move |claims: AuthClaims| module_page(module, claims))
                .route_layer(middleware::from_fn_with_state(gate, module_gate)),
        );
    }

    for (path, requirement) in feature_pages() {
        let gate = ModuleGate::new(checker.clone(), requirement);
        router = router.route(
            path,
            get(move |claims: AuthClaims| feature_page(path, claims))
                .route_layer(middleware::from_fn_with_state(gate, module_gate)),
        );
    }

    router
}

#[derive(Debug, Serialize)]
pub struct ModuleCard {
    pub id: ModuleId,
    pub name: &'static str,
    pub icon: &'static str,
}

impl From<ModuleId> for ModuleCard {
    fn from(module: ModuleId) -> Self {
        Self {
            id: module,
            name: module.display_name(),
            icon: module.icon().name(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModulesResponse {
    pub role: String,
    pub role_display_name: String,
    pub modules: Vec<ModuleCard>,
}

/// 当前用户可访问的模块（仪表盘卡片 / 侧边栏）
async fn my_modules(
    State(checker): State<AccessChecker>,
    AuthClaims(claims): AuthClaims,
) -> Json<ModulesResponse> {
    let modules = checker
        .accessible_modules(&claims.role)
        .into_iter()
        .map(ModuleCard::from)
        .collect();

    Json(ModulesResponse {
        role_display_name: checker.role_display_name(&claims.role),
        role: claims.role,
        modules,
    })
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: String,
    pub viewer: String,
    pub module: Option<ModuleCard>,
}

async fn module_page(module: ModuleId, AuthClaims(claims): AuthClaims) -> Json<PageResponse> {
    Json(PageResponse {
        page: module.code().to_string(),
        viewer: role_display_name(&claims.role),
        module: Some(module.into()),
    })
}

async fn feature_page(path: &'static str, AuthClaims(claims): AuthClaims) -> Json<PageResponse> {
    Json(PageResponse {
        page: path.trim_start_matches("/api/").to_string(),
        viewer: role_display_name(&claims.role),
        module: None,
    })
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::from(AppError::not_found(format!("No route for {}", uri.path())))
        .with_instance(uri.path())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: Vec<ServiceCheck>,
}

#[derive(Debug, Serialize)]
pub struct ServiceCheck {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut health = HealthStatus::new();

    let configured_roles = Role::ALL
        .iter()
        .filter(|role| state.checker.table().modules_for(**role).next().is_some())
        .count();
    health.add_check(
        "access_policy",
        configured_roles > 0,
        Some(format!("{} of {} roles have module grants", configured_roles, Role::ALL.len())),
    );
    health.add_check("metrics_recorder", true, state.metrics.is_none().then(|| "disabled".to_string()));

    let status = if health.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if health.healthy { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: health
                .checks
                .into_iter()
                .map(|c| ServiceCheck {
                    name: c.name,
                    healthy: c.healthy,
                    message: c.message,
                })
                .collect(),
        }),
    )
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
