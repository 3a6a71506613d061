//! Campus Portal API Gateway

mod error;
mod gate;
mod middleware;
mod routing;
mod state;

use campus_access_core::{AccessChecker, AccessPolicyTable};
use campus_auth_core::TokenService;
use campus_config::AppConfig;
use campus_errors::AppError;
use secrecy::ExposeSecret;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::state::AppState;

/// JWT 密钥最小长度
const MIN_JWT_SECRET_LEN: usize = 32;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config_dir = std::env::var("APP_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir)?;

    // 初始化 tracing
    campus_telemetry::init(&config.telemetry.log_level, config.telemetry.json);

    let metrics = match campus_telemetry::init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Metrics recorder unavailable");
            None
        }
    };

    // 构建访问策略表（启动后只读）
    let overrides = &config.access.policy_overrides;
    let table = AccessPolicyTable::builtin()
        .with_overrides(overrides)
        .map_err(AppError::from)?;
    info!(overrides = overrides.len(), "Access policy table loaded");

    let secret = config.jwt.secret.expose_secret();
    if secret.len() < MIN_JWT_SECRET_LEN {
        return Err(AppError::config(format!(
            "jwt.secret must be at least {} characters long",
            MIN_JWT_SECRET_LEN
        ))
        .into());
    }
    let tokens = TokenService::new(
        secret,
        config.jwt.expires_in,
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
    );

    let state = AppState::new(AccessChecker::new(table), tokens).with_metrics(metrics);
    let app = routing::api_routes(state).layer(TraceLayer::new_for_http());

    // 启动服务器
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, app = %config.app_name, env = %config.app_env, "Starting gateway");

    axum::serve(listener, app).await?;

    Ok(())
}
