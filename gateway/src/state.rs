//! 网关共享状态

use axum::extract::FromRef;
use campus_access_core::AccessChecker;
use campus_auth_core::TokenService;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub checker: AccessChecker,
    pub tokens: TokenService,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(checker: AccessChecker, tokens: TokenService) -> Self {
        Self {
            checker,
            tokens,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusHandle>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl FromRef<AppState> for AccessChecker {
    fn from_ref(state: &AppState) -> Self {
        state.checker.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
