//! 模块访问守卫
//!
//! 受保护路由在执行处理函数之前调用访问检查器；判定为拒绝时直接返回 403，
//! 处理函数（及其数据加载等副作用）不会被执行。角色取自已认证请求的 Claims。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use campus_access_core::{AccessChecker, ModuleId, role_display_name};
use campus_auth_core::Claims;
use campus_errors::AppError;
use metrics::counter;
use tracing::{debug, warn};

use crate::error::ApiError;

/// 路由所需模块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRequirement {
    /// 必须可访问该模块
    Module(ModuleId),
    /// 可访问其中任一模块即可
    AnyOf(Vec<ModuleId>),
}

impl ModuleRequirement {
    pub fn is_satisfied(&self, checker: &AccessChecker, role: &str) -> bool {
        match self {
            ModuleRequirement::Module(module) => checker.has_module_access(role, module.code()),
            ModuleRequirement::AnyOf(modules) => {
                let codes: Vec<&str> = modules.iter().map(|m| m.code()).collect();
                checker.has_any_module_access(role, &codes)
            }
        }
    }

    /// 日志与指标中使用的标签，如 `examination` 或 `academic-operation|lms`
    pub fn label(&self) -> String {
        match self {
            ModuleRequirement::Module(module) => module.code().to_string(),
            ModuleRequirement::AnyOf(modules) => modules
                .iter()
                .map(|m| m.code())
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    fn display(&self) -> String {
        match self {
            ModuleRequirement::Module(module) => module.display_name().to_string(),
            ModuleRequirement::AnyOf(modules) => modules
                .iter()
                .map(|m| m.display_name())
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

/// 守卫状态
#[derive(Debug, Clone)]
pub struct ModuleGate {
    checker: AccessChecker,
    requirement: ModuleRequirement,
}

impl ModuleGate {
    pub fn new(checker: AccessChecker, requirement: ModuleRequirement) -> Self {
        Self {
            checker,
            requirement,
        }
    }

    pub fn module(checker: AccessChecker, module: ModuleId) -> Self {
        Self::new(checker, ModuleRequirement::Module(module))
    }
}

/// Axum 中间件函数
pub async fn module_gate(
    State(gate): State<ModuleGate>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let Some(claims) = request.extensions().get::<Claims>() else {
        warn!(path = %path, "Module gate reached without authenticated claims");
        return ApiError::from(AppError::unauthorized("Missing session"))
            .with_instance(path)
            .into_response();
    };
    let role = claims.role.clone();
    let user_id = claims.sub.clone();

    let required = gate.requirement.label();
    let allowed = gate.requirement.is_satisfied(&gate.checker, &role);

    counter!(
        "route_gate_decisions_total",
        "module" => required.clone(),
        "allowed" => allowed.to_string()
    )
    .increment(1);

    if !allowed {
        warn!(
            user_id = %user_id,
            role = %role,
            required = %required,
            path = %path,
            "Access denied"
        );
        return ApiError::from(AppError::forbidden(format!(
            "{} role cannot access {}",
            role_display_name(&role),
            gate.requirement.display()
        )))
        .with_instance(path)
        .into_response();
    }

    debug!(user_id = %user_id, role = %role, required = %required, "Access granted");
    next.run(request).await
}
