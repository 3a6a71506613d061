//! 访问控制错误
//!
//! 仅用于策略表构建阶段（解析配置）；判定路径本身不会产生错误。

use campus_errors::AppError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

impl From<AccessError> for AppError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::UnknownRole(_) | AccessError::UnknownModule(_) => {
                AppError::Validation(error.to_string())
            }
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;
