//! campus-access-core - 角色/模块访问控制核心
//!
//! 角色 -> 可访问模块的静态映射，以及页面守卫调用的纯判定函数。
//! 所有未知输入都降级为安全默认值（拒绝访问 / 通用显示名），不返回错误。

pub mod checker;
pub mod error;
pub mod module;
pub mod policy;
pub mod role;

pub use checker::AccessChecker;
pub use error::{AccessError, AccessResult};
pub use module::{ModuleIcon, ModuleId, module_icon};
pub use policy::AccessPolicyTable;
pub use role::{Role, role_display_name};

use once_cell::sync::Lazy;

/// 内置策略表（进程级常量）
static BUILTIN_POLICY: Lazy<AccessPolicyTable> = Lazy::new(AccessPolicyTable::builtin);

/// 使用内置策略表判断角色是否可访问模块
///
/// 未知角色或未知模块一律返回 `false`。
pub fn has_module_access(role: &str, module_id: &str) -> bool {
    BUILTIN_POLICY.has_module_access(role, module_id)
}

/// 内置策略表的只读引用
pub fn builtin_policy() -> &'static AccessPolicyTable {
    &BUILTIN_POLICY
}
