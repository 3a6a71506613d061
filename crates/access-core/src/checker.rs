//! 访问检查器
//!
//! 页面守卫使用的决策点。角色由调用方显式传入，检查器本身无状态、无副作用。

use std::sync::Arc;

use crate::module::ModuleId;
use crate::policy::AccessPolicyTable;
use crate::role::{Role, role_display_name};

/// 访问检查器
///
/// 共享一张只读策略表，克隆开销为一次 `Arc` 计数。
#[derive(Debug, Clone)]
pub struct AccessChecker {
    table: Arc<AccessPolicyTable>,
}

impl AccessChecker {
    pub fn new(table: AccessPolicyTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// 使用内置策略表
    pub fn builtin() -> Self {
        Self::new(AccessPolicyTable::builtin())
    }

    pub fn table(&self) -> &AccessPolicyTable {
        &self.table
    }

    /// 角色是否可访问模块
    ///
    /// 未知角色、未知模块均返回 `false`。
    pub fn has_module_access(&self, role: &str, module_id: &str) -> bool {
        self.table.has_module_access(role, module_id)
    }

    /// 角色是否可访问任一模块（模块范围守卫）
    ///
    /// 空列表返回 `false`。
    pub fn has_any_module_access(&self, role: &str, module_ids: &[&str]) -> bool {
        module_ids
            .iter()
            .any(|module_id| self.has_module_access(role, module_id))
    }

    /// 角色可访问的模块列表，用于渲染仪表盘卡片和侧边栏
    pub fn accessible_modules(&self, role: &str) -> Vec<ModuleId> {
        match Role::parse(role) {
            Some(role) => self.table.modules_for(role).collect(),
            None => Vec::new(),
        }
    }

    /// 角色显示名称，见 [`role_display_name`]
    pub fn role_display_name(&self, role: &str) -> String {
        role_display_name(role)
    }
}

impl Default for AccessChecker {
    fn default() -> Self {
        Self::builtin()
    }
}
