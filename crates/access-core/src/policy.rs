//! 访问策略表
//!
//! 角色 -> 可访问模块集合。启动时由内置默认值和静态配置构建，之后只读。

use std::collections::{BTreeSet, HashMap};

use crate::error::{AccessError, AccessResult};
use crate::module::ModuleId;
use crate::role::Role;

/// 访问策略表
///
/// 不变式: 每个 [`Role`] 都有一个条目（可能为空集合）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicyTable {
    grants: HashMap<Role, BTreeSet<ModuleId>>,
}

impl AccessPolicyTable {
    /// 所有角色均无权限的表
    pub fn empty() -> Self {
        Self {
            grants: Role::ALL
                .into_iter()
                .map(|role| (role, BTreeSet::new()))
                .collect(),
        }
    }

    /// 内置策略表
    pub fn builtin() -> Self {
        use ModuleId::*;

        let staff_modules = [Dashboard, AcademicOperation, Lms, Examination, Attendance];

        Self::empty()
            .with_role(Role::SuperAdmin, ModuleId::ALL)
            .with_role(
                Role::Admin,
                ModuleId::ALL
                    .into_iter()
                    .filter(|module| *module != PermissionManagement),
            )
            .with_role(
                Role::Institution,
                [
                    Dashboard,
                    AcademicOperation,
                    Lms,
                    Examination,
                    MasterSetup,
                    UserManagement,
                    Attendance,
                    Hostel,
                    Library,
                    Transport,
                    Fees,
                    Reports,
                ],
            )
            .with_role(
                Role::Principal,
                staff_modules.into_iter().chain([Library, Reports]),
            )
            .with_role(Role::Hod, staff_modules.into_iter().chain([Reports]))
            .with_role(Role::Faculty, staff_modules)
            .with_role(
                Role::Staff,
                [Dashboard, Attendance, Hostel, Library, Transport, Fees],
            )
            .with_role(
                Role::Student,
                [
                    Dashboard,
                    Lms,
                    Examination,
                    Attendance,
                    Hostel,
                    Library,
                    Transport,
                ],
            )
            .with_role(Role::Parent, [Dashboard, Examination, Attendance, Fees])
    }

    /// 替换某个角色的模块集合
    pub fn with_role(mut self, role: Role, modules: impl IntoIterator<Item = ModuleId>) -> Self {
        self.grants.insert(role, modules.into_iter().collect());
        self
    }

    /// 应用配置中的覆盖项
    ///
    /// 每个条目整体替换对应角色的模块集合；未出现的角色保持不变。
    /// 未知的角色或模块标识返回错误，而不是被静默忽略。
    pub fn with_overrides(mut self, overrides: &HashMap<String, Vec<String>>) -> AccessResult<Self> {
        for (raw_role, raw_modules) in overrides {
            let role: Role = raw_role.parse()?;
            let modules = raw_modules
                .iter()
                .map(|raw| raw.parse::<ModuleId>())
                .collect::<Result<BTreeSet<_>, AccessError>>()?;
            self.grants.insert(role, modules);
        }
        Ok(self)
    }

    /// 类型化判定
    pub fn allows(&self, role: Role, module: ModuleId) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|modules| modules.contains(&module))
    }

    /// 字符串判定，未知角色或未知模块返回 `false`
    pub fn has_module_access(&self, role: &str, module_id: &str) -> bool {
        match (Role::parse(role), ModuleId::parse(module_id)) {
            (Some(role), Some(module)) => self.allows(role, module),
            _ => false,
        }
    }

    /// 角色可访问的模块（按展示顺序）
    pub fn modules_for(&self, role: Role) -> impl Iterator<Item = ModuleId> + '_ {
        self.grants
            .get(&role)
            .into_iter()
            .flat_map(|modules| modules.iter().copied())
    }
}

impl Default for AccessPolicyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_entry() {
        let table = AccessPolicyTable::empty();
        for role in Role::ALL {
            assert!(table.grants.contains_key(&role));
            assert_eq!(table.modules_for(role).count(), 0);
        }
        let builtin = AccessPolicyTable::builtin();
        for role in Role::ALL {
            assert!(builtin.grants.contains_key(&role));
        }
    }

    #[test]
    fn test_builtin_scenarios() {
        let table = AccessPolicyTable::builtin();
        assert!(table.allows(Role::Student, ModuleId::Examination));
        assert!(!table.allows(Role::Student, ModuleId::MasterSetup));
        assert!(table.allows(Role::Admin, ModuleId::MasterSetup));
        assert!(!table.allows(Role::Parent, ModuleId::MasterSetup));
        assert!(!table.allows(Role::Admin, ModuleId::PermissionManagement));
        assert!(table.allows(Role::SuperAdmin, ModuleId::PermissionManagement));
    }

    #[test]
    fn test_modules_for_is_ordered() {
        let table = AccessPolicyTable::builtin();
        let modules: Vec<_> = table.modules_for(Role::Parent).collect();
        assert_eq!(
            modules,
            vec![
                ModuleId::Dashboard,
                ModuleId::Examination,
                ModuleId::Attendance,
                ModuleId::Fees
            ]
        );
    }

    #[test]
    fn test_overrides_replace_role_set() {
        let overrides = HashMap::from([(
            "parent".to_string(),
            vec!["dashboard".to_string(), "transport".to_string()],
        )]);
        let table = AccessPolicyTable::builtin().with_overrides(&overrides).unwrap();

        assert!(table.allows(Role::Parent, ModuleId::Transport));
        assert!(!table.allows(Role::Parent, ModuleId::Fees));
        // 其他角色不受影响
        assert!(table.allows(Role::Student, ModuleId::Examination));
    }

    #[test]
    fn test_overrides_empty_list_revokes_all() {
        let overrides = HashMap::from([("student".to_string(), Vec::new())]);
        let table = AccessPolicyTable::builtin().with_overrides(&overrides).unwrap();
        assert_eq!(table.modules_for(Role::Student).count(), 0);
    }

    #[test]
    fn test_overrides_reject_unknown_identifiers() {
        let unknown_role = HashMap::from([("janitor".to_string(), vec!["lms".to_string()])]);
        assert_eq!(
            AccessPolicyTable::builtin().with_overrides(&unknown_role),
            Err(AccessError::UnknownRole("janitor".to_string()))
        );

        let unknown_module = HashMap::from([("staff".to_string(), vec!["canteen".to_string()])]);
        assert_eq!(
            AccessPolicyTable::builtin().with_overrides(&unknown_module),
            Err(AccessError::UnknownModule("canteen".to_string()))
        );
    }
}
