//! 功能模块与图标

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// 功能模块标识
///
/// 编译期确定的有限集合；声明顺序即侧边栏/仪表盘的展示顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleId {
    Dashboard,
    AcademicOperation,
    Lms,
    Examination,
    MasterSetup,
    UserManagement,
    PermissionManagement,
    Attendance,
    Hostel,
    Library,
    Transport,
    Fees,
    Reports,
}

impl ModuleId {
    pub const ALL: [ModuleId; 13] = [
        ModuleId::Dashboard,
        ModuleId::AcademicOperation,
        ModuleId::Lms,
        ModuleId::Examination,
        ModuleId::MasterSetup,
        ModuleId::UserManagement,
        ModuleId::PermissionManagement,
        ModuleId::Attendance,
        ModuleId::Hostel,
        ModuleId::Library,
        ModuleId::Transport,
        ModuleId::Fees,
        ModuleId::Reports,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ModuleId::Dashboard => "dashboard",
            ModuleId::AcademicOperation => "academic-operation",
            ModuleId::Lms => "lms",
            ModuleId::Examination => "examination",
            ModuleId::MasterSetup => "master-setup",
            ModuleId::UserManagement => "user-management",
            ModuleId::PermissionManagement => "permission-management",
            ModuleId::Attendance => "attendance",
            ModuleId::Hostel => "hostel",
            ModuleId::Library => "library",
            ModuleId::Transport => "transport",
            ModuleId::Fees => "fees",
            ModuleId::Reports => "reports",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleId::Dashboard => "Dashboard",
            ModuleId::AcademicOperation => "Academic Operation",
            ModuleId::Lms => "LMS",
            ModuleId::Examination => "Examination",
            ModuleId::MasterSetup => "Master Setup",
            ModuleId::UserManagement => "User Management",
            ModuleId::PermissionManagement => "Permission Management",
            ModuleId::Attendance => "Attendance",
            ModuleId::Hostel => "Hostel",
            ModuleId::Library => "Library",
            ModuleId::Transport => "Transport",
            ModuleId::Fees => "Fees",
            ModuleId::Reports => "Reports",
        }
    }

    /// 模块图标（全映射）
    pub fn icon(&self) -> ModuleIcon {
        match self {
            ModuleId::Dashboard => ModuleIcon::LayoutDashboard,
            ModuleId::AcademicOperation => ModuleIcon::GraduationCap,
            ModuleId::Lms => ModuleIcon::BookOpen,
            ModuleId::Examination => ModuleIcon::ClipboardCheck,
            ModuleId::MasterSetup => ModuleIcon::Settings,
            ModuleId::UserManagement => ModuleIcon::Users,
            ModuleId::PermissionManagement => ModuleIcon::ShieldCheck,
            ModuleId::Attendance => ModuleIcon::CalendarCheck,
            ModuleId::Hostel => ModuleIcon::Building,
            ModuleId::Library => ModuleIcon::Library,
            ModuleId::Transport => ModuleIcon::Bus,
            ModuleId::Fees => ModuleIcon::Wallet,
            ModuleId::Reports => ModuleIcon::BarChart,
        }
    }

    /// 解析模块标识，与 [`ModuleId::code`] 精确匹配
    pub fn parse(raw: &str) -> Option<ModuleId> {
        ModuleId::ALL.into_iter().find(|module| module.code() == raw)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ModuleId {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleId::parse(s).ok_or_else(|| AccessError::UnknownModule(s.to_string()))
    }
}

/// 模块图标
///
/// `Default` 为未知模块的占位图标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleIcon {
    LayoutDashboard,
    GraduationCap,
    BookOpen,
    ClipboardCheck,
    Settings,
    Users,
    ShieldCheck,
    CalendarCheck,
    Building,
    Library,
    Bus,
    Wallet,
    BarChart,
    Default,
}

impl ModuleIcon {
    /// 前端图标库中的名称
    pub fn name(&self) -> &'static str {
        match self {
            ModuleIcon::LayoutDashboard => "layout-dashboard",
            ModuleIcon::GraduationCap => "graduation-cap",
            ModuleIcon::BookOpen => "book-open",
            ModuleIcon::ClipboardCheck => "clipboard-check",
            ModuleIcon::Settings => "settings",
            ModuleIcon::Users => "users",
            ModuleIcon::ShieldCheck => "shield-check",
            ModuleIcon::CalendarCheck => "calendar-check",
            ModuleIcon::Building => "building",
            ModuleIcon::Library => "library",
            ModuleIcon::Bus => "bus",
            ModuleIcon::Wallet => "wallet",
            ModuleIcon::BarChart => "bar-chart",
            ModuleIcon::Default => "box",
        }
    }
}

/// 按模块标识获取图标，未知标识返回 [`ModuleIcon::Default`]
pub fn module_icon(module_id: &str) -> ModuleIcon {
    ModuleId::parse(module_id)
        .map(|module| module.icon())
        .unwrap_or(ModuleIcon::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_codes() {
        for module in ModuleId::ALL {
            assert_eq!(ModuleId::parse(module.code()), Some(module));
            assert_eq!(module.to_string(), module.code());
        }
    }

    #[test]
    fn test_unknown_module() {
        assert_eq!(ModuleId::parse("canteen"), None);
        assert_eq!(ModuleId::parse("MASTER_SETUP"), None);
        assert_eq!(ModuleId::parse("master_setup"), None);
        assert_eq!(ModuleId::parse(" lms "), None);
        assert!("canteen".parse::<ModuleId>().is_err());
    }

    #[test]
    fn test_icon_mapping_is_total_and_never_default() {
        for module in ModuleId::ALL {
            assert_ne!(module.icon(), ModuleIcon::Default, "{module}");
        }
    }

    #[test]
    fn test_module_icon_fallback() {
        assert_eq!(module_icon("examination"), ModuleIcon::ClipboardCheck);
        assert_eq!(module_icon("no-such-module"), ModuleIcon::Default);
        assert_eq!(module_icon(""), ModuleIcon::Default);
        assert_eq!(ModuleIcon::Default.name(), "box");
    }
}
