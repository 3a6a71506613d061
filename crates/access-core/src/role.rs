//! 角色

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// 未知且无法生成标签时的显示名
const FALLBACK_DISPLAY_NAME: &str = "User";

/// 用户角色
///
/// 会话建立后不可变，由认证方提供。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Institution,
    Principal,
    Hod,
    Faculty,
    Staff,
    Student,
    Parent,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Institution,
        Role::Principal,
        Role::Hod,
        Role::Faculty,
        Role::Staff,
        Role::Student,
        Role::Parent,
    ];

    /// 角色标识
    pub fn code(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Institution => "institution",
            Role::Principal => "principal",
            Role::Hod => "hod",
            Role::Faculty => "faculty",
            Role::Staff => "staff",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    /// 角色显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Institution => "Institution",
            Role::Principal => "Principal",
            Role::Hod => "HOD",
            Role::Faculty => "Faculty",
            Role::Staff => "Staff",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }

    /// 解析角色标识
    ///
    /// 与 [`Role::code`] 精确匹配（区分大小写，不做任何规范化）；无法识别时返回 `None`。
    pub fn parse(raw: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.code() == raw)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

/// 获取角色显示名称
///
/// 已知角色返回规范名称；未知角色按 `-` / `_` / 空白分词后首字母大写，
/// 空输入返回通用名称。结果永远非空。
pub fn role_display_name(role: &str) -> String {
    if let Some(role) = Role::parse(role) {
        return role.display_name().to_string();
    }

    let label = role
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        FALLBACK_DISPLAY_NAME.to_string()
    } else {
        label
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
