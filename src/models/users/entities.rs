use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 定义用户角色的宏
///
/// 自动生成：
/// - enum 定义（snake_case 序列化）
/// - as_str() / Display / FromStr / Deserialize
macro_rules! define_user_roles {
    ($(
        $variant:ident => $name:literal
    ),* $(,)?) => {
        // 用户角色
        #[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
        #[serde(rename_all = "snake_case")]
        #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
        pub enum UserRole {
            $($variant,)*
        }

        impl UserRole {
            pub const ALL: &'static [UserRole] = &[$(UserRole::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(UserRole::$variant => $name,)*
                }
            }
        }

        impl std::str::FromStr for UserRole {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(UserRole::$variant),)*
                    _ => Err(format!("Invalid user role: {s}")),
                }
            }
        }
    };
}

define_user_roles! {
    Admin => "admin",
    NationalOffice => "national_office",
    RegionalOffice => "regional_office",
    ZoneOffice => "zone_office",
    WeredaOffice => "wereda_office",
    University => "university",
    College => "college",
    Senate => "senate",
    School => "school",
    ViceDirector => "vice_director",
    DepartmentHead => "department_head",
    Teacher => "teacher",
    Librarian => "librarian",
    RecordOfficer => "record_officer",
    Student => "student",
    Inventorian => "inventorian",
    StoreMan => "store_man",
    DormitoryManager => "dormitory_manager",
    HrOfficer => "hr_officer",
}

impl UserRole {
    /// 上级行政机关（国家 / 地区 / 片区）
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::NationalOffice,
            &Self::RegionalOffice,
            &Self::ZoneOffice,
        ]
    }

    /// 管理区与学校的角色
    pub fn administration_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::NationalOffice,
            &Self::RegionalOffice,
            &Self::ZoneOffice,
            &Self::WeredaOffice,
        ]
    }

    /// 学籍管理
    pub fn registrar_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::NationalOffice,
            &Self::RegionalOffice,
            &Self::ZoneOffice,
            &Self::WeredaOffice,
            &Self::University,
            &Self::College,
            &Self::School,
            &Self::ViceDirector,
            &Self::RecordOfficer,
        ]
    }

    /// 人事管理
    pub fn hr_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::NationalOffice,
            &Self::RegionalOffice,
            &Self::ZoneOffice,
            &Self::WeredaOffice,
            &Self::University,
            &Self::College,
            &Self::School,
            &Self::ViceDirector,
            &Self::HrOfficer,
        ]
    }

    /// 教务管理（课程、学期、班级、课表、成绩、考勤）
    pub fn academic_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::University,
            &Self::College,
            &Self::Senate,
            &Self::School,
            &Self::ViceDirector,
            &Self::DepartmentHead,
            &Self::RecordOfficer,
        ]
    }

    /// 教师自助
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::DepartmentHead]
    }

    /// 学生自助
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }

    /// 图书馆
    pub fn library_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::School, &Self::Librarian]
    }

    /// 仓库与资产
    pub fn inventory_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::School,
            &Self::Inventorian,
            &Self::StoreMan,
        ]
    }

    /// 可发布公告的角色
    pub fn announcer_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Admin,
            &Self::NationalOffice,
            &Self::RegionalOffice,
            &Self::ZoneOffice,
            &Self::WeredaOffice,
            &Self::University,
            &Self::College,
            &Self::School,
            &Self::ViceDirector,
            &Self::DepartmentHead,
        ]
    }

    /// 可以通过职员档案创建的角色
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Teacher,
            &Self::ViceDirector,
            &Self::DepartmentHead,
            &Self::RecordOfficer,
            &Self::Librarian,
            &Self::StoreMan,
            &Self::Inventorian,
            &Self::HrOfficer,
            &Self::DormitoryManager,
        ]
    }

    pub fn is_staff(&self) -> bool {
        Self::staff_roles().contains(&self)
    }

    /// 公告受众分组名（students / teachers / staff）
    pub fn audience_group(&self) -> Option<&'static str> {
        match self {
            UserRole::Student => Some("students"),
            UserRole::Teacher | UserRole::DepartmentHead => Some("teachers"),
            role if role.is_staff() => Some("staff"),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: {}",
                UserRole::ALL
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub profile_photo: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_strings() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), *role);
            assert_eq!(
                serde_json::to_string(role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
    }

    #[test]
    fn test_invalid_role_is_rejected() {
        assert!("principal".parse::<UserRole>().is_err());
        assert!(serde_json::from_str::<UserRole>("\"principal\"").is_err());
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::Librarian.is_staff());
        assert!(!UserRole::Student.is_staff());
        assert!(UserRole::admin_roles().contains(&&UserRole::ZoneOffice));
        assert_eq!(UserRole::Student.audience_group(), Some("students"));
        assert_eq!(UserRole::DepartmentHead.audience_group(), Some("teachers"));
        assert_eq!(UserRole::StoreMan.audience_group(), Some("staff"));
        assert_eq!(UserRole::Admin.audience_group(), None);
    }
}
