use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod protocol;

pub use protocol::*;

// =========================================================
// 枚举定义 (Enums)
// =========================================================

/// 为 "数字编码" 枚举生成序号映射与整数 (反)序列化
///
/// 服务端以整数传输这些状态，未知序号视为解析错误。
macro_rules! ordinal_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// 全部取值，按序号排列
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn code(self) -> i32 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// 界面展示文本
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = String;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                Self::from_code(code)
                    .ok_or_else(|| format!("未知的 {} 取值: {}", stringify!($name), code))
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }
    };
}

ordinal_enum! {
    /// 用户性别
    pub enum Gender {
        Male = 0 => "男",
        Female = 1 => "女",
    }
}

ordinal_enum! {
    /// 用户状态
    pub enum UserStatus {
        Normal = 0 => "正常",
        Disabled = 1 => "禁用",
    }
}

ordinal_enum! {
    /// 用户角色
    pub enum UserRole {
        Default = 0 => "普通用户",
        Admin = 1 => "管理员",
    }
}

ordinal_enum! {
    /// 队伍状态
    pub enum TeamStatus {
        /// 公开，任何人可加入
        Public = 0 => "公开",
        /// 私有，仅管理员可见
        Private = 1 => "私有",
        /// 加密，加入时需要密码
        Secret = 2 => "加密",
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Normal
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Default
    }
}

impl Default for TeamStatus {
    fn default() -> Self {
        TeamStatus::Public
    }
}

impl TeamStatus {
    /// 该状态下加入队伍是否需要密码
    pub fn requires_password(self) -> bool {
        matches!(self, TeamStatus::Secret)
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户信息
///
/// `id` 由服务端分配，客户端只持有副本，不提供修改入口；
/// 修改资料走 [`UserUpdateRequest`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    pub user_account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// 新注册的账号尚未填写性别
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub user_status: UserStatus,
    #[serde(default, deserialize_with = "nullable")]
    pub user_role: UserRole,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub create_time: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: i64,
        username: impl Into<String>,
        user_account: impl Into<String>,
        gender: Gender,
        tags: Vec<String>,
        create_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            user_account: user_account.into(),
            avatar_url: None,
            profile: None,
            gender: Some(gender),
            phone: String::new(),
            email: String::new(),
            user_status: UserStatus::Normal,
            user_role: UserRole::Default,
            tags,
            create_time,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn is_admin(&self) -> bool {
        self.user_role == UserRole::Admin
    }
}

/// 队伍信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<DateTime<Utc>>,
    pub max_num: i32,
    // 仅加密队伍携带
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub status: TeamStatus,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    /// 创建人，列表接口才会带上
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_join_num: Option<i32>,
    /// 当前用户是否已加入
    #[serde(default)]
    pub has_join: bool,
}

impl Team {
    /// 创建人 id（若接口带上了创建人信息）
    pub fn creator_id(&self) -> Option<i64> {
        self.create_user.as_ref().map(User::id)
    }

    /// "已加入/上限" 文案
    pub fn member_summary(&self) -> String {
        format!("{}/{}", self.has_join_num.unwrap_or(0), self.max_num)
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub current: i64,
}

// Java 端的字符串字段可能为 null
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =========================================================
// 标签的线上格式
// =========================================================

/// 服务端把标签存成 JSON 字符串（如 `"[\"java\",\"男\"]"`），
/// 部分接口又直接返回数组，这里两种都接受，`null` 视为空。
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Encoded(String),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TagsRepr>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(TagsRepr::List(tags)) => Ok(tags),
        Some(TagsRepr::Encoded(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(TagsRepr::Encoded(raw)) => {
            serde_json::from_str::<Option<Vec<String>>>(&raw)
                .map(Option::unwrap_or_default)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend_user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "username": "jun",
            "userAccount": "junxing",
            "avatarUrl": "https://example.com/a.png",
            "gender": 1,
            "userPassword": null,
            "phone": "123",
            "email": null,
            "userStatus": 0,
            "createTime": "2024-05-01T10:00:00.000+00:00",
            "updateTime": "2024-05-02T10:00:00.000+00:00",
            "userRole": 1,
            "planetCode": "1",
            "tags": "[\"java\",\"rust\"]"
        })
    }

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_value(backend_user_json()).unwrap();

        assert_eq!(user.id(), 7);
        assert_eq!(user.user_account, "junxing");
        assert_eq!(user.gender, Some(Gender::Female));
        assert_eq!(user.user_role, UserRole::Admin);
        assert!(user.is_admin());
        assert_eq!(user.profile, None);
        assert_eq!(user.email, "");
        assert_eq!(user.tags, vec!["java".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_user_tags_accepts_array_and_null() {
        let mut value = backend_user_json();
        value["tags"] = json!(["a", "b"]);
        let user: User = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(user.tags, vec!["a".to_string(), "b".to_string()]);

        value["tags"] = serde_json::Value::Null;
        let user: User = serde_json::from_value(value.clone()).unwrap();
        assert!(user.tags.is_empty());

        value.as_object_mut().unwrap().remove("tags");
        let user: User = serde_json::from_value(value).unwrap();
        assert!(user.tags.is_empty());
    }

    #[test]
    fn test_user_serializes_tags_as_array() {
        let user: User = serde_json::from_value(backend_user_json()).unwrap();
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["tags"], json!(["java", "rust"]));
        assert_eq!(value["gender"], json!(1));
        assert!(value.get("profile").is_none());
    }

    #[test]
    fn test_fresh_account_with_null_fields() {
        // 刚注册的账号只有账号与密码
        let body = json!({
            "code": 0,
            "data": {
                "id": 9,
                "username": null,
                "userAccount": "newbie",
                "avatarUrl": null,
                "gender": null,
                "phone": null,
                "email": null,
                "userStatus": null,
                "userRole": null,
                "tags": null,
                "createTime": "2024-05-01T10:00:00.000+00:00"
            },
            "message": "ok",
            "description": ""
        });

        let resp: BaseResponse<User> = serde_json::from_value(body).unwrap();
        let user = resp.data.unwrap();
        assert_eq!(user.id(), 9);
        assert_eq!(user.gender, None);
        assert_eq!(user.user_status, UserStatus::Normal);
        assert_eq!(user.user_role, UserRole::Default);
        assert_eq!(user.username, "");

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("gender").is_none());
    }

    #[test]
    fn test_unknown_ordinal_is_rejected() {
        let mut value = backend_user_json();
        value["gender"] = json!(5);
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_team_status_ordinals() {
        assert_eq!(TeamStatus::from_code(0), Some(TeamStatus::Public));
        assert_eq!(TeamStatus::from_code(1), Some(TeamStatus::Private));
        assert_eq!(TeamStatus::from_code(2), Some(TeamStatus::Secret));
        assert_eq!(TeamStatus::from_code(3), None);
        assert_eq!(TeamStatus::Secret.label(), "加密");
        assert!(TeamStatus::Secret.requires_password());
        assert!(!TeamStatus::Private.requires_password());
        assert_eq!(TeamStatus::ALL.len(), 3);
    }

    #[test]
    fn test_team_optional_fields() {
        let team: Team = serde_json::from_value(json!({
            "id": 3,
            "name": "rustaceans",
            "description": "hi",
            "maxNum": 5,
            "userId": 7,
            "status": 2,
            "createTime": "2024-05-01T10:00:00.000+00:00",
            "updateTime": "2024-05-01T10:00:00.000+00:00",
            "hasJoinNum": 2
        }))
        .unwrap();

        assert_eq!(team.status, TeamStatus::Secret);
        assert_eq!(team.expire_time, None);
        assert_eq!(team.password, None);
        assert_eq!(team.create_user, None);
        assert_eq!(team.creator_id(), None);
        assert!(!team.has_join);
        assert_eq!(team.member_summary(), "2/5");
    }

    #[test]
    fn test_team_with_creator() {
        let team: Team = serde_json::from_value(json!({
            "id": 3,
            "name": "rustaceans",
            "maxNum": 5,
            "status": 0,
            "expireTime": "2030-01-01T00:00:00.000+00:00",
            "createTime": "2024-05-01T10:00:00.000+00:00",
            "updateTime": "2024-05-01T10:00:00.000+00:00",
            "createUser": backend_user_json(),
            "hasJoin": true
        }))
        .unwrap();

        assert_eq!(team.creator_id(), Some(7));
        assert!(team.has_join);
        assert!(team.expire_time.is_some());
        assert_eq!(team.member_summary(), "0/5");
    }
}
