use crate::{Gender, Page, Team, TeamStatus, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// `GET` requests are sent as query parameters, `POST` requests as a JSON body.
pub trait ApiRequest: Serialize {
    /// The payload type carried in the envelope's `data` field.
    type Response: DeserializeOwned;
    /// The URL path, relative to the API base.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// 响应信封 (Envelope)
// =========================================================

/// 服务端统一返回结构 `{ code, data, message, description }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseResponse<T> {
    pub code: i32,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl<T> BaseResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: ErrorCode::Success.code(),
            data: Some(data),
            message: Some("ok".to_string()),
            description: None,
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            data: None,
            message: Some(code.message().to_string()),
            description: None,
        }
    }

    /// 解析已知错误码，未知码返回 `None`
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_code(self.code)
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success.code()
    }

    /// 失败原因：优先 `description`，其次 `message`，都为空时用错误码的默认文案
    pub fn failure_reason(&self) -> String {
        let non_empty = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        non_empty(&self.description)
            .or_else(|| non_empty(&self.message))
            .or_else(|| self.error_code().map(|c| c.message().to_string()))
            .unwrap_or_else(|| format!("未知错误 ({})", self.code))
    }
}

/// 服务端错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    /// 请求参数错误
    ParamsError,
    /// 请求数据为空
    NullError,
    /// 未登录
    NotLogin,
    /// 无权限
    NoAuth,
    /// 禁止操作
    Forbidden,
    /// 系统内部异常
    SystemError,
}

impl ErrorCode {
    pub const fn code(self) -> i32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::ParamsError => 40000,
            ErrorCode::NullError => 40001,
            ErrorCode::NotLogin => 40100,
            ErrorCode::NoAuth => 40101,
            ErrorCode::Forbidden => 40301,
            ErrorCode::SystemError => 50000,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::Success),
            40000 => Some(ErrorCode::ParamsError),
            40001 => Some(ErrorCode::NullError),
            40100 => Some(ErrorCode::NotLogin),
            40101 => Some(ErrorCode::NoAuth),
            40301 => Some(ErrorCode::Forbidden),
            50000 => Some(ErrorCode::SystemError),
            _ => None,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "ok",
            ErrorCode::ParamsError => "请求参数错误",
            ErrorCode::NullError => "请求数据为空",
            ErrorCode::NotLogin => "未登录",
            ErrorCode::NoAuth => "无权限",
            ErrorCode::Forbidden => "禁止操作",
            ErrorCode::SystemError => "系统内部异常",
        }
    }
}

// =========================================================
// 用户接口 (/user)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginRequest {
    pub user_account: String,
    pub user_password: String,
}

impl ApiRequest for UserLoginRequest {
    type Response = User;
    const PATH: &'static str = "/user/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegisterRequest {
    pub user_account: String,
    pub user_password: String,
    pub check_password: String,
}

/// 返回新用户 id
impl ApiRequest for UserRegisterRequest {
    type Response = i64;
    const PATH: &'static str = "/user/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogoutRequest;

impl ApiRequest for UserLogoutRequest {
    type Response = i32;
    const PATH: &'static str = "/user/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const PATH: &'static str = "/user/current";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 按标签搜索用户（需包含全部标签）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersByTagsRequest {
    pub tag_name_list: Vec<String>,
}

impl ApiRequest for SearchUsersByTagsRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/user/search/tags";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendUsersRequest {
    pub page_size: i64,
    pub page_num: i64,
}

impl ApiRequest for RecommendUsersRequest {
    type Response = Page<User>;
    const PATH: &'static str = "/user/recommend";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 按标签相似度匹配用户，`num` 取值 1..=20
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchUsersRequest {
    pub num: i64,
}

impl ApiRequest for MatchUsersRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/user/match";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 修改用户资料，只发送需要修改的字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserUpdateRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// 按字段名（服务端的 camelCase 名）设置一个可编辑字段
    pub fn with_field(mut self, key: &str, value: String) -> Result<Self, String> {
        match key {
            "username" => self.username = Some(value),
            "avatarUrl" => self.avatar_url = Some(value),
            "profile" => self.profile = Some(value),
            "phone" => self.phone = Some(value),
            "email" => self.email = Some(value),
            "gender" => {
                let gender = value
                    .trim()
                    .parse::<i32>()
                    .ok()
                    .and_then(Gender::from_code)
                    .ok_or_else(|| format!("无效的性别: {}", value))?;
                self.gender = Some(gender);
            }
            _ => return Err(format!("不可编辑的字段: {}", key)),
        }
        Ok(self)
    }
}

impl ApiRequest for UserUpdateRequest {
    type Response = i32;
    const PATH: &'static str = "/user/update";
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// 队伍接口 (/team)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAddRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<DateTime<Utc>>,
    pub max_num: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub status: TeamStatus,
}

/// 返回新队伍 id
impl ApiRequest for TeamAddRequest {
    type Response = i64;
    const PATH: &'static str = "/team/add";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdateRequest {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<DateTime<Utc>>,
    pub status: TeamStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiRequest for TeamUpdateRequest {
    type Response = bool;
    const PATH: &'static str = "/team/update";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamGetRequest {
    pub id: i64,
}

impl ApiRequest for TeamGetRequest {
    type Response = Team;
    const PATH: &'static str = "/team/get";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 队伍查询条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 同时搜索队伍名称和描述
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_num: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TeamStatus>,
}

impl TeamQuery {
    pub fn search(text: &str, status: TeamStatus) -> Self {
        let text = text.trim();
        Self {
            search_text: (!text.is_empty()).then(|| text.to_string()),
            status: Some(status),
            ..Default::default()
        }
    }
}

impl ApiRequest for TeamQuery {
    type Response = Vec<Team>;
    const PATH: &'static str = "/team/list";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 当前用户创建的队伍
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MyCreatedTeamsQuery(pub TeamQuery);

impl ApiRequest for MyCreatedTeamsQuery {
    type Response = Vec<Team>;
    const PATH: &'static str = "/team/list/my/create";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// 当前用户加入的队伍
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MyJoinedTeamsQuery(pub TeamQuery);

impl ApiRequest for MyJoinedTeamsQuery {
    type Response = Vec<Team>;
    const PATH: &'static str = "/team/list/my/join";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamJoinRequest {
    pub team_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ApiRequest for TeamJoinRequest {
    type Response = bool;
    const PATH: &'static str = "/team/join";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamQuitRequest {
    pub team_id: i64,
}

impl ApiRequest for TeamQuitRequest {
    type Response = bool;
    const PATH: &'static str = "/team/quit";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// 解散队伍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDeleteRequest {
    pub id: i64,
}

impl ApiRequest for TeamDeleteRequest {
    type Response = bool;
    const PATH: &'static str = "/team/delete";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_null_data() {
        let resp: BaseResponse<User> = serde_json::from_value(json!({
            "code": 40100,
            "data": null,
            "message": "未登录",
            "description": ""
        }))
        .unwrap();

        assert_eq!(resp.data, None);
        assert_eq!(resp.error_code(), Some(ErrorCode::NotLogin));
        assert!(!resp.is_success());
    }

    #[test]
    fn test_envelope_without_message_fields() {
        let resp: BaseResponse<i64> = serde_json::from_value(json!({ "code": 0, "data": 12 })).unwrap();
        assert_eq!(resp.data, Some(12));
        assert!(resp.is_success());
        assert_eq!(resp.message, None);
    }

    #[test]
    fn test_failure_reason_prefers_description() {
        let resp: BaseResponse<bool> = serde_json::from_value(json!({
            "code": 40000,
            "data": null,
            "message": "请求参数错误",
            "description": "队伍已满"
        }))
        .unwrap();
        assert_eq!(resp.failure_reason(), "队伍已满");

        let resp: BaseResponse<bool> = serde_json::from_value(json!({
            "code": 40000,
            "message": "请求参数错误",
            "description": "  "
        }))
        .unwrap();
        assert_eq!(resp.failure_reason(), "请求参数错误");

        let resp: BaseResponse<bool> = serde_json::from_value(json!({ "code": 40301 })).unwrap();
        assert_eq!(resp.failure_reason(), "禁止操作");

        let resp: BaseResponse<bool> = serde_json::from_value(json!({ "code": 42 })).unwrap();
        assert_eq!(resp.failure_reason(), "未知错误 (42)");
    }

    #[test]
    fn test_error_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ParamsError,
            ErrorCode::NullError,
            ErrorCode::NotLogin,
            ErrorCode::NoAuth,
            ErrorCode::Forbidden,
            ErrorCode::SystemError,
        ] {
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
        }
        assert_eq!(ErrorCode::from_code(12345), None);
        assert_eq!(ErrorCode::NotLogin.code(), 40100);
    }

    #[test]
    fn test_update_request_only_sends_changed_field() {
        let req = UserUpdateRequest::new(7)
            .with_field("profile", "hello".to_string())
            .unwrap();
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "id": 7, "profile": "hello" }));
    }

    #[test]
    fn test_update_request_gender_field() {
        let req = UserUpdateRequest::new(7)
            .with_field("gender", "1".to_string())
            .unwrap();
        assert_eq!(req.gender, Some(Gender::Female));

        assert!(UserUpdateRequest::new(7).with_field("gender", "x".to_string()).is_err());
        assert!(UserUpdateRequest::new(7).with_field("userRole", "1".to_string()).is_err());
    }

    #[test]
    fn test_team_query_search() {
        let query = TeamQuery::search("  rust ", TeamStatus::Secret);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({ "searchText": "rust", "status": 2 }));

        let query = TeamQuery::search("", TeamStatus::Public);
        assert_eq!(query.search_text, None);
    }

    #[test]
    fn test_my_teams_query_is_transparent() {
        let query = MyJoinedTeamsQuery(TeamQuery {
            search_text: Some("go".to_string()),
            ..Default::default()
        });
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({ "searchText": "go" }));
        assert_eq!(MyJoinedTeamsQuery::PATH, "/team/list/my/join");
    }

    #[test]
    fn test_team_add_request_shape() {
        let req = TeamAddRequest {
            name: "rust".to_string(),
            description: String::new(),
            expire_time: None,
            max_num: 5,
            password: Some("123".to_string()),
            status: TeamStatus::Secret,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["maxNum"], json!(5));
        assert_eq!(value["status"], json!(2));
        assert!(value.get("expireTime").is_none());
    }
}
