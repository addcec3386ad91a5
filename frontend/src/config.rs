//! 编译期配置
//!
//! 后端地址在编译时确定；构建时可通过环境变量 `TEAMS_MATCHER_API_BASE` 覆盖，
//! 例如 `TEAMS_MATCHER_API_BASE=https://api.example.com/api trunk build --release`。

use teams_matcher_shared::ErrorCode;

/// 后端 API 基地址（不带结尾 `/`）
pub const API_BASE_URL: &str = match option_env!("TEAMS_MATCHER_API_BASE") {
    Some(url) => url,
    None => "http://localhost:8080/api",
};

/// 跨域请求是否携带 Cookie（后端使用 Session 保存登录态）
pub const WITH_CREDENTIALS: bool = true;

/// 表示 "未登录" 的信封状态码
pub const UNAUTHENTICATED_CODE: i32 = ErrorCode::NotLogin.code();

/// 登录页路径，未登录时携带 `redirect` 参数跳转至此
pub const LOGIN_PATH: &str = "/user/login";

/// LocalStorage 中记录上次登录账号的键
pub const STORAGE_ACCOUNT_KEY: &str = "teams_matcher_account";

/// 提示消息的显示时长（毫秒）
pub const TOAST_MILLIS: u32 = 3000;

/// 首页推荐用户的分页大小
pub const RECOMMEND_PAGE_SIZE: i64 = 8;

/// 心动模式下匹配的用户数量
pub const MATCH_NUM: i64 = 10;
