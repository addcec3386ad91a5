//! HTTP 传输层
//!
//! 定义 `Transport` 抽象，并使用 `gloo-net` (浏览器 fetch) 实现。
//! 拦截、信封解析等逻辑在 `crate::client` 中，这里只负责把请求发出去。

use gloo_net::http::Request;
use teams_matcher_shared::HttpMethod;
use thiserror::Error;
use web_sys::RequestCredentials;

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuildFailed(String),
    /// 网络请求失败
    #[error("网络错误: {0}")]
    NetworkError(String),
    /// 非 2xx 响应
    #[error("服务器返回异常状态: {0}")]
    BadStatus(u16),
    /// 响应解析失败
    #[error("响应解析失败: {0}")]
    ResponseParseFailed(String),
}

/// 一次请求的完整配置
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub base_url: String,
    /// 相对于 `base_url` 的路径
    pub path: String,
    pub params: Vec<(String, String)>,
    /// JSON 请求体
    pub body: Option<String>,
    pub with_credentials: bool,
}

impl RequestConfig {
    pub fn new(method: HttpMethod, base_url: &str, path: &str) -> Self {
        Self {
            method,
            base_url: base_url.trim_end_matches('/').to_string(),
            path: path.to_string(),
            params: Vec::new(),
            body: None,
            with_credentials: false,
        }
    }

    /// 基地址与路径拼接后的完整 URL（不含查询参数）
    pub fn url(&self) -> String {
        if self.path.starts_with('/') {
            format!("{}{}", self.base_url, self.path)
        } else {
            format!("{}/{}", self.base_url, self.path)
        }
    }
}

/// 原始 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 传输特性
///
/// (?Send) 是因为浏览器环境下 fetch 的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, config: &RequestConfig) -> Result<HttpResponse, HttpError>;
}

/// 基于 `gloo-net` 的浏览器传输实现
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, config: &RequestConfig) -> Result<HttpResponse, HttpError> {
        let url = config.url();
        let builder = match config.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
        };

        let builder = builder.query(config.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let builder = if config.with_credentials {
            builder.credentials(RequestCredentials::Include)
        } else {
            builder
        };

        let response = match &config.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body.clone())
                .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| HttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
