//! API 客户端
//!
//! 全局唯一的客户端实例（通过 Context 提供），固定基地址并携带 Cookie。
//! 每次调用的流程：
//!
//! 构建配置 -> 请求拦截 (`on_request`) -> 发送 -> 解析信封 -> 响应拦截 (`on_response`)
//!
//! 响应拦截发现 "未登录" 状态码时整页跳转到登录页（附带当前地址作为 `redirect`），
//! 但不会中断本次调用：调用方仍然拿到信封中的 `data`。
//!
//! 需要向用户说明失败原因时使用 `call_checked`，业务错误会带上错误码与描述。

use std::fmt::Debug;

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use teams_matcher_shared::{ApiRequest, BaseResponse, ErrorCode, HttpMethod};
use thiserror::Error;

use crate::config::{API_BASE_URL, LOGIN_PATH, UNAUTHENTICATED_CODE, WITH_CREDENTIALS};
use crate::web::http::{FetchTransport, HttpError, HttpResponse, RequestConfig, Transport};
use crate::web::location::{BrowserNavigator, Navigator};


/// 带 HTTP 状态的完整响应
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub envelope: BaseResponse<T>,
}

impl HttpResponse {
    /// 解析响应体为信封；非 2xx 状态视为传输错误
    pub fn into_api_response<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, HttpError> {
        if !self.ok() {
            return Err(HttpError::BadStatus(self.status));
        }
        let envelope = serde_json::from_str::<BaseResponse<T>>(&self.body)
            .map_err(|e| HttpError::ResponseParseFailed(e.to_string()))?;
        Ok(ApiResponse {
            status: self.status,
            envelope,
        })
    }
}

/// 接口调用失败：传输层错误或服务端返回的业务错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("{reason}")]
    Business { code: i32, reason: String },
}

impl CallError {
    /// 业务错误的已知错误码
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            CallError::Business { code, .. } => ErrorCode::from_code(*code),
            CallError::Http(_) => None,
        }
    }

    /// 成功信封取出 `data`，其余情况转为业务错误
    pub fn check<T>(envelope: BaseResponse<T>) -> Result<T, CallError> {
        if !envelope.is_success() {
            return Err(CallError::Business {
                code: envelope.code,
                reason: envelope.failure_reason(),
            });
        }
        let code = envelope.code;
        envelope.data.ok_or_else(|| CallError::Business {
            code,
            reason: "响应数据为空".to_string(),
        })
    }
}

/// 未登录时的跳转地址：`/user/login?redirect=<当前地址>`
///
/// 当前地址原样拼接，不做编码；登录页用 `redirect_from_search` 读取到末尾。
pub fn login_redirect_url(current_href: &str) -> String {
    format!("{}?redirect={}", LOGIN_PATH, current_href)
}

/// 把请求参数展开为查询参数
///
/// 顶层必须是对象（或空）；`null` 字段跳过，数组展开为同名的多个参数。
pub fn to_query_pairs<T: Serialize>(value: &T) -> Result<Vec<(String, String)>, HttpError> {
    let value =
        serde_json::to_value(value).map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;

    let map = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Object(map) => map,
        other => {
            return Err(HttpError::RequestBuildFailed(format!(
                "查询参数必须是对象: {}",
                other
            )));
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::Array(items) => {
                for item in items {
                    if let Some(v) = scalar_to_string(&item) {
                        pairs.push((key.clone(), v));
                    }
                }
            }
            other => {
                if let Some(v) = scalar_to_string(&other) {
                    pairs.push((key, v));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// API 客户端
///
/// 泛型参数用于在测试中替换传输层与导航实现。
#[derive(Debug, Clone)]
pub struct ApiClient<T = FetchTransport, N = BrowserNavigator> {
    base_url: String,
    with_credentials: bool,
    transport: T,
    navigator: N,
}

impl ApiClient {
    /// 浏览器环境下的默认客户端
    pub fn browser() -> Self {
        Self::new(API_BASE_URL, FetchTransport, BrowserNavigator)
    }
}

impl<T: Transport, N: Navigator> ApiClient<T, N> {
    pub fn new(base_url: &str, transport: T, navigator: N) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            with_credentials: WITH_CREDENTIALS,
            transport,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 根据接口定义构建请求配置
    pub fn build_config<R: ApiRequest>(&self, req: &R) -> Result<RequestConfig, HttpError> {
        let mut config = RequestConfig::new(R::METHOD, &self.base_url, R::PATH);
        config.with_credentials = self.with_credentials;
        match R::METHOD {
            HttpMethod::Get => config.params = to_query_pairs(req)?,
            HttpMethod::Post => {
                let body = serde_json::to_string(req)
                    .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;
                config.body = Some(body);
            }
        }
        Ok(config)
    }

    /// 请求拦截：记录日志后原样放行，错误原样传递
    pub fn on_request(
        &self,
        config: Result<RequestConfig, HttpError>,
    ) -> Result<RequestConfig, HttpError> {
        match config {
            Ok(config) => {
                tracing::info!(method = config.method.as_str(), url = %config.url(), "sending request");
                tracing::debug!(?config, "request config");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(error = %e, "request failed before send");
                Err(e)
            }
        }
    }

    /// 响应拦截：记录日志，遇到未登录状态码时跳转登录页，返回完整信封
    pub fn on_envelope<D: Debug>(
        &self,
        response: Result<ApiResponse<D>, HttpError>,
    ) -> Result<BaseResponse<D>, HttpError> {
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                return Err(e);
            }
        };

        tracing::info!(
            status = response.status,
            code = response.envelope.code,
            "received response"
        );
        tracing::debug!(?response, "response body");

        if response.envelope.code == UNAUTHENTICATED_CODE {
            let target = login_redirect_url(&self.navigator.current_href());
            tracing::warn!(%target, "not logged in, redirecting");
            self.navigator.assign(&target);
        }

        Ok(response.envelope)
    }

    /// 响应拦截：在 `on_envelope` 基础上只返回 `data`
    pub fn on_response<D: Debug>(
        &self,
        response: Result<ApiResponse<D>, HttpError>,
    ) -> Result<Option<D>, HttpError> {
        self.on_envelope(response).map(|envelope| envelope.data)
    }

    /// 请求拦截后发送，解析出带状态码的信封
    async fn exchange<D: DeserializeOwned>(
        &self,
        config: Result<RequestConfig, HttpError>,
    ) -> Result<ApiResponse<D>, HttpError> {
        let config = self.on_request(config)?;
        let raw = self.transport.send(&config).await?;
        raw.into_api_response::<D>()
    }

    /// 发送一个已构建的请求，返回信封中的 `data`
    pub async fn request<D>(&self, config: Result<RequestConfig, HttpError>) -> Result<Option<D>, HttpError>
    where
        D: DeserializeOwned + Debug,
    {
        let response = self.exchange(config).await;
        self.on_response(response)
    }

    /// 调用一个接口
    ///
    /// `Ok(None)` 表示服务端返回了业务错误（`data` 为空），调用方自行处理。
    pub async fn call<R>(&self, req: &R) -> Result<Option<R::Response>, HttpError>
    where
        R: ApiRequest,
        R::Response: Debug,
    {
        self.request(self.build_config(req)).await
    }

    /// 调用一个接口，业务错误连同错误码和描述一起返回
    pub async fn call_checked<R>(&self, req: &R) -> Result<R::Response, CallError>
    where
        R: ApiRequest,
        R::Response: Debug,
    {
        let response = self.exchange(self.build_config(req)).await;
        let envelope = self.on_envelope(response)?;
        CallError::check(envelope)
    }
}

/// 在 App 根部提供全局客户端
pub fn provide_api_client() -> ApiClient {
    let client = ApiClient::browser();
    provide_context(client.clone());
    client
}

/// 从 Context 获取全局客户端
///
/// 返回可复制的句柄，事件回调中用 `get_value()` 取出客户端。
pub fn use_api() -> StoredValue<ApiClient> {
    let client = use_context::<ApiClient>().expect("ApiClient should be provided");
    StoredValue::new(client)
}
