//! 会话模块
//!
//! 保存当前登录用户。`SessionSlot` 是纯数据（最多一个用户，后写覆盖），
//! `SessionContext` 把它放进信号里，通过 Context 在组件间共享。
//! 生命周期：`init_session` -> `set` / `get` -> `clear`。

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use teams_matcher_shared::{CurrentUserRequest, User, UserLoginRequest, UserLogoutRequest};

use crate::client::{ApiClient, CallError};
use crate::config::STORAGE_ACCOUNT_KEY;
use crate::web::http::{HttpError, Transport};
use crate::web::location::Navigator;

/// 当前用户槽位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSlot {
    user: Option<User>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存用户，覆盖之前的值
    pub fn set(&mut self, user: User) {
        self.user = Some(user);
    }

    /// 当前用户，`None` 表示未登录
    pub fn get(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn clear(&mut self) {
        self.user = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// 会话状态
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub slot: SessionSlot,
    /// 上次登录的账号（用于登录页自动填充）
    pub last_account: String,
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    /// 创建新的会话上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    pub fn set(&self, user: User) {
        self.set_state.update(|state| state.slot.set(user));
    }

    /// 当前用户（响应式读取）
    pub fn get(&self) -> Option<User> {
        self.state.with(|state| state.slot.get().cloned())
    }

    /// 当前用户（非响应式读取，用于事件回调）
    pub fn get_untracked(&self) -> Option<User> {
        self.state.with_untracked(|state| state.slot.get().cloned())
    }

    pub fn clear(&self) {
        self.set_state.update(|state| state.slot.clear());
    }

    /// 登录状态信号
    pub fn is_logged_in_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.slot.is_logged_in()))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 初始化会话
///
/// 从 LocalStorage 加载上次登录的账号；用户信息只保存在内存中。
pub fn init_session(ctx: &SessionContext) {
    ctx.set_state.update(|state| {
        state.slot.clear();
        if let Ok(account) = LocalStorage::get::<String>(STORAGE_ACCOUNT_KEY) {
            state.last_account = account;
        }
    });
}

/// 会话存储
///
/// 登录、注销等流程只依赖这几个操作，测试中可以替换为内存实现。
pub trait SessionStore {
    /// 当前用户（非响应式）
    fn current(&self) -> Option<User>;
    fn save(&self, user: User);
    /// 记住登录成功的账号
    fn remember_account(&self, account: &str);
    fn clear(&self);
}

impl SessionStore for SessionContext {
    fn current(&self) -> Option<User> {
        self.get_untracked()
    }

    fn save(&self, user: User) {
        self.set(user);
    }

    fn remember_account(&self, account: &str) {
        if let Err(e) = LocalStorage::set(STORAGE_ACCOUNT_KEY, account) {
            tracing::warn!(error = %e, "failed to remember account");
        }
        self.set_state.update(|state| state.last_account = account.to_string());
    }

    fn clear(&self) {
        SessionContext::clear(self);
    }
}

/// 登录并保存当前用户
///
/// 账号只在登录成功后记住；失败时返回服务端给出的原因。
pub async fn login<S, T, N>(
    store: &S,
    api: &ApiClient<T, N>,
    account: String,
    password: String,
) -> Result<User, CallError>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    let req = UserLoginRequest {
        user_account: account.clone(),
        user_password: password,
    };
    let user = api.call_checked(&req).await?;

    store.save(user.clone());
    store.remember_account(&account);
    tracing::info!(user_id = user.id(), "logged in");
    Ok(user)
}

/// 获取当前用户：会话中已有则直接返回，否则向服务端查询并写入会话
pub async fn fetch_current_user<S, T, N>(
    store: &S,
    api: &ApiClient<T, N>,
) -> Result<Option<User>, HttpError>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    if let Some(user) = store.current() {
        return Ok(Some(user));
    }
    let user = api.call(&CurrentUserRequest).await?;
    if let Some(user) = &user {
        store.save(user.clone());
    }
    Ok(user)
}

/// 重新向服务端查询当前用户（资料修改后使用）
pub async fn refresh_current_user<S, T, N>(
    store: &S,
    api: &ApiClient<T, N>,
) -> Result<Option<User>, HttpError>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    let user = api.call(&CurrentUserRequest).await?;
    match &user {
        Some(user) => store.save(user.clone()),
        None => store.clear(),
    }
    Ok(user)
}

/// 注销：通知服务端后清空会话
///
/// 服务端调用失败时同样清空本地会话。
pub async fn logout<S, T, N>(store: &S, api: &ApiClient<T, N>) -> Result<(), HttpError>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    let result = api.call(&UserLogoutRequest).await;
    store.clear();
    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{MockTransport, create_client, envelope};
    use chrono::TimeZone;
    use std::cell::RefCell;
    use teams_matcher_shared::Gender;

    /// 内存会话存储
    #[derive(Default)]
    struct MemoryStore {
        slot: RefCell<SessionSlot>,
        account: RefCell<Option<String>>,
    }

    impl MemoryStore {
        fn with_user(user: User) -> Self {
            let store = Self::default();
            store.slot.borrow_mut().set(user);
            store
        }

        fn user(&self) -> Option<User> {
            self.slot.borrow().get().cloned()
        }
    }

    impl SessionStore for MemoryStore {
        fn current(&self) -> Option<User> {
            self.user()
        }

        fn save(&self, user: User) {
            self.slot.borrow_mut().set(user);
        }

        fn remember_account(&self, account: &str) {
            *self.account.borrow_mut() = Some(account.to_string());
        }

        fn clear(&self) {
            self.slot.borrow_mut().clear();
        }
    }

    fn user_json(user: &User) -> serde_json::Value {
        serde_json::to_value(user).unwrap()
    }

    fn create_user(id: i64, name: &str) -> User {
        let created = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        User::new(id, name, format!("{}_account", name), Gender::Male, vec![], created)
    }

    #[test]
    fn test_get_before_set_is_none() {
        let slot = SessionSlot::new();
        assert_eq!(slot.get(), None);
        assert!(!slot.is_logged_in());
    }

    #[test]
    fn test_last_write_wins() {
        let mut slot = SessionSlot::new();
        let u1 = create_user(1, "alice");
        let u2 = create_user(2, "bob");

        slot.set(u1);
        slot.set(u2.clone());

        assert_eq!(slot.get(), Some(&u2));
    }

    #[test]
    fn test_clear() {
        let mut slot = SessionSlot::new();
        slot.set(create_user(1, "alice"));
        assert!(slot.is_logged_in());

        slot.clear();
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut a = SessionSlot::new();
        let b = SessionSlot::new();
        a.set(create_user(1, "alice"));
        assert!(a.is_logged_in());
        assert!(!b.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_success_saves_user_and_account() {
        let alice = create_user(1, "alice");
        let transport = MockTransport::new().reply(200, envelope(0, user_json(&alice)));
        let (client, _) = create_client(transport);
        let store = MemoryStore::default();

        let out = login(&store, &client, "alice_account".to_string(), "12345678".to_string()).await;

        assert_eq!(out, Ok(alice.clone()));
        assert_eq!(store.user(), Some(alice));
        assert_eq!(store.account.borrow().as_deref(), Some("alice_account"));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_reason_and_forgets_account() {
        let body = serde_json::json!({
            "code": 40000,
            "data": null,
            "message": "请求参数错误",
            "description": "用户不存在或密码不匹配"
        });
        let transport = MockTransport::new().reply(200, body);
        let (client, _) = create_client(transport);
        let store = MemoryStore::default();

        let out = login(&store, &client, "nobody".to_string(), "wrongpass".to_string()).await;

        assert_eq!(out.unwrap_err().to_string(), "用户不存在或密码不匹配");
        assert_eq!(store.user(), None);
        assert_eq!(*store.account.borrow(), None);
    }

    #[tokio::test]
    async fn test_login_network_error_forgets_account() {
        let error = HttpError::NetworkError("offline".to_string());
        let (client, _) = create_client(MockTransport::new().fail(error.clone()));
        let store = MemoryStore::default();

        let out = login(&store, &client, "alice".to_string(), "12345678".to_string()).await;

        assert_eq!(out, Err(CallError::Http(error)));
        assert_eq!(*store.account.borrow(), None);
    }

    #[tokio::test]
    async fn test_fetch_current_user_uses_cached_user() {
        let alice = create_user(1, "alice");
        let (client, _) = create_client(MockTransport::new());
        let store = MemoryStore::with_user(alice.clone());

        let out = fetch_current_user(&store, &client).await;

        assert_eq!(out, Ok(Some(alice)));
        assert_eq!(client.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_current_user_queries_server_when_empty() {
        let bob = create_user(2, "bob");
        let transport = MockTransport::new().reply(200, envelope(0, user_json(&bob)));
        let (client, _) = create_client(transport);
        let store = MemoryStore::default();

        let out = fetch_current_user(&store, &client).await;

        assert_eq!(out, Ok(Some(bob.clone())));
        assert_eq!(store.user(), Some(bob));
        assert_eq!(client.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_refresh_current_user_clears_when_logged_out() {
        let transport = MockTransport::new().reply(200, envelope(40100, serde_json::Value::Null));
        let (client, navigator) = create_client(transport);
        let store = MemoryStore::with_user(create_user(1, "alice"));

        let out = refresh_current_user(&store, &client).await;

        assert_eq!(out, Ok(None));
        assert_eq!(store.user(), None);
        assert_eq!(navigator.assigned.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_current_user_replaces_stale_user() {
        let mut renamed = create_user(1, "alice");
        renamed.username = "alice2".to_string();
        let transport = MockTransport::new().reply(200, envelope(0, user_json(&renamed)));
        let (client, _) = create_client(transport);
        let store = MemoryStore::with_user(create_user(1, "alice"));

        let out = refresh_current_user(&store, &client).await;

        assert_eq!(out, Ok(Some(renamed.clone())));
        assert_eq!(store.user(), Some(renamed));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let error = HttpError::BadStatus(500);
        let transport = MockTransport::new().reply(500, serde_json::json!({}));
        let (client, _) = create_client(transport);
        let store = MemoryStore::with_user(create_user(1, "alice"));

        let out = logout(&store, &client).await;

        assert_eq!(out, Err(error));
        assert_eq!(store.user(), None);
    }

    #[tokio::test]
    async fn test_logout_success() {
        let transport = MockTransport::new().reply(200, envelope(0, serde_json::json!(1)));
        let (client, _) = create_client(transport);
        let store = MemoryStore::with_user(create_user(1, "alice"));

        assert_eq!(logout(&store, &client).await, Ok(()));
        assert_eq!(store.user(), None);
    }
}
