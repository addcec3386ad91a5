//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 路由本身不做登录守卫：未登录由 API 客户端的响应拦截统一处理。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 更新文档标题
fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    /// 创建新的路由服务，初始路由从 URL 解析
    fn new() -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 站内导航
    ///
    /// `target` 可以带查询串，如 `/team/update?id=3`；
    /// 查询串原样写入 History，页面自行读取。
    pub fn navigate(&self, target: &str) {
        let route = AppRoute::from_path(target);
        tracing::debug!(path = target, %route, "[Router] navigate");
        push_history_state(target);
        self.set_route.set(route);
    }

    /// 返回上一页
    pub fn back(&self) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.back();
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            let route = AppRoute::from_path(&current_path());
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 路由变化时同步文档标题
    fn setup_title_sync(&self) {
        let current_route = self.current_route;

        Effect::new(move |_| {
            let route = current_route.get();
            set_document_title(&route.document_title());
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router() -> RouterService {
    let router = RouterService::new();

    router.init_popstate_listener();
    router.setup_title_sync();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone + Copy {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router();

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时使用 History 导航而不是整页刷新
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let to_clone = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to_clone);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
