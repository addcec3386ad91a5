//! 伙伴匹配前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由表（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `client`: 带请求/响应拦截的 HTTP 客户端
//! - `session`: 当前登录用户
//! - `components` / `pages`: UI 层

mod client;
mod config;
mod session;

mod components {
    pub mod layout;
    pub mod team_card;
    pub mod team_form;
    pub mod toast;
    pub mod user_card;
}

mod pages {
    pub mod index;
    pub mod search;
    pub mod search_result;
    pub mod team;
    pub mod team_add;
    pub mod team_update;
    pub mod user;
    pub mod user_edit;
    pub mod user_login;
    pub mod user_register;
    pub mod user_team;
    pub mod user_update;
}

use leptos::prelude::*;

// 浏览器 API 封装模块
pub(crate) mod web {
    pub mod console;
    pub mod http;
    pub mod location;
    pub mod route;
    pub mod router;
}

pub use web::console::init_logging;

use crate::client::provide_api_client;
use crate::components::layout::BasicLayout;
use crate::components::toast::{Toaster, provide_toast};
use crate::pages::index::IndexPage;
use crate::pages::search::SearchPage;
use crate::pages::search_result::SearchResultPage;
use crate::pages::team::TeamPage;
use crate::pages::team_add::TeamAddPage;
use crate::pages::team_update::TeamUpdatePage;
use crate::pages::user::UserPage;
use crate::pages::user_edit::UserEditPage;
use crate::pages::user_login::UserLoginPage;
use crate::pages::user_register::UserRegisterPage;
use crate::pages::user_team::{UserTeamCreatePage, UserTeamJoinPage};
use crate::pages::user_update::UserUpdatePage;
use crate::session::{SessionContext, init_session};
use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的页面组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Index => view! { <IndexPage /> }.into_any(),
        AppRoute::Team => view! { <TeamPage /> }.into_any(),
        AppRoute::User => view! { <UserPage /> }.into_any(),
        AppRoute::Search => view! { <SearchPage /> }.into_any(),
        AppRoute::UserEdit => view! { <UserEditPage /> }.into_any(),
        AppRoute::UserList => view! { <SearchResultPage /> }.into_any(),
        AppRoute::UserLogin => view! { <UserLoginPage /> }.into_any(),
        AppRoute::UserRegister => view! { <UserRegisterPage /> }.into_any(),
        AppRoute::UserUpdate => view! { <UserUpdatePage /> }.into_any(),
        AppRoute::UserTeamJoin => view! { <UserTeamJoinPage /> }.into_any(),
        AppRoute::UserTeamCreate => view! { <UserTeamCreatePage /> }.into_any(),
        AppRoute::TeamAdd => view! { <TeamAddPage /> }.into_any(),
        AppRoute::TeamUpdate => view! { <TeamUpdatePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center py-20">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                    <Link to=AppRoute::Index.to_path() class="btn btn-primary mt-6">"回到主页"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session = SessionContext::new();
    provide_context(session);

    // 2. 初始化会话（从 LocalStorage 加载上次登录的账号）
    init_session(&session);

    // 3. 全局 HTTP 客户端与提示消息
    provide_api_client();
    provide_toast();

    view! {
        <Router>
            <Toaster />
            <BasicLayout>
                <RouterOutlet matcher=route_matcher />
            </BasicLayout>
        </Router>
    }
}
