//! 基础布局：顶部导航栏 + 内容区 + 底部标签栏

use leptos::prelude::*;

use crate::session::use_session;
use crate::web::route::{AppRoute, SITE_TITLE};
use crate::web::router::{Link, use_router};

/// 底部标签栏条目
const TABS: &[(AppRoute, &str)] = &[
    (AppRoute::Index, "主页"),
    (AppRoute::Team, "队伍"),
    (AppRoute::User, "个人"),
];

#[component]
pub fn BasicLayout(children: Children) -> impl IntoView {
    let router = use_router();
    let current = router.current_route();
    let logged_in = use_session().is_logged_in_signal();

    let title = move || current.get().title().unwrap_or(SITE_TITLE);

    view! {
        <div class="min-h-screen bg-base-200 pb-20">
            <div class="navbar bg-base-100 shadow sticky top-0 z-40">
                <div class="navbar-start">
                    <Show
                        when=move || !current.get().is_tab()
                        fallback=|| view! { <span class="w-12"></span> }
                    >
                        <button class="btn btn-ghost btn-sm" on:click=move |_| router.back()>
                            "返回"
                        </button>
                    </Show>
                </div>
                <div class="navbar-center">
                    <span class="text-lg font-bold">{title}</span>
                </div>
                <div class="navbar-end">
                    <Link to=AppRoute::Search.to_path() class="btn btn-ghost btn-sm">
                        "搜索"
                    </Link>
                    <Show when=move || !logged_in.get() && current.get() != AppRoute::UserLogin>
                        <Link to=AppRoute::UserLogin.to_path() class="btn btn-ghost btn-sm">
                            "登录"
                        </Link>
                    </Show>
                </div>
            </div>

            <main class="max-w-xl mx-auto p-4">{children()}</main>

            <div class="btm-nav bg-base-100 shadow-inner">
                {TABS
                    .iter()
                    .map(|(route, label)| {
                        let route = *route;
                        view! {
                            <button
                                class=move || if current.get() == route { "active text-primary" } else { "" }
                                on:click=move |_| router.navigate(route.to_path())
                            >
                                <span class="btm-nav-label">{*label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
