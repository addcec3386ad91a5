//! 个人页

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::date;

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::session::{fetch_current_user, logout, use_session};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_navigate};

#[component]
pub fn UserPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let navigate = use_navigate();

    let (loading, set_loading) = signal(true);

    let client = api.get_value();
    spawn_local(async move {
        if let Err(e) = fetch_current_user(&session, &client).await {
            toast.error(format!("获取用户信息失败: {}", e));
        }
        set_loading.set(false);
    });

    let on_logout = move |_| {
        let client = api.get_value();
        spawn_local(async move {
            if let Err(e) = logout(&session, &client).await {
                tracing::warn!(error = %e, "logout request failed");
            }
            toast.success("已退出登录");
            navigate(AppRoute::UserLogin.to_path());
        });
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex justify-center py-10">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
        >
            {move || match session.get() {
                None => view! {
                    <div class="text-center py-10 flex flex-col gap-4 items-center">
                        <p class="text-base-content/60">"尚未登录"</p>
                        <Link to=AppRoute::UserLogin.to_path() class="btn btn-primary">"去登录"</Link>
                    </div>
                }
                .into_any(),
                Some(user) => view! {
                    <div class="flex flex-col gap-4">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <div class="avatar">
                                    <div class="w-20 rounded-full">
                                        <img src=user.avatar_url.clone().unwrap_or_default() alt=user.username.clone() />
                                    </div>
                                </div>
                                <h2 class="card-title">{user.username.clone()}</h2>
                                <p class="text-sm text-base-content/60">{user.user_account.clone()}</p>
                                <div class="flex flex-wrap gap-1 justify-center">
                                    {user
                                        .tags
                                        .iter()
                                        .map(|tag| view! { <span class="badge badge-outline">{tag.clone()}</span> })
                                        .collect_view()}
                                </div>
                                <p class="text-xs text-base-content/50">
                                    "注册时间: " {date::format_display(&user.create_time)}
                                </p>
                            </div>
                        </div>

                        <ul class="menu bg-base-100 rounded-box shadow">
                            <li><Link to=AppRoute::UserUpdate.to_path()>"修改信息"</Link></li>
                            <li><Link to=AppRoute::UserTeamCreate.to_path()>"我创建的队伍"</Link></li>
                            <li><Link to=AppRoute::UserTeamJoin.to_path()>"我加入的队伍"</Link></li>
                        </ul>

                        <button class="btn btn-outline btn-error" on:click=on_logout>"退出登录"</button>
                    </div>
                }
                .into_any(),
            }}
        </Show>
    }
}
