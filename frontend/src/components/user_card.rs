//! 用户卡片列表

use leptos::prelude::*;
use teams_matcher_shared::User;

/// 没有头像时显示的占位图
const DEFAULT_AVATAR: &str = "https://fastly.jsdelivr.net/npm/@vant/assets/cat.jpeg";

#[component]
fn UserCard(user: User) -> impl IntoView {
    let avatar = user
        .avatar_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    let profile = user.profile.clone().unwrap_or_default();

    view! {
        <div class="card card-side bg-base-100 shadow-sm">
            <figure class="w-20 shrink-0 p-3">
                <img class="rounded-xl w-16 h-16 object-cover" src=avatar alt=user.username.clone() />
            </figure>
            <div class="card-body p-3 gap-1">
                <h3 class="card-title text-base">{user.username.clone()}</h3>
                <p class="text-sm text-base-content/70 line-clamp-2">{profile}</p>
                <div class="flex flex-wrap gap-1">
                    {user
                        .tags
                        .iter()
                        .map(|tag| view! { <span class="badge badge-outline badge-sm">{tag.clone()}</span> })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

/// 用户卡片列表，`loading` 为真时显示加载动画，列表为空时显示空状态
#[component]
pub fn UserCardList(
    #[prop(into)] users: Signal<Vec<User>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex justify-center py-10">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
        >
            <Show
                when=move || users.with(|u| !u.is_empty())
                fallback=|| view! { <div class="text-center text-base-content/50 py-10">"暂无用户"</div> }
            >
                <div class="flex flex-col gap-3">
                    <For
                        each=move || users.get()
                        key=|user| user.id()
                        children=move |user| view! { <UserCard user=user /> }
                    />
                </div>
            </Show>
        </Show>
    }
}
