//! 主页：推荐用户，可切换到心动模式（按标签相似度匹配）

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::{MatchUsersRequest, RecommendUsersRequest, User};

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::components::user_card::UserCardList;
use crate::config::{MATCH_NUM, RECOMMEND_PAGE_SIZE};

#[component]
pub fn IndexPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();

    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (match_mode, set_match_mode) = signal(false);

    let load_users = move |match_mode: bool| {
        set_loading.set(true);
        let api = api.get_value();
        spawn_local(async move {
            let result = if match_mode {
                api.call_checked(&MatchUsersRequest { num: MATCH_NUM }).await
            } else {
                let req = RecommendUsersRequest {
                    page_size: RECOMMEND_PAGE_SIZE,
                    page_num: 1,
                };
                api.call_checked(&req).await.map(|page| page.records)
            };
            match result {
                Ok(list) => set_users.set(list),
                Err(e) => toast.error(format!("加载用户失败: {}", e)),
            }
            set_loading.set(false);
        });
    };

    // 切换模式时重新加载
    Effect::new(move |_| load_users(match_mode.get()));

    view! {
        <div class="flex flex-col gap-4">
            <div class="form-control">
                <label class="label cursor-pointer justify-start gap-3">
                    <input
                        type="checkbox"
                        class="toggle toggle-primary"
                        prop:checked=move || match_mode.get()
                        on:change=move |ev| set_match_mode.set(event_target_checked(&ev))
                    />
                    <span class="label-text">"心动模式"</span>
                </label>
            </div>
            <UserCardList users=users loading=loading />
        </div>
    }
}
