//! 找队伍：按关键词搜索，公开/加密两个标签页

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::{Team, TeamQuery, TeamStatus};

use crate::client::use_api;
use crate::components::team_card::TeamCardList;
use crate::components::toast::use_toast;
use crate::session::{fetch_current_user, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 可切换的队伍状态标签
const TABS: [TeamStatus; 2] = [TeamStatus::Public, TeamStatus::Secret];

#[component]
pub fn TeamPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let navigate = use_navigate();

    let (teams, set_teams) = signal(Vec::<Team>::new());
    let (loading, set_loading) = signal(true);
    let (search_text, set_search_text) = signal(String::new());
    let (status, set_status) = signal(TeamStatus::Public);

    let load_teams = move || {
        let query = TeamQuery::search(&search_text.get_untracked(), status.get_untracked());
        set_loading.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match api.call_checked(&query).await {
                Ok(list) => set_teams.set(list),
                Err(e) => toast.error(format!("加载队伍失败: {}", e)),
            }
            set_loading.set(false);
        });
    };

    // 卡片操作需要知道当前用户
    let client = api.get_value();
    spawn_local(async move {
        if let Err(e) = fetch_current_user(&session, &client).await {
            tracing::warn!(error = %e, "failed to load current user");
        }
    });

    // 切换标签时重新加载
    Effect::new(move |_| {
        status.track();
        load_teams();
    });

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        load_teams();
    };

    view! {
        <div class="flex flex-col gap-4">
            <form class="join w-full" on:submit=on_search>
                <input
                    type="search"
                    class="input input-bordered join-item w-full"
                    placeholder="搜索队伍"
                    on:input=move |ev| set_search_text.set(event_target_value(&ev))
                    prop:value=move || search_text.get()
                />
                <button type="submit" class="btn btn-primary join-item">"搜索"</button>
            </form>

            <div role="tablist" class="tabs tabs-boxed">
                {TABS
                    .iter()
                    .map(|tab| {
                        let tab = *tab;
                        view! {
                            <a
                                role="tab"
                                class=move || if status.get() == tab { "tab tab-active" } else { "tab" }
                                on:click=move |_| set_status.set(tab)
                            >
                                {format!("{}队伍", tab.label())}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>

            <button
                class="btn btn-primary btn-sm self-end"
                on:click=move |_| navigate(AppRoute::TeamAdd.to_path())
            >
                "创建队伍"
            </button>

            <TeamCardList teams=teams loading=loading on_refresh=Callback::new(move |_| load_teams()) />
        </div>
    }
}
