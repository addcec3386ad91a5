//! 我加入的队伍 / 我创建的队伍

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::{ApiRequest, MyCreatedTeamsQuery, MyJoinedTeamsQuery, Team, TeamQuery};

use crate::client::use_api;
use crate::components::team_card::TeamCardList;
use crate::components::toast::use_toast;
use crate::session::{fetch_current_user, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 两个页面共用的列表视图，`make_query` 决定调用哪个接口
fn team_list_view<Q>(make_query: fn() -> Q) -> impl IntoView
where
    Q: ApiRequest<Response = Vec<Team>> + 'static,
{
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let navigate = use_navigate();

    let (teams, set_teams) = signal(Vec::<Team>::new());
    let (loading, set_loading) = signal(true);

    let load_teams = move || {
        set_loading.set(true);
        let client = api.get_value();
        spawn_local(async move {
            match client.call_checked(&make_query()).await {
                Ok(list) => set_teams.set(list),
                Err(e) => toast.error(format!("加载队伍失败: {}", e)),
            }
            set_loading.set(false);
        });
    };

    let client = api.get_value();
    spawn_local(async move {
        if let Err(e) = fetch_current_user(&session, &client).await {
            tracing::warn!(error = %e, "failed to load current user");
        }
        load_teams();
    });

    view! {
        <div class="flex flex-col gap-4">
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

#[component]
pub fn UserTeamJoinPage() -> impl IntoView {
    team_list_view(|| MyJoinedTeamsQuery(TeamQuery::default()))
}

#[component]
pub fn UserTeamCreatePage() -> impl IntoView {
    team_list_view(|| MyCreatedTeamsQuery(TeamQuery::default()))
}
