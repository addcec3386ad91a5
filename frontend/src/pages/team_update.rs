//! 修改队伍：`id` 查询参数指定队伍

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::TeamGetRequest;

use crate::client::use_api;
use crate::components::team_form::{TeamForm, TeamFormState};
use crate::components::toast::use_toast;
use crate::web::location::query_param;
use crate::web::router::use_router;

#[component]
pub fn TeamUpdatePage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let router = use_router();

    let state = TeamFormState::new();
    let (loading, set_loading) = signal(true);
    let team_id = query_param("id").and_then(|id| id.parse::<i64>().ok());

    match team_id {
        Some(id) => {
            let client = api.get_value();
            spawn_local(async move {
                match client.call_checked(&TeamGetRequest { id }).await {
                    Ok(team) => state.fill_from(&team),
                    Err(e) => toast.error(format!("加载队伍失败: {}", e)),
                }
                set_loading.set(false);
            });
        }
        None => {
            toast.error("缺少队伍 id");
            set_loading.set(false);
        }
    }

    let on_submit = Callback::new(move |_| {
        let Some(id) = team_id else {
            return;
        };
        let req = match state.draft().to_update_request(id, chrono::Utc::now(), &chrono::Local) {
            Ok(req) => req,
            Err(msg) => {
                toast.error(msg);
                return;
            }
        };

        set_loading.set(true);
        let client = api.get_value();
        spawn_local(async move {
            let result = client.call_checked(&req).await;
            toast.report("更新", &result);
            if matches!(result, Ok(true)) {
                router.back();
            }
            set_loading.set(false);
        });
    });

    view! {
        <TeamForm state=state submit_label="更新队伍" loading=loading on_submit=on_submit />
    }
}
