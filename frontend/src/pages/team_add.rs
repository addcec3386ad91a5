//! 创建队伍

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::client::use_api;
use crate::components::team_form::{TeamForm, TeamFormState};
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn TeamAddPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let navigate = use_navigate();

    let state = TeamFormState::new();
    let (loading, set_loading) = signal(false);

    let on_submit = Callback::new(move |_| {
        let req = match state.draft().to_add_request(chrono::Utc::now(), &chrono::Local) {
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
            toast.report("创建", &result);
            set_loading.set(false);
            if matches!(result, Ok(id) if id > 0) {
                state.reset();
                navigate(AppRoute::Team.to_path());
            }
        });
    });

    view! {
        <TeamForm
            state=state
            submit_label="创建队伍"
            show_max_num=true
            loading=loading
            on_submit=on_submit
        />
    }
}
