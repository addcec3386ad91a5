//! 编辑单个资料字段
//!
//! 查询参数：`editKey` 字段名，`editName` 显示名，`currentValue` 当前值。

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::UserUpdateRequest;

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::session::{fetch_current_user, refresh_current_user, use_session};
use crate::web::location::query_param;
use crate::web::router::use_router;

#[component]
pub fn UserEditPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let router = use_router();

    let edit_key = query_param("editKey").unwrap_or_default();
    let edit_name = query_param("editName").unwrap_or_else(|| edit_key.clone());
    let (value, set_value) = signal(query_param("currentValue").unwrap_or_default());
    let (submitting, set_submitting) = signal(false);
    let edit_key = StoredValue::new(edit_key);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let client = api.get_value();
        let key = edit_key.get_value();
        let new_value = value.get_untracked();
        set_submitting.set(true);

        spawn_local(async move {
            let user = match fetch_current_user(&session, &client).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    set_submitting.set(false);
                    return;
                }
                Err(e) => {
                    toast.error(format!("获取用户信息失败: {}", e));
                    set_submitting.set(false);
                    return;
                }
            };

            let req = match UserUpdateRequest::new(user.id()).with_field(&key, new_value) {
                Ok(req) => req,
                Err(e) => {
                    toast.error(e);
                    set_submitting.set(false);
                    return;
                }
            };

            let result = client.call_checked(&req).await;
            toast.report("修改", &result);
            if matches!(result, Ok(n) if n > 0) {
                if let Err(e) = refresh_current_user(&session, &client).await {
                    tracing::warn!(error = %e, "failed to refresh current user");
                }
                router.back();
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="card bg-base-100 shadow" on:submit=on_submit>
            <div class="card-body gap-4">
                <div class="form-control">
                    <label for="edit_value" class="label">
                        <span class="label-text">{edit_name}</span>
                    </label>
                    <input id="edit_value"
                        type="text"
                        on:input=move |ev| set_value.set(event_target_value(&ev))
                        prop:value=move || value.get()
                        class="input input-bordered w-full"
                    />
                </div>
                <button type="submit" class="btn btn-primary w-full" disabled=move || submitting.get()>
                    "提交"
                </button>
            </div>
        </form>
    }
}
