//! 队伍表单组件
//!
//! 创建队伍与修改队伍共用，`show_max_num` 控制是否显示人数输入。

use leptos::prelude::*;
use teams_matcher_shared::TeamStatus;

pub mod form_state;

pub use form_state::TeamFormState;

#[component]
pub fn TeamForm(
    state: TeamFormState,
    /// 提交按钮文字
    #[prop(into)]
    submit_label: String,
    #[prop(optional)] show_max_num: bool,
    /// 提交中（禁用按钮）
    #[prop(into)]
    loading: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    view! {
        <form class="card bg-base-100 shadow" on:submit=submit>
            <div class="card-body gap-2">
                <div class="form-control">
                    <label for="team_name" class="label">
                        <span class="label-text">"队伍名称"</span>
                    </label>
                    <input id="team_name" required
                        type="text"
                        placeholder="请输入队伍名称"
                        on:input=move |ev| state.name.set(event_target_value(&ev))
                        prop:value=move || state.name.get()
                        class="input input-bordered w-full"
                    />
                </div>

                <div class="form-control">
                    <label for="team_description" class="label">
                        <span class="label-text">"队伍描述"</span>
                    </label>
                    <textarea id="team_description"
                        rows="3"
                        placeholder="请输入队伍描述"
                        on:input=move |ev| state.description.set(event_target_value(&ev))
                        prop:value=move || state.description.get()
                        class="textarea textarea-bordered w-full"
                    ></textarea>
                </div>

                <div class="form-control">
                    <label for="team_expire" class="label">
                        <span class="label-text">"过期时间"</span>
                    </label>
                    <input id="team_expire"
                        type="datetime-local"
                        on:input=move |ev| state.expire_time.set(event_target_value(&ev))
                        prop:value=move || state.expire_time.get()
                        class="input input-bordered w-full"
                    />
                    <label class="label">
                        <span class="label-text-alt text-base-content/50">"留空表示永久有效"</span>
                    </label>
                </div>

                <Show when=move || show_max_num>
                    <div class="form-control">
                        <label for="team_max_num" class="label">
                            <span class="label-text">"最大人数"</span>
                        </label>
                        <input id="team_max_num"
                            type="number"
                            min="1"
                            max="20"
                            on:input=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse::<i32>() {
                                    state.max_num.set(n);
                                }
                            }
                            prop:value=move || state.max_num.get().to_string()
                            class="input input-bordered w-full"
                        />
                    </div>
                </Show>

                <div class="form-control">
                    <label class="label">
                        <span class="label-text">"队伍状态"</span>
                    </label>
                    <div class="join">
                        {TeamStatus::ALL
                            .iter()
                            .map(|status| {
                                let status = *status;
                                view! {
                                    <input
                                        class="join-item btn btn-sm"
                                        type="radio"
                                        name="team_status"
                                        aria-label=status.label()
                                        prop:checked=move || state.status.get() == status
                                        on:change=move |_| state.status.set(status)
                                    />
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <Show when=move || state.status.get().requires_password()>
                    <div class="form-control">
                        <label for="team_password" class="label">
                            <span class="label-text">"队伍密码"</span>
                        </label>
                        <input id="team_password"
                            type="password"
                            placeholder="请输入队伍密码"
                            on:input=move |ev| state.password.set(event_target_value(&ev))
                            prop:value=move || state.password.get()
                            class="input input-bordered w-full"
                        />
                    </div>
                </Show>

                <div class="card-actions justify-end mt-2">
                    <button type="submit" class="btn btn-primary w-full" disabled=move || loading.get()>
                        <Show when=move || loading.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        {submit_label}
                    </button>
                </div>
            </div>
        </form>
    }
}
