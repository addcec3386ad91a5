//! 注册页

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::UserRegisterRequest;

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_navigate};

/// 账号最短长度
const MIN_ACCOUNT_LEN: usize = 4;
/// 密码最短长度
const MIN_PASSWORD_LEN: usize = 8;

/// 提交前的本地校验
fn validate(req: &UserRegisterRequest) -> Result<(), &'static str> {
    if req.user_account.chars().count() < MIN_ACCOUNT_LEN {
        return Err("账号至少 4 位");
    }
    if req.user_password.chars().count() < MIN_PASSWORD_LEN {
        return Err("密码至少 8 位");
    }
    if req.user_password != req.check_password {
        return Err("两次输入的密码不一致");
    }
    Ok(())
}

#[component]
pub fn UserRegisterPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let navigate = use_navigate();

    let (account, set_account) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (check_password, set_check_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let req = UserRegisterRequest {
            user_account: account.get_untracked(),
            user_password: password.get_untracked(),
            check_password: check_password.get_untracked(),
        };
        if let Err(msg) = validate(&req) {
            toast.error(msg);
            return;
        }

        set_is_submitting.set(true);
        let client = api.get_value();
        spawn_local(async move {
            let result = client.call_checked(&req).await;
            toast.report("注册", &result);
            if matches!(result, Ok(_)) {
                navigate(AppRoute::UserLogin.to_path());
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card w-full shadow-xl bg-base-100 mt-4">
            <form class="card-body" on:submit=on_submit>
                <div class="form-control">
                    <label class="label" for="reg_account">
                        <span class="label-text">"账号"</span>
                    </label>
                    <input id="reg_account" type="text" required
                        placeholder="请输入账号"
                        on:input=move |ev| set_account.set(event_target_value(&ev))
                        prop:value=account
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="reg_password">
                        <span class="label-text">"密码"</span>
                    </label>
                    <input id="reg_password" type="password" required
                        placeholder="请输入密码"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="reg_check_password">
                        <span class="label-text">"确认密码"</span>
                    </label>
                    <input id="reg_check_password" type="password" required
                        placeholder="请再次输入密码"
                        on:input=move |ev| set_check_password.set(event_target_value(&ev))
                        prop:value=check_password
                        class="input input-bordered"
                    />
                </div>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>"注册"</button>
                </div>
                <div class="text-center text-sm">
                    "已有账号？"
                    <Link to=AppRoute::UserLogin.to_path() class="link link-primary">"去登录"</Link>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(account: &str, password: &str, check: &str) -> UserRegisterRequest {
        UserRegisterRequest {
            user_account: account.to_string(),
            user_password: password.to_string(),
            check_password: check.to_string(),
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(&req("alice", "12345678", "12345678")), Ok(()));
        assert!(validate(&req("abc", "12345678", "12345678")).is_err());
        assert!(validate(&req("alice", "1234567", "1234567")).is_err());
        assert_eq!(
            validate(&req("alice", "12345678", "87654321")),
            Err("两次输入的密码不一致")
        );
    }
}
