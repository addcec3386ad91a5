//! 登录页
//!
//! 登录成功后跳转到 `redirect` 查询参数指定的地址，没有则回到主页。
//! 只接受本站地址，其他来源一律回到主页。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::session::{login, use_session};
use crate::web::location::{current_origin, redirect_param};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_navigate};

/// 登录后的站内跳转路径
///
/// 同源的完整地址取路径部分；以 `/` 开头的站内路径原样保留，
/// 协议相对地址 (`//host`) 与其他来源都回到主页。
fn login_target(redirect: Option<String>, origin: &str) -> String {
    let home = AppRoute::Index.to_path().to_string();
    let Some(redirect) = redirect.filter(|r| !r.is_empty()) else {
        return home;
    };
    let path = match redirect.strip_prefix(origin) {
        Some(rest) if !origin.is_empty() => rest,
        _ => redirect.as_str(),
    };
    let is_site_path = path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\");
    if is_site_path { path.to_string() } else { home }
}

#[component]
pub fn UserLoginPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let navigate = use_navigate();

    let last_account = session.state.with_untracked(|s| s.last_account.clone());
    let (account, set_account) = signal(last_account);
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if account.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("请输入账号和密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let client = api.get_value();
        spawn_local(async move {
            match login(&session, &client, account.get_untracked(), password.get_untracked()).await {
                Ok(_) => {
                    toast.success("登录成功");
                    navigate(&login_target(redirect_param(), &current_origin()));
                }
                Err(e) => set_error_msg.set(Some(format!("登录失败: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card w-full shadow-xl bg-base-100 mt-4">
            <form class="card-body" on:submit=on_submit>
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="form-control">
                    <label class="label" for="account">
                        <span class="label-text">"账号"</span>
                    </label>
                    <input
                        id="account"
                        type="text"
                        placeholder="请输入账号"
                        on:input=move |ev| set_account.set(event_target_value(&ev))
                        prop:value=account
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="password">
                        <span class="label-text">"密码"</span>
                    </label>
                    <input
                        id="password"
                        type="password"
                        placeholder="请输入密码"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                        } else {
                            "登录".into_any()
                        }}
                    </button>
                </div>
                <div class="text-center text-sm">
                    "还没有账号？"
                    <Link to=AppRoute::UserRegister.to_path() class="link link-primary">"去注册"</Link>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:5173";

    fn target(redirect: &str) -> String {
        login_target(Some(redirect.to_string()), ORIGIN)
    }

    #[test]
    fn test_missing_redirect_goes_home() {
        assert_eq!(login_target(None, ORIGIN), "/");
        assert_eq!(target(""), "/");
    }

    #[test]
    fn test_same_origin_url_becomes_path() {
        assert_eq!(target("http://localhost:5173/team"), "/team");
        assert_eq!(
            target("http://localhost:5173/user/list?tags=a&tags=b"),
            "/user/list?tags=a&tags=b"
        );
        assert_eq!(target(ORIGIN), "/");
    }

    #[test]
    fn test_site_path_is_kept() {
        assert_eq!(target("/user/team/join"), "/user/team/join");
    }

    #[test]
    fn test_foreign_targets_go_home() {
        assert_eq!(target("https://evil.example.com/team"), "/");
        assert_eq!(target("http://localhost:5173.evil.com/team"), "/");
        assert_eq!(target("//evil.example.com/team"), "/");
        assert_eq!(target("/\\evil.example.com"), "/");
        assert_eq!(target("javascript:alert(1)"), "/");
    }

    #[test]
    fn test_unknown_origin_only_accepts_paths() {
        assert_eq!(login_target(Some("/team".to_string()), ""), "/team");
        assert_eq!(login_target(Some("http://localhost:5173/team".to_string()), ""), "/");
    }
}
