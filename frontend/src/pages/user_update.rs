//! 资料列表：每一项跳转到编辑页

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::{User, date};

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::session::{fetch_current_user, use_session};
use crate::web::location::with_query;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 可编辑字段：(字段名, 显示名)
const EDITABLE_FIELDS: &[(&str, &str)] = &[
    ("username", "昵称"),
    ("avatarUrl", "头像"),
    ("profile", "个人简介"),
    ("gender", "性别"),
    ("phone", "电话"),
    ("email", "邮箱"),
];

/// 字段的当前值（编辑页输入框的初始值）
fn field_value(user: &User, key: &str) -> String {
    match key {
        "username" => user.username.clone(),
        "avatarUrl" => user.avatar_url.clone().unwrap_or_default(),
        "profile" => user.profile.clone().unwrap_or_default(),
        "gender" => user.gender.map(|g| g.code().to_string()).unwrap_or_default(),
        "phone" => user.phone.clone(),
        "email" => user.email.clone(),
        _ => String::new(),
    }
}

/// 字段在列表里的展示文本
fn field_display(user: &User, key: &str) -> String {
    match key {
        "gender" => user.gender.map(|g| g.label()).unwrap_or("未填写").to_string(),
        _ => field_value(user, key),
    }
}

#[component]
pub fn UserUpdatePage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let navigate = use_navigate();

    let client = api.get_value();
    spawn_local(async move {
        if let Err(e) = fetch_current_user(&session, &client).await {
            toast.error(format!("获取用户信息失败: {}", e));
        }
    });

    view! {
        {move || {
            session
                .get()
                .map(|user| {
                    let rows = EDITABLE_FIELDS
                        .iter()
                        .map(|&(key, name)| {
                            let current = field_value(&user, key);
                            let display = field_display(&user, key);
                            let target = with_query(
                                AppRoute::UserEdit.to_path(),
                                &[("editKey", key), ("editName", name), ("currentValue", &current)],
                            );
                            view! {
                                <li>
                                    <a on:click=move |_| navigate(&target)>
                                        <span class="w-20 text-base-content/60">{name}</span>
                                        <span class="truncate">{display}</span>
                                    </a>
                                </li>
                            }
                        })
                        .collect_view();
                    view! {
                        <ul class="menu bg-base-100 rounded-box shadow w-full">
                            {rows}
                            <li class="disabled">
                                <span>
                                    <span class="w-20">"账号"</span>
                                    <span>{user.user_account.clone()}</span>
                                </span>
                            </li>
                            <li class="disabled">
                                <span>
                                    <span class="w-20">"注册时间"</span>
                                    <span>{date::format_display(&user.create_time)}</span>
                                </span>
                            </li>
                        </ul>
                    }
                })
        }}
    }
}
