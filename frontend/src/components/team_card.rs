//! 队伍卡片列表
//!
//! 卡片上的操作（加入、退出、修改、解散）直接调用接口，
//! 完成后通过 `on_refresh` 通知页面重新加载列表。

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::date;
use teams_matcher_shared::{Team, TeamDeleteRequest, TeamJoinRequest, TeamQuitRequest};

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::session::use_session;
use crate::web::location::with_query;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 队伍封面图，按队伍 id 取模选取
const TEAM_IMAGES: [&str; 21] = [
    "https://pic2.zhimg.com/v2-88e534dacda86fd9f46e9af91cd6b9cd_r.jpg",
    "https://pic1.zhimg.com/v2-eaa8ad47d2133c60ffcb150449e75050_r.jpg",
    "https://pic1.zhimg.com/v2-4e7f93275a2f7100bebdd93ae1e4188c_r.jpg",
    "https://pic2.zhimg.com/v2-ec924aa1d54c3d9c70020f3538b4c909_b.jpg",
    "https://tse3-mm.cn.bing.net/th/id/OIP-C.LAEWb5dT7KIBtQN0cdpxdAHaHa?rs=1&pid=ImgDetMain",
    "https://pic4.zhimg.com/v2-0dbc479a4fa0f130a1622e36b9f43057_r.jpg",
    "https://pic2.zhimg.com/v2-8a4187aa69c586954db7fb1ee79dc345_b.jpg",
    "https://pic3.zhimg.com/80/v2-d0306e70488f6f225c87442d98797682_720w.jpg",
    "https://pic3.zhimg.com/80/v2-3f8e3fa55ea6422761f182db3af5ec52_720w.jpg",
    "https://pic4.zhimg.com/80/v2-0b5910edd9b149ef33c3b9447b9e15ef_720w.jpg",
    "https://gd-hbimg.huaban.com/7524336a7f99826dec804add7f843bf9cf431f2b53fa-zBEvHR_fw1200webp",
    "https://gd-hbimg.huaban.com/a7edddf23f12ec3607cb5f00ecf79124f2448fafdd20-EI67TW_fw1200webp",
    "https://pic3.zhimg.com/80/v2-6c66eeac778597275ac50b10ff20f0da_720w.jpg",
    "https://pic3.zhimg.com/v2-c60835e0217d17b10016fe3ca0a85a22_r.jpg",
    "https://pic2.zhimg.com/v2-30675d7656fcb8e2cc959cedd8b8db19_r.jpg",
    "https://tse1-mm.cn.bing.net/th/id/OIP-C.JdE8XJWns-zwJEFRUxz92QHaHa?rs=1&pid=ImgDetMain",
    "https://tse1-mm.cn.bing.net/th/id/OIP-C.OQ8sP6pgSL8PBxE7r_uRyAHaHa?pid=ImgDet&w=474&h=474&rs=1",
    "https://tse1-mm.cn.bing.net/th/id/OIP-C.P7pOdR-W38ZXzRXaCdTtegHaHa?pid=ImgDet&w=474&h=474&rs=1",
    "https://tse1-mm.cn.bing.net/th/id/OIP-C.NAhVu3Ll_gxcXDZtSoGLcgHaGo?rs=1&pid=ImgDetMain",
    "https://tse1-mm.cn.bing.net/th/id/OIP-C.nWllK0z11-uG8tw4tJn7IgHaHa?rs=1&pid=ImgDetMain",
    "https://tse3-mm.cn.bing.net/th/id/OIP-C.i6FfMg6RBfcareAUUk4GNQHaGs?rs=1&pid=ImgDetMain",
];

pub fn team_image(id: i64) -> &'static str {
    TEAM_IMAGES[id.rem_euclid(TEAM_IMAGES.len() as i64) as usize]
}

/// 当前用户对某个队伍可执行的操作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamActions {
    pub join: bool,
    pub quit: bool,
    pub update: bool,
    pub delete: bool,
}

impl TeamActions {
    pub fn for_user(team: &Team, current_user_id: Option<i64>) -> Self {
        let is_creator = current_user_id.is_some() && team.creator_id() == current_user_id;
        Self {
            join: !is_creator && !team.has_join,
            quit: team.has_join,
            update: is_creator,
            delete: is_creator,
        }
    }
}

#[component]
fn TeamCard(
    team: Team,
    /// 点击加入加密队伍时回调，由列表弹出密码框
    on_join_secret: Callback<i64>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let toast = use_toast();
    let router = use_router();

    let team_id = team.id;
    let status = team.status;
    let actions = {
        let team = team.clone();
        Memo::new(move |_| {
            let user_id = session.get().map(|u| u.id());
            TeamActions::for_user(&team, user_id)
        })
    };

    let join = move |_| {
        if status.requires_password() {
            on_join_secret.run(team_id);
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            let result = api.call_checked(&TeamJoinRequest { team_id, password: None }).await;
            toast.report("加入", &result);
            on_refresh.run(());
        });
    };

    let quit = move |_| {
        let api = api.get_value();
        spawn_local(async move {
            let result = api.call_checked(&TeamQuitRequest { team_id }).await;
            toast.report("退出", &result);
            on_refresh.run(());
        });
    };

    let delete = move |_| {
        let api = api.get_value();
        spawn_local(async move {
            let result = api.call_checked(&TeamDeleteRequest { id: team_id }).await;
            toast.report("解散", &result);
            on_refresh.run(());
        });
    };

    let update = move |_| {
        let id = team_id.to_string();
        router.navigate(&with_query(AppRoute::TeamUpdate.to_path(), &[("id", &id)]));
    };

    view! {
        <div class="card card-side bg-base-100 shadow-sm">
            <figure class="w-24 shrink-0 p-3">
                <img class="rounded-xl w-20 h-20 object-cover" src=team_image(team_id) alt=team.name.clone() />
            </figure>
            <div class="card-body p-3 gap-1">
                <div class="flex items-center gap-2">
                    <h3 class="card-title text-base">{team.name.clone()}</h3>
                    <span class="badge badge-primary badge-sm">{status.label()}</span>
                </div>
                <p class="text-sm text-base-content/70 line-clamp-2">{team.description.clone()}</p>
                <div class="text-xs text-base-content/60">
                    <div>"队伍人数: " {team.member_summary()}</div>
                    <div>"过期时间: " {date::format_expire(team.expire_time.as_ref())}</div>
                    <div>"创建时间: " {date::format_display(&team.create_time)}</div>
                </div>
                <div class="card-actions justify-end mt-1">
                    <Show when=move || actions.get().join>
                        <button class="btn btn-primary btn-xs" on:click=join>"加入队伍"</button>
                    </Show>
                    <Show when=move || actions.get().update>
                        <button class="btn btn-outline btn-xs" on:click=update>"更新队伍"</button>
                    </Show>
                    <Show when=move || actions.get().quit>
                        <button class="btn btn-outline btn-xs" on:click=quit>"退出队伍"</button>
                    </Show>
                    <Show when=move || actions.get().delete>
                        <button class="btn btn-error btn-xs" on:click=delete>"解散队伍"</button>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// 队伍卡片列表
#[component]
pub fn TeamCardList(
    #[prop(into)] teams: Signal<Vec<Team>>,
    #[prop(into)] loading: Signal<bool>,
    /// 操作完成后刷新列表
    on_refresh: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let toast = use_toast();

    // 正在输入密码的加密队伍
    let join_target = RwSignal::new(None::<i64>);
    let password = RwSignal::new(String::new());

    let on_join_secret = Callback::new(move |id: i64| {
        password.set(String::new());
        join_target.set(Some(id));
    });

    let confirm_join = move |_| {
        let Some(team_id) = join_target.get_untracked() else {
            return;
        };
        let req = TeamJoinRequest {
            team_id,
            password: Some(password.get_untracked()),
        };
        join_target.set(None);
        let api = api.get_value();
        spawn_local(async move {
            let result = api.call_checked(&req).await;
            toast.report("加入", &result);
            on_refresh.run(());
        });
    };

    view! {
        <Show
            when=move || !loading.get()
            fallback=|| view! {
                <div class="flex justify-center py-10">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
        >
            <Show
                when=move || teams.with(|t| !t.is_empty())
                fallback=|| view! { <div class="text-center text-base-content/50 py-10">"暂无队伍"</div> }
            >
                <div class="flex flex-col gap-3">
                    <For
                        each=move || teams.get()
                        key=|team| (team.id, team.has_join, team.has_join_num)
                        children=move |team| view! {
                            <TeamCard team=team on_join_secret=on_join_secret on_refresh=on_refresh />
                        }
                    />
                </div>
            </Show>
        </Show>

        <div class="modal" class:modal-open=move || join_target.get().is_some()>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"请输入队伍密码"</h3>
                <input
                    type="password"
                    class="input input-bordered w-full mt-4"
                    on:input=move |ev| password.set(event_target_value(&ev))
                    prop:value=move || password.get()
                />
                <div class="modal-action">
                    <button class="btn btn-ghost" on:click=move |_| join_target.set(None)>"取消"</button>
                    <button class="btn btn-primary" on:click=confirm_join>"加入"</button>
                </div>
            </div>
        </div>
    }
}
