//! 搜索结果：按 `tags` 查询参数搜索用户

use leptos::prelude::*;
use leptos::task::spawn_local;
use teams_matcher_shared::{SearchUsersByTagsRequest, User};

use crate::client::use_api;
use crate::components::toast::use_toast;
use crate::components::user_card::UserCardList;
use crate::web::location::query_params;

#[component]
pub fn SearchResultPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();

    let (users, set_users) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);

    let tags = query_params("tags");
    let tag_text = tags.join(", ");

    let client = api.get_value();
    spawn_local(async move {
        let req = SearchUsersByTagsRequest { tag_name_list: tags };
        match client.call_checked(&req).await {
            Ok(list) => set_users.set(list),
            Err(e) => toast.error(format!("搜索失败: {}", e)),
        }
        set_loading.set(false);
    });

    view! {
        <div class="flex flex-col gap-4">
            <p class="text-sm text-base-content/60">"标签: " {tag_text}</p>
            <UserCardList users=users loading=loading />
        </div>
    }
}
