//! 找伙伴：选择标签后跳转到搜索结果页

use leptos::prelude::*;

use crate::components::toast::use_toast;
use crate::web::location::with_query;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

/// 可选标签（父分类, 子标签）
const TAG_GROUPS: &[(&str, &[&str])] = &[
    ("性别", &["男", "女"]),
    ("年级", &["大一", "大二", "大三", "大四", "研一", "研二", "研三"]),
    ("方向", &["Java", "C++", "Rust", "Go", "Python", "前端", "算法"]),
    ("状态", &["求职", "考研", "摆烂", "学习中"]),
];

/// 切换标签选中状态
fn toggle_tag(selected: &mut Vec<String>, tag: &str) {
    if let Some(pos) = selected.iter().position(|t| t == tag) {
        selected.remove(pos);
    } else {
        selected.push(tag.to_string());
    }
}

/// 搜索结果页地址，每个标签一个 `tags` 参数
fn result_path(tags: &[String]) -> String {
    let params = tags.iter().map(|t| ("tags", t.as_str())).collect::<Vec<_>>();
    with_query(AppRoute::UserList.to_path(), &params)
}

#[component]
pub fn SearchPage() -> impl IntoView {
    let toast = use_toast();
    let navigate = use_navigate();

    let (keyword, set_keyword) = signal(String::new());
    let (selected, set_selected) = signal(Vec::<String>::new());

    let visible_groups = move || {
        let keyword = keyword.get();
        let keyword = keyword.trim();
        TAG_GROUPS
            .iter()
            .map(|(group, tags)| {
                let tags = tags
                    .iter()
                    .filter(|t| keyword.is_empty() || t.contains(keyword))
                    .copied()
                    .collect::<Vec<_>>();
                (*group, tags)
            })
            .filter(|(_, tags)| !tags.is_empty())
            .collect::<Vec<_>>()
    };

    let on_search = move |_| {
        let tags = selected.get_untracked();
        if tags.is_empty() {
            toast.error("请至少选择一个标签");
            return;
        }
        navigate(&result_path(&tags));
    };

    view! {
        <div class="flex flex-col gap-4">
            <input
                type="search"
                class="input input-bordered w-full"
                placeholder="搜索标签"
                on:input=move |ev| set_keyword.set(event_target_value(&ev))
                prop:value=move || keyword.get()
            />

            <div class="flex flex-wrap gap-2 min-h-8">
                <span class="text-sm text-base-content/60">"已选标签:"</span>
                <For
                    each=move || selected.get()
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let label = tag.clone();
                        view! {
                            <button
                                class="badge badge-primary gap-1"
                                on:click=move |_| set_selected.update(|s| toggle_tag(s, &tag))
                            >
                                {label}
                                " ×"
                            </button>
                        }
                    }
                />
            </div>

            {move || {
                visible_groups()
                    .into_iter()
                    .map(|(group, tags)| {
                        view! {
                            <div class="card bg-base-100 shadow-sm">
                                <div class="card-body p-4 gap-2">
                                    <h3 class="font-semibold">{group}</h3>
                                    <div class="flex flex-wrap gap-2">
                                        {tags
                                            .into_iter()
                                            .map(|tag| {
                                                let is_selected = move || selected.with(|s| s.iter().any(|t| t == tag));
                                                view! {
                                                    <button
                                                        class=move || if is_selected() { "btn btn-xs btn-primary" } else { "btn btn-xs btn-outline" }
                                                        on:click=move |_| set_selected.update(|s| toggle_tag(s, tag))
                                                    >
                                                        {tag}
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}

            <button class="btn btn-primary w-full" on:click=on_search>"搜索"</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_tag() {
        let mut selected = Vec::new();
        toggle_tag(&mut selected, "Rust");
        toggle_tag(&mut selected, "男");
        assert_eq!(selected, vec!["Rust".to_string(), "男".to_string()]);

        toggle_tag(&mut selected, "Rust");
        assert_eq!(selected, vec!["男".to_string()]);
    }
}
