//! 浏览器地址封装
//!
//! `Navigator` 把 "读取当前地址" 与 "整页跳转" 抽象出来，
//! 使 HTTP 客户端的未登录跳转可以在测试中被替换。

/// 页面导航抽象
pub trait Navigator {
    /// 当前完整地址 (`location.href`)
    fn current_href(&self) -> String;

    /// 整页跳转到指定地址 (`location.href = url`)
    fn assign(&self, url: &str);
}

/// 基于 `window.location` 的实现
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_href(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn assign(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::warn!(url, error = ?e, "location assign failed");
            }
        }
    }
}

/// 读取当前地址的查询参数（取第一个值）
pub fn query_param(key: &str) -> Option<String> {
    search_params()?.get(key)
}

/// 读取当前地址中同名查询参数的全部值
pub fn query_params(key: &str) -> Vec<String> {
    search_params()
        .map(|params| {
            params
                .get_all(key)
                .iter()
                .filter_map(|v| v.as_string())
                .collect()
        })
        .unwrap_or_default()
}

/// 当前页面的源 (`location.origin`)，如 `http://localhost:5173`
pub fn current_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// 读取当前地址中的 `redirect` 参数
pub fn redirect_param() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    redirect_from_search(&search)
}

/// 从查询串中取出 `redirect` 的值
///
/// 登录跳转地址里的 `redirect` 未经编码且总在最后，
/// 其后的 `&` 属于被跳转地址本身，因此取到查询串末尾。
pub fn redirect_from_search(search: &str) -> Option<String> {
    const KEY: &str = "redirect=";
    let query = search.strip_prefix('?').unwrap_or(search);
    let start = if query.starts_with(KEY) {
        0
    } else {
        query.find("&redirect=")? + 1
    };
    let value = &query[start + KEY.len()..];
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn search_params() -> Option<web_sys::UrlSearchParams> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()
}

/// 拼接带查询参数的站内路径，参数值做 URI 编码
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                k,
                String::from(js_sys::encode_uri_component(v))
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::login_redirect_url;

    #[test]
    fn test_redirect_keeps_ampersands_of_target() {
        let href = "http://localhost:5173/user/list?tags=a&tags=b";
        let login_url = login_redirect_url(href);
        let search = &login_url[login_url.find('?').unwrap()..];

        assert_eq!(redirect_from_search(search), Some(href.to_string()));
    }

    #[test]
    fn test_redirect_after_other_params() {
        assert_eq!(
            redirect_from_search("?from=nav&redirect=/team"),
            Some("/team".to_string())
        );
        assert_eq!(redirect_from_search("redirect=/user"), Some("/user".to_string()));
    }

    #[test]
    fn test_redirect_missing_or_empty() {
        assert_eq!(redirect_from_search(""), None);
        assert_eq!(redirect_from_search("?redirect="), None);
        assert_eq!(redirect_from_search("?noredirect=/team"), None);
    }
}
