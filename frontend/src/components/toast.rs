//! 全局提示消息
//!
//! 页面通过 `use_toast()` 发出成功/失败提示，`Toaster` 负责渲染，
//! 消息在 `TOAST_MILLIS` 后自动清除。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::config::TOAST_MILLIS;
use crate::client::CallError;

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    text: String,
    is_error: bool,
    // 区分连续的相同消息，旧定时器不会清掉新消息
    seq: u64,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    notice: RwSignal<Option<Notice>>,
    seq: StoredValue<u64>,
}

impl ToastContext {
    fn new() -> Self {
        Self {
            notice: RwSignal::new(None),
            seq: StoredValue::new(0),
        }
    }

    fn show(&self, text: String, is_error: bool) {
        let seq = self.seq.get_value() + 1;
        self.seq.set_value(seq);
        self.notice.set(Some(Notice { text, is_error, seq }));

        let notice = self.notice;
        Timeout::new(TOAST_MILLIS, move || {
            if notice.with_untracked(|n| n.as_ref().map(|n| n.seq)) == Some(seq) {
                notice.set(None);
            }
        })
        .forget();
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text.into(), false);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text.into(), true);
    }

    /// 按接口调用结果提示，失败时附带服务端给出的原因
    pub fn report<T>(&self, action: &str, result: &Result<T, CallError>) {
        let (text, is_error) = report_text(action, result);
        self.show(text, is_error);
    }
}

fn report_text<T>(action: &str, result: &Result<T, CallError>) -> (String, bool) {
    match result {
        Ok(_) => (format!("{}成功", action), false),
        Err(e) => (format!("{}失败: {}", action, e), true),
    }
}

pub fn provide_toast() -> ToastContext {
    let ctx = ToastContext::new();
    provide_context(ctx);
    ctx
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 提示消息渲染组件
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toast();
    let notice = ctx.notice;

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-center z-50">
                <div class=move || {
                    if notice.with(|n| n.as_ref().map(|n| n.is_error).unwrap_or(false)) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notice.with(|n| n.as_ref().map(|n| n.text.clone()).unwrap_or_default())}</span>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::HttpError;

    #[test]
    fn test_report_text_shows_server_reason() {
        let ok: Result<bool, CallError> = Ok(false);
        assert_eq!(report_text("加入", &ok), ("加入成功".to_string(), false));

        let business: Result<bool, CallError> = Err(CallError::Business {
            code: 40000,
            reason: "队伍已满".to_string(),
        });
        assert_eq!(
            report_text("加入", &business),
            ("加入失败: 队伍已满".to_string(), true)
        );

        let http: Result<bool, CallError> = Err(HttpError::BadStatus(502).into());
        let (text, is_error) = report_text("解散", &http);
        assert!(text.starts_with("解散失败: "));
        assert!(is_error);
    }
}
