use callout_shared::notice::{NoticeKind, Notifier};
use dioxus::prelude::*;

#[component]
pub fn Notification(notifier: Signal<Notifier>) -> Element {
    let Some(notice) = notifier.read().current().cloned() else {
        return rsx! {};
    };
    let class = match notice.kind {
        NoticeKind::Info => "notification info",
        NoticeKind::Success => "notification success",
        NoticeKind::Error => "notification error",
    };

    rsx! {
        div {
            class: "{class}",
            role: "status",
            onclick: move |_| notifier.write().dismiss(),
            "{notice.message}"
        }
    }
}
