use callout_shared::models::Difficulty;
use callout_shared::notice::{Notice, Notifier, NOTICE_DURATION_MS};
use callout_shared::{SessionController, Viewport};
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::api;
use crate::components::callout_form::CalloutForm;
use crate::components::callout_list::CalloutList;
use crate::components::map_view::MapView;
use crate::components::notification::Notification;
use crate::components::session_selector::SessionSelector;
use crate::export;

/// Show a notice and schedule its dismissal. A newer notice invalidates the pending one.
fn notify(mut notifier: Signal<Notifier>, notice: Notice) {
    let generation = notifier.write().show(notice);
    spawn(async move {
        TimeoutFuture::new(NOTICE_DURATION_MS).await;
        notifier.write().expire(generation);
    });
}

#[component]
pub fn Recorder() -> Element {
    let mut controller = use_signal(SessionController::default);
    let mut viewport = use_signal(|| Viewport::new(controller.peek().image_path()));
    let notifier = use_signal(Notifier::default);
    let mut callout_name = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let ctrl = controller.read();
    let map = (*ctrl).map().to_string();
    let difficulty = ctrl.difficulty();
    let locked = ctrl.is_locked();
    let last_pick = ctrl.last_pick();
    let callouts = ctrl.callouts().to_vec();
    drop(ctrl);
    let is_saving = *saving.read();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Callout Recorder" }
            }

            div { class: "sidebar",
                SessionSelector {
                    map: map.clone(),
                    difficulty: difficulty,
                    // A pending save belongs to the current map and difficulty.
                    locked: locked || is_saving,
                    on_map_change: move |next: String| {
                        let result = controller.write().change_map(&next);
                        match result {
                            Ok(image_path) => {
                                viewport.write().set_image_path(image_path);
                            }
                            Err(e) => notify(notifier, Notice::error(e.to_string())),
                        }
                    },
                    on_difficulty_change: move |value: String| {
                        let result = value
                            .parse::<Difficulty>()
                            .and_then(|d| controller.write().change_difficulty(d).map_err(|e| e.to_string()));
                        if let Err(e) = result {
                            notify(notifier, Notice::error(e));
                        }
                    },
                }

                CalloutForm {
                    callout_name: callout_name,
                    last_pick: last_pick,
                    saving: is_saving,
                    on_submit: move |_| {
                        if *saving.peek() {
                            return;
                        }
                        let name = callout_name.peek().clone();
                        let request = match controller.peek().append_request(&name) {
                            Ok(request) => request,
                            Err(e) => {
                                notify(notifier, Notice::error(e.to_string()));
                                return;
                            }
                        };

                        saving.set(true);
                        notify(notifier, Notice::info("Saving callout..."));
                        spawn(async move {
                            let stored = api::append_callout(&request).await;
                            saving.set(false);
                            if let Err(e) = stored {
                                notify(notifier, Notice::error(e));
                                return;
                            }
                            let committed = controller
                                .write()
                                .add_callout(&name, request.coordinates)
                                .map(|_| ());
                            match committed {
                                Ok(()) => {
                                    callout_name.set(String::new());
                                    notify(
                                        notifier,
                                        Notice::success(format!(
                                            "Callout added to {}.json",
                                            request.difficulty
                                        )),
                                    );
                                }
                                Err(e) => notify(notifier, Notice::error(e.to_string())),
                            }
                        });
                    },
                }

                CalloutList {
                    callouts: callouts,
                    on_remove: move |index: usize| {
                        let result = controller.write().remove_callout(index);
                        if let Err(e) = result {
                            notify(notifier, Notice::error(e.to_string()));
                        }
                    },
                    on_export: move |_| {
                        let result = controller
                            .peek()
                            .export_session()
                            .map_err(|e| e.to_string())
                            .and_then(|artifact| export::download(&artifact));
                        if let Err(e) = result {
                            notify(notifier, Notice::error(e));
                        }
                    },
                    on_copy: move |_| {
                        let artifact = match controller.peek().export_session() {
                            Ok(artifact) => artifact,
                            Err(e) => {
                                notify(notifier, Notice::error(e.to_string()));
                                return;
                            }
                        };
                        spawn(async move {
                            match export::copy_to_clipboard(&artifact).await {
                                Ok(()) => notify(notifier, Notice::success("Copied to clipboard")),
                                Err(e) => notify(notifier, Notice::error(e)),
                            }
                        });
                    },
                    on_reset: move |_| {
                        controller.write().reset_session();
                        notify(notifier, Notice::info("Session reset"));
                    },
                }
            }

            div { class: "main",
                MapView {
                    viewport: viewport,
                    on_pick: move |point| controller.write().set_pick(point),
                }
            }

            Notification { notifier: notifier }
        }
    }
}
