use dioxus::prelude::*;
use dioxus::core::spawn_forever;
use dioxus::router::Navigator;

use crate::app::routes::Route;
use crate::shared::errors::ApiError;
use crate::shared::state::notifications::TOAST_DURATION_MS;
use crate::shared::state::{ToastQueue, ToastVariant};

use super::use_app::use_app;

/// Handle for raising toasts from event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    queue: Signal<ToastQueue>,
}

impl Toaster {
    pub fn queue(&self) -> Signal<ToastQueue> {
        self.queue
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        let mut queue = self.queue;
        let id = queue.write().success(title, description);
        schedule_dismiss(queue, id, TOAST_DURATION_MS);
    }

    pub fn error(&self, title: impl Into<String>, err: &ApiError) {
        let mut queue = self.queue;
        let id = queue.write().error(title, err);
        schedule_dismiss(queue, id, TOAST_DURATION_MS);
    }

    /// Destructive toast for a refusal that never reached the server
    pub fn denied(&self, title: impl Into<String>, description: impl Into<String>) {
        let mut queue = self.queue;
        let id = queue
            .write()
            .push(title, Some(description.into()), ToastVariant::Destructive);
        schedule_dismiss(queue, id, TOAST_DURATION_MS);
    }

    pub fn dismiss(&self, id: uuid::Uuid) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }
}

/// The timer runs in the root scope so a toast raised right before a
/// navigation still goes away.
fn schedule_dismiss(mut queue: Signal<ToastQueue>, id: uuid::Uuid, after_ms: u32) {
    spawn_forever(async move {
        sleep_ms(after_ms).await;
        queue.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

pub fn use_toasts() -> Toaster {
    Toaster {
        queue: use_app().toasts,
    }
}

/// Surface a failed remote call; an expired session goes back to login.
pub fn report_api_error(toaster: &Toaster, navigator: &Navigator, title: &str, err: &ApiError) {
    if err.is_session_expired() {
        navigator.replace(Route::Login {});
    }
    toaster.error(title, err);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;

    #[derive(Props, Clone, PartialEq)]
    struct ShellProps {
        visible: Rc<RefCell<usize>>,
    }

    #[allow(non_snake_case)]
    fn Shell(props: ShellProps) -> Element {
        let queue = use_signal(ToastQueue::default);
        let page_open = use_signal(|| true);
        *props.visible.borrow_mut() = queue.read().len();

        rsx! {
            if page_open() {
                LeavingPage { queue, page_open }
            }
        }
    }

    /// Raises a toast and navigates away in the same step.
    #[component]
    fn LeavingPage(queue: Signal<ToastQueue>, page_open: Signal<bool>) -> Element {
        use_effect(move || {
            let mut queue = queue;
            let mut page_open = page_open;
            let id = queue.write().success("You left the project", "");
            schedule_dismiss(queue, id, 20);
            page_open.set(false);
        });
        rsx! {}
    }

    #[tokio::test]
    async fn test_toast_dismisses_after_raising_page_is_gone() {
        let visible = Rc::new(RefCell::new(0));
        let mut dom = VirtualDom::new_with_props(
            Shell,
            ShellProps {
                visible: visible.clone(),
            },
        );
        dom.rebuild_in_place();

        let mut saw_toast = false;
        for _ in 0..40 {
            let _ = tokio::time::timeout(Duration::from_millis(25), dom.wait_for_work()).await;
            let _ = dom.render_immediate_to_vec();
            let now = *visible.borrow();
            saw_toast |= now == 1;
            if saw_toast && now == 0 {
                break;
            }
        }

        assert!(saw_toast);
        assert_eq!(*visible.borrow(), 0);
    }
}
