//! Notifications
//!
//! Toast store behind the `Notifier` seam, so board handlers can report
//! outcomes without touching the DOM.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a toast stays on screen.
const TOAST_MS: u32 = 4_000;

/// Outcome reporting seam injected into the board.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Reactive toast queue rendered by the `Toaster` component. Each toast
/// schedules its own removal.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn items(&self) -> RwSignal<Vec<Toast>> {
        self.items
    }

    /// Remove a toast before its timer fires (close button).
    pub fn dismiss(&self, id: u32) {
        self.items.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: &str) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|toasts| {
            toasts.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let items = self.items;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            items.update(|toasts| toasts.retain(|t| t.id != id));
        });
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}
