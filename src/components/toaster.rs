//! Toaster Component
//!
//! Corner stack rendering the toast store.

use leptos::prelude::*;

use crate::notify::{ToastKind, Toasts};

/// Transient notification stack. Toasts remove themselves after a few
/// seconds; the close button just beats the timer.
#[component]
pub fn Toaster(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toaster">
            <For
                each=move || toasts.items().get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class>
                            <span class="toast-message">{toast.message.clone()}</span>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
