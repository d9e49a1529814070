//! Item Form Component
//!
//! Report form for a lost or found item, with an optional image attachment.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::board::Board;
use crate::models::{Item, ItemType, CATEGORIES};

/// Report form for one partition. Field edits land in the composer's draft;
/// a successful submit hands the created item back to the parent, which
/// unmounts the form (discarding the draft). A failed submit keeps the
/// draft so the user can retry.
#[component]
pub fn ItemForm(
    kind: ItemType,
    #[prop(into)] on_success: Callback<Item>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let board = expect_context::<Board>();
    let composer = board.composer(kind);
    let draft = composer.draft;
    let submitting = composer.submitting;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            if let Some(created) = composer.submit().await {
                on_success.run(created);
            }
        });
    };

    let on_image_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|target| {
                target
                    .dyn_ref::<web_sys::HtmlInputElement>()
                    .and_then(|input| input.files())
            })
            .and_then(|files| files.get(0));
        composer.image.set(file);
    };

    view! {
        <div class="item-form-card">
            <h2 class="item-form-title">{format!("Report {} Item", kind.label())}</h2>
            <form class="item-form" on:submit=on_submit>
                <div class="form-field">
                    <label>"Item Title *"</label>
                    <input
                        type="text"
                        placeholder="e.g., Black iPhone 15 Pro"
                        prop:value=move || draft.get().title
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                </div>

                <div class="form-field">
                    <label>"Category *"</label>
                    <select
                        prop:value=move || draft.get().category
                        on:change=move |ev| draft.update(|d| d.category = event_target_value(&ev))
                    >
                        <option value="">"Select category"</option>
                        {CATEGORIES.iter().map(|cat| view! {
                            <option value=*cat>{*cat}</option>
                        }).collect_view()}
                    </select>
                </div>

                <div class="form-field">
                    <label>"Description *"</label>
                    <textarea
                        placeholder="Provide detailed description..."
                        rows=4
                        prop:value=move || draft.get().description
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </div>

                <div class="form-row">
                    <div class="form-field">
                        <label>"Location *"</label>
                        <input
                            type="text"
                            placeholder="e.g., Central Park"
                            prop:value=move || draft.get().location
                            on:input=move |ev| draft.update(|d| d.location = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label>"Date *"</label>
                        <input
                            type="date"
                            prop:value=move || draft.get().date
                            on:input=move |ev| draft.update(|d| d.date = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form-field">
                    <label>"Upload Image"</label>
                    <input type="file" accept="image/*" on:change=on_image_change/>
                </div>

                <h3 class="contact-heading">"Your Contact Information"</h3>

                <div class="form-field">
                    <label>"Name *"</label>
                    <input
                        type="text"
                        placeholder="John Doe"
                        prop:value=move || draft.get().owner_name
                        on:input=move |ev| draft.update(|d| d.owner_name = event_target_value(&ev))
                    />
                </div>

                <div class="form-field">
                    <label>"Email *"</label>
                    <input
                        type="email"
                        placeholder="john@example.com"
                        prop:value=move || draft.get().owner_email
                        on:input=move |ev| draft.update(|d| d.owner_email = event_target_value(&ev))
                    />
                </div>

                <div class="form-field">
                    <label>"Phone (Optional)"</label>
                    <input
                        type="tel"
                        placeholder="+1 234 567 8900"
                        prop:value=move || draft.get().owner_phone
                        on:input=move |ev| draft.update(|d| d.owner_phone = event_target_value(&ev))
                    />
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting..." } else { "Submit" }}
                    </button>
                    <button type="button" class="btn-outline" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
