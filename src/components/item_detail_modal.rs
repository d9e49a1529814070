//! Item Detail Modal Component
//!
//! Full detail overlay for the selected item. The closed state is simply the
//! absence of a selection, so visibility can never drift out of sync with
//! the content.

use leptos::prelude::*;

use super::item_card::category_accent;
use crate::models::{Item, ItemType};

/// Detail overlay. Renders nothing while no item is selected. The delete
/// button only appears when a delete handler was supplied, which lets the
/// modal double as a read-only view.
#[component]
pub fn ItemDetailModal(
    selected: ReadSignal<Option<Item>>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] on_delete: Option<Callback<String>>,
) -> impl IntoView {
    move || {
        selected.get().map(|item| {
            let accent = category_accent(&item.category);
            let (type_class, type_label) = match item.item_type {
                ItemType::Lost => ("badge badge-red", "Lost"),
                ItemType::Found => ("badge badge-green", "Found"),
            };
            let mailto = format!("mailto:{}", item.owner_email);
            let delete_id = item.id.clone();

            view! {
                <div class="modal-overlay" on:click=move |_| on_close.run(())>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <div class="modal-header">
                            <h2 class="modal-title">{item.title.clone()}</h2>
                            <button class="modal-close" on:click=move |_| on_close.run(())>
                                "×"
                            </button>
                        </div>

                        {item.image_url.clone().map(|url| view! {
                            <div class="modal-image">
                                <img src=url alt=item.title.clone()/>
                            </div>
                        })}

                        <div class="modal-badges">
                            <span class=format!("badge {accent}")>{item.category.clone()}</span>
                            <span class=type_class>{type_label}</span>
                        </div>

                        <div class="modal-section">
                            <h3>"Description"</h3>
                            <p>{item.description.clone()}</p>
                        </div>

                        <div class="modal-columns">
                            <div class="modal-section">
                                <h3>"Location"</h3>
                                <p>{item.location.clone()}</p>
                            </div>
                            <div class="modal-section">
                                <h3>"Date"</h3>
                                <p>{item.date.clone()}</p>
                            </div>
                        </div>

                        <div class="modal-contact">
                            <h3>"Contact Information"</h3>
                            <p>"Name: " {item.owner_name.clone()}</p>
                            <p>
                                "Email: "
                                <a href=mailto.clone()>{item.owner_email.clone()}</a>
                            </p>
                            {item.owner_phone.clone().map(|phone| view! {
                                <p>"Phone: " {phone}</p>
                            })}
                        </div>

                        <div class="modal-actions">
                            // Pure link construction; opening the mail client
                            // is the browser's business, not a network call.
                            <a class="btn-primary" href=mailto>"Email Contact"</a>
                            {on_delete.map(|on_delete| view! {
                                <button
                                    class="btn-danger"
                                    on:click={
                                        let id = delete_id.clone();
                                        move |_| on_delete.run(id.clone())
                                    }
                                >
                                    "Delete"
                                </button>
                            })}
                        </div>
                    </div>
                </div>
            }
        })
    }
}
