//! Item Card Component
//!
//! Summary card for one item in the list grid.

use leptos::prelude::*;

use crate::models::Item;

/// Badge accent class for a category; unmapped categories fall back to the
/// "Other" gray.
pub(crate) fn category_accent(category: &str) -> &'static str {
    match category {
        "Electronics" => "badge-purple",
        "Accessories" => "badge-pink",
        "Documents" => "badge-blue",
        "Clothing" => "badge-green",
        "Pets" => "badge-orange",
        _ => "badge-gray",
    }
}

/// Clickable summary card. Stateless; forwards the click as a selection
/// intent carrying the full item.
#[component]
pub fn ItemCard(item: Item, #[prop(into)] on_select: Callback<Item>) -> impl IntoView {
    let accent = category_accent(&item.category);
    let selected = item.clone();

    view! {
        <div class="item-card" on:click=move |_| on_select.run(selected.clone())>
            {item.image_url.clone().map(|url| view! {
                <div class="item-card-image">
                    <img src=url alt=item.title.clone()/>
                </div>
            })}
            <div class="item-card-body">
                <div class="item-card-head">
                    <h3 class="item-card-title">{item.title.clone()}</h3>
                    <span class=format!("badge {accent}")>{item.category.clone()}</span>
                </div>
                <p class="item-card-description">{item.description.clone()}</p>
                <div class="item-card-meta">
                    <span class="item-card-location">{item.location.clone()}</span>
                    <span class="item-card-date">{item.date.clone()}</span>
                </div>
            </div>
        </div>
    }
}
