//! UI Components
//!
//! Reusable Leptos components.

mod item_card;
mod item_detail_modal;
mod item_form;
mod toaster;

pub use item_card::ItemCard;
pub use item_detail_modal::ItemDetailModal;
pub use item_form::ItemForm;
pub use toaster::Toaster;
