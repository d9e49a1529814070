//! Lost & Found App
//!
//! Root component: header, the two-tab item board, compose mode, detail
//! modal, and the toast host.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiConfig, HttpApi};
use crate::board::{Board, BoardStateStoreFields, Mode};
use crate::components::{ItemCard, ItemDetailModal, ItemForm, Toaster};
use crate::models::{Item, ItemType};
use crate::notify::Toasts;

#[component]
pub fn App() -> impl IntoView {
    let toasts = Toasts::new();
    let board = Board::new(
        Rc::new(HttpApi::new(ApiConfig::from_window())),
        Rc::new(toasts),
    );

    // Provide the coordinator to all children
    provide_context(board);

    // Load both partitions on mount
    Effect::new(move |_| {
        spawn_local(async move {
            web_sys::console::log_1(&"[APP] Loading items".into());
            board.refresh().await;
            web_sys::console::log_1(
                &format!(
                    "[APP] Loaded {} lost, {} found",
                    board.state.lost_items().get_untracked().len(),
                    board.state.found_items().get_untracked().len()
                )
                .into(),
            );
        });
    });

    view! {
        <div class="app">
            <Toaster toasts=toasts/>

            {move || match board.mode.get() {
                Mode::Composing(kind) => view! {
                    <div class="compose-screen">
                        <ItemForm
                            kind=kind
                            on_success=move |created: Item| {
                                spawn_local(async move {
                                    board.compose_succeeded(created).await;
                                });
                            }
                            on_cancel=move |_: ()| board.cancel_compose()
                        />
                    </div>
                }.into_any(),
                Mode::Browsing => view! {
                    <div class="board-screen">
                        <header class="app-header">
                            <div>
                                <h1 class="app-title">"Lost & Found"</h1>
                                <p class="app-subtitle">"Help reunite lost items with their owners"</p>
                            </div>
                            <div class="header-actions">
                                <button
                                    class="btn-primary"
                                    on:click=move |_| board.open_compose(ItemType::Lost)
                                >
                                    "Report Lost Item"
                                </button>
                                <button
                                    class="btn-secondary"
                                    on:click=move |_| board.open_compose(ItemType::Found)
                                >
                                    "Report Found Item"
                                </button>
                            </div>
                        </header>

                        <main class="board-main">
                            <TabBar/>
                            {move || {
                                let kind = board.active_tab.get();
                                view! { <ItemPanel kind=kind/> }
                            }}
                        </main>
                    </div>
                }.into_any(),
            }}

            <ItemDetailModal
                selected=board.selected.read_only()
                on_close=move |_: ()| board.close_detail()
                on_delete=Callback::new(move |id: String| {
                    spawn_local(async move {
                        board.delete_selected(&id).await;
                    });
                })
            />
        </div>
    }
}

/// Lost/found tab switcher with live counts.
#[component]
fn TabBar() -> impl IntoView {
    let board = expect_context::<Board>();
    let state = board.state;
    let active_tab = board.active_tab;

    let tab_class = move |kind: ItemType| {
        if active_tab.get() == kind {
            "tab active"
        } else {
            "tab"
        }
    };

    view! {
        <div class="tab-bar">
            <button
                class=move || tab_class(ItemType::Lost)
                on:click=move |_| active_tab.set(ItemType::Lost)
            >
                {move || format!("Lost Items ({})", state.lost_items().get().len())}
            </button>
            <button
                class=move || tab_class(ItemType::Found)
                on:click=move |_| active_tab.set(ItemType::Found)
            >
                {move || format!("Found Items ({})", state.found_items().get().len())}
            </button>
        </div>
    }
}

/// One tab panel: spinner while loading, empty-state prompt, or the card
/// grid. The spinner holds until both partition fetches have settled.
#[component]
fn ItemPanel(kind: ItemType) -> impl IntoView {
    let board = expect_context::<Board>();
    let state = board.state;
    let items = move || match kind {
        ItemType::Lost => state.lost_items().get(),
        ItemType::Found => state.found_items().get(),
    };

    view! {
        <div class="tab-panel">
            {move || if state.loading().get() {
                view! {
                    <div class="spinner-wrap">
                        <div class="spinner"></div>
                    </div>
                }.into_any()
            } else if items().is_empty() {
                view! {
                    <div class="empty-state">
                        <h3>{format!("No {} items reported", kind.as_str())}</h3>
                        <p>{format!("Be the first to report a {} item", kind.as_str())}</p>
                    </div>
                }.into_any()
            } else {
                view! {
                    <div class="item-grid">
                        <For
                            each=items
                            key=|item| item.id.clone()
                            children=move |item| view! {
                                <ItemCard
                                    item=item
                                    on_select=move |selected: Item| board.select(selected)
                                />
                            }
                        />
                    </div>
                }.into_any()
            }}
        </div>
    }
}
