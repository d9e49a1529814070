//! Board Coordinator
//!
//! Root state machine for the two item lists, the detail selection, and the
//! compose mode. Every network call runs through here (or through the
//! `Composer` it hands out); child components only report intents upward.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use web_sys::File;

use crate::api::ItemsApi;
use crate::models::{Item, ItemDraft, ItemType};
use crate::notify::Notifier;

/// What the main surface is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Composing(ItemType),
}

/// List state owned by the coordinator, with field-level reactivity.
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    pub lost_items: Vec<Item>,
    pub found_items: Vec<Item>,
    pub loading: bool,
}

/// Root coordinator handle. `Copy`, like a context struct, so it moves
/// freely into event closures. The API client and notifier live in
/// local-storage slots because they are not `Send`.
#[derive(Clone, Copy)]
pub struct Board {
    pub state: Store<BoardState>,
    pub mode: RwSignal<Mode>,
    pub selected: RwSignal<Option<Item>>,
    pub active_tab: RwSignal<ItemType>,
    api: StoredValue<Rc<dyn ItemsApi>, LocalStorage>,
    notifier: StoredValue<Rc<dyn Notifier>, LocalStorage>,
}

impl Board {
    pub fn new(api: Rc<dyn ItemsApi>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            state: Store::new(BoardState::default()),
            mode: RwSignal::new(Mode::Browsing),
            selected: RwSignal::new(None),
            active_tab: RwSignal::new(ItemType::Lost),
            api: StoredValue::new_local(api),
            notifier: StoredValue::new_local(notifier),
        }
    }

    fn api(&self) -> Rc<dyn ItemsApi> {
        self.api.get_value()
    }

    fn notifier(&self) -> Rc<dyn Notifier> {
        self.notifier.get_value()
    }

    /// Resync both partitions from the server.
    ///
    /// The lists are reset up front, both fetches run concurrently, and the
    /// results commit together only once both have settled, so one populated
    /// list is never shown next to a stale one. A failed partition stays
    /// empty; the other still displays.
    pub async fn refresh(&self) {
        let state = self.state;
        state.lost_items().set(Vec::new());
        state.found_items().set(Vec::new());
        state.loading().set(true);

        let api = self.api();
        let (lost, found) =
            futures::join!(api.list(ItemType::Lost), api.list(ItemType::Found));
        let failed = lost.is_err() || found.is_err();

        state.lost_items().set(lost.unwrap_or_default());
        state.found_items().set(found.unwrap_or_default());
        state.loading().set(false);

        if failed {
            self.notifier().error("Failed to load items");
        }
    }

    /// Switch to the report form for one partition. No network effect.
    pub fn open_compose(&self, kind: ItemType) {
        self.mode.set(Mode::Composing(kind));
    }

    /// Back to browsing; the unmounting form drops its draft.
    pub fn cancel_compose(&self) {
        self.mode.set(Mode::Browsing);
    }

    /// A report went through: return to browsing and resync. The created
    /// item is not appended locally; the refetched lists are authoritative.
    pub async fn compose_succeeded(&self, _created: Item) {
        self.mode.set(Mode::Browsing);
        self.refresh().await;
    }

    /// Open the detail view. Reselecting the same item is a no-op change.
    pub fn select(&self, item: Item) {
        self.selected.set(Some(item));
    }

    pub fn close_detail(&self) {
        self.selected.set(None);
    }

    /// Delete by id. Selection and lists are only touched on success; a
    /// failed delete leaves everything exactly as it was.
    pub async fn delete_selected(&self, id: &str) {
        match self.api().delete(id).await {
            Ok(()) => {
                self.notifier().success("Item deleted successfully");
                self.selected.set(None);
                self.refresh().await;
            }
            Err(_) => self.notifier().error("Failed to delete item"),
        }
    }

    /// Hand out a submission state machine for the given partition.
    pub fn composer(&self, kind: ItemType) -> Composer {
        Composer {
            kind,
            draft: RwSignal::new(ItemDraft::default()),
            image: RwSignal::new_local(None),
            submitting: RwSignal::new(false),
            api: self.api,
            notifier: self.notifier,
        }
    }
}

/// Submission state machine for one report form. The component binds the
/// draft and image signals; `submit` owns the network round trip.
#[derive(Clone, Copy)]
pub struct Composer {
    pub kind: ItemType,
    pub draft: RwSignal<ItemDraft>,
    pub image: RwSignal<Option<File>, LocalStorage>,
    pub submitting: RwSignal<bool>,
    api: StoredValue<Rc<dyn ItemsApi>, LocalStorage>,
    notifier: StoredValue<Rc<dyn Notifier>, LocalStorage>,
}

impl Composer {
    /// Post the draft. Returns the created item on success so the caller can
    /// hand control back to the parent. Re-entrant submits and drafts with a
    /// missing required field never reach the network; a failed attempt
    /// keeps the draft so the user can retry.
    pub async fn submit(&self) -> Option<Item> {
        if self.submitting.get_untracked() {
            return None;
        }

        let notifier = self.notifier.get_value();
        let draft = self.draft.get_untracked();
        if let Some(field) = draft.missing_field() {
            notifier.error(&format!("Please fill in the {field} field"));
            return None;
        }

        self.submitting.set(true);
        let image = self.image.get_untracked();
        let result = self.api.get_value().create(self.kind, &draft, image).await;
        self.submitting.set(false);

        match result {
            Ok(created) => {
                notifier.success(&format!(
                    "{} item submitted successfully!",
                    self.kind.label()
                ));
                Some(created)
            }
            Err(_) => {
                notifier.error("Failed to submit item. Please try again.");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ItemsApi};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::{Cell, RefCell};

    fn item(id: &str, title: &str, kind: ItemType) -> Item {
        Item {
            id: id.to_string(),
            title: title.to_string(),
            item_type: kind,
            category: "Documents".to_string(),
            description: "desc".to_string(),
            location: "Central Park".to_string(),
            date: "2024-05-01".to_string(),
            owner_name: "John Doe".to_string(),
            owner_email: "john@example.com".to_string(),
            owner_phone: None,
            image_url: None,
        }
    }

    fn draft() -> ItemDraft {
        ItemDraft {
            title: "Wallet".to_string(),
            category: "Documents".to_string(),
            description: "Brown leather wallet".to_string(),
            location: "Main St".to_string(),
            date: "2024-05-01".to_string(),
            owner_name: "John Doe".to_string(),
            owner_email: "john@example.com".to_string(),
            owner_phone: String::new(),
        }
    }

    /// Scriptable in-memory backend. Optional oneshot gates hold a call
    /// open until the test releases it.
    #[derive(Default)]
    struct MockApi {
        lost: RefCell<Vec<Item>>,
        found: RefCell<Vec<Item>>,
        fail_lost: Cell<bool>,
        fail_delete: Cell<bool>,
        create_calls: Cell<u32>,
        found_gate: RefCell<Option<oneshot::Receiver<()>>>,
        create_gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait(?Send)]
    impl ItemsApi for MockApi {
        async fn list(&self, kind: ItemType) -> Result<Vec<Item>, ApiError> {
            match kind {
                ItemType::Lost => {
                    if self.fail_lost.get() {
                        return Err(ApiError::Status(500));
                    }
                    Ok(self.lost.borrow().clone())
                }
                ItemType::Found => {
                    let gate = self.found_gate.borrow_mut().take();
                    if let Some(gate) = gate {
                        let _ = gate.await;
                    }
                    Ok(self.found.borrow().clone())
                }
            }
        }

        async fn create(
            &self,
            kind: ItemType,
            draft: &ItemDraft,
            _image: Option<File>,
        ) -> Result<Item, ApiError> {
            self.create_calls.set(self.create_calls.get() + 1);
            let created = Item {
                id: format!("created-{}", self.create_calls.get()),
                title: draft.title.clone(),
                item_type: kind,
                category: draft.category.clone(),
                description: draft.description.clone(),
                location: draft.location.clone(),
                date: draft.date.clone(),
                owner_name: draft.owner_name.clone(),
                owner_email: draft.owner_email.clone(),
                owner_phone: None,
                image_url: None,
            };
            let gate = self.create_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match kind {
                ItemType::Lost => self.lost.borrow_mut().push(created.clone()),
                ItemType::Found => self.found.borrow_mut().push(created.clone()),
            }
            Ok(created)
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            if self.fail_delete.get() {
                return Err(ApiError::Status(500));
            }
            self.lost.borrow_mut().retain(|i| i.id != id);
            self.found.borrow_mut().retain(|i| i.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockNotifier {
        successes: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl Notifier for MockNotifier {
        fn success(&self, message: &str) {
            self.successes.borrow_mut().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn setup(api: Rc<MockApi>) -> (Board, Rc<MockNotifier>, Owner) {
        let owner = Owner::new();
        owner.set();
        let notifier = Rc::new(MockNotifier::default());
        let board = Board::new(api, notifier.clone());
        (board, notifier, owner)
    }

    #[test]
    fn refresh_populates_both_partitions() {
        let api = Rc::new(MockApi::default());
        api.lost.borrow_mut().push(item("1", "Wallet", ItemType::Lost));
        api.found.borrow_mut().push(item("2", "Keys", ItemType::Found));
        let (board, notifier, _owner) = setup(api);

        let mut pool = LocalPool::new();
        pool.run_until(board.refresh());

        let lost = board.state.lost_items().get_untracked();
        let found = board.state.found_items().get_untracked();
        assert!(lost.iter().all(|i| i.item_type == ItemType::Lost));
        assert!(found.iter().all(|i| i.item_type == ItemType::Found));
        assert!(lost
            .iter()
            .all(|l| found.iter().all(|f| f.id != l.id)));
        assert!(!board.state.loading().get_untracked());
        assert!(notifier.errors.borrow().is_empty());
    }

    #[test]
    fn loading_clears_only_after_both_fetches_settle() {
        let api = Rc::new(MockApi::default());
        api.lost.borrow_mut().push(item("1", "Wallet", ItemType::Lost));
        let (release_found, gate) = oneshot::channel();
        *api.found_gate.borrow_mut() = Some(gate);
        let (board, _notifier, _owner) = setup(api);

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        spawner
            .spawn_local(async move { board.refresh().await })
            .unwrap();
        pool.run_until_stalled();

        // Lost has resolved but found is still pending: nothing commits yet.
        assert!(board.state.loading().get_untracked());
        assert!(board.state.lost_items().get_untracked().is_empty());

        release_found.send(()).unwrap();
        pool.run_until_stalled();
        assert!(!board.state.loading().get_untracked());
        assert_eq!(board.state.lost_items().get_untracked().len(), 1);
    }

    #[test]
    fn failed_partition_stays_empty_and_reports_once() {
        let api = Rc::new(MockApi::default());
        api.fail_lost.set(true);
        api.found.borrow_mut().push(item("2", "Keys", ItemType::Found));
        let (board, notifier, _owner) = setup(api);

        let mut pool = LocalPool::new();
        pool.run_until(board.refresh());

        assert!(board.state.lost_items().get_untracked().is_empty());
        assert_eq!(board.state.found_items().get_untracked().len(), 1);
        assert!(!board.state.loading().get_untracked());
        assert_eq!(notifier.errors.borrow().as_slice(), ["Failed to load items"]);
    }

    #[test]
    fn compose_success_returns_to_browsing_and_refetches() {
        let api = Rc::new(MockApi::default());
        let (board, notifier, _owner) = setup(api);

        board.open_compose(ItemType::Lost);
        assert_eq!(board.mode.get_untracked(), Mode::Composing(ItemType::Lost));

        let composer = board.composer(ItemType::Lost);
        composer.draft.set(draft());

        let mut pool = LocalPool::new();
        let created = pool
            .run_until(composer.submit())
            .expect("submit should succeed");
        pool.run_until(board.compose_succeeded(created.clone()));

        assert_eq!(board.mode.get_untracked(), Mode::Browsing);
        assert!(board
            .state
            .lost_items()
            .get_untracked()
            .iter()
            .any(|i| i.id == created.id));
        assert_eq!(
            notifier.successes.borrow().as_slice(),
            ["Lost item submitted successfully!"]
        );
    }

    #[test]
    fn in_flight_submit_blocks_reentry() {
        let api = Rc::new(MockApi::default());
        let (release_create, gate) = oneshot::channel();
        *api.create_gate.borrow_mut() = Some(gate);
        let (board, _notifier, _owner) = setup(api.clone());

        let composer = board.composer(ItemType::Found);
        composer.draft.set(draft());

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let first = composer;
        spawner
            .spawn_local(async move {
                first.submit().await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(composer.submitting.get_untracked());

        // Second submit while the first is in flight: no second request.
        let second = composer;
        spawner
            .spawn_local(async move {
                second.submit().await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(api.create_calls.get(), 1);

        release_create.send(()).unwrap();
        pool.run_until_stalled();
        assert_eq!(api.create_calls.get(), 1);
        assert!(!composer.submitting.get_untracked());
    }

    #[test]
    fn missing_required_field_blocks_submission() {
        let api = Rc::new(MockApi::default());
        let (board, notifier, _owner) = setup(api.clone());

        let composer = board.composer(ItemType::Lost);
        let mut incomplete = draft();
        incomplete.title.clear();
        composer.draft.set(incomplete);

        let mut pool = LocalPool::new();
        assert!(pool.run_until(composer.submit()).is_none());

        assert_eq!(api.create_calls.get(), 0);
        assert!(!composer.submitting.get_untracked());
        assert_eq!(
            notifier.errors.borrow().as_slice(),
            ["Please fill in the title field"]
        );
    }

    #[test]
    fn failed_submit_keeps_the_draft_for_retry() {
        let owner = Owner::new();
        owner.set();
        let notifier = Rc::new(MockNotifier::default());
        let board = Board::new(Rc::new(FailingApi), notifier.clone());

        let composer = board.composer(ItemType::Lost);
        let filled = draft();
        composer.draft.set(filled.clone());

        let mut pool = LocalPool::new();
        assert!(pool.run_until(composer.submit()).is_none());

        assert!(!composer.submitting.get_untracked());
        assert_eq!(composer.draft.get_untracked(), filled);
        assert_eq!(
            notifier.errors.borrow().as_slice(),
            ["Failed to submit item. Please try again."]
        );
    }

    struct FailingApi;

    #[async_trait(?Send)]
    impl ItemsApi for FailingApi {
        async fn list(&self, _kind: ItemType) -> Result<Vec<Item>, ApiError> {
            Err(ApiError::Status(500))
        }

        async fn create(
            &self,
            _kind: ItemType,
            _draft: &ItemDraft,
            _image: Option<File>,
        ) -> Result<Item, ApiError> {
            Err(ApiError::Status(500))
        }

        async fn delete(&self, _id: &str) -> Result<(), ApiError> {
            Err(ApiError::Status(500))
        }
    }

    #[test]
    fn failed_delete_leaves_selection_and_lists() {
        let api = Rc::new(MockApi::default());
        api.lost.borrow_mut().push(item("1", "Wallet", ItemType::Lost));
        let (board, notifier, _owner) = setup(api.clone());

        let mut pool = LocalPool::new();
        pool.run_until(board.refresh());

        let wallet = board.state.lost_items().get_untracked()[0].clone();
        board.select(wallet.clone());
        api.fail_delete.set(true);
        pool.run_until(board.delete_selected("1"));

        assert_eq!(board.selected.get_untracked(), Some(wallet));
        assert_eq!(board.state.lost_items().get_untracked().len(), 1);
        assert_eq!(notifier.errors.borrow().as_slice(), ["Failed to delete item"]);
    }

    #[test]
    fn select_delete_refetch_clears_the_board() {
        let api = Rc::new(MockApi::default());
        api.lost.borrow_mut().push(item("1", "Wallet", ItemType::Lost));
        let (board, notifier, _owner) = setup(api);

        let mut pool = LocalPool::new();
        pool.run_until(board.refresh());
        assert_eq!(board.state.lost_items().get_untracked().len(), 1);

        let wallet = board.state.lost_items().get_untracked()[0].clone();
        board.select(wallet);
        assert_eq!(
            board.selected.get_untracked().map(|i| i.id),
            Some("1".to_string())
        );

        pool.run_until(board.delete_selected("1"));

        assert_eq!(board.selected.get_untracked(), None);
        assert!(board.state.lost_items().get_untracked().is_empty());
        assert_eq!(
            notifier.successes.borrow().as_slice(),
            ["Item deleted successfully"]
        );
    }

    #[test]
    fn close_detail_clears_selection() {
        let api = Rc::new(MockApi::default());
        let (board, _notifier, _owner) = setup(api);

        board.select(item("1", "Wallet", ItemType::Lost));
        board.close_detail();
        assert_eq!(board.selected.get_untracked(), None);

        board.open_compose(ItemType::Found);
        board.cancel_compose();
        assert_eq!(board.mode.get_untracked(), Mode::Browsing);
    }
}
