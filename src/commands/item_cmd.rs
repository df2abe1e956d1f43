//! Item Commands
//!
//! Save, delete-all and list handlers. Failures come back as the short
//! status strings the user sees; the underlying error is only logged.

use crate::domain::{DomainError, ItemDraft, Item};
use crate::repository::ItemStore;
use crate::view;

pub const SAVED_MESSAGE: &str = "Saved successfully!";
pub const SAVE_ERROR_MESSAGE: &str = "Error saving item.";
pub const DELETED_MESSAGE: &str = "All items deleted.";
pub const DELETE_ERROR_MESSAGE: &str = "Error deleting items.";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading items.";
pub const DELETE_CONFIRM_PROMPT: &str = "Delete ALL items? This cannot be undone.";

/// Validate the draft and store it
///
/// Validation runs before the store is touched.
pub async fn save_item(store: &ItemStore, draft: ItemDraft) -> Result<String, String> {
    let item = match draft.validate() {
        Ok(item) => item,
        Err(DomainError::InvalidInput(msg)) => {
            log::info!("Validation failed");
            return Err(msg);
        }
        Err(e) => return Err(e.to_string()),
    };

    match store.insert(&item).await {
        Ok(id) => {
            log::info!("Saved id={}", id);
            Ok(SAVED_MESSAGE.to_string())
        }
        Err(e) => {
            log::error!("Save error: {}", e);
            Err(SAVE_ERROR_MESSAGE.to_string())
        }
    }
}

/// Remove every item once the user has confirmed
///
/// Returns `Ok(None)` when not confirmed; the store is left untouched.
pub async fn delete_all(store: &ItemStore, confirmed: bool) -> Result<Option<String>, String> {
    if !confirmed {
        return Ok(None);
    }

    match store.clear_all().await {
        Ok(()) => {
            log::info!("All items deleted");
            Ok(Some(DELETED_MESSAGE.to_string()))
        }
        Err(e) => {
            log::error!("Delete all error: {}", e);
            Err(DELETE_ERROR_MESSAGE.to_string())
        }
    }
}

/// List all items
pub async fn list_items(store: &ItemStore) -> Result<Vec<Item>, String> {
    store.list_all().await.map_err(|e| {
        log::error!("List error: {}", e);
        LOAD_ERROR_MESSAGE.to_string()
    })
}

/// Rendered HTML for the listing surface
///
/// On failure the error carries the HTML to show in place of the list.
pub async fn populate_view_list(store: &ItemStore) -> Result<String, String> {
    match store.list_all().await {
        Ok(items) => Ok(view::render_item_list(&items)),
        Err(e) => {
            log::error!("populate_view_list error: {}", e);
            Err(view::LOAD_ERROR_HTML.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainResult;
    use crate::repository::{Backend, RecordStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts calls and optionally fails every one of them
    struct CountingStore {
        calls: Arc<AtomicUsize>,
        fail: bool,
        items: Vec<Item>,
    }

    impl CountingStore {
        fn result<T>(&self, ok: T) -> DomainResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DomainError::Internal("disk full".to_string()))
            } else {
                Ok(ok)
            }
        }
    }

    #[async_trait]
    impl RecordStore<Item> for CountingStore {
        async fn insert(&self, _entity: &Item) -> DomainResult<String> {
            self.result("1".to_string())
        }

        async fn list_all(&self) -> DomainResult<Vec<Item>> {
            self.result(self.items.clone())
        }

        async fn clear_all(&self) -> DomainResult<()> {
            self.result(())
        }

        fn backend(&self) -> Backend {
            Backend::Fallback
        }
    }

    fn counting_store(fail: bool, items: Vec<Item>) -> (ItemStore, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = ItemStore::new(CountingStore { calls: calls.clone(), fail, items });
        (store, calls)
    }

    fn milk_draft() -> ItemDraft {
        ItemDraft {
            category: "Dairy".to_string(),
            item: "Milk".to_string(),
            date: "2024-01-10".to_string(),
            reminder: "2024-01-08".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_reports_success() {
        let (store, calls) = counting_store(false, vec![]);
        assert_eq!(save_item(&store, milk_draft()).await, Ok(SAVED_MESSAGE.to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_store() {
        let (store, calls) = counting_store(false, vec![]);
        let mut draft = milk_draft();
        draft.reminder.clear();
        draft.notes = "filled".to_string();

        let result = save_item(&store, draft).await;
        assert_eq!(result, Err("Please fill all required fields.".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_save_failure_is_generic() {
        let (store, _) = counting_store(true, vec![]);
        assert_eq!(save_item(&store, milk_draft()).await, Err(SAVE_ERROR_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (store, calls) = counting_store(false, vec![]);
        assert_eq!(delete_all(&store, false).await, Ok(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(delete_all(&store, true).await, Ok(Some(DELETED_MESSAGE.to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_is_generic() {
        let (store, _) = counting_store(true, vec![]);
        assert_eq!(delete_all(&store, true).await, Err(DELETE_ERROR_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_view_list_placeholder_and_error() {
        let (empty, _) = counting_store(false, vec![]);
        assert_eq!(populate_view_list(&empty).await, Ok(view::EMPTY_LIST_HTML.to_string()));

        let (failing, _) = counting_store(true, vec![]);
        assert!(list_items(&failing).await.is_err());
    }

    #[tokio::test]
    async fn test_view_list_load_failure_is_an_error() {
        let (failing, calls) = counting_store(true, vec![]);
        assert_eq!(populate_view_list(&failing).await, Err(view::LOAD_ERROR_HTML.to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_view_list_renders_items() {
        let (store, _) = counting_store(false, vec![Item::new("Dairy", "Milk", "2024-01-10", "2024-01-08")]);
        let html = populate_view_list(&store).await.expect("listing");
        assert!(html.contains("<strong>Name:</strong> Milk<br>"));
    }
}
