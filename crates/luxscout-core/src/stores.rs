//! In-memory state holders for the enquiry cart and the wishlist
//!
//! These are plain mutable stores with an explicit change-notification
//! callback list. Anything that wants to redraw on change subscribes; the
//! stores know nothing about what a subscriber does with the signal.

use crate::models::{SelectedProduct, SelectionPatch};
use crate::{Error, Result};
use tracing::debug;
use uuid::Uuid;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// Change-notification callback
type Subscriber = Box<dyn Fn() + Send>;

/// Shared subscriber bookkeeping for both stores
#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Subscriber)>,
}

impl Subscribers {
    fn subscribe(&mut self, callback: Subscriber) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        SubscriberId(id)
    }

    fn unsubscribe(&mut self, id: SubscriberId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id.0);
    }

    fn notify(&self) {
        for (_, callback) in &self.entries {
            callback();
        }
    }
}

/// What goes into a new enquiry-cart entry; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewSelection {
    pub product_id: String,
    pub product_name: String,
    pub wattage: u32,
    pub color_temperature: String,
    pub application_type: String,
    pub quantity: u32,
    pub notes: Option<String>,
}

/// The enquiry cart: configured product lines awaiting submission
///
/// The same product can appear several times with different configurations,
/// so entries are keyed by a per-entry selection id rather than product id.
#[derive(Default)]
pub struct SelectionStore {
    items: Vec<SelectedProduct>,
    subscribers: Subscribers,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configured line item, returning its freshly minted id
    pub fn add(&mut self, selection: NewSelection) -> String {
        let selection_id = Uuid::new_v4().to_string();
        debug!("Adding selection {} for {}", selection_id, selection.product_id);
        self.items.push(SelectedProduct {
            selection_id: selection_id.clone(),
            product_id: selection.product_id,
            product_name: selection.product_name,
            wattage: selection.wattage,
            color_temperature: selection.color_temperature,
            application_type: selection.application_type,
            quantity: selection.quantity,
            notes: selection.notes,
        });
        self.subscribers.notify();
        selection_id
    }

    /// Re-insert a previously persisted entry, keeping its id
    pub fn hydrate(&mut self, item: SelectedProduct) {
        self.items.push(item);
        self.subscribers.notify();
    }

    pub fn remove(&mut self, selection_id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|item| item.selection_id != selection_id);
        if self.items.len() == before {
            return Err(Error::SelectionNotFound(selection_id.to_string()));
        }
        self.subscribers.notify();
        Ok(())
    }

    /// Apply a partial update to one entry
    pub fn update(&mut self, selection_id: &str, patch: SelectionPatch) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.selection_id == selection_id)
            .ok_or_else(|| Error::SelectionNotFound(selection_id.to_string()))?;

        if let Some(wattage) = patch.wattage {
            item.wattage = wattage;
        }
        if let Some(temp) = patch.color_temperature {
            item.color_temperature = temp;
        }
        if let Some(app) = patch.application_type {
            item.application_type = app;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(notes) = patch.notes {
            item.notes = notes;
        }
        self.subscribers.notify();
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.subscribers.notify();
        }
    }

    pub fn items(&self) -> &[SelectedProduct] {
        &self.items
    }

    pub fn get(&self, selection_id: &str) -> Option<&SelectedProduct> {
        self.items.iter().find(|i| i.selection_id == selection_id)
    }

    /// Total units across all lines, the number the cart badge shows
    pub fn total_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subscribe(&mut self, callback: impl Fn() + Send + 'static) -> SubscriberId {
        self.subscribers.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.unsubscribe(id);
    }
}

/// Saved-for-later product ids, insertion order preserved
#[derive(Default)]
pub struct WishlistStore {
    ids: Vec<String>,
    subscribers: Subscribers,
}

impl WishlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    pub fn add(&mut self, product_id: &str) {
        if !self.contains(product_id) {
            self.ids.push(product_id.to_string());
            self.subscribers.notify();
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        let before = self.ids.len();
        self.ids.retain(|id| id != product_id);
        if self.ids.len() != before {
            self.subscribers.notify();
        }
    }

    /// Flip membership; returns whether the product is wishlisted afterwards
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            self.remove(product_id);
            false
        } else {
            self.add(product_id);
            true
        }
    }

    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids.clear();
            self.subscribers.notify();
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn subscribe(&mut self, callback: impl Fn() + Send + 'static) -> SubscriberId {
        self.subscribers.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.unsubscribe(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_selection(product_id: &str, quantity: u32) -> NewSelection {
        NewSelection {
            product_id: product_id.to_string(),
            product_name: "Classic LED Bulb".to_string(),
            wattage: 9,
            color_temperature: "Warm White".to_string(),
            application_type: "Indoor".to_string(),
            quantity,
            notes: None,
        }
    }

    #[test]
    fn test_selection_add_remove() {
        let mut store = SelectionStore::new();
        let id_a = store.add(sample_selection("led-bulb-classic", 4));
        let id_b = store.add(sample_selection("led-bulb-classic", 2));
        assert_ne!(id_a, id_b, "each line gets its own id");
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total_count(), 6);

        store.remove(&id_a).unwrap();
        assert_eq!(store.items().len(), 1);
        assert!(matches!(
            store.remove(&id_a),
            Err(Error::SelectionNotFound(_))
        ));
    }

    #[test]
    fn test_selection_update_patch() {
        let mut store = SelectionStore::new();
        let id = store.add(sample_selection("led-bulb-classic", 1));

        store
            .update(
                &id,
                SelectionPatch {
                    quantity: Some(10),
                    notes: Some(Some("for the hallway".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();

        let item = store.get(&id).unwrap();
        assert_eq!(item.quantity, 10);
        assert_eq!(item.notes.as_deref(), Some("for the hallway"));
        // Untouched fields survive the patch
        assert_eq!(item.wattage, 9);
    }

    #[test]
    fn test_selection_notifies_subscribers() {
        let mut store = SelectionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let id = store.add(sample_selection("led-bulb-classic", 1));
        store.remove(&id).unwrap();
        store.clear(); // already empty, no notification
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        store.unsubscribe(sub);
        store.add(sample_selection("led-bulb-classic", 1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_wishlist_toggle() {
        let mut store = WishlistStore::new();
        assert!(store.toggle("flood-light-pro"));
        assert!(store.contains("flood-light-pro"));
        assert!(!store.toggle("flood-light-pro"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_wishlist_add_is_idempotent() {
        let mut store = WishlistStore::new();
        store.add("t8-tube-light");
        store.add("t8-tube-light");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_wishlist_keeps_insertion_order() {
        let mut store = WishlistStore::new();
        store.add("b");
        store.add("a");
        store.add("c");
        assert_eq!(store.ids(), &["b", "a", "c"]);
    }

    #[test]
    fn test_wishlist_notifies_on_real_changes_only() {
        let mut store = WishlistStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.add("x"); // notify
        store.add("x"); // duplicate, silent
        store.remove("y"); // absent, silent
        store.remove("x"); // notify
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
