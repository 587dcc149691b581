//! Selection
//!
//! The set of line items marked for checkout. Entries survive page navigation:
//! selecting an item on page 1 and moving to page 2 keeps it selected.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{CartLineItem, CartPage},
    ids::{LineItemId, ProductId},
};

/// Snapshot of a line item taken when it was selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionEntry {
    /// Selected line.
    pub line_item_id: LineItemId,

    /// Product in the line.
    pub product_id: ProductId,

    /// Quantity at selection time, kept in sync by quantity changes.
    pub quantity: u32,

    /// Unit price at selection time.
    pub unit_price: Money<'static, Currency>,
}

impl From<&CartLineItem> for SelectionEntry {
    fn from(item: &CartLineItem) -> Self {
        Self {
            line_item_id: item.line_item_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Selection entries keyed by line item id.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: FxHashMap<LineItemId, SelectionEntry>,
}

impl Selection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an item, replacing any previous snapshot.
    pub fn insert(&mut self, item: &CartLineItem) {
        self.entries
            .insert(item.line_item_id, SelectionEntry::from(item));
    }

    /// Deselect an item, returning its snapshot if it was selected.
    pub fn remove(&mut self, id: LineItemId) -> Option<SelectionEntry> {
        self.entries.remove(&id)
    }

    /// Flip the selection state of an item. Returns `true` if it is now selected.
    pub fn toggle(&mut self, item: &CartLineItem) -> bool {
        if self.remove(item.line_item_id).is_some() {
            false
        } else {
            self.insert(item);
            true
        }
    }

    /// Refresh the snapshot of an already selected item; unselected items are
    /// left unselected.
    pub fn sync(&mut self, item: &CartLineItem) {
        if let Some(entry) = self.entries.get_mut(&item.line_item_id) {
            *entry = SelectionEntry::from(item);
        }
    }

    /// Whether every item on the page is selected. An empty page is never
    /// considered all-selected.
    pub fn covers(&self, page: &CartPage) -> bool {
        !page.is_empty() && page.ids().all(|id| self.contains(id))
    }

    /// Select every item on the page, keeping entries for other pages.
    pub fn select_page(&mut self, page: &CartPage) {
        for item in &page.items {
            self.insert(item);
        }
    }

    /// Deselect exactly the items on the page.
    pub fn deselect_page(&mut self, page: &CartPage) {
        for id in page.ids() {
            self.remove(id);
        }
    }

    /// Whether an item is selected.
    pub fn contains(&self, id: LineItemId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Snapshot of a selected item.
    pub fn get(&self, id: LineItemId) -> Option<&SelectionEntry> {
        self.entries.get(&id)
    }

    /// Every selected entry, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values()
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
