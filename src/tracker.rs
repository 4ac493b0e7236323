use std::collections::HashMap;

use crate::models::LineItem;

/// Per-item proposed-vs-confirmed quantity state. An entry exists exactly
/// while a row's displayed quantity differs from its server-confirmed
/// baseline, which is also when the row's confirm/cancel affordance is
/// shown and the quit guard is armed.
#[derive(Debug, Default)]
pub struct PendingChanges {
    proposed: HashMap<String, u32>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, item_id: &str) -> bool {
        self.proposed.contains_key(item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.proposed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.proposed.len()
    }

    /// Records a new displayed quantity for a row. The caller has already
    /// clamped `quantity` to at least 1. Differs from the baseline: the row
    /// becomes pending. Back at the baseline: any pending entry is dropped.
    /// Unknown item id: no-op, the row may have been removed meanwhile.
    /// Never talks to the server.
    pub fn propose(&mut self, items: &mut [LineItem], item_id: &str, quantity: u32) {
        let Some(item) = items.iter_mut().find(|i| i.item_id == item_id) else {
            return;
        };
        item.displayed_qty = quantity;
        if quantity != item.baseline_qty {
            self.proposed.insert(item_id.to_string(), quantity);
        } else {
            self.proposed.remove(item_id);
        }
    }

    /// Reverts a row's displayed quantity to its baseline and drops the
    /// pending entry. No-op when the row is gone. Never talks to the server.
    pub fn cancel(&mut self, items: &mut [LineItem], item_id: &str) {
        let Some(item) = items.iter_mut().find(|i| i.item_id == item_id) else {
            return;
        };
        item.displayed_qty = item.baseline_qty;
        self.proposed.remove(item_id);
    }

    /// Called after the server confirmed an update: the quantity becomes the
    /// new baseline and the row is clean again. The entry is dropped even
    /// when the row vanished while the request was in flight.
    pub fn adopt(&mut self, items: &mut [LineItem], item_id: &str, quantity: u32) {
        if let Some(item) = items.iter_mut().find(|i| i.item_id == item_id) {
            item.baseline_qty = quantity;
            item.displayed_qty = quantity;
        }
        self.proposed.remove(item_id);
    }

    /// Drops the entry for a row that no longer exists (removed row).
    pub fn forget(&mut self, item_id: &str) {
        self.proposed.remove(item_id);
    }

    /// Fresh page state: no edits outstanding.
    pub fn reset(&mut self) {
        self.proposed.clear();
    }

    /// Re-applies outstanding proposals after the row list was rebuilt from
    /// a server snapshot. A proposal keeps its displayed quantity while it
    /// still differs from the (possibly new) baseline, settles when the
    /// server caught up with it, and is dropped when its row vanished.
    pub fn rebase(&mut self, items: &mut [LineItem]) {
        let entries: Vec<(String, u32)> = self.proposed.drain().collect();
        for (item_id, quantity) in entries {
            self.propose(items, &item_id, quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, price: f64, qty: u32) -> LineItem {
        LineItem {
            item_id: id.to_string(),
            name: format!("Product {id}"),
            unit_price: price,
            baseline_qty: qty,
            displayed_qty: qty,
            total_text: format!("${:.2}", price * qty as f64),
        }
    }

    #[test]
    fn proposing_a_different_quantity_marks_the_row_pending() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();

        pending.propose(&mut items, "1", 5);

        assert!(pending.is_pending("1"));
        assert_eq!(items[0].displayed_qty, 5);
        assert_eq!(items[0].baseline_qty, 2);
    }

    #[test]
    fn proposing_the_baseline_clears_the_pending_entry() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();

        pending.propose(&mut items, "1", 5);
        pending.propose(&mut items, "1", 2);

        assert!(!pending.is_pending("1"));
        assert!(pending.is_empty());
        assert_eq!(items[0].displayed_qty, 2);
    }

    #[test]
    fn cancel_reverts_the_display_and_drops_the_entry() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();

        pending.propose(&mut items, "1", 7);
        pending.cancel(&mut items, "1");

        assert_eq!(items[0].displayed_qty, 2);
        assert!(pending.is_empty());
    }

    #[test]
    fn adopt_moves_the_baseline_and_cleans_the_row() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();

        pending.propose(&mut items, "1", 5);
        pending.adopt(&mut items, "1", 5);

        assert_eq!(items[0].baseline_qty, 5);
        assert_eq!(items[0].displayed_qty, 5);
        assert!(!pending.is_pending("1"));
    }

    #[test]
    fn adopt_for_a_vanished_row_still_drops_the_entry() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();
        pending.propose(&mut items, "1", 5);

        items.clear();
        pending.adopt(&mut items, "1", 5);

        assert!(pending.is_empty());
    }

    #[test]
    fn operations_on_unknown_ids_are_no_ops() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();

        pending.propose(&mut items, "99", 5);
        pending.cancel(&mut items, "99");

        assert!(pending.is_empty());
        assert_eq!(items[0].displayed_qty, 2);
    }

    #[test]
    fn edits_to_different_rows_are_independent() {
        let mut items = vec![row("1", 10.0, 2), row("2", 5.0, 1)];
        let mut pending = PendingChanges::new();

        pending.propose(&mut items, "1", 3);
        pending.propose(&mut items, "2", 4);
        assert_eq!(pending.len(), 2);

        pending.cancel(&mut items, "1");
        assert!(pending.is_pending("2"));
        assert_eq!(items[1].displayed_qty, 4);
    }

    #[test]
    fn rebase_keeps_an_edit_the_server_has_not_seen() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();
        pending.propose(&mut items, "1", 5);

        // Rows rebuilt from a snapshot still carrying the old quantity.
        let mut items = vec![row("1", 10.0, 2)];
        pending.rebase(&mut items);

        assert!(pending.is_pending("1"));
        assert_eq!(items[0].displayed_qty, 5);
        assert_eq!(items[0].baseline_qty, 2);
    }

    #[test]
    fn rebase_settles_an_edit_the_server_caught_up_with() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();
        pending.propose(&mut items, "1", 5);

        let mut items = vec![row("1", 10.0, 5)];
        pending.rebase(&mut items);

        assert!(pending.is_empty());
        assert_eq!(items[0].displayed_qty, 5);
    }

    #[test]
    fn rebase_drops_an_edit_whose_row_vanished() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();
        pending.propose(&mut items, "1", 5);

        let mut items = vec![row("2", 5.0, 1)];
        pending.rebase(&mut items);

        assert!(pending.is_empty());
        assert_eq!(items[0].displayed_qty, 1);
    }

    #[test]
    fn reset_leaves_nothing_outstanding() {
        let mut items = vec![row("1", 10.0, 2)];
        let mut pending = PendingChanges::new();
        pending.propose(&mut items, "1", 9);

        pending.reset();

        assert!(pending.is_empty());
    }
}
