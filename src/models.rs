use std::time::Instant;

use crate::network::{AddOutcome, CartSnapshot, Outcome};

/// One cart row as currently displayed. `baseline_qty` is the last
/// server-confirmed quantity; `displayed_qty` may diverge from it while a
/// change is pending. `total_text` is the rendered line total (e.g. "$20.00"),
/// which the grand total is re-derived from.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub item_id: String,
    pub name: String,
    pub unit_price: f64,
    pub baseline_qty: u32,
    pub displayed_qty: u32,
    pub total_text: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

#[derive(Debug)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Confirmation dialogs. At most one is open at a time; the item id for a
/// pending removal lives in the variant instead of a page-wide variable.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Modal {
    None,
    RemoveItem(String),
    ClearCart,
    QuitPending,
    AddProduct(String),
}

/// Completion of an in-flight gateway call, queued for the UI loop to apply.
/// `Err` is a transport failure, `Ok(Rejected)` an application-level one.
#[derive(Debug)]
pub enum GatewayEvent {
    UpdateDone {
        item_id: String,
        quantity: u32,
        outcome: anyhow::Result<Outcome>,
    },
    RemoveDone {
        item_id: String,
        outcome: anyhow::Result<Outcome>,
    },
    ClearDone {
        outcome: anyhow::Result<Outcome>,
    },
    AddDone {
        outcome: anyhow::Result<AddOutcome>,
    },
    SnapshotDone {
        outcome: anyhow::Result<CartSnapshot>,
    },
}
