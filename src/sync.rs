use crate::models::{GatewayEvent, LineItem, Severity};
use crate::network::{AddOutcome, CartSnapshot, Outcome};
use crate::toast::Notifier;
use crate::tracker::PendingChanges;

pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Reads a money amount back out of rendered text. Unparsable text counts
/// as zero so one bad cell cannot poison the grand total.
pub fn parse_usd(text: &str) -> f64 {
    text.trim()
        .trim_start_matches('$')
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Re-renders one row's line total from its unit price and displayed
/// quantity. No-op when the row is gone.
pub fn sync_item_total(items: &mut [LineItem], item_id: &str) {
    if let Some(item) = items.iter_mut().find(|i| i.item_id == item_id) {
        item.total_text = format_usd(item.unit_price * item.displayed_qty as f64);
    }
}

/// The grand total is always re-derived from the line totals currently on
/// screen, never from a running accumulator, so rows removed out of band
/// can never leave a stale sum behind.
pub fn grand_total(items: &[LineItem]) -> f64 {
    items.iter().map(|i| parse_usd(&i.total_text)).sum()
}

pub fn grand_total_text(items: &[LineItem]) -> String {
    format_usd(grand_total(items))
}

/// Rebuilds the row list from a server snapshot. Line totals are rendered
/// from price × quantity the same way the page would have shown them.
pub fn load_snapshot(snapshot: CartSnapshot) -> Vec<LineItem> {
    snapshot
        .items
        .into_iter()
        .map(|item| LineItem {
            item_id: item.id.to_string(),
            name: item.name,
            unit_price: item.price,
            baseline_qty: item.quantity.max(1),
            displayed_qty: item.quantity.max(1),
            total_text: format_usd(item.price * item.quantity as f64),
        })
        .collect()
}

/// Applies one gateway completion to the view. UI state only mutates on a
/// confirmed success; failures of either kind leave the rows, baselines and
/// pending entries exactly as they were. Completions whose target row has
/// been removed in the meantime quietly no-op. Returns whether the cart
/// should be refetched from the server.
pub fn apply_event(
    event: GatewayEvent,
    items: &mut Vec<LineItem>,
    pending: &mut PendingChanges,
    toasts: &mut Notifier,
) -> bool {
    match event {
        GatewayEvent::UpdateDone {
            item_id,
            quantity,
            outcome,
        } => {
            match outcome {
                Ok(Outcome::Accepted) => {
                    pending.adopt(items, &item_id, quantity);
                    sync_item_total(items, &item_id);
                    toasts.notify("Quantity updated", Severity::Success);
                }
                Ok(Outcome::Rejected(message)) => {
                    toasts.notify(format!("Error: {message}"), Severity::Danger);
                }
                Err(err) => {
                    toasts.notify(format!("Could not update quantity: {err}"), Severity::Danger);
                }
            }
            false
        }
        GatewayEvent::RemoveDone { item_id, outcome } => {
            match outcome {
                Ok(Outcome::Accepted) => {
                    items.retain(|i| i.item_id != item_id);
                    pending.forget(&item_id);
                    toasts.notify("Item removed from cart", Severity::Success);
                }
                Ok(Outcome::Rejected(message)) => {
                    toasts.notify(format!("Error: {message}"), Severity::Danger);
                }
                Err(err) => {
                    toasts.notify(format!("Could not remove item: {err}"), Severity::Danger);
                }
            }
            false
        }
        GatewayEvent::ClearDone { outcome } => {
            match outcome {
                Ok(Outcome::Accepted) => {
                    items.clear();
                    pending.reset();
                    toasts.notify("Cart emptied", Severity::Success);
                }
                Ok(Outcome::Rejected(message)) => {
                    toasts.notify(format!("Error: {message}"), Severity::Danger);
                }
                Err(err) => {
                    toasts.notify(format!("Could not empty the cart: {err}"), Severity::Danger);
                }
            }
            false
        }
        GatewayEvent::AddDone { outcome } => match outcome {
            Ok(AddOutcome::Added) | Ok(AddOutcome::Redirected) => {
                toasts.notify("Product added to cart", Severity::Success);
                true
            }
            Ok(AddOutcome::Rejected(message)) => {
                toasts.notify(format!("Error: {message}"), Severity::Danger);
                false
            }
            Err(err) => {
                toasts.notify(format!("Could not add product: {err}"), Severity::Danger);
                false
            }
        },
        GatewayEvent::SnapshotDone { outcome } => {
            match outcome {
                Ok(snapshot) => {
                    // Rows are rebuilt from the server, then unconfirmed
                    // edits are staged again on top so a reload cannot
                    // silently discard them.
                    *items = load_snapshot(snapshot);
                    pending.rebase(items);
                }
                Err(err) => {
                    toasts.notify(format!("Could not load cart: {err}"), Severity::Danger);
                }
            }
            false
        }
    }
}
