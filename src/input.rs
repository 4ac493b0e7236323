use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossterm::event::KeyCode;
use tokio::runtime::Runtime;

use crate::models::{GatewayEvent, LineItem, Modal};
use crate::network;
use crate::toast::Notifier;
use crate::tracker::PendingChanges;

pub const QUIT_WARNING: &str =
    "You have pending changes in your cart. Are you sure you want to leave?";

fn spawn_update(
    rt: &Runtime,
    events: &Arc<Mutex<Vec<GatewayEvent>>>,
    base_url: &str,
    item_id: &str,
    quantity: u32,
) {
    let ev = events.clone();
    let url = base_url.to_string();
    let id = item_id.to_string();
    rt.spawn(async move {
        let outcome = network::update_quantity(&url, &id, quantity).await;
        ev.lock().unwrap().push(GatewayEvent::UpdateDone {
            item_id: id,
            quantity,
            outcome,
        });
    });
}

fn spawn_remove(
    rt: &Runtime,
    events: &Arc<Mutex<Vec<GatewayEvent>>>,
    base_url: &str,
    item_id: &str,
) {
    let ev = events.clone();
    let url = base_url.to_string();
    let id = item_id.to_string();
    rt.spawn(async move {
        let outcome = network::remove_item(&url, &id).await;
        ev.lock()
            .unwrap()
            .push(GatewayEvent::RemoveDone { item_id: id, outcome });
    });
}

fn spawn_clear(rt: &Runtime, events: &Arc<Mutex<Vec<GatewayEvent>>>, base_url: &str) {
    let ev = events.clone();
    let url = base_url.to_string();
    rt.spawn(async move {
        let outcome = network::clear_cart(&url).await;
        ev.lock().unwrap().push(GatewayEvent::ClearDone { outcome });
    });
}

fn spawn_add(
    rt: &Runtime,
    events: &Arc<Mutex<Vec<GatewayEvent>>>,
    base_url: &str,
    product_id: &str,
) {
    let ev = events.clone();
    let url = base_url.to_string();
    let id = product_id.to_string();
    rt.spawn(async move {
        let outcome = network::add_item(&url, &id, 1).await;
        ev.lock().unwrap().push(GatewayEvent::AddDone { outcome });
    });
}

pub fn spawn_fetch(rt: &Runtime, events: &Arc<Mutex<Vec<GatewayEvent>>>, base_url: &str) {
    let ev = events.clone();
    let url = base_url.to_string();
    rt.spawn(async move {
        let outcome = network::fetch_cart(&url).await;
        ev.lock().unwrap().push(GatewayEvent::SnapshotDone { outcome });
    });
}

/// Dispatches one key press. Returns Ok(false) when the app should exit.
pub fn handle_key(
    key: KeyCode,
    base_url: &str,
    items: &mut Vec<LineItem>,
    pending: &mut PendingChanges,
    selected: &mut usize,
    edit_buffer: &mut Option<String>,
    modal: &mut Modal,
    toasts: &mut Notifier,
    events: &Arc<Mutex<Vec<GatewayEvent>>>,
    rt: &Runtime,
) -> Result<bool> {
    // An open dialog swallows all keys until it is answered.
    match modal {
        Modal::AddProduct(buffer) => {
            match key {
                KeyCode::Char(c) if c.is_ascii_digit() => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Enter => {
                    let product_id = buffer.trim().to_string();
                    *modal = Modal::None;
                    if !product_id.is_empty() {
                        spawn_add(rt, events, base_url, &product_id);
                    }
                }
                KeyCode::Esc => *modal = Modal::None,
                _ => {}
            }
            return Ok(true);
        }
        Modal::RemoveItem(item_id) => {
            match key {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let id = item_id.clone();
                    *modal = Modal::None;
                    spawn_remove(rt, events, base_url, &id);
                }
                KeyCode::Char('n') | KeyCode::Esc => *modal = Modal::None,
                _ => {}
            }
            return Ok(true);
        }
        Modal::ClearCart => {
            match key {
                KeyCode::Char('y') | KeyCode::Enter => {
                    *modal = Modal::None;
                    spawn_clear(rt, events, base_url);
                }
                KeyCode::Char('n') | KeyCode::Esc => *modal = Modal::None,
                _ => {}
            }
            return Ok(true);
        }
        Modal::QuitPending => {
            match key {
                KeyCode::Char('y') | KeyCode::Enter => return Ok(false),
                KeyCode::Char('n') | KeyCode::Esc => *modal = Modal::None,
                _ => {}
            }
            return Ok(true);
        }
        Modal::None => {}
    }

    // A quantity being typed in captures digits until committed or aborted.
    if let Some(buffer) = edit_buffer {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() && buffer.len() < 4 => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let typed = buffer.clone();
                *edit_buffer = None;
                if let (Ok(quantity), Some(item)) = (typed.parse::<u32>(), items.get(*selected)) {
                    // Direct edits clamp to the minimum of 1 before proposing.
                    let id = item.item_id.clone();
                    pending.propose(items, &id, quantity.max(1));
                }
            }
            KeyCode::Esc => *edit_buffer = None,
            _ => {}
        }
        return Ok(true);
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            if *selected > 0 {
                *selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if !items.is_empty() && *selected < items.len() - 1 {
                *selected += 1;
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(item) = items.get(*selected) {
                let id = item.item_id.clone();
                let qty = item.displayed_qty + 1;
                pending.propose(items, &id, qty);
            }
        }
        KeyCode::Char('-') => {
            if let Some(item) = items.get(*selected) {
                // Decrement never drops below 1.
                if item.displayed_qty > 1 {
                    let id = item.item_id.clone();
                    let qty = item.displayed_qty - 1;
                    pending.propose(items, &id, qty);
                }
            }
        }
        KeyCode::Char('e') => {
            if items.get(*selected).is_some() {
                *edit_buffer = Some(String::new());
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if items.get(*selected).is_some() {
                *edit_buffer = Some(c.to_string());
            }
        }
        KeyCode::Enter => {
            // Confirm sends the currently displayed quantity to the server;
            // nothing changes locally until the reply comes back.
            if let Some(item) = items.get(*selected) {
                if pending.is_pending(&item.item_id) {
                    spawn_update(rt, events, base_url, &item.item_id, item.displayed_qty);
                }
            }
        }
        KeyCode::Char('u') => {
            if let Some(item) = items.get(*selected) {
                let id = item.item_id.clone();
                pending.cancel(items, &id);
            }
        }
        KeyCode::Esc => {
            if toasts.current().is_some() {
                toasts.dismiss();
            } else if let Some(item) = items.get(*selected) {
                let id = item.item_id.clone();
                pending.cancel(items, &id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(item) = items.get(*selected) {
                *modal = Modal::RemoveItem(item.item_id.clone());
            }
        }
        KeyCode::Char('C') => {
            if !items.is_empty() {
                *modal = Modal::ClearCart;
            }
        }
        KeyCode::Char('a') => {
            *modal = Modal::AddProduct(String::new());
        }
        KeyCode::Char('r') => {
            // Safe with edits outstanding: the snapshot merge re-stages them.
            spawn_fetch(rt, events, base_url);
        }
        KeyCode::Char('q') => {
            // The guard only prompts; leaving is still the user's call.
            if pending.is_empty() {
                return Ok(false);
            }
            *modal = Modal::QuitPending;
        }
        _ => {}
    }
    Ok(true)
}
