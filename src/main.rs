// src/main.rs
mod config;
mod input;
mod models;
mod network;
mod sync;
mod theme;
mod toast;
mod tracker;
mod ui;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal,
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use crate::config::Settings;
use crate::models::{GatewayEvent, Modal, Severity};
use crate::theme::Theme;
use crate::toast::Notifier;
use crate::tracker::PendingChanges;

#[derive(Parser)]
#[command(name = "trolley", about = "Terminal shopping-cart client for a storefront backend")]
struct Args {
    /// Storefront base URL, overriding the configured one
    #[arg(long)]
    base_url: Option<String>,

    /// Persist --base-url into the user config
    #[arg(long, requires = "base_url")]
    save: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::new()?;
    let configured_url = args.base_url.unwrap_or(settings.base_url);
    let base_url = configured_url.trim_end_matches('/').to_string();
    if args.save {
        config::save_base_url(&base_url)?;
    }
    let dismiss_after =
        Duration::from_secs(settings.toast_secs.unwrap_or(toast::DEFAULT_DISMISS_SECS));

    let rt = Runtime::new()?;
    let mut items = Vec::new();
    let mut pending = PendingChanges::new();
    let mut toasts = Notifier::new(dismiss_after);
    let mut modal = Modal::None;
    let mut selected = 0usize;
    let mut edit_buffer: Option<String> = None;
    let theme = Theme::default();
    let events: Arc<Mutex<Vec<GatewayEvent>>> = Arc::new(Mutex::new(Vec::new()));

    // Initial page state comes from the server. A failed load is reported,
    // and the app still starts so the user can retry with 'r'.
    match rt.block_on(network::fetch_cart(&base_url)) {
        Ok(snapshot) => items = sync::load_snapshot(snapshot),
        Err(err) => toasts.notify(format!("Could not load cart: {err}"), Severity::Danger),
    }

    terminal::enable_raw_mode()?;
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        toasts.tick();

        // Apply whatever the gateway finished since the last tick. Handlers
        // no-op if their row vanished while the request was in flight.
        let finished: Vec<GatewayEvent> = events.lock().unwrap().drain(..).collect();
        let mut wants_refresh = false;
        for done in finished {
            if sync::apply_event(done, &mut items, &mut pending, &mut toasts) {
                wants_refresh = true;
            }
        }
        if wants_refresh {
            input::spawn_fetch(&rt, &events, &base_url);
        }
        if !items.is_empty() && selected >= items.len() {
            selected = items.len() - 1;
        }

        terminal.draw(|f| {
            ui::render_cart(
                f,
                &items,
                &pending,
                selected,
                edit_buffer.as_deref(),
                &modal,
                toasts.current(),
                &theme,
            );
        })?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                let keep_running = input::handle_key(
                    key_event.code,
                    &base_url,
                    &mut items,
                    &mut pending,
                    &mut selected,
                    &mut edit_buffer,
                    &mut modal,
                    &mut toasts,
                    &events,
                    &rt,
                )?;
                if !keep_running {
                    break;
                }
            }
        }
    }

    terminal::disable_raw_mode()?;
    Ok(())
}
