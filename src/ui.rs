use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

use crate::input::QUIT_WARNING;
use crate::models::{LineItem, Modal, Severity, Toast};
use crate::sync;
use crate::theme::Theme;
use crate::tracker::PendingChanges;

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

// Width is sized from the character count, not the byte length, so server
// messages with accented or other multibyte text get a box that fits.
fn popup_width(text: &str, padding: u16, min_width: u16, max_width: u16) -> u16 {
    (text.chars().count() as u16 + padding)
        .min(max_width)
        .max(min_width)
}

fn toast_style(theme: &Theme, severity: Severity) -> Style {
    match severity {
        Severity::Success => theme.toast_success,
        Severity::Danger => theme.toast_danger,
        Severity::Warning => theme.toast_warning,
        Severity::Info => theme.toast_info,
    }
}

/// Renders the whole cart view: header with item count, the row table,
/// the grand-total bar, the key footer, and any toast or dialog on top.
pub fn render_cart(
    f: &mut Frame,
    items: &[LineItem],
    pending: &PendingChanges,
    selected: usize,
    edit_buffer: Option<&str>,
    modal: &Modal,
    toast: Option<&Toast>,
    theme: &Theme,
) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(3),    // cart table
            Constraint::Length(3), // grand total
            Constraint::Length(1), // footer
        ])
        .split(area);

    // Header with the item count, like the navbar counter on the page.
    let count = items.len();
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Trolley", Style::default().fg(theme.focus_border).add_modifier(Modifier::BOLD)),
        Span::raw("  —  shopping cart  "),
        Span::styled(
            format!("{count} item{}", if count == 1 { "" } else { "s" }),
            Style::default().fg(theme.text_secondary),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    if items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Your cart is empty", theme.empty_cart)),
            Line::from(Span::styled(
                "Add some products to continue with your purchase.",
                theme.empty_cart,
            )),
            Line::from(""),
            Line::from(Span::styled("Press 'a' to add a product by id", theme.footer)),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Cart"));
        f.render_widget(empty, chunks[1]);
    } else {
        let rows: Vec<Row> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let dirty = pending.is_pending(&item.item_id);
                let qty_cell = if i == selected {
                    if let Some(buffer) = edit_buffer {
                        Cell::from(format!("[{buffer}_]")).style(theme.quantity_dirty)
                    } else {
                        Cell::from(item.displayed_qty.to_string()).style(if dirty {
                            theme.quantity_dirty
                        } else {
                            theme.quantity
                        })
                    }
                } else {
                    Cell::from(item.displayed_qty.to_string()).style(if dirty {
                        theme.quantity_dirty
                    } else {
                        theme.quantity
                    })
                };
                // The confirm/cancel affordance is shown exactly while the
                // row's displayed quantity differs from its baseline.
                let affordance = if dirty {
                    Cell::from("✱ Enter=apply · u=discard").style(theme.pending_badge)
                } else {
                    Cell::from("")
                };
                Row::new(vec![
                    Cell::from(item.name.clone()).style(theme.item_name),
                    Cell::from(sync::format_usd(item.unit_price)).style(theme.unit_price),
                    qty_cell,
                    affordance,
                    Cell::from(item.total_text.clone()).style(theme.line_total),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(7),
                Constraint::Length(26),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["Product", "Price", "Qty", "", "Total"])
                .style(Style::default().fg(theme.text_secondary).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Cart"))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");
        let mut state = TableState::default();
        state.select(Some(selected.min(count.saturating_sub(1))));
        f.render_stateful_widget(table, chunks[1], &mut state);
    }

    // Grand total, re-derived from the line totals on screen every frame.
    let mut total_line = vec![
        Span::raw("Total: "),
        Span::styled(sync::grand_total_text(items), theme.grand_total),
    ];
    if !pending.is_empty() {
        total_line.push(Span::styled(
            format!(
                "   ({} unconfirmed change{})",
                pending.len(),
                if pending.len() == 1 { "" } else { "s" }
            ),
            theme.pending_badge,
        ));
    }
    let total_bar = Paragraph::new(Line::from(total_line))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(total_bar, chunks[2]);

    let footer = Paragraph::new(
        "↑/↓ select · +/- quantity · e edit · Enter apply · u discard · d remove · C clear · a add · r reload · q quit",
    )
    .style(theme.footer);
    f.render_widget(footer, chunks[3]);

    if let Some(toast) = toast {
        render_toast(f, toast, theme, area);
    }

    match modal {
        Modal::RemoveItem(_) => render_dialog(
            f,
            theme,
            area,
            "Remove item",
            "Remove this item from your cart?",
            "y = remove · n = keep",
        ),
        Modal::ClearCart => render_dialog(
            f,
            theme,
            area,
            "Empty cart",
            "Remove all items from your cart?",
            "y = empty · n = keep",
        ),
        Modal::QuitPending => render_dialog(
            f,
            theme,
            area,
            "Unconfirmed changes",
            QUIT_WARNING,
            "y = leave · n = stay",
        ),
        Modal::AddProduct(buffer) => render_dialog(
            f,
            theme,
            area,
            "Add product",
            &format!("Product id: {buffer}_"),
            "Enter = add · Esc = cancel",
        ),
        Modal::None => {}
    }
}

fn render_toast(f: &mut Frame, toast: &Toast, theme: &Theme, area: Rect) {
    let width = popup_width(&toast.message, 4, 10, area.width.saturating_sub(2));
    let rect = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 3,
    };
    f.render_widget(Clear, rect);
    let body = Paragraph::new(toast.message.clone())
        .style(toast_style(theme, toast.severity))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(body, rect);
}

fn render_dialog(f: &mut Frame, theme: &Theme, area: Rect, title: &str, text: &str, keys: &str) {
    let width = popup_width(text, 6, 30, area.width.saturating_sub(4));
    let rect = centered_rect(width, 6, area);
    f.render_widget(Clear, rect);
    let body = Paragraph::new(vec![
        Line::from(Span::styled(text.to_string(), theme.modal_text)),
        Line::from(""),
        Line::from(Span::styled(keys.to_string(), theme.footer)),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(format!(" {title} "), theme.modal_title))
            .borders(Borders::ALL)
            .style(theme.modal_border),
    );
    f.render_widget(body, rect);
}
