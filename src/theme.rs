use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub root_bg: Color,
    pub focus_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Specific components
    pub item_name: Style,
    pub unit_price: Style,
    pub quantity: Style,
    pub quantity_dirty: Style,
    pub line_total: Style,
    pub grand_total: Style,
    pub pending_badge: Style,
    pub empty_cart: Style,
    pub footer: Style,
    pub modal_title: Style,
    pub modal_border: Style,
    pub modal_text: Style,
    pub toast_success: Style,
    pub toast_danger: Style,
    pub toast_warning: Style,
    pub toast_info: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            root_bg: Color::Black,
            focus_border: Color::Cyan,
            text: Color::White,
            text_secondary: Color::Gray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::Yellow,

            item_name: Style::default().fg(Color::White),
            unit_price: Style::default().fg(Color::Magenta),
            quantity: Style::default().fg(Color::White),
            quantity_dirty: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            line_total: Style::default().fg(Color::Green),
            grand_total: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            pending_badge: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            empty_cart: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            modal_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            modal_border: Style::default().bg(Color::Black),
            modal_text: Style::default().fg(Color::White),
            toast_success: Style::default().fg(Color::Black).bg(Color::Green),
            toast_danger: Style::default().fg(Color::White).bg(Color::Red),
            toast_warning: Style::default().fg(Color::Black).bg(Color::Yellow),
            toast_info: Style::default().fg(Color::Black).bg(Color::Cyan),
        }
    }
}
