use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::ListItem,
};

/// Create a centered rectangle within a given area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Menu entry: cursor marker, plus a check mark on the highlighted choice
pub fn create_menu_item(text: &str, under_cursor: bool, chosen: bool) -> ListItem<'static> {
    let mut style = if under_cursor {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if chosen {
        style = style.fg(Color::Green);
    }

    let prefix = if under_cursor { "> " } else { "  " };
    let mark = if chosen { "  ✓" } else { "" };
    ListItem::new(format!("{}{}{}", prefix, text, mark)).style(style)
}
