use super::common::{centered_rect, create_menu_item};
use crate::app::App;
use crate::player::PlayerService;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub fn render_quality_menu(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .margin(2)
        .split(f.area());

    let menu = app.selection.menu().clone();

    // Title with the current-value summary
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            menu.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(menu.header_text().to_string(), Style::default().fg(Color::Green)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    f.render_widget(title, chunks[0]);

    let area = centered_rect(50, 100, chunks[1]);
    if menu.hidden {
        let notice = Paragraph::new("No resolutions available for this content")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(notice, area);
    } else {
        let mut items: Vec<ListItem> = menu
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| create_menu_item(&option.label, i == app.cursor, option.is_selected))
            .collect();
        items.push(create_menu_item(
            &menu.auto_label,
            app.cursor == menu.options.len(),
            menu.auto_selected,
        ));

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", menu.title)),
        );
        f.render_stateful_widget(list, area, &mut app.list_state);
    }

    // Status
    let player = app.selection.player();
    let active = player
        .active_track()
        .map(|t| format!("track {} @ {} kbps", t.id, t.bandwidth / 1000))
        .unwrap_or_else(|| "none".to_string());
    let abr = if player.configuration().abr.enabled { "on" } else { "off" };
    let last_command = player
        .commands()
        .last()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());
    let status_text = match &app.message {
        Some(message) => Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
        None => Line::from(vec![
            Span::raw(format!("Playing {}  ABR {}  ", active, abr)),
            Span::raw(format!(
                "Network {} kbps  Locale {}",
                app.bandwidth_estimate / 1000,
                app.selection.localization().locale()
            )),
            Span::styled(
                format!("  Last command: {}", last_command),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(status, chunks[2]);

    // Help
    let help_text = Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Select  "),
        Span::styled("+/-", Style::default().fg(Color::Yellow)),
        Span::raw(" Bandwidth  "),
        Span::styled("l", Style::default().fg(Color::Yellow)),
        Span::raw(" Locale  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    f.render_widget(help, chunks[3]);
}
