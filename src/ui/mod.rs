pub mod components;

use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::catalog;
use crate::text::mask_email;
use crate::theme::Theme;

// Load theme colors from the system once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn danger() -> Color { theme().danger }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn inactive() -> Color { theme().inactive }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(4),    // Member list
            Constraint::Length(1), // Offer prompt
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_members_box(f, app, chunks[1]);
    draw_offer_line(f, app, chunks[2]);
    draw_footer(f, chunks[3]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > signed-in context > signed-out hint
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else if let Some(ref user) = app.user {
        let mut parts = vec![format!("󰀄 {}", user.name.as_deref().unwrap_or(&user.id))];

        if let Some(dev) = &app.config.developer {
            // Known developer brands carry a logo asset for the web widget
            let branded = match catalog::developer_logo(dev) {
                Some(_) => format!("󱒃 {}", dev),
                None => format!("󱒃 {} (no logo)", dev),
            };
            parts.push(branded);
        }

        parts.push(format!("{} saved", app.cache.members().len()));

        Line::from(Span::styled(
            parts.join(" │ "),
            Style::default().fg(text_dim()),
        ))
    } else {
        Line::from(Span::styled(
            "Not signed in - run garagehub --login <user-id>",
            Style::default().fg(danger()),
        ))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_members_box(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            " Gang Members ",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    // Responsive columns based on width
    let show_email = area.width > 60;

    let header_row = if show_email {
        Row::new(vec![
            Span::styled("", Style::default().fg(header())),
            Span::styled("Name", Style::default().fg(header())),
            Span::styled("Garage", Style::default().fg(header())),
            Span::styled("Email", Style::default().fg(header())),
        ])
    } else {
        Row::new(vec![
            Span::styled("", Style::default().fg(header())),
            Span::styled("Name", Style::default().fg(header())),
            Span::styled("Garage", Style::default().fg(header())),
        ])
    };

    let members = app.cache.members();
    let rows: Vec<Row> = if members.is_empty() {
        vec![Row::new(vec![Span::styled(
            "  No saved members",
            Style::default().fg(text_dim()),
        )])]
    } else {
        members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                let icon = catalog::garage_icon(&member.member_type);
                let garage = catalog::garage_label(&member.member_type);

                let email = match &member.email {
                    Some(email) if app.config.mask_emails => mask_email(email),
                    Some(email) => email.clone(),
                    None => "-".to_string(),
                };

                let row_style = if i == app.selected_member {
                    Style::default().bg(bg_selected()).fg(text())
                } else {
                    Style::default()
                };

                if show_email {
                    Row::new(vec![
                        Span::styled(icon, Style::default().fg(accent())),
                        Span::styled(member.name.clone(), Style::default().fg(text())),
                        Span::styled(garage, Style::default().fg(text_dim())),
                        Span::styled(email, Style::default().fg(text_dim())),
                    ])
                    .style(row_style)
                } else {
                    Row::new(vec![
                        Span::styled(icon, Style::default().fg(accent())),
                        Span::styled(member.name.clone(), Style::default().fg(text())),
                        Span::styled(garage, Style::default().fg(text_dim())),
                    ])
                    .style(row_style)
                }
            })
            .collect()
    };

    let widths = if show_email {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(55),
            Constraint::Percentage(40),
        ]
    };

    let table = Table::new(rows, widths)
        .header(header_row.style(Style::default()))
        .block(block);

    f.render_widget(table, area);
}

fn draw_offer_line(f: &mut Frame, app: &App, area: Rect) {
    let Some(button) = &app.offer else {
        return;
    };
    if !button.is_visible() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    components::draw_offer_button(f, button, chunks[0]);

    // Context for the pending split: counterpart and, for shared equipment,
    // the lift type it pays for
    let offer_meta = app
        .config
        .open_splits
        .iter()
        .find(|o| o.slot == button.slot());

    if let Some(meta) = offer_meta {
        let mut context = Vec::new();
        if let Some(with) = &meta.with {
            context.push(format!("with {}", with));
        }
        if let Some(lift) = &meta.lift {
            context.push(catalog::lift_label(lift));
        }

        if !context.is_empty() {
            let line = Line::from(Span::styled(
                context.join(" · "),
                Style::default().fg(text_dim()),
            ));
            f.render_widget(Paragraph::new(line), chunks[1]);
        }
    }
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints: Vec<(&str, &str)> = vec![
        ("↑↓", "Nav"),
        ("Enter", "Claim"),
        ("R", "Refresh"),
        ("m", "Mask"),
        ("h", "Help"),
        ("q", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 90 } else { 60 },
        if area.height < 30 { 90 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "═══ Navigation ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  ↑/↓ j/k   ", Style::default().fg(accent())),
            Span::raw("Move through the member list"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Actions ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  Enter     ", Style::default().fg(accent())),
            Span::raw("Claim the pending cost-split offer"),
        ]),
        Line::from(vec![
            Span::styled("  R         ", Style::default().fg(accent())),
            Span::raw("Refresh saved members from the store"),
        ]),
        Line::from(vec![
            Span::styled("  m         ", Style::default().fg(accent())),
            Span::raw("Toggle email masking"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Quick Start ═══",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  garagehub                    ", Style::default().fg(accent())),
            Span::raw("Launch this TUI"),
        ]),
        Line::from(vec![
            Span::styled("  garagehub --login <user-id>  ", Style::default().fg(accent())),
            Span::raw("Sign in"),
        ]),
        Line::from(vec![
            Span::styled("  garagehub --status           ", Style::default().fg(accent())),
            Span::raw("Get JSON status for scripts"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("h", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(
                    " 󰋖 garagehub Help ",
                    Style::default().fg(accent()),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
