pub mod widgets;

use crate::app::{App, Focus};
use crate::desk::View;
use crate::report::LOADED_MESSAGE;
use crate::ui::widgets::FeedWidget;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const PAGE_TITLE: &str = "Indian Market News Aggregator";
const SUBTITLE: &str =
    "Use the filters on the left to track FNO, Midcap, Smallcap, and Largecap news over different time periods.";
const FOOTER: &str = "Developed with ratatui for Financial Data Aggregation";
const SIDEBAR_WIDTH: u16 = 32;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    draw_sidebar(frame, body[0], app);
    app.news.render(frame, body[1], app.focus == Focus::News);

    draw_status(frame, chunks[2], app);

    let footer = Paragraph::new(Span::styled(FOOTER, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);

    if app.show_help {
        draw_help(frame, frame.area());
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            PAGE_TITLE,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    let header = Paragraph::new(text).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let outer = Block::default()
        .title(" News Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(inner);

    app.segment_picker
        .render(frame, chunks[0], app.focus == Focus::Segment);
    app.timeframe_picker
        .render(frame, chunks[1], app.focus == Focus::Timeframe);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let action = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("f", key_style),
            Span::raw("  Fetch Latest News"),
        ]),
        Line::from(vec![
            Span::styled("Enter", key_style),
            Span::raw("  Apply / expand"),
        ]),
        Line::from(vec![
            Span::styled("o", key_style),
            Span::raw("  Open article"),
        ]),
        Line::from(vec![Span::styled("?", key_style), Span::raw("  Help")]),
    ])
    .block(Block::default().title(" Action ").borders(Borders::ALL));
    frame.render_widget(action, chunks[2]);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let hint = Style::default().fg(Color::DarkGray);
    let pending = match app.focus {
        Focus::Segment => app.segment_picker.pending().map(|s| s.to_string()),
        Focus::Timeframe => app.timeframe_picker.pending().map(|t| t.to_string()),
        Focus::News => None,
    };

    let line = if let Some(ref status) = app.status {
        Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Yellow)))
    } else if app.news.is_loading() {
        Line::from(Span::styled("Loading...", hint))
    } else if let Some(value) = pending {
        Line::from(Span::styled(format!("Press Enter to apply {}", value), hint))
    } else {
        match app.desk.view() {
            View::Showing { .. } => {
                let mut spans = vec![Span::styled(LOADED_MESSAGE, Style::default().fg(Color::Green))];
                if app.focus == Focus::News {
                    if let Some(item) = app.news.get_selected_item() {
                        let mut meta = item.source;
                        if let Some(date) = item.metadata {
                            meta = format!("{} | {}", meta, date);
                        }
                        spans.push(Span::styled(format!("  {}", meta), hint));
                    }
                }
                Line::from(spans)
            }
            _ => Line::default(),
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let popup = center_rect(60, 50, area);
    let text = vec![
        Line::from("Tab / Shift+Tab   move focus"),
        Line::from("Up/k, Down/j      move in panel"),
        Line::from("Enter             apply filter / expand article"),
        Line::from("f                 fetch latest news"),
        Line::from("o                 open highlighted article"),
        Line::from("?                 toggle this help"),
        Line::from("q / Esc           quit"),
    ];
    let help = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn center_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
