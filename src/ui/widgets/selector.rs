use crate::ui::widgets::FeedWidget;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use std::fmt::Display;

/// Single-choice list over a closed option set.
///
/// The cursor moves freely; the chosen value only changes on [`commit`](Self::commit).
pub struct SelectorWidget<T> {
    title: String,
    options: Vec<T>,
    chosen: usize,
    scroll_state: ListState,
    selected: bool,
}

impl<T: Copy + PartialEq + Display> SelectorWidget<T> {
    pub fn new(title: impl Into<String>, options: &[T], chosen: T) -> Self {
        let chosen = options.iter().position(|o| *o == chosen).unwrap_or(0);
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(chosen));

        Self {
            title: title.into(),
            options: options.to_vec(),
            chosen,
            scroll_state,
            selected: false,
        }
    }

    pub fn chosen(&self) -> Option<T> {
        self.options.get(self.chosen).copied()
    }

    pub fn highlighted(&self) -> Option<T> {
        self.scroll_state
            .selected()
            .and_then(|i| self.options.get(i))
            .copied()
    }

    /// The highlighted option, when it differs from the chosen one.
    pub fn pending(&self) -> Option<T> {
        self.highlighted().filter(|value| Some(*value) != self.chosen())
    }

    /// Make the highlighted option the chosen one.
    pub fn commit(&mut self) -> Option<T> {
        let value = self.highlighted()?;
        self.set_chosen(value);
        Some(value)
    }

    pub fn set_chosen(&mut self, value: T) {
        if let Some(idx) = self.options.iter().position(|o| *o == value) {
            self.chosen = idx;
            self.scroll_state.select(Some(idx));
        }
    }
}

impl<T: Copy + PartialEq + Display> FeedWidget for SelectorWidget<T> {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let selected = selected || self.selected;
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(border_style);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let (marker, style) = if i == self.chosen {
                    (
                        "● ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("○ ", Style::default().fg(Color::Gray))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(option.to_string(), style),
                ]))
            })
            .collect();

        let mut list = List::new(items).block(block);
        if selected {
            list = list.highlight_style(Style::default().bg(Color::DarkGray));
        }

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    fn scroll_down(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < self.options.len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
