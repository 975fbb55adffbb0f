use crate::desk::View;
use crate::feeds::Article;
use crate::market::Segment;
use crate::ui::widgets::{FeedWidget, SelectedItem};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const IDLE_HINT: &str = "Press f to fetch the latest news.";

/// Article list where each entry expands to show its summary and link.
pub struct NewsWidget {
    heading: String,
    articles: Vec<Article>,
    loading: Option<String>,
    idle: bool,
    error: Option<String>,
    empty_message: Option<String>,
    expanded: Option<usize>,
    scroll_state: ListState,
    selected: bool,
}

impl Default for NewsWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsWidget {
    pub fn new() -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            heading: "News".to_string(),
            articles: Vec::new(),
            loading: None,
            idle: true,
            error: None,
            empty_message: None,
            expanded: None,
            scroll_state,
            selected: false,
        }
    }

    pub fn set_loading(&mut self, segment: Segment) {
        self.loading = Some(format!("Searching for news on {}...", segment));
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn show(&mut self, view: &View) {
        self.loading = None;
        self.idle = false;
        self.error = None;
        self.empty_message = None;
        self.expanded = None;
        self.scroll_state.select(Some(0));

        match view {
            View::Idle => {
                self.idle = true;
                self.heading = "News".to_string();
                self.articles.clear();
            }
            View::Showing { heading, articles } => {
                self.heading = heading.clone();
                self.articles = articles.clone();
            }
            View::NoResults { message } => {
                self.articles.clear();
                self.empty_message = Some(message.clone());
            }
            View::Failed(e) => {
                self.heading = "News".to_string();
                self.articles.clear();
                self.error = Some(e.clone());
            }
        }
    }

    pub fn toggle_expanded(&mut self) {
        let Some(idx) = self.scroll_state.selected() else {
            return;
        };
        if idx >= self.articles.len() {
            return;
        }
        self.expanded = if self.expanded == Some(idx) {
            None
        } else {
            Some(idx)
        };
    }

    fn article_item<'a>(&self, i: usize, article: &'a Article, wrap_width: usize) -> ListItem<'a> {
        let is_expanded = self.expanded == Some(i);
        let marker = if is_expanded { "▼ " } else { "▶ " };

        let mut lines = vec![Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::DarkGray)),
            Span::styled(
                article.title.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    " - ({} | {})",
                    article.source,
                    article.date.format("%b %d, %Y")
                ),
                Style::default().fg(Color::Cyan),
            ),
        ])];

        if is_expanded {
            for row in textwrap::wrap(&article.summary, wrap_width) {
                lines.push(Line::from(Span::styled(
                    format!("   {}", row),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(
                    "   Read Full Article: ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    article.url.as_str(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
            lines.push(Line::from(""));
        }

        ListItem::new(lines)
    }
}

impl FeedWidget for NewsWidget {
    fn title(&self) -> &str {
        &self.heading
    }

    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let selected = selected || self.selected;
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .title(format!(" {} ", self.heading))
            .borders(Borders::ALL)
            .border_style(border_style);

        if let Some(ref loading) = self.loading {
            if self.articles.is_empty() {
                let loading_text = List::new(vec![ListItem::new(loading.as_str())]).block(block);
                frame.render_widget(loading_text, area);
                return;
            }
        }

        if let Some(ref error) = self.error {
            let error_text = List::new(vec![ListItem::new(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            ))])
            .block(block);
            frame.render_widget(error_text, area);
            return;
        }

        if self.idle {
            let idle_text = List::new(vec![ListItem::new(IDLE_HINT)]).block(block);
            frame.render_widget(idle_text, area);
            return;
        }

        if let Some(ref message) = self.empty_message {
            let empty_text = List::new(vec![ListItem::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Blue),
            ))])
            .block(block);
            frame.render_widget(empty_text, area);
            return;
        }

        let wrap_width = (area.width as usize).saturating_sub(6).max(20);
        let items: Vec<ListItem> = self
            .articles
            .iter()
            .enumerate()
            .map(|(i, article)| self.article_item(i, article, wrap_width))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

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
            if selected < self.articles.len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn get_selected_item(&self) -> Option<SelectedItem> {
        let idx = self.scroll_state.selected()?;
        let article = self.articles.get(idx)?;

        Some(SelectedItem {
            title: article.title.clone(),
            url: Some(article.url.clone()),
            source: article.source.clone(),
            metadata: Some(article.date.format("%Y-%m-%d").to_string()),
        })
    }
}
