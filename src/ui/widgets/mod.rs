pub mod news;
pub mod selector;

use ratatui::{layout::Rect, Frame};

/// Details of the highlighted entry in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    pub title: String,
    pub url: Option<String>,
    pub source: String,
    pub metadata: Option<String>,
}

pub trait FeedWidget {
    fn title(&self) -> &str;
    fn render(&self, frame: &mut Frame, area: Rect, selected: bool);
    fn scroll_up(&mut self);
    fn scroll_down(&mut self);
    fn set_selected(&mut self, selected: bool);

    fn get_selected_item(&self) -> Option<SelectedItem> {
        None
    }
}
