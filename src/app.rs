//! Interactive dashboard: key handling and the terminal event loop.
//!
//! Keys:
//! - `Tab` / `Shift+Tab`: move focus between the two filters and the news list
//! - `↑`/`k`, `↓`/`j`: move inside the focused panel
//! - `Enter`: pick the highlighted filter value, or expand/collapse an article
//! - `f`: fetch the latest news
//! - `o`: open the highlighted article in the browser
//! - `?`: help, `q`/`Esc`: quit

use crate::config::Config;
use crate::desk::NewsDesk;
use crate::market::{Segment, Timeframe};
use crate::ui;
use crate::ui::widgets::news::NewsWidget;
use crate::ui::widgets::selector::SelectorWidget;
use crate::ui::widgets::{FeedWidget, SelectedItem};
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Segment,
    Timeframe,
    News,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Segment => Focus::Timeframe,
            Focus::Timeframe => Focus::News,
            Focus::News => Focus::Segment,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Segment => Focus::News,
            Focus::Timeframe => Focus::Segment,
            Focus::News => Focus::Timeframe,
        }
    }
}

/// Work a key press asks for that goes through the news desk or the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Fetch,
    ChooseSegment(Segment),
    ChooseTimeframe(Timeframe),
    Open(SelectedItem),
}

pub struct App {
    pub desk: NewsDesk,
    pub segment_picker: SelectorWidget<Segment>,
    pub timeframe_picker: SelectorWidget<Timeframe>,
    pub news: NewsWidget,
    pub focus: Focus,
    pub show_help: bool,
    pub should_quit: bool,
    pub status: Option<String>,
    tick_rate: Duration,
}

impl App {
    pub fn new(config: &Config, desk: NewsDesk) -> Self {
        let selection = desk.selection();
        let mut app = Self {
            desk,
            segment_picker: SelectorWidget::new("Market Segment", &Segment::ALL, selection.segment),
            timeframe_picker: SelectorWidget::new("Timeframe", &Timeframe::ALL, selection.timeframe),
            news: NewsWidget::new(),
            focus: Focus::Segment,
            show_help: false,
            should_quit: false,
            status: None,
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms.max(10)),
        };
        app.apply_focus();
        app
    }

    fn apply_focus(&mut self) {
        self.segment_picker.set_selected(self.focus == Focus::Segment);
        self.timeframe_picker
            .set_selected(self.focus == Focus::Timeframe);
        self.news.set_selected(self.focus == Focus::News);
    }

    fn focused_widget(&mut self) -> &mut dyn FeedWidget {
        match self.focus {
            Focus::Segment => &mut self.segment_picker,
            Focus::Timeframe => &mut self.timeframe_picker,
            Focus::News => &mut self.news,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        self.status = None;

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                self.apply_focus();
            }
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus = self.focus.previous();
                self.apply_focus();
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                self.apply_focus();
            }
            KeyCode::Up | KeyCode::Char('k') => self.focused_widget().scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.focused_widget().scroll_down(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Segment => return self.segment_picker.commit().map(Command::ChooseSegment),
                Focus::Timeframe => {
                    return self
                        .timeframe_picker
                        .commit()
                        .map(Command::ChooseTimeframe)
                }
                Focus::News => self.news.toggle_expanded(),
            },
            KeyCode::Char('f') | KeyCode::Char('r') | KeyCode::F(5) => {
                return Some(Command::Fetch);
            }
            KeyCode::Char('o') => {
                return self
                    .news
                    .get_selected_item()
                    .filter(|item| item.url.is_some())
                    .map(Command::Open);
            }
            _ => {}
        }

        None
    }

    /// Whether running `command` will hit the fetcher, so a loading state is worth drawing first.
    pub fn will_fetch(&self, command: &Command) -> bool {
        let selection = self.desk.selection();
        match command {
            Command::Fetch => true,
            Command::Refresh => selection.fetch_requested,
            Command::ChooseSegment(segment) => {
                selection.fetch_requested && *segment != selection.segment
            }
            Command::ChooseTimeframe(timeframe) => {
                selection.fetch_requested && *timeframe != selection.timeframe
            }
            Command::Open(_) => false,
        }
    }

    pub async fn apply(&mut self, command: Command, now: DateTime<Utc>) {
        let view = match command {
            Command::Refresh => self.desk.refresh(now).await,
            Command::Fetch => self.desk.request_fetch(now).await,
            Command::ChooseSegment(segment) => {
                self.segment_picker.set_chosen(segment);
                self.desk.select_segment(segment, now).await
            }
            Command::ChooseTimeframe(timeframe) => {
                self.timeframe_picker.set_chosen(timeframe);
                self.desk.select_timeframe(timeframe, now).await
            }
            Command::Open(item) => {
                let Some(url) = item.url else {
                    return;
                };
                self.status = Some(match open::that(&url) {
                    Ok(()) => {
                        tracing::info!(%url, "opened article");
                        format!("Opened {}", item.title)
                    }
                    Err(e) => {
                        tracing::warn!(%url, error = %e, "failed to open article");
                        format!("Failed to open {}: {}", url, e)
                    }
                });
                return;
            }
        };
        self.news.show(view);
    }

    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn execute(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        command: Command,
    ) -> Result<()> {
        if self.will_fetch(&command) {
            let segment = match command {
                Command::ChooseSegment(segment) => segment,
                _ => self.desk.selection().segment,
            };
            self.news.set_loading(segment);
            terminal.draw(|frame| ui::draw(frame, self))?;
        }
        self.apply(command, Utc::now()).await;
        Ok(())
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        tracing::info!("dashboard started");
        self.execute(terminal, Command::Refresh).await?;

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(command) = self.handle_key(key) {
                        self.execute(terminal, command).await?;
                    }
                }
            }

            if self.should_quit {
                tracing::info!(cache = ?self.desk.cache_stats(), "dashboard closed");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ArticleCache;
    use crate::desk::View;
    use crate::feeds::mock::MockNewsFetcher;
    use crate::session::Selection;
    use chrono::{NaiveDate, TimeZone};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn app(fetch_on_load: bool) -> App {
        let selection = Selection::new(Segment::LargeCapFno, Timeframe::LastOneMonth, fetch_on_load);
        let desk = NewsDesk::new(
            selection,
            Box::new(MockNewsFetcher::new(NaiveDate::from_ymd_opt(2024, 1, 15))),
            ArticleCache::new(chrono::Duration::hours(1)),
        );
        App::new(&Config::default(), desk)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(true);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), None);
        assert!(app.should_quit);

        let mut app = self::app(true);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app(true);
        assert_eq!(app.focus, Focus::Segment);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Timeframe);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::News);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Segment);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus, Focus::News);
    }

    #[test]
    fn test_enter_on_segment_picker_chooses_highlighted() {
        let mut app = app(true);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Some(Command::ChooseSegment(Segment::MidCapFno))
        );
    }

    #[test]
    fn test_enter_on_timeframe_picker_chooses_highlighted() {
        let mut app = app(true);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(
            app.handle_key(key(KeyCode::Enter)),
            Some(Command::ChooseTimeframe(Timeframe::LastOneWeek))
        );
    }

    #[test]
    fn test_fetch_key() {
        let mut app = app(false);
        assert_eq!(app.handle_key(key(KeyCode::Char('f'))), Some(Command::Fetch));
    }

    #[test]
    fn test_help_swallows_keys_until_closed() {
        let mut app = app(true);
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        assert_eq!(app.handle_key(key(KeyCode::Char('f'))), None);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_initial_refresh_fills_news() {
        let mut app = app(true);
        app.apply(Command::Refresh, now()).await;
        assert_eq!(app.news.articles().len(), 5);
        assert!(matches!(app.desk.view(), View::Showing { .. }));
    }

    #[tokio::test]
    async fn test_idle_until_fetch() {
        let mut app = app(false);
        assert!(!app.will_fetch(&Command::Refresh));
        app.apply(Command::Refresh, now()).await;
        assert!(app.news.articles().is_empty());

        assert!(!app.will_fetch(&Command::ChooseSegment(Segment::AllFno)));
        app.apply(Command::ChooseSegment(Segment::AllFno), now()).await;
        assert!(app.news.articles().is_empty());
        assert_eq!(app.segment_picker.chosen(), Some(Segment::AllFno));

        app.apply(Command::Fetch, now()).await;
        assert_eq!(app.news.articles().len(), 5);
        assert!(app.news.articles()[0].title.starts_with("(All FNO)"));
    }

    #[tokio::test]
    async fn test_choosing_timeframe_refreshes_list() {
        let mut app = app(true);
        app.apply(Command::Refresh, now()).await;

        assert!(app.will_fetch(&Command::ChooseTimeframe(Timeframe::LastOneWeek)));
        app.apply(Command::ChooseTimeframe(Timeframe::LastOneWeek), now())
            .await;
        assert_eq!(app.news.title(), "News for Large Cap FNO (Last One Week)");
    }

    #[tokio::test]
    async fn test_open_key_targets_highlighted_article() {
        let mut app = app(true);
        app.apply(Command::Refresh, now()).await;
        app.focus = Focus::News;
        app.apply_focus();
        app.handle_key(key(KeyCode::Down));
        match app.handle_key(key(KeyCode::Char('o'))) {
            Some(Command::Open(item)) => {
                assert_eq!(item.url.as_deref(), Some("https://mock-news.com/large-cap-fno-4"));
                assert_eq!(item.title, "(Large Cap FNO) Market Update: Nifty 50 Shows Volatility 4");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_open_key_without_articles_does_nothing() {
        let mut app = app(false);
        app.focus = Focus::News;
        app.apply_focus();
        assert_eq!(app.handle_key(key(KeyCode::Char('o'))), None);
    }
}
