//! Ratatui document browser.
//!
//! Key events become controller [`Event`]s. AI effects run on worker threads
//! and push their resolution into a [`sink::CompletionSink`] that the loop
//! drains before every frame, so the UI never blocks on the network.

pub mod sink;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};
use miette::IntoDiagnostic;

use crate::controller::{Browser, Effect, Event};
use crate::gateway::AiGateway;
use crate::model::CategoryFilter;
use widgets::{InputMode, Screen};

/// TUI application state.
pub struct LuminaTui {
    browser: Browser,
    gateway: Arc<AiGateway>,
    sink: Arc<sink::CompletionSink>,
    mode: InputMode,
    cursor: usize,
    sidebar_cursor: usize,
    topic: String,
    notice: Option<String>,
    should_quit: bool,
}

impl LuminaTui {
    pub fn new(mut browser: Browser, gateway: Arc<AiGateway>) -> Self {
        browser.refresh();
        Self {
            browser,
            gateway,
            sink: Arc::new(sink::CompletionSink::new()),
            mode: InputMode::Browse,
            cursor: 0,
            sidebar_cursor: 0,
            topic: String::new(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Run the TUI event loop.
    pub fn run(&mut self) -> miette::Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> miette::Result<()> {
        loop {
            self.drain_completions();

            terminal
                .draw(|frame| {
                    widgets::render(
                        frame,
                        &Screen {
                            browser: &self.browser,
                            mode: self.mode,
                            cursor: self.cursor,
                            sidebar_cursor: self.sidebar_cursor,
                            topic: &self.topic,
                            notice: self.notice.as_deref(),
                        },
                    );
                })
                .into_diagnostic()?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(Duration::from_millis(100)).into_diagnostic()? {
                if let TermEvent::Key(key) = event::read().into_diagnostic()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }
    }

    /// Apply resolution events pushed by AI workers.
    fn drain_completions(&mut self) {
        for event in self.sink.drain() {
            self.apply(event);
        }
    }

    /// Dispatch an event; run any resulting effect on a worker thread.
    fn apply(&mut self, event: Event) {
        match self.browser.dispatch(event) {
            Ok(Some(effect)) => self.spawn(effect),
            Ok(None) => {}
            Err(e) => self.notice = Some(e.to_string()),
        }
        self.clamp_cursor();
    }

    fn spawn(&self, effect: Effect) {
        let gateway = Arc::clone(&self.gateway);
        let sink = Arc::clone(&self.sink);
        std::thread::spawn(move || sink.push(effect.run(&gateway)));
    }

    fn visible_len(&self) -> usize {
        self.browser.visible().map(|v| v.len()).unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible_len().saturating_sub(1));
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.notice = None;

        if self.browser.state().selected().is_some() {
            self.handle_viewer_key(code);
            return;
        }

        match self.mode {
            InputMode::Browse => self.handle_browse_key(code),
            InputMode::Search => self.handle_search_key(code),
            InputMode::Sidebar => self.handle_sidebar_key(code),
            InputMode::Topic => self.handle_topic_key(code),
        }
    }

    fn handle_viewer_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.apply(Event::CloseViewer),
            KeyCode::Char('s') => self.apply(Event::Summarize),
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(self.visible_len().saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.visible_len().saturating_sub(1),
            KeyCode::Enter => {
                let id = self
                    .browser
                    .visible()
                    .and_then(|v| v.get(self.cursor).map(|d| d.id.clone()));
                if let Some(id) = id {
                    self.apply(Event::Select(id));
                }
            }
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('c') | KeyCode::Tab => {
                let active = self.browser.state().category();
                self.sidebar_cursor = CategoryFilter::choices()
                    .iter()
                    .position(|c| *c == active)
                    .unwrap_or(0);
                self.apply(Event::ToggleSidebar);
                self.mode = InputMode::Sidebar;
            }
            KeyCode::Char('g') if self.browser.state().roadmap_panel_visible() => {
                self.mode = InputMode::Topic;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let mut search = self.browser.state().search().to_string();
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.mode = InputMode::Browse;
                return;
            }
            KeyCode::Char(c) => search.push(c),
            KeyCode::Backspace => {
                search.pop();
            }
            _ => return,
        }
        self.apply(Event::SetSearch(search));
    }

    fn handle_sidebar_key(&mut self, code: KeyCode) {
        let choices = CategoryFilter::choices();
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.sidebar_cursor = (self.sidebar_cursor + 1).min(choices.len() - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let choice = choices[self.sidebar_cursor.min(choices.len() - 1)];
                self.cursor = 0;
                self.apply(Event::SetCategory(choice));
                self.mode = InputMode::Browse;
            }
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Tab => {
                self.apply(Event::CloseSidebar);
                self.mode = InputMode::Browse;
            }
            _ => {}
        }
    }

    fn handle_topic_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = InputMode::Browse,
            KeyCode::Enter => {
                self.mode = InputMode::Browse;
                self.apply(Event::GenerateRoadmap {
                    topic: self.topic.clone(),
                });
            }
            KeyCode::Char(c) => self.topic.push(c),
            KeyCode::Backspace => {
                self.topic.pop();
            }
            _ => {}
        }
    }
}
