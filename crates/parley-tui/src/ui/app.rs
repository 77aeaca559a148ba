use super::{
    chat::render_chat,
    footer::{render_input, render_status},
    header::render_header,
    notice::render_notice,
};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use parley_core::{
    client::Generator,
    error::SubmitError,
    format::TERMINAL_LINE_BREAK,
    session::ChatSession,
    settings::Settings,
    theme::{Element, Theme},
    worker::{dispatch, Completion},
};
use ratatui::{
    prelude::{Constraint, CrosstermBackend, Direction, Layout, Terminal},
    widgets::{Block, Borders},
};
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

const TICK: Duration = Duration::from_millis(50);
const SCROLL_STEP: usize = 5;

pub struct App {
    should_quit: bool,
    theme: Theme,
    settings: Settings,
    session: ChatSession,
    generator: Arc<dyn Generator>,
    input: String,
    scroll_back: usize,
    /// Largest useful `scroll_back` for the transcript as last drawn.
    scroll_limit: usize,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl App {
    pub fn new(settings: Settings, generator: Arc<dyn Generator>) -> Self {
        let theme = Theme::new(settings.theme);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            theme,
            settings,
            session: ChatSession::new(TERMINAL_LINE_BREAK),
            generator,
            input: String::new(),
            scroll_back: 0,
            scroll_limit: 0,
            completions_tx,
            completions_rx,
        }
    }

    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.drain_completions();
            self.draw(terminal)?;
            self.handle_events()?;
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut scroll_limit = self.scroll_limit;
        terminal.draw(|frame| {
            let background = Block::new()
                .borders(Borders::NONE)
                .style(self.theme.ratatui_style(Element::Background));

            let area = frame.size();
            frame.render_widget(background, area);

            let app_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(1),
                    Constraint::Length(3),
                ])
                .split(area);

            render_header(frame, app_chunks[0], &self.theme, &self.settings);
            scroll_limit = render_chat(
                frame,
                app_chunks[1],
                &self.theme,
                self.session.transcript(),
                self.scroll_back,
            );
            render_status(frame, app_chunks[2], &self.theme, self.session.status());
            render_input(
                frame,
                app_chunks[3],
                &self.theme,
                &self.input,
                self.session.is_busy(),
            );

            if let Some(message) = self.session.notice() {
                render_notice(frame, &self.theme, message);
            }
        })?;
        self.set_scroll_limit(scroll_limit);
        Ok(())
    }

    /// Applies every completion the worker has posted since the last tick.
    fn drain_completions(&mut self) {
        loop {
            match self.completions_rx.try_recv() {
                Ok(Completion { id, outcome }) => {
                    if self.session.complete(id, outcome) {
                        self.scroll_back = 0;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.session.notice().is_some() {
            self.session.dismiss_notice();
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('t') if ctrl => self.toggle_theme(),
            KeyCode::PageUp => {
                self.scroll_back = (self.scroll_back + SCROLL_STEP).min(self.scroll_limit);
            }
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP),
            // Input is disabled while a request is in flight.
            _ if self.session.is_busy() => {}
            KeyCode::Enter => self.send(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
    }

    fn set_scroll_limit(&mut self, limit: usize) {
        self.scroll_limit = limit;
        self.scroll_back = self.scroll_back.min(limit);
    }

    fn send(&mut self) {
        match self.session.submit(&self.input) {
            Ok(ticket) => {
                self.input.clear();
                self.scroll_back = 0;
                dispatch(
                    Arc::clone(&self.generator),
                    ticket,
                    self.completions_tx.clone(),
                );
            }
            Err(SubmitError::EmptyPrompt) => {
                tracing::debug!("empty prompt rejected");
            }
            Err(SubmitError::Busy) => {}
        }
    }

    fn toggle_theme(&mut self) {
        self.theme.toggle();
        self.settings.theme = self.theme.variant();
        if let Err(e) = self.settings.save() {
            tracing::warn!(error = %e, "failed to persist theme choice");
        }
    }
}
