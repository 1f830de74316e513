//! Terminal lifecycle and the main event loop.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use super::chat::ChatController;
use super::page::{PageFocus, SitePage};
use crate::config::Config;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")
}

/// Leave the alternate screen; safe to call more than once
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

enum Input {
    Terminal(Option<io::Result<Event>>),
    Chat,
    Tick,
}

pub struct App {
    page: SitePage,
    chat: ChatController,
    tick_rate: Duration,
    running: bool,
}

impl App {
    pub fn new(config: &Config, chat: ChatController) -> Self {
        Self {
            page: SitePage::new(&config.page, Instant::now()),
            chat,
            tick_rate: config.tick_rate(),
            running: true,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.tick_rate);

        if let Ok(size) = terminal.size() {
            self.page.resize(size.height, Instant::now());
        }
        self.chat.start();

        while self.running {
            terminal.draw(|frame| {
                let area = frame.size();
                frame.render_widget(&self.page, area);
                frame.render_widget(&self.chat, area);
            })?;

            let input = tokio::select! {
                maybe_event = events.next() => Input::Terminal(maybe_event),
                _ = self.chat.next_event() => Input::Chat,
                _ = ticker.tick() => Input::Tick,
            };

            match input {
                Input::Terminal(Some(Ok(event))) => self.handle_event(event),
                Input::Terminal(Some(Err(e))) => return Err(e).context("Failed to read terminal event"),
                Input::Terminal(None) => self.running = false,
                Input::Chat => {}
                Input::Tick => self.page.update(Instant::now()),
            }

            self.chat.process_pending_events();
        }

        tracing::info!("leaving terminal UI");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(_, rows) => self.page.resize(rows, Instant::now()),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.running = false;
                return;
            }
            KeyCode::Char('t') if ctrl => {
                self.chat.toggle_chat();
                return;
            }
            _ => {}
        }

        if self.chat.is_open() {
            self.chat.handle_key(key);
        } else if !self.page.handle_key(key, Instant::now())
            && self.page.focus() == PageFocus::Browse
        {
            match key.code {
                KeyCode::Char('c') => self.chat.toggle_chat(),
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                _ => {}
            }
        }
    }
}
