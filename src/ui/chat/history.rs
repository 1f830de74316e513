//! The chat window's message log and its rendering.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::events::{ChatMessage, Sender};
use crate::format::{format_time, parse_markup, Segment};

const WELCOME: &[&str] = &[
    "✨ Hello! I'm your OrbitX AI Assistant",
    "",
    "I'm here to help you with:",
    "  🎨 Design Projects    💰 Instant Quotes",
    "  📁 Portfolio Showcase 🚀 Project Launch",
    "",
    "What creative project can I help you with today?",
];

/// Messages in display order.
///
/// Loaded history always sits before anything sent in this run, whichever
/// arrives first.
#[derive(Debug, Clone)]
pub struct MessageLog {
    history: Vec<ChatMessage>,
    live: Vec<ChatMessage>,
    show_welcome: bool,
    /// Lines scrolled up from the bottom
    scroll_back: u16,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            live: Vec::new(),
            show_welcome: true,
            scroll_back: 0,
        }
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.live.push(message);
        self.scroll_back = 0;
    }

    /// Replace the welcome message with previously stored messages
    pub fn load_history(&mut self, messages: Vec<ChatMessage>) {
        self.show_welcome = false;
        self.history = messages;
    }

    pub fn shows_welcome(&self) -> bool {
        self.show_welcome
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter().chain(self.live.iter())
    }

    pub fn len(&self) -> usize {
        self.history.len() + self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if self.show_welcome {
            for (i, text) in WELCOME.iter().enumerate() {
                let style = if i == 0 {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(Span::styled(*text, style)));
            }
            lines.push(Line::default());
        }

        for message in self.messages() {
            lines.extend(render_message(message));
            lines.push(Line::default());
        }
        lines
    }
}

fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default().fg(Color::Magenta),
    }
}

fn render_message(message: &ChatMessage) -> Vec<Line<'static>> {
    let header = Line::from(vec![
        Span::styled(
            message.sender.display_name(),
            sender_style(message.sender).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", format_time(&message.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let mut lines = vec![header];
    for segments in parse_markup(&message.text) {
        let mut spans = vec![Span::raw("  ")];
        spans.extend(segments.into_iter().map(segment_span));
        lines.push(Line::from(spans));
    }
    lines
}

fn segment_span(segment: Segment) -> Span<'static> {
    let mut style = Style::default();
    if segment.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if segment.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    Span::styled(segment.text, style)
}

/// Rows `lines` take when wrapped at `width`; word wrapping may need a few more
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

impl Widget for &MessageLog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::NONE);
        let inner = block.inner(area);

        let lines = self.lines();
        let total = wrapped_height(&lines, inner.width);
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });

        // Pin to the bottom, minus however far the user scrolled up
        let bottom = total.saturating_sub(inner.height);
        let offset = bottom.saturating_sub(self.scroll_back);
        paragraph.scroll((offset, 0)).render(area, buf);
    }
}
