use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use std::time::{Duration, Instant};

const DOT_STEP: Duration = Duration::from_millis(300);

/// Animated "… is thinking" line shown while a reply is pending
#[derive(Debug, Clone)]
pub struct TypingIndicator {
    name: String,
    since: Option<Instant>,
}

impl TypingIndicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            since: None,
        }
    }

    pub fn show(&mut self, now: Instant) {
        self.since = Some(now);
    }

    pub fn hide(&mut self) {
        self.since = None;
    }

    pub fn is_visible(&self) -> bool {
        self.since.is_some()
    }

    fn dots(&self, now: Instant) -> &'static str {
        let Some(since) = self.since else {
            return "";
        };
        let step = now.duration_since(since).as_millis() / DOT_STEP.as_millis();
        match step % 4 {
            0 => ".",
            1 => "..",
            2 => "...",
            _ => "   ",
        }
    }

    pub fn line(&self, now: Instant) -> Line<'static> {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Magenta)),
            Span::styled(format!("{} is thinking", self.name), Style::default().fg(Color::Gray)),
            Span::styled(self.dots(now), Style::default().fg(Color::Yellow)),
        ])
    }
}

impl Widget for &TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.is_visible() && area.height > 0 {
            buf.set_line(area.x, area.y, &self.line(Instant::now()), area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_cycle_while_visible() {
        let start = Instant::now();
        let mut indicator = TypingIndicator::new("OrbitX AI");
        assert_eq!(indicator.dots(start), "");

        indicator.show(start);
        assert_eq!(indicator.dots(start), ".");
        assert_eq!(indicator.dots(start + Duration::from_millis(650)), "...");
        assert_eq!(indicator.line(start).spans[1].content, "OrbitX AI is thinking");

        indicator.hide();
        assert!(!indicator.is_visible());
    }
}
