//! Time-driven text animations: the hero typewriter and stat counters.

use std::time::{Duration, Instant};

pub const DEFAULT_TYPING_SPEED: Duration = Duration::from_millis(100);
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
pub const COUNTER_FRAME: Duration = Duration::from_millis(16);

/// Reveals text one character every `speed`, starting after `delay`
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    speed: Duration,
    delay: Duration,
    started: Instant,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, speed: Duration, delay: Duration, now: Instant) -> Self {
        Self {
            text: text.into(),
            // zero falls back to the default, as an unparsable speed does on the page
            speed: if speed.is_zero() { DEFAULT_TYPING_SPEED } else { speed },
            delay,
            started: now,
        }
    }

    fn typed_chars(&self, now: Instant) -> usize {
        let Some(elapsed) = now.duration_since(self.started).checked_sub(self.delay) else {
            return 0;
        };
        // The first character appears as soon as the delay ends
        let steps = 1 + elapsed.as_millis() / self.speed.as_millis();
        steps.min(self.text.chars().count() as u128) as usize
    }

    /// Text visible at `now`
    pub fn visible(&self, now: Instant) -> &str {
        let count = self.typed_chars(now);
        match self.text.char_indices().nth(count) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Completion is marked one step after the last character
    pub fn is_complete(&self, now: Instant) -> bool {
        let total = self.speed * self.text.chars().count() as u32 + self.delay;
        now.duration_since(self.started) >= total
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }
}

/// Counts a stat like `"1,200+"` up from zero
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    prefix: String,
    suffix: String,
    target: u64,
    increment: f64,
    started: Instant,
}

impl CounterAnimation {
    /// Parse `prefix digits suffix`; `None` when there is nothing to count
    pub fn parse(text: &str, duration: Duration, now: Instant) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok().filter(|&n| n > 0)?;

        let prefix: String = text.chars().take_while(|c| !c.is_ascii_digit()).collect();
        let suffix: String = text
            .chars()
            .rev()
            .take_while(|c| !c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        let frames = (duration.as_millis() as f64 / COUNTER_FRAME.as_millis() as f64).max(1.0);
        Some(Self {
            prefix,
            suffix,
            target,
            increment: target as f64 / frames,
            started: now,
        })
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    fn current(&self, now: Instant) -> f64 {
        let frames = now.duration_since(self.started).as_millis() / COUNTER_FRAME.as_millis();
        frames as f64 * self.increment
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.current(now) >= self.target as f64
    }

    /// Text shown at `now`
    pub fn display(&self, now: Instant) -> String {
        let value = if self.is_complete(now) {
            self.target
        } else {
            self.current(now).floor() as u64
        };
        format!("{}{}{}", self.prefix, group_thousands(value), self.suffix)
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typewriter_reveals_after_delay() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let typer = Typewriter::new("Design", ms(100), ms(500), start);

        assert_eq!(typer.visible(start + ms(499)), "");
        assert_eq!(typer.visible(start + ms(500)), "D");
        assert_eq!(typer.visible(start + ms(750)), "Des");
        assert_eq!(typer.visible(start + ms(5000)), "Design");

        assert!(!typer.is_complete(start + ms(1099)));
        assert!(typer.is_complete(start + ms(1100)));
    }

    #[test]
    fn typewriter_handles_multibyte_text() {
        let start = Instant::now();
        let typer = Typewriter::new("₹500", Duration::ZERO, Duration::ZERO, start);
        assert_eq!(typer.visible(start + Duration::from_millis(100)), "₹5");
    }

    #[test]
    fn counter_keeps_prefix_and_suffix() {
        let start = Instant::now();
        let counter = CounterAnimation::parse("₹1,250+", COUNTER_DURATION, start).unwrap();
        assert_eq!(counter.target(), 1250);

        assert_eq!(counter.display(start), "₹0+");
        // 125 frames of 10 each
        assert_eq!(counter.display(start + Duration::from_millis(16 * 50)), "₹500+");
        assert!(!counter.is_complete(start + Duration::from_millis(16 * 124)));
        assert!(counter.is_complete(start + COUNTER_DURATION));
        assert_eq!(counter.display(start + Duration::from_secs(5)), "₹1,250+");
    }

    #[test]
    fn zero_target_is_not_animated() {
        let now = Instant::now();
        assert!(CounterAnimation::parse("0%", COUNTER_DURATION, now).is_none());
        assert!(CounterAnimation::parse("Many", COUNTER_DURATION, now).is_none());
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
