//! Message formatting shared by the HTML and terminal renderers.
//!
//! Only three constructs are recognised: `**bold**`, `*italic*` and line
//! breaks. Everything else is text, and text is always escaped before any
//! markup is produced.

use chrono::{DateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));

// Emphasis may span line breaks, as it does once `\n` has become `<br>`
static BOLD_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\*\*(.*?)\*\*").expect("valid bold regex"));
static ITALIC_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\*(.*?)\*").expect("valid italic regex"));

/// Encode the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render a chat message as an HTML fragment
pub fn format_message(message: &str) -> String {
    let escaped = escape_html(message).replace('\n', "<br>");
    let bolded = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    ITALIC_RE.replace_all(&bolded, "<em>$1</em>").into_owned()
}

/// `3:07 PM` style clock time
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%-I:%M %p").to_string()
}

/// A run of text with uniform emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// Split a message into lines of emphasis runs for non-HTML renderers
pub fn parse_markup(message: &str) -> Vec<Vec<Segment>> {
    let mut lines = vec![Vec::new()];
    for segment in parse_emphasis(message) {
        for (index, part) in segment.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(Vec::new());
            }
            if let Some(line) = lines.last_mut() {
                push_segment(line, part, segment.bold, segment.italic);
            }
        }
    }
    lines
}

fn parse_emphasis(message: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for captures in BOLD_SPAN_RE.captures_iter(message) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        push_with_italics(&mut segments, &message[last..whole.start()], false);
        push_with_italics(&mut segments, inner.as_str(), true);
        last = whole.end();
    }
    push_with_italics(&mut segments, &message[last..], false);

    segments
}

fn push_with_italics(segments: &mut Vec<Segment>, text: &str, bold: bool) {
    let mut last = 0;
    for captures in ITALIC_SPAN_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        push_segment(segments, &text[last..whole.start()], bold, false);
        push_segment(segments, inner.as_str(), bold, true);
        last = whole.end();
    }
    push_segment(segments, &text[last..], bold, false);
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, bold: bool, italic: bool) {
    if text.is_empty() {
        return;
    }
    segments.push(Segment {
        text: text.to_string(),
        bold,
        italic,
    });
}
