use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use super::commands::{command_entries, parse_slash_command, CommandEntry, SlashCommand};
use crate::events::Sender;

/// What a key press in the chat input asks the widget to do
#[derive(Debug, PartialEq, Eq)]
pub enum ComposerAction {
    /// Enter on a plain message; the text is still in the input
    Submit,
    Command(SlashCommand),
    None,
}

/// Single text input with a slash-command palette
#[derive(Debug, Clone)]
pub struct ChatComposer {
    content: String,
    /// Cursor position in chars
    cursor: usize,
    placeholder: String,
    /// Shown in the title while a reply is pending
    assistant_name: String,
    has_focus: bool,
    locked: bool,
    entries: Vec<CommandEntry>,
    filtered: Vec<CommandEntry>,
    palette_open: bool,
    selected: Option<usize>,
}

impl ChatComposer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            assistant_name: Sender::Bot.display_name().to_string(),
            has_focus: false,
            locked: false,
            entries: command_entries(),
            filtered: Vec::new(),
            palette_open: false,
            selected: None,
        }
    }

    pub fn set_assistant_name(&mut self, name: &str) {
        self.assistant_name = name.to_string();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerAction {
        if key.kind != KeyEventKind::Press {
            return ComposerAction::None;
        }

        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.insert_char('\n');
            }
            KeyCode::Enter | KeyCode::Tab if self.palette_open => {
                if let Some(command) = self.selected_command() {
                    self.clear();
                    return ComposerAction::Command(command);
                }
                self.close_palette();
                if key.code == KeyCode::Enter {
                    return self.submit();
                }
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Up if self.palette_open => self.move_selection(-1),
            KeyCode::Down if self.palette_open => self.move_selection(1),
            KeyCode::Esc if self.palette_open => self.close_palette(),
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                self.insert_char(c);
                self.sync_palette();
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.content.remove(at);
                    self.sync_palette();
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_index(self.cursor);
                    self.content.remove(at);
                    self.sync_palette();
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => {}
        }

        ComposerAction::None
    }

    /// Plain Enter: a typed command, a message, or nothing for blank input
    fn submit(&mut self) -> ComposerAction {
        if let Some(command) = parse_slash_command(&self.content) {
            self.clear();
            return ComposerAction::Command(command);
        }
        if self.content.trim().is_empty() {
            ComposerAction::None
        } else {
            ComposerAction::Submit
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.char_len();
        self.close_palette();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.close_palette();
    }

    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Dim the send hint while a reply is pending
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn palette_open(&self) -> bool {
        self.palette_open
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// The palette is open while the input is a bare `/word`
    fn sync_palette(&mut self) {
        let query = match self.content.strip_prefix('/') {
            Some(rest) if !rest.contains(char::is_whitespace) => rest.to_lowercase(),
            _ => {
                self.close_palette();
                return;
            }
        };

        self.filtered = self
            .entries
            .iter()
            .filter(|entry| entry.keyword.starts_with(&query))
            .copied()
            .collect();
        self.palette_open = true;
        self.selected = if self.filtered.is_empty() {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(self.filtered.len() - 1))
        };
    }

    fn close_palette(&mut self) {
        self.palette_open = false;
        self.filtered.clear();
        self.selected = None;
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = None;
            return;
        }
        let len = self.filtered.len() as isize;
        let current = self.selected.unwrap_or(0) as isize;
        self.selected = Some((current + delta).rem_euclid(len) as usize);
    }

    fn selected_command(&self) -> Option<SlashCommand> {
        self.selected
            .and_then(|index| self.filtered.get(index))
            .map(|entry| entry.command)
    }

    /// Rows the palette needs above the input
    pub fn palette_height(&self) -> u16 {
        if self.palette_open {
            self.filtered.len().min(6) as u16 + 2
        } else {
            0
        }
    }

    /// Draw the command palette into `area` (placed by the caller above the input)
    pub fn render_palette(&self, area: Rect, buf: &mut Buffer) {
        if !self.palette_open || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Commands")
            .style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        block.render(area, buf);

        for (index, entry) in self.filtered.iter().enumerate().take(inner.height as usize) {
            let style = if self.selected == Some(index) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let line = Line::from(vec![
                Span::styled(format!("/{}", entry.keyword), style),
                Span::styled("  ", Style::default()),
                Span::styled(entry.description, Style::default().fg(Color::Gray)),
            ]);
            buf.set_line(inner.x, inner.y + index as u16, &line, inner.width);
        }
    }
}

impl Widget for &ChatComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.locked {
            format!(" {} is replying ", self.assistant_name)
        } else {
            " Message ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(if self.has_focus {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner = block.inner(area);
        block.render(area, buf);

        if self.content.is_empty() {
            let placeholder = Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ));
            buf.set_line(inner.x, inner.y, &placeholder, inner.width);
            return;
        }

        let mut shown = self.content.clone();
        if self.has_focus {
            shown.insert(self.byte_index(self.cursor), '▌');
        }

        // Keep the cursor's line in view
        let lines: Vec<&str> = shown.split('\n').collect();
        let skip = lines.len().saturating_sub(inner.height as usize);
        for (row, text) in lines.iter().skip(skip).enumerate() {
            let line = Line::from(Span::styled(*text, Style::default().fg(Color::White)));
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(composer: &mut ChatComposer, text: &str) {
        for c in text.chars() {
            composer.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_without_clearing() {
        let mut composer = ChatComposer::new("Ask me anything...");
        type_text(&mut composer, "héllo");
        assert_eq!(composer.handle_key(press(KeyCode::Enter)), ComposerAction::Submit);
        assert_eq!(composer.text(), "héllo");

        composer.handle_key(press(KeyCode::Left));
        composer.handle_key(press(KeyCode::Backspace));
        assert_eq!(composer.text(), "hélo");
    }

    #[test]
    fn blank_input_does_nothing() {
        let mut composer = ChatComposer::new("");
        type_text(&mut composer, "   ");
        assert_eq!(composer.handle_key(press(KeyCode::Enter)), ComposerAction::None);
    }

    #[test]
    fn palette_filters_and_selects() {
        let mut composer = ChatComposer::new("");
        type_text(&mut composer, "/po");
        assert!(composer.palette_open());
        assert_eq!(composer.palette_height(), 3);

        assert_eq!(
            composer.handle_key(press(KeyCode::Enter)),
            ComposerAction::Command(SlashCommand::Portfolio)
        );
        assert!(composer.text().is_empty());
        assert!(!composer.palette_open());
    }

    #[test]
    fn typed_command_with_argument_still_parses() {
        let mut composer = ChatComposer::new("");
        type_text(&mut composer, "/close now");
        assert!(!composer.palette_open());
        assert_eq!(
            composer.handle_key(press(KeyCode::Enter)),
            ComposerAction::Command(SlashCommand::Close)
        );
    }

    #[test]
    fn alias_without_palette_match_runs_on_first_enter() {
        let mut composer = ChatComposer::new("");
        type_text(&mut composer, "/x");
        assert!(composer.palette_open());
        assert_eq!(
            composer.handle_key(press(KeyCode::Enter)),
            ComposerAction::Command(SlashCommand::Close)
        );
        assert!(composer.text().is_empty());

        type_text(&mut composer, "/?");
        assert_eq!(
            composer.handle_key(press(KeyCode::Enter)),
            ComposerAction::Command(SlashCommand::Help)
        );
    }

    #[test]
    fn control_and_alt_chords_do_not_type() {
        let mut composer = ChatComposer::new("");
        type_text(&mut composer, "hi");
        composer.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        composer.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        composer.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(composer.text(), "hiA");
    }

    #[test]
    fn locked_title_uses_assistant_name() {
        let mut composer = ChatComposer::new("");
        composer.set_assistant_name("Nova");
        composer.set_locked(true);

        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        (&composer).render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf.get(x, 0).symbol().to_string()).collect();
        assert!(top.contains("Nova is replying"));
    }
}
