//! The floating chat widget: open/closed state, the typing lock and the
//! exchange with the backend.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use super::commands::{get_help_text, SlashCommand};
use super::composer::{ChatComposer, ComposerAction};
use super::history::MessageLog;
use super::indicator::TypingIndicator;
use crate::contact::extract_contact_info;
use crate::error::TransportError;
use crate::events::{ChatMessage, Sender, WidgetEvent};
use crate::session::SessionManager;
use crate::transport::{ChatTransport, HistoryResponse, MessageRequest, MessageResponse};

pub const QUOTE_NOTICE: &str =
    "🎉 Great! I've created a quote request for you. Our team will be in touch within 2 hours!";
pub const FAILURE_REPLY: &str = "Sorry, I couldn't process your message. Please try again.";
pub const CONNECTION_REPLY: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

const PLACEHOLDER: &str = "Ask me anything about design, pricing, or projects...";

pub struct ChatController {
    session: SessionManager,
    transport: Arc<dyn ChatTransport>,
    log: MessageLog,
    composer: ChatComposer,
    indicator: TypingIndicator,
    assistant_name: String,
    show_quick_actions: bool,
    is_open: bool,
    is_typing: bool,
    has_notification: bool,
    /// Spawned requests whose results have not been applied yet
    in_flight: usize,
    events_tx: mpsc::UnboundedSender<WidgetEvent>,
    events_rx: mpsc::UnboundedReceiver<WidgetEvent>,
}

impl ChatController {
    pub fn new(session: SessionManager, transport: Arc<dyn ChatTransport>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let assistant_name = Sender::Bot.display_name().to_string();

        Self {
            session,
            transport,
            log: MessageLog::new(),
            composer: ChatComposer::new(PLACEHOLDER),
            indicator: TypingIndicator::new(assistant_name.clone()),
            assistant_name,
            show_quick_actions: true,
            is_open: false,
            is_typing: false,
            has_notification: true,
            in_flight: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn with_assistant_name(mut self, name: &str) -> Self {
        self.assistant_name = name.to_string();
        self.indicator = TypingIndicator::new(name);
        self.composer.set_assistant_name(name);
        self
    }

    pub fn with_quick_actions(mut self, show: bool) -> Self {
        self.show_quick_actions = show;
        self
    }

    /// Kick off the history fetch; must run inside a tokio runtime
    pub fn start(&mut self) {
        tracing::info!(conversation_id = %self.session.conversation_id(), "chat widget started");
        self.load_conversation_history();
    }

    pub fn load_conversation_history(&mut self) {
        let transport = Arc::clone(&self.transport);
        let conversation_id = self.session.conversation_id().to_string();

        self.spawn_request(
            async move { transport.fetch_history(&conversation_id).await },
            WidgetEvent::History,
        );
    }

    /// Run a transport call on its own task and report the outcome as an event.
    ///
    /// A call that panics is reported as `TaskFailed` so the lock and
    /// `in_flight` are still released.
    fn spawn_request<T, F>(
        &mut self,
        request: F,
        into_event: fn(Result<T, TransportError>) -> WidgetEvent,
    ) where
        T: Send + 'static,
        F: Future<Output = Result<T, TransportError>> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = match tokio::spawn(request).await {
                Ok(result) => result,
                Err(e) => Err(TransportError::TaskFailed(e.to_string())),
            };
            let _ = tx.send(into_event(result));
        });
    }

    pub fn toggle_chat(&mut self) {
        self.is_open = !self.is_open;
        self.composer.set_focus(self.is_open);
        if self.is_open {
            self.has_notification = false;
        }
    }

    pub fn close_chat(&mut self) {
        self.is_open = false;
        self.composer.set_focus(false);
    }

    /// Send whatever is in the input.
    ///
    /// Returns false, leaving the input untouched, when it is blank or a
    /// reply is still pending.
    pub fn send_message(&mut self) -> bool {
        let message = self.composer.text().trim().to_string();
        if message.is_empty() || self.is_typing {
            return false;
        }

        self.add_message(&message, Sender::User);
        self.composer.clear();
        self.remember_contact_info(&message);
        self.show_typing();

        let request = MessageRequest {
            message,
            conversation_id: self.session.conversation_id().to_string(),
            user_info: self.session.user_info().clone(),
        };
        let transport = Arc::clone(&self.transport);
        self.spawn_request(
            async move { transport.send_message(request).await },
            WidgetEvent::Reply,
        );
        true
    }

    /// Put a canned message in the input and send it
    pub fn send_quick_message(&mut self, message: &str) -> bool {
        self.composer.set_text(message);
        self.send_message()
    }

    pub fn add_message(&mut self, text: &str, sender: Sender) {
        self.log.push(ChatMessage::new(text, sender));
    }

    pub fn run_command(&mut self, command: SlashCommand) {
        match command {
            SlashCommand::Close => self.close_chat(),
            SlashCommand::Help => self.add_message(&get_help_text(), Sender::Bot),
            quick => {
                if let Some(message) = quick.quick_message() {
                    self.send_quick_message(message);
                }
            }
        }
    }

    /// Keys while the chat window is open
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc if !self.composer.palette_open() => self.close_chat(),
            KeyCode::PageUp => self.log.scroll_up(5),
            KeyCode::PageDown => self.log.scroll_down(5),
            _ => match self.composer.handle_key(key) {
                ComposerAction::Submit => {
                    self.send_message();
                }
                ComposerAction::Command(command) => self.run_command(command),
                ComposerAction::None => {}
            },
        }
    }

    pub fn apply_event(&mut self, event: WidgetEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            WidgetEvent::Reply(result) => {
                self.hide_typing();
                match result {
                    Ok(response) => self.show_reply(response),
                    Err(e) => {
                        tracing::error!(error = %e, "chatbot request failed");
                        self.add_message(CONNECTION_REPLY, Sender::Bot);
                    }
                }
            }
            WidgetEvent::History(Ok(history)) => self.show_history(history),
            WidgetEvent::History(Err(e)) => {
                tracing::debug!(error = %e, "no previous conversation history");
            }
        }
    }

    /// Apply everything that has arrived; never waits
    pub fn process_pending_events(&mut self) -> bool {
        let mut applied = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied = true;
        }
        applied
    }

    /// Wait for the next network result and apply it
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    /// Wait until every spawned request has been applied
    pub async fn wait_idle(&mut self) {
        while self.in_flight > 0 {
            if !self.next_event().await {
                break;
            }
        }
    }

    fn show_reply(&mut self, response: MessageResponse) {
        let text = response.bot_response.as_deref().unwrap_or(FAILURE_REPLY);
        self.add_message(text, Sender::Bot);

        // Only a successful reply can announce a quote
        if response.success && response.quote_created {
            tracing::info!("quote request created from chat");
            self.add_message(QUOTE_NOTICE, Sender::Bot);
        }
    }

    fn show_history(&mut self, history: HistoryResponse) {
        if !history.success || history.messages.is_empty() {
            return;
        }
        tracing::debug!(count = history.messages.len(), "restoring conversation history");
        let messages = history
            .messages
            .into_iter()
            .map(|entry| ChatMessage::new(entry.message, entry.sender))
            .collect();
        self.log.load_history(messages);
    }

    fn remember_contact_info(&mut self, message: &str) {
        let update = extract_contact_info(message);
        if update.is_empty() {
            return;
        }
        if let Err(e) = self.session.save_user_info(&update) {
            tracing::warn!(error = %e, "failed to store contact details");
        }
    }

    fn show_typing(&mut self) {
        self.is_typing = true;
        self.indicator.show(Instant::now());
        self.composer.set_locked(true);
    }

    fn hide_typing(&mut self) {
        self.is_typing = false;
        self.indicator.hide();
        self.composer.set_locked(false);
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn has_notification(&self) -> bool {
        self.has_notification
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn composer_mut(&mut self) -> &mut ChatComposer {
        &mut self.composer
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Bottom-right launcher button, with the unread badge
    fn render_launcher(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            " 💬 Chat with AI ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )];
        if self.has_notification {
            spans.push(Span::styled(
                " 1 ",
                Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        let line = Line::from(spans);
        let width = line.width() as u16;
        if area.width < width || area.height == 0 {
            return;
        }
        let x = (area.x + area.width - width).saturating_sub(1).max(area.x);
        let y = area.y + area.height - 1;
        buf.set_line(x, y, &line, width);
    }

    fn render_window(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(Line::from(vec![
                Span::styled(
                    format!(" ✦ {} ", self.assistant_name),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                Span::styled("Online ", Style::default().fg(Color::Green)),
            ]));
        let inner = block.inner(area);
        block.render(area, buf);

        let palette_height = self.composer.palette_height();
        let quick_height = u16::from(self.show_quick_actions);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(quick_height),
                Constraint::Length(3),
            ])
            .split(inner);

        self.log.render(rows[0], buf);
        self.indicator.render(rows[1], buf);

        if self.show_quick_actions {
            let mut spans = Vec::new();
            for action in SlashCommand::quick_actions() {
                spans.push(Span::styled(
                    format!(" /{} ", action.keyword()),
                    Style::default().fg(Color::Black).bg(Color::Gray),
                ));
                spans.push(Span::raw(" "));
            }
            buf.set_line(rows[2].x, rows[2].y, &Line::from(spans), rows[2].width);
        }

        self.composer.render(rows[3], buf);

        if palette_height > 0 {
            let height = palette_height.min(rows[3].y.saturating_sub(inner.y));
            let palette = Rect::new(rows[3].x, rows[3].y - height, rows[3].width, height);
            self.composer.render_palette(palette, buf);
        }
    }
}

/// Window size: up to 60x24, docked bottom-right above the launcher
pub fn window_area(screen: Rect) -> Rect {
    let width = screen.width.min(60);
    let height = screen.height.saturating_sub(2).min(24);
    Rect::new(
        screen.x + screen.width - width,
        screen.y + screen.height.saturating_sub(height + 1),
        width,
        height,
    )
}

impl Widget for &ChatController {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.is_open {
            self.render_window(window_area(area), buf);
        } else {
            self.render_launcher(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockTransport {
        sends: AtomicUsize,
        requests: Mutex<Vec<MessageRequest>>,
        /// Replies handed out in order; an `Err` simulates a network failure
        replies: Mutex<Vec<Result<Value, String>>>,
        history: Option<Value>,
        panic_on_send: bool,
    }

    impl MockTransport {
        fn replying(replies: Vec<Result<Value, String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn send_message(&self, request: MessageRequest) -> Result<MessageResponse, TransportError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            if self.panic_on_send {
                panic!("transport blew up");
            }
            self.requests.lock().unwrap().push(request);
            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.is_empty() {
                Ok(json!({"success": true, "bot_response": "Happy to help!"}))
            } else {
                replies.remove(0)
            };
            reply
                .map(MessageResponse::from_value)
                .map_err(TransportError::Client)
        }

        async fn fetch_history(&self, _conversation_id: &str) -> Result<HistoryResponse, TransportError> {
            match &self.history {
                Some(value) => Ok(HistoryResponse::from_value(value)),
                None => Err(TransportError::Client("connection refused".into())),
            }
        }
    }

    fn controller(transport: Arc<MockTransport>) -> ChatController {
        let session = SessionManager::new(Box::new(MemoryStore::new())).unwrap();
        ChatController::new(session, transport)
    }

    fn texts(controller: &ChatController) -> Vec<(Sender, String)> {
        controller
            .log()
            .messages()
            .map(|m| (m.sender, m.text.clone()))
            .collect()
    }

    #[tokio::test]
    async fn rapid_sends_make_one_request() {
        let transport = Arc::new(MockTransport::default());
        let mut chat = controller(Arc::clone(&transport));

        assert!(chat.send_quick_message("How much would a modern website cost?"));
        assert!(chat.is_typing());
        assert!(!chat.send_quick_message("Show me your best portfolio work"));

        chat.wait_idle().await;
        assert_eq!(transport.sends.load(Ordering::SeqCst), 1);
        assert!(!chat.is_typing());
        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "How much would a modern website cost?".to_string()),
                (Sender::Bot, "Happy to help!".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let transport = Arc::new(MockTransport::default());
        let mut chat = controller(Arc::clone(&transport));

        chat.composer_mut().set_text("   ");
        assert!(!chat.send_message());
        assert!(!chat.is_typing());
        assert!(chat.log().is_empty());
    }

    #[tokio::test]
    async fn network_failure_shows_one_fallback_and_unlocks() {
        let transport = Arc::new(MockTransport::replying(vec![Err("offline".into())]));
        let mut chat = controller(Arc::clone(&transport));

        assert!(chat.send_quick_message("hello"));
        chat.wait_idle().await;
        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "hello".to_string()),
                (Sender::Bot, CONNECTION_REPLY.to_string()),
            ]
        );
        assert!(!chat.is_typing());

        assert!(chat.send_quick_message("still there?"));
        chat.wait_idle().await;
        assert_eq!(transport.sends.load(Ordering::SeqCst), 2);
        assert_eq!(chat.log().len(), 4);
    }

    #[tokio::test]
    async fn replies_follow_success_and_quote_flags() {
        let transport = Arc::new(MockTransport::replying(vec![
            Ok(json!({"success": true, "bot_response": "Quote started", "quote_created": true})),
            Ok(json!({"success": false, "bot_response": "Please share your email"})),
            Ok(json!({"success": false})),
        ]));
        let mut chat = controller(Arc::clone(&transport));

        for message in ["I want a logo", "ok", "and?"] {
            assert!(chat.send_quick_message(message));
            chat.wait_idle().await;
        }

        let bot: Vec<String> = texts(&chat)
            .into_iter()
            .filter(|(sender, _)| *sender == Sender::Bot)
            .map(|(_, text)| text)
            .collect();
        assert_eq!(
            bot,
            vec![
                "Quote started".to_string(),
                QUOTE_NOTICE.to_string(),
                "Please share your email".to_string(),
                FAILURE_REPLY.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn request_carries_session_and_contact_details() {
        let transport = Arc::new(MockTransport::default());
        let mut chat = controller(Arc::clone(&transport));

        assert!(chat.send_quick_message("You can reach me at asha@orbitx.in"));
        chat.wait_idle().await;

        let requests = transport.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(request.conversation_id, chat.session().conversation_id());
        assert_eq!(request.user_info.session_id, request.conversation_id);
        assert_eq!(request.user_info.email.as_deref(), Some("asha@orbitx.in"));
        assert_eq!(chat.session().user_info().email.as_deref(), Some("asha@orbitx.in"));
    }

    #[tokio::test]
    async fn history_replaces_welcome() {
        let transport = Arc::new(MockTransport {
            history: Some(json!({
                "success": true,
                "messages": [
                    {"message": "Do you design menus?", "sender": "user"},
                    {"message": "Yes, from **₹1,500**.", "sender": "bot"}
                ]
            })),
            ..MockTransport::default()
        });
        let mut chat = controller(transport);

        chat.start();
        chat.wait_idle().await;
        assert!(!chat.log().shows_welcome());
        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "Do you design menus?".to_string()),
                (Sender::Bot, "Yes, from **₹1,500**.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failed_or_empty_history_keeps_welcome() {
        let mut chat = controller(Arc::new(MockTransport::default()));
        chat.start();
        chat.wait_idle().await;
        assert!(chat.log().shows_welcome());
        assert!(chat.log().is_empty());

        let empty = Arc::new(MockTransport {
            history: Some(json!({"success": true, "messages": []})),
            ..MockTransport::default()
        });
        let mut chat = controller(empty);
        chat.start();
        chat.wait_idle().await;
        assert!(chat.log().shows_welcome());
    }

    #[tokio::test]
    async fn history_arriving_late_stays_first() {
        let transport = Arc::new(MockTransport {
            history: Some(json!({
                "success": true,
                "messages": [{"message": "earlier", "sender": "bot"}]
            })),
            ..MockTransport::default()
        });
        let mut chat = controller(transport);

        assert!(chat.send_quick_message("now"));
        chat.start();
        chat.wait_idle().await;

        let order: Vec<String> = texts(&chat).into_iter().map(|(_, text)| text).collect();
        assert_eq!(order, vec!["earlier", "now", "Happy to help!"]);
    }

    #[test]
    fn opening_clears_notification() {
        let mut chat = controller(Arc::new(MockTransport::default()));
        assert!(chat.has_notification());

        chat.toggle_chat();
        assert!(chat.is_open());
        assert!(!chat.has_notification());

        chat.run_command(SlashCommand::Close);
        assert!(!chat.is_open());
        chat.toggle_chat();
        chat.toggle_chat();
        assert!(!chat.is_open());
    }

    #[tokio::test]
    async fn panicking_request_still_unlocks() {
        let transport = Arc::new(MockTransport {
            panic_on_send: true,
            ..MockTransport::default()
        });
        let mut chat = controller(transport);

        assert!(chat.send_quick_message("hello"));
        chat.wait_idle().await;

        assert!(!chat.is_typing());
        assert_eq!(
            texts(&chat),
            vec![
                (Sender::User, "hello".to_string()),
                (Sender::Bot, CONNECTION_REPLY.to_string()),
            ]
        );
    }
}
