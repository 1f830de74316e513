//! Floating chat widget components

pub mod commands;
pub mod composer;
pub mod controller;
pub mod history;
pub mod indicator;

pub use commands::{get_help_text, parse_slash_command, SlashCommand};
pub use composer::{ChatComposer, ComposerAction};
pub use controller::ChatController;
pub use history::MessageLog;
pub use indicator::TypingIndicator;
