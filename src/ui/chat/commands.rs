use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands typed into the chat input with a leading slash.
///
/// The first four are the widget's quick actions and send a canned message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    Logo,
    Website,
    Portfolio,
    Services,
    /// Close the chat window
    Close,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    pub command: SlashCommand,
    pub keyword: &'static str,
    pub description: &'static str,
}

pub fn command_entries() -> Vec<CommandEntry> {
    SlashCommand::iter()
        .map(|command| CommandEntry {
            command,
            keyword: command.keyword(),
            description: command.description(),
        })
        .collect()
}

impl SlashCommand {
    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Logo => "🎨 ask about logo design",
            SlashCommand::Website => "💻 ask what a website costs",
            SlashCommand::Portfolio => "✨ see portfolio work",
            SlashCommand::Services => "🚀 ask about marketing services",
            SlashCommand::Close => "close the chat window",
            SlashCommand::Help => "show available commands",
        }
    }

    /// Command string without the leading '/'
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// Canned message sent by a quick action
    pub fn quick_message(self) -> Option<&'static str> {
        match self {
            SlashCommand::Logo => Some("I need a professional logo design for my business"),
            SlashCommand::Website => Some("How much would a modern website cost?"),
            SlashCommand::Portfolio => Some("Show me your best portfolio work"),
            SlashCommand::Services => Some("What digital marketing services do you offer?"),
            SlashCommand::Close | SlashCommand::Help => None,
        }
    }

    /// The four quick actions, in button order
    pub fn quick_actions() -> impl Iterator<Item = SlashCommand> {
        SlashCommand::iter().filter(|c| c.quick_message().is_some())
    }
}

/// Parse a slash command; `None` for plain messages and unknown commands
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let head = input.trim().strip_prefix('/')?.split_whitespace().next()?;
    let head = head.to_lowercase();

    SlashCommand::from_str(&head).ok().or_else(|| match head.as_str() {
        "x" | "hide" => Some(SlashCommand::Close),
        "h" | "?" => Some(SlashCommand::Help),
        "web" => Some(SlashCommand::Website),
        _ => None,
    })
}

pub fn get_help_text() -> String {
    let mut help = String::from("**Quick actions**\n");
    for entry in command_entries() {
        help.push_str(&format!("/{} - {}\n", entry.keyword, entry.description));
    }
    help.push_str("\nEnter sends, Shift+Enter adds a line, Esc closes the chat.");
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_slash_command("/logo"), Some(SlashCommand::Logo));
        assert_eq!(parse_slash_command("  /Website please"), Some(SlashCommand::Website));
        assert_eq!(parse_slash_command("/x"), Some(SlashCommand::Close));
        assert_eq!(parse_slash_command("/unknown"), None);
        assert_eq!(parse_slash_command("logo"), None);
    }

    #[test]
    fn quick_actions_carry_templates() {
        let actions: Vec<_> = SlashCommand::quick_actions().collect();
        assert_eq!(actions.len(), 4);
        assert_eq!(
            SlashCommand::Portfolio.quick_message(),
            Some("Show me your best portfolio work")
        );
        assert!(get_help_text().contains("/services"));
    }
}
