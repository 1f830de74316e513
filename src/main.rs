use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use orbitx_chat::config::{Config, API_URL_ENV};
use orbitx_chat::format::format_time;
use orbitx_chat::logging::{init_tracing, install_panic_hook, LogTarget};
use orbitx_chat::session::SessionManager;
use orbitx_chat::storage::open_or_memory;
use orbitx_chat::transport::{ChatTransport, HttpTransport};
use orbitx_chat::ui::app::{init_terminal, restore_terminal};
use orbitx_chat::ui::chat::ChatController;
use orbitx_chat::ui::App;

#[derive(Parser)]
#[command(name = "orbitx")]
#[command(version = "0.1.0")]
#[command(about = "OrbitX design studio site and AI assistant in the terminal", long_about = None)]
struct Cli {
    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message to the assistant and print the reply
    Send { message: String },
    /// Print the stored conversation
    History,
    /// Show the conversation id and saved contact details
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.set_api_base_url(url);
    }

    match cli.command {
        None => run_tui(config).await,
        Some(Commands::Send { message }) => {
            init_tracing(LogTarget::Stderr)?;
            send_once(&config, &message).await
        }
        Some(Commands::History) => {
            init_tracing(LogTarget::Stderr)?;
            print_history(&config).await
        }
        Some(Commands::Session) => print_session(&config),
    }
}

fn build_chat(config: &Config) -> Result<ChatController> {
    let session = SessionManager::new(open_or_memory(&config.storage_path))?;
    let transport = HttpTransport::new(config.api_base(), config.request_timeout())
        .context("Failed to create HTTP client")?;

    Ok(ChatController::new(session, Arc::new(transport))
        .with_assistant_name(&config.ui.assistant_name)
        .with_quick_actions(config.ui.show_quick_actions))
}

async fn run_tui(config: Config) -> Result<()> {
    init_tracing(LogTarget::File(&config.log_path))?;
    install_panic_hook(restore_terminal);
    tracing::info!(api = %config.api_base(), "starting terminal UI");

    let chat = build_chat(&config)?;
    let mut app = App::new(&config, chat);

    let mut terminal = init_terminal()?;
    let result = app.run(&mut terminal).await;
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

async fn send_once(config: &Config, message: &str) -> Result<()> {
    let mut chat = build_chat(config)?;
    let before = chat.log().len();

    chat.composer_mut().set_text(message);
    if !chat.send_message() {
        anyhow::bail!("Nothing to send");
    }
    chat.wait_idle().await;

    for entry in chat.log().messages().skip(before) {
        println!(
            "[{}] {}: {}",
            format_time(&entry.timestamp),
            entry.sender.display_name(),
            entry.text
        );
    }
    Ok(())
}

async fn print_history(config: &Config) -> Result<()> {
    let session = SessionManager::new(open_or_memory(&config.storage_path))?;
    let transport = HttpTransport::new(config.api_base(), config.request_timeout())
        .context("Failed to create HTTP client")?;

    let history = transport
        .fetch_history(session.conversation_id())
        .await
        .context("Failed to fetch conversation history")?;

    if !history.success || history.messages.is_empty() {
        println!("📭 No messages yet in conversation {}", session.conversation_id());
        return Ok(());
    }

    println!("📋 Conversation {}:\n", session.conversation_id());
    for entry in history.messages {
        println!("  {}: {}", entry.sender.display_name(), entry.message);
    }
    Ok(())
}

fn print_session(config: &Config) -> Result<()> {
    let session = SessionManager::new(open_or_memory(&config.storage_path))?;
    let info = session.user_info();

    println!("Conversation: {}", session.conversation_id());
    println!("Name:         {}", info.name.as_deref().unwrap_or("-"));
    println!("Email:        {}", info.email.as_deref().unwrap_or("-"));
    println!("Phone:        {}", info.phone.as_deref().unwrap_or("-"));
    println!("Storage:      {}", config.storage_path.display());
    Ok(())
}
