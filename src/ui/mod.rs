//! Terminal UI: the site page with the chat widget floating over it

pub mod app;
pub mod chat;
pub mod page;

pub use app::App;
