pub mod config;
pub mod contact;
pub mod enhance;
pub mod error;
pub mod events;
pub mod format;
pub mod logging;
pub mod session;
pub mod storage;
pub mod transport;
pub mod ui;
