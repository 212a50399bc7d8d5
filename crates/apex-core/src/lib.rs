//! Core logic for the Apex Assistant Telegram bot.
//!
//! No Telegram, HTTP or RSS code lives here. Delivery, translation and feed
//! fetching sit behind ports (traits) implemented in the adapter crates.

pub mod app;
pub mod audience;
pub mod broadcast;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod funnel;
pub mod logging;
pub mod messaging;
pub mod news;
pub mod ports;
pub mod scheduler;
pub mod seen;
pub mod templates;
pub mod translation;

#[cfg(test)]
mod testing;

pub use errors::{Error, Result};
