//! # OKPets Channels
//!
//! The OK.ru side of the relay: REST API client with request signing,
//! outbound chat messages with button templates, OAuth code exchange, and
//! the dispatcher that turns inbound chat text into game actions and
//! autopilot start/stop calls.

pub mod commands;
pub mod okru;

pub use commands::{Command, Dispatcher, Reply};
pub use okru::{OAuthTokens, OkClient};
