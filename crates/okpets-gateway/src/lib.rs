//! # OKPets Gateway
//!
//! The inbound HTTP surface: OK.ru webhook notifications, the OAuth
//! redirect callback, a health endpoint, and the landing page.

pub mod pages;
pub mod routes;
pub mod server;

pub use server::{AppState, build_router, serve};
