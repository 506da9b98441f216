//! # OKPets Autopilot
//!
//! The automation core: long-lived, per-account loops that replay a fixed
//! multi-phase program of pet-care HTTP actions against mpets.mobi.
//!
//! ## Architecture
//! ```text
//! chat command ──► TaskRegistry ──► SchedulerRuntime (one worker thread)
//!                    │ start/stop       ├── Sequencer(account A) ──► ActionClient
//!                    │                  ├── Sequencer(account B) ──► ActionClient
//!                    └── account → TaskHandle (cancellation token)
//! ```
//!
//! All sequencers interleave cooperatively on the runtime's single worker;
//! request handlers only ever touch the registry's locked table and the
//! cloneable [`TaskHandle`]s it hands out. Action failures are logged and
//! swallowed — only cancellation stops a loop.

pub mod actions;
pub mod client;
pub mod registry;
pub mod runtime;
pub mod sequencer;

pub use actions::{ActionSpec, Phase};
pub use client::{ActionClient, MpetsClient, Outcome};
pub use registry::{AutopilotError, TaskRegistry};
pub use runtime::{SchedulerRuntime, TaskHandle};
pub use sequencer::Sequencer;
