//! # Parley Core Library
//!
//! Everything the Parley chat client does that is independent of the
//! terminal: talking to the inference server, cleaning up its replies,
//! and the chat state the front end renders.
//!
//! ## Modules
//!
//! - `client`: non-streaming `/api/generate` client and the `Generator` seam
//! - `format`: reasoning-block removal and line-break rewriting
//! - `session`: transcript, status and the send/complete handlers
//! - `worker`: runs a request off the UI loop and posts the result back
//! - `settings`: configuration loading and saving
//! - `theme`: UI theming system

pub mod client;
pub mod error;
pub mod format;
pub mod session;
pub mod settings;
pub mod theme;
pub mod worker;
