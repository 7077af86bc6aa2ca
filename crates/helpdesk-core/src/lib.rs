//! Core types and error definitions for the helpdesk assistant.
//!
//! This crate provides the foundational types shared across all helpdesk crates,
//! including error handling and the persona/tone presets that shape every reply.
//!
//! # Main types
//!
//! - [`HelpdeskError`] — Unified error enum for all helpdesk subsystems.
//! - [`HelpdeskResult`] — Convenience alias for `Result<T, HelpdeskError>`.
//! - [`Persona`] — Named response-voice preset controlling the greeting.
//! - [`Tone`] — Text transform applied uniformly to every bot reply.

/// Error type shared by every helpdesk crate.
pub mod error;
/// Persona and tone presets.
pub mod style;

pub use error::{HelpdeskError, HelpdeskResult};
pub use style::{apply_tone, Persona, Tone};
