//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the player core:
//! - Logging and tracing infrastructure
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the player crates depend on. It
//! establishes the logging conventions and the event broadcasting mechanism
//! consumers subscribe to for playback notifications.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
