//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the player core and platform-specific
//! implementations. Each trait represents a capability the core requires but
//! that must be provided differently per host (desktop shell, embedded webview,
//! test harness).
//!
//! ## Traits
//!
//! ### Media
//! - [`MediaBackend`](media::MediaBackend) - Opens one playback handle per track url
//! - [`MediaHandle`](media::MediaHandle) - The single active playback primitive:
//!   async load/play, synchronous pause/seek/volume, and event subscription
//!
//! ### Storage
//! - [`SettingsStore`](storage::SettingsStore) - Key-value session persistence
//!   (playback progress, play history)
//!
//! ## Event Contract
//!
//! A [`MediaHandle`](media::MediaHandle) emits [`MediaEvent`](media::MediaEvent)s
//! through a broadcast channel. The core subscribes exactly once per active
//! handle and drops the subscription when the handle is released, so hosts never
//! need to track listener registration themselves.
//!
//! ## Error Handling
//!
//! Storage traits use [`BridgeError`](error::BridgeError); media traits use
//! [`MediaError`](media::MediaError), which distinguishes the autoplay-policy
//! rejection from genuine load/playback failures so the core can apply
//! different recovery strategies.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Implementations must ensure thread safety.

pub mod error;
pub mod media;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use media::{MediaBackend, MediaError, MediaEvent, MediaHandle, PreloadHint};
pub use storage::SettingsStore;
