//! # Core Player
//!
//! Playback-state controller for a sequential media queue.
//!
//! This crate provides:
//! - Track normalization and playlist ingestion
//! - Sequencing (linear / shuffled / repeat-one) over a permutation order
//! - A playback engine driving a single media handle with bounded
//!   retry-on-failure and race-free track switching
//! - A state store with a pure reducer and snapshot subscriptions
//! - Session persistence (progress + play history) through a host key-value
//!   store
//! - LRC lyric parsing for consumers that render timed lines
//!
//! # Architecture
//!
//! `core-player` is platform-agnostic: the media primitive and the settings
//! store are injected through the traits in `bridge-traits`, and consumers
//! observe playback through state snapshots and the event bus from
//! `core-runtime`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bridge_traits::media::MediaBackend;
//! use core_player::{PlayerConfig, PlayerEngine, RawTrack};
//!
//! # fn example(backend: Arc<dyn MediaBackend>) {
//! let engine = PlayerEngine::new(backend, PlayerConfig::default());
//!
//! engine.set_playlist(vec![RawTrack {
//!     title: Some("My Song".to_string()),
//!     author: Some("Artist".to_string()),
//!     url: Some("https://example.com/song.mp3".to_string()),
//!     ..RawTrack::default()
//! }]);
//!
//! engine.toggle_play();
//! engine.play_next();
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod lyrics;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod store;
pub mod track;

// Public exports
pub use config::PlayerConfig;
pub use engine::PlayerEngine;
pub use error::{PlayerError, Result};
pub use lyrics::{parse_lrc, LyricLine};
pub use session::{HistoryEntry, PlaybackProgress, SessionGateway};
pub use state::{Action, ControlLayout, PlayMode, PlayerState, ViewMode};
pub use store::Store;
pub use track::{ingest, RawTrack, Track};
