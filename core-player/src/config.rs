//! Player configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use bridge_traits::media::PreloadHint;

use crate::state::PlayMode;

/// Configuration for the player engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial play mode (default: List)
    pub play_mode: PlayMode,

    /// Initial volume in `0.0..=1.0` (default: 1.0, clamped)
    pub volume: f64,

    /// Start playback automatically when a playlist is supplied
    /// (default: false)
    pub autoplay: bool,

    /// Preload hint passed to the media backend (default: Auto)
    pub preload: PreloadHint,

    /// Automatic retries after a load/play failure (default: 3)
    pub max_retries: u32,

    /// Fixed backoff between retry attempts (default: 1s)
    pub retry_backoff: Duration,

    /// Poll interval while waiting for an unresolved duration (default: 100ms)
    pub duration_poll_interval: Duration,

    /// Maximum play-history size (default: 50)
    pub history_capacity: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            play_mode: PlayMode::List,
            volume: 1.0,
            autoplay: false,
            preload: PreloadHint::Auto,
            max_retries: 3,
            retry_backoff: Duration::from_secs(1),
            duration_poll_interval: Duration::from_millis(100),
            history_capacity: 50,
        }
    }
}

impl PlayerConfig {
    /// Set the initial play mode.
    pub fn with_play_mode(mut self, mode: PlayMode) -> Self {
        self.play_mode = mode;
        self
    }

    /// Set the initial volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Enable or disable autoplay.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set the preload hint.
    pub fn with_preload(mut self, preload: PreloadHint) -> Self {
        self.preload = preload;
        self
    }

    /// Set the automatic retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the backoff between retries.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the play-history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
