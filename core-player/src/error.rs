//! # Player Error Types
//!
//! Error types for playback-control operations.

use thiserror::Error;

/// Errors that can occur while controlling playback.
#[derive(Error, Debug)]
pub enum PlayerError {
    // ========================================================================
    // Selection Errors
    // ========================================================================
    /// The playlist contains no playable tracks.
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// A selection referenced an index outside the playlist.
    #[error("Track index out of range: {0}")]
    IndexOutOfRange(usize),

    /// Attempted operation when no track is loaded.
    #[error("No track loaded")]
    NoTrackLoaded,

    // ========================================================================
    // Media Errors
    // ========================================================================
    /// The media resource could not be fetched or decoded.
    #[error("Failed to load media: {0}")]
    LoadFailed(String),

    /// A programmatic play was rejected by platform autoplay policy.
    #[error("Playback requires a user gesture")]
    AutoplayBlocked,

    /// The automatic retry budget was exhausted.
    #[error("Gave up after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Invalid volume value (must be in range [0.0, 1.0]).
    #[error("Invalid volume: {0} (must be between 0.0 and 1.0)")]
    InvalidVolume(f64),

    /// Session persistence gateway failure.
    #[error("Session gateway error: {0}")]
    Gateway(#[from] bridge_traits::BridgeError),

    /// Serialization of a persisted record failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlayerError {
    /// Returns `true` if this error is transient and the operation can be
    /// retried.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlayerError::LoadFailed(_) | PlayerError::AutoplayBlocked
        )
    }
}

/// Result type for player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failures_are_transient() {
        assert!(PlayerError::LoadFailed("timeout".into()).is_transient());
        assert!(PlayerError::AutoplayBlocked.is_transient());
        assert!(!PlayerError::EmptyPlaylist.is_transient());
        assert!(!PlayerError::RetriesExhausted {
            attempts: 3,
            message: "404".into()
        }
        .is_transient());
    }
}
