//! Media bridge traits and supporting playback types.
//!
//! These abstractions allow the player core to drive a platform media
//! primitive (an HTML audio element, a native audio session, a test double)
//! while preserving a consistent, async-first API surface. Host applications
//! provide concrete implementations that satisfy their platform constraints.
//!
//! The core guarantees that at most one handle is "current" at any time and
//! that a superseded handle receives no further control calls besides a final
//! [`MediaHandle::pause`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

/// Errors surfaced by a media backend or handle.
///
/// [`MediaError::AutoplayBlocked`] is deliberately its own variant: the core
/// treats it as a recoverable platform-policy rejection (wait for a user
/// gesture, then retry once) rather than a load failure that consumes the
/// retry budget.
#[derive(Error, Debug, Clone)]
pub enum MediaError {
    /// A programmatic `play()` was rejected by platform autoplay policy.
    #[error("Playback requires a user gesture")]
    AutoplayBlocked,

    /// The media resource could not be fetched or decoded.
    #[error("Failed to load media: {0}")]
    LoadFailed(String),

    /// The handle accepted the resource but playback could not start.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Backend-level failure (handle allocation, unsupported url scheme).
    #[error("Media backend error: {0}")]
    Backend(String),
}

/// Result type for media operations.
pub type MediaResult<T> = std::result::Result<T, MediaError>;

/// Preload behaviour requested from the backend when a handle is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreloadHint {
    /// Buffer the full resource ahead of playback.
    Auto,
    /// Fetch only enough to resolve duration and stream metadata.
    Metadata,
    /// Do not fetch anything until playback is requested.
    None,
}

impl Default for PreloadHint {
    fn default() -> Self {
        Self::Auto
    }
}

/// Events emitted by a [`MediaHandle`] while it owns an active resource.
///
/// This is the narrow event surface the core subscribes to; everything else
/// (buffering telemetry, network stalls) stays inside the host adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced (seconds from the start of the resource).
    TimeUpdate { position: f64 },

    /// Stream metadata resolved. `duration` is `None` when the container does
    /// not report a usable duration yet; the core falls back to polling
    /// [`MediaHandle::duration`].
    MetadataLoaded { duration: Option<f64> },

    /// The resource finished playing naturally.
    Ended,

    /// An unrecoverable error occurred after playback had started.
    Error { message: String },
}

/// The single active playback primitive owned by the player core.
///
/// `load` and `play` are asynchronous because hosts typically resolve them
/// against network fetches and platform playback promises. All other controls
/// are synchronous with respect to the core's dispatch loop.
#[async_trait::async_trait]
pub trait MediaHandle: Send + Sync {
    /// Fetch and prepare the resource. Resolves once the handle is playable.
    async fn load(&self) -> MediaResult<()>;

    /// Begin or resume playback.
    ///
    /// Returns [`MediaError::AutoplayBlocked`] when the platform refuses to
    /// start playback without a user gesture.
    async fn play(&self) -> MediaResult<()>;

    /// Pause playback without releasing the resource.
    fn pause(&self);

    /// Seek to an absolute position in seconds.
    fn seek(&self, position: f64);

    /// Adjust playback volume. Volume is normalized to `0.0..=1.0`.
    fn set_volume(&self, volume: f64);

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Total duration in seconds, when known.
    ///
    /// Hosts return `None` while the duration is still unresolved (streaming
    /// containers, chunked responses). The value must be finite and positive
    /// once returned.
    fn duration(&self) -> Option<f64>;

    /// Whether the handle has finished buffering the resource.
    ///
    /// Used by the core to stop polling for a duration that will never
    /// resolve.
    fn is_loaded(&self) -> bool;

    /// Subscribe to the handle's event stream.
    ///
    /// Each call returns an independent receiver. Events published before the
    /// subscription are not replayed.
    fn subscribe(&self) -> broadcast::Receiver<MediaEvent>;
}

/// Factory for playback handles, one per track url.
///
/// Opening is synchronous (allocate the primitive); all I/O belongs to
/// [`MediaHandle::load`].
pub trait MediaBackend: Send + Sync {
    /// Allocate a fresh handle for `url` with the requested preload behaviour.
    fn open(&self, url: &str, preload: PreloadHint) -> MediaResult<std::sync::Arc<dyn MediaHandle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preload_hint_defaults_to_auto() {
        assert_eq!(PreloadHint::default(), PreloadHint::Auto);
    }

    #[test]
    fn autoplay_blocked_is_distinct_from_load_failures() {
        let blocked = MediaError::AutoplayBlocked;
        let failed = MediaError::LoadFailed("404".into());
        assert!(matches!(blocked, MediaError::AutoplayBlocked));
        assert!(!matches!(failed, MediaError::AutoplayBlocked));
    }

    #[test]
    fn media_event_equality() {
        let a = MediaEvent::TimeUpdate { position: 1.5 };
        let b = MediaEvent::TimeUpdate { position: 1.5 };
        assert_eq!(a, b);
    }
}
