//! Session persistence gateway client.
//!
//! Playback progress and play history are written through the host's
//! [`SettingsStore`]; the core never implements storage itself. Gateway
//! failures are surfaced as errors here and swallowed (with a warning) at the
//! engine boundary so persistence can never affect playback state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use bridge_traits::storage::SettingsStore;

use crate::error::Result;
use crate::track::Track;

/// Storage key for the playback progress snapshot.
pub const PROGRESS_KEY: &str = "musicPlayerProgress";

/// Storage key for the play history list.
pub const HISTORY_KEY: &str = "musicPlayerHistory";

/// Persisted playback position snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackProgress {
    /// Playback position, seconds.
    pub current_time: f64,
    /// Playlist index the position belongs to.
    pub current_index: usize,
    /// Volume in `0.0..=1.0`.
    pub volume: f64,
}

/// One play-history record, most recent first in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub artist: String,
    pub url: String,
    pub cover: String,
    pub timestamp: DateTime<Utc>,
}

/// Typed client over the host's key-value store.
pub struct SessionGateway {
    store: Arc<dyn SettingsStore>,
    capacity: usize,
}

impl SessionGateway {
    /// Create a gateway writing through `store`, keeping at most `capacity`
    /// history entries.
    pub fn new(store: Arc<dyn SettingsStore>, capacity: usize) -> Self {
        Self { store, capacity }
    }

    /// Persist the progress snapshot.
    pub async fn save_progress(&self, progress: &PlaybackProgress) -> Result<()> {
        let payload = serde_json::to_string(progress)?;
        self.store.set_string(PROGRESS_KEY, &payload).await?;
        Ok(())
    }

    /// Load the raw progress snapshot, if one was saved.
    pub async fn load_progress(&self) -> Result<Option<PlaybackProgress>> {
        let Some(payload) = self.store.get_string(PROGRESS_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&payload) {
            Ok(progress) => Ok(Some(progress)),
            Err(err) => {
                warn!(%err, "discarding malformed progress snapshot");
                Ok(None)
            }
        }
    }

    /// Load the progress snapshot, applying the index-match guard.
    ///
    /// Returns `None` when nothing was saved or when the saved index does not
    /// match `current_index` - a stale snapshot from a different queue must
    /// not overwrite position or volume.
    pub async fn restore_progress(&self, current_index: usize) -> Result<Option<PlaybackProgress>> {
        match self.load_progress().await? {
            Some(progress) if progress.current_index == current_index => Ok(Some(progress)),
            _ => Ok(None),
        }
    }

    /// Record that `track` entered the playing state.
    ///
    /// History is most-recent-first and capped at the configured capacity.
    /// A repeat of the entry already at the front (pause/resume cycles)
    /// collapses into it, refreshing the timestamp instead of duplicating.
    pub async fn record_play(&self, track: &Track, timestamp: DateTime<Utc>) -> Result<()> {
        let mut entries = self.history().await?;

        let entry = HistoryEntry {
            name: track.name.clone(),
            artist: track.artist.clone(),
            url: track.url.clone(),
            cover: track.cover.clone(),
            timestamp,
        };

        if entries.first().map(|e| e.url.as_str()) == Some(track.url.as_str()) {
            entries[0] = entry;
        } else {
            entries.insert(0, entry);
            entries.truncate(self.capacity);
        }

        let payload = serde_json::to_string(&entries)?;
        self.store.set_string(HISTORY_KEY, &payload).await?;
        Ok(())
    }

    /// The persisted play history, most recent first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let Some(payload) = self.store.get_string(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&payload) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(%err, "discarding malformed play history");
                Ok(Vec::new())
            }
        }
    }

    /// Remove both persisted records.
    pub async fn clear(&self) -> Result<()> {
        self.store.delete(PROGRESS_KEY).await?;
        self.store.delete(HISTORY_KEY).await?;
        Ok(())
    }
}
