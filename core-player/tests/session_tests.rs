//! Tests for the session persistence gateway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use bridge_traits::storage::SettingsStore;
use core_player::session::{HISTORY_KEY, PROGRESS_KEY};
use core_player::{PlaybackProgress, SessionGateway, Track};

// ============================================================================
// In-memory SettingsStore
// ============================================================================

#[derive(Default)]
struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl SettingsStore for MemoryStore {
    async fn set_string(&self, key: &str, value: &str) -> bridge_traits::error::Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_string(&self, key: &str) -> bridge_traits::error::Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set_f64(&self, key: &str, value: f64) -> bridge_traits::error::Result<()> {
        self.set_string(key, &value.to_string()).await
    }

    async fn get_f64(&self, key: &str) -> bridge_traits::error::Result<Option<f64>> {
        Ok(self
            .get_string(key)
            .await?
            .and_then(|value| value.parse().ok()))
    }

    async fn delete(&self, key: &str) -> bridge_traits::error::Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> bridge_traits::error::Result<Vec<String>> {
        Ok(self.values.lock().unwrap().keys().cloned().collect())
    }

    async fn clear_all(&self) -> bridge_traits::error::Result<()> {
        self.values.lock().unwrap().clear();
        Ok(())
    }
}

fn gateway_with_capacity(capacity: usize) -> (SessionGateway, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (SessionGateway::new(store.clone(), capacity), store)
}

fn track(url: &str) -> Track {
    Track {
        name: format!("Name {url}"),
        artist: "Artist".to_string(),
        url: url.to_string(),
        cover: "cover.png".to_string(),
        lrc: None,
    }
}

fn at(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

// ============================================================================
// Progress
// ============================================================================

#[tokio::test]
async fn progress_round_trips() {
    let (gateway, _store) = gateway_with_capacity(50);
    let progress = PlaybackProgress {
        current_time: 42.0,
        current_index: 2,
        volume: 0.3,
    };

    gateway.save_progress(&progress).await.unwrap();

    let loaded = gateway.load_progress().await.unwrap().unwrap();
    assert_eq!(loaded, progress);
}

#[tokio::test]
async fn restore_applies_only_on_matching_index() {
    let (gateway, _store) = gateway_with_capacity(50);
    gateway
        .save_progress(&PlaybackProgress {
            current_time: 42.0,
            current_index: 2,
            volume: 0.3,
        })
        .await
        .unwrap();

    // Mismatched index: neither time nor volume may be applied.
    assert!(gateway.restore_progress(1).await.unwrap().is_none());

    // Matching index restores both.
    let restored = gateway.restore_progress(2).await.unwrap().unwrap();
    assert_eq!(restored.current_time, 42.0);
    assert_eq!(restored.volume, 0.3);
}

#[tokio::test]
async fn missing_progress_restores_nothing() {
    let (gateway, _store) = gateway_with_capacity(50);
    assert!(gateway.load_progress().await.unwrap().is_none());
    assert!(gateway.restore_progress(0).await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_progress_is_discarded() {
    let (gateway, store) = gateway_with_capacity(50);
    store.set_string(PROGRESS_KEY, "not json").await.unwrap();

    assert!(gateway.load_progress().await.unwrap().is_none());
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn history_is_most_recent_first() {
    let (gateway, _store) = gateway_with_capacity(50);

    gateway.record_play(&track("a"), at(0)).await.unwrap();
    gateway.record_play(&track("b"), at(10)).await.unwrap();
    gateway.record_play(&track("c"), at(20)).await.unwrap();

    let history = gateway.history().await.unwrap();
    let urls: Vec<&str> = history.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn history_is_capped_at_capacity() {
    let (gateway, _store) = gateway_with_capacity(5);

    for i in 0..8i64 {
        gateway
            .record_play(&track(&format!("u{i}")), at(i))
            .await
            .unwrap();
    }

    let history = gateway.history().await.unwrap();
    assert_eq!(history.len(), 5);
    // The oldest entries were evicted.
    assert_eq!(history.first().unwrap().url, "u7");
    assert_eq!(history.last().unwrap().url, "u3");
}

#[tokio::test]
async fn consecutive_repeat_collapses_into_front_entry() {
    let (gateway, _store) = gateway_with_capacity(50);

    gateway.record_play(&track("a"), at(0)).await.unwrap();
    gateway.record_play(&track("a"), at(30)).await.unwrap();

    let history = gateway.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].timestamp, at(30));
}

#[tokio::test]
async fn non_consecutive_repeat_creates_a_new_entry() {
    let (gateway, _store) = gateway_with_capacity(50);

    gateway.record_play(&track("a"), at(0)).await.unwrap();
    gateway.record_play(&track("b"), at(10)).await.unwrap();
    gateway.record_play(&track("a"), at(20)).await.unwrap();

    let history = gateway.history().await.unwrap();
    let urls: Vec<&str> = history.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["a", "b", "a"]);
}

#[tokio::test]
async fn history_entries_carry_display_metadata() {
    let (gateway, _store) = gateway_with_capacity(50);

    gateway.record_play(&track("a"), at(0)).await.unwrap();

    let entry = &gateway.history().await.unwrap()[0];
    assert_eq!(entry.name, "Name a");
    assert_eq!(entry.artist, "Artist");
    assert_eq!(entry.cover, "cover.png");
    assert_eq!(entry.timestamp, at(0));
}

#[tokio::test]
async fn malformed_history_resets_to_empty() {
    let (gateway, store) = gateway_with_capacity(50);
    store.set_string(HISTORY_KEY, "[{broken").await.unwrap();

    assert!(gateway.history().await.unwrap().is_empty());

    // Recording after corruption starts a fresh list.
    gateway.record_play(&track("a"), at(0)).await.unwrap();
    assert_eq!(gateway.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn clear_removes_both_records() {
    let (gateway, store) = gateway_with_capacity(50);
    gateway
        .save_progress(&PlaybackProgress {
            current_time: 1.0,
            current_index: 0,
            volume: 1.0,
        })
        .await
        .unwrap();
    gateway.record_play(&track("a"), at(0)).await.unwrap();

    gateway.clear().await.unwrap();

    assert!(store.get_string(PROGRESS_KEY).await.unwrap().is_none());
    assert!(store.get_string(HISTORY_KEY).await.unwrap().is_none());
}
