//! Player state record, action vocabulary, and the pure reducer.
//!
//! All mutations flow through [`reduce`], a total pure function: for any
//! state and action it returns the next state by value, never panics, and
//! never performs side effects. Guarded transitions (out-of-range index,
//! non-finite scalars) resolve to identity rather than errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::track::Track;

/// Policy governing which track follows the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Sequential loop over the playlist.
    List,
    /// Shuffled permutation traversal.
    Random,
    /// Repeat current track on natural completion.
    Single,
}

impl PlayMode {
    /// Stable lowercase name used in events and persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::List => "list",
            PlayMode::Random => "random",
            PlayMode::Single => "single",
        }
    }
}

impl std::fmt::Display for PlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which panel the consumer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Cover,
    Lyrics,
}

/// Layout of the transport controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlLayout {
    Normal,
    Floating,
}

/// The single authoritative playback state record.
///
/// Owned by the [`Store`](crate::store::Store); consumers read snapshots and
/// never mutate it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    /// Ordered, index-addressed playlist. Every element has a non-empty url.
    pub playlist: Vec<Track>,
    /// Index of the active track; `0 <= current_index < playlist.len()`
    /// whenever the playlist is non-empty.
    pub current_index: usize,
    /// Whether the active track is currently playing.
    pub playing: bool,
    /// Whether a load or play operation is in flight.
    pub loading: bool,
    /// Last playback error surfaced to the consumer. Non-`None` implies
    /// `playing == false`.
    pub error: Option<String>,
    /// Playback position of the active track, seconds.
    pub current_time: f64,
    /// Duration of the active track, seconds; 0 while unknown.
    pub duration: f64,
    /// Volume in `0.0..=1.0`.
    pub volume: f64,
    /// Sequencing policy.
    pub play_mode: PlayMode,
    /// Shuffle traversal order: a permutation of `0..playlist.len()` while
    /// `play_mode == Random`, empty otherwise. Replaced wholesale, never
    /// mutated in place.
    pub random_order: Vec<usize>,
    /// Last-known duration per track url, for playlist row labels of
    /// non-active tracks.
    pub track_durations: HashMap<String, f64>,
    /// Whether the playlist panel is open.
    pub show_playlist: bool,
    /// Active consumer view.
    pub current_view: ViewMode,
    /// Transport control layout.
    pub control_layout: ControlLayout,
}

impl PlayerState {
    /// Create a fresh state with the given initial mode and volume.
    pub fn new(play_mode: PlayMode, volume: f64) -> Self {
        Self {
            playlist: Vec::new(),
            current_index: 0,
            playing: false,
            loading: false,
            error: None,
            current_time: 0.0,
            duration: 0.0,
            volume: clamp_volume(volume),
            play_mode,
            random_order: Vec::new(),
            track_durations: HashMap::new(),
            show_playlist: false,
            current_view: ViewMode::Cover,
            control_layout: ControlLayout::Normal,
        }
    }

    /// The active track, when the playlist is non-empty.
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_index)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(PlayMode::List, 1.0)
    }
}

/// Typed mutations applied through [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the whole playlist; resets cursor, position, and shuffle
    /// order so no stale index can survive the swap.
    SetPlaylist(Vec<Track>),
    SetCurrentIndex(usize),
    SetPlaying(bool),
    SetCurrentTime(f64),
    SetDuration(f64),
    SetVolume(f64),
    SetPlayMode(PlayMode),
    TogglePlaylist,
    SetCurrentView(ViewMode),
    SetControlLayout(ControlLayout),
    SetLoading(bool),
    SetError(Option<String>),
    SetTrackDuration { url: String, duration: f64 },
    SetRandomOrder(Vec<usize>),
}

fn clamp_volume(volume: f64) -> f64 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn guard_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Compute the next state for an action.
///
/// Pure and total: invalid payloads (out-of-range index, non-finite scalars)
/// leave the state unchanged instead of failing.
pub fn reduce(state: &PlayerState, action: &Action) -> PlayerState {
    let mut next = state.clone();
    match action {
        Action::SetPlaylist(tracks) => {
            next.playlist = tracks.clone();
            next.current_index = 0;
            next.current_time = 0.0;
            next.duration = 0.0;
            next.random_order = Vec::new();
        }
        Action::SetCurrentIndex(index) => {
            if *index < next.playlist.len() {
                next.current_index = *index;
            }
        }
        Action::SetPlaying(playing) => {
            next.playing = *playing;
            if *playing {
                // error != None implies playing == false
                next.error = None;
            }
        }
        Action::SetCurrentTime(time) => {
            if time.is_finite() && *time >= 0.0 {
                next.current_time = *time;
            }
        }
        Action::SetDuration(duration) => {
            next.duration = guard_duration(*duration);
        }
        Action::SetVolume(volume) => {
            if volume.is_finite() {
                next.volume = clamp_volume(*volume);
            }
        }
        Action::SetPlayMode(mode) => {
            next.play_mode = *mode;
            if *mode != PlayMode::Random {
                next.random_order = Vec::new();
            }
        }
        Action::TogglePlaylist => {
            next.show_playlist = !next.show_playlist;
        }
        Action::SetCurrentView(view) => {
            next.current_view = *view;
        }
        Action::SetControlLayout(layout) => {
            next.control_layout = *layout;
        }
        Action::SetLoading(loading) => {
            next.loading = *loading;
        }
        Action::SetError(error) => {
            next.error = error.clone();
            if next.error.is_some() {
                next.playing = false;
            }
        }
        Action::SetTrackDuration { url, duration } => {
            let duration = guard_duration(*duration);
            if duration > 0.0 {
                next.track_durations.insert(url.clone(), duration);
            }
        }
        Action::SetRandomOrder(order) => {
            next.random_order = order.clone();
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(url: &str) -> Track {
        Track {
            name: url.to_string(),
            artist: "Artist".to_string(),
            url: url.to_string(),
            cover: String::new(),
            lrc: None,
        }
    }

    fn populated() -> PlayerState {
        reduce(
            &PlayerState::default(),
            &Action::SetPlaylist(vec![track("a"), track("b"), track("c")]),
        )
    }

    #[test]
    fn set_playlist_resets_cursor_and_shuffle() {
        let mut state = populated();
        state.current_index = 2;
        state.current_time = 42.0;
        state.random_order = vec![2, 0, 1];

        let next = reduce(&state, &Action::SetPlaylist(vec![track("x")]));

        assert_eq!(next.playlist.len(), 1);
        assert_eq!(next.current_index, 0);
        assert_eq!(next.current_time, 0.0);
        assert_eq!(next.duration, 0.0);
        assert!(next.random_order.is_empty());
    }

    #[test]
    fn out_of_range_index_is_identity() {
        let state = populated();
        let next = reduce(&state, &Action::SetCurrentIndex(7));
        assert_eq!(next, state);
    }

    #[test]
    fn volume_is_clamped_at_both_bounds() {
        let state = PlayerState::default();

        let next = reduce(&state, &Action::SetVolume(1.5));
        assert_eq!(next.volume, 1.0);

        let next = reduce(&state, &Action::SetVolume(-0.2));
        assert_eq!(next.volume, 0.0);

        let next = reduce(&state, &Action::SetVolume(f64::NAN));
        assert_eq!(next.volume, state.volume);
    }

    #[test]
    fn non_finite_duration_degrades_to_zero() {
        let state = PlayerState::default();

        assert_eq!(reduce(&state, &Action::SetDuration(f64::NAN)).duration, 0.0);
        assert_eq!(
            reduce(&state, &Action::SetDuration(f64::INFINITY)).duration,
            0.0
        );
        assert_eq!(reduce(&state, &Action::SetDuration(180.0)).duration, 180.0);
    }

    #[test]
    fn error_forces_playing_false() {
        let mut state = PlayerState::default();
        state.playing = true;

        let next = reduce(&state, &Action::SetError(Some("load failed".into())));
        assert!(!next.playing);
        assert_eq!(next.error.as_deref(), Some("load failed"));
    }

    #[test]
    fn playing_clears_error() {
        let mut state = PlayerState::default();
        state.error = Some("stale".into());

        let next = reduce(&state, &Action::SetPlaying(true));
        assert!(next.playing);
        assert!(next.error.is_none());
    }

    #[test]
    fn leaving_random_clears_order() {
        let mut state = populated();
        state.play_mode = PlayMode::Random;
        state.random_order = vec![1, 2, 0];

        let next = reduce(&state, &Action::SetPlayMode(PlayMode::List));
        assert!(next.random_order.is_empty());
    }

    #[test]
    fn track_duration_cache_rejects_invalid_values() {
        let state = PlayerState::default();

        let next = reduce(
            &state,
            &Action::SetTrackDuration {
                url: "a".into(),
                duration: f64::NAN,
            },
        );
        assert!(next.track_durations.is_empty());

        let next = reduce(
            &state,
            &Action::SetTrackDuration {
                url: "a".into(),
                duration: 95.5,
            },
        );
        assert_eq!(next.track_durations.get("a"), Some(&95.5));
    }

    #[test]
    fn toggle_playlist_flips_flag() {
        let state = PlayerState::default();
        let next = reduce(&state, &Action::TogglePlaylist);
        assert!(next.show_playlist);
        let next = reduce(&next, &Action::TogglePlaylist);
        assert!(!next.show_playlist);
    }
}
