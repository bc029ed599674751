//! Playback engine: the only component that touches the media handle.
//!
//! The engine owns the single active [`MediaHandle`], translates its events
//! into store actions, and exposes the command surface consumers drive.
//!
//! ## Switching model
//!
//! Every track switch bumps a monotonic generation counter. All asynchronous
//! work (load/play completions, media events, poll and backoff timers) carries
//! the generation it was started under and re-checks it before touching state,
//! so a stale completion from a superseded switch can never overwrite the
//! state of a newer one. Per-track resources (the event pump and poll tasks)
//! are registered against the active generation and aborted on release.
//!
//! ## Failure model
//!
//! Load/play failures are retried automatically up to the configured budget
//! with a fixed backoff; exhaustion surfaces a terminal error and halts on the
//! failing track rather than skipping through a broken playlist. An
//! autoplay-policy rejection is handled separately: it waits for the host to
//! report a user gesture, then retries exactly once without consuming the
//! retry budget.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use bridge_traits::media::{
    MediaBackend, MediaError, MediaEvent, MediaHandle, MediaResult, PreloadHint,
};
use bridge_traits::storage::SettingsStore;
use core_runtime::events::{EventBus, PlayerEvent};

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::sequencer;
use crate::session::{PlaybackProgress, SessionGateway};
use crate::state::{Action, PlayMode, PlayerState};
use crate::store::Store;
use crate::track::{self, RawTrack, Track};

const AUTOPLAY_BLOCKED_MESSAGE: &str = "Playback is waiting for a user gesture";

/// Resources scoped to one active track.
struct ActiveTrack {
    handle: Arc<dyn MediaHandle>,
    generation: u64,
    tasks: Vec<JoinHandle<()>>,
    pump_installed: bool,
}

/// The playback engine. Cheap to clone; all clones share the same store,
/// backend, and active handle.
///
/// Must be used inside a Tokio runtime: commands spawn tasks for the
/// asynchronous parts of the media lifecycle.
#[derive(Clone)]
pub struct PlayerEngine {
    store: Arc<Store>,
    backend: Arc<dyn MediaBackend>,
    bus: EventBus,
    session: Option<Arc<SessionGateway>>,
    config: Arc<PlayerConfig>,
    generation: Arc<AtomicU64>,
    active: Arc<Mutex<Option<ActiveTrack>>>,
    interaction: Arc<Notify>,
}

impl PlayerEngine {
    /// Create an engine without session persistence.
    pub fn new(backend: Arc<dyn MediaBackend>, config: PlayerConfig) -> Self {
        Self::build(backend, config, None)
    }

    /// Create an engine that persists progress and history through `settings`.
    pub fn with_session(
        backend: Arc<dyn MediaBackend>,
        config: PlayerConfig,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        let gateway = SessionGateway::new(settings, config.history_capacity);
        Self::build(backend, config, Some(Arc::new(gateway)))
    }

    fn build(
        backend: Arc<dyn MediaBackend>,
        config: PlayerConfig,
        session: Option<Arc<SessionGateway>>,
    ) -> Self {
        let initial = PlayerState::new(config.play_mode, config.volume);
        Self {
            store: Arc::new(Store::new(initial)),
            backend,
            bus: EventBus::default(),
            session,
            config: Arc::new(config),
            generation: Arc::new(AtomicU64::new(0)),
            active: Arc::new(Mutex::new(None)),
            interaction: Arc::new(Notify::new()),
        }
    }

    // ===== Observation =====

    /// The engine's store.
    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.store)
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> PlayerState {
        self.store.snapshot()
    }

    /// Subscribe to state snapshots.
    pub fn subscribe_state(&self) -> watch::Receiver<PlayerState> {
        self.store.subscribe()
    }

    /// Subscribe to discrete player events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.bus.subscribe()
    }

    /// The engine's event bus.
    pub fn events(&self) -> EventBus {
        self.bus.clone()
    }

    // ===== Playlist =====

    /// Replace the queue with a fresh set of descriptors.
    ///
    /// Tracks without a resolvable url are dropped at ingestion. Resets the
    /// cursor and position, regenerates the shuffle order when in random
    /// mode, and starts playback of the first track when autoplay is
    /// configured.
    pub fn set_playlist(&self, descriptors: Vec<RawTrack>) {
        let tracks = track::ingest(descriptors);
        info!(count = tracks.len(), "replacing playlist");

        self.invalidate();
        self.store.dispatch(Action::SetPlaying(false));
        self.store.dispatch(Action::SetLoading(false));
        self.store.dispatch(Action::SetError(None));
        self.store.dispatch(Action::SetPlaylist(tracks));

        let state = self.store.snapshot();
        if state.play_mode == PlayMode::Random {
            self.store.dispatch(Action::SetRandomOrder(
                sequencer::generate_random_order(state.playlist.len()),
            ));
        }
        if self.config.autoplay && !state.playlist.is_empty() {
            self.select(0);
        }
    }

    // ===== Transport Commands =====

    /// Toggle between playing and paused.
    ///
    /// Ignored while a load is in flight; hosts disable the transport
    /// controls in the same window.
    pub fn toggle_play(&self) {
        let state = self.store.snapshot();
        if state.playlist.is_empty() || state.loading {
            return;
        }
        if state.playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Pause the active track.
    pub fn pause(&self) {
        let state = self.store.snapshot();
        if let Some(handle) = self.current_handle() {
            handle.pause();
        }
        self.store.dispatch(Action::SetPlaying(false));
        if let Some(current) = state.current_track() {
            self.emit(PlayerEvent::Paused {
                url: current.url.clone(),
                position: state.current_time,
            });
        }
        self.save_progress_best_effort();
    }

    /// Start or resume playback of the current track.
    pub fn resume(&self) {
        let state = self.store.snapshot();
        let Some(current) = state.current_track().cloned() else {
            return;
        };
        match self.current_handle_with_generation() {
            Some((handle, generation)) => {
                let engine = self.clone();
                tokio::spawn(async move { engine.run_resume(generation, current, handle).await });
            }
            // Nothing loaded yet: a full switch establishes the handle.
            None => self.select(state.current_index),
        }
    }

    /// Advance to the next track per the active play mode.
    ///
    /// In `Single` mode an explicit skip still moves the cursor; repeat-one
    /// applies only to natural completion.
    pub fn play_next(&self) {
        let state = self.store.snapshot();
        if let Some(next) = sequencer::next_index(&state) {
            self.select(next);
        }
    }

    /// Step back to the previous track per the active play mode.
    pub fn play_prev(&self) {
        let state = self.store.snapshot();
        if let Some(prev) = sequencer::prev_index(&state) {
            self.select(prev);
        }
    }

    /// Switch to the track at `index`.
    ///
    /// Out-of-range selections are ignored. Supersedes any in-flight switch:
    /// only the most recent target ends up current, and stale completions are
    /// discarded.
    pub fn select(&self, index: usize) {
        let state = self.store.snapshot();
        let Some(target) = state.playlist.get(index).cloned() else {
            debug!(index, len = state.playlist.len(), "selection out of range, ignoring");
            return;
        };

        self.save_progress_best_effort();

        let generation = self.invalidate();
        self.store.dispatch(Action::SetPlaying(false));
        self.store.dispatch(Action::SetCurrentIndex(index));
        self.store.dispatch(Action::SetCurrentTime(0.0));
        self.store.dispatch(Action::SetDuration(0.0));
        self.store.dispatch(Action::SetLoading(true));
        self.store.dispatch(Action::SetError(None));
        self.emit(PlayerEvent::TrackChanged {
            index,
            url: target.url.clone(),
            title: target.name.clone(),
        });
        info!(index, url = %target.url, "switching track");

        let handle = match self.backend.open(&target.url, self.config.preload) {
            Ok(handle) => handle,
            Err(err) => {
                self.fail_playback(generation, &target, err.to_string());
                return;
            }
        };

        // Register before any async work so a later switch releases this
        // handle and aborts its retry/backoff timers even mid-load.
        {
            let mut active = self.active.lock();
            if self.generation.load(Ordering::SeqCst) != generation {
                handle.pause();
                return;
            }
            *active = Some(ActiveTrack {
                handle: Arc::clone(&handle),
                generation,
                tasks: Vec::new(),
                pump_installed: false,
            });
        }

        let engine = self.clone();
        let task =
            tokio::spawn(async move { engine.run_switch(generation, target, handle).await });
        self.adopt_task(generation, task);
    }

    /// Seek to an absolute position in the active track, seconds.
    pub fn seek(&self, position: f64) {
        if !position.is_finite() || position < 0.0 {
            return;
        }
        let Some(handle) = self.current_handle() else {
            return;
        };
        handle.seek(position);
        self.store.dispatch(Action::SetCurrentTime(position));
        let duration = self.store.snapshot().duration;
        self.emit(PlayerEvent::PositionChanged { position, duration });
        self.save_progress_best_effort();
    }

    /// Set the playback volume; values outside `0.0..=1.0` are clamped.
    pub fn set_volume(&self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        let clamped = volume.clamp(0.0, 1.0);
        if let Some(handle) = self.current_handle() {
            handle.set_volume(clamped);
        }
        self.store.dispatch(Action::SetVolume(clamped));
        self.emit(PlayerEvent::VolumeChanged { volume: clamped });
    }

    /// Switch to a specific play mode, regenerating the shuffle order when
    /// entering random mode.
    pub fn set_play_mode(&self, mode: PlayMode) {
        let state = self.store.snapshot();
        if state.play_mode == mode {
            return;
        }
        self.store.dispatch(Action::SetPlayMode(mode));
        if mode == PlayMode::Random {
            self.store.dispatch(Action::SetRandomOrder(
                sequencer::generate_random_order(state.playlist.len()),
            ));
        }
        self.emit(PlayerEvent::PlayModeChanged {
            mode: mode.as_str().to_string(),
        });
    }

    /// Cycle list -> random -> single -> list.
    pub fn cycle_play_mode(&self) {
        let mode = match self.store.snapshot().play_mode {
            PlayMode::List => PlayMode::Random,
            PlayMode::Random => PlayMode::Single,
            PlayMode::Single => PlayMode::List,
        };
        self.set_play_mode(mode);
    }

    /// Retry the current track after an error, with a fresh handle and a
    /// fresh retry budget.
    pub fn retry(&self) {
        let state = self.store.snapshot();
        if state.playlist.is_empty() {
            return;
        }
        self.select(state.current_index);
    }

    /// Report a user gesture (click/touch) from the host.
    ///
    /// Wakes a playback attempt parked on an autoplay-policy rejection.
    pub fn notify_user_interaction(&self) {
        self.interaction.notify_waiters();
    }

    // ===== Session Persistence =====

    /// Restore persisted progress into the live state.
    ///
    /// Applies only when the saved index matches the current index; a stale
    /// snapshot from a different queue is ignored. Returns whether anything
    /// was restored.
    pub async fn restore_progress(&self) -> Result<bool> {
        let Some(session) = &self.session else {
            return Ok(false);
        };
        let state = self.store.snapshot();
        match session.restore_progress(state.current_index).await? {
            Some(progress) => {
                self.store.dispatch(Action::SetVolume(progress.volume));
                self.store
                    .dispatch(Action::SetCurrentTime(progress.current_time));
                if let Some(handle) = self.current_handle() {
                    handle.seek(progress.current_time);
                    handle.set_volume(self.store.snapshot().volume);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist progress, release the active handle, and stop all timers.
    pub async fn shutdown(&self) {
        if let Some(session) = &self.session {
            let state = self.store.snapshot();
            let progress = PlaybackProgress {
                current_time: state.current_time,
                current_index: state.current_index,
                volume: state.volume,
            };
            if let Err(err) = session.save_progress(&progress).await {
                warn!(%err, "failed to save playback progress on shutdown");
            }
        }
        self.invalidate();
        self.store.dispatch(Action::SetPlaying(false));
        self.store.dispatch(Action::SetLoading(false));
    }

    // ===== Internals =====

    fn emit(&self, event: PlayerEvent) {
        // Emitting without subscribers is not an error.
        let _ = self.bus.emit(event);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Bump the generation and release the superseded handle's resources.
    fn invalidate(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let released = self.active.lock().take();
        if let Some(active) = released {
            for task in &active.tasks {
                task.abort();
            }
            active.handle.pause();
        }
        generation
    }

    fn current_handle(&self) -> Option<Arc<dyn MediaHandle>> {
        self.active
            .lock()
            .as_ref()
            .map(|active| Arc::clone(&active.handle))
    }

    fn current_handle_with_generation(&self) -> Option<(Arc<dyn MediaHandle>, u64)> {
        self.active
            .lock()
            .as_ref()
            .map(|active| (Arc::clone(&active.handle), active.generation))
    }

    fn save_progress_best_effort(&self) {
        let Some(session) = &self.session else {
            return;
        };
        let state = self.store.snapshot();
        let progress = PlaybackProgress {
            current_time: state.current_time,
            current_index: state.current_index,
            volume: state.volume,
        };
        let session = Arc::clone(session);
        tokio::spawn(async move {
            if let Err(err) = session.save_progress(&progress).await {
                warn!(%err, "failed to save playback progress");
            }
        });
    }

    fn record_history(&self, track: &Track) {
        let Some(session) = &self.session else {
            return;
        };
        let session = Arc::clone(session);
        let track = track.clone();
        tokio::spawn(async move {
            if let Err(err) = session.record_play(&track, chrono::Utc::now()).await {
                warn!(%err, "failed to record play history");
            }
        });
    }

    /// Drive one switch attempt to completion under `generation`.
    async fn run_switch(&self, generation: u64, target: Track, handle: Arc<dyn MediaHandle>) {
        let mut attempt: u32 = 0;
        loop {
            if !self.is_current(generation) {
                return;
            }
            match self.try_start(generation, &target, &handle).await {
                Ok(()) => return,
                Err(MediaError::AutoplayBlocked) => {
                    self.wait_for_gesture_and_resume(generation, &target, &handle)
                        .await;
                    return;
                }
                Err(err) => {
                    attempt += 1;
                    if attempt > self.config.max_retries {
                        self.fail_playback(generation, &target, err.to_string());
                        return;
                    }
                    if !self.is_current(generation) {
                        return;
                    }
                    warn!(
                        url = %target.url,
                        attempt,
                        max = self.config.max_retries,
                        "playback attempt failed, backing off"
                    );
                    self.store.dispatch(Action::SetError(Some(format!(
                        "Failed to load, retrying ({attempt}/{max})",
                        max = self.config.max_retries
                    ))));
                    tokio::time::sleep(self.config.retry_backoff).await;
                }
            }
        }
    }

    /// One load+play attempt. A stale generation short-circuits to `Ok` with
    /// state untouched.
    async fn try_start(
        &self,
        generation: u64,
        target: &Track,
        handle: &Arc<dyn MediaHandle>,
    ) -> MediaResult<()> {
        handle.load().await?;
        if !self.is_current(generation) {
            return Ok(());
        }

        self.capture_duration(generation, target, handle);

        // The pump must be running before play so Ended cannot be missed on
        // very short tracks.
        self.install_pump(generation, target.clone(), Arc::clone(handle));

        handle.set_volume(self.store.snapshot().volume);
        handle.play().await?;
        if !self.is_current(generation) {
            return Ok(());
        }

        self.on_playing(target);
        Ok(())
    }

    /// Transition into the playing state after a successful play call.
    fn on_playing(&self, target: &Track) {
        self.store.dispatch(Action::SetPlaying(true));
        self.store.dispatch(Action::SetLoading(false));
        self.store.dispatch(Action::SetError(None));
        self.emit(PlayerEvent::Started {
            url: target.url.clone(),
            title: target.name.clone(),
        });
        self.record_history(target);
        self.prefetch_next();
    }

    /// Capture the duration if the handle already knows it, otherwise start
    /// the bounded poll.
    fn capture_duration(&self, generation: u64, target: &Track, handle: &Arc<dyn MediaHandle>) {
        match handle.duration() {
            Some(duration) if duration.is_finite() && duration > 0.0 => {
                self.store.dispatch(Action::SetDuration(duration));
                self.store.dispatch(Action::SetTrackDuration {
                    url: target.url.clone(),
                    duration,
                });
            }
            _ => self.spawn_duration_poll(generation, target.clone(), Arc::clone(handle)),
        }
    }

    /// Poll the handle until a usable duration appears, degrading to 0 once
    /// the handle reports loading settled without one.
    fn spawn_duration_poll(&self, generation: u64, target: Track, handle: Arc<dyn MediaHandle>) {
        let engine = self.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(engine.config.duration_poll_interval).await;
                if !engine.is_current(generation) {
                    return;
                }
                match handle.duration() {
                    Some(duration) if duration.is_finite() && duration > 0.0 => {
                        engine.store.dispatch(Action::SetDuration(duration));
                        engine.store.dispatch(Action::SetTrackDuration {
                            url: target.url.clone(),
                            duration,
                        });
                        return;
                    }
                    _ if handle.is_loaded() => {
                        debug!(url = %target.url, "duration never resolved, degrading to 0");
                        engine.store.dispatch(Action::SetDuration(0.0));
                        return;
                    }
                    _ => {}
                }
            }
        });
        self.adopt_task(generation, task);
    }

    /// Attach a task to the active generation so release aborts it.
    fn adopt_task(&self, generation: u64, task: JoinHandle<()>) {
        let mut active = self.active.lock();
        if let Some(active) = active.as_mut() {
            if active.generation == generation {
                active.tasks.push(task);
                return;
            }
        }
        task.abort();
    }

    /// Subscribe to the handle's events and translate them into actions.
    /// Installed once per active track.
    fn install_pump(&self, generation: u64, target: Track, handle: Arc<dyn MediaHandle>) {
        let receiver = {
            let mut active = self.active.lock();
            let Some(active) = active.as_mut() else {
                return;
            };
            if active.generation != generation || active.pump_installed {
                return;
            }
            active.pump_installed = true;
            handle.subscribe()
        };

        let engine = self.clone();
        let pump_handle = Arc::clone(&handle);
        let task = tokio::spawn(async move {
            engine
                .pump_events(generation, target, pump_handle, receiver)
                .await
        });
        self.adopt_task(generation, task);
    }

    async fn pump_events(
        &self,
        generation: u64,
        target: Track,
        handle: Arc<dyn MediaHandle>,
        mut receiver: broadcast::Receiver<MediaEvent>,
    ) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if !self.is_current(generation) {
                        return;
                    }
                    match event {
                        MediaEvent::TimeUpdate { position } => {
                            self.store.dispatch(Action::SetCurrentTime(position));
                            let duration = self.store.snapshot().duration;
                            self.emit(PlayerEvent::PositionChanged { position, duration });
                        }
                        MediaEvent::MetadataLoaded { duration } => match duration {
                            Some(d) if d.is_finite() && d > 0.0 => {
                                self.store.dispatch(Action::SetDuration(d));
                                self.store.dispatch(Action::SetTrackDuration {
                                    url: target.url.clone(),
                                    duration: d,
                                });
                            }
                            _ => self.spawn_duration_poll(
                                generation,
                                target.clone(),
                                Arc::clone(&handle),
                            ),
                        },
                        MediaEvent::Ended => {
                            self.emit(PlayerEvent::Completed {
                                url: target.url.clone(),
                            });
                            self.handle_ended(generation, &target, &handle).await;
                        }
                        MediaEvent::Error { message } => {
                            self.fail_playback(generation, &target, message);
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "media event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    /// Natural completion: repeat-one restarts the same track, everything
    /// else delegates to the sequencer.
    async fn handle_ended(
        &self,
        generation: u64,
        target: &Track,
        handle: &Arc<dyn MediaHandle>,
    ) {
        let state = self.store.snapshot();
        if state.play_mode == PlayMode::Single {
            handle.seek(0.0);
            self.store.dispatch(Action::SetCurrentTime(0.0));
            match handle.play().await {
                Ok(()) => {
                    if self.is_current(generation) {
                        self.store.dispatch(Action::SetPlaying(true));
                        self.emit(PlayerEvent::Started {
                            url: target.url.clone(),
                            title: target.name.clone(),
                        });
                    }
                }
                Err(err) => self.fail_playback(generation, target, err.to_string()),
            }
            return;
        }

        self.store.dispatch(Action::SetPlaying(false));
        if let Some(next) = sequencer::next_index(&state) {
            self.select(next);
        }
    }

    /// Resume a paused handle without re-establishing it.
    async fn run_resume(&self, generation: u64, target: Track, handle: Arc<dyn MediaHandle>) {
        if !self.is_current(generation) {
            return;
        }
        self.store.dispatch(Action::SetLoading(true));
        self.store.dispatch(Action::SetError(None));
        match handle.play().await {
            Ok(()) => {
                if self.is_current(generation) {
                    self.on_playing(&target);
                }
            }
            Err(MediaError::AutoplayBlocked) => {
                self.wait_for_gesture_and_resume(generation, &target, &handle)
                    .await;
            }
            Err(err) => self.fail_playback(generation, &target, err.to_string()),
        }
    }

    /// Park on an autoplay-policy rejection until the host reports a user
    /// gesture, then retry exactly once. Does not consume the retry budget.
    async fn wait_for_gesture_and_resume(
        &self,
        generation: u64,
        target: &Track,
        handle: &Arc<dyn MediaHandle>,
    ) {
        if !self.is_current(generation) {
            return;
        }
        let notified = self.interaction.notified();
        tokio::pin!(notified);

        self.store.dispatch(Action::SetLoading(false));
        self.store
            .dispatch(Action::SetError(Some(AUTOPLAY_BLOCKED_MESSAGE.to_string())));
        self.emit(PlayerEvent::Error {
            url: Some(target.url.clone()),
            message: AUTOPLAY_BLOCKED_MESSAGE.to_string(),
            recoverable: true,
        });
        info!(url = %target.url, "autoplay blocked, waiting for user gesture");

        notified.await;
        if !self.is_current(generation) {
            return;
        }
        self.store.dispatch(Action::SetError(None));
        self.store.dispatch(Action::SetLoading(true));
        match handle.play().await {
            Ok(()) => {
                if self.is_current(generation) {
                    self.on_playing(target);
                }
            }
            Err(err) => self.fail_playback(generation, target, err.to_string()),
        }
    }

    /// Surface a terminal playback failure for `target`.
    fn fail_playback(&self, generation: u64, target: &Track, message: String) {
        if !self.is_current(generation) {
            return;
        }
        error!(url = %target.url, %message, "playback failed");
        self.store.dispatch(Action::SetPlaying(false));
        self.store.dispatch(Action::SetLoading(false));
        self.store.dispatch(Action::SetError(Some(message.clone())));
        self.emit(PlayerEvent::Error {
            url: Some(target.url.clone()),
            message,
            recoverable: true,
        });
    }

    /// Best-effort metadata prefetch of the upcoming track.
    ///
    /// Failures never touch playback state; the only observable effect is a
    /// warmer duration cache.
    fn prefetch_next(&self) {
        let state = self.store.snapshot();
        let Some(next) = sequencer::next_index(&state) else {
            return;
        };
        if next == state.current_index {
            return;
        }
        let Some(upcoming) = state.playlist.get(next).cloned() else {
            return;
        };

        let engine = self.clone();
        tokio::spawn(async move {
            let handle = match engine.backend.open(&upcoming.url, PreloadHint::Auto) {
                Ok(handle) => handle,
                Err(err) => {
                    debug!(url = %upcoming.url, %err, "prefetch failed");
                    return;
                }
            };
            match handle.load().await {
                Ok(()) => {
                    if let Some(duration) = handle.duration() {
                        if duration.is_finite() && duration > 0.0 {
                            engine.store.dispatch(Action::SetTrackDuration {
                                url: upcoming.url.clone(),
                                duration,
                            });
                        }
                    }
                    debug!(url = %upcoming.url, "prefetched next track");
                }
                Err(err) => debug!(url = %upcoming.url, %err, "prefetch failed"),
            }
        });
    }
}
