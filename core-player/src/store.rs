//! State store: dispatch plus snapshot subscription.
//!
//! An explicitly constructed, passed-by-reference store instance. No ambient
//! global: hosts create one (usually through the engine) and hand clones of
//! the subscription handle to whoever renders.

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::state::{reduce, Action, PlayerState};

/// Holds the authoritative [`PlayerState`] and notifies subscribers on every
/// dispatch.
///
/// `dispatch` is synchronous and single-writer from the caller's perspective;
/// subscribers receive full snapshots through a `watch` channel, so a slow
/// consumer only ever misses intermediate states, never sees torn ones.
pub struct Store {
    state: RwLock<PlayerState>,
    watch_tx: watch::Sender<PlayerState>,
}

impl Store {
    /// Create a store seeded with `initial`.
    pub fn new(initial: PlayerState) -> Self {
        let (watch_tx, _) = watch::channel(initial.clone());
        Self {
            state: RwLock::new(initial),
            watch_tx,
        }
    }

    /// Apply an action through the reducer and publish the new snapshot.
    pub fn dispatch(&self, action: Action) {
        let next = {
            let mut guard = self.state.write();
            let next = reduce(&guard, &action);
            *guard = next.clone();
            next
        };
        self.watch_tx.send_replace(next);
    }

    /// Current state by value.
    pub fn snapshot(&self) -> PlayerState {
        self.state.read().clone()
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver immediately holds the current state and is marked changed
    /// after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.watch_tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(PlayerState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PlayMode;

    #[test]
    fn dispatch_updates_snapshot() {
        let store = Store::default();
        store.dispatch(Action::SetVolume(0.25));
        assert_eq!(store.snapshot().volume, 0.25);
    }

    #[tokio::test]
    async fn subscribers_observe_dispatches() {
        let store = Store::default();
        let mut rx = store.subscribe();

        store.dispatch(Action::SetPlayMode(PlayMode::Single));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().play_mode, PlayMode::Single);
    }

    #[test]
    fn snapshot_is_detached_from_store() {
        let store = Store::default();
        let snapshot = store.snapshot();
        store.dispatch(Action::SetLoading(true));

        assert!(!snapshot.loading);
        assert!(store.snapshot().loading);
    }
}
