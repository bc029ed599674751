//! Sequencer: next/previous index computation under a play-mode policy.
//!
//! Pure functions over a state snapshot; nothing here mutates or performs
//! I/O. Shuffle traversal walks a permutation of the playlist indices so
//! every track is visited exactly once per cycle without reordering the
//! playlist itself.

use rand::seq::SliceRandom;

use crate::state::{PlayMode, PlayerState};

/// Index of the track that follows the current one, or `None` on an empty
/// playlist.
///
/// `Single` mode advances sequentially here on purpose: repeat-one applies
/// only to natural completion, not to explicit skip commands.
pub fn next_index(state: &PlayerState) -> Option<usize> {
    step(state, Direction::Forward)
}

/// Index of the track preceding the current one, or `None` on an empty
/// playlist.
pub fn prev_index(state: &PlayerState) -> Option<usize> {
    step(state, Direction::Backward)
}

enum Direction {
    Forward,
    Backward,
}

fn step(state: &PlayerState, direction: Direction) -> Option<usize> {
    let len = state.playlist.len();
    if len == 0 {
        return None;
    }

    let linear = |index: usize| match direction {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    };

    match state.play_mode {
        PlayMode::List | PlayMode::Single => Some(linear(state.current_index)),
        PlayMode::Random => {
            let order = &state.random_order;
            // A stale order (playlist swapped underneath it) falls back to
            // linear stepping; the engine regenerates on the next mode or
            // playlist change.
            if order.len() != len {
                return Some(linear(state.current_index));
            }
            match order.iter().position(|&i| i == state.current_index) {
                Some(p) => Some(order[linear(p)]),
                None => Some(linear(state.current_index)),
            }
        }
    }
}

/// Generate a uniform random permutation of `0..n` (Fisher-Yates).
///
/// `n == 0` yields an empty permutation.
pub fn generate_random_order(n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rand::thread_rng());
    order
}
