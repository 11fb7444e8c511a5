use std::collections::VecDeque;

use crate::action::PaintAction;
use crate::error::Result;
use crate::grid::Grid;

/// Most (action, was_undo) pairs a session will record for playback.
pub const REPLAY_CAPACITY: usize = 10_000;

/// Records live actions and later plays them back one per clock tick.
///
/// Recording is the default; `start_replay` freezes the queue for good and
/// playback drains it front to back.
pub struct ReplayTracker {
    queue: VecDeque<(PaintAction, bool)>,
    replaying: bool,
}

impl Default for ReplayTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayTracker {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            replaying: false,
        }
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Stop taking actions and start handing them back. One-way.
    pub fn start_replay(&mut self) {
        self.replaying = true;
    }

    /// Record an action, with `was_undo` marking actions that reached the
    /// grid through an undo. Ignored once replaying; a full queue drops the
    /// action silently.
    pub fn add_action(&mut self, action: PaintAction, was_undo: bool) {
        if self.replaying {
            return;
        }
        if self.queue.len() >= REPLAY_CAPACITY {
            log::warn!("replay queue full at {REPLAY_CAPACITY} entries, dropping action");
            return;
        }
        self.queue.push_back((action, was_undo));
    }

    /// Apply the next recorded entry to the grid. Returns `true` once the
    /// queue is drained and nothing happened.
    pub fn play_next_action(&mut self, grid: &mut Grid) -> Result<bool> {
        let Some((mut action, was_undo)) = self.queue.pop_front() else {
            return Ok(true);
        };
        if was_undo {
            action.undo_apply(grid)?;
        } else {
            action.redo_apply(grid)?;
        }
        Ok(false)
    }
}
