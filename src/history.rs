use crate::action::PaintAction;
use crate::error::Result;
use crate::grid::Grid;

/// Most actions a session will remember before new ones are dropped.
pub const HISTORY_CAPACITY: usize = 10_000;

/// Dual-stack undo/redo manager over whole paint actions.
///
/// Redo is only meaningful straight after one or more undos: recording any
/// new action clears the redo stack.
pub struct UndoTracker {
    undo_stack: Vec<PaintAction>,
    redo_stack: Vec<PaintAction>,
}

impl Default for UndoTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoTracker {
    /// Create an empty tracker with no recorded actions.
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record a new action and clear redo. A full stack drops the action
    /// silently; losing history beats failing a live gesture.
    pub fn add_action(&mut self, action: PaintAction) {
        if self.undo_stack.len() >= HISTORY_CAPACITY {
            log::warn!("undo history full at {HISTORY_CAPACITY} actions, dropping action");
            return;
        }
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Reverse the latest action against the grid and move it to the redo
    /// stack. Returns the undone action, or `None` with no history.
    pub fn undo(&mut self, grid: &mut Grid) -> Result<Option<PaintAction>> {
        let Some(mut action) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(err) = action.undo_apply(grid) {
            self.undo_stack.push(action);
            return Err(err);
        }
        self.redo_stack.push(action.clone());
        Ok(Some(action))
    }

    /// Re-apply the most recently undone action and move it back to the undo
    /// stack. Returns the redone action, or `None` with nothing to redo.
    pub fn redo(&mut self, grid: &mut Grid) -> Result<Option<PaintAction>> {
        let Some(mut action) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(err) = action.redo_apply(grid) {
            self.redo_stack.push(action);
            return Err(err);
        }
        self.undo_stack.push(action.clone());
        Ok(Some(action))
    }
}
