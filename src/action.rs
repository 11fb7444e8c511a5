use crate::error::Result;
use crate::grid::Grid;
use crate::layers::Layer;
use crate::store::LayerStore;

/// One cell-local mutation caused by a brush gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintStep {
    cell: (u32, u32),
    layer: Layer,
}

impl PaintStep {
    pub fn new(cell: (u32, u32), layer: Layer) -> Self {
        Self { cell, layer }
    }

    pub fn cell(&self) -> (u32, u32) {
        self.cell
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Re-apply this step: add the layer to the target cell.
    pub fn apply(&self, grid: &mut Grid) -> Result<()> {
        let (x, y) = self.cell;
        grid.add_layer(x, y, self.layer)?;
        Ok(())
    }

    /// Reverse this step: erase the layer from the target cell.
    pub fn undo(&self, grid: &mut Grid) -> Result<()> {
        let (x, y) = self.cell;
        grid.erase_layer(x, y, self.layer)?;
        Ok(())
    }
}

/// One undoable unit: a batch of steps from a single gesture, or a
/// whole-canvas special invocation.
///
/// Special effects are not generally self-inverse (sequential median removal
/// in particular), so a special action snapshots every cell store the first
/// time it runs and undo restores that snapshot. The snapshot travels with
/// clones of the action, which is what lets a recorded replay undo a special
/// correctly against its own grid.
#[derive(Clone, Debug)]
pub struct PaintAction {
    steps: Vec<PaintStep>,
    is_special: bool,
    before: Option<Vec<LayerStore>>,
}

impl PaintAction {
    /// A multi-cell brush stroke.
    pub fn stroke(steps: Vec<PaintStep>) -> Self {
        Self {
            steps,
            is_special: false,
            before: None,
        }
    }

    /// A whole-canvas special effect. Steps stay empty; the effect mutates
    /// cell stores directly.
    pub fn special() -> Self {
        Self {
            steps: Vec::new(),
            is_special: true,
            before: None,
        }
    }

    pub fn is_special(&self) -> bool {
        self.is_special
    }

    pub fn steps(&self) -> &[PaintStep] {
        &self.steps
    }

    /// Apply the action forward: run the special effect, or every step in
    /// recorded order.
    pub fn redo_apply(&mut self, grid: &mut Grid) -> Result<()> {
        if self.is_special {
            if self.before.is_none() {
                self.before = Some(grid.snapshot_stores());
            }
            grid.special();
            return Ok(());
        }
        for step in &self.steps {
            step.apply(grid)?;
        }
        Ok(())
    }

    /// Reverse the action. Strokes are undone step by step in reverse order,
    /// so gestures touching a cell twice unwind correctly; specials restore
    /// the snapshot taken when the action first ran.
    pub fn undo_apply(&mut self, grid: &mut Grid) -> Result<()> {
        if self.is_special {
            match &self.before {
                Some(stores) => grid.restore_stores(stores.clone()),
                // Never applied through this action; re-invoking is the best
                // available approximation.
                None => grid.special(),
            }
            return Ok(());
        }
        for step in self.steps.iter().rev() {
            step.undo(grid)?;
        }
        Ok(())
    }
}
