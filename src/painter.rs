use std::sync::Arc;

use crate::action::{PaintAction, PaintStep};
use crate::color::Color;
use crate::error::Result;
use crate::grid::Grid;
use crate::history::UndoTracker;
use crate::layers::{Layer, LayerRegistry};
use crate::replay::ReplayTracker;
use crate::store::DrawStyle;

/// One editing session: a grid plus its undo and replay trackers.
///
/// The event loop drives this through single synchronous calls; one gesture
/// is fully processed, history included, before the next one comes in.
pub struct Painter {
    grid: Grid,
    undo_tracker: UndoTracker,
    replay_tracker: ReplayTracker,
}

impl Painter {
    pub fn new(style: DrawStyle, width: u32, height: u32, registry: Arc<LayerRegistry>) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(style, width, height, registry)?,
            undo_tracker: UndoTracker::new(),
            replay_tracker: ReplayTracker::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_replaying(&self) -> bool {
        self.replay_tracker.is_replaying()
    }

    /// Paint `layer` around (px, py): every in-bounds cell within Manhattan
    /// distance `brush_size` gets the layer, and the whole gesture is
    /// recorded as one action. Returns how many cells were touched.
    pub fn paint(&mut self, layer: Layer, px: u32, py: u32) -> Result<usize> {
        self.grid.cell(px, py)?;

        let d = self.grid.brush_size();
        let x_from = px.saturating_sub(d);
        let x_to = (px + d).min(self.grid.width() - 1);
        let y_from = py.saturating_sub(d);
        let y_to = (py + d).min(self.grid.height() - 1);

        let mut steps = Vec::new();
        for x in x_from..=x_to {
            for y in y_from..=y_to {
                if x.abs_diff(px) + y.abs_diff(py) <= d {
                    self.grid.add_layer(x, y, layer)?;
                    steps.push(PaintStep::new((x, y), layer));
                }
            }
        }
        let painted = steps.len();
        log::debug!(
            "painted {:?} around ({px}, {py}), {painted} cells",
            layer.name()
        );

        let action = PaintAction::stroke(steps);
        self.undo_tracker.add_action(action.clone());
        self.replay_tracker.add_action(action, false);
        Ok(painted)
    }

    /// Run the whole-canvas special effect as one recorded, undoable action.
    pub fn special(&mut self) -> Result<()> {
        let mut action = PaintAction::special();
        action.redo_apply(&mut self.grid)?;
        self.undo_tracker.add_action(action.clone());
        self.replay_tracker.add_action(action, false);
        Ok(())
    }

    /// Undo the latest action, recording it for replay as an undo. Returns
    /// the undone action, or `None` with no history.
    pub fn undo(&mut self) -> Result<Option<PaintAction>> {
        let undone = self.undo_tracker.undo(&mut self.grid)?;
        if let Some(action) = &undone {
            self.replay_tracker.add_action(action.clone(), true);
        }
        Ok(undone)
    }

    /// Redo the most recently undone action, recording it for replay as a
    /// forward action.
    pub fn redo(&mut self) -> Result<Option<PaintAction>> {
        let redone = self.undo_tracker.redo(&mut self.grid)?;
        if let Some(action) = &redone {
            self.replay_tracker.add_action(action.clone(), false);
        }
        Ok(redone)
    }

    /// Freeze recording and reset the grid to a fresh one of the same style
    /// and size; subsequent `play_next_action` calls re-run the session.
    pub fn start_replay(&mut self) -> Result<()> {
        self.replay_tracker.start_replay();
        self.grid = Grid::new(
            self.grid.style(),
            self.grid.width(),
            self.grid.height(),
            self.grid.registry().clone(),
        )?;
        Ok(())
    }

    /// Play one recorded entry. Returns `true` once the replay is finished.
    pub fn play_next_action(&mut self) -> Result<bool> {
        self.replay_tracker.play_next_action(&mut self.grid)
    }

    pub fn get_color(&mut self, x: u32, y: u32, start: Color, timestamp: f32) -> Result<Color> {
        self.grid.get_color(x, y, start, timestamp)
    }

    pub fn increase_brush_size(&mut self) {
        self.grid.increase_brush_size();
    }

    pub fn decrease_brush_size(&mut self) {
        self.grid.decrease_brush_size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn painter(style: DrawStyle) -> Painter {
        Painter::new(style, 8, 8, LayerRegistry::standard()).unwrap()
    }

    fn colors(p: &mut Painter) -> Vec<Color> {
        let (w, h) = (p.grid().width(), p.grid().height());
        let mut out = Vec::new();
        for x in 0..w {
            for y in 0..h {
                out.push(p.get_color(x, y, Color::white(), 0.0).unwrap());
            }
        }
        out
    }

    #[test]
    fn test_paint_covers_the_manhattan_ball() {
        let mut p = painter(DrawStyle::Unique);
        let black = p.grid().registry().by_name("black").unwrap();
        // Default brush size 2: 13 cells in an unclipped diamond.
        assert_eq!(p.paint(black, 4, 4).unwrap(), 13);
        assert_eq!(
            p.get_color(4, 4, Color::white(), 0.0).unwrap(),
            Color::black()
        );
        assert_eq!(
            p.get_color(4, 6, Color::white(), 0.0).unwrap(),
            Color::black()
        );
        // Manhattan distance 3: untouched.
        assert_eq!(
            p.get_color(5, 6, Color::white(), 0.0).unwrap(),
            Color::white()
        );
    }

    #[test]
    fn test_paint_clips_at_the_edges() {
        let mut p = painter(DrawStyle::Unique);
        let black = p.grid().registry().by_name("black").unwrap();
        // Corner origin: only the in-bounds quarter of the diamond.
        assert_eq!(p.paint(black, 0, 0).unwrap(), 6);
        assert!(p.paint(black, 8, 0).is_err());
    }

    #[test]
    fn test_brush_size_zero_paints_one_cell() {
        let mut p = painter(DrawStyle::Additive);
        let darken = p.grid().registry().by_name("darken").unwrap();
        for _ in 0..9 {
            p.decrease_brush_size();
        }
        assert_eq!(p.paint(darken, 3, 3).unwrap(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip_through_session() {
        let mut p = painter(DrawStyle::Additive);
        let darken = p.grid().registry().by_name("darken").unwrap();
        let blank = colors(&mut p);

        p.paint(darken, 4, 4).unwrap();
        let painted = colors(&mut p);

        assert!(p.undo().unwrap().is_some());
        assert_eq!(colors(&mut p), blank);
        assert!(p.redo().unwrap().is_some());
        assert_eq!(colors(&mut p), painted);

        // Empty undo/redo signal "nothing happened".
        p.undo().unwrap();
        assert!(p.undo().unwrap().is_none());
    }

    #[test]
    fn test_replay_reproduces_the_session() {
        let mut p = painter(DrawStyle::Sequential);
        let registry = p.grid().registry().clone();
        p.paint(registry.by_name("black").unwrap(), 2, 2).unwrap();
        p.paint(registry.by_name("lighten").unwrap(), 5, 5).unwrap();
        p.special().unwrap();
        p.undo().unwrap();
        p.redo().unwrap();
        let live = colors(&mut p);

        p.start_replay().unwrap();
        assert_eq!(colors(&mut p), vec![Color::white(); 64]);
        let mut ticks = 0;
        while !p.play_next_action().unwrap() {
            ticks += 1;
            assert!(ticks < 100, "replay never finished");
        }
        assert_eq!(ticks, 5);
        assert_eq!(colors(&mut p), live);
    }

    #[test]
    fn test_no_recording_during_replay() {
        let mut p = painter(DrawStyle::Unique);
        let black = p.grid().registry().by_name("black").unwrap();
        p.paint(black, 1, 1).unwrap();
        p.start_replay().unwrap();
        assert!(p.is_replaying());
        // Painting still works during replay, it just is not recorded.
        p.paint(black, 2, 2).unwrap();
        assert!(!p.play_next_action().unwrap());
        assert!(p.play_next_action().unwrap());
    }
}
