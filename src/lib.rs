pub mod action;
pub mod color;
pub mod error;
pub mod grid;
pub mod history;
pub mod layers;
pub mod painter;
pub mod replay;
pub mod store;

pub use action::{PaintAction, PaintStep};
pub use color::Color;
pub use error::{PaintError, Result};
pub use grid::{Grid, DEFAULT_BRUSH_SIZE, MAX_BRUSH, MIN_BRUSH};
pub use history::UndoTracker;
pub use layers::{Layer, LayerRegistry};
pub use painter::Painter;
pub use replay::ReplayTracker;
pub use store::{Compositor, DrawStyle, LayerStore};
