pub mod additive;
pub mod sequential;
pub mod unique;

use std::str::FromStr;
use std::sync::Arc;

pub use additive::AdditiveStore;
pub use sequential::SequentialStore;
pub use unique::UniqueStore;

use crate::color::Color;
use crate::error::PaintError;
use crate::layers::{Layer, LayerRegistry};

/// Cell-local compositing contract shared by the three store variants.
///
/// `get_color` must not change which layers are active, though it may cache
/// the last computed colour (the unique store relies on this for its
/// inverted display mode).
pub trait Compositor {
    /// Add a layer to the store. Returns true iff the store actually changed.
    fn add(&mut self, layer: Layer) -> bool;

    /// Erase a layer from the store. Returns true iff the store actually
    /// changed. Which layer goes away is variant-specific; the argument may
    /// be ignored.
    fn erase(&mut self, layer: Layer) -> bool;

    /// The colour this cell should show, folding the active layers over
    /// `start`.
    fn get_color(&mut self, start: Color, timestamp: f32, x: u32, y: u32) -> Color;

    /// Variant-specific special effect: invert, reverse or median-removal.
    fn special(&mut self);
}

/// Compositing discipline used for every cell of a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStyle {
    /// One layer per cell at most; special inverts the displayed colour.
    Unique,
    /// FIFO of layers applied oldest-first; special reverses the order.
    Additive,
    /// Index-ordered on/off layers; special removes the median-named one.
    Sequential,
}

impl DrawStyle {
    pub fn label(&self) -> &'static str {
        match self {
            DrawStyle::Unique => "SET",
            DrawStyle::Additive => "ADD",
            DrawStyle::Sequential => "SEQUENCE",
        }
    }
}

impl FromStr for DrawStyle {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SET" | "UNIQUE" => Ok(DrawStyle::Unique),
            "ADD" | "ADDITIVE" => Ok(DrawStyle::Additive),
            "SEQUENCE" | "SEQUENTIAL" => Ok(DrawStyle::Sequential),
            _ => Err(PaintError::UnknownDrawStyle(s.to_string())),
        }
    }
}

/// One grid cell's store, dispatching to the variant picked at canvas
/// construction. `Clone` so a whole grid of stores can be snapshotted for
/// special-action undo.
#[derive(Clone, Debug)]
pub enum LayerStore {
    Unique(UniqueStore),
    Additive(AdditiveStore),
    Sequential(SequentialStore),
}

impl LayerStore {
    pub fn for_style(style: DrawStyle, registry: &Arc<LayerRegistry>) -> Self {
        match style {
            DrawStyle::Unique => LayerStore::Unique(UniqueStore::new()),
            DrawStyle::Additive => LayerStore::Additive(AdditiveStore::new(registry)),
            DrawStyle::Sequential => LayerStore::Sequential(SequentialStore::new()),
        }
    }
}

impl Compositor for LayerStore {
    fn add(&mut self, layer: Layer) -> bool {
        match self {
            LayerStore::Unique(s) => s.add(layer),
            LayerStore::Additive(s) => s.add(layer),
            LayerStore::Sequential(s) => s.add(layer),
        }
    }

    fn erase(&mut self, layer: Layer) -> bool {
        match self {
            LayerStore::Unique(s) => s.erase(layer),
            LayerStore::Additive(s) => s.erase(layer),
            LayerStore::Sequential(s) => s.erase(layer),
        }
    }

    fn get_color(&mut self, start: Color, timestamp: f32, x: u32, y: u32) -> Color {
        match self {
            LayerStore::Unique(s) => s.get_color(start, timestamp, x, y),
            LayerStore::Additive(s) => s.get_color(start, timestamp, x, y),
            LayerStore::Sequential(s) => s.get_color(start, timestamp, x, y),
        }
    }

    fn special(&mut self) {
        match self {
            LayerStore::Unique(s) => s.special(),
            LayerStore::Additive(s) => s.special(),
            LayerStore::Sequential(s) => s.special(),
        }
    }
}
