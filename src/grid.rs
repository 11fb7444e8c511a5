use std::sync::Arc;

use crate::color::Color;
use crate::error::{PaintError, Result};
use crate::layers::{Layer, LayerRegistry};
use crate::store::{Compositor, DrawStyle, LayerStore};

pub const MIN_BRUSH: u32 = 0;
pub const MAX_BRUSH: u32 = 5;
pub const DEFAULT_BRUSH_SIZE: u32 = 2;

/// Fixed-size canvas of per-cell layer stores plus the shared brush size.
pub struct Grid {
    style: DrawStyle,
    width: u32,
    height: u32,
    brush_size: u32,
    registry: Arc<LayerRegistry>,
    stores: Vec<LayerStore>, // column-major, x * height + y
}

impl Grid {
    /// Allocate a `width` x `height` grid of stores for the given style.
    /// Dimensions must be positive; nothing is allocated on failure.
    pub fn new(
        style: DrawStyle,
        width: u32,
        height: u32,
        registry: Arc<LayerRegistry>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }
        let stores = (0..width as usize * height as usize)
            .map(|_| LayerStore::for_style(style, &registry))
            .collect();
        Ok(Self {
            style,
            width,
            height,
            brush_size: DEFAULT_BRUSH_SIZE,
            registry,
            stores,
        })
    }

    pub fn style(&self) -> DrawStyle {
        self.style
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn registry(&self) -> &Arc<LayerRegistry> {
        &self.registry
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Grow the brush by one, capped at `MAX_BRUSH`.
    pub fn increase_brush_size(&mut self) {
        if self.brush_size < MAX_BRUSH {
            self.brush_size += 1;
        }
    }

    /// Shrink the brush by one, floored at `MIN_BRUSH`.
    pub fn decrease_brush_size(&mut self) {
        if self.brush_size > MIN_BRUSH {
            self.brush_size -= 1;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(x as usize * self.height as usize + y as usize)
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> PaintError {
        PaintError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Bounds-checked access to one cell's store.
    pub fn cell(&self, x: u32, y: u32) -> Result<&LayerStore> {
        self.index(x, y)
            .map(|idx| &self.stores[idx])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn cell_mut(&mut self, x: u32, y: u32) -> Result<&mut LayerStore> {
        match self.index(x, y) {
            Some(idx) => Ok(&mut self.stores[idx]),
            None => Err(self.out_of_bounds(x, y)),
        }
    }

    /// Add `layer` to the cell at (x, y). Returns whether the store changed.
    pub fn add_layer(&mut self, x: u32, y: u32, layer: Layer) -> Result<bool> {
        Ok(self.cell_mut(x, y)?.add(layer))
    }

    /// Erase `layer` from the cell at (x, y). Returns whether the store
    /// changed.
    pub fn erase_layer(&mut self, x: u32, y: u32, layer: Layer) -> Result<bool> {
        Ok(self.cell_mut(x, y)?.erase(layer))
    }

    /// The colour the cell at (x, y) should show over `start`.
    pub fn get_color(&mut self, x: u32, y: u32, start: Color, timestamp: f32) -> Result<Color> {
        self.index(x, y)
            .map(|idx| self.stores[idx].get_color(start, timestamp, x, y))
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Run the style's special effect on every cell.
    pub fn special(&mut self) {
        for store in &mut self.stores {
            store.special();
        }
    }

    /// Clone of every cell store, used to make special effects undoable.
    pub(crate) fn snapshot_stores(&self) -> Vec<LayerStore> {
        self.stores.clone()
    }

    pub(crate) fn restore_stores(&mut self, stores: Vec<LayerStore>) {
        if stores.len() != self.stores.len() {
            log::warn!(
                "store snapshot size {} does not match grid size {}, ignoring",
                stores.len(),
                self.stores.len()
            );
            return;
        }
        self.stores = stores;
    }
}
