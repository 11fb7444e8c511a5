use std::collections::VecDeque;

use crate::color::Color;
use crate::layers::{Layer, LayerRegistry};
use crate::store::Compositor;

/// Store keeping a FIFO of layers, applied oldest-first.
///
/// Bounded at 100 slots per registry entry; a full queue silently drops
/// further additions rather than growing or failing the paint gesture.
#[derive(Clone, Debug)]
pub struct AdditiveStore {
    queue: VecDeque<Layer>,
    capacity: usize,
}

impl AdditiveStore {
    pub fn new(registry: &LayerRegistry) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity: 100 * registry.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Compositor for AdditiveStore {
    fn add(&mut self, layer: Layer) -> bool {
        if self.queue.len() >= self.capacity {
            log::warn!(
                "additive store full at {} layers, dropping {:?}",
                self.capacity,
                layer.name()
            );
            return true;
        }
        self.queue.push_back(layer);
        true
    }

    /// Drops the oldest layer, whatever was passed in.
    fn erase(&mut self, _layer: Layer) -> bool {
        self.queue.pop_front();
        true
    }

    /// Left-to-right fold over the queue's current order. The queue itself
    /// is not touched, so back-to-back reads see the same rotation.
    fn get_color(&mut self, start: Color, timestamp: f32, x: u32, y: u32) -> Color {
        self.queue
            .iter()
            .fold(start, |color, layer| layer.apply(color, timestamp, x, y))
    }

    fn special(&mut self) {
        // Drain through a LIFO stack: oldest layer comes back last.
        let mut stack: Vec<Layer> = Vec::with_capacity(self.queue.len());
        while let Some(layer) = self.queue.pop_front() {
            stack.push(layer);
        }
        while let Some(layer) = stack.pop() {
            self.queue.push_back(layer);
        }
    }
}
