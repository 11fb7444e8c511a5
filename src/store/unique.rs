use crate::color::Color;
use crate::layers::Layer;
use crate::store::Compositor;

/// Store holding at most one layer.
///
/// Remembers the last computed colour so the inverted display mode toggled by
/// `special` can flip it without re-running the held transform.
#[derive(Clone, Debug, Default)]
pub struct UniqueStore {
    current: Option<Layer>,
    cached: Option<Color>,
    inverted: bool,
}

impl UniqueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Compositor for UniqueStore {
    fn add(&mut self, layer: Layer) -> bool {
        if self.current == Some(layer) {
            return false;
        }
        self.current = Some(layer);
        self.inverted = false;
        true
    }

    /// Clears the held layer no matter which layer is passed in.
    fn erase(&mut self, _layer: Layer) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.current = None;
        self.inverted = false;
        true
    }

    fn get_color(&mut self, start: Color, timestamp: f32, x: u32, y: u32) -> Color {
        if self.inverted {
            // Display-only flip over the cache; the cache itself stays put so
            // repeated queries do not flicker.
            return self.cached.unwrap_or(start).invert();
        }
        let color = match self.current {
            Some(layer) => layer.apply(start, timestamp, x, y),
            None => start,
        };
        self.cached = Some(color);
        color
    }

    fn special(&mut self) {
        self.inverted = !self.inverted;
    }
}
