use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;

/// One named colour transform from the registry.
///
/// Layers are compared by registry index, never by what they do to a colour.
#[derive(Clone, Copy)]
pub struct Layer {
    index: usize,
    name: &'static str,
    apply: fn(Color, f32, u32, u32) -> Color,
}

impl Layer {
    /// Stable position in the registry.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the transform. Pure in all four arguments.
    pub fn apply(&self, color: Color, timestamp: f32, x: u32, y: u32) -> Color {
        (self.apply)(color, timestamp, x, y)
    }
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Layer {}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("index", &self.index)
            .field("name", &self.name)
            .finish()
    }
}

/// Fixed ordered catalogue of layer transforms.
///
/// Built once at startup and shared by `Arc`; stores receive a handle at
/// construction rather than reaching for process globals.
pub struct LayerRegistry {
    layers: Vec<Layer>,
}

impl LayerRegistry {
    /// The standard nine-transform catalogue, in alphabetical name order.
    pub fn standard() -> Arc<Self> {
        let entries: [(&'static str, fn(Color, f32, u32, u32) -> Color); 9] = [
            ("black", black),
            ("blue", blue),
            ("darken", darken),
            ("green", green),
            ("invert", invert),
            ("lighten", lighten),
            ("rainbow", rainbow),
            ("red", red),
            ("sparkle", sparkle),
        ];
        let layers = entries
            .iter()
            .enumerate()
            .map(|(index, &(name, apply))| Layer { index, name, apply })
            .collect();
        Arc::new(Self { layers })
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Layer> {
        self.layers.get(index).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<Layer> {
        self.layers.iter().find(|l| l.name == name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().copied()
    }
}

fn black(_color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    Color::black()
}

fn blue(color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    Color::rgb(0, 0, color.b)
}

fn darken(color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    color.shift(-40)
}

fn green(color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    Color::rgb(0, color.g, 0)
}

fn invert(color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    color.invert()
}

fn lighten(color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    color.shift(40)
}

/// Hue wheel driven by the clock, offset per cell so strokes shimmer.
fn rainbow(_color: Color, t: f32, x: u32, y: u32) -> Color {
    let phase = t + (x + y) as f32 / 8.0;
    let chan = |off: f32| ((phase + off).sin() * 127.0 + 128.0) as u8;
    Color::rgb(chan(0.0), chan(2.094), chan(4.189))
}

fn red(color: Color, _t: f32, _x: u32, _y: u32) -> Color {
    Color::rgb(color.r, 0, 0)
}

/// Random glitter, reseeded from the call arguments so repeated queries at
/// the same (timestamp, x, y) return the same colour.
fn sparkle(color: Color, t: f32, x: u32, y: u32) -> Color {
    let seed = (t.to_bits() as u64)
        ^ ((x as u64) << 32)
        ^ (y as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = StdRng::seed_from_u64(seed);
    if rng.random_bool(0.2) {
        Color::white()
    } else {
        color.shift(-(rng.random_range(0..60) as i16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registry_order_is_alphabetical() {
        let registry = LayerRegistry::standard();
        let names: Vec<_> = registry.iter().map(|l| l.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn test_layer_equality_is_by_index() {
        let registry = LayerRegistry::standard();
        let invert = registry.by_name("invert").unwrap();
        assert_eq!(invert, registry.get(invert.index()).unwrap());
        assert_ne!(invert, registry.by_name("black").unwrap());
    }

    #[test]
    fn test_sparkle_is_deterministic_per_arguments() {
        let registry = LayerRegistry::standard();
        let sparkle = registry.by_name("sparkle").unwrap();
        let a = sparkle.apply(Color::white(), 1.5, 3, 4);
        let b = sparkle.apply(Color::white(), 1.5, 3, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_invert_layer_matches_color_invert() {
        let registry = LayerRegistry::standard();
        let invert = registry.by_name("invert").unwrap();
        let c = Color::rgb(10, 20, 30);
        assert_eq!(invert.apply(c, 0.0, 0, 0), c.invert());
    }
}
