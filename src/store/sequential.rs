use std::collections::{BTreeMap, BTreeSet};

use crate::color::Color;
use crate::layers::Layer;
use crate::store::Compositor;

/// Store tracking, per layer index, whether that layer is applied.
///
/// Every layer ever added stays in the index-sorted map; `applying` and
/// `not_applying` grow monotonically and a layer is effective only while its
/// index sits in the first set and not the second.
#[derive(Clone, Debug, Default)]
pub struct SequentialStore {
    layers: BTreeMap<usize, Layer>,
    applying: BTreeSet<usize>,
    not_applying: BTreeSet<usize>,
}

impl SequentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_active(&self, index: usize) -> bool {
        self.applying.contains(&index) && !self.not_applying.contains(&index)
    }

    /// Currently effective layers, in ascending index order.
    pub fn active_layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers
            .values()
            .filter(|layer| self.is_active(layer.index()))
            .copied()
    }
}

impl Compositor for SequentialStore {
    fn add(&mut self, layer: Layer) -> bool {
        self.layers.entry(layer.index()).or_insert(layer);
        self.applying.insert(layer.index());
        true
    }

    fn erase(&mut self, layer: Layer) -> bool {
        self.not_applying.insert(layer.index());
        true
    }

    fn get_color(&mut self, start: Color, timestamp: f32, x: u32, y: u32) -> Color {
        if self.layers.is_empty() {
            return start;
        }
        let mut color = start;
        for layer in self.layers.values() {
            if self.is_active(layer.index()) {
                color = layer.apply(color, timestamp, x, y);
            }
        }
        color
    }

    /// Deactivates the active layer with the lexicographically median name;
    /// even counts take the smaller of the two middle names.
    fn special(&mut self) {
        let mut named: Vec<(&'static str, usize)> = self
            .active_layers()
            .map(|layer| (layer.name(), layer.index()))
            .collect();
        if named.is_empty() {
            return;
        }
        named.sort();
        let (_, index) = named[(named.len() - 1) / 2];
        self.not_applying.insert(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerRegistry;
    use pretty_assertions::assert_eq;

    fn active_names(store: &SequentialStore) -> Vec<&'static str> {
        store.active_layers().map(|l| l.name()).collect()
    }

    #[test]
    fn test_layers_fold_in_index_order() {
        let registry = LayerRegistry::standard();
        let mut store = SequentialStore::new();
        // Added out of order; black (index 0) must still run first.
        store.add(registry.by_name("lighten").unwrap());
        store.add(registry.by_name("black").unwrap());
        let got = store.get_color(Color::rgb(200, 200, 200), 0.0, 0, 0);
        assert_eq!(got, Color::rgb(40, 40, 40));
    }

    #[test]
    fn test_erase_skips_layer_but_keeps_ordering() {
        let registry = LayerRegistry::standard();
        let mut store = SequentialStore::new();
        store.add(registry.by_name("black").unwrap());
        store.add(registry.by_name("lighten").unwrap());
        store.erase(registry.by_name("black").unwrap());
        assert_eq!(active_names(&store), vec!["lighten"]);
        let got = store.get_color(Color::rgb(10, 10, 10), 0.0, 0, 0);
        assert_eq!(got, Color::rgb(50, 50, 50));
    }

    #[test]
    fn test_erase_then_add_leaves_layer_inactive() {
        // Both status sets grow monotonically, so an erased index never
        // comes back. Deliberate fidelity to the two-set semantics.
        let registry = LayerRegistry::standard();
        let darken = registry.by_name("darken").unwrap();
        let mut store = SequentialStore::new();
        store.add(darken);
        store.erase(darken);
        store.add(darken);
        assert_eq!(active_names(&store), Vec::<&str>::new());
    }

    #[test]
    fn test_get_color_accumulates_nothing_across_calls() {
        let registry = LayerRegistry::standard();
        let mut store = SequentialStore::new();
        store.add(registry.by_name("darken").unwrap());
        let start = Color::rgb(100, 100, 100);
        assert_eq!(store.get_color(start, 0.0, 0, 0), start.shift(-40));
        assert_eq!(store.get_color(start, 0.0, 0, 0), start.shift(-40));
    }

    #[test]
    fn test_special_removes_median_of_three() {
        let registry = LayerRegistry::standard();
        let mut store = SequentialStore::new();
        for name in ["black", "darken", "lighten"] {
            store.add(registry.by_name(name).unwrap());
        }
        store.special();
        assert_eq!(active_names(&store), vec!["black", "lighten"]);
    }

    #[test]
    fn test_special_even_count_takes_smaller_middle_name() {
        let registry = LayerRegistry::standard();
        let mut store = SequentialStore::new();
        // Active names {"blue", "black"}: median pair is the whole set,
        // "black" is the smaller.
        store.add(registry.by_name("blue").unwrap());
        store.add(registry.by_name("black").unwrap());
        store.special();
        assert_eq!(active_names(&store), vec!["blue"]);
    }

    #[test]
    fn test_special_removes_exactly_one() {
        let registry = LayerRegistry::standard();
        let mut store = SequentialStore::new();
        for layer in registry.iter() {
            store.add(layer);
        }
        store.special();
        assert_eq!(store.active_layers().count(), registry.len() - 1);
    }

    #[test]
    fn test_special_on_empty_is_a_noop() {
        let mut store = SequentialStore::new();
        store.special();
        assert_eq!(active_names(&store), Vec::<&str>::new());
    }
}
