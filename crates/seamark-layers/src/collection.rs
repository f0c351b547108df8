//! Live collection of drawn layers.

use std::collections::HashMap;

use seamark_core::{encode, GeometryRecord, LayerId, Shape};

/// A shape displayed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    shape: Shape,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Enumeration and conversion offered by the drawing collaborator's
/// feature group.
pub trait FeatureGroup {
    /// Visit every layer currently in the group, in draw order.
    fn for_each_layer(&self, f: &mut dyn FnMut(&Layer));

    /// Portable GeoJSON for one layer.
    fn to_portable_geometry(&self, layer: &Layer) -> GeometryRecord {
        encode(layer.shape().geometry())
    }
}

/// Layers keyed by id, with insertion order preserved for enumeration.
#[derive(Debug, Clone)]
pub struct LayerCollection {
    layers: HashMap<LayerId, Layer>,
    draw_order: Vec<LayerId>,
    next_id: u64,
}

impl LayerCollection {
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
            draw_order: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a shape and return the id of its new layer.
    pub fn insert(&mut self, shape: Shape) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, Layer { id, shape });
        self.draw_order.push(id);
        id
    }

    pub fn remove(&mut self, id: LayerId) -> Option<Layer> {
        let layer = self.layers.remove(&id)?;
        self.draw_order.retain(|&other| other != id);
        Some(layer)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.draw_order.iter().filter_map(|id| self.layers.get(id))
    }

    pub fn ids(&self) -> Vec<LayerId> {
        self.draw_order.clone()
    }
}

impl Default for LayerCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGroup for LayerCollection {
    fn for_each_layer(&self, f: &mut dyn FnMut(&Layer)) {
        for layer in self.iter() {
            f(layer);
        }
    }
}
