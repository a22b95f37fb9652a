//! Named color ramps used to seed transfer function colors.
//!
//! A preset is only a list of color stops; evaluation happens in
//! [`TransferFunction::sample`](crate::TransferFunction::sample) once the stops
//! are paired with opacities and a value range.

use std::collections::BTreeMap;

use glam::Vec3;

const VIRIDIS: &[[f32; 3]] = &[
    [0.267, 0.004, 0.329],
    [0.253, 0.265, 0.529],
    [0.163, 0.471, 0.558],
    [0.134, 0.658, 0.517],
    [0.477, 0.821, 0.318],
    [0.993, 0.906, 0.144],
];

const COOLWARM: &[[f32; 3]] = &[
    [0.230, 0.299, 0.754],
    [0.552, 0.690, 0.996],
    [0.866, 0.866, 0.866],
    [0.956, 0.604, 0.486],
    [0.706, 0.016, 0.150],
];

const GRAYSCALE: &[[f32; 3]] = &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

// Blue, green, red, red: the ramp of the two-block sample scene.
const AMR_SAMPLE: &[[f32; 3]] = &[
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
];

const PRESETS: &[(&str, &[[f32; 3]])] = &[
    ("amr-sample", AMR_SAMPLE),
    ("coolwarm", COOLWARM),
    ("grayscale", GRAYSCALE),
    ("viridis", VIRIDIS),
];

/// A named sequence of evenly spaced color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    /// Name the map is registered under.
    pub name: String,
    /// Color stops, first maps to the low end of the value range.
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    fn from_table(name: &str, table: &[[f32; 3]]) -> Self {
        Self::new(name, table.iter().copied().map(Vec3::from_array).collect())
    }
}

/// Color maps keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ColorMapRegistry {
    color_maps: BTreeMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a registry holding the built-in presets.
    pub fn new() -> Self {
        let mut registry = Self::default();
        for (name, table) in PRESETS {
            registry.register(ColorMap::from_table(name, table));
        }
        registry
    }

    /// Registers a color map, replacing any map with the same name.
    pub fn register(&mut self, color_map: ColorMap) {
        if let Some(old) = self.color_maps.insert(color_map.name.clone(), color_map) {
            log::debug!("replaced color map '{}'", old.name);
        }
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Returns all color map names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.color_maps.keys().map(String::as_str)
    }
}
