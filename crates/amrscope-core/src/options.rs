//! Configuration options for amrscope.

use std::path::Path;

use glam::{UVec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration consumed by the layer that loads a backend and renders.
///
/// Missing fields fall back to their defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Backend library to load.
    pub library: String,

    /// Device subtype within the library.
    pub device: String,

    /// Renderer subtype.
    pub renderer: String,

    /// Output image size in pixels.
    pub image_size: UVec2,

    /// Background color (RGBA).
    pub background: Vec4,

    /// Samples per pixel.
    pub pixel_samples: u32,

    /// File the rendered frame is written to.
    pub output: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            library: "environment".to_string(),
            device: "default".to_string(),
            renderer: "default".to_string(),
            image_size: UVec2::new(800, 800),
            background: Vec4::new(0.1, 0.1, 0.1, 1.0),
            pixel_samples: 32,
            output: "anari-amr-sample.png".to_string(),
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Writes options to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Sets the backend library.
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = library.into();
        self
    }

    /// Sets the device subtype.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Sets the image size.
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_size = UVec2::new(width, height);
        self
    }

    /// Sets the background color.
    pub fn with_background(mut self, background: Vec4) -> Self {
        self.background = background;
        self
    }

    /// Sets the samples per pixel.
    pub fn with_pixel_samples(mut self, pixel_samples: u32) -> Self {
        self.pixel_samples = pixel_samples;
        self
    }

    /// Sets the output file name.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmrError;

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert_eq!(options.library, "environment");
        assert_eq!(options.image_size, UVec2::new(800, 800));
        assert_eq!(options.pixel_samples, 32);
    }

    #[test]
    fn test_options_builder() {
        let options = Options::new()
            .with_library("helide")
            .with_image_size(64, 32)
            .with_pixel_samples(4);
        assert_eq!(options.library, "helide");
        assert_eq!(options.image_size, UVec2::new(64, 32));
        assert_eq!(options.pixel_samples, 4);
        assert_eq!(options.device, "default");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = Options::from_json_str(r#"{ "device": "gpu", "pixel_samples": 8 }"#).unwrap();
        assert_eq!(options.device, "gpu");
        assert_eq!(options.pixel_samples, 8);
        assert_eq!(options.output, "anari-amr-sample.png");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Options::from_json_str("{ not json"),
            Err(AmrError::JsonError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("amrscope-options-{}.json", std::process::id()));
        let options = Options::new().with_output("frame.png");
        options.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, options);
    }
}
