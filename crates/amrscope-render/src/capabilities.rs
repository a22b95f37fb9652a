//! Backend capability flags.
//!
//! A backend advertises a list of named extensions. They are resolved once into
//! a [`Capabilities`] value which is then passed explicitly to whatever needs
//! to know about them.

use std::collections::BTreeSet;

/// Well-known extension names.
pub mod extensions {
    /// Block-structured AMR spatial fields.
    pub const KHR_SPATIAL_FIELD_AMR: &str = "ANARI_KHR_SPATIAL_FIELD_AMR";
    /// Perspective cameras.
    pub const KHR_CAMERA_PERSPECTIVE: &str = "ANARI_KHR_CAMERA_PERSPECTIVE";
    /// Orthographic cameras.
    pub const KHR_CAMERA_ORTHOGRAPHIC: &str = "ANARI_KHR_CAMERA_ORTHOGRAPHIC";
    /// Directional lights.
    pub const KHR_LIGHT_DIRECTIONAL: &str = "ANARI_KHR_LIGHT_DIRECTIONAL";
    /// Point lights.
    pub const KHR_LIGHT_POINT: &str = "ANARI_KHR_LIGHT_POINT";
    /// Device-specific sampler volumes.
    pub const VSNRAY_SAMPLER_VOLUME: &str = "ANARI_VSNRAY_SAMPLER_VOLUME";
}

/// Set of extensions a backend supports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    available: BTreeSet<String>,
}

impl Capabilities {
    /// Creates an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves capabilities from a backend's advertised extension names.
    pub fn from_extensions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether the named extension is supported.
    pub fn has(&self, name: &str) -> bool {
        self.available.contains(name)
    }

    /// Returns the names from `required` that are not supported.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required.iter().copied().filter(|n| !self.has(n)).collect()
    }

    /// Logs a warning for every name in `required` that is not supported.
    ///
    /// Returns true if all of them are supported.
    pub fn warn_missing(&self, required: &[&str]) -> bool {
        let missing = self.missing(required);
        for name in &missing {
            log::warn!("device doesn't support {name}");
        }
        missing.is_empty()
    }

    /// Iterates over supported extension names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.available.iter().map(String::as_str)
    }

    /// Returns the number of supported extensions.
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Returns true if no extension is supported.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::extensions::*;
    use super::*;

    #[test]
    fn test_resolve_and_query() {
        let caps = Capabilities::from_extensions([KHR_CAMERA_PERSPECTIVE, VSNRAY_SAMPLER_VOLUME]);
        assert!(caps.has(KHR_CAMERA_PERSPECTIVE));
        assert!(caps.has(VSNRAY_SAMPLER_VOLUME));
        assert!(!caps.has(KHR_LIGHT_DIRECTIONAL));
        assert_eq!(caps.len(), 2);
    }

    #[test]
    fn test_missing() {
        let caps = Capabilities::from_extensions(vec![KHR_CAMERA_PERSPECTIVE.to_string()]);
        assert_eq!(
            caps.missing(&[KHR_CAMERA_PERSPECTIVE, KHR_LIGHT_DIRECTIONAL]),
            vec![KHR_LIGHT_DIRECTIONAL]
        );
        assert!(!caps.warn_missing(&[KHR_LIGHT_DIRECTIONAL]));
        assert!(caps.warn_missing(&[KHR_CAMERA_PERSPECTIVE]));
        assert!(Capabilities::new().is_empty());
    }
}
