//! Camera parameters passed through to the backend.

use glam::Vec3;

use crate::capabilities::extensions;

/// Projection used by the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection with a vertical field of view in radians.
    Perspective { fovy: f32 },
    /// Orthographic projection with the given view height in world units.
    Orthographic { height: f32 },
}

impl Projection {
    /// Returns the backend extension this projection depends on.
    pub fn required_extension(&self) -> &'static str {
        match self {
            Self::Perspective { .. } => extensions::KHR_CAMERA_PERSPECTIVE,
            Self::Orthographic { .. } => extensions::KHR_CAMERA_ORTHOGRAPHIC,
        }
    }

    /// Returns the backend camera subtype name.
    pub fn subtype(&self) -> &'static str {
        match self {
            Self::Perspective { .. } => "perspective",
            Self::Orthographic { .. } => "orthographic",
        }
    }
}

/// Camera placement and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParameters {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look direction (normalized).
    pub direction: Vec3,
    /// Up direction (normalized).
    pub up: Vec3,
    /// Projection and its parameters.
    pub projection: Projection,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl CameraParameters {
    /// Creates a perspective camera. Directions are normalized.
    pub fn perspective(position: Vec3, direction: Vec3, up: Vec3, fovy: f32, aspect: f32) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            up: up.normalize(),
            projection: Projection::Perspective { fovy },
            aspect,
        }
    }

    /// Creates a perspective camera at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, fovy: f32, aspect: f32) -> Self {
        Self::perspective(position, target - position, up, fovy, aspect)
    }

    /// Creates a perspective camera that sees the whole box `(min, max)`.
    ///
    /// The camera looks down -Z at the box center from far enough away for
    /// the bounding sphere to fit the vertical field of view.
    pub fn framing(bounds: (Vec3, Vec3), fovy: f32, aspect: f32) -> Self {
        let (min, max) = bounds;
        let center = (min + max) * 0.5;
        let radius = ((max - min).length() * 0.5).max(f32::EPSILON);
        let distance = radius / (fovy * 0.5).sin();
        Self::look_at(center + Vec3::Z * distance, center, Vec3::Y, fovy, aspect)
    }

    /// Sets the projection.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self::perspective(
            Vec3::new(2.0, 1.0, 10.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            0.7853,
            1.0,
        )
    }
}
