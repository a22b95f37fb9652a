//! Rendering-backend boundary for amrscope.
//!
//! This crate does not render anything itself. It provides:
//! - Scene assembly: volumes, lights, camera, renderer and frame settings
//! - The [`Backend`] trait a device implements, and [`render`] to drive it
//! - Capability flags and the backend status channel
//! - Frame buffer read-back with the vertical flip images need

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel math casts between u8/u32/usize/f32 on bounded values
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod backend;
pub mod camera;
pub mod capabilities;
pub mod error;
pub mod framebuffer;
pub mod scene;
pub mod status;

pub use backend::{quantize, render, Backend, HeadlessBackend, RenderedFrame};
pub use camera::{CameraParameters, Projection};
pub use capabilities::{extensions, Capabilities};
pub use error::{RenderError, RenderResult};
pub use framebuffer::FrameBuffer;
pub use scene::{
    assemble, ColorFormat, FrameParameters, Light, RendererParameters, Scene, SceneBuilder,
    Volume, World,
};
pub use status::{handle_all, handle_status, Severity, StatusMessage};
