//! The seam to an external rendering backend.
//!
//! Backends are passed around as values implementing [`Backend`]; there is no
//! process-wide device. [`render`] submits a scene, waits for the frame,
//! and routes the backend's status messages through [`handle_all`].

use glam::Vec4;

use crate::capabilities::{extensions, Capabilities};
use crate::error::RenderResult;
use crate::framebuffer::FrameBuffer;
use crate::scene::{ColorFormat, Scene};
use crate::status::{handle_all, Severity, StatusMessage};

/// A rendered frame and how long the backend took to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Color channel.
    pub color: FrameBuffer,
    /// Render duration in seconds, if the backend reports one.
    pub duration: Option<f32>,
}

/// A device able to render a [`Scene`].
pub trait Backend {
    /// Returns a human-readable backend name.
    fn name(&self) -> &str;

    /// Returns the extensions this backend supports.
    fn capabilities(&self) -> &Capabilities;

    /// Renders one frame and blocks until it is complete.
    fn render(&mut self, scene: &Scene) -> RenderResult<RenderedFrame>;

    /// Takes the status messages reported since the last call.
    fn drain_status(&mut self) -> Vec<StatusMessage>;
}

/// Renders `scene` on `backend`.
///
/// Status messages are logged; a fatal one fails the call even if the
/// backend returned a frame.
pub fn render<B: Backend + ?Sized>(backend: &mut B, scene: &Scene) -> RenderResult<RenderedFrame> {
    let result = backend.render(scene);
    handle_all(backend.drain_status())?;
    let frame = result?;
    match frame.duration {
        Some(seconds) => log::info!(
            "{}: rendered frame in {:.3}ms",
            backend.name(),
            seconds * 1000.0
        ),
        None => log::info!("{}: rendered frame", backend.name()),
    }
    Ok(frame)
}

/// CPU-side backend that renders the background color only.
///
/// Useful for tests and for exercising the pipeline without a device.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    capabilities: Capabilities,
    status: Vec<StatusMessage>,
    frames_rendered: usize,
}

impl HeadlessBackend {
    /// Creates a backend advertising AMR fields, perspective cameras, and
    /// directional lights.
    pub fn new() -> Self {
        Self::with_extensions([
            extensions::KHR_SPATIAL_FIELD_AMR,
            extensions::KHR_CAMERA_PERSPECTIVE,
            extensions::KHR_LIGHT_DIRECTIONAL,
        ])
    }

    /// Creates a backend advertising exactly the given extensions.
    pub fn with_extensions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capabilities: Capabilities::from_extensions(names),
            status: Vec::new(),
            frames_rendered: 0,
        }
    }

    /// Returns the number of frames rendered so far.
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn name(&self) -> &str {
        "headless"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn render(&mut self, scene: &Scene) -> RenderResult<RenderedFrame> {
        let frame = scene.frame();
        let color = quantize(scene.renderer().background, frame.color_format);
        self.frames_rendered += 1;
        self.status.push(StatusMessage::new(
            Severity::Info,
            format!(
                "frame {}: {} volume(s), {} block(s)",
                self.frames_rendered,
                scene.volumes().len(),
                scene
                    .volumes()
                    .iter()
                    .map(|v| v.value().num_blocks())
                    .sum::<usize>()
            ),
        ));
        Ok(RenderedFrame {
            color: FrameBuffer::filled(frame.size.x, frame.size.y, color),
            duration: Some(0.0),
        })
    }

    fn drain_status(&mut self) -> Vec<StatusMessage> {
        std::mem::take(&mut self.status)
    }
}

/// Converts a linear RGBA color to 8-bit channels in the given format.
/// Alpha is never sRGB-encoded.
pub fn quantize(color: Vec4, format: ColorFormat) -> [u8; 4] {
    let encode = |c: f32| match format {
        ColorFormat::Ufixed8Rgba => c,
        ColorFormat::Ufixed8RgbaSrgb => linear_to_srgb(c),
    };
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        to_u8(encode(color.x)),
        to_u8(encode(color.y)),
        to_u8(encode(color.z)),
        to_u8(color.w),
    ]
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
