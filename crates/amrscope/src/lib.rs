//! amrscope: build block-structured AMR volumes and hand them to a volume
//! rendering backend.
//!
//! # Quick Start
//!
//! ```no_run
//! use amrscope::*;
//!
//! fn main() -> RenderResult<()> {
//!     init_logging();
//!
//!     let mut catalog = BlockCatalog::new();
//!     catalog.add_block(0, IVec3::ZERO, UVec3::splat(2), &[0.0, 0.5, 0.0, 0.5, 0.0, 0.5, 0.0, 0.5])?;
//!     catalog.set_refinement_ratio(0, 2)?;
//!
//!     let tf = TransferFunction::build(vec![Vec3::Z, Vec3::X], vec![0.5, 1.0], (0.0, 1.0))?;
//!     let scene = Scene::builder().volume(encode(&catalog)?, tf).build()?;
//!
//!     let mut backend = HeadlessBackend::new();
//!     let image = render_to_image(&mut backend, &scene)?;
//!     assert_eq!(image.dimensions(), (800, 800));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`BlockCatalog`] owns blocks, payload, and refinement ratios
//! - [`encode`] flattens it into a [`FlatField`]
//! - [`TransferFunction`] maps values to color and opacity
//! - [`Scene`] binds fields and transfer function into volumes for a [`Backend`]

mod sample;

pub use amrscope_core::{
    encode, AmrError, Block, BlockBounds, BlockCatalog, BlockId, Box3i, ColorMap,
    ColorMapRegistry, FlatField, IVec3, Options, Result, SharedCatalog, StopKind,
    TransferFunction, UVec2, UVec3, ValueRange, Vec3, Vec4,
};
pub use amrscope_render::{
    assemble, extensions, handle_status, render, Backend, CameraParameters, Capabilities,
    ColorFormat, FrameBuffer, FrameParameters, HeadlessBackend, Light, Projection,
    RenderError, RenderResult, RenderedFrame, RendererParameters, Scene, SceneBuilder, Severity,
    StatusMessage, Volume, World,
};
pub use sample::{sample_catalog, sample_scene, sample_transfer_function};

/// Initializes `env_logger`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Renders `scene` and returns the color channel as a top-left-origin image.
pub fn render_to_image<B: Backend + ?Sized>(
    backend: &mut B,
    scene: &Scene,
) -> RenderResult<image::RgbaImage> {
    render(backend, scene)?.color.to_image()
}

/// Builds a scene for the current catalog state using `options`.
///
/// The camera is framed on the catalog's world-space extent.
pub fn scene_from_options(
    catalog: &BlockCatalog,
    transfer_function: TransferFunction,
    options: &Options,
    capabilities: &Capabilities,
) -> RenderResult<Scene> {
    let field = encode(catalog)?;
    let aspect = options.image_size.x as f32 / options.image_size.y.max(1) as f32;
    let camera = match catalog.domain_bounds()? {
        Some(bounds) => CameraParameters::framing(bounds, 0.7853, aspect),
        None => CameraParameters::default(),
    };
    let scene = Scene::builder()
        .volume(field, transfer_function)
        .light(Light::default())
        .camera(camera)
        .renderer(RendererParameters::from(options))
        .frame(FrameParameters::from(options))
        .capabilities(capabilities)
        .build()?;
    Ok(scene)
}
