//! The two-block sample hierarchy.
//!
//! Level 0 is a 2x2x2 block alternating 0 and 0.5 along x; level 1 adds one
//! cell at index (2, 0, 0) with value 1. Both levels refine by 2.

use amrscope_core::{
    BlockCatalog, ColorMapRegistry, IVec3, Options, Result, TransferFunction, UVec3,
};
use amrscope_render::{
    CameraParameters, Capabilities, FrameParameters, Light, RenderResult, RendererParameters,
    Scene,
};

/// Builds the sample catalog.
pub fn sample_catalog() -> Result<BlockCatalog> {
    let mut catalog = BlockCatalog::new();
    catalog.add_block(
        0,
        IVec3::ZERO,
        UVec3::splat(2),
        &[0.0, 0.5, 0.0, 0.5, 0.0, 0.5, 0.0, 0.5],
    )?;
    catalog.add_block(1, IVec3::new(2, 0, 0), UVec3::ONE, &[1.0])?;
    catalog.set_refinement_ratio(0, 2)?;
    catalog.set_refinement_ratio(1, 2)?;
    Ok(catalog)
}

/// Blue to green to red, half-transparent at the low end, over `[0, 1]`.
pub fn sample_transfer_function() -> Result<TransferFunction> {
    TransferFunction::from_color_map(
        &ColorMapRegistry::new(),
        "amr-sample",
        vec![0.5, 1.0],
        (0.0, 1.0),
    )
}

/// Assembles the sample scene with one directional light and the default camera.
pub fn sample_scene(options: &Options, capabilities: &Capabilities) -> RenderResult<Scene> {
    let field = amrscope_core::encode(&sample_catalog()?)?;
    let scene = Scene::builder()
        .volume(field, sample_transfer_function()?)
        .light(Light::default())
        .camera(CameraParameters::default())
        .renderer(RendererParameters::from(options))
        .frame(FrameParameters::from(options))
        .capabilities(capabilities)
        .build()?;
    Ok(scene)
}
