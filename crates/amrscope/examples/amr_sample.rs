//! Renders the two-block AMR sample scene and writes it to a PNG.
//!
//! Usage: `cargo run --example amr_sample [options.json]`
//!
//! Without a real device the headless backend is used, so the image only
//! shows the background; the pipeline up to the backend is the real one.

use amrscope::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    log::info!(
        "library '{}', device '{}', {}x{} @ {} spp",
        options.library,
        options.device,
        options.image_size.x,
        options.image_size.y,
        options.pixel_samples
    );

    let mut backend = HeadlessBackend::new();
    let capabilities = backend.capabilities().clone();
    capabilities.warn_missing(&[
        extensions::KHR_CAMERA_PERSPECTIVE,
        extensions::KHR_LIGHT_DIRECTIONAL,
    ]);
    if capabilities.has(extensions::VSNRAY_SAMPLER_VOLUME) {
        log::info!("device supports sampler volumes");
    }

    let scene = sample_scene(&options, &capabilities)?;
    let image = render_to_image(&mut backend, &scene)?;
    image.save(&options.output)?;

    println!("Output: {}", options.output);
    Ok(())
}
