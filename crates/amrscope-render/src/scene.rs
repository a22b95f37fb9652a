//! Scene assembly: binds encoded fields and a transfer function into volumes
//! and packages them with lights, camera, and renderer settings.
//!
//! A [`Scene`] is built fresh for every render request. Fields and transfer
//! functions are shared through `Arc`, so an interactive loop can rebuild
//! scenes every frame without copying the payload.

use std::sync::Arc;

use amrscope_core::{AmrError, FlatField, Options, Result, TransferFunction, ValueRange};
use glam::{UVec2, Vec3, Vec4};

use crate::camera::CameraParameters;
use crate::capabilities::{extensions, Capabilities};

/// A light source attached to the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Light arriving from infinitely far away along `direction`.
    Directional {
        direction: Vec3,
        irradiance: f32,
        color: Vec3,
    },
    /// Light emitted from a point.
    Point {
        position: Vec3,
        intensity: f32,
        color: Vec3,
    },
}

impl Light {
    /// Creates a white directional light with unit irradiance.
    pub fn directional(direction: Vec3) -> Self {
        Self::Directional {
            direction,
            irradiance: 1.0,
            color: Vec3::ONE,
        }
    }

    /// Returns the backend extension this light depends on.
    pub fn required_extension(&self) -> &'static str {
        match self {
            Self::Directional { .. } => extensions::KHR_LIGHT_DIRECTIONAL,
            Self::Point { .. } => extensions::KHR_LIGHT_POINT,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::directional(Vec3::new(0.0, 0.0, -1.0))
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererParameters {
    /// Renderer subtype.
    pub subtype: String,
    /// Background color (RGBA).
    pub background: Vec4,
    /// Samples per pixel.
    pub pixel_samples: u32,
}

impl Default for RendererParameters {
    fn default() -> Self {
        Self::from(&Options::default())
    }
}

impl From<&Options> for RendererParameters {
    fn from(options: &Options) -> Self {
        Self {
            subtype: options.renderer.clone(),
            background: options.background,
            pixel_samples: options.pixel_samples,
        }
    }
}

/// Pixel format of the color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorFormat {
    /// 8-bit fixed point RGBA with sRGB encoding.
    #[default]
    Ufixed8RgbaSrgb,
    /// 8-bit fixed point RGBA, linear.
    Ufixed8Rgba,
}

/// Output image configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameParameters {
    /// Image size in pixels.
    pub size: UVec2,
    /// Color channel format.
    pub color_format: ColorFormat,
}

impl Default for FrameParameters {
    fn default() -> Self {
        Self::from(&Options::default())
    }
}

impl From<&Options> for FrameParameters {
    fn from(options: &Options) -> Self {
        Self {
            size: options.image_size,
            color_format: ColorFormat::default(),
        }
    }
}

/// A field bound to a transfer function.
#[derive(Debug, Clone)]
pub struct Volume {
    field: Arc<FlatField>,
    transfer_function: Arc<TransferFunction>,
}

impl Volume {
    /// Binds a field to a transfer function.
    pub fn new(field: Arc<FlatField>, transfer_function: Arc<TransferFunction>) -> Self {
        Self {
            field,
            transfer_function,
        }
    }

    /// Returns the field sampled by this volume.
    pub fn value(&self) -> &FlatField {
        &self.field
    }

    /// Returns the transfer function applied to the field.
    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer_function
    }

    /// Returns the color stops.
    pub fn color(&self) -> Vec<[f32; 3]> {
        self.transfer_function.color_array()
    }

    /// Returns the opacity stops.
    pub fn opacity(&self) -> &[f32] {
        self.transfer_function.opacities()
    }

    /// Returns the scalar range the transfer function covers.
    pub fn value_range(&self) -> ValueRange {
        self.transfer_function.value_range()
    }
}

/// Volumes and lights.
#[derive(Debug, Clone)]
pub struct World {
    /// Volumes in the world; never empty.
    pub volumes: Vec<Volume>,
    /// Lights in the world.
    pub lights: Vec<Light>,
}

/// Everything a backend needs to render one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    world: World,
    camera: CameraParameters,
    renderer: RendererParameters,
    frame: FrameParameters,
}

impl Scene {
    /// Starts building a scene.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Returns the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns the volumes.
    pub fn volumes(&self) -> &[Volume] {
        &self.world.volumes
    }

    /// Returns the lights.
    pub fn lights(&self) -> &[Light] {
        &self.world.lights
    }

    /// Returns the camera parameters.
    pub fn camera(&self) -> &CameraParameters {
        &self.camera
    }

    /// Returns the renderer parameters.
    pub fn renderer(&self) -> &RendererParameters {
        &self.renderer
    }

    /// Returns the output frame parameters.
    pub fn frame(&self) -> &FrameParameters {
        &self.frame
    }
}

/// Builder for [`Scene`]. Nothing is validated until [`SceneBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    volumes: Vec<Volume>,
    lights: Vec<Light>,
    camera: CameraParameters,
    renderer: RendererParameters,
    frame: FrameParameters,
    capabilities: Option<Capabilities>,
}

impl SceneBuilder {
    /// Adds a volume binding `field` to `transfer_function`.
    pub fn volume(
        mut self,
        field: impl Into<Arc<FlatField>>,
        transfer_function: impl Into<Arc<TransferFunction>>,
    ) -> Self {
        self.volumes
            .push(Volume::new(field.into(), transfer_function.into()));
        self
    }

    /// Adds one volume per field, all sharing `transfer_function`.
    pub fn volumes<I>(mut self, fields: I, transfer_function: impl Into<Arc<TransferFunction>>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<FlatField>>,
    {
        let transfer_function = transfer_function.into();
        self.volumes.extend(
            fields
                .into_iter()
                .map(|field| Volume::new(field.into(), Arc::clone(&transfer_function))),
        );
        self
    }

    /// Adds a light.
    pub fn light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Adds several lights.
    pub fn lights(mut self, lights: impl IntoIterator<Item = Light>) -> Self {
        self.lights.extend(lights);
        self
    }

    /// Sets the camera.
    pub fn camera(mut self, camera: CameraParameters) -> Self {
        self.camera = camera;
        self
    }

    /// Sets the renderer parameters.
    pub fn renderer(mut self, renderer: RendererParameters) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sets the output frame parameters.
    pub fn frame(mut self, frame: FrameParameters) -> Self {
        self.frame = frame;
        self
    }

    /// Checks lights and camera against these capabilities when building.
    pub fn capabilities(mut self, capabilities: &Capabilities) -> Self {
        self.capabilities = Some(capabilities.clone());
        self
    }

    /// Builds the scene.
    ///
    /// Unsupported light or camera kinds only produce warnings; they are
    /// passed through unchanged.
    ///
    /// # Errors
    ///
    /// [`AmrError::NoVolume`] if no volume was added.
    pub fn build(self) -> Result<Scene> {
        if self.volumes.is_empty() {
            return Err(AmrError::NoVolume);
        }

        if let Some(caps) = &self.capabilities {
            let mut required = vec![
                extensions::KHR_SPATIAL_FIELD_AMR,
                self.camera.projection.required_extension(),
            ];
            required.extend(self.lights.iter().map(Light::required_extension));
            required.sort_unstable();
            required.dedup();
            caps.warn_missing(&required);
        }
        if self.frame.size.cmpeq(UVec2::ZERO).any() {
            log::warn!("frame size {} has no pixels", self.frame.size);
        }

        log::debug!(
            "assembled scene: {} volume(s), {} light(s), {} camera",
            self.volumes.len(),
            self.lights.len(),
            self.camera.projection.subtype()
        );

        Ok(Scene {
            world: World {
                volumes: self.volumes,
                lights: self.lights,
            },
            camera: self.camera,
            renderer: self.renderer,
            frame: self.frame,
        })
    }
}

/// Assembles a scene binding every field to `transfer_function`.
///
/// # Errors
///
/// [`AmrError::NoVolume`] if `fields` is empty.
pub fn assemble<I>(
    fields: I,
    transfer_function: impl Into<Arc<TransferFunction>>,
    lights: impl IntoIterator<Item = Light>,
    camera: CameraParameters,
    renderer: RendererParameters,
) -> Result<Scene>
where
    I: IntoIterator,
    I::Item: Into<Arc<FlatField>>,
{
    Scene::builder()
        .volumes(fields, transfer_function)
        .lights(lights)
        .camera(camera)
        .renderer(renderer)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use amrscope_core::{encode, BlockCatalog, IVec3, UVec3};

    fn field() -> FlatField {
        let mut catalog = BlockCatalog::new();
        catalog
            .add_block(0, IVec3::ZERO, UVec3::ONE, &[0.25])
            .unwrap();
        catalog.set_refinement_ratio(0, 2).unwrap();
        encode(&catalog).unwrap()
    }

    fn transfer_function() -> TransferFunction {
        TransferFunction::build(vec![Vec3::Z, Vec3::X], vec![0.5, 1.0], (0.0, 1.0)).unwrap()
    }

    #[test]
    fn test_assemble_binds_volume() {
        let scene = assemble(
            vec![field()],
            transfer_function(),
            [Light::default()],
            CameraParameters::default(),
            RendererParameters::default(),
        )
        .unwrap();

        assert_eq!(scene.volumes().len(), 1);
        let volume = &scene.volumes()[0];
        assert_eq!(volume.value().data(), &[0.25]);
        assert_eq!(volume.color(), vec![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        assert_eq!(volume.opacity(), &[0.5, 1.0]);
        assert_eq!(volume.value_range(), ValueRange::new(0.0, 1.0));
        assert_eq!(scene.lights(), &[Light::default()]);
        assert_eq!(scene.renderer().pixel_samples, 32);
        assert_eq!(scene.frame().size, UVec2::new(800, 800));
    }

    #[test]
    fn test_assemble_without_fields_fails() {
        let result = assemble(
            Vec::<FlatField>::new(),
            transfer_function(),
            [],
            CameraParameters::default(),
            RendererParameters::default(),
        );
        assert!(matches!(result, Err(AmrError::NoVolume)));
    }

    #[test]
    fn test_shared_field_is_not_copied() {
        let field = Arc::new(field());
        let tf = Arc::new(transfer_function());
        let a = Scene::builder()
            .volume(Arc::clone(&field), Arc::clone(&tf))
            .build()
            .unwrap();
        let b = Scene::builder()
            .volume(Arc::clone(&field), tf)
            .build()
            .unwrap();
        assert!(std::ptr::eq(a.volumes()[0].value(), b.volumes()[0].value()));
        assert_eq!(Arc::strong_count(&field), 3);
    }

    #[test]
    fn test_missing_capabilities_only_warn() {
        let caps = Capabilities::from_extensions([extensions::KHR_CAMERA_PERSPECTIVE]);
        let scene = Scene::builder()
            .volume(field(), transfer_function())
            .light(Light::Point {
                position: Vec3::ONE,
                intensity: 2.0,
                color: Vec3::ONE,
            })
            .capabilities(&caps)
            .build()
            .unwrap();
        assert_eq!(scene.lights().len(), 1);
    }

    #[test]
    fn test_parameters_from_options() {
        let options = Options::new()
            .with_image_size(64, 48)
            .with_pixel_samples(2);
        assert_eq!(FrameParameters::from(&options).size, UVec2::new(64, 48));
        assert_eq!(RendererParameters::from(&options).pixel_samples, 2);
    }
}
