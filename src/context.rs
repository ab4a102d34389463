//! Central GPU and window context.
//!
//! [`Context`] owns everything a frame needs: surface, device, queue, depth
//! buffer, camera, trackball, pipelines and the overlay renderer. Flows get read
//! access every frame and write access through [`crate::flow::Out::Configure`].

use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::{Camera, CameraResources, CameraRig, Projection, Trackball},
    config::Config,
    data_structures::texture,
    pipelines::{constant_color::ConstantColorPipelines, overlay::OverlayRenderer},
};

/// Rasterizer state of the scene pipelines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CullMode {
    /// Both sides of every triangle are drawn.
    #[default]
    None,
    /// Counter-clockwise triangles are front faces, back faces are dropped.
    Back,
}

impl CullMode {
    pub fn toggled(self) -> Self {
        match self {
            CullMode::None => CullMode::Back,
            CullMode::Back => CullMode::None,
        }
    }
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub trackball: Trackball,
    pub clear_colour: wgpu::Color,
    pub cull_mode: CullMode,
    pub pipelines: ConstantColorPipelines,
    pub overlay: OverlayRenderer,
    pub overlay_colour: [f32; 4],
}

impl Context {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        log::info!("adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("moving-sphere-box device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are authored as display values, so a non-sRGB target keeps them as is.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface supports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::debug!("surface configured as {:?}", config.format);

        let camera_config = &app_config.camera;
        let camera = Camera::new(
            camera_config.position,
            camera_config.direction,
            camera_config.up,
        );
        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(camera_config.fovy_degrees),
            camera_config.znear,
            camera_config.zfar,
        );
        let rig = CameraRig::new(camera_config.translation_speed, camera_config.rotation_speed);
        let camera = CameraResources::new(&device, camera, rig, &projection);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let pipelines = ConstantColorPipelines::new(&device, &config, &camera.bind_group_layout);
        let overlay = OverlayRenderer::new(&device, &config);

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            trackball: Trackball::new(camera_config.trackball_speed),
            clear_colour: app_config.clear_colour,
            cull_mode: CullMode::default(),
            pipelines,
            overlay,
            overlay_colour: [0.0, 0.0, 0.0, 1.0],
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Switches between drawing both sides and culling back faces.
    pub fn toggle_cull_mode(&mut self) {
        self.cull_mode = self.cull_mode.toggled();
        log::info!("cull mode: {:?}", self.cull_mode);
    }

    /// Scene pipeline matching the current cull mode.
    pub fn scene_pipeline(&self) -> &wgpu::RenderPipeline {
        self.pipelines.for_cull_mode(self.cull_mode)
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.projection.resize(width, height);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
        self.camera.write_uniform(&self.queue, &self.projection);
        true
    }
}

/// The part of the context a flow constructor may use to create GPU resources.
#[derive(Debug, Clone)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        // Device and Queue are reference counted, cloning only clones the handle
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
        }
    }
}
