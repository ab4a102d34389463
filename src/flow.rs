//! Flow control and application event loop.
//!
//! A "flow" is a self-contained scene: it builds its GPU resources once,
//! reacts to window events, updates every frame and says what to draw. The
//! [`App`] owns the window and the [`Context`] and drives all flows.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow`] is the trait for scenes that handle events and rendering
//! - [`Out`] lets a lifecycle hook reconfigure the context
//!
//! # Lifecycle Flow
//!
//! The event loop follows this pattern each frame:
//! 1. Measure the frame time
//! 2. Let the camera rig move the camera, re-uploading the camera uniform if it moved
//! 3. Update flow state (via `on_update`)
//! 4. Call flows' `on_render()` to collect renderable objects
//! 5. Clear, draw all objects with the active scene pipeline, draw the frame rate overlay
//! 6. Present the frame and count it

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use anyhow::Context as _;
use instant::Duration;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::Config,
    context::{Context, InitContext},
    data_structures::model::DrawMesh,
    overlay::layout_text,
    render::{Instanced, Render},
    timer::FpsTimer,
};

/// Distance of the frame rate text from the left and bottom window border, in pixels.
const OVERLAY_MARGIN: f32 = 8.0;
/// Size of one font pixel of the frame rate text.
const OVERLAY_PIXEL: f32 = 2.0;

///
/// This is the Output Type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to toggle the
/// cull mode or change the clear colour.
///
/// `Empty` is the default output used when nothing needs to change.
///
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

impl Debug for Out {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Out::Configure(_) => f.write_str("Configure(|&mut Context| -> {...})"),
            Out::Empty => f.write_str("Empty"),
        }
    }
}

/// Trait for implementing a renderable scene.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once after the flow was constructed; configure the context here
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_update()` is called every frame before rendering
/// 4. `on_render()` is called each frame and specifies how to render `self`
pub trait GraphicsFlow {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context) -> Out;

    /// Update state every frame.
    ///
    /// Called every frame with the elapsed time `dt`. The camera has already
    /// been moved for this frame.
    fn on_update(&mut self, ctx: &Context, dt: Duration) -> Out;

    /// Handle window events (keyboard, mouse, window resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, event: &WindowEvent) -> Out;

    /// Return renderable objects for this flow.
    ///
    /// Draws are submitted in the order they appear in the returned tree.
    fn on_render(&self) -> Render<'_>;
}

impl Debug for dyn GraphicsFlow + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`, or the reason it could not be built.
pub type FlowConstructor = Box<dyn FnOnce(InitContext) -> FlowFuture>;

/// The future a [`FlowConstructor`] resolves to.
pub type FlowFuture = Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn GraphicsFlow>>>>>;

/// GPU context plus per-window frame bookkeeping.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    timer: FpsTimer,
    is_surface_configured: bool,
}

impl AppState {
    fn new(ctx: Context) -> Self {
        Self {
            ctx,
            timer: FpsTimer::new(),
            is_surface_configured: true,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.is_surface_configured = self.ctx.resize(width, height);
    }

    fn render(&mut self, graphics_flows: &[Box<dyn GraphicsFlow>]) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let quads = layout_text(
            &self.timer.fps_text(),
            OVERLAY_MARGIN,
            self.ctx.config.height as f32 - OVERLAY_MARGIN,
            OVERLAY_PIXEL,
            self.ctx.overlay_colour,
        );
        self.ctx.overlay.prepare(
            &self.ctx.device,
            &self.ctx.queue,
            self.ctx.config.width,
            self.ctx.config.height,
            &quads,
        );

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            let mut trans: Vec<Instanced> = Vec::new();
            graphics_flows
                .iter()
                .for_each(|flow| flow.on_render().set_pipelines(&mut trans));

            render_pass.set_pipeline(self.ctx.scene_pipeline());
            for instanced in trans {
                if instanced.amount == 0 || instanced.instance.size() == 0 {
                    log::warn!("skipping {:?}: zero instances", instanced.mesh.name);
                    continue;
                }
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.draw_mesh_instanced(
                    instanced.mesh,
                    0..instanced.amount as u32,
                    &self.ctx.camera.bind_group,
                );
            }

            self.ctx.overlay.draw(&mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConstructor>>,
    cursor: PhysicalPosition<f64>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, constructors: Vec<FlowConstructor>) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            cursor: PhysicalPosition::new(0.0, 0.0),
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_resizable(window_config.resizable);
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create the window")?,
        );

        let constructors = self.constructors.take().unwrap_or_default();
        let config = &self.config;
        let init_future = async move {
            let ctx = Context::new(window, config).await?;
            let mut flows = Vec::with_capacity(constructors.len());
            for constructor in constructors {
                flows.push(constructor((&ctx).into()).await?);
            }
            anyhow::Ok((ctx, flows))
        };
        let (ctx, flows) = self.async_runtime.block_on(init_future)?;

        let mut app_state = AppState::new(ctx);
        self.graphics_flows = flows;
        for flow in self.graphics_flows.iter_mut() {
            let out = flow.on_init(&mut app_state.ctx);
            handle_flow_output(&mut app_state.ctx, out);
        }
        app_state.ctx.window.request_redraw();
        self.state = Some(app_state);
        log::info!("initialized {} flow(s)", self.graphics_flows.len());
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e.context("App initialization failed"));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // general stuff
        state.ctx.camera.rig.handle_window_events(&event);

        self.graphics_flows.iter_mut().for_each(|f| {
            let out = f.on_window_events(&state.ctx, &event);
            handle_flow_output(&mut state.ctx, out);
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
                let (width, height) = (state.ctx.config.width, state.ctx.config.height);
                state
                    .ctx
                    .trackball
                    .drag_to(position, width, height, &state.ctx.camera.camera);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => state.ctx.trackball.begin_drag(self.cursor),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => state.ctx.trackball.end_drag(),
            WindowEvent::RedrawRequested => {
                let dt = state.timer.measure();

                // Update the camera
                let ctx = &mut state.ctx;
                if ctx.camera.rig.move_camera(&mut ctx.camera.camera, dt) {
                    ctx.camera.write_uniform(&ctx.queue, &ctx.projection);
                }

                // Update custom stuff
                self.graphics_flows.iter_mut().for_each(|f| {
                    let out = f.on_update(&state.ctx, dt);
                    handle_flow_output(&mut state.ctx, out);
                });

                match state.render(&self.graphics_flows) {
                    Ok(_) => state.timer.update_frame_count(),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of memory while acquiring the surface texture, exiting");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("skipping frame: {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_flow_output(ctx: &mut Context, out: Out) {
    match out {
        Out::Configure(f) => f(ctx),
        Out::Empty => (),
    }
}

/// Opens the window and runs the given flows until it is closed.
///
/// Logging is expected to be initialized by the caller.
pub fn run(config: Config, constructors: Vec<FlowConstructor>) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("failed to create the event loop")?;
    let mut app = App::new(config, constructors)?;

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
