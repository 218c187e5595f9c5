//! Application event loop.
//!
//! [`run`] opens a window (a canvas on the web), sets up the GPU [`Context`],
//! builds the scene through the given [`SceneFactory`] and then drives it:
//! camera input, per-frame uniform updates, resizing and presenting.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window and starts the async GPU setup
//! 2. once the context is ready the factory builds the scene, which is uploaded
//! 3. every redraw applies camera input, writes the camera uniform and draws
//! 4. `CloseRequested` or a failed setup exits the loop

use std::{fmt::Debug, iter, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::DEV_BUILD,
    context::Context,
    data_structures::scene::Scene,
    debug::inspect,
    engine::Engine,
    pipelines::light::LightUniform,
    render::SceneRenderer,
    surface::DisplaySurface,
};

/// Builds the scene once the engine and display surface exist.
pub type SceneFactory = Box<dyn FnOnce(&Engine, &DisplaySurface) -> anyhow::Result<Scene>>;

/// Everything that exists once initialisation succeeded.
pub(crate) struct AppState {
    ctx: Context,
    scene: Scene,
    renderer: SceneRenderer,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, factory: SceneFactory) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let engine = Engine::new();
        let surface = DisplaySurface::from_window(&ctx.window);
        log::info!(
            "Starting {} on a {}x{} surface",
            engine.build_info().version,
            surface.width,
            surface.height
        );
        let scene = factory(&engine, &surface)?;
        Ok(Self::with_scene(ctx, scene))
    }

    fn with_scene(mut ctx: Context, scene: Scene) -> Self {
        if let Some(light) = scene.lights.first() {
            ctx.light.write(&ctx.queue, LightUniform::from(light));
        }
        if let Some(camera) = &scene.camera {
            ctx.camera.write(&ctx.queue, camera);
        }
        let renderer = SceneRenderer::new(&ctx.device, ctx.config.format, &ctx.layouts, &scene);
        if scene.debug_layer.is_visible() {
            log::info!("{}", inspect(&scene));
        }
        Self {
            ctx,
            scene,
            renderer,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
            if let Some(camera) = &mut self.scene.camera {
                camera.set_aspect(width, height);
            }
        }
    }

    fn update(&mut self, dt: instant::Duration) {
        if let Some(camera) = &mut self.scene.camera {
            self.ctx.camera.controller.update(camera, dt);
            self.ctx.camera.write(&self.ctx.queue, camera);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

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
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.scene.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
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
            });
            self.renderer.draw(
                &mut render_pass,
                &self.ctx.camera.bind_group,
                &self.ctx.light.bind_group,
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
    #[allow(dead_code)]
    Failed(anyhow::Error),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    #[cfg(target_arch = "wasm32")]
    canvas: Option<web_sys::HtmlCanvasElement>,
    state: Option<AppState>,
    // Taken once the window exists.
    factory: Option<SceneFactory>,
    last_time: Instant,
}

impl App {
    fn new(
        event_loop: &EventLoop<FlowEvent>,
        factory: SceneFactory,
        #[cfg(target_arch = "wasm32")] canvas: web_sys::HtmlCanvasElement,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            #[cfg(target_arch = "wasm32")]
            canvas: Some(canvas),
            state: None,
            factory: Some(factory),
            last_time: Instant::now(),
        })
    }

    fn initialized(&mut self, event_loop: &ActiveEventLoop, result: anyhow::Result<AppState>) {
        match result {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to start the playground: {:#}", e);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(factory) = self.factory.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("Tank playground");

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            window_attributes = window_attributes.with_canvas(self.canvas.take());
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Unable to create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init_future = AppState::new(window, factory);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.async_runtime.block_on(init_future);
            self.initialized(event_loop, result);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok(state) => FlowEvent::Initialized(Box::new(state)),
                    Err(e) => FlowEvent::Failed(e),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("Event loop closed before the playground was initialized");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // Sent by the wasm `spawn_local`
            FlowEvent::Initialized(state) => self.initialized(event_loop, Ok(*state)),
            FlowEvent::Failed(e) => self.initialized(event_loop, Err(e)),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        _event: DeviceEvent,
    ) {
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.ctx.camera.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                state.update(dt);

                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn init_logging() {
    let level = if DEV_BUILD {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init()
        {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Some(level) = level.to_level() {
            // A second bootstrap in the same page finds the logger already set.
            let _ = console_log::init_with_level(level);
        }
    }
}

/// Runs the event loop until the window is closed.
///
/// On the web the loop is handed to the browser and this returns right away.
pub fn run(
    factory: SceneFactory,
    #[cfg(target_arch = "wasm32")] canvas: web_sys::HtmlCanvasElement,
) -> anyhow::Result<()> {
    init_logging();

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let app = App::new(
        &event_loop,
        factory,
        #[cfg(target_arch = "wasm32")]
        canvas,
    )?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut app = app;
        event_loop.run_app(&mut app)?;
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        event_loop.spawn_app(app);
    }

    Ok(())
}
