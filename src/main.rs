use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use goalmouth::camera::{Camera, OrbitControls};
use goalmouth::cli::Cli;
use goalmouth::input;
use goalmouth::renderer::{HudState, Renderer};
use goalmouth::stage::Stage;

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2.0, 5.0);

// === Application ===

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    stage: Stage,
    camera: Camera,
    orbit: OrbitControls,
    last_frame_time: Instant,
    frame_count: u32,
    fps: f32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        let stage = Stage::new(cli.keeper);
        Self {
            cli,
            window: None,
            renderer: None,
            stage,
            camera: Camera::new(INITIAL_WINDOW_WIDTH as f32 / INITIAL_WINDOW_HEIGHT as f32),
            orbit: OrbitControls::from_position(INITIAL_CAMERA_POSITION, Vec3::ZERO),
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    fn hud_state(&self) -> HudState {
        let flight = self.stage.flight();
        HudState {
            fps: self.fps,
            first_arc: flight.first_arc,
            second_arc: flight.second_arc,
            speed: flight.speed,
            orbit: self.stage.orbit_enabled(),
            keeper: self.stage.keeper_shown(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(delta);

        // Scripted ball flight, then camera sync, then rasterize
        self.stage.tick();
        self.orbit.enabled = self.stage.orbit_enabled();
        self.orbit.update();
        let view_proj = self.camera.projection() * self.orbit.view();

        let hud_state = self.hud_state();
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            match renderer.render(self.stage.scene(), view_proj, window, &hud_state) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    eprintln!("Out of GPU memory, exiting");
                    event_loop.exit();
                }
                Err(e) => eprintln!("Render error: {}", e),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Goalmouth")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer =
                match pollster::block_on(Renderer::new(window.clone(), !self.cli.no_ui)) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("Failed to initialize renderer: {}", e);
                        event_loop.exit();
                        return;
                    }
                };

            let size = window.inner_size();
            self.camera.set_aspect(size.width, size.height);
            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let the HUD see the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        self.orbit.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(action) = input::action_for_event(&event) {
                    self.stage.apply(action);
                }
            }
            WindowEvent::Resized(size) => {
                self.camera.set_aspect(size.width, size.height);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    println!("Goalmouth - o orbit | 1/2 ball arcs | up/down speed | 3 shrink goal | w wireframe | g keeper | Esc quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
