use glam::{Mat4, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

pub const FOV_Y_DEG: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.5;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 50.0;
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Perspective projection parameters
pub struct Camera {
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            fovy: FOV_Y_DEG.to_radians(),
            aspect,
            znear: Z_NEAR,
            zfar: Z_FAR,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Drag-to-revolve camera control around a fixed look-at point.
///
/// Mouse input accumulates between frames; `update` applies it to the
/// spherical pose when enabled and discards it when not, so drags made
/// while the control is off never replay later.
pub struct OrbitControls {
    pub enabled: bool,
    target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
    drag_delta: (f32, f32),
    zoom_delta: f32,
}

impl OrbitControls {
    /// Start from an explicit camera position looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let pitch = (offset.y / distance).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            enabled: true,
            target,
            distance,
            yaw,
            pitch,
            dragging: false,
            last_cursor: None,
            drag_delta: (0.0, 0.0),
            zoom_delta: 0.0,
        }
    }

    /// Accumulate pointer input from the window event stream.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if self.dragging {
                    if let Some(last) = self.last_cursor {
                        self.drag_delta.0 += (current.0 - last.0) as f32;
                        self.drag_delta.1 += (current.1 - last.1) as f32;
                    }
                }
                self.last_cursor = Some(current);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.zoom_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
            }
            _ => {}
        }
    }

    /// Ingest the accumulated input. A disabled control drops it.
    pub fn update(&mut self) {
        let (dx, dy) = std::mem::take(&mut self.drag_delta);
        let zoom = std::mem::take(&mut self.zoom_delta);
        if !self.enabled {
            return;
        }

        self.yaw -= dx * ROTATE_SPEED;
        self.pitch = (self.pitch + dy * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
        self.distance = (self.distance - zoom * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}
