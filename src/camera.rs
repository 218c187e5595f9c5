//! Arc-rotate camera, its input controller and the GPU side of it.
//!
//! The camera orbits `target` at `radius`. `alpha` is the longitudinal and
//! `beta` the latitudinal angle; `beta == π/2` looks at the target horizontally.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3};
use instant::Duration;
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use crate::pipelines::mk_camera_bind_group_layout;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const BETA_EPSILON: f32 = 0.01;

/// Wheel units reported for one notch of a line-based mouse wheel.
pub const WHEEL_NOTCH: f32 = 120.0;
const WHEEL_DIVISOR: f32 = 40.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ArcRotateCamera {
    pub name: String,
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vector3<f32>,
    pub fovy: Rad<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub lower_radius_limit: Option<f32>,
    /// Scales wheel input: one notch zooms by `WHEEL_NOTCH / (wheel_precision * 40)`
    /// world units. Higher means slower zoom.
    pub wheel_precision: f32,
    /// Radians per dragged pixel.
    pub angular_sensibility: f32,
    pub control_attached: bool,
}

impl ArcRotateCamera {
    pub fn new(name: &str, alpha: f32, beta: f32, radius: f32, target: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            alpha,
            beta,
            radius,
            target,
            fovy: Rad(0.8),
            aspect: 1.0,
            znear: 1.0,
            zfar: 10000.0,
            lower_radius_limit: None,
            wheel_precision: 3.0,
            angular_sensibility: 0.001,
            control_attached: false,
        }
    }

    pub fn attach_control(&mut self) {
        self.control_attached = true;
    }

    pub fn detach_control(&mut self) {
        self.control_attached = false;
    }

    pub fn position(&self) -> Vector3<f32> {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target + Vector3::new(cos_a * sin_b, cos_b, sin_a * sin_b) * self.radius
    }

    /// Right-handed view. At the default angles (`alpha = -π/2`, `beta = π/2`)
    /// the camera sits on -Z looking towards +Z, so world +X is drawn on the
    /// left of the screen.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = self.position();
        let forward = (self.target - eye).normalize();
        // Looking straight up or down needs a different up vector.
        let up = if forward.cross(Vector3::unit_y()).magnitude2() < 1e-8 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        Matrix4::look_at_rh(
            Point3::new(eye.x, eye.y, eye.z),
            Point3::new(self.target.x, self.target.y, self.target.z),
            up,
        )
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Follows the surface size. A zero-sized surface keeps the current aspect.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn rotate(&mut self, d_alpha: f32, d_beta: f32) {
        self.alpha += d_alpha;
        self.beta = (self.beta + d_beta).clamp(BETA_EPSILON, PI - BETA_EPSILON);
    }

    pub fn zoom(&mut self, delta: f32) {
        let lower = self.lower_radius_limit.unwrap_or(0.0).max(f32::EPSILON);
        self.radius = (self.radius - delta).max(lower);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &ArcRotateCamera) {
        self.view_position = camera.position().extend(1.0).into();
        self.view_proj = (camera.projection_matrix() * camera.view_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in pointer input for an attached [`ArcRotateCamera`]: drag with the
/// left button to orbit, scroll to zoom.
#[derive(Debug, Default)]
pub struct CameraController {
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
    rotate_alpha: f32,
    rotate_beta: f32,
    scroll: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                if !self.dragging {
                    self.last_cursor = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let Some(last) = self.last_cursor {
                        self.handle_mouse(position.x - last.x, position.y - last.y);
                    }
                }
                self.last_cursor = Some(*position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y * WHEEL_NOTCH,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32,
                };
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.rotate_alpha += dx as f32;
        self.rotate_beta += dy as f32;
    }

    /// Applies the input gathered since the last frame.
    ///
    /// Cameras without attached control ignore it; the pending input is dropped either way.
    pub fn update(&mut self, camera: &mut ArcRotateCamera, _dt: Duration) {
        if camera.control_attached {
            camera.rotate(
                -self.rotate_alpha * camera.angular_sensibility,
                -self.rotate_beta * camera.angular_sensibility,
            );
            if camera.wheel_precision > 0.0 {
                camera.zoom(self.scroll / (camera.wheel_precision * WHEEL_DIVISOR));
            }
        }
        self.rotate_alpha = 0.0;
        self.rotate_beta = 0.0;
        self.scroll = 0.0;
    }
}

/// GPU resources of the active camera.
#[derive(Debug)]
pub struct CameraResources {
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn write(&mut self, queue: &wgpu::Queue, camera: &ArcRotateCamera) {
        self.uniform.update_view_proj(camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_camera_resources(device: &wgpu::Device, uniform: CameraUniform) -> CameraResources {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group_layout = mk_camera_bind_group_layout(device);
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some("camera_bind_group"),
    });
    CameraResources {
        controller: CameraController::new(),
        uniform,
        buffer,
        bind_group,
        bind_group_layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> ArcRotateCamera {
        ArcRotateCamera::new("test", -PI / 2.0, PI / 2.0, 10.0, Vector3::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn default_angles_look_along_z() {
        let p = camera().position();
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z + 10.0).abs() < 1e-5);
    }

    #[test]
    fn detached_camera_ignores_input() {
        let mut cam = camera();
        let mut controller = CameraController::new();
        controller.handle_mouse(100.0, 100.0);
        controller.update(&mut cam, Duration::from_millis(16));
        assert_eq!(cam, camera());
    }

    #[test]
    fn attached_camera_orbits_and_clamps_beta() {
        let mut cam = camera();
        cam.attach_control();
        let mut controller = CameraController::new();
        controller.handle_mouse(0.0, -1.0e6);
        controller.update(&mut cam, Duration::from_millis(16));
        assert!((cam.beta - (PI - BETA_EPSILON)).abs() < 1e-5);
    }

    #[test]
    fn zoom_respects_lower_limit() {
        let mut cam = camera();
        cam.lower_radius_limit = Some(2.0);
        cam.zoom(100.0);
        assert_eq!(cam.radius, 2.0);
    }
}
