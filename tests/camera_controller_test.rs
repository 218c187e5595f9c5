use std::f32::consts::PI;

use instant::Duration;
use tank_playground::{
    Vector3, Vector4,
    camera::{ArcRotateCamera, CameraController, CameraUniform},
    engine::Engine,
    playground::create_playground_scene,
    surface::DisplaySurface,
};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceId, ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
};

use crate::common::test_utils::{SURFACE, assert_close};
mod common;

const FRAME: Duration = Duration::from_millis(16);

fn device() -> DeviceId {
    // SAFETY: the id is only compared, never used to reach a real device.
    unsafe { DeviceId::dummy() }
}

fn button(state: ElementState) -> WindowEvent {
    WindowEvent::MouseInput {
        device_id: device(),
        state,
        button: MouseButton::Left,
    }
}

fn cursor(x: f64, y: f64) -> WindowEvent {
    WindowEvent::CursorMoved {
        device_id: device(),
        position: PhysicalPosition::new(x, y),
    }
}

fn wheel(delta: MouseScrollDelta) -> WindowEvent {
    WindowEvent::MouseWheel {
        device_id: device(),
        delta,
        phase: TouchPhase::Moved,
    }
}

fn orbit_camera() -> ArcRotateCamera {
    let mut camera = ArcRotateCamera::new("orbit", -PI / 2.0, PI / 2.0, 10.0, Vector3::new(0.0, 0.0, 0.0));
    camera.attach_control();
    camera
}

#[test]
fn left_drag_orbits_the_camera() {
    let mut camera = orbit_camera();
    let mut controller = CameraController::new();
    for event in [
        button(ElementState::Pressed),
        cursor(100.0, 100.0),
        cursor(110.0, 120.0),
        button(ElementState::Released),
    ] {
        controller.handle_window_events(&event);
    }
    controller.update(&mut camera, FRAME);

    assert_close(camera.alpha, -PI / 2.0 - 10.0 * camera.angular_sensibility);
    assert_close(camera.beta, PI / 2.0 - 20.0 * camera.angular_sensibility);
}

#[test]
fn cursor_moves_without_a_pressed_button_are_ignored() {
    let mut camera = orbit_camera();
    let mut controller = CameraController::new();
    controller.handle_window_events(&cursor(0.0, 0.0));
    controller.handle_window_events(&cursor(300.0, 300.0));
    // A drag starting after a release must not jump from the old cursor position.
    controller.handle_window_events(&button(ElementState::Pressed));
    controller.handle_window_events(&button(ElementState::Released));
    controller.handle_window_events(&button(ElementState::Pressed));
    controller.handle_window_events(&cursor(305.0, 300.0));
    controller.handle_window_events(&cursor(310.0, 300.0));
    controller.update(&mut camera, FRAME);

    assert_close(camera.alpha, -PI / 2.0 - 5.0 * camera.angular_sensibility);
    assert_close(camera.beta, PI / 2.0);
}

#[test]
fn one_wheel_notch_zooms_a_few_percent() {
    let scene = create_playground_scene(&Engine::new(), &SURFACE).unwrap();
    let mut camera = scene.camera.unwrap();
    let before = camera.radius;
    let mut controller = CameraController::new();
    controller.handle_window_events(&wheel(MouseScrollDelta::LineDelta(0.0, 1.0)));
    controller.update(&mut camera, FRAME);

    let change = (before - camera.radius) / before;
    assert!(change > 0.0, "scrolling up should move the camera closer");
    assert!(change < 0.05, "one notch zoomed {}% of the radius", change * 100.0);
    assert!(camera.radius > camera.lower_radius_limit.unwrap());
}

#[test]
fn pixel_wheel_deltas_zoom_out_smoothly() {
    let mut camera = orbit_camera();
    camera.wheel_precision = 100.0 / camera.radius;
    let mut controller = CameraController::new();
    controller.handle_window_events(&wheel(MouseScrollDelta::PixelDelta(
        PhysicalPosition::new(0.0, -12.0),
    )));
    controller.update(&mut camera, FRAME);
    assert!(camera.radius > 10.0);
    assert!(camera.radius < 10.1);
}

#[test]
fn detached_camera_ignores_window_events() {
    let mut camera = orbit_camera();
    camera.detach_control();
    let untouched = camera.clone();
    let mut controller = CameraController::new();
    controller.handle_window_events(&button(ElementState::Pressed));
    controller.handle_window_events(&cursor(0.0, 0.0));
    controller.handle_window_events(&cursor(50.0, 50.0));
    controller.handle_window_events(&wheel(MouseScrollDelta::LineDelta(0.0, 3.0)));
    controller.update(&mut camera, FRAME);
    assert_eq!(camera, untouched);

    // Input gathered while detached is dropped, not replayed later.
    camera.attach_control();
    controller.update(&mut camera, FRAME);
    assert_close(camera.radius, untouched.radius);
}

#[test]
fn zero_width_surface_still_projects() {
    let surface = DisplaySurface::new(0, 600);
    assert_eq!(surface.aspect(), 1.0);

    let scene = create_playground_scene(&Engine::new(), &surface).unwrap();
    let mut camera = scene.camera.unwrap();
    assert_eq!(camera.aspect, 1.0);
    CameraUniform::new().update_view_proj(&camera);

    camera.set_aspect(0, 600);
    camera.set_aspect(800, 0);
    assert_eq!(camera.aspect, 1.0);
    CameraUniform::new().update_view_proj(&camera);
}

#[test]
fn default_view_draws_world_x_on_the_left() {
    let camera = orbit_camera();
    let clip = camera.projection_matrix()
        * camera.view_matrix()
        * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!(clip.x / clip.w < 0.0);
    let up = camera.projection_matrix()
        * camera.view_matrix()
        * Vector4::new(0.0, 1.0, 0.0, 1.0);
    assert!(up.y / up.w > 0.0);
}
