use tank_playground::{
    config::PlaygroundConfig,
    data_structures::scene::Scene,
    engine::Engine,
    playground::create_playground_scene_with,
    surface::DisplaySurface,
};

pub const SURFACE: DisplaySurface = DisplaySurface {
    width: 800,
    height: 600,
};

pub fn playground() -> Scene {
    playground_with(&PlaygroundConfig::default())
}

pub fn playground_with(config: &PlaygroundConfig) -> Scene {
    create_playground_scene_with(&Engine::new(), &SURFACE, config)
        .expect("the playground scene should build")
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// A headless device, `None` when the machine has no usable adapter.
#[cfg(feature = "integration-tests")]
pub async fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .ok()?;
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("test device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            trace: wgpu::Trace::Off,
        })
        .await
        .ok()
}
