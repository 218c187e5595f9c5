#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
fn to_rgba(colour: wgpu::Color) -> image::Rgba<u8> {
    // The target is sRGB, so the stored bytes are gamma encoded.
    let encode = |v: f64| {
        let v = v.clamp(0.0, 1.0);
        let s = if v <= 0.0031308 {
            v * 12.92
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        };
        (s * 255.0).round() as u8
    };
    image::Rgba([
        encode(colour.r),
        encode(colour.g),
        encode(colour.b),
        encode(colour.a),
    ])
}

#[cfg(feature = "integration-tests")]
fn close(a: image::Rgba<u8>, b: image::Rgba<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
#[cfg(feature = "integration-tests")]
fn empty_scene_renders_the_clear_colour() {
    use tank_playground::{data_structures::scene::Scene, engine::Engine, render::render_offscreen};

    let Some((device, queue)) = block_on(common::test_utils::headless_device()) else {
        eprintln!("no GPU adapter available, skipping");
        return;
    };
    let mut scene = Scene::new(&Engine::new());
    scene.clear_colour = wgpu::Color::WHITE;
    let img = block_on(render_offscreen(&device, &queue, &scene, 64, 64)).unwrap();

    let white = to_rgba(wgpu::Color::WHITE);
    assert!(img.pixels().all(|p| *p == white));
}

#[test]
#[cfg(feature = "integration-tests")]
fn playground_draws_over_the_centre() {
    use tank_playground::render::render_offscreen;

    let Some((device, queue)) = block_on(common::test_utils::headless_device()) else {
        eprintln!("no GPU adapter available, skipping");
        return;
    };
    let mut scene = common::test_utils::playground();
    scene.debug_layer.hide();
    let (width, height) = (128, 128);
    let img = block_on(render_offscreen(&device, &queue, &scene, width, height)).unwrap();

    let background = to_rgba(scene.clear_colour);
    // The tank is tiny from the default distance, look around the centre.
    let covered = (height / 2 - 3..height / 2 + 3)
        .flat_map(|y| (width / 2 - 3..width / 2 + 3).map(move |x| (x, y)))
        .any(|(x, y)| !close(*img.get_pixel(x, y), background));
    assert!(covered, "nothing was drawn around the centre");
    // The corners look past the ground into the sky.
    let corner = *img.get_pixel(0, 0);
    assert!(close(corner, background), "corner was {:?}", corner);
}

#[cfg(feature = "integration-tests")]
fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Runtime::new()
        .expect("tokio runtime")
        .block_on(fut)
}
