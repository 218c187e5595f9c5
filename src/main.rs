#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use tank_playground::{flow, playground::create_playground_scene};

    flow::run(Box::new(create_playground_scene))
}

// The browser build starts from `bootstrap::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
