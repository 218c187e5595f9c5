//! Builds the playground scene: a toy tank resting on a grid ground.

use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;

use crate::{
    config::{GroundConfig, PlaygroundConfig, TankConfig},
    data_structures::{
        geometry::{create_cylinder, create_ground, create_sphere},
        material::{GridMaterial, StandardMaterial},
        mesh::{CompoundBuilder, Mesh},
        scene::{DefaultCameraOptions, Scene},
    },
    engine::Engine,
    surface::DisplaySurface,
};

pub const TANK: &str = "tank";
pub const GROUND: &str = "ground";

/// Builds the playground with the default configuration.
pub fn create_playground_scene(
    engine: &Engine,
    surface: &DisplaySurface,
) -> anyhow::Result<Scene> {
    create_playground_scene_with(engine, surface, &PlaygroundConfig::default())
}

pub fn create_playground_scene_with(
    engine: &Engine,
    surface: &DisplaySurface,
    config: &PlaygroundConfig,
) -> anyhow::Result<Scene> {
    let mut scene = Scene::new(engine);
    scene.clear_colour = config.clear_colour;

    scene.add_mesh(create_tank(&config.tank)?)?;
    scene.add_mesh(create_ground_mesh(&config.ground))?;

    scene.create_default_camera_or_light(DefaultCameraOptions::default(), surface.aspect());

    if config.debug_layer {
        scene.debug_layer.show();
    }
    log::debug!(
        "Playground scene #{} built with {} meshes",
        scene.id(),
        scene.meshes().len()
    );
    Ok(scene)
}

/// The tank's body and barrel, positioned but not merged yet.
///
/// The barrel is a cylinder turned onto the Z axis and pushed forward by half
/// its length so that its base sits in the body's centre.
pub fn tank_parts(config: &TankConfig) -> Vec<Mesh> {
    let body = Mesh::new(
        "body",
        create_sphere(config.body_diameter, config.body_segments),
    )
    .with_material(StandardMaterial::new("body", config.body_color));

    let barrel = Mesh::new(
        "barrel",
        create_cylinder(
            config.barrel_diameter,
            config.barrel_length,
            config.barrel_tessellation,
        ),
    )
    .with_rotation(Vector3::new(FRAC_PI_2, 0.0, 0.0))
    .with_position(Vector3::new(0.0, 0.0, config.barrel_length / 2.0))
    .with_material(StandardMaterial::new("barrel", config.barrel_color));

    vec![body, barrel]
}

pub fn create_tank(config: &TankConfig) -> anyhow::Result<Mesh> {
    let mut tank = tank_parts(config)
        .into_iter()
        .fold(CompoundBuilder::new(), CompoundBuilder::part)
        .merge_and_name(TANK)?;
    tank.position.y += config.lift;
    Ok(tank)
}

pub fn create_ground_mesh(config: &GroundConfig) -> Mesh {
    Mesh::new(
        GROUND,
        create_ground(config.width, config.height, config.subdivisions),
    )
    .with_material(GridMaterial::new(GROUND))
}
