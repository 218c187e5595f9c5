use std::f32::consts::FRAC_PI_2;

use tank_playground::{
    config::{PlaygroundConfig, TankConfig},
    data_structures::{
        material::Material,
        mesh::CompoundBuilder,
        scene::Scene,
    },
    debug::inspect,
    engine::Engine,
    playground::{GROUND, TANK, create_playground_scene, create_tank, tank_parts},
};

use crate::common::test_utils::{SURFACE, assert_close, playground, playground_with};
mod common;

fn count_named(scene: &Scene, name: &str) -> usize {
    scene.meshes().iter().filter(|m| m.name == name).count()
}

#[test]
fn scene_has_one_tank_and_one_ground() {
    let scene = playground();
    assert_eq!(count_named(&scene, TANK), 1);
    assert_eq!(count_named(&scene, GROUND), 1);
    assert_eq!(scene.meshes().len(), 2);
}

#[test]
fn tank_is_lifted_above_the_ground() {
    let scene = playground();
    let tank = scene.mesh_by_name(TANK).unwrap();
    assert_close(tank.position.y, 0.6);
    assert_close(tank.position.x, 0.0);
    assert_close(tank.position.z, 0.0);
}

#[test]
fn barrel_sticks_out_along_z_before_merge() {
    let parts = tank_parts(&TankConfig::default());
    let barrel = parts.iter().find(|m| m.name == "barrel").unwrap();
    assert_close(barrel.position.z, 0.375);
    assert_close(barrel.rotation.x, FRAC_PI_2);
}

#[test]
fn merged_tank_has_a_single_material_named_tank() {
    let tank = create_tank(&TankConfig::default()).unwrap();
    assert!(!tank.geometry.is_empty());
    let material = tank.material.as_ref().unwrap();
    assert_eq!(material.name(), TANK);
    match material {
        Material::Multi(multi) => assert_eq!(multi.sub_materials.len(), 2),
        other => panic!("expected a multi material, got {:?}", other),
    }
    assert_eq!(tank.sub_meshes.len(), 2);
}

#[test]
fn barrel_reaches_past_the_body() {
    let tank = create_tank(&TankConfig::default()).unwrap();
    let bb = tank.geometry.bounding_box().unwrap();
    // Barrel base in the centre, tip at its full length.
    assert_close(bb.max.z, 0.75);
    assert_close(bb.min.z, -0.5);
}

#[test]
fn ground_spans_one_hundred_units() {
    let scene = playground();
    let ground = scene.mesh_by_name(GROUND).unwrap();
    let bb = ground.world_bounding_box().unwrap();
    assert_close(bb.size().x, 100.0);
    assert_close(bb.size().z, 100.0);
    assert_close(bb.size().y, 0.0);
    assert!(matches!(ground.material, Some(Material::Grid(_))));
}

#[test]
fn building_twice_gives_the_same_scene() {
    let engine = Engine::new();
    let a = create_playground_scene(&engine, &SURFACE).unwrap();
    let b = create_playground_scene(&engine, &SURFACE).unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.meshes(), b.meshes());
    assert_eq!(a.camera, b.camera);
    assert_eq!(a.lights, b.lights);
}

#[test]
fn default_camera_frames_the_scene() {
    let scene = playground();
    let camera = scene.camera.as_ref().unwrap();
    let extents = scene.world_extents().unwrap();
    use tank_playground::InnerSpace;
    let radius = extents.size().magnitude() * 1.5;
    assert_close(camera.radius, radius);
    assert_close(camera.znear, radius * 0.01);
    assert_eq!(camera.lower_radius_limit, Some(radius * 0.01));
    assert_close(camera.aspect, SURFACE.aspect());
    assert!(camera.control_attached);
    assert_eq!(scene.lights.len(), 1);
}

#[test]
fn debug_layer_follows_the_config() {
    assert!(playground().debug_layer.is_visible());
    let config = PlaygroundConfig {
        debug_layer: false,
        ..Default::default()
    };
    assert!(!playground_with(&config).debug_layer.is_visible());
}

#[test]
fn inspection_lists_every_mesh() {
    let report = inspect(&playground());
    let names: Vec<_> = report.meshes.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec![TANK, GROUND]);
    assert_eq!(report.camera.as_deref(), Some("default camera"));
    assert!(report.to_string().contains("mesh \"tank\""));
}

#[test]
fn merge_without_parts_is_an_error() {
    let err = CompoundBuilder::new().merge_and_name(TANK).unwrap_err();
    assert!(err.to_string().contains(TANK));
}
