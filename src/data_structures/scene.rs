//! The scene: meshes, camera, lights and the debug layer.
//!
//! A [`Scene`] is bound to the [`Engine`] that created it and is plain CPU data;
//! the renderer uploads it separately. Mesh names are unique within a scene.

use std::f32::consts::PI;

use anyhow::bail;
use cgmath::{InnerSpace, Vector3};

use crate::{
    camera::ArcRotateCamera,
    config::PlaygroundConfig,
    data_structures::{geometry::BoundingBox, light::HemisphericLight, mesh::Mesh},
    debug::DebugLayer,
    engine::Engine,
};

/// Switches for [`Scene::create_default_camera`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefaultCameraOptions {
    /// When false no camera is created.
    pub create_arc_rotate: bool,
    /// Replace an existing camera instead of keeping it.
    pub replace: bool,
    pub attach_control: bool,
}

impl Default for DefaultCameraOptions {
    fn default() -> Self {
        Self {
            create_arc_rotate: true,
            replace: true,
            attach_control: true,
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    id: u32,
    engine: Engine,
    meshes: Vec<Mesh>,
    pub camera: Option<ArcRotateCamera>,
    pub lights: Vec<HemisphericLight>,
    pub debug_layer: DebugLayer,
    pub clear_colour: wgpu::Color,
}

impl Scene {
    pub fn new(engine: &Engine) -> Self {
        Self {
            id: engine.allocate_scene_id(),
            engine: engine.clone(),
            meshes: Vec::new(),
            camera: None,
            lights: Vec::new(),
            debug_layer: DebugLayer::default(),
            clear_colour: PlaygroundConfig::default().clear_colour,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Adds `mesh` and returns its index. Fails if the name is already taken.
    pub fn add_mesh(&mut self, mesh: Mesh) -> anyhow::Result<usize> {
        if self.mesh_by_name(&mesh.name).is_some() {
            bail!(
                "Scene {} already contains a mesh named {:?}.",
                self.id,
                mesh.name
            );
        }
        self.meshes.push(mesh);
        Ok(self.meshes.len() - 1)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_by_name(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    pub fn mesh_by_name_mut(&mut self, name: &str) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|m| m.name == name)
    }

    /// World space bounds of every mesh, `None` for a scene without vertices.
    pub fn world_extents(&self) -> Option<BoundingBox> {
        self.meshes
            .iter()
            .filter_map(Mesh::world_bounding_box)
            .reduce(|acc, bb| acc.union(&bb))
    }

    /// Creates an arc-rotate camera that frames the whole scene.
    ///
    /// The camera orbits the centre of the world extents at one and a half
    /// times their diagonal. Clip planes, zoom speed and the radius limit
    /// scale with that radius.
    pub fn create_default_camera(&mut self, options: DefaultCameraOptions, aspect: f32) {
        if self.camera.is_some() && !options.replace {
            return;
        }
        // Arc-rotate is the only default camera kind.
        if !options.create_arc_rotate {
            log::debug!("Scene {}: no default camera requested.", self.id);
            return;
        }
        let (center, radius) = match self.world_extents() {
            Some(extents) => {
                let radius = extents.size().magnitude() * 1.5;
                let radius = if radius.is_finite() && radius > 0.0 {
                    radius
                } else {
                    1.0
                };
                (extents.center(), radius)
            }
            None => (Vector3::new(0.0, 0.0, 0.0), 1.0),
        };

        let mut camera = ArcRotateCamera::new("default camera", -PI / 2.0, PI / 2.0, radius, center);
        camera.lower_radius_limit = Some(radius * 0.01);
        camera.wheel_precision = 100.0 / radius;
        camera.znear = radius * 0.01;
        camera.zfar = radius * 1000.0;
        camera.aspect = aspect;
        if options.attach_control {
            camera.attach_control();
        }
        self.camera = Some(camera);
    }

    pub fn create_default_light(&mut self, replace: bool) {
        if replace {
            self.lights.clear();
        }
        if self.lights.is_empty() {
            self.lights
                .push(HemisphericLight::new("default light", Vector3::unit_y()));
        }
    }

    pub fn create_default_camera_or_light(&mut self, options: DefaultCameraOptions, aspect: f32) {
        self.create_default_light(options.replace);
        self.create_default_camera(options, aspect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::geometry::create_ground;

    #[test]
    fn duplicate_names_are_rejected() {
        let engine = Engine::new();
        let mut scene = Scene::new(&engine);
        scene
            .add_mesh(Mesh::new("ground", create_ground(1.0, 1.0, 1)))
            .unwrap();
        assert!(
            scene
                .add_mesh(Mesh::new("ground", create_ground(2.0, 2.0, 1)))
                .is_err()
        );
        assert_eq!(scene.meshes().len(), 1);
    }

    #[test]
    fn scenes_get_distinct_ids() {
        let engine = Engine::new();
        let a = Scene::new(&engine);
        let b = Scene::new(&engine);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn empty_scene_camera_has_unit_radius() {
        let mut scene = Scene::new(&Engine::new());
        scene.create_default_camera(DefaultCameraOptions::default(), 1.0);
        let camera = scene.camera.unwrap();
        assert_eq!(camera.radius, 1.0);
        assert!(camera.control_attached);
    }

    #[test]
    fn kept_light_is_not_duplicated() {
        let mut scene = Scene::new(&Engine::new());
        scene.create_default_light(false);
        scene.create_default_light(false);
        assert_eq!(scene.lights.len(), 1);
    }

    #[test]
    fn camera_is_skipped_when_arc_rotate_is_off() {
        let mut scene = Scene::new(&Engine::new());
        let options = DefaultCameraOptions {
            create_arc_rotate: false,
            ..Default::default()
        };
        scene.create_default_camera_or_light(options, 1.0);
        assert!(scene.camera.is_none());
        assert_eq!(scene.lights.len(), 1);
    }

    #[test]
    fn moved_mesh_shifts_the_extents() {
        let mut scene = Scene::new(&Engine::new());
        scene
            .add_mesh(Mesh::new("ground", create_ground(2.0, 2.0, 1)))
            .unwrap();
        scene.mesh_by_name_mut("ground").unwrap().position.y = 3.0;
        let extents = scene.world_extents().unwrap();
        assert!((extents.min.y - 3.0).abs() < 1e-5);
        assert!(scene.mesh_by_name_mut("missing").is_none());
    }

    #[test]
    fn scenes_share_their_engine() {
        let engine = Engine::new();
        let first = Scene::new(&engine);
        let second = Scene::new(first.engine());
        assert_eq!(second.id(), first.id() + 1);
        assert_eq!(first.engine().build_info(), engine.build_info());
    }
}
