//! Debug layer: scene inspection and the overlay drawn on top of the scene.
//!
//! When the layer is visible the renderer draws the world axes and a wireframe
//! box around every mesh, and the app logs an [`inspect`] report once the scene
//! is ready.

use std::fmt;

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::{geometry::BoundingBox, model::LineVertex, scene::Scene};

const AXIS_X: [f32; 3] = [1.0, 0.0, 0.0];
const AXIS_Y: [f32; 3] = [0.0, 1.0, 0.0];
const AXIS_Z: [f32; 3] = [0.0, 0.0, 1.0];
const BOX_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugLayer {
    visible: bool,
}

impl DebugLayer {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshReport {
    pub name: String,
    pub vertices: usize,
    pub indices: usize,
    pub sub_meshes: usize,
    pub material: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneReport {
    pub scene_id: u32,
    pub meshes: Vec<MeshReport>,
    pub camera: Option<String>,
    pub lights: Vec<String>,
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scene #{}", self.scene_id)?;
        for mesh in &self.meshes {
            writeln!(
                f,
                "  mesh {:?}: {} vertices, {} indices, {} sub-meshes, material {:?}",
                mesh.name, mesh.vertices, mesh.indices, mesh.sub_meshes, mesh.material
            )?;
        }
        match &self.camera {
            Some(camera) => writeln!(f, "  camera {:?}", camera)?,
            None => writeln!(f, "  no camera")?,
        }
        for light in &self.lights {
            writeln!(f, "  light {:?}", light)?;
        }
        Ok(())
    }
}

pub fn inspect(scene: &Scene) -> SceneReport {
    SceneReport {
        scene_id: scene.id(),
        meshes: scene
            .meshes()
            .iter()
            .map(|mesh| MeshReport {
                name: mesh.name.clone(),
                vertices: mesh.geometry.vertex_count(),
                indices: mesh.geometry.index_count(),
                sub_meshes: mesh.sub_meshes.len(),
                material: mesh.material.as_ref().map(|m| m.name().to_string()),
            })
            .collect(),
        camera: scene.camera.as_ref().map(|c| c.name.clone()),
        lights: scene.lights.iter().map(|l| l.name.clone()).collect(),
    }
}

/// Line list for the overlay: three axes from the origin followed by twelve
/// edges per mesh bounding box.
pub fn overlay_lines(scene: &Scene) -> Vec<LineVertex> {
    let axis_length = scene
        .world_extents()
        .map(|extents| extents.size().magnitude() * 0.25)
        .filter(|len| *len > 0.0)
        .unwrap_or(1.0);
    let mut lines = Vec::new();
    for (axis, color) in [
        (Vector3::unit_x(), AXIS_X),
        (Vector3::unit_y(), AXIS_Y),
        (Vector3::unit_z(), AXIS_Z),
    ] {
        lines.push(LineVertex {
            position: [0.0; 3],
            color,
        });
        lines.push(LineVertex {
            position: (axis * axis_length).into(),
            color,
        });
    }
    for bb in scene.meshes().iter().filter_map(|m| m.world_bounding_box()) {
        push_box(&mut lines, &bb);
    }
    lines
}

fn push_box(lines: &mut Vec<LineVertex>, bb: &BoundingBox) {
    #[rustfmt::skip]
    const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    let corners = bb.corners();
    for (a, b) in EDGES {
        lines.push(LineVertex {
            position: corners[a].into(),
            color: BOX_COLOR,
        });
        lines.push(LineVertex {
            position: corners[b].into(),
            color: BOX_COLOR,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data_structures::{geometry::create_ground, mesh::Mesh},
        engine::Engine,
    };

    #[test]
    fn overlay_has_axes_and_one_box_per_mesh() {
        let mut scene = Scene::new(&Engine::new());
        scene
            .add_mesh(Mesh::new("a", create_ground(4.0, 0.0, 1)))
            .unwrap();
        let lines = overlay_lines(&scene);
        assert_eq!(lines.len(), 6 + 24);
        assert_eq!(lines[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn report_lists_meshes() {
        let mut scene = Scene::new(&Engine::new());
        scene
            .add_mesh(Mesh::new("a", create_ground(1.0, 1.0, 1)))
            .unwrap();
        let report = inspect(&scene);
        assert_eq!(report.meshes[0].vertices, 4);
        assert_eq!(report.meshes[0].material, None);
        assert!(report.to_string().contains("mesh \"a\""));
    }
}
