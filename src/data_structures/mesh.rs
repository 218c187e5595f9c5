//! Meshes and the two-phase merge.
//!
//! A [`Mesh`] owns its CPU vertex data, its transform and its material. Parts of
//! a compound object are collected in a [`CompoundBuilder`] and merged into a
//! single named mesh in one step, which consumes the parts.

use std::ops::Range;

use anyhow::bail;
use cgmath::{Rad, Rotation3, Vector3, Zero};

use crate::data_structures::{
    geometry::{BoundingBox, VertexData},
    instance::Instance,
    material::{Color3, Material, MultiMaterial, StandardMaterial},
};

/// A range of a mesh's index buffer drawn with one material.
#[derive(Clone, Debug, PartialEq)]
pub struct SubMesh {
    pub material_index: usize,
    pub indices: Range<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied as roll (Z), pitch (X), then yaw (Y).
    pub rotation: Vector3<f32>,
    pub scaling: Vector3<f32>,
    pub geometry: VertexData,
    pub sub_meshes: Vec<SubMesh>,
    pub material: Option<Material>,
}

impl Mesh {
    pub fn new(name: &str, geometry: VertexData) -> Self {
        let sub_meshes = vec![SubMesh {
            material_index: 0,
            indices: 0..geometry.index_count() as u32,
        }];
        Self {
            name: name.to_string(),
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
            geometry,
            sub_meshes,
            material: None,
        }
    }

    pub fn with_material(mut self, material: impl Into<Material>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn to_instance(&self) -> Instance {
        let rotation = cgmath::Quaternion::from_angle_y(Rad(self.rotation.y))
            * cgmath::Quaternion::from_angle_x(Rad(self.rotation.x))
            * cgmath::Quaternion::from_angle_z(Rad(self.rotation.z));
        Instance {
            position: self.position,
            rotation,
            scale: self.scaling,
        }
    }

    pub fn world_matrix(&self) -> cgmath::Matrix4<f32> {
        self.to_instance().to_matrix()
    }

    pub fn world_bounding_box(&self) -> Option<BoundingBox> {
        self.geometry
            .bounding_box()
            .map(|bb| bb.transformed(&self.world_matrix()))
    }
}

/// Collects the parts of a compound mesh before they are merged.
#[derive(Default)]
pub struct CompoundBuilder {
    parts: Vec<Mesh>,
}

impl CompoundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, mesh: Mesh) -> Self {
        self.parts.push(mesh);
        self
    }

    /// Bakes every part's transform into one vertex buffer and names the result.
    ///
    /// Each part keeps its own sub-mesh and its material ends up in a
    /// [`MultiMaterial`]; the merged mesh and that material are both called
    /// `name`. The merged mesh sits at the origin with no rotation.
    pub fn merge_and_name(self, name: &str) -> anyhow::Result<Mesh> {
        if self.parts.is_empty() {
            bail!("Cannot merge {}: no parts were added.", name);
        }
        let mut geometry = VertexData::default();
        let mut sub_meshes = Vec::with_capacity(self.parts.len());
        let mut sub_materials = Vec::with_capacity(self.parts.len());

        for (material_index, part) in self.parts.into_iter().enumerate() {
            if part.geometry.is_empty() {
                log::warn!("Merging empty part {} into {}.", part.name, name);
            }
            let mut baked = part.geometry.clone();
            baked.transform(&part.world_matrix());
            let indices = geometry.append(&baked);
            sub_meshes.push(SubMesh {
                material_index,
                indices,
            });
            let material = part.material.unwrap_or_else(|| {
                StandardMaterial::new(&part.name, Color3::new(0.5, 0.5, 0.5)).into()
            });
            sub_materials.push(material);
        }

        let mut merged = Mesh::new(name, geometry);
        merged.sub_meshes = sub_meshes;
        merged.material = Some(Material::Multi(MultiMaterial {
            name: name.to_string(),
            sub_materials,
        }));
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::geometry::create_ground;

    #[test]
    fn empty_merge_fails() {
        assert!(CompoundBuilder::new().merge_and_name("nothing").is_err());
    }

    #[test]
    fn merge_bakes_positions() {
        let a = Mesh::new("a", create_ground(1.0, 1.0, 1));
        let b = Mesh::new("b", create_ground(1.0, 1.0, 1))
            .with_position(Vector3::new(0.0, 2.0, 0.0));
        let merged = CompoundBuilder::new()
            .part(a)
            .part(b)
            .merge_and_name("ab")
            .unwrap();
        let bb = merged.world_bounding_box().unwrap();
        assert_eq!(bb.min.y, 0.0);
        assert_eq!(bb.max.y, 2.0);
        assert_eq!(merged.sub_meshes.len(), 2);
        assert_eq!(merged.sub_meshes[1].indices, 6..12);
        assert_eq!(merged.position, Vector3::zero());
    }
}
