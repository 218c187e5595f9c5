//! Engine data structures: geometry, meshes, materials, lights and the scene.
//!
//! - `geometry` contains CPU vertex data and the sphere/cylinder/ground builders
//! - `instance` holds per-mesh transformation data for the GPU
//! - `light` has the hemispheric light
//! - `material` contains standard, grid and multi materials
//! - `mesh` contains meshes and the compound merge
//! - `model` defines the GPU vertex formats
//! - `scene` ties everything together and provides the default camera/light helpers
//! - `texture` wraps GPU textures such as the depth buffer

pub mod geometry;
pub mod instance;
pub mod light;
pub mod material;
pub mod mesh;
pub mod model;
pub mod scene;
pub mod texture;
