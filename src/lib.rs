//! tank-playground
//!
//! A tiny cross-platform playground that renders a toy tank resting on a grid
//! ground. The crate carries its own minimal rendering layer built on wgpu:
//! CPU-side mesh builders, a mesh merge, flat and grid materials, default
//! camera/light helpers and a debug layer. The same code runs natively in a
//! winit window and in the browser on a canvas created by the WASM bootstrap.
//!
//! High-level modules
//! - `bootstrap`: browser entry points (wasm32 only)
//! - `camera`: arc-rotate camera, its input controller and GPU uniform
//! - `config`: playground settings and build-time constants
//! - `context`: central GPU and window context that owns device/queue/surface
//! - `data_structures`: geometry, meshes, materials, lights and the scene
//! - `debug`: debug layer, scene inspection and overlay geometry
//! - `engine`: the engine handle scenes are bound to
//! - `flow`: event loop and frame driving
//! - `pipelines`: render pipelines (standard, grid, debug lines, light)
//! - `playground`: builds the tank scene
//! - `render`: GPU upload of a scene and pipeline batching
//! - `surface`: display surface description
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod debug;
pub mod engine;
pub mod flow;
pub mod pipelines;
pub mod playground;
pub mod render;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod bootstrap;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::WindowEvent;
