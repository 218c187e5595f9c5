//! Render pipelines and the bind group layouts they share.
//!
//! Bind groups are laid out the same way for every mesh pipeline:
//! group 0 holds the camera, group 1 the light and group 2 the material.

use wgpu::util::DeviceExt;

use crate::data_structures::material::Material;

pub mod basic;
pub mod debug;
pub mod grid;
pub mod light;

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub fn mk_camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    uniform_layout(device, "camera_bind_group_layout")
}

pub fn mk_material_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    uniform_layout(device, "material_bind_group_layout")
}

/// Bind group layouts every pipeline is created against.
#[derive(Debug, Clone)]
pub struct Layouts {
    pub camera: wgpu::BindGroupLayout,
    pub light: wgpu::BindGroupLayout,
    pub material: wgpu::BindGroupLayout,
}

#[derive(Debug)]
pub struct Pipelines {
    pub standard: wgpu::RenderPipeline,
    pub grid: wgpu::RenderPipeline,
    pub debug: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, layouts: &Layouts) -> Self {
        Self {
            standard: basic::mk_standard_pipeline(device, color_format, layouts),
            grid: grid::mk_grid_pipeline(device, color_format, layouts),
            debug: debug::mk_debug_pipeline(device, color_format, layouts),
        }
    }
}

/// Material parameters as seen by the shaders.
///
/// Standard materials only use `color`. Grid materials store the main colour
/// and opacity in `color`, the line colour and grid ratio in `line_color`, and
/// the major unit frequency and minor unit visibility in `params`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    pub line_color: [f32; 4],
    pub params: [f32; 4],
}

impl MaterialUniform {
    pub fn from_material(material: &Material) -> Self {
        match material {
            Material::Standard(standard) => {
                let c = standard.diffuse;
                Self {
                    color: [c.r, c.g, c.b, 1.0],
                    line_color: [0.0; 4],
                    params: [0.0; 4],
                }
            }
            Material::Grid(grid) => {
                let main = grid.main_color;
                let line = grid.line_color;
                Self {
                    color: [main.r, main.g, main.b, grid.opacity],
                    line_color: [line.r, line.g, line.b, grid.grid_ratio],
                    params: [
                        grid.major_unit_frequency,
                        grid.minor_unit_visibility,
                        0.0,
                        0.0,
                    ],
                }
            }
            // Sub-meshes resolve their own material, a bare multi material draws neutral grey.
            Material::Multi(_) => Self {
                color: [0.5, 0.5, 0.5, 1.0],
                line_color: [0.0; 4],
                params: [0.0; 4],
            },
        }
    }
}

pub fn mk_material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    material: &Material,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Material Buffer", material.name())),
        contents: bytemuck::cast_slice(&[MaterialUniform::from_material(material)]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(&format!("{} Material Bind Group", material.name())),
    });
    (buffer, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::material::{GridMaterial, StandardMaterial, Color3};

    #[test]
    fn grid_uniform_packs_ratio_and_frequency() {
        let uniform = MaterialUniform::from_material(&GridMaterial::new("ground").into());
        assert_eq!(uniform.color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(uniform.line_color, [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(uniform.params[0], 10.0);
    }

    #[test]
    fn standard_uniform_is_opaque() {
        let material = StandardMaterial::new("body", Color3::new(0.3, 0.7, 1.0)).into();
        assert_eq!(MaterialUniform::from_material(&material).color, [0.3, 0.7, 1.0, 1.0]);
    }
}
