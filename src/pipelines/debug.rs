use crate::{
    data_structures::{
        model::{LineVertex, Vertex},
        texture::Texture,
    },
    pipelines::{Layouts, basic::mk_render_pipeline},
};

/// Line list pipeline for the debug overlay. Only the camera is bound.
pub fn mk_debug_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &Layouts,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Debug Lines Pipeline Layout"),
        bind_group_layouts: &[&layouts.camera],
        ..Default::default()
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Debug Lines Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("debug_lines.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(wgpu::BlendState::REPLACE),
        Some(Texture::DEPTH_FORMAT),
        &[LineVertex::desc()],
        shader,
        wgpu::PrimitiveTopology::LineList,
        None,
    )
}
