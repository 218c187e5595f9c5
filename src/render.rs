//! GPU upload of a scene and pipeline batching.
//!
//! [`SceneRenderer`] turns the CPU-side [`Scene`] into buffers and bind groups.
//! Each frame it describes what to draw as a [`Render`] tree, which is sorted
//! into one batch per pipeline before anything is recorded into the pass.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the enum describing render operations
//! - [`Instanced<'a>`] is one sub-mesh drawn with its material and instance buffer
//! - [`Lines<'a>`] is a coloured line list (the debug overlay)

use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        material::{Color3, Material, StandardMaterial},
        mesh::Mesh,
        model::{LineVertex, ModelVertex},
        scene::Scene,
    },
    debug::overlay_lines,
    pipelines::{Layouts, Pipelines, mk_material_bind_group},
};

/// Which pipeline a sub-mesh is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Standard,
    Grid,
}

impl MaterialKind {
    fn of(material: &Material) -> Self {
        match material {
            Material::Grid(_) => MaterialKind::Grid,
            Material::Standard(_) | Material::Multi(_) => MaterialKind::Standard,
        }
    }
}

#[derive(Debug)]
pub struct GpuSubMesh {
    pub indices: Range<u32>,
    pub kind: MaterialKind,
    #[allow(unused)]
    material_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

#[derive(Debug)]
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub sub_meshes: Vec<GpuSubMesh>,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, material_layout: &wgpu::BindGroupLayout, mesh: &Mesh) -> Self {
        let vertices = ModelVertex::from_vertex_data(&mesh.geometry);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Instance Buffer", mesh.name)),
            contents: bytemuck::cast_slice(&[mesh.to_instance().to_raw()]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let fallback: Material = StandardMaterial::new(&mesh.name, Color3::new(0.5, 0.5, 0.5)).into();
        let material = mesh.material.as_ref().unwrap_or_else(|| {
            log::warn!("Mesh {:?} has no material, drawing it grey.", mesh.name);
            &fallback
        });
        let sub_meshes = mesh
            .sub_meshes
            .iter()
            .map(|sub_mesh| {
                let sub_material = material.for_sub_mesh(sub_mesh.material_index);
                let (material_buffer, bind_group) =
                    mk_material_bind_group(device, material_layout, sub_material);
                GpuSubMesh {
                    indices: sub_mesh.indices.clone(),
                    kind: MaterialKind::of(sub_material),
                    material_buffer,
                    bind_group,
                }
            })
            .collect();

        Self {
            name: mesh.name.clone(),
            vertex_buffer,
            index_buffer,
            instance_buffer,
            sub_meshes,
        }
    }
}

/// One sub-mesh ready to be drawn: buffers, index range and material.
#[derive(Clone)]
pub struct Instanced<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub instance: &'a wgpu::Buffer,
    pub indices: Range<u32>,
    pub material: &'a wgpu::BindGroup,
}

/// Non-indexed coloured line list.
#[derive(Clone)]
pub struct Lines<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub amount: u32,
}

/// Specifies how scene objects should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a sub-mesh with the standard pipeline
/// - `Grid(Instanced)` renders a sub-mesh with the grid pipeline
/// - `Lines(Lines)` renders an overlay line list
/// - `Composed(Vec<Render>)` recursively renders composition of multiple renders
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Grid(Instanced<'a>),
    Lines(Lines<'a>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    pub(crate) fn set_pipelines(
        self,
        basics: &mut Vec<Instanced<'a>>,
        grids: &mut Vec<Instanced<'a>>,
        lines: &mut Vec<Lines<'a>>,
    ) {
        match self {
            Render::Default(instanced) => basics.push(instanced),
            Render::Grid(instanced) => grids.push(instanced),
            Render::Lines(l) => lines.push(l),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(basics, grids, lines)),
            Render::None => (),
        }
    }
}

impl<'a> From<&'a GpuMesh> for Render<'a> {
    fn from(mesh: &'a GpuMesh) -> Self {
        Render::Composed(
            mesh.sub_meshes
                .iter()
                .map(|sub_mesh| {
                    let instanced = Instanced {
                        vertex: &mesh.vertex_buffer,
                        index: &mesh.index_buffer,
                        instance: &mesh.instance_buffer,
                        indices: sub_mesh.indices.clone(),
                        material: &sub_mesh.bind_group,
                    };
                    match sub_mesh.kind {
                        MaterialKind::Standard => Render::Default(instanced),
                        MaterialKind::Grid => Render::Grid(instanced),
                    }
                })
                .collect(),
        )
    }
}

/// Everything needed on the GPU to draw one scene.
#[derive(Debug)]
pub struct SceneRenderer {
    pub meshes: Vec<GpuMesh>,
    overlay: Option<(wgpu::Buffer, u32)>,
    pipelines: Pipelines,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        layouts: &Layouts,
        scene: &Scene,
    ) -> Self {
        let meshes = scene
            .meshes()
            .iter()
            .map(|mesh| GpuMesh::new(device, &layouts.material, mesh))
            .collect();
        let overlay = if scene.debug_layer.is_visible() {
            let lines = overlay_lines(scene);
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Debug Overlay Buffer"),
                contents: bytemuck::cast_slice::<LineVertex, u8>(&lines),
                usage: wgpu::BufferUsages::VERTEX,
            });
            Some((buffer, lines.len() as u32))
        } else {
            None
        };
        Self {
            meshes,
            overlay,
            pipelines: Pipelines::new(device, color_format, layouts),
        }
    }

    pub fn get_render(&self) -> Render<'_> {
        let mut renders: Vec<Render<'_>> = self.meshes.iter().map(Render::from).collect();
        if let Some((buffer, amount)) = &self.overlay {
            renders.push(Render::Lines(Lines {
                vertex: buffer,
                amount: *amount,
            }));
        }
        Render::Composed(renders)
    }

    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        light_bind_group: &'a wgpu::BindGroup,
    ) {
        let mut basics: Vec<Instanced> = Vec::new();
        let mut grids: Vec<Instanced> = Vec::new();
        let mut lines: Vec<Lines> = Vec::new();
        self.get_render()
            .set_pipelines(&mut basics, &mut grids, &mut lines);

        // Opaque meshes first, the grid blends over whatever is behind it.
        for (pipeline, batch) in [(&self.pipelines.standard, basics), (&self.pipelines.grid, grids)] {
            if batch.is_empty() {
                continue;
            }
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, camera_bind_group, &[]);
            render_pass.set_bind_group(1, light_bind_group, &[]);
            for instanced in batch {
                if instanced.indices.is_empty() {
                    log::warn!("you attempted to render a sub-mesh without indices");
                    continue;
                }
                render_pass.set_bind_group(2, instanced.material, &[]);
                render_pass.set_vertex_buffer(0, instanced.vertex.slice(..));
                render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
                render_pass.set_index_buffer(instanced.index.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(instanced.indices, 0, 0..1);
            }
        }

        if !lines.is_empty() {
            render_pass.set_pipeline(&self.pipelines.debug);
            render_pass.set_bind_group(0, camera_bind_group, &[]);
            for line in lines {
                render_pass.set_vertex_buffer(0, line.vertex.slice(..));
                render_pass.draw(0..line.amount, 0..1);
            }
        }
    }
}

/// Renders `scene` into an offscreen texture and reads it back.
///
/// Used by the GPU tests; the width is padded to the 256 byte row alignment
/// the copy requires, so pick a multiple of 64 to avoid padding.
#[cfg(feature = "integration-tests")]
pub async fn render_offscreen(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    scene: &Scene,
    width: u32,
    height: u32,
) -> anyhow::Result<image::RgbaImage> {
    use crate::{
        camera::{CameraUniform, mk_camera_resources},
        data_structures::texture::Texture,
        pipelines::{light::{LightResources, LightUniform}, mk_material_bind_group_layout},
    };

    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let mut camera_uniform = CameraUniform::new();
    if let Some(camera) = &scene.camera {
        let mut camera = camera.clone();
        camera.set_aspect(width, height);
        camera_uniform.update_view_proj(&camera);
    }
    let camera = mk_camera_resources(device, camera_uniform);
    let light_uniform = scene
        .lights
        .first()
        .map(LightUniform::from)
        .unwrap_or_else(LightUniform::unlit);
    let light = LightResources::new(device, light_uniform);
    let layouts = Layouts {
        camera: camera.bind_group_layout.clone(),
        light: light.bind_group_layout.clone(),
        material: mk_material_bind_group_layout(device),
    };
    let renderer = SceneRenderer::new(device, format, &layouts, scene);

    let padded_width = width.div_ceil(64) * 64;
    let extent = wgpu::Extent3d {
        width: padded_width,
        height,
        depth_or_array_layers: 1,
    };
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(device, [padded_width, height], "offscreen_depth");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Offscreen Encoder"),
    });
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Offscreen Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        renderer.draw(&mut render_pass, &camera.bind_group, &light.bind_group);
    }

    let bytes_per_row = 4 * padded_width;
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Offscreen Readback"),
        size: (bytes_per_row * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        extent,
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        })
        .map_err(|e| anyhow::anyhow!("Polling the device failed: {:?}", e))?;
    rx.receive()
        .await
        .ok_or_else(|| anyhow::anyhow!("Readback channel closed"))??;

    let data = buffer_slice.get_mapped_range();
    let padded = image::RgbaImage::from_raw(padded_width, height, data.to_vec())
        .ok_or_else(|| anyhow::anyhow!("Readback has the wrong size"))?;
    drop(data);
    output_buffer.unmap();
    Ok(image::imageops::crop_imm(&padded, 0, 0, width, height).to_image())
}
