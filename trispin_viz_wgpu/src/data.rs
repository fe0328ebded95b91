use std::mem::size_of;

use bytemuck::{cast_slice, offset_of, Pod, Zeroable};
use trispin_viz::{Mat4, TriangleScene, Vec3, TRIANGLE_POSITIONS};
use wgpu::util::DeviceExt;

/// A vertex with a position and an RGB color, matching `shaders/triangle.wgsl`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Zeroable, Pod)]
#[repr(C)]
pub struct ColorVertex {
    /// Position in clip space before the transform is applied.
    pub pos: Vec3,
    /// RGB color.
    pub color: Vec3,
}

impl ColorVertex {
    /// The vertex buffer layout: position at location 0, color at location 1.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: vec![
                // pos
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: offset_of!(Self, pos) as u64,
                    shader_location: 0,
                },
                // color
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: offset_of!(Self, color) as u64,
                    shader_location: 1,
                },
            ]
            .leak(),
        }
    }
}

/// Builds the three vertices for the scene, each carrying the scene color.
pub fn triangle_vertices(scene: &TriangleScene) -> [ColorVertex; 3] {
    let colors = scene.vertex_colors();
    [0, 1, 2].map(|i| ColorVertex {
        pos: TRIANGLE_POSITIONS[i],
        color: colors[i].into(),
    })
}

#[derive(Debug)]
pub struct TriangleBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

impl TriangleBuffers {
    pub fn create(
        device: &wgpu::Device,
        transform_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let initial_scene = TriangleScene::new();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle-vertices"),
            contents: cast_slice(&triangle_vertices(&initial_scene)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle-transform"),
            contents: cast_slice(&initial_scene.transform().cols),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: transform_bind_group_layout,
            entries: &[
                // r_transform
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &transform_buffer,
                        offset: 0,
                        size: None,
                    }),
                },
            ],
        });

        Self {
            vertex_buffer,
            transform_buffer,
            transform_bind_group,
        }
    }

    /// Uploads the scene color and transform. Takes effect at the next queue
    /// submission.
    pub fn write(&self, queue: &wgpu::Queue, scene: &TriangleScene) {
        queue.write_buffer(&self.vertex_buffer, 0, cast_slice(&triangle_vertices(scene)));
        queue.write_buffer(
            &self.transform_buffer,
            0,
            cast_slice(&scene.transform().cols),
        );
    }
}

pub fn create_transform_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: None,
        entries: &[
            // r_transform
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<Mat4>() as u64),
                },
                count: None,
            },
        ],
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_shader() {
        let layout = ColorVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let attrs: Vec<_> = layout
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.offset, a.format))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (0, 0, wgpu::VertexFormat::Float32x3),
                (1, 12, wgpu::VertexFormat::Float32x3),
            ]
        );
    }

    #[test]
    fn test_triangle_vertices_carry_scene_color() {
        let scene = TriangleScene::new().with_color([0.0, 1.0, 0.5]);
        let vertices = triangle_vertices(&scene);

        for (vertex, pos) in vertices.iter().zip(TRIANGLE_POSITIONS) {
            assert_eq!(vertex.pos, pos);
            assert_eq!(vertex.color, Vec3::new(0.0, 1.0, 0.5));
        }

        // Interleaved as [x, y, z, r, g, b] per vertex.
        let floats: &[f32] = cast_slice(&vertices);
        assert_eq!(floats.len(), 18);
        assert_eq!(&floats[..6], &[0.0, 0.5, 0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_transform_upload_size() {
        let transform = TriangleScene::new().with_rotation(1.0).transform();
        let bytes: &[u8] = cast_slice(&transform.cols);
        assert_eq!(bytes.len(), size_of::<Mat4>());
        assert_eq!(bytes.len(), 64);
    }
}
