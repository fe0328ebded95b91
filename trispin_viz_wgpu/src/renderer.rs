use trispin_viz::TriangleScene;

use crate::{
    data::{create_transform_bind_group_layout, TriangleBuffers},
    pipelines::create_triangle_pipeline,
};

/// A wgpu renderer for [TriangleScene].
///
/// GPU resources are created once; each frame only rewrites the vertex and
/// transform buffers.
#[derive(Debug)]
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    buffers: TriangleBuffers,
    prepared: bool,
}

impl TriangleRenderer {
    /// Constructs a new [TriangleRenderer].
    ///
    /// Shader and pipeline errors are reported through wgpu's error handling,
    /// so callers that want to handle them should wrap this in an error scope.
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        msaa_samples: u32,
    ) -> Self {
        let transform_bind_group_layout = create_transform_bind_group_layout(device);
        let pipeline = create_triangle_pipeline(
            device,
            &transform_bind_group_layout,
            output_format,
            msaa_samples,
        );
        let buffers = TriangleBuffers::create(device, &transform_bind_group_layout);

        Self {
            pipeline,
            buffers,
            prepared: false,
        }
    }

    /// This should be called with a [TriangleScene] before [Self::render] is called.
    pub fn prepare(&mut self, queue: &wgpu::Queue, scene: &TriangleScene) {
        self.buffers.write(queue, scene);
        self.prepared = true;
    }

    /// Draws the [TriangleScene] that was provided to [Self::prepare].
    pub fn render<'r>(&'r self, rp: &mut wgpu::RenderPass<'r>) {
        assert!(self.prepared, "missing call to TriangleRenderer::prepare");

        rp.set_pipeline(&self.pipeline);
        rp.set_bind_group(0, &self.buffers.transform_bind_group, &[]);
        rp.set_vertex_buffer(0, self.buffers.vertex_buffer.slice(..));
        rp.draw(0..3, 0..1);
    }
}
