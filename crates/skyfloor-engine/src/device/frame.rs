use crate::render::RenderTarget;

/// An acquired swapchain texture and the encoder recording into it.
///
/// Holding it blocks acquisition of the next frame; it is presented (or
/// dropped) within the loop iteration that acquired it.
pub struct GpuFrame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    pub(super) fn new(surface_texture: wgpu::SurfaceTexture, device: &wgpu::Device) -> Self {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("skyfloor frame encoder"),
        });

        Self {
            surface_texture,
            view,
            encoder,
        }
    }

    pub fn target(&mut self) -> RenderTarget<'_> {
        RenderTarget::new(&mut self.encoder, &self.view)
    }

    /// Submits the recorded passes, then queues the texture for display.
    pub(super) fn present(self, queue: &wgpu::Queue) {
        let Self {
            surface_texture,
            view,
            encoder,
        } = self;

        queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }
}
