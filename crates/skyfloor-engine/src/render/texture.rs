/// A GPU-resident image, ready to be drawn by the image renderer.
///
/// Valid only with the device that created it; the session releases its
/// renderer after all textures are gone.
#[derive(Debug)]
pub struct Texture {
    pub(crate) bind_group: wgpu::BindGroup,
    _view: wgpu::TextureView,
    texture: wgpu::Texture,
    label: String,
}

impl Texture {
    pub(crate) fn new(
        texture: wgpu::Texture,
        view: wgpu::TextureView,
        bind_group: wgpu::BindGroup,
        label: String,
    ) -> Self {
        Self {
            bind_group,
            _view: view,
            texture,
            label,
        }
    }

    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.texture.width()
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.texture.height()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::trace!("releasing texture {}", self.label);
    }
}
