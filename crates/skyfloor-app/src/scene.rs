use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use skyfloor_engine::core::App;
use skyfloor_engine::frame::Canvas;
use skyfloor_engine::render::Texture;
use skyfloor_engine::session::{DisplaySession, SessionCanvas};

use crate::config::DemoConfig;
use crate::layout::StackedLayout;

/// Sky over floor. Either texture may be absent after a failed load; the
/// other one is still drawn.
#[derive(Debug)]
pub struct StackedScene<T> {
    layout: StackedLayout,
    sky: Option<T>,
    floor: Option<T>,
}

impl<T> StackedScene<T> {
    pub fn new(layout: StackedLayout) -> Self {
        Self {
            layout,
            sky: None,
            floor: None,
        }
    }

    pub fn layout(&self) -> &StackedLayout {
        &self.layout
    }

    pub fn set_textures(&mut self, sky: Option<T>, floor: Option<T>) {
        self.sky = sky;
        self.floor = floor;
    }

    pub fn has_sky(&self) -> bool {
        self.sky.is_some()
    }

    pub fn has_floor(&self) -> bool {
        self.floor.is_some()
    }

    /// Sky first, then floor.
    pub fn draw<C>(&self, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        canvas.draw(self.sky.as_ref(), self.layout.sky);
        canvas.draw(self.floor.as_ref(), self.layout.floor);
    }

    /// Drops both textures, floor first.
    pub fn release(&mut self) {
        drop(self.floor.take());
        drop(self.sky.take());
    }
}

/// The demo: loads the two images at startup and draws them every frame.
pub struct SkyfloorApp {
    sky_path: PathBuf,
    floor_path: PathBuf,
    scene: StackedScene<Texture>,
}

impl SkyfloorApp {
    pub fn new(config: &DemoConfig) -> Self {
        let cfg = config.layout();
        let layout = StackedLayout::compute(&cfg);
        if layout.floor.bottom() > cfg.screen_height as f32 {
            debug!(
                "floor extends {}px past the bottom edge",
                layout.floor.bottom() - cfg.screen_height as f32
            );
        }

        Self {
            sky_path: config.sky_path.clone(),
            floor_path: config.floor_path.clone(),
            scene: StackedScene::new(layout),
        }
    }
}

fn load_or_warn(session: &DisplaySession, role: &str, path: &Path) -> Option<Texture> {
    match session.load_texture(path) {
        Ok(texture) => {
            info!(
                "{role} texture loaded from {} ({}x{})",
                path.display(),
                texture.width(),
                texture.height()
            );
            Some(texture)
        }
        Err(err) => {
            warn!("{role} image not available, continuing without it: {err}");
            None
        }
    }
}

impl App for SkyfloorApp {
    fn on_start(&mut self, session: &DisplaySession) {
        let floor = load_or_warn(session, "floor", &self.floor_path);
        let sky = load_or_warn(session, "sky", &self.sky_path);
        self.scene.set_textures(sky, floor);

        let layout = self.scene.layout();
        info!("sky at {:?}, floor at {:?}", layout.sky, layout.floor);
        if !self.scene.has_sky() && !self.scene.has_floor() {
            warn!("no image could be loaded; frames show the clear color only");
        }
    }

    fn on_frame(&mut self, canvas: &mut SessionCanvas<'_>) {
        self.scene.draw(canvas);
    }

    fn on_stop(&mut self) {
        self.scene.release();
    }
}
