use crate::coords::Rect;
use crate::core::AppControl;

/// Render target of one frame-loop iteration.
///
/// Call order per frame is `clear`, any number of draws, `present`. Draws
/// are composited in call order.
pub trait Canvas {
    type Texture;

    /// Starts the frame by filling the target with the clear color.
    fn clear(&mut self);

    /// Draws `texture` stretched into `dest`.
    fn draw_texture(&mut self, texture: &Self::Texture, dest: Rect);

    /// Shows the frame. Returns [`AppControl::Exit`] when rendering cannot
    /// continue.
    fn present(&mut self) -> AppControl;

    /// Draws an optional texture; `None` (a failed load) draws nothing.
    fn draw(&mut self, texture: Option<&Self::Texture>, dest: Rect) {
        if let Some(texture) = texture {
            self.draw_texture(texture, dest);
        }
    }
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp<T> {
    Clear,
    Draw { texture: T, dest: Rect },
    Present,
}

/// Canvas that records calls instead of rendering.
///
/// Used to exercise frame logic without a window or GPU. Textures are any
/// cloneable identifier.
#[derive(Debug, Clone)]
pub struct RecordingCanvas<T> {
    pub ops: Vec<CanvasOp<T>>,
    /// When set, `present` reports a fatal failure.
    pub fail_present: bool,
}

impl<T> Default for RecordingCanvas<T> {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            fail_present: false,
        }
    }
}

impl<T> RecordingCanvas<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded draws, in call order.
    pub fn draws(&self) -> impl Iterator<Item = (&T, Rect)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::Draw { texture, dest } => Some((texture, *dest)),
            _ => None,
        })
    }

    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, CanvasOp::Present)).count()
    }
}

impl<T: Clone> Canvas for RecordingCanvas<T> {
    type Texture = T;

    fn clear(&mut self) {
        self.ops.push(CanvasOp::Clear);
    }

    fn draw_texture(&mut self, texture: &T, dest: Rect) {
        self.ops.push(CanvasOp::Draw {
            texture: texture.clone(),
            dest,
        });
    }

    fn present(&mut self) -> AppControl {
        self.ops.push(CanvasOp::Present);
        if self.fail_present {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }
}
