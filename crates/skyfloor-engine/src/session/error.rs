use std::fmt;

/// Startup stage at which a display session failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InitStage {
    /// Windowing subsystem / event loop, or the process-wide session slot.
    Subsystem,
    /// Window parameters or window creation.
    Window,
    /// GPU surface, adapter, device or pipeline.
    Renderer,
    /// Image decoder set.
    ImageCodecs,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InitStage::Subsystem => "windowing subsystem",
            InitStage::Window => "window",
            InitStage::Renderer => "renderer",
            InitStage::ImageCodecs => "image codecs",
        })
    }
}

/// Fatal display-session startup failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} could not be initialized: {message}")]
pub struct InitError {
    pub stage: InitStage,
    pub message: String,
}

impl InitError {
    pub fn new(stage: InitStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    /// Keeps the full context chain of an internal error as the message.
    pub(crate) fn from_anyhow(stage: InitStage, err: &anyhow::Error) -> Self {
        Self::new(stage, format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn message_names_the_stage() {
        let err = InitError::new(InitStage::Window, "invalid window dimensions 0x1000");
        assert_eq!(
            err.to_string(),
            "window could not be initialized: invalid window dimensions 0x1000"
        );
    }

    #[test]
    fn anyhow_context_chain_is_preserved() {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("no adapter"));
        let err = inner.context("failed to create wgpu device").unwrap_err();
        let init = InitError::from_anyhow(InitStage::Renderer, &err);
        assert_eq!(init.stage, InitStage::Renderer);
        assert_eq!(init.message, "failed to create wgpu device: no adapter");
    }
}
