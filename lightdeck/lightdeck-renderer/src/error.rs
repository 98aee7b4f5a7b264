use lightdeck_core::LightError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("frame size must be > 0, got {width}x{height}")]
    InvalidFrameSize { width: u32, height: u32 },

    #[error("no frame resources (call ensure_frame_resources first)")]
    NoFrameResources,

    #[error("pipeline creation failed: {0}")]
    Pipeline(String),

    #[error(transparent)]
    Light(#[from] LightError),
}

pub type Result<T> = std::result::Result<T, RendererError>;
