use thiserror::Error;

use crate::light::LightType;

/// Errors returned by the light manager.
#[derive(Error, Debug)]
pub enum LightError {
    /// The backend could not create the wireframe proxy for a new light. The light was not inserted.
    #[error("failed to upload debug geometry for {light_type:?} light: {reason}")]
    GeometryUpload { light_type: LightType, reason: String },
}

pub type Result<T> = std::result::Result<T, LightError>;
