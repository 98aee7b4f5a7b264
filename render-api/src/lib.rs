//! Shared render API for Lightdeck.
//! Defines the narrow device capabilities the light manager needs (line geometry,
//! arrow program, draw submission) so the core never touches a concrete GPU API.

mod backend;
mod uniforms;

pub use backend::{DebugDevice, GeometryFactory, LineGeometry};
pub use uniforms::{ArrowUniforms, PrimitiveTopology};
