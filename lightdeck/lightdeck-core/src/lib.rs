//! Lightdeck core: dynamic lights for a deferred-shading demo.
//!
//! [`LightManager`] owns the lights, builds a wireframe proxy for each one on insertion,
//! exports fixed-layout [`LightRawData`] records for the structured light buffer and drives
//! the debug visualization through a [`render_api::DebugDevice`]. [`shading`] is the CPU
//! reference of the per-pixel accumulation the light pass shader runs.

pub mod debug_geometry;
pub mod error;
pub mod light;
pub mod manager;
pub mod raw;
pub mod shading;

pub use debug_geometry::build_debug_geometry;
pub use error::{LightError, Result};
pub use light::{LightSource, LightType};
pub use manager::{LightEntry, LightManager, DEFAULT_ARROW_LENGTH};
pub use raw::LightRawData;
