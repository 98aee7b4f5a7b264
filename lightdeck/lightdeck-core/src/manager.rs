//! Light manager: append-only light collection, debug proxies and GPU record export.

use glam::{Mat4, Quat};
use render_api::{ArrowUniforms, DebugDevice, GeometryFactory, LineGeometry, PrimitiveTopology};

use crate::debug_geometry::{build_debug_geometry, to_point_array};
use crate::error::{LightError, Result};
use crate::light::{LightSource, LightType};
use crate::raw::LightRawData;

/// Arrow length in world units used when none is configured.
pub const DEFAULT_ARROW_LENGTH: f32 = 2.0;

/// A light plus its wireframe proxy. The proxy is built once at insertion and owned here.
pub struct LightEntry<L> {
    source: LightSource,
    debug_geometry: L,
}

impl<L> LightEntry<L> {
    pub fn source(&self) -> &LightSource {
        &self.source
    }

    pub fn debug_geometry(&self) -> &L {
        &self.debug_geometry
    }
}

/// Owns every light for its whole lifetime. Index `i` is always the `i`-th inserted light.
///
/// `L` is the backend's line geometry, `A` its arrow constant-data resource.
pub struct LightManager<L, A> {
    entries: Vec<LightEntry<L>>,
    /// `None` when allocation failed at construction; arrows are then never drawn.
    arrow_data: Option<A>,
    arrow_length: f32,
}

impl<L, A> Default for LightManager<L, A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            arrow_data: None,
            arrow_length: DEFAULT_ARROW_LENGTH,
        }
    }
}

impl<L: LineGeometry, A> LightManager<L, A> {
    /// Create an empty manager and allocate the arrow constant-data resource. Allocation
    /// failure is not fatal: the debug view keeps drawing wireframes without arrows.
    pub fn new<F>(factory: &mut F) -> Self
    where
        F: GeometryFactory<Line = L, ArrowData = A>,
    {
        let arrow_data = match factory.create_arrow_data() {
            Ok(data) => Some(data),
            Err(e) => {
                log::warn!("arrow data unavailable, direction arrows disabled: {e}");
                None
            }
        };
        Self {
            arrow_data,
            ..Self::default()
        }
    }

    pub fn with_arrow_length(mut self, arrow_length: f32) -> Self {
        self.arrow_length = arrow_length;
        self
    }

    /// Insert a light and build its wireframe proxy. Returns the light's index.
    /// On upload failure the collection is left unchanged.
    pub fn add_light_source<F>(&mut self, factory: &mut F, source: LightSource) -> Result<usize>
    where
        F: GeometryFactory<Line = L, ArrowData = A>,
    {
        let points = to_point_array(&build_debug_geometry(source.light_type));
        let debug_geometry = factory
            .create_line_geometry(&points)
            .map_err(|reason| LightError::GeometryUpload { light_type: source.light_type, reason })?;
        let index = self.entries.len();
        log::debug!(
            "light {index} added: {:?} at {:?}, {} proxy points",
            source.light_type,
            source.position,
            debug_geometry.point_count()
        );
        self.entries.push(LightEntry { source, debug_geometry });
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_arrow_data(&self) -> bool {
        self.arrow_data.is_some()
    }

    pub fn light_source(&self, index: usize) -> Option<&LightSource> {
        self.entries.get(index).map(|e| &e.source)
    }

    pub fn entry(&self, index: usize) -> Option<&LightEntry<L>> {
        self.entries.get(index)
    }

    /// Lights in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.entries.iter().map(|e| &e.source)
    }

    /// GPU record for light `index`, or [`LightRawData::fallback`] when out of range so the
    /// shader can always read a full slot array.
    pub fn raw_light_data(&self, index: usize) -> LightRawData {
        match self.entries.get(index) {
            Some(entry) => LightRawData::from(&entry.source),
            None => LightRawData::fallback(),
        }
    }

    /// Exactly `slots` records; slots past the light count hold the fallback record.
    pub fn raw_light_data_snapshot(&self, slots: usize) -> Vec<LightRawData> {
        (0..slots).map(|i| self.raw_light_data(i)).collect()
    }

    /// Draw every light's proxy, plus an arrow for oriented lights, in insertion order.
    /// `view_projection` is column-major (glam); proxies are drawn with `view_projection * model`.
    pub fn render_debug_visualization<D>(&self, device: &mut D, view_projection: &Mat4)
    where
        D: DebugDevice<Line = L, ArrowData = A>,
    {
        for entry in &self.entries {
            let source = &entry.source;
            let model_view_proj = *view_projection * model_transform(source);
            device.draw_line(
                &entry.debug_geometry,
                &model_view_proj.to_cols_array(),
                source.diffuse_color.to_array(),
            );

            if !source.light_type.is_oriented() {
                continue;
            }
            let Some(arrow_data) = self.arrow_data.as_ref() else {
                continue;
            };
            if !device.use_arrow_program() {
                continue;
            }
            let uniforms = ArrowUniforms {
                view_proj: view_projection.to_cols_array(),
                orientation: source.orientation.to_array(),
                position: source.position.to_array(),
                length: self.arrow_length,
                color: source.diffuse_color.extend(1.0).to_array(),
            };
            // the arrow data is shared by all lights; the draw must be submitted before the next write
            device.write_arrow_data(arrow_data, &uniforms);
            device.bind_arrow_data(arrow_data);
            device.submit_draw(PrimitiveTopology::PointList, 1);
        }
    }
}

/// Omni proxies are symmetric, so only translate them.
fn model_transform(source: &LightSource) -> Mat4 {
    match source.light_type {
        LightType::Omni => Mat4::from_rotation_translation(Quat::IDENTITY, source.position),
        LightType::Spot | LightType::Direct => Mat4::from_rotation_translation(source.orientation, source.position),
    }
}
