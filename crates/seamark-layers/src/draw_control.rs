//! Draw toolbar.
//!
//! Turns completed toolbar gestures into geometry and performs the delete
//! tool's removal from the feature group. Persistence is not its concern:
//! the manager reacts to the events the toolbar emits.

use thiserror::Error;

use seamark_core::geometry::drawn::DEFAULT_CIRCLE_SEGMENTS;
use seamark_core::{DrawTool, DrawnShape, Geometry, LayerId};

use crate::collection::LayerCollection;

/// Errors raised by the draw toolbar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    /// The shape came from a tool that is switched off.
    #[error("Draw tool '{0}' is disabled")]
    ToolDisabled(DrawTool),

    /// A coordinate or radius is NaN or infinite.
    #[error("Shape drawn with '{0}' has a non-finite coordinate")]
    NonFinite(DrawTool),
}

/// Toolbar configuration and actions.
#[derive(Debug, Clone)]
pub struct DrawControl {
    enabled: Vec<DrawTool>,
    circle_segments: usize,
}

impl DrawControl {
    pub fn new(enabled: impl IntoIterator<Item = DrawTool>, circle_segments: usize) -> Self {
        let mut tools: Vec<DrawTool> = Vec::new();
        for tool in enabled {
            if !tools.contains(&tool) {
                tools.push(tool);
            }
        }
        Self {
            enabled: tools,
            circle_segments,
        }
    }

    pub fn is_enabled(&self, tool: DrawTool) -> bool {
        self.enabled.contains(&tool)
    }

    pub fn enabled_tools(&self) -> &[DrawTool] {
        &self.enabled
    }

    pub fn circle_segments(&self) -> usize {
        self.circle_segments
    }

    /// Geometry for a completed shape, if its tool is enabled and its
    /// coordinates are finite.
    pub fn complete(&self, shape: &DrawnShape) -> Result<Geometry, DrawError> {
        let tool = shape.tool();
        if !self.is_enabled(tool) {
            return Err(DrawError::ToolDisabled(tool));
        }
        if !shape.is_finite() {
            return Err(DrawError::NonFinite(tool));
        }
        Ok(shape.to_geometry(self.circle_segments))
    }

    /// Delete tool: remove the given layers from the group.
    ///
    /// Returns the ids actually removed; unknown ids are skipped.
    pub fn delete_layers(&self, group: &mut LayerCollection, ids: &[LayerId]) -> Vec<LayerId> {
        let mut removed = Vec::with_capacity(ids.len());
        for &id in ids {
            if group.remove(id).is_some() {
                removed.push(id);
            } else {
                tracing::debug!("Delete tool skipped unknown {}", id);
            }
        }
        removed
    }
}

impl Default for DrawControl {
    fn default() -> Self {
        Self::new(DrawTool::ALL, DEFAULT_CIRCLE_SEGMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seamark_core::{LatLng, Shape};

    #[test]
    fn test_default_enables_every_tool() {
        let control = DrawControl::default();
        for tool in DrawTool::ALL {
            assert!(control.is_enabled(tool));
        }
        assert_eq!(control.circle_segments(), DEFAULT_CIRCLE_SEGMENTS);
    }

    #[test]
    fn test_disabled_tool_is_refused() {
        let control = DrawControl::new([DrawTool::Marker, DrawTool::Marker], 32);
        assert_eq!(control.enabled_tools(), &[DrawTool::Marker]);

        let circle = DrawnShape::Circle {
            center: LatLng::new(52.96, 1.02),
            radius_m: 100.0,
        };
        assert_eq!(
            control.complete(&circle),
            Err(DrawError::ToolDisabled(DrawTool::Circle))
        );

        let marker = DrawnShape::Marker {
            at: LatLng::new(52.96, 1.02),
        };
        assert!(matches!(control.complete(&marker), Ok(Geometry::Point(_))));
    }

    #[test]
    fn test_non_finite_shape_is_refused() {
        let control = DrawControl::default();
        let marker = DrawnShape::Marker {
            at: LatLng::new(f64::NAN, 1.0),
        };
        assert_eq!(
            control.complete(&marker),
            Err(DrawError::NonFinite(DrawTool::Marker))
        );

        let circle = DrawnShape::Circle {
            center: LatLng::new(52.96, 1.02),
            radius_m: f64::INFINITY,
        };
        assert_eq!(
            control.complete(&circle),
            Err(DrawError::NonFinite(DrawTool::Circle))
        );
    }

    #[test]
    fn test_circle_uses_configured_resolution() {
        let control = DrawControl::new(DrawTool::ALL, 16);
        let circle = DrawnShape::Circle {
            center: LatLng::new(52.96, 1.02),
            radius_m: 100.0,
        };
        let geometry = control.complete(&circle).unwrap();
        assert_eq!(geometry.vertex_count(), 17);
    }

    #[test]
    fn test_delete_layers_skips_unknown() {
        let control = DrawControl::default();
        let mut group = LayerCollection::new();
        let a = group.insert(Shape::drawn(Geometry::Point(LatLng::new(1.0, 1.0))));

        let removed = control.delete_layers(&mut group, &[a, LayerId(999)]);
        assert_eq!(removed, vec![a]);
        assert!(group.is_empty());
    }
}
