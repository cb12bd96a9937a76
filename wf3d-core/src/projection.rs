/// Camera focal state and pinhole projection onto the view plane
use serde::Deserialize;

use crate::error::ConfigError;
use crate::geometry::{Model, Vertex};
use crate::transform::Axis;

/// Which world axis points away from the viewer.
///
/// `Z` looks down +Z with +Y up; `Y` looks down +Y with +Z up. X is the
/// horizontal screen axis in both conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthAxis {
    #[default]
    Z,
    Y,
}

impl DepthAxis {
    pub fn forward(self) -> Axis {
        match self {
            DepthAxis::Z => Axis::Z,
            DepthAxis::Y => Axis::Y,
        }
    }

    pub fn up(self) -> Axis {
        match self {
            DepthAxis::Z => Axis::Y,
            DepthAxis::Y => Axis::Z,
        }
    }

    /// Split a point into (depth, horizontal, vertical) components
    fn split(self, point: &Vertex) -> (f64, f64, f64) {
        (
            point[self.forward().index()],
            point[Axis::X.index()],
            point[self.up().index()],
        )
    }
}

/// Project a point onto a `width` x `height` view plane.
///
/// Returns `None` unless the point lies strictly beyond the focal plane.
pub fn project_point(
    point: &Vertex,
    width: u32,
    height: u32,
    focal: f64,
    depth_axis: DepthAxis,
) -> Option<(f64, f64)> {
    let (depth, a, b) = depth_axis.split(point);
    if depth <= focal {
        return None;
    }

    let scale = focal / depth;
    Some((
        scale * a + width as f64 / 2.0,
        height as f64 / 2.0 - scale * b,
    ))
}

/// Visible geometry of one model in screen space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub points: Vec<(f64, f64)>,
    pub lines: Vec<((f64, f64), (f64, f64))>,
}

/// Camera configuration: bounded focal length plus the depth convention
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    focal: f64,
    min_focal: f64,
    max_focal: f64,
    depth_axis: DepthAxis,
}

impl Camera {
    /// Create a camera, rejecting focal bounds that are not finite, not
    /// positive, inverted, or that do not contain `focal`.
    pub fn new(
        focal: f64,
        min_focal: f64,
        max_focal: f64,
        depth_axis: DepthAxis,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("focal length", focal),
            ("minimum focal length", min_focal),
            ("maximum focal length", max_focal),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if min_focal > max_focal {
            return Err(ConfigError::InvertedFocalBounds {
                min: min_focal,
                max: max_focal,
            });
        }
        if min_focal <= 0.0 {
            return Err(ConfigError::NonPositiveFocal(min_focal));
        }
        if !(min_focal..=max_focal).contains(&focal) {
            return Err(ConfigError::FocalOutOfBounds {
                initial: focal,
                min: min_focal,
                max: max_focal,
            });
        }
        Ok(Self {
            focal,
            min_focal,
            max_focal,
            depth_axis,
        })
    }

    pub fn focal(&self) -> f64 {
        self.focal
    }

    pub fn depth_axis(&self) -> DepthAxis {
        self.depth_axis
    }

    /// Change the focal length by `delta`. Returns `false` and leaves the
    /// camera untouched when the result would leave the focal bounds.
    pub fn adjust_focal(&mut self, delta: f64) -> bool {
        let focal = self.focal + delta;
        if !(self.min_focal..=self.max_focal).contains(&focal) {
            return false;
        }
        self.focal = focal;
        true
    }

    pub fn project(&self, point: &Vertex, width: u32, height: u32) -> Option<(f64, f64)> {
        project_point(point, width, height, self.focal, self.depth_axis)
    }

    /// Project a model's vertices and edges. An edge is kept only when both
    /// endpoints are visible; partially visible edges are dropped, not clipped.
    pub fn project_model(&self, model: &Model, width: u32, height: u32) -> Frame {
        let projected: Vec<Option<(f64, f64)>> = model
            .vertices()
            .iter()
            .map(|v| self.project(v, width, height))
            .collect();

        let points = projected.iter().flatten().copied().collect();
        let lines = model
            .edges()
            .iter()
            .filter_map(|edge| Some((projected[edge.source]?, projected[edge.target]?)))
            .collect();

        Frame { points, lines }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            focal: 500.0,
            min_focal: 100.0,
            max_focal: 1000.0,
            depth_axis: DepthAxis::default(),
        }
    }
}
