//! Path routing between resolved connector endpoints
//!
//! Given the two absolute endpoints and each endpoint's attachment side
//! (or none), the router produces the path geometry for the connector's
//! routing style. The side-aware tables live in [`curved`] and
//! [`orthogonal`]; both are pure lookups that return fresh values on
//! every call.

pub mod curved;
pub mod orthogonal;

use log::warn;

use crate::connector::{RoutingStyle, Side};
use crate::geometry::{BoundingBox, Point};

/// Outward stub length for curved control points
pub const CURVE_OFFSET: f64 = 20.0;

/// Outward stub length for orthogonal waypoints
pub const ORTHO_OFFSET: f64 = 30.0;

/// Extra clearance, scaled by zoom, when routing around a bound shape
pub const ROUTE_MARGIN: f64 = 4.0;

/// Shape extent assumed when a detour is needed but no bounds are known
pub(crate) const FALLBACK_EXTENT: f64 = 10.0;

/// Geometry the router needs beyond the endpoints themselves: the bound
/// shapes' current bounds (for routing around them) and the viewport zoom
/// (for clearance scaling).
#[derive(Debug, Clone, Copy)]
pub struct RouteContext {
    pub start_bounds: Option<BoundingBox>,
    pub end_bounds: Option<BoundingBox>,
    pub zoom: f64,
}

impl Default for RouteContext {
    fn default() -> Self {
        Self {
            start_bounds: None,
            end_bounds: None,
            zoom: 1.0,
        }
    }
}

impl RouteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_bounds(mut self, bounds: BoundingBox) -> Self {
        self.start_bounds = Some(bounds);
        self
    }

    pub fn with_end_bounds(mut self, bounds: BoundingBox) -> Self {
        self.end_bounds = Some(bounds);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }
}

/// The geometric path of a routed connector
#[derive(Debug, Clone, PartialEq)]
pub enum PathSpec {
    /// A single straight segment
    Straight { p1: Point, p2: Point },
    /// A cubic Bezier curve
    Curve {
        p1: Point,
        cp1: Point,
        cp2: Point,
        p2: Point,
    },
    /// An ordered sequence of axis-aligned waypoints
    Orthogonal { points: Vec<Point> },
}

impl PathSpec {
    /// The path's first point
    pub fn first(&self) -> Point {
        match self {
            PathSpec::Straight { p1, .. } | PathSpec::Curve { p1, .. } => *p1,
            PathSpec::Orthogonal { points } => points.first().copied().unwrap_or_default(),
        }
    }

    /// The path's last point
    pub fn last(&self) -> Point {
        match self {
            PathSpec::Straight { p2, .. } | PathSpec::Curve { p2, .. } => *p2,
            PathSpec::Orthogonal { points } => points.last().copied().unwrap_or_default(),
        }
    }

    /// Extent of the path, control points included for curves
    pub fn bounds(&self) -> BoundingBox {
        match self {
            PathSpec::Straight { p1, p2 } => BoundingBox::from_points(&[*p1, *p2]),
            PathSpec::Curve { p1, cp1, cp2, p2 } => {
                BoundingBox::from_points(&[*p1, *cp1, *cp2, *p2])
            }
            PathSpec::Orthogonal { points } => BoundingBox::from_points(points),
        }
    }
}

/// Compute the path between two resolved endpoints.
///
/// Never fails: a routing-table result that cannot form a path (fewer
/// than two waypoints) falls back to the straight segment and is logged,
/// so the connector is always rendered.
pub fn compute_path(
    p1: Point,
    side1: Option<Side>,
    p2: Point,
    side2: Option<Side>,
    style: RoutingStyle,
    ctx: &RouteContext,
) -> PathSpec {
    match style {
        RoutingStyle::Straight => PathSpec::Straight { p1, p2 },
        RoutingStyle::Curved => {
            let (cp1, cp2) = curved::control_points(p1, side1, p2, side2);
            PathSpec::Curve { p1, cp1, cp2, p2 }
        }
        RoutingStyle::Angled => {
            let points = orthogonal::waypoints(p1, side1, p2, side2, ctx);
            if points.len() < 2 {
                warn!(
                    "orthogonal routing for sides {side1:?}/{side2:?} produced no path; \
                     falling back to straight"
                );
                return PathSpec::Straight { p1, p2 };
            }
            PathSpec::Orthogonal { points }
        }
    }
}
