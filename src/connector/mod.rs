//! The connector entity: a directed line whose endpoints may bind to shapes

pub mod anchor;

pub use anchor::{resolve_snap, Snap, FREE_NUDGE, SNAP_RANGE};

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Matrix, Point};

/// Identifier of a shape in the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a connector in the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorId(pub String);

impl ConnectorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the four cardinal boundary midpoints of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Which end of a connector an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Start,
    End,
}

impl End {
    /// The opposite end
    pub fn other(self) -> End {
        match self {
            End::Start => End::End,
            End::End => End::Start,
        }
    }
}

/// Path shape category for a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStyle {
    #[default]
    Straight,
    Curved,
    /// Orthogonal multi-segment routing
    Angled,
}

/// Which ends draw an arrowhead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipStyle {
    None,
    Start,
    #[default]
    End,
    Both,
}

impl TipStyle {
    pub fn at_start(self) -> bool {
        matches!(self, TipStyle::Start | TipStyle::Both)
    }

    pub fn at_end(self) -> bool {
        matches!(self, TipStyle::End | TipStyle::Both)
    }
}

/// Stroke dash category for a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// The relation from one connector endpoint to a target shape's boundary.
///
/// `side: None` is an interior/free attach. The binding never stores an
/// absolute coordinate: the side plus the target's current geometry are
/// always sufficient to recompute the endpoint, so nothing here can go
/// stale when the target moves or resizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentBinding {
    pub target: ShapeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl AttachmentBinding {
    pub fn new(target: ShapeId, side: Option<Side>) -> Self {
        Self { target, side }
    }
}

/// Stroke widths the engine draws; anything else is coerced to the default.
const ALLOWED_STROKE_WIDTHS: [f64; 3] = [2.0, 4.0, 8.0];
const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Coerce a requested stroke width onto the supported set
pub(crate) fn normalize_stroke_width(width: f64) -> f64 {
    if ALLOWED_STROKE_WIDTHS.contains(&width) {
        width
    } else {
        DEFAULT_STROKE_WIDTH
    }
}

/// A directed line entity whose endpoints may be bound to shapes.
///
/// `start`/`end` are kept in the connector's own local space; rendering
/// always goes through [`crate::scene::Scene::resolve_endpoint`], which
/// prefers the bound shape's live geometry over the stored point.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub id: ConnectorId,
    /// Start point in local (pre-transform) space
    pub start: Point,
    /// End point in local (pre-transform) space
    pub end: Point,
    pub start_attachment: Option<AttachmentBinding>,
    pub end_attachment: Option<AttachmentBinding>,
    pub routing: RoutingStyle,
    pub tips: TipStyle,
    pub stroke: StrokeStyle,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub locked: bool,
    /// The connector's own transform into canvas space
    pub transform: Matrix,
    /// Cached extent, refreshed on drag commit; never the source of truth
    pub(crate) bounds: BoundingBox,
}

impl Connector {
    /// Create a connector with two default-zero endpoints
    pub fn new(id: ConnectorId) -> Self {
        Self {
            id,
            start: Point::default(),
            end: Point::default(),
            start_attachment: None,
            end_attachment: None,
            routing: RoutingStyle::default(),
            tips: TipStyle::default(),
            stroke: StrokeStyle::default(),
            stroke_color: "stroke-1".to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            locked: false,
            transform: Matrix::identity(),
            bounds: BoundingBox::zero(),
        }
    }

    /// Set the stroke width, coercing unsupported values to the default
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = normalize_stroke_width(width);
        self
    }

    /// The stored local point of one end
    pub fn point(&self, end: End) -> Point {
        match end {
            End::Start => self.start,
            End::End => self.end,
        }
    }

    /// Overwrite the stored local point of one end
    pub fn set_point(&mut self, end: End, point: Point) {
        match end {
            End::Start => self.start = point,
            End::End => self.end = point,
        }
    }

    /// The attachment binding of one end, if any
    pub fn attachment(&self, end: End) -> Option<&AttachmentBinding> {
        match end {
            End::Start => self.start_attachment.as_ref(),
            End::End => self.end_attachment.as_ref(),
        }
    }

    /// Replace the attachment binding of one end
    pub fn set_attachment(&mut self, end: End, binding: Option<AttachmentBinding>) {
        match end {
            End::Start => self.start_attachment = binding,
            End::End => self.end_attachment = binding,
        }
    }

    /// Cached extent from the last commit
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}
