//! Anchor resolution: snapping a pointer to a shape's boundary midpoints

use crate::geometry::Point;
use crate::scene::ShapeGeometry;

use super::Side;

/// Pixel distance within which a pointer snaps to a side midpoint
pub const SNAP_RANGE: f64 = 30.0;

/// Pixel nudge applied to a free point so the two endpoints of a
/// self-referential or zero-length connector never exactly coincide
pub const FREE_NUDGE: f64 = 5.0;

/// The result of snapping a pointer against a candidate shape.
///
/// `side: None` means no side midpoint was within tolerance; `point` is
/// then a nudged free point rather than a boundary anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub point: Point,
    pub side: Option<Side>,
}

/// Determine the best snap point on a shape's boundary for a pointer
/// location, or a nudged free point when nothing is within tolerance.
///
/// The pointer snaps to the left or right midpoint when its y lies
/// strictly between the top and bottom midpoints and its x falls within
/// [`SNAP_RANGE`] inside that edge; top and bottom are symmetric. Pure
/// query, never fails: absence of a snap is the `side: None` result.
pub fn resolve_snap(pointer: Point, shape: &ShapeGeometry) -> Snap {
    let ml = shape.midpoint(Side::Left);
    let mr = shape.midpoint(Side::Right);
    let mt = shape.midpoint(Side::Top);
    let mb = shape.midpoint(Side::Bottom);

    if pointer.y > mt.y && pointer.y < mb.y {
        if pointer.x > ml.x && pointer.x < ml.x + SNAP_RANGE {
            return Snap {
                point: ml,
                side: Some(Side::Left),
            };
        }
        if pointer.x > mr.x - SNAP_RANGE && pointer.x < mr.x {
            return Snap {
                point: mr,
                side: Some(Side::Right),
            };
        }
    }

    if pointer.x > ml.x && pointer.x < mr.x {
        if pointer.y > mt.y && pointer.y < mt.y + SNAP_RANGE {
            return Snap {
                point: mt,
                side: Some(Side::Top),
            };
        }
        if pointer.y > mb.y - SNAP_RANGE && pointer.y < mb.y {
            return Snap {
                point: mb,
                side: Some(Side::Bottom),
            };
        }
    }

    Snap {
        point: Point::new(pointer.x - FREE_NUDGE, pointer.y - FREE_NUDGE),
        side: None,
    }
}
