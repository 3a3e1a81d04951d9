//! Cubic-Bezier control points for curved connectors
//!
//! The control-point choice is a lookup keyed by the pair of attachment
//! sides and the relative x/y ordering of the endpoints. Each bound side
//! projects a stub point a fixed offset outward from the shape, so the
//! curve visibly leaves the shape perpendicular to its boundary before
//! bending toward the far end. When the two control points would pull the
//! curve into an S shape, the table collapses them onto a single point,
//! keeping the curve monotonic in the dominant axis.

use crate::connector::Side;
use crate::geometry::Point;

use super::CURVE_OFFSET;

/// Stub point a fixed distance outward from a bound side
fn stub(p: Point, side: Side) -> Point {
    match side {
        Side::Right => Point::new(p.x + CURVE_OFFSET, p.y),
        Side::Left => Point::new(p.x - CURVE_OFFSET, p.y),
        Side::Top => Point::new(p.x, p.y - CURVE_OFFSET),
        Side::Bottom => Point::new(p.x, p.y + CURVE_OFFSET),
    }
}

/// Control points for the cubic Bezier from `p1` to `p2`.
///
/// Both-free endpoints use the opposite corners of the stubbed endpoints'
/// bounding box; a single bound side dictates its stub while the free end
/// gets a pseudo-stub from the endpoint ordering; two bound sides use the
/// full side-pair table.
pub fn control_points(
    p1: Point,
    side1: Option<Side>,
    p2: Point,
    side2: Option<Side>,
) -> (Point, Point) {
    let xlt = p1.x < p2.x;
    let ylt = p1.y < p2.y;

    // stub points; free ends get an ordering-dependent pseudo-stub below
    let (s1, s2) = match (side1, side2) {
        (None, None) => {
            if xlt {
                (stub(p1, Side::Right), stub(p2, Side::Left))
            } else {
                (stub(p1, Side::Left), stub(p2, Side::Right))
            }
        }
        (None, Some(e)) => {
            let s2 = stub(p2, e);
            let s1 = match e {
                Side::Right | Side::Left => {
                    if xlt {
                        stub(p1, Side::Right)
                    } else {
                        stub(p1, Side::Left)
                    }
                }
                Side::Top | Side::Bottom => {
                    if ylt {
                        stub(p1, Side::Bottom)
                    } else {
                        stub(p1, Side::Top)
                    }
                }
            };
            (s1, s2)
        }
        (Some(s), None) => {
            let s1 = stub(p1, s);
            let s2 = match s {
                Side::Right | Side::Left => {
                    if xlt {
                        stub(p2, Side::Left)
                    } else {
                        stub(p2, Side::Right)
                    }
                }
                Side::Top | Side::Bottom => {
                    if ylt {
                        stub(p2, Side::Top)
                    } else {
                        stub(p2, Side::Bottom)
                    }
                }
            };
            (s1, s2)
        }
        (Some(s), Some(e)) => (stub(p1, s), stub(p2, e)),
    };

    // the two corners of the stub points' bounding box
    let a = Point::new(s2.x, s1.y);
    let b = Point::new(s1.x, s2.y);

    match (side1, side2) {
        (None, None) => (a, b),

        (None, Some(Side::Right)) => {
            if xlt {
                (a, a)
            } else {
                (a, b)
            }
        }
        (None, Some(Side::Left)) => {
            if xlt {
                (a, b)
            } else {
                (a, a)
            }
        }
        (None, Some(Side::Top)) => {
            if ylt {
                (b, a)
            } else {
                (b, b)
            }
        }
        (None, Some(Side::Bottom)) => {
            if ylt {
                (b, b)
            } else {
                (b, a)
            }
        }

        (Some(Side::Right), None) => {
            if xlt {
                (a, b)
            } else {
                (b, b)
            }
        }
        (Some(Side::Left), None) => {
            if xlt {
                (b, b)
            } else {
                (a, b)
            }
        }
        (Some(Side::Top), None) => {
            if ylt {
                (a, a)
            } else {
                (b, a)
            }
        }
        (Some(Side::Bottom), None) => {
            if ylt {
                (b, a)
            } else {
                (a, a)
            }
        }

        (Some(Side::Right), Some(Side::Left)) => {
            if xlt {
                (a, b)
            } else {
                (b, a)
            }
        }
        (Some(Side::Right), Some(Side::Right)) => {
            if xlt {
                (a, a)
            } else {
                (b, b)
            }
        }
        (Some(Side::Right), Some(Side::Top)) => {
            if ylt {
                if xlt {
                    (a, a)
                } else {
                    (b, b)
                }
            } else {
                (b, b)
            }
        }
        (Some(Side::Right), Some(Side::Bottom)) => {
            if ylt {
                (b, b)
            } else if xlt {
                (a, a)
            } else {
                (b, b)
            }
        }

        (Some(Side::Left), Some(Side::Right)) => {
            if xlt {
                (b, a)
            } else {
                (a, b)
            }
        }
        (Some(Side::Left), Some(Side::Left)) => {
            if xlt {
                (b, b)
            } else {
                (a, a)
            }
        }
        (Some(Side::Left), Some(Side::Top)) => {
            if ylt {
                if xlt {
                    (b, b)
                } else {
                    (a, a)
                }
            } else if xlt {
                (b, b)
            } else {
                (a, b)
            }
        }
        (Some(Side::Left), Some(Side::Bottom)) => {
            if ylt {
                (b, b)
            } else if xlt {
                (b, b)
            } else {
                (a, a)
            }
        }

        (Some(Side::Top), Some(Side::Right)) => {
            if xlt {
                if ylt {
                    (a, a)
                } else {
                    (b, a)
                }
            } else if ylt {
                (a, b)
            } else {
                (b, b)
            }
        }
        (Some(Side::Top), Some(Side::Left)) => {
            if xlt {
                if ylt {
                    (a, a)
                } else {
                    (b, a)
                }
            } else {
                (a, a)
            }
        }
        (Some(Side::Top), Some(Side::Top)) => {
            if ylt {
                (a, a)
            } else {
                (b, b)
            }
        }
        (Some(Side::Top), Some(Side::Bottom)) => {
            if ylt {
                (a, b)
            } else if xlt {
                (b, b)
            } else {
                (a, a)
            }
        }

        (Some(Side::Bottom), Some(Side::Right)) => {
            if xlt && ylt {
                (b, b)
            } else {
                (a, a)
            }
        }
        (Some(Side::Bottom), Some(Side::Left)) => {
            if xlt {
                if ylt {
                    (b, b)
                } else {
                    (a, a)
                }
            } else if ylt {
                (b, a)
            } else {
                (a, a)
            }
        }
        (Some(Side::Bottom), Some(Side::Top)) => {
            if ylt {
                (b, a)
            } else {
                (a, b)
            }
        }
        (Some(Side::Bottom), Some(Side::Bottom)) => {
            if ylt {
                (b, b)
            } else {
                (a, a)
            }
        }
    }
}
