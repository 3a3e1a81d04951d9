//! Orthogonal waypoint routing for angled connectors
//!
//! Every case is enumerated explicitly: the full 4×4 side-pair table plus
//! the one-free and both-free cases. No symmetry shortcut is taken — the
//! x/y ordering of the endpoints changes the route even for the same side
//! pair. Each case assembles its waypoints from one of three shapes:
//!
//! * a vertical mid segment halfway between the stub points,
//! * a horizontal mid segment pushed clear of the far shape's extent, or
//! * a single corner joining the two stubs.
//!
//! All three are axis-aligned by construction: every consecutive waypoint
//! pair shares an x or a y.

use crate::connector::Side;
use crate::geometry::Point;

use super::{RouteContext, FALLBACK_EXTENT, ORTHO_OFFSET, ROUTE_MARGIN};

/// Stub point a fixed distance outward from a bound side
fn stub(p: Point, side: Side) -> Point {
    match side {
        Side::Right => Point::new(p.x + ORTHO_OFFSET, p.y),
        Side::Left => Point::new(p.x - ORTHO_OFFSET, p.y),
        Side::Top => Point::new(p.x, p.y - ORTHO_OFFSET),
        Side::Bottom => Point::new(p.x, p.y + ORTHO_OFFSET),
    }
}

/// Vertical clearance needed to route past a shape: its scaled height
/// plus a zoom-scaled margin
fn clearance(extent: Option<f64>, zoom: f64) -> f64 {
    extent.unwrap_or(FALLBACK_EXTENT) + ROUTE_MARGIN * zoom
}

/// Vertical mid segment halfway between the stub points:
/// `[p1, s1, (mx, s1.y), (mx, s2.y), s2, p2]`
fn v_mid(p1: Point, s1: Point, s2: Point, p2: Point) -> Vec<Point> {
    let mx = (s1.x + s2.x) / 2.0;
    assemble(
        p1,
        s1,
        &[Point::new(mx, s1.y), Point::new(mx, s2.y)],
        s2,
        p2,
    )
}

/// Horizontal mid segment at `y`: `[p1, s1, (s1.x, y), (s2.x, y), s2, p2]`
fn h_mid(p1: Point, s1: Point, s2: Point, p2: Point, y: f64) -> Vec<Point> {
    assemble(
        p1,
        s1,
        &[Point::new(s1.x, y), Point::new(s2.x, y)],
        s2,
        p2,
    )
}

/// Single corner at the end stub's x: `[p1, s1, (s2.x, s1.y), s2, p2]`
fn corner_at_end(p1: Point, s1: Point, s2: Point, p2: Point) -> Vec<Point> {
    assemble(p1, s1, &[Point::new(s2.x, s1.y)], s2, p2)
}

/// Single corner at the start stub's x: `[p1, s1, (s1.x, s2.y), s2, p2]`
fn corner_at_start(p1: Point, s1: Point, s2: Point, p2: Point) -> Vec<Point> {
    assemble(p1, s1, &[Point::new(s1.x, s2.y)], s2, p2)
}

/// Join the endpoint, stubs and mid waypoints, skipping degenerate
/// duplicates where a free end has no stub
fn assemble(p1: Point, s1: Point, mids: &[Point], s2: Point, p2: Point) -> Vec<Point> {
    let mut points = Vec::with_capacity(mids.len() + 4);
    points.push(p1);
    if s1 != p1 {
        points.push(s1);
    }
    for &m in mids {
        if points.last() != Some(&m) {
            points.push(m);
        }
    }
    if s2 != p2 && points.last() != Some(&s2) {
        points.push(s2);
    }
    if points.last() != Some(&p2) || points.len() == 1 {
        points.push(p2);
    }
    points
}

/// Compute the orthogonal waypoint sequence for a side pair.
///
/// Returns the full ordered sequence including both endpoints. Every
/// consecutive segment is purely horizontal or vertical.
pub fn waypoints(
    p1: Point,
    side1: Option<Side>,
    p2: Point,
    side2: Option<Side>,
    ctx: &RouteContext,
) -> Vec<Point> {
    let xlt = p1.x < p2.x;
    let ylt = p1.y < p2.y;

    let start_extent = ctx.start_bounds.map(|b| b.height);
    let end_extent = ctx.end_bounds.map(|b| b.height);

    match (side1, side2) {
        (None, None) => v_mid(p1, p1, p2, p2),

        // free start, bound end: when the end stub points back toward the
        // start, detour over or under the end shape instead of crossing it
        (None, Some(e)) => {
            let s2 = stub(p2, e);
            match e {
                Side::Right if xlt => {
                    let pseudo = Point::new(p1.x + ORTHO_OFFSET, p1.y);
                    let signed = signed_clearance(end_extent, ylt, ctx.zoom);
                    h_mid(p1, pseudo, s2, p2, s2.y + signed)
                }
                Side::Left if !xlt => {
                    let pseudo = Point::new(p1.x - ORTHO_OFFSET, p1.y);
                    let signed = signed_clearance(end_extent, ylt, ctx.zoom);
                    h_mid(p1, pseudo, s2, p2, s2.y + signed)
                }
                _ => v_mid(p1, p1, s2, p2),
            }
        }

        // bound start, free end: mirrored treatment using the start
        // shape's extent
        (Some(s), None) => {
            let s1 = stub(p1, s);
            match s {
                Side::Left if xlt => {
                    let pseudo = Point::new(p2.x - ORTHO_OFFSET, p2.y);
                    let signed = signed_clearance(start_extent, ylt, ctx.zoom);
                    h_mid(p1, s1, pseudo, p2, s1.y + signed)
                }
                Side::Right if !xlt => {
                    let pseudo = Point::new(p2.x + ORTHO_OFFSET, p2.y);
                    let signed = signed_clearance(start_extent, ylt, ctx.zoom);
                    h_mid(p1, s1, pseudo, p2, s1.y + signed)
                }
                _ => v_mid(p1, s1, p2, p2),
            }
        }

        (Some(s), Some(e)) => {
            let s1 = stub(p1, s);
            let s2 = stub(p2, e);
            let signed = signed_clearance(end_extent, ylt, ctx.zoom);
            let clear = clearance(end_extent, ctx.zoom);
            let raw = end_extent.unwrap_or(FALLBACK_EXTENT);

            match (s, e) {
                // facing horizontal pairs: natural order routes through
                // the gap; reversed order wraps around the end shape
                (Side::Right, Side::Left) => {
                    if xlt {
                        v_mid(p1, s1, s2, p2)
                    } else {
                        h_mid(p1, s1, s2, p2, s2.y + signed)
                    }
                }
                (Side::Left, Side::Right) => {
                    if xlt {
                        h_mid(p1, s1, s2, p2, s2.y + signed)
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }
                (Side::Right, Side::Right) => {
                    if xlt {
                        h_mid(p1, s1, s2, p2, s2.y + signed)
                    } else {
                        corner_at_start(p1, s1, s2, p2)
                    }
                }
                (Side::Left, Side::Left) => {
                    if xlt {
                        corner_at_start(p1, s1, s2, p2)
                    } else {
                        h_mid(p1, s1, s2, p2, s2.y + signed)
                    }
                }

                (Side::Top, Side::Left) => {
                    if !xlt {
                        if !ylt {
                            h_mid(p1, s1, s2, p2, s2.y - clear)
                        } else {
                            corner_at_end(p1, s1, s2, p2)
                        }
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }
                (Side::Top, Side::Right) => {
                    if xlt {
                        if !ylt {
                            h_mid(p1, s1, s2, p2, s2.y - raw)
                        } else {
                            corner_at_end(p1, s1, s2, p2)
                        }
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }
                (Side::Bottom, Side::Left) => {
                    if !xlt {
                        corner_at_end(p1, s1, s2, p2)
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }
                (Side::Bottom, Side::Right) => {
                    if xlt {
                        corner_at_end(p1, s1, s2, p2)
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }

                (Side::Right, Side::Top) => {
                    if !xlt {
                        h_mid(p1, s1, s2, p2, s2.y - clear)
                    } else if !ylt {
                        v_mid(p1, s1, s2, p2)
                    } else {
                        corner_at_end(p1, s1, s2, p2)
                    }
                }
                (Side::Left, Side::Top) => {
                    if xlt {
                        h_mid(p1, s1, s2, p2, s2.y - raw)
                    } else if ylt {
                        corner_at_end(p1, s1, s2, p2)
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }
                (Side::Left, Side::Bottom) => {
                    if xlt {
                        h_mid(p1, s1, s2, p2, s2.y + clear)
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }
                (Side::Right, Side::Bottom) => {
                    if !xlt {
                        h_mid(p1, s1, s2, p2, s2.y + clear)
                    } else {
                        v_mid(p1, s1, s2, p2)
                    }
                }

                // vertical-vertical pairs share the vertical mid segment
                (Side::Top, Side::Top)
                | (Side::Top, Side::Bottom)
                | (Side::Bottom, Side::Top)
                | (Side::Bottom, Side::Bottom) => v_mid(p1, s1, s2, p2),
            }
        }
    }
}

/// Signed vertical clearance: negative when the start is above the end
/// (route above), positive otherwise (route below)
fn signed_clearance(extent: Option<f64>, ylt: bool, zoom: f64) -> f64 {
    let clear = clearance(extent, zoom);
    if ylt {
        -clear
    } else {
        clear
    }
}
