//! Render adapter: drawing a routed connector onto a 2D canvas
//!
//! The engine draws through the [`Canvas`] trait, a minimal 2D drawing
//! context (`move_to`/`line_to`/`bezier_curve_to` plus stroke state). The
//! bundled [`svg::SvgCanvas`] backend implements it for SVG output; a host
//! application can implement it over any immediate-mode 2D API.

pub mod svg;

pub use svg::{SvgCanvas, SvgConfig};

use crate::connector::{Connector, End, Side, StrokeStyle, TipStyle};
use crate::geometry::{line_angle_degrees, Matrix, Point};
use crate::route::PathSpec;

/// Half-angle of the arrowhead: each stroke sits 22.5° off the path
/// direction at the tip
const TIP_SPREAD: f64 = 22.5;

/// Fixed rotation between a segment's direction angle and the tip angle
const TIP_ROTATION: f64 = 90.0;

/// Base arrowhead length before the stroke-width term; also the floor
/// that keeps tips visible at thin strokes
const TIP_BASE_LENGTH: f64 = 12.0;

/// A minimal 2D drawing context, mirroring the subset of an HTML canvas
/// the engine needs
pub trait Canvas {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, end: Point);
    fn set_line_dash(&mut self, pattern: &[f64]);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn stroke(&mut self);
}

/// Dash pattern for a stroke style
pub fn dash_pattern(style: StrokeStyle) -> &'static [f64] {
    match style {
        StrokeStyle::Solid => &[],
        StrokeStyle::Dashed => &[8.0, 20.0],
        StrokeStyle::Dotted => &[1.0, 15.0],
    }
}

/// Stroke width compensated by zoom so lines keep a constant on-screen
/// size once the viewport zooms past 1:1
pub fn compensated_width(stroke_width: f64, zoom: f64) -> f64 {
    stroke_width / zoom.max(1.0)
}

/// Arrowhead stroke length, scaled with stroke width and compensated by
/// zoom the same way the line width is
pub fn tip_length(stroke_width: f64, zoom: f64) -> f64 {
    (TIP_BASE_LENGTH + stroke_width * 2.0) / zoom.max(1.0)
}

/// Draw a routed connector: body strokes, then arrowheads.
///
/// The dash pattern applies to the body only; tips are always solid.
#[allow(clippy::too_many_arguments)]
pub fn draw_connector(
    canvas: &mut dyn Canvas,
    path: &PathSpec,
    side1: Option<Side>,
    side2: Option<Side>,
    tips: TipStyle,
    stroke: StrokeStyle,
    color: &str,
    stroke_width: f64,
    zoom: f64,
) {
    canvas.set_stroke_color(color);
    canvas.set_line_width(compensated_width(stroke_width, zoom));
    canvas.set_line_dash(dash_pattern(stroke));

    match path {
        PathSpec::Straight { p1, p2 } => {
            canvas.move_to(*p1);
            canvas.line_to(*p2);
            canvas.stroke();
        }
        PathSpec::Curve { p1, cp1, cp2, p2 } => {
            canvas.move_to(*p1);
            canvas.bezier_curve_to(*cp1, *cp2, *p2);
            canvas.stroke();
        }
        PathSpec::Orthogonal { points } => {
            if let Some((first, rest)) = points.split_first() {
                canvas.move_to(*first);
                for p in rest {
                    canvas.line_to(*p);
                }
                canvas.stroke();
            }
        }
    }

    if tips == TipStyle::None {
        return;
    }

    let (start_angle, end_angle) = tip_angles(path, side1, side2);
    let len = tip_length(stroke_width, zoom);
    canvas.set_line_dash(&[]);
    if tips.at_start() {
        draw_tip(canvas, path.first(), start_angle, len);
    }
    if tips.at_end() {
        draw_tip(canvas, path.last(), end_angle, len);
    }
}

/// Tip angles in degrees for the start and end arrowheads.
///
/// A straight connector derives both from the segment direction; curved
/// and angled connectors use the fixed per-side angles for bound ends and
/// the endpoint x-ordering for free ends.
pub(crate) fn tip_angles(
    path: &PathSpec,
    side1: Option<Side>,
    side2: Option<Side>,
) -> (f64, f64) {
    let p1 = path.first();
    let p2 = path.last();
    match path {
        PathSpec::Straight { .. } => {
            let angle = line_angle_degrees(p1, p2) + TIP_ROTATION;
            (angle % 360.0, (angle + 180.0) % 360.0)
        }
        PathSpec::Curve { .. } | PathSpec::Orthogonal { .. } => {
            let xlt = p1.x < p2.x;
            let start = match side1 {
                Some(side) => side_tip_angle(side),
                None => {
                    if xlt {
                        90.0
                    } else {
                        270.0
                    }
                }
            };
            let end = match side2 {
                Some(side) => side_tip_angle(side),
                None => {
                    if xlt {
                        270.0
                    } else {
                        90.0
                    }
                }
            };
            (start, end)
        }
    }
}

/// Fixed tip angle for an endpoint bound to a side: the strokes extend
/// outward from the shape along the stub direction
fn side_tip_angle(side: Side) -> f64 {
    match side {
        Side::Bottom => 180.0,
        Side::Top => 0.0,
        Side::Right => 90.0,
        Side::Left => 270.0,
    }
}

/// Two short strokes from the tip point, `TIP_SPREAD` degrees either side
/// of the tip angle
fn draw_tip(canvas: &mut dyn Canvas, p: Point, angle: f64, len: f64) {
    for spread in [-TIP_SPREAD, TIP_SPREAD] {
        let theta = (180.0 - angle + spread).to_radians();
        canvas.move_to(p);
        canvas.line_to(Point::new(
            p.x + len * theta.sin(),
            p.y + len * theta.cos(),
        ));
    }
    canvas.stroke();
}

/// Position of one endpoint's draggable grip in viewport space: the
/// endpoint's offset from the segment midpoint pushed through the
/// viewport and connector transforms
pub fn handle_position(connector: &Connector, end: End, viewport: &Matrix) -> Point {
    let offset = connector.start.midpoint(connector.end);
    let p = connector.point(end);
    let local = Point::new(p.x - offset.x, p.y - offset.y);
    viewport.multiply(&connector.transform).transform_point(local)
}
