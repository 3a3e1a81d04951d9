//! SVG backend for the render adapter
//!
//! [`SvgCanvas`] implements [`Canvas`](super::Canvas) by accumulating
//! `<path>` elements; [`svg_document`] wraps the accumulated paths and the
//! scene's shape outlines into a complete SVG document.

use crate::geometry::{BoundingBox, Point};

use super::Canvas;

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Padding around the viewBox
    pub viewbox_padding: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 40.0,
            standalone: true,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }
}

/// A [`Canvas`](super::Canvas) that accumulates stroked subpaths as SVG
/// `<path>` elements. Each `stroke()` flushes the current subpath with the
/// stroke state in effect at that moment.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    d: String,
    paths: Vec<String>,
    stroke_color: String,
    line_width: f64,
    dash: Vec<f64>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self {
            d: String::new(),
            paths: Vec::new(),
            stroke_color: "#333333".to_string(),
            line_width: 2.0,
            dash: Vec::new(),
        }
    }

    /// The `<path>` elements flushed so far
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Consume the canvas, returning the flushed `<path>` elements
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl Canvas for SvgCanvas {
    fn move_to(&mut self, p: Point) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push_str(&format!("M{:.2} {:.2}", p.x, p.y));
    }

    fn line_to(&mut self, p: Point) {
        self.d.push_str(&format!(" L{:.2} {:.2}", p.x, p.y));
    }

    fn bezier_curve_to(&mut self, cp1: Point, cp2: Point, end: Point) {
        self.d.push_str(&format!(
            " C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
        ));
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.dash = pattern.to_vec();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.stroke_color = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn stroke(&mut self) {
        if self.d.is_empty() {
            return;
        }
        let dash_attr = if self.dash.is_empty() {
            String::new()
        } else {
            let pattern: Vec<String> = self.dash.iter().map(|v| format!("{v}")).collect();
            format!(r#" stroke-dasharray="{}""#, pattern.join(","))
        };
        self.paths.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"{} stroke-linecap="round" stroke-linejoin="round"/>"#,
            self.d, self.stroke_color, self.line_width, dash_attr
        ));
        self.d.clear();
    }
}

/// Assemble a complete SVG document: shape outlines first, connector
/// paths on top, viewBox padded around the given bounds.
pub fn svg_document(
    shapes: &[BoundingBox],
    paths: &[String],
    outline_color: &str,
    bounds: BoundingBox,
    config: &SvgConfig,
) -> String {
    let padding = config.viewbox_padding;
    let vb_x = bounds.x - padding;
    let vb_y = bounds.y - padding;
    let vb_w = bounds.width + 2.0 * padding;
    let vb_h = bounds.height + 2.0 * padding;

    let mut svg = String::new();
    if config.standalone {
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');
    }
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{vb_x} {vb_y} {vb_w} {vb_h}">"#
    ));
    svg.push('\n');

    for shape in shapes {
        svg.push_str(&format!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}"/>"#,
            shape.x, shape.y, shape.width, shape.height, outline_color
        ));
        svg.push('\n');
    }
    for path in paths {
        svg.push_str("  ");
        svg.push_str(path);
        svg.push('\n');
    }

    svg.push_str("</svg>");
    svg
}
