//! Tether - a connector routing and attachment engine for canvas shapes
//!
//! A connector is a directed line whose endpoints may bind to shapes on a
//! canvas. Bound endpoints track their shape through moves and resizes
//! because resolution is pull-based: every render recomputes the anchor
//! from the shape's current geometry. The path between the resolved
//! endpoints is routed straight, as a cubic Bezier, or as an orthogonal
//! polyline, with the bound sides steering the route.
//!
//! # Example
//!
//! ```rust
//! use tether::{render_scene, RenderConfig, Scene};
//!
//! let mut scene = Scene::from_toml_str(r#"
//!     [[shapes]]
//!     id = "a"
//!     left = 0.0
//!     top = 0.0
//!     width = 100.0
//!     height = 60.0
//!
//!     [[shapes]]
//!     id = "b"
//!     left = 300.0
//!     top = 200.0
//!     width = 100.0
//!     height = 60.0
//!
//!     [[connectors]]
//!     id = "c1"
//!     routing = "angled"
//!     start_attachment = { target = "a", side = "right" }
//!     end_attachment = { target = "b", side = "left" }
//! "#).unwrap();
//!
//! let svg = render_scene(&mut scene, &RenderConfig::default()).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod connector;
pub mod error;
pub mod geometry;
pub mod interact;
pub mod render;
pub mod route;
pub mod scene;
pub mod stylesheet;

pub use connector::{
    resolve_snap, AttachmentBinding, Connector, ConnectorId, End, RoutingStyle, ShapeId, Side,
    Snap, StrokeStyle, TipStyle,
};
pub use error::SceneError;
pub use geometry::{BoundingBox, Matrix, Point};
pub use interact::{begin_drag, drag_to, end_drag, DragCommit, DragSession, Provisional};
pub use render::{draw_connector, handle_position, Canvas, SvgCanvas, SvgConfig};
pub use route::{compute_path, PathSpec, RouteContext};
pub use scene::{Scene, ShapeGeometry, ShapeRecord};
pub use stylesheet::Stylesheet;

use render::svg::svg_document;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for stroke color resolution
    pub stylesheet: Stylesheet,
    /// Viewport zoom; stroke widths and arrowheads compensate for it
    pub zoom: f64,
    /// Debug mode: dump resolved endpoints to stderr
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            svg: SvgConfig::default(),
            stylesheet: Stylesheet::default(),
            zoom: 1.0,
            debug: false,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for stroke color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the viewport zoom
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Route a single connector against the scene's current geometry.
///
/// Resolution happens before routing, per the redraw ordering: the
/// endpoints and sides are pulled from the live shape registry, then the
/// path is computed from them. Nothing is cached between calls.
pub fn route_connector(
    scene: &mut Scene,
    id: &ConnectorId,
    zoom: f64,
) -> Result<PathSpec, SceneError> {
    let start = scene.resolve_endpoint(id, End::Start)?;
    let end = scene.resolve_endpoint(id, End::End)?;
    let side1 = scene.attachment_side(id, End::Start);
    let side2 = scene.attachment_side(id, End::End);

    let connector = scene
        .connector(id)
        .ok_or_else(|| SceneError::UnknownConnector(id.to_string()))?;
    let target_bounds = |end: End| {
        connector
            .attachment(end)
            .and_then(|b| scene.geometry(&b.target))
            .map(|g| g.bounds())
    };

    let mut ctx = RouteContext::new().with_zoom(zoom);
    ctx.start_bounds = target_bounds(End::Start);
    ctx.end_bounds = target_bounds(End::End);

    Ok(compute_path(
        start,
        side1,
        end,
        side2,
        connector.routing,
        &ctx,
    ))
}

/// Render every connector in the scene to an SVG document.
///
/// Within the pass, each connector goes through resolve, then route, then
/// draw, recomputed from current shape geometry; a shape moved by any
/// earlier operation is reflected with no invalidation signal.
pub fn render_scene(scene: &mut Scene, config: &RenderConfig) -> Result<String, SceneError> {
    let mut canvas = SvgCanvas::new();
    let mut bounds: Option<BoundingBox> = None;
    fn include(b: BoundingBox, bounds: &mut Option<BoundingBox>) {
        *bounds = Some(match bounds {
            Some(existing) => existing.union(&b),
            None => b,
        });
    }

    for id in scene.connector_ids() {
        let path = route_connector(scene, &id, config.zoom)?;
        let connector = scene
            .connector(&id)
            .ok_or_else(|| SceneError::UnknownConnector(id.to_string()))?;
        let side1 = connector.attachment(End::Start).and_then(|b| b.side);
        let side2 = connector.attachment(End::End).and_then(|b| b.side);
        let color = config.stylesheet.resolve_stroke(&connector.stroke_color);

        if config.debug {
            eprintln!(
                "[{}] {:?} {:?}/{:?} {:.1},{:.1} -> {:.1},{:.1}",
                id,
                connector.routing,
                side1,
                side2,
                path.first().x,
                path.first().y,
                path.last().x,
                path.last().y,
            );
        }

        draw_connector(
            &mut canvas,
            &path,
            side1,
            side2,
            connector.tips,
            connector.stroke,
            &color,
            connector.stroke_width,
            config.zoom,
        );
        include(path.bounds(), &mut bounds);
    }

    let shapes: Vec<BoundingBox> = scene.shapes().map(|r| r.geometry.bounds()).collect();
    for shape in &shapes {
        include(*shape, &mut bounds);
    }

    let outline = config.stylesheet.resolve_stroke("shape-outline");
    Ok(svg_document(
        &shapes,
        canvas.paths(),
        &outline,
        bounds.unwrap_or_else(BoundingBox::zero),
        &config.svg,
    ))
}
