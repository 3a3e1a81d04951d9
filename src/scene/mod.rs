//! The scene: shape registry, connector store, hit testing, scene files
//!
//! The scene is the canvas-wide lookup this engine reads shape geometry
//! from. Its only mutation of shape state is the per-shape back-reference
//! list of connector ids, maintained by the attachment operations and
//! used solely to prune bindings on cleanup.

mod attach;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connector::{
    normalize_stroke_width, AttachmentBinding, Connector, ConnectorId, RoutingStyle, ShapeId,
    Side, StrokeStyle, TipStyle,
};
use crate::error::SceneError;
use crate::geometry::{BoundingBox, Matrix, Point};

/// Geometry of a target shape, center-origin: `(left, top)` is the shape's
/// center, and the extent is `width · scale_x` by `height · scale_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl ShapeGeometry {
    /// Scaled width
    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale_x
    }

    /// Scaled height
    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale_y
    }

    /// Center of the shape in canvas space
    pub fn center(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// One of the four side midpoints in canvas space
    pub fn midpoint(&self, side: Side) -> Point {
        match side {
            Side::Left => Point::new(self.left - self.scaled_width() / 2.0, self.top),
            Side::Right => Point::new(self.left + self.scaled_width() / 2.0, self.top),
            Side::Top => Point::new(self.left, self.top - self.scaled_height() / 2.0),
            Side::Bottom => Point::new(self.left, self.top + self.scaled_height() / 2.0),
        }
    }

    /// Axis-aligned bounding box in canvas space
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.left - self.scaled_width() / 2.0,
            self.top - self.scaled_height() / 2.0,
            self.scaled_width(),
            self.scaled_height(),
        )
    }
}

/// A registered shape: geometry plus the engine-facing bookkeeping.
///
/// The `connectors` list is a weak back relation (relation + lookup only,
/// never ownership); it exists so shape removal can prune bindings without
/// scanning every connector.
#[derive(Debug, Clone)]
pub struct ShapeRecord {
    pub id: ShapeId,
    pub geometry: ShapeGeometry,
    pub locked: bool,
    /// Connector ids currently bound to this shape, cleanup only
    pub(crate) connectors: Vec<ConnectorId>,
    /// Transient anchor indicator shown while a drag hovers this shape
    pub hover_anchor: Option<Side>,
}

impl ShapeRecord {
    pub fn new(id: ShapeId, geometry: ShapeGeometry) -> Self {
        Self {
            id,
            geometry,
            locked: false,
            connectors: Vec::new(),
            hover_anchor: None,
        }
    }

    /// Connector ids currently bound to this shape
    pub fn bound_connectors(&self) -> &[ConnectorId] {
        &self.connectors
    }
}

/// The canvas-wide registry of shapes and connectors
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: HashMap<String, ShapeRecord>,
    /// Insertion order doubles as z-order: later shapes are on top
    shape_order: Vec<ShapeId>,
    connectors: HashMap<String, Connector>,
    connector_order: Vec<ConnectorId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape. Fails on a duplicate id.
    pub fn add_shape(&mut self, record: ShapeRecord) -> Result<(), SceneError> {
        if self.shapes.contains_key(record.id.as_str()) {
            return Err(SceneError::DuplicateId(record.id.to_string()));
        }
        self.shape_order.push(record.id.clone());
        self.shapes.insert(record.id.to_string(), record);
        Ok(())
    }

    /// Register a connector. Fails on a duplicate id. Any bindings already
    /// present on the connector are reflected into the targets'
    /// back-reference lists.
    pub fn add_connector(&mut self, connector: Connector) -> Result<(), SceneError> {
        if self.connectors.contains_key(connector.id.as_str()) {
            return Err(SceneError::DuplicateId(connector.id.to_string()));
        }
        for binding in [&connector.start_attachment, &connector.end_attachment]
            .into_iter()
            .flatten()
        {
            if let Some(record) = self.shapes.get_mut(binding.target.as_str()) {
                if !record.connectors.contains(&connector.id) {
                    record.connectors.push(connector.id.clone());
                }
            }
        }
        self.connector_order.push(connector.id.clone());
        self.connectors.insert(connector.id.to_string(), connector);
        Ok(())
    }

    pub fn shape(&self, id: &ShapeId) -> Option<&ShapeRecord> {
        self.shapes.get(id.as_str())
    }

    pub fn shape_mut(&mut self, id: &ShapeId) -> Option<&mut ShapeRecord> {
        self.shapes.get_mut(id.as_str())
    }

    /// Current geometry of a shape, if it exists
    pub fn geometry(&self, id: &ShapeId) -> Option<ShapeGeometry> {
        self.shapes.get(id.as_str()).map(|r| r.geometry)
    }

    /// Transform matrix of a shape: translation to its center composed
    /// with its scale
    pub fn transform_matrix(&self, id: &ShapeId) -> Option<Matrix> {
        self.geometry(id).map(|g| {
            Matrix::translation(g.left, g.top).multiply(&Matrix::scale(g.scale_x, g.scale_y))
        })
    }

    pub fn connector(&self, id: &ConnectorId) -> Option<&Connector> {
        self.connectors.get(id.as_str())
    }

    pub fn connector_mut(&mut self, id: &ConnectorId) -> Option<&mut Connector> {
        self.connectors.get_mut(id.as_str())
    }

    /// Shapes in z-order (bottom first)
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.shape_order
            .iter()
            .filter_map(|id| self.shapes.get(id.as_str()))
    }

    /// Connectors in insertion order
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connector_order
            .iter()
            .filter_map(|id| self.connectors.get(id.as_str()))
    }

    /// Connector ids in insertion order
    pub fn connector_ids(&self) -> Vec<ConnectorId> {
        self.connector_order.clone()
    }

    /// Hit-test shapes under a point, topmost first. Connectors are not
    /// shapes and are never returned.
    pub fn find_shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shape_order
            .iter()
            .rev()
            .find(|id| {
                self.shapes
                    .get(id.as_str())
                    .is_some_and(|r| r.geometry.bounds().contains(point))
            })
            .cloned()
    }

    /// Remove a shape, clearing every attachment binding that references
    /// it first so no connector is left dangling. Each affected endpoint
    /// freezes its last resolved position as its new local point.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Result<(), SceneError> {
        let bound = self
            .shapes
            .get(id.as_str())
            .ok_or_else(|| SceneError::UnknownShape(id.to_string()))?
            .connectors
            .clone();

        for connector_id in &bound {
            for end in [crate::connector::End::Start, crate::connector::End::End] {
                let references_shape = self
                    .connectors
                    .get(connector_id.as_str())
                    .and_then(|c| c.attachment(end))
                    .is_some_and(|b| &b.target == id);
                if references_shape {
                    self.clear_binding(connector_id, end)?;
                }
            }
        }

        self.shapes.remove(id.as_str());
        self.shape_order.retain(|s| s != id);
        Ok(())
    }

    /// Remove a connector, releasing its bindings from the targets'
    /// back-reference lists first.
    pub fn remove_connector(&mut self, id: &ConnectorId) -> Result<(), SceneError> {
        let connector = self
            .connectors
            .get(id.as_str())
            .ok_or_else(|| SceneError::UnknownConnector(id.to_string()))?;
        let targets: Vec<ShapeId> = [&connector.start_attachment, &connector.end_attachment]
            .into_iter()
            .flatten()
            .map(|b| b.target.clone())
            .collect();

        for target in targets {
            if let Some(record) = self.shapes.get_mut(target.as_str()) {
                record.connectors.retain(|c| c != id);
            }
        }

        self.connectors.remove(id.as_str());
        self.connector_order.retain(|c| c != id);
        Ok(())
    }

    /// Parse a scene from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, SceneError> {
        let doc: SceneDoc = toml::from_str(text)?;
        doc.into_scene()
    }

    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize the scene back to TOML. The back-reference lists are
    /// derived state and are not written; they are rebuilt on load.
    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string_pretty(&SceneDoc::from_scene(self))?)
    }
}

/// On-disk scene document
#[derive(Debug, Serialize, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    shapes: Vec<ShapeDoc>,
    #[serde(default)]
    connectors: Vec<ConnectorDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ShapeDoc {
    id: String,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    #[serde(default = "default_scale")]
    scale_x: f64,
    #[serde(default = "default_scale")]
    scale_y: f64,
    #[serde(default)]
    locked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectorDoc {
    id: String,
    #[serde(default)]
    routing: RoutingStyle,
    #[serde(default)]
    tips: TipStyle,
    #[serde(default)]
    stroke: StrokeStyle,
    #[serde(default = "default_stroke_color")]
    stroke_color: String,
    #[serde(default = "default_stroke_width")]
    stroke_width: f64,
    #[serde(default)]
    locked: bool,
    // table-valued fields last so the document serializes cleanly
    #[serde(default)]
    start: Point,
    #[serde(default)]
    end: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_attachment: Option<AttachmentBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_attachment: Option<AttachmentBinding>,
}

fn default_stroke_color() -> String {
    "stroke-1".to_string()
}

fn default_stroke_width() -> f64 {
    4.0
}

impl SceneDoc {
    fn into_scene(self) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();
        for shape in self.shapes {
            let mut record = ShapeRecord::new(
                ShapeId::new(shape.id),
                ShapeGeometry {
                    left: shape.left,
                    top: shape.top,
                    width: shape.width,
                    height: shape.height,
                    scale_x: shape.scale_x,
                    scale_y: shape.scale_y,
                },
            );
            record.locked = shape.locked;
            scene.add_shape(record)?;
        }
        for conn in self.connectors {
            let mut connector = Connector::new(ConnectorId::new(conn.id));
            connector.start = conn.start;
            connector.end = conn.end;
            connector.start_attachment = conn.start_attachment;
            connector.end_attachment = conn.end_attachment;
            connector.routing = conn.routing;
            connector.tips = conn.tips;
            connector.stroke = conn.stroke;
            connector.stroke_color = conn.stroke_color;
            connector.stroke_width = normalize_stroke_width(conn.stroke_width);
            connector.locked = conn.locked;
            connector.transform = Matrix::identity();
            scene.add_connector(connector)?;
        }
        Ok(scene)
    }

    fn from_scene(scene: &Scene) -> SceneDoc {
        SceneDoc {
            shapes: scene
                .shapes()
                .map(|record| ShapeDoc {
                    id: record.id.to_string(),
                    left: record.geometry.left,
                    top: record.geometry.top,
                    width: record.geometry.width,
                    height: record.geometry.height,
                    scale_x: record.geometry.scale_x,
                    scale_y: record.geometry.scale_y,
                    locked: record.locked,
                })
                .collect(),
            connectors: scene
                .connectors()
                .map(|conn| ConnectorDoc {
                    id: conn.id.to_string(),
                    routing: conn.routing,
                    tips: conn.tips,
                    stroke: conn.stroke,
                    stroke_color: conn.stroke_color.clone(),
                    stroke_width: conn.stroke_width,
                    locked: conn.locked,
                    start: conn.start,
                    end: conn.end,
                    start_attachment: conn.start_attachment.clone(),
                    end_attachment: conn.end_attachment.clone(),
                })
                .collect(),
        }
    }
}
