//! Attachment operations: endpoint resolution and binding mutation
//!
//! Resolution is pull-based: every call recomputes the bound side's
//! midpoint from the target's current geometry, so a connector tracks
//! shape moves and resizes without any push notification. Binding
//! mutation keeps the invariant that the old target's back reference is
//! released before the new one is registered.

use log::debug;

use crate::connector::{AttachmentBinding, ConnectorId, End, ShapeId, Side};
use crate::error::SceneError;
use crate::geometry::{BoundingBox, Point};

use super::Scene;

impl Scene {
    /// Resolve one endpoint of a connector to an absolute canvas point.
    ///
    /// Unbound endpoints are the stored local point through the
    /// connector's own transform. Bound endpoints are recomputed from the
    /// target's current geometry. A binding whose target no longer exists
    /// is cleared here and the endpoint falls back to its last known local
    /// point — a recovery path, not an error.
    pub fn resolve_endpoint(
        &mut self,
        id: &ConnectorId,
        end: End,
    ) -> Result<Point, SceneError> {
        let connector = self
            .connectors
            .get(id.as_str())
            .ok_or_else(|| SceneError::UnknownConnector(id.to_string()))?;

        let Some(binding) = connector.attachment(end).cloned() else {
            return Ok(connector.transform.transform_point(connector.point(end)));
        };

        match self.shapes.get(binding.target.as_str()) {
            Some(record) => Ok(match binding.side {
                Some(side) => record.geometry.midpoint(side),
                None => record.geometry.center(),
            }),
            None => {
                debug!(
                    "connector '{id}' endpoint references missing shape '{}'; clearing binding",
                    binding.target
                );
                if let Some(connector) = self.connectors.get_mut(id.as_str()) {
                    connector.set_attachment(end, None);
                    return Ok(connector.transform.transform_point(connector.point(end)));
                }
                Err(SceneError::UnknownConnector(id.to_string()))
            }
        }
    }

    /// The side one endpoint is currently attached to, if bound
    pub fn attachment_side(&self, id: &ConnectorId, end: End) -> Option<Side> {
        self.connectors
            .get(id.as_str())
            .and_then(|c| c.attachment(end))
            .and_then(|b| b.side)
    }

    /// Bind one endpoint to a target shape's side, replacing any prior
    /// binding. The connector id is removed from the previous target's
    /// back-reference list before it is appended to the new target's, and
    /// the resolved anchor point is frozen into the endpoint's local
    /// coordinate so the stored point stays consistent with the binding.
    pub fn set_binding(
        &mut self,
        id: &ConnectorId,
        end: End,
        target: &ShapeId,
        side: Option<Side>,
    ) -> Result<(), SceneError> {
        let anchor = {
            let record = self
                .shapes
                .get(target.as_str())
                .ok_or_else(|| SceneError::UnknownShape(target.to_string()))?;
            match side {
                Some(side) => record.geometry.midpoint(side),
                None => record.geometry.center(),
            }
        };
        if !self.connectors.contains_key(id.as_str()) {
            return Err(SceneError::UnknownConnector(id.to_string()));
        }

        // clear-old before set-new: no transient double registration
        self.release_back_reference(id, end);

        if let Some(connector) = self.connectors.get_mut(id.as_str()) {
            connector.set_point(end, to_local(connector, anchor));
            connector.set_attachment(end, Some(AttachmentBinding::new(target.clone(), side)));
        }
        if let Some(record) = self.shapes.get_mut(target.as_str()) {
            if !record.connectors.contains(id) {
                record.connectors.push(id.clone());
            }
        }
        Ok(())
    }

    /// Release one endpoint's binding, removing the connector id from the
    /// target's back-reference list and freezing the endpoint's current
    /// resolved point as its new local point so the line does not jump.
    pub fn clear_binding(&mut self, id: &ConnectorId, end: End) -> Result<(), SceneError> {
        let resolved = self.resolve_endpoint(id, end)?;
        self.release_back_reference(id, end);
        if let Some(connector) = self.connectors.get_mut(id.as_str()) {
            connector.set_point(end, to_local(connector, resolved));
            connector.set_attachment(end, None);
        }
        Ok(())
    }

    /// Recompute a connector's cached bounding box from its resolved
    /// endpoints. Called on drag commit; the cache is a hint for culling,
    /// never the source of truth for the rendered path.
    pub fn refresh_connector_bounds(&mut self, id: &ConnectorId) -> Result<(), SceneError> {
        let start = self.resolve_endpoint(id, End::Start)?;
        let end = self.resolve_endpoint(id, End::End)?;
        if let Some(connector) = self.connectors.get_mut(id.as_str()) {
            connector.bounds = BoundingBox::from_points(&[start, end]);
        }
        Ok(())
    }

    /// Drop the connector id from its current target's back-reference
    /// list, if the endpoint is bound
    fn release_back_reference(&mut self, id: &ConnectorId, end: End) {
        let old_target = self
            .connectors
            .get(id.as_str())
            .and_then(|c| c.attachment(end))
            .map(|b| b.target.clone());
        if let Some(target) = old_target {
            if let Some(record) = self.shapes.get_mut(target.as_str()) {
                record.connectors.retain(|c| c != id);
            }
        }
    }
}

/// Map a canvas-space point back into a connector's local space
fn to_local(connector: &crate::connector::Connector, point: Point) -> Point {
    match connector.transform.invert() {
        Some(inverse) => inverse.transform_point(point),
        // singular transform: degenerate geometry, keep the canvas point
        None => point,
    }
}
