//! Pointer interaction on connector endpoint handles
//!
//! One drag session per grabbed handle: `begin_drag` enters the machine
//! (never for a locked connector), `drag_to` retargets the provisional
//! state on every pointer move, and `end_drag` always commits — there is
//! no cancel gesture. All mid-drag bookkeeping lives on the session value
//! object; nothing ambient is mutated until the commit.

use log::warn;

use crate::connector::{
    resolve_snap, AttachmentBinding, ConnectorId, End, ShapeId, Snap, FREE_NUDGE,
};
use crate::error::SceneError;
use crate::geometry::Point;
use crate::scene::Scene;

/// Provisional outcome of the drag so far
#[derive(Debug, Clone, PartialEq)]
pub enum Provisional {
    /// No pointer move yet; committing leaves the endpoint as it was
    Untouched,
    /// Hovering a shape: will bind to it on release
    Bound { target: ShapeId, snap: Snap },
    /// Over empty canvas: will unbind and rest at this free point
    Free { point: Point },
}

/// State of one in-flight endpoint drag
#[derive(Debug, Clone)]
pub struct DragSession {
    connector: ConnectorId,
    end: End,
    provisional: Provisional,
    hover: Option<ShapeId>,
}

impl DragSession {
    pub fn connector(&self) -> &ConnectorId {
        &self.connector
    }

    pub fn end(&self) -> End {
        self.end
    }

    pub fn provisional(&self) -> &Provisional {
        &self.provisional
    }

    /// The shape currently showing the hover anchor indicator
    pub fn hover(&self) -> Option<&ShapeId> {
        self.hover.as_ref()
    }
}

/// What a finished drag committed; handed to the host's commit callback
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit {
    pub connector: ConnectorId,
    pub end: End,
    /// The endpoint's attachment after the commit
    pub attachment: Option<AttachmentBinding>,
}

/// Grab an endpoint handle. Returns `None` when the connector is locked
/// (the state machine is never entered) or unknown.
pub fn begin_drag(scene: &Scene, connector: &ConnectorId, end: End) -> Option<DragSession> {
    let conn = scene.connector(connector)?;
    if conn.locked {
        return None;
    }
    Some(DragSession {
        connector: connector.clone(),
        end,
        provisional: Provisional::Untouched,
        hover: None,
    })
}

/// Track a pointer move: hit-test for a hover target and update the
/// provisional state. Only shapes can be hit — connectors are not in the
/// shape registry. A shape already bound to the connector's *other*
/// endpoint is skipped, which guards against a degenerate zero-length
/// binding to both ends of the same shape.
pub fn drag_to(scene: &mut Scene, session: &mut DragSession, pointer: Point) {
    let hover = scene.find_shape_at(pointer);

    let Some(hover_id) = hover else {
        clear_hover_indicator(scene, session);
        let nudge = match session.end {
            End::Start => FREE_NUDGE,
            End::End => -FREE_NUDGE,
        };
        let point = Point::new(pointer.x + nudge, pointer.y + nudge);
        session.provisional = Provisional::Free { point };
        preview_endpoint(scene, session, point);
        return;
    };

    let other_target = scene
        .connector(&session.connector)
        .and_then(|c| c.attachment(session.end.other()))
        .map(|b| b.target.clone());
    if other_target.as_ref() == Some(&hover_id) {
        return;
    }

    let Some(geometry) = scene.geometry(&hover_id) else {
        return;
    };
    let snap = resolve_snap(pointer, &geometry);

    if session.hover.as_ref() != Some(&hover_id) {
        clear_hover_indicator(scene, session);
    }
    if let Some(record) = scene.shape_mut(&hover_id) {
        record.hover_anchor = snap.side;
    }
    session.hover = Some(hover_id.clone());
    session.provisional = Provisional::Bound {
        target: hover_id,
        snap,
    };
    preview_endpoint(scene, session, snap.point);
}

/// Release the pointer: commit the provisional state, clear the hover
/// indicator, refresh the connector's cached bounds, and report what was
/// committed. Releasing always commits; there is no cancellation.
pub fn end_drag(scene: &mut Scene, session: DragSession) -> Result<DragCommit, SceneError> {
    clear_hover_indicator(scene, &session);

    match &session.provisional {
        Provisional::Untouched => {}
        Provisional::Bound { target, snap } => {
            scene.set_binding(&session.connector, session.end, target, snap.side)?;
        }
        Provisional::Free { point } => {
            scene.clear_binding(&session.connector, session.end)?;
            preview_endpoint(scene, &session, *point);
        }
    }

    flag_degenerate_binding(scene, &session.connector);
    scene.refresh_connector_bounds(&session.connector)?;

    let attachment = scene
        .connector(&session.connector)
        .and_then(|c| c.attachment(session.end))
        .cloned();
    Ok(DragCommit {
        connector: session.connector,
        end: session.end,
        attachment,
    })
}

/// Move the dragged endpoint's stored point so the connector renders live
/// under the pointer
fn preview_endpoint(scene: &mut Scene, session: &DragSession, canvas_point: Point) {
    if let Some(conn) = scene.connector_mut(&session.connector) {
        let local = match conn.transform.invert() {
            Some(inverse) => inverse.transform_point(canvas_point),
            None => canvas_point,
        };
        conn.set_point(session.end, local);
    }
}

fn clear_hover_indicator(scene: &mut Scene, session: &DragSession) {
    if let Some(hover) = &session.hover {
        if let Some(record) = scene.shape_mut(hover) {
            record.hover_anchor = None;
        }
    }
}

/// Both endpoints bound to the same target on the same side collapse the
/// path to a point; the commit is allowed but flagged for integrators.
fn flag_degenerate_binding(scene: &Scene, connector: &ConnectorId) {
    let Some(conn) = scene.connector(connector) else {
        return;
    };
    if let (Some(start), Some(end)) = (conn.attachment(End::Start), conn.attachment(End::End)) {
        if start.target == end.target && start.side == end.side {
            warn!(
                "connector '{connector}' has both endpoints bound to '{}' on the same side; \
                 the rendered path is zero-length",
                start.target
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{Connector, Side};
    use crate::scene::{ShapeGeometry, ShapeRecord};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        for (id, x, y) in [("a", 0.0, 0.0), ("b", 300.0, 0.0)] {
            scene
                .add_shape(ShapeRecord::new(
                    ShapeId::new(id),
                    ShapeGeometry {
                        left: x,
                        top: y,
                        width: 100.0,
                        height: 100.0,
                        scale_x: 1.0,
                        scale_y: 1.0,
                    },
                ))
                .unwrap();
        }
        scene
            .add_connector(Connector::new(ConnectorId::new("c1")))
            .unwrap();
        scene
    }

    #[test]
    fn test_locked_connector_never_enters_drag() {
        let mut s = scene();
        s.connector_mut(&ConnectorId::new("c1")).unwrap().locked = true;
        assert!(begin_drag(&s, &ConnectorId::new("c1"), End::Start).is_none());
    }

    #[test]
    fn test_unknown_connector_never_enters_drag() {
        let s = scene();
        assert!(begin_drag(&s, &ConnectorId::new("ghost"), End::Start).is_none());
    }

    #[test]
    fn test_drag_over_shape_binds_on_release() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        let mut session = begin_drag(&s, &id, End::End).unwrap();

        // near the left midpoint of shape "b" (at x = 250)
        drag_to(&mut s, &mut session, Point::new(255.0, 0.0));
        assert!(matches!(session.provisional(), Provisional::Bound { .. }));
        // hover indicator set on the target
        assert_eq!(
            s.shape(&ShapeId::new("b")).unwrap().hover_anchor,
            Some(Side::Left)
        );

        let commit = end_drag(&mut s, session).unwrap();
        assert_eq!(
            commit.attachment,
            Some(AttachmentBinding::new(
                ShapeId::new("b"),
                Some(Side::Left)
            ))
        );
        // indicator cleared on commit
        assert_eq!(s.shape(&ShapeId::new("b")).unwrap().hover_anchor, None);
        // back reference registered
        assert_eq!(
            s.shape(&ShapeId::new("b")).unwrap().bound_connectors(),
            &[id.clone()]
        );
    }

    #[test]
    fn test_drag_to_empty_canvas_unbinds() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        s.set_binding(&id, End::End, &ShapeId::new("b"), Some(Side::Left))
            .unwrap();

        let mut session = begin_drag(&s, &id, End::End).unwrap();
        drag_to(&mut s, &mut session, Point::new(600.0, 400.0));
        assert_eq!(
            *session.provisional(),
            Provisional::Free {
                point: Point::new(595.0, 395.0)
            }
        );

        let commit = end_drag(&mut s, session).unwrap();
        assert_eq!(commit.attachment, None);
        assert!(s
            .shape(&ShapeId::new("b"))
            .unwrap()
            .bound_connectors()
            .is_empty());
        // the endpoint rests at the nudged free point
        assert_eq!(
            s.resolve_endpoint(&id, End::End).unwrap(),
            Point::new(595.0, 395.0)
        );
    }

    #[test]
    fn test_free_nudge_sign_per_endpoint() {
        let mut s = scene();
        let id = ConnectorId::new("c1");

        let mut session = begin_drag(&s, &id, End::Start).unwrap();
        drag_to(&mut s, &mut session, Point::new(600.0, 400.0));
        assert_eq!(
            *session.provisional(),
            Provisional::Free {
                point: Point::new(605.0, 405.0)
            }
        );
    }

    #[test]
    fn test_hover_skips_other_endpoints_target() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        s.set_binding(&id, End::Start, &ShapeId::new("b"), Some(Side::Left))
            .unwrap();

        let mut session = begin_drag(&s, &id, End::End).unwrap();
        // pointer over "b", which the start endpoint already owns
        drag_to(&mut s, &mut session, Point::new(300.0, 0.0));
        assert_eq!(*session.provisional(), Provisional::Untouched);
        assert_eq!(s.shape(&ShapeId::new("b")).unwrap().hover_anchor, None);
    }

    #[test]
    fn test_rebind_during_one_drag_moves_indicator() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        let mut session = begin_drag(&s, &id, End::End).unwrap();

        drag_to(&mut s, &mut session, Point::new(45.0, 0.0));
        assert_eq!(
            s.shape(&ShapeId::new("a")).unwrap().hover_anchor,
            Some(Side::Right)
        );

        drag_to(&mut s, &mut session, Point::new(255.0, 0.0));
        assert_eq!(s.shape(&ShapeId::new("a")).unwrap().hover_anchor, None);
        assert_eq!(
            s.shape(&ShapeId::new("b")).unwrap().hover_anchor,
            Some(Side::Left)
        );
    }

    #[test]
    fn test_release_without_move_commits_unchanged() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        s.set_binding(&id, End::Start, &ShapeId::new("a"), Some(Side::Right))
            .unwrap();

        let session = begin_drag(&s, &id, End::Start).unwrap();
        let commit = end_drag(&mut s, session).unwrap();
        assert_eq!(
            commit.attachment,
            Some(AttachmentBinding::new(
                ShapeId::new("a"),
                Some(Side::Right)
            ))
        );
    }

    #[test]
    fn test_interior_hover_binds_without_side() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        let mut session = begin_drag(&s, &id, End::End).unwrap();

        // dead center of "a": inside the shape but outside every band
        drag_to(&mut s, &mut session, Point::new(0.0, 0.0));
        match session.provisional() {
            Provisional::Bound { target, snap } => {
                assert_eq!(target, &ShapeId::new("a"));
                assert_eq!(snap.side, None);
            }
            other => panic!("expected bound provisional, got {other:?}"),
        }

        let commit = end_drag(&mut s, session).unwrap();
        assert_eq!(
            commit.attachment,
            Some(AttachmentBinding::new(ShapeId::new("a"), None))
        );
    }

    #[test]
    fn test_commit_refreshes_cached_bounds() {
        let mut s = scene();
        let id = ConnectorId::new("c1");
        let mut session = begin_drag(&s, &id, End::End).unwrap();
        drag_to(&mut s, &mut session, Point::new(255.0, 0.0));
        end_drag(&mut s, session).unwrap();

        let bounds = s.connector(&id).unwrap().bounds();
        assert_eq!(bounds.right(), 250.0);
    }
}
