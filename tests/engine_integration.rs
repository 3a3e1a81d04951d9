//! End-to-end engine behavior: tracking, cleanup, round-trips, drags

use approx::assert_relative_eq;

use tether::{
    begin_drag, drag_to, end_drag, route_connector, AttachmentBinding, Connector, ConnectorId,
    End, Point, Provisional, Scene, ShapeGeometry, ShapeId, ShapeRecord, Side,
};

fn shape(id: &str, x: f64, y: f64) -> ShapeRecord {
    ShapeRecord::new(
        ShapeId::new(id),
        ShapeGeometry {
            left: x,
            top: y,
            width: 120.0,
            height: 80.0,
            scale_x: 1.0,
            scale_y: 1.0,
        },
    )
}

fn bound_scene() -> (Scene, ConnectorId) {
    let mut scene = Scene::new();
    scene.add_shape(shape("a", 0.0, 0.0)).unwrap();
    scene.add_shape(shape("b", 400.0, 300.0)).unwrap();
    let id = ConnectorId::new("c1");
    scene.add_connector(Connector::new(id.clone())).unwrap();
    scene
        .set_binding(&id, End::Start, &ShapeId::new("a"), Some(Side::Right))
        .unwrap();
    scene
        .set_binding(&id, End::End, &ShapeId::new("b"), Some(Side::Left))
        .unwrap();
    (scene, id)
}

#[test]
fn resolution_is_idempotent() {
    let (mut scene, id) = bound_scene();
    for end in [End::Start, End::End] {
        let first = scene.resolve_endpoint(&id, end).unwrap();
        let second = scene.resolve_endpoint(&id, end).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn moving_a_bound_shape_shifts_the_endpoint_for_all_sides() {
    for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
        let mut scene = Scene::new();
        scene.add_shape(shape("a", 100.0, 100.0)).unwrap();
        let id = ConnectorId::new("c1");
        scene.add_connector(Connector::new(id.clone())).unwrap();
        scene
            .set_binding(&id, End::Start, &ShapeId::new("a"), Some(side))
            .unwrap();

        let before = scene.resolve_endpoint(&id, End::Start).unwrap();
        {
            let record = scene.shape_mut(&ShapeId::new("a")).unwrap();
            record.geometry.left += 35.0;
            record.geometry.top -= 12.0;
        }
        let after = scene.resolve_endpoint(&id, End::Start).unwrap();

        assert_relative_eq!(after.x - before.x, 35.0, epsilon = 1e-12);
        assert_relative_eq!(after.y - before.y, -12.0, epsilon = 1e-12);
    }
}

#[test]
fn resizing_a_bound_shape_tracks_the_side_midpoint() {
    let (mut scene, id) = bound_scene();
    scene
        .shape_mut(&ShapeId::new("b"))
        .unwrap()
        .geometry
        .scale_x = 1.5;
    let p = scene.resolve_endpoint(&id, End::End).unwrap();
    // left midpoint of b: 400 - (120 * 1.5) / 2
    assert_relative_eq!(p.x, 310.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 300.0, epsilon = 1e-12);
}

#[test]
fn scene_round_trip_reproduces_the_resolved_path() {
    let (mut scene, id) = bound_scene();
    {
        let conn = scene.connector_mut(&id).unwrap();
        conn.routing = tether::RoutingStyle::Angled;
        conn.tips = tether::TipStyle::Both;
        conn.stroke = tether::StrokeStyle::Dotted;
    }
    let original = route_connector(&mut scene, &id, 1.0).unwrap();

    let text = scene.to_toml_string().unwrap();
    let mut rebuilt = Scene::from_toml_str(&text).unwrap();
    let restored = route_connector(&mut rebuilt, &id, 1.0).unwrap();

    assert_eq!(original, restored);
}

#[test]
fn removing_a_shape_clears_every_referencing_connector() {
    let mut scene = Scene::new();
    scene.add_shape(shape("hub", 200.0, 200.0)).unwrap();
    scene.add_shape(shape("other", 600.0, 200.0)).unwrap();

    for id in ["c1", "c2"] {
        let cid = ConnectorId::new(id);
        scene.add_connector(Connector::new(cid.clone())).unwrap();
        scene
            .set_binding(&cid, End::End, &ShapeId::new("hub"), Some(Side::Top))
            .unwrap();
        scene
            .set_binding(&cid, End::Start, &ShapeId::new("other"), Some(Side::Left))
            .unwrap();
    }

    scene.remove_shape(&ShapeId::new("hub")).unwrap();

    for id in ["c1", "c2"] {
        let cid = ConnectorId::new(id);
        let conn = scene.connector(&cid).unwrap();
        assert_eq!(conn.end_attachment, None, "{id} still bound");
        // the other endpoint's binding is untouched
        assert_eq!(
            conn.start_attachment,
            Some(AttachmentBinding::new(
                ShapeId::new("other"),
                Some(Side::Left)
            ))
        );
        // frozen where the hub's top midpoint was
        assert_eq!(
            scene.resolve_endpoint(&cid, End::End).unwrap(),
            Point::new(200.0, 160.0)
        );
    }
}

#[test]
fn full_drag_rebind_cycle() {
    let (mut scene, id) = bound_scene();

    // grab the end handle and drag it over shape "a"'s bottom band —
    // but "a" owns the start endpoint, so the hover must be skipped
    let mut session = begin_drag(&scene, &id, End::End).unwrap();
    drag_to(&mut scene, &mut session, Point::new(0.0, 35.0));
    assert_eq!(*session.provisional(), Provisional::Untouched);

    // drag to empty canvas instead: provisional unbind
    drag_to(&mut scene, &mut session, Point::new(700.0, 500.0));
    assert!(matches!(session.provisional(), Provisional::Free { .. }));

    // and back onto "b"'s top band: provisional rebind
    drag_to(&mut scene, &mut session, Point::new(400.0, 265.0));
    assert!(matches!(session.provisional(), Provisional::Bound { .. }));
    assert_eq!(
        scene.shape(&ShapeId::new("b")).unwrap().hover_anchor,
        Some(Side::Top)
    );

    let commit = end_drag(&mut scene, session).unwrap();
    assert_eq!(
        commit.attachment,
        Some(AttachmentBinding::new(ShapeId::new("b"), Some(Side::Top)))
    );
    assert_eq!(scene.shape(&ShapeId::new("b")).unwrap().hover_anchor, None);
    assert_eq!(
        scene.resolve_endpoint(&id, End::End).unwrap(),
        Point::new(400.0, 260.0)
    );
}

#[test]
fn locked_connector_ignores_interaction() {
    let (mut scene, id) = bound_scene();
    scene.connector_mut(&id).unwrap().locked = true;
    assert!(begin_drag(&scene, &id, End::Start).is_none());
    assert!(begin_drag(&scene, &id, End::End).is_none());
}

#[test]
fn drag_commit_updates_back_references_exactly_once() {
    let (mut scene, id) = bound_scene();

    let mut session = begin_drag(&scene, &id, End::End).unwrap();
    // hover "b" repeatedly before releasing
    for _ in 0..3 {
        drag_to(&mut scene, &mut session, Point::new(400.0, 265.0));
    }
    end_drag(&mut scene, session).unwrap();

    let refs = scene.shape(&ShapeId::new("b")).unwrap().bound_connectors();
    assert_eq!(refs.iter().filter(|c| **c == id).count(), 1);
}

#[test]
fn rendered_scene_has_one_path_group_per_connector() {
    let mut scene = Scene::from_toml_str(
        r#"
[[shapes]]
id = "a"
left = 0.0
top = 0.0
width = 100.0
height = 60.0

[[connectors]]
id = "c1"
tips = "none"
start = { x = -200.0, y = 0.0 }
end_attachment = { target = "a", side = "left" }

[[connectors]]
id = "c2"
tips = "none"
routing = "curved"
start = { x = 0.0, y = -200.0 }
end_attachment = { target = "a", side = "top" }
"#,
    )
    .unwrap();
    let svg = tether::render_scene(&mut scene, &tether::RenderConfig::default()).unwrap();
    assert_eq!(svg.matches("<path").count(), 2);
}

#[test]
fn arrowhead_strokes_are_symmetric_about_the_line() {
    use tether::{draw_connector, Canvas, PathSpec, StrokeStyle, TipStyle};

    struct Tips {
        tip_strokes: Vec<(Point, Point)>,
        pen: Option<Point>,
    }
    impl Canvas for Tips {
        fn move_to(&mut self, p: Point) {
            self.pen = Some(p);
        }
        fn line_to(&mut self, p: Point) {
            if let Some(pen) = self.pen {
                self.tip_strokes.push((pen, p));
            }
            self.pen = None;
        }
        fn bezier_curve_to(&mut self, _: Point, _: Point, _: Point) {}
        fn set_line_dash(&mut self, _: &[f64]) {}
        fn set_stroke_color(&mut self, _: &str) {}
        fn set_line_width(&mut self, _: f64) {}
        fn stroke(&mut self) {}
    }

    let mut canvas = Tips {
        tip_strokes: Vec::new(),
        pen: None,
    };
    let path = PathSpec::Straight {
        p1: Point::new(0.0, 0.0),
        p2: Point::new(10.0, 0.0),
    };
    draw_connector(
        &mut canvas,
        &path,
        None,
        None,
        TipStyle::End,
        StrokeStyle::Solid,
        "#333333",
        4.0,
        1.0,
    );

    let tip = Point::new(10.0, 0.0);
    let strokes: Vec<Point> = canvas
        .tip_strokes
        .iter()
        .filter(|(from, _)| *from == tip)
        .map(|(_, to)| *to)
        .collect();
    assert_eq!(strokes.len(), 2);

    // mirror images across the line (the x axis)
    assert_relative_eq!(strokes[0].x, strokes[1].x, epsilon = 1e-9);
    assert_relative_eq!(strokes[0].y, -strokes[1].y, epsilon = 1e-9);

    // each stroke is 22.5 degrees off the line direction
    for s in strokes {
        let angle = ((s.y - tip.y).abs()).atan2((s.x - tip.x).abs()).to_degrees();
        assert_relative_eq!(angle, 22.5, epsilon = 1e-6);
    }
}
