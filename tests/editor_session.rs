//! A full editing session driven by pointer events, drawn onto recording
//! surfaces.
//!
//! Run with: RUST_LOG=statesketch=debug cargo test --features tracing --test editor_session -- --nocapture

use statesketch::{
    Diagram, EdgeId, EdgeShape, Editor, EditorConfig, Font, Hit, NodeId, Point,
    PointerEvent, RecordingSurface, Response, Size, Tool,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Two states side by side, plus the layers the editor paints on
fn setup() -> (Editor, NodeId, NodeId, RecordingSurface, RecordingSurface) {
    init_tracing();
    let mut diagram = Diagram::new();
    let a = diagram.add_node(Point::new(150.0, 200.0), 30.0).unwrap();
    let b = diagram.add_node(Point::new(350.0, 200.0), 30.0).unwrap();
    let editor = Editor::with_diagram(diagram, EditorConfig::default());
    (editor, a, b, RecordingSurface::new(), RecordingSurface::new())
}

fn connect(
    editor: &mut Editor,
    from: (f64, f64),
    to: (f64, f64),
    layers: (&mut RecordingSurface, &mut RecordingSurface),
) -> Response {
    let (stat, dynamic) = layers;
    editor.set_tool(Tool::Connect);
    editor
        .handle(PointerEvent::down(from.0, from.1), stat, dynamic)
        .unwrap();
    editor
        .handle(PointerEvent::moved(to.0, to.1), stat, dynamic)
        .unwrap();
    let response = editor
        .handle(PointerEvent::up(to.0, to.1), stat, dynamic)
        .unwrap();
    editor.set_tool(Tool::Move);
    response
}

#[test]
fn connect_then_label_draws_full_diagram() {
    let (mut editor, _, _, mut stat, mut dynamic) = setup();

    let response = connect(&mut editor, (150.0, 200.0), (350.0, 205.0), (&mut stat, &mut dynamic));
    assert_eq!(response, Response::EdgeCreated(EdgeId(0)));
    assert!(dynamic.commands().is_empty());

    editor.set_label_text(EdgeId(0), "a").unwrap();
    let mut layer = RecordingSurface::new();
    editor.redraw(&mut layer);

    insta::assert_snapshot!(layer.log(), @r###"
    circle (350.0, 200.0) r=30.0 black fill #ebe9e9
    circle (150.0, 200.0) r=30.0 black fill #ebe9e9
    curve (180.0, 200.0) (250.0, 200.0) (320.0, 200.0) black
    line (320.0, 200.0) (313.0, 193.0) black
    line (320.0, 200.0) (313.0, 207.0) black
    text "a" (246.6, 182.5) 14px sans-serif black
    "###);
}

#[test]
fn connect_preview_follows_pointer() {
    let (mut editor, a, b, mut stat, mut dynamic) = setup();
    editor.set_tool(Tool::Connect);

    let down = editor
        .handle(PointerEvent::down(150.0, 200.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(down, Response::Selected(Hit::Node(a)));
    // The source node is held back from the static layer
    assert_eq!(stat.commands().len(), 1);
    assert!(stat.commands()[0].starts_with("circle (350.0, 200.0)"));

    // Open canvas: the preview ends at the pointer
    let moved = editor
        .handle(PointerEvent::moved(260.0, 320.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(moved, Response::Updated);
    let curve = dynamic
        .commands()
        .iter()
        .find(|c| c.starts_with("curve"))
        .cloned()
        .unwrap();
    assert!(curve.ends_with("(260.0, 320.0) red"), "{curve}");

    // Over another node: that node is highlighted too
    editor
        .handle(PointerEvent::moved(340.0, 190.0), &mut stat, &mut dynamic)
        .unwrap();
    assert!(dynamic.log().contains("circle (350.0, 200.0) r=30.0 red"));

    // Released on empty canvas: nothing is created
    let up = editor
        .handle(PointerEvent::up(500.0, 500.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(up, Response::Released);
    assert_eq!(editor.diagram().edge_count(), 0);
    assert!(editor.dragging().is_none());
    assert_eq!(editor.diagram().node(b).unwrap().in_edges().len(), 0);
}

#[test]
fn click_without_drag_in_connect_mode_adds_nothing() {
    let (mut editor, _, _, mut stat, mut dynamic) = setup();
    editor.set_tool(Tool::Connect);
    editor
        .handle(PointerEvent::down(150.0, 200.0), &mut stat, &mut dynamic)
        .unwrap();
    let up = editor
        .handle(PointerEvent::up(150.0, 200.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(up, Response::Released);
    assert_eq!(editor.diagram().edge_count(), 0);
}

#[test]
fn connect_back_onto_source_makes_a_loop_toward_pointer() {
    let (mut editor, a, _, mut stat, mut dynamic) = setup();
    let response = connect(&mut editor, (150.0, 200.0), (160.0, 190.0), (&mut stat, &mut dynamic));
    let Response::EdgeCreated(id) = response else {
        panic!("expected an edge, got {response:?}");
    };

    let edge = editor.diagram().edge(id).unwrap();
    assert!(edge.is_self_loop());
    assert_eq!(edge.source(), a);
    // Three radii out along the line toward the pointer
    let reach = 90.0 / 2.0_f64.sqrt();
    let expected = Point::new(150.0 + reach, 200.0 - reach);
    assert!(edge.path().control.distance_to(expected) < 1e-9);
    assert!(matches!(edge.shape(), EdgeShape::SelfLoop(_)));
}

#[test]
fn vertex_and_label_drags() {
    let (mut editor, a, b, mut stat, mut dynamic) = setup();
    let e = editor.diagram_mut().make_outgoing_edge(a, b).unwrap();
    editor.set_label_text(e, "go").unwrap();

    // Grab the vertex handle and pull it up
    let down = editor
        .handle(PointerEvent::down(250.0, 200.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(down, Response::Selected(Hit::EdgeVertex(e)));
    assert!(dynamic.log().contains("circle (250.0, 200.0) r=5.0 red"));
    // The edge and its label are held back from the static layer
    assert!(!stat.log().contains("curve"));
    assert!(!stat.log().contains("text"));

    let moved = editor
        .handle(PointerEvent::moved(250.0, 150.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(moved, Response::Updated);
    let released = editor
        .handle(PointerEvent::up(250.0, 150.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(released, Response::Released);
    assert!(dynamic.commands().is_empty());

    let vertex = editor.diagram().edge(e).unwrap().vertex();
    assert!(vertex.distance_to(Point::new(250.0, 150.0)) < 1e-6);

    // The label now sits on top of the raised vertex; grab its middle
    let bounds = editor.diagram().edge(e).unwrap().label().bounds();
    let grab = bounds.min.midpoint(bounds.max);
    let down = editor
        .handle(PointerEvent::down(grab.x, grab.y), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(down, Response::Selected(Hit::Label(e)));

    let moved = editor
        .handle(PointerEvent::moved(300.0, 120.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(moved, Response::Updated);
    assert!(dynamic.log().starts_with("text \"go\""));
    editor
        .handle(PointerEvent::up(300.0, 120.0), &mut stat, &mut dynamic)
        .unwrap();

    assert!(editor.diagram().edge(e).unwrap().label().anchor_t() > 0.5);
}

#[test]
fn dragging_a_node_reshapes_its_edges() {
    let (mut editor, a, b, mut stat, mut dynamic) = setup();
    let e = editor.diagram_mut().make_outgoing_edge(a, b).unwrap();

    let down = editor
        .handle(PointerEvent::down(350.0, 200.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(down, Response::Selected(Hit::Node(b)));
    for y in [220.0, 260.0, 300.0] {
        let r = editor
            .handle(PointerEvent::moved(350.0, y), &mut stat, &mut dynamic)
            .unwrap();
        assert_eq!(r, Response::Updated);
    }
    editor
        .handle(PointerEvent::up(350.0, 300.0), &mut stat, &mut dynamic)
        .unwrap();

    let diagram = editor.diagram();
    assert_eq!(diagram.node(b).unwrap().center(), Point::new(350.0, 300.0));
    let end = diagram.edge(e).unwrap().path().end;
    assert!((end.distance_to(Point::new(350.0, 300.0)) - 30.0).abs() < 1e-6);
}

#[test]
fn edge_body_drag_selects_without_moving() {
    let (mut editor, a, b, mut stat, mut dynamic) = setup();
    let e = editor.diagram_mut().make_outgoing_edge(a, b).unwrap();
    let before = *editor.diagram().edge(e).unwrap().path();

    let down = editor
        .handle(PointerEvent::down(200.0, 203.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(down, Response::Selected(Hit::EdgeBody(e)));
    let moved = editor
        .handle(PointerEvent::moved(200.0, 100.0), &mut stat, &mut dynamic)
        .unwrap();
    assert_eq!(moved, Response::Ignored);
    assert_eq!(editor.diagram().edge(e).unwrap().path(), &before);
}

#[test]
fn idle_events_are_ignored() {
    let (mut editor, _, _, mut stat, mut dynamic) = setup();
    for event in [
        PointerEvent::moved(10.0, 10.0),
        PointerEvent::up(10.0, 10.0),
        PointerEvent::down(10.0, 10.0),
    ] {
        let r = editor.handle(event, &mut stat, &mut dynamic).unwrap();
        assert_eq!(r, Response::Ignored);
    }
    // A miss repaints everything and empties the dynamic layer
    assert_eq!(stat.commands().len(), 2);
    assert_eq!(dynamic.clears(), 1);
}

#[test]
fn custom_metrics_size_labels() {
    let (editor, a, b, _, _) = setup();
    let mut editor = Editor::with_diagram(editor.diagram().clone(), EditorConfig::default())
        .with_metrics(|text: &str, _: &Font| Size::new(8.0 * text.len() as f64, 16.0));
    let e = editor.diagram_mut().make_outgoing_edge(a, b).unwrap();
    editor.set_label_text(e, "abc").unwrap();

    let label = editor.diagram().edge(e).unwrap().label();
    assert_eq!(label.size(), Size::new(24.0, 16.0));
    assert!((label.origin().x - 238.0).abs() < 1e-9);
    assert!((label.origin().y - 184.0).abs() < 1e-9);
}

#[test]
fn spawned_nodes_fill_a_ring() {
    init_tracing();
    let mut editor = Editor::new(EditorConfig::default().with_spawn_anchor(Point::new(300.0, 300.0)));
    let ids: Vec<NodeId> = (0..4).map(|_| editor.spawn_node().unwrap()).collect();
    let centers: Vec<Point> = ids
        .iter()
        .map(|&id| editor.diagram().node(id).unwrap().center())
        .collect();

    let expected = [(300.0, 210.0), (390.0, 300.0), (300.0, 390.0), (210.0, 300.0)];
    for (c, (x, y)) in centers.iter().zip(expected) {
        assert!(c.distance_to(Point::new(x, y)) < 1e-9, "{c}");
    }
}
