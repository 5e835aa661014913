//! Drives a short editing session and prints the result as SVG.
//!
//! Run with: RUST_LOG=statesketch=debug cargo run --features tracing --example drag_session

use statesketch::{Editor, EditorConfig, PointerEvent, RecordingSurface, Response, Tool};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> statesketch::DiagramResult<()> {
    let mut editor = Editor::new(EditorConfig::default());
    let idle = editor.spawn_node()?;
    let busy = editor.spawn_node()?;
    let done = editor.spawn_node()?;

    let mut static_layer = RecordingSurface::new();
    let mut dynamic_layer = RecordingSurface::new();

    let centre = |editor: &Editor, id| editor.diagram().node(id).map(|n| n.center());
    let mut drag = |editor: &mut Editor, path: &[(f64, f64)]| -> statesketch::DiagramResult<Response> {
        let Some((&(x0, y0), rest)) = path.split_first() else {
            return Ok(Response::Ignored);
        };
        editor.handle(PointerEvent::down(x0, y0), &mut static_layer, &mut dynamic_layer)?;
        let mut last = (x0, y0);
        for &(x, y) in rest {
            editor.handle(PointerEvent::moved(x, y), &mut static_layer, &mut dynamic_layer)?;
            last = (x, y);
        }
        editor.handle(PointerEvent::up(last.0, last.1), &mut static_layer, &mut dynamic_layer)
    };

    // Wire up idle -> busy -> done, with a loop on busy
    editor.set_tool(Tool::Connect);
    let mut created = Vec::new();
    for (from, to) in [(idle, busy), (busy, done)] {
        let a = centre(&editor, from)?;
        let b = centre(&editor, to)?;
        let mid = a.midpoint(b);
        if let Response::EdgeCreated(id) = drag(&mut editor, &[(a.x, a.y), (mid.x, mid.y), (b.x, b.y)])? {
            created.push(id);
        }
    }
    let b = centre(&editor, busy)?;
    if let Response::EdgeCreated(id) = drag(&mut editor, &[(b.x, b.y), (b.x + 12.0, b.y + 5.0)])? {
        created.push(id);
    }
    editor.set_tool(Tool::Move);

    for (id, text) in created.iter().zip(["start", "finish", "retry"]) {
        editor.set_label_text(*id, text)?;
    }

    // Bend the first edge, then move the last node out of the way
    if let Some(&first) = created.first() {
        let vertex = editor.diagram().edge(first)?.vertex();
        drag(&mut editor, &[(vertex.x, vertex.y), (vertex.x - 30.0, vertex.y - 30.0)])?;
    }
    let d = centre(&editor, done)?;
    drag(&mut editor, &[(d.x, d.y), (d.x + 40.0, d.y + 20.0), (d.x + 80.0, d.y + 40.0)])?;

    println!(
        "{}",
        statesketch::render_svg(editor.diagram(), &editor.config().style)
    );
    Ok(())
}
