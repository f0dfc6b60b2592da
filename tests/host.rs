use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use collapsible::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

fn section(title: &str) -> CollapsibleBox {
    let config = CollapsibleConfig::default()
        .animation_duration(100)
        .header_font_size(20.0)
        .header_padding(Padding::symmetric(12.0, 8.0));
    let mut section = CollapsibleBox::with_config(title, config);
    let content = (0..8).fold(column(), |col, i| {
        col.child(label(i.to_string()).font_size(10.0).padding(4.0))
    });
    section.set_content_layout(content);
    section
}

fn stack() -> Host<Column> {
    init_logger();
    let root = column()
        .child(section("first"))
        .child(section("second"))
        .child(section("third"));
    let mut host = Host::with_config(root, HostConfig::default().width(320).height(800));
    host.frame(Duration::ZERO);
    host
}

fn click(host: &mut Host<Column>, x: f32, y: f32) {
    host.dispatch(Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    });
    host.dispatch(Event::MouseUp {
        x,
        y,
        button: MouseButton::Left,
    });
}

fn tops(host: &Host<Column>) -> Vec<f32> {
    host.root()
        .children()
        .iter()
        .map(|child| child.bounds().y)
        .collect()
}

#[test]
fn collapsed_sections_stack_headers() {
    let host = stack();
    let tops = tops(&host);
    assert_close(tops[0], 0.0);
    assert_close(tops[1], 40.0);
    assert_close(tops[2], 80.0);
    assert_close(host.root().bounds().height, 120.0);
}

#[test]
fn expanding_one_section_pushes_the_next_down() {
    let mut host = stack();
    click(&mut host, 10.0, 50.0);

    let mut frames = 0;
    while host.frame(Duration::from_millis(16)) {
        frames += 1;
        assert!(frames < 100, "animation never finished");
    }
    assert!(frames > 0);

    let tops = tops(&host);
    assert_close(tops[1], 40.0);
    assert_close(tops[2], 240.0);
    assert_close(host.root().bounds().height, 280.0);
}

#[test]
fn click_only_reaches_the_header_under_the_pointer() {
    let mut host = stack();
    click(&mut host, 10.0, 90.0);
    while host.frame(Duration::from_millis(16)) {}

    let heights: Vec<f32> = host
        .root()
        .children()
        .iter()
        .map(|child| child.bounds().height)
        .collect();
    assert_close(heights[0], 40.0);
    assert_close(heights[1], 40.0);
    assert_close(heights[2], 200.0);
}

#[test]
fn resize_relays_out_and_repaints() {
    let mut host = stack();
    host.resize(200, 800);
    host.frame(Duration::ZERO);
    assert_eq!(host.root().bounds().width, 200.0);
    assert!(matches!(
        host.last_frame().first(),
        Some(DrawCommand::Rect { rect, .. }) if rect.width == 200.0
    ));
}

#[test]
fn run_stops_when_asked() {
    init_logger();
    let (handles, handle_rx) = mpsc::channel();
    let runner = thread::spawn(move || {
        let host = Host::with_config(
            collapsible_box("Header"),
            HostConfig::default().frame_interval_ms(5),
        );
        handles.send(host.handle()).ok();
        host.run().is_ok()
    });

    let handle = handle_rx.recv().expect("host handle");
    assert!(handle.send_event(Event::MouseMove { x: 5.0, y: 5.0 }));
    thread::sleep(Duration::from_millis(30));
    assert!(handle.exit());
    assert!(runner.join().expect("host thread"));
}
