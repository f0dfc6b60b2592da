//! Ten collapsible sections, each holding eight coloured labels.
//!
//! The host is headless, so a scripted "user" thread clicks a few headers
//! through a [`HostHandle`] and then closes the loop. Run with
//! `RUST_LOG=collapsible=debug` to watch the sections open and close.

use std::thread;
use std::time::Duration;

use collapsible::prelude::*;

const SECTIONS: usize = 10;
const LABELS_PER_SECTION: usize = 8;

/// Spread label colours around the hue wheel so neighbours differ.
fn swatch(section: usize, index: usize) -> Color {
    let hue = ((section * LABELS_PER_SECTION + index) as f32 * 0.618_034).fract() * 6.0;
    let x = 1.0 - (hue % 2.0 - 1.0).abs();
    let (r, g, b) = match hue as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Color::rgb(0.25 + 0.6 * r, 0.25 + 0.6 * g, 0.25 + 0.6 * b)
}

fn section(index: usize) -> CollapsibleBox {
    let mut section = CollapsibleBox::new(&format!("Collapsible Box Header-{index}"), 250);
    let content = (0..LABELS_PER_SECTION).fold(column(), |col, j| {
        col.child(
            label(j.to_string())
                .align(TextAlign::Center)
                .color(Color::BLACK)
                .background(swatch(index, j))
                .padding(6.0),
        )
    });
    section.set_content_layout(content);
    section
}

fn click(handle: &HostHandle, x: f32, y: f32) {
    handle.send_event(Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
    });
    handle.send_event(Event::MouseUp {
        x,
        y,
        button: MouseButton::Left,
    });
}

fn main() {
    env_logger::init();

    let header_height = section(0).toggle_button().size_hint().height;
    let sections = (0..SECTIONS).fold(column(), |col, i| col.child(section(i)));
    let mut scroll = ContentArea::new();
    scroll.set_content(Box::new(sections));

    let host = Host::with_config(
        scroll,
        HostConfig::default()
            .width(400)
            .height(600)
            .background_color(Color::rgb(0.08, 0.08, 0.12)),
    );
    let handle = host.handle();

    thread::spawn(move || {
        // Open the first header, then the third one below it once the first settles
        thread::sleep(Duration::from_millis(300));
        click(&handle, 20.0, header_height / 2.0);
        thread::sleep(Duration::from_millis(500));
        log::info!("first section open, toggling it closed again");
        click(&handle, 20.0, header_height / 2.0);
        thread::sleep(Duration::from_millis(500));
        click(&handle, 20.0, header_height * 2.5);
        thread::sleep(Duration::from_millis(500));
        handle.exit();
    });

    if let Err(err) = host.run() {
        log::error!("event loop failed: {err}");
    }
}
