pub mod animation;
pub mod invalidation;
pub mod layout;
pub mod renderer;
pub mod widgets;

use std::time::{Duration, Instant};

use calloop::channel::{self, Channel, Sender};
use calloop::timer::{TimeoutAction, Timer};
use calloop::EventLoop;

pub use invalidation::{ChangeFlags, WidgetId};

use layout::Constraints;
use renderer::{DrawCommand, PaintContext};
use widgets::{Color, Event, EventResponse, Rect, Widget};

pub mod prelude {
    pub use crate::animation::{Direction, TimingFunction};
    pub use crate::layout::{Constraints, CrossAxisAlignment, Size};
    pub use crate::renderer::{DrawCommand, PaintContext};
    pub use crate::widgets::{
        collapsible_box, column, label, ArrowDirection, CollapsibleBox, CollapsibleConfig, Color,
        Column, ContentArea, Event, EventResponse, Label, MouseButton, Padding, Rect, TextAlign,
        Widget, TITLE_SUFFIX,
    };
    pub use crate::{column, Host, HostConfig, HostHandle};
}

pub struct HostConfig {
    pub width: u32,
    pub height: u32,
    /// Interval between animation frames while the host is running
    pub frame_interval_ms: u64,
    pub background_color: Color,
}

impl HostConfig {
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 640,
            frame_interval_ms: 16,
            background_color: Color::rgb(0.1, 0.1, 0.15),
        }
    }
}

/// Messages accepted by a running [`Host`]
#[derive(Debug, Clone)]
pub enum HostMessage {
    Event(Event),
    Exit,
}

/// Sends input and control messages into a running [`Host`] from anywhere,
/// including other threads.
#[derive(Clone)]
pub struct HostHandle {
    sender: Sender<HostMessage>,
}

impl HostHandle {
    /// Queue an input event. Returns false if the host has shut down.
    pub fn send_event(&self, event: Event) -> bool {
        self.sender.send(HostMessage::Event(event)).is_ok()
    }

    /// Ask the host's event loop to stop.
    pub fn exit(&self) -> bool {
        self.sender.send(HostMessage::Exit).is_ok()
    }
}

/// Owns a root widget and drives it: events in, animation clock, layout and
/// paint out.
///
/// [`frame`](Self::frame) performs one step and can be called directly, which
/// is how tests drive time. [`run`](Self::run) calls it from a calloop timer.
pub struct Host<W: Widget> {
    config: HostConfig,
    root: W,
    sender: Sender<HostMessage>,
    channel: Option<Channel<HostMessage>>,
    pending_events: Vec<Event>,
    last_frame: Vec<DrawCommand>,
    frame_count: u64,
    laid_out_size: Option<(u32, u32)>,
}

impl<W: Widget> Host<W> {
    pub fn new(root: W) -> Self {
        Self::with_config(root, HostConfig::default())
    }

    pub fn with_config(root: W, config: HostConfig) -> Self {
        let (sender, channel) = channel::channel();
        Self {
            config,
            root,
            sender,
            channel: Some(channel),
            pending_events: Vec::new(),
            last_frame: Vec::new(),
            frame_count: 0,
            laid_out_size: None,
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn handle(&self) -> HostHandle {
        HostHandle {
            sender: self.sender.clone(),
        }
    }

    pub fn root(&self) -> &W {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Change the window size; the next frame lays out again.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::info!("Resizing host to {}x{}", width, height);
        self.config.width = width;
        self.config.height = height;
    }

    /// Draw commands produced by the most recent painted frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Queue an event for the start of the next frame.
    pub fn queue_event(&mut self, event: Event) {
        self.pending_events.push(event);
    }

    /// Deliver one input event to the root widget right away.
    pub fn dispatch(&mut self, event: Event) -> EventResponse {
        log::trace!("dispatching {:?}", event);
        self.root.event(&event)
    }

    /// Dispatch queued events, advance animations by `elapsed`, then lay out
    /// and paint whatever is dirty. Returns true while any animation is still
    /// running.
    pub fn frame(&mut self, elapsed: Duration) -> bool {
        for event in std::mem::take(&mut self.pending_events) {
            self.dispatch(event);
        }

        let animating = self.root.advance_animations(elapsed);

        let size = (self.config.width, self.config.height);
        let resized = self.laid_out_size != Some(size);
        if self.root.needs_layout() || resized {
            let constraints =
                Constraints::new(0.0, 0.0, self.config.width as f32, self.config.height as f32);
            self.root.layout(constraints);
            self.root.set_origin(0.0, 0.0);
            self.laid_out_size = Some(size);
        }

        if self.root.needs_paint() || resized {
            let mut ctx = PaintContext::with_capacity(self.last_frame.len());
            let window = Rect::new(
                0.0,
                0.0,
                self.config.width as f32,
                self.config.height as f32,
            );
            ctx.draw_rect(window, self.config.background_color);
            self.root.paint(&mut ctx);
            self.last_frame = ctx.into_commands();
        }

        self.root.clear_dirty();
        self.frame_count += 1;
        animating
    }

    /// Run the event loop until [`HostHandle::exit`] is called.
    ///
    /// Frames are driven by a repeating timer; events sent through a
    /// [`HostHandle`] are queued and dispatched at the start of the next frame.
    pub fn run(mut self) -> calloop::Result<()> {
        let _ = env_logger::try_init();

        let mut event_loop: EventLoop<Self> = EventLoop::try_new()?;
        let handle = event_loop.handle();
        let signal = event_loop.get_signal();

        let interval = self.config.frame_interval();
        let mut last_tick = Instant::now();
        handle
            .insert_source(Timer::from_duration(interval), move |deadline, _, host| {
                let elapsed = deadline.saturating_duration_since(last_tick);
                last_tick = deadline;
                host.frame(elapsed);
                TimeoutAction::ToDuration(interval)
            })
            .map_err(|err| err.error)?;

        if let Some(channel) = self.channel.take() {
            handle
                .insert_source(channel, move |event, _, host| match event {
                    channel::Event::Msg(HostMessage::Event(event)) => host.queue_event(event),
                    channel::Event::Msg(HostMessage::Exit) | channel::Event::Closed => {
                        log::info!("Host exiting after {} frames", host.frame_count);
                        signal.stop();
                    }
                })
                .map_err(|err| err.error)?;
        }

        log::info!(
            "Starting host {}x{}, frame interval {:?}",
            self.config.width,
            self.config.height,
            interval
        );
        event_loop.run(None::<Duration>, &mut self, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{label, MouseButton};

    #[test]
    fn test_first_frame_paints_background() {
        let mut host = Host::with_config(label("hello"), HostConfig::default().width(200));
        assert!(!host.frame(Duration::ZERO));
        assert_eq!(host.frame_count(), 1);
        assert!(matches!(
            host.last_frame().first(),
            Some(DrawCommand::Rect { rect, .. }) if rect.width == 200.0
        ));
        assert_eq!(host.root().bounds().width, label("hello").size_hint().width);
    }

    #[test]
    fn test_clean_frame_keeps_previous_commands() {
        let mut host = Host::new(label("hello"));
        host.frame(Duration::ZERO);
        let before = host.last_frame().to_vec();
        host.frame(Duration::from_millis(16));
        assert_eq!(host.last_frame(), before.as_slice());
    }

    #[test]
    fn test_queued_events_dispatch_on_next_frame() {
        let mut host = Host::new(crate::widgets::collapsible_box("Header"));
        host.frame(Duration::ZERO);
        host.queue_event(Event::MouseDown {
            x: 5.0,
            y: 5.0,
            button: MouseButton::Left,
        });
        assert!(!host.root().is_animating());
        host.frame(Duration::ZERO);
        assert_eq!(
            host.root().arrow_direction(),
            crate::widgets::ArrowDirection::Down
        );
    }

    #[test]
    fn test_handle_reports_closed_host() {
        let host = Host::new(label("hello"));
        let handle = host.handle();
        assert!(handle.send_event(Event::MouseLeave));
        drop(host);
        assert!(!handle.send_event(Event::MouseDown {
            x: 0.0,
            y: 0.0,
            button: MouseButton::Left,
        }));
        assert!(!handle.exit());
    }
}
