use egui::{Context, Key, PointerButton, Pos2, Response};

mod session;
mod shortcuts;

pub use session::{DragSession, InteractionSession, SessionEnv};
pub use shortcuts::{Shortcut, shortcut_for};

/// Input events in surface-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed on the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while the primary button is held
    PointerMove { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
    /// Vertical scroll over the canvas, in egui points
    Wheel { delta: f32 },
    /// Key was pressed
    KeyDown { key: Key },
}

/// What the primary button did during one frame, in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
    /// Where the current press began
    pub press_origin: Option<Pos2>,
    pub latest_pos: Option<Pos2>,
    /// Whether the pointer is over the canvas and nothing covers it
    pub over_canvas: bool,
}

impl PointerFrame {
    pub fn read(ctx: &Context, response: &Response) -> Self {
        ctx.input(|input| Self {
            pressed: input.pointer.button_pressed(PointerButton::Primary),
            released: input.pointer.button_released(PointerButton::Primary),
            held: input.pointer.button_down(PointerButton::Primary),
            press_origin: input.pointer.press_origin(),
            latest_pos: input.pointer.latest_pos(),
            over_canvas: response.hovered(),
        })
    }
}

/// Handles converting raw egui input on the canvas into our InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Set between a press that began on the canvas and its release
    pressed: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the canvas response of this frame and generate InputEvents.
    ///
    /// Positions are made relative to `origin`, the top-left of the canvas.
    pub fn process_input(&mut self, ctx: &Context, response: &Response, origin: Pos2) -> Vec<InputEvent> {
        let mut events = self.pointer_events(PointerFrame::read(ctx, response), origin);

        if response.hovered() {
            let delta = ctx.input(|i| i.raw_scroll_delta.y);
            if delta != 0.0 {
                events.push(InputEvent::Wheel { delta });
            }
        }

        // Handle key events
        if !ctx.wants_keyboard_input() {
            ctx.input(|input| {
                for event in &input.raw.events {
                    if let egui::Event::Key {
                        key, pressed: true, repeat: false, ..
                    } = event
                    {
                        events.push(InputEvent::KeyDown { key: *key });
                    }
                }
            });
        }

        events
    }

    /// Turn one frame of primary-button state into down/move/up events.
    ///
    /// A press only counts when it lands on the canvas; once it does, moves
    /// and the release are reported wherever the pointer goes. A click that
    /// presses and releases within one frame yields a down and an up.
    pub fn pointer_events(&mut self, frame: PointerFrame, origin: Pos2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| Pos2::new(pos.x - origin.x, pos.y - origin.y);

        if frame.pressed && frame.over_canvas && !self.pressed {
            if let Some(pos) = frame.press_origin.or(frame.latest_pos) {
                let position = local(pos);
                events.push(InputEvent::PointerDown { position });
                self.pressed = true;
                self.last_pointer_pos = Some(position);
            }
        }

        if !self.pressed {
            return events;
        }

        if let Some(pos) = frame.latest_pos {
            let position = local(pos);
            // Only report actual movement
            if (frame.held || frame.released) && Some(position) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove { position });
                self.last_pointer_pos = Some(position);
            }
        }

        if frame.released || !frame.held {
            if let Some(position) = self.last_pointer_pos {
                events.push(InputEvent::PointerUp { position });
            }
            self.pressed = false;
            self.last_pointer_pos = None;
        }

        events
    }
}
