//! Pointer and wheel handling for the map canvas.

use crate::math::Point2d;
use crate::session::SessionState;
use crate::viewport::{zoom_factor, Viewport};
use log::{debug, warn};

/// A mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// A pointer event, with positions in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press { button: PointerButton, pos: Point2d },
    Move { pos: Point2d },
    Release { button: PointerButton },
    /// A wheel notch; negative `delta_y` scrolls up, which zooms in.
    Wheel { pos: Point2d, delta_y: f64 },
}

/// What the owner of the controller should do after an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reaction {
    Nothing,
    /// The view changed and nothing else will repaint it.
    Redraw,
    /// Ask the server to place a roadwork at this world position.
    PlaceRoadwork(Point2d),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        /// The pointer position at the previous event.
        last: Point2d,
    },
}

/// Turns pointer input into pan, zoom and roadwork requests.
#[derive(Clone, Debug)]
pub struct InteractionController {
    drag: DragState,
    zoom_step: f64,
}

impl InteractionController {
    /// Creates a controller zooming by `exp(±zoom_step)` per wheel notch.
    pub fn new(zoom_step: f64) -> Self {
        Self {
            drag: DragState::Idle,
            zoom_step,
        }
    }

    /// Returns true while the primary button is held down.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Handles one pointer event.
    ///
    /// While the simulation runs, the live feed repaints the canvas on every
    /// update, so view changes do not ask for a redraw of their own.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        view: &mut Viewport,
        session: &SessionState,
    ) -> Reaction {
        let redraw = if session.running {
            Reaction::Nothing
        } else {
            Reaction::Redraw
        };

        match event {
            PointerEvent::Press {
                button: PointerButton::Primary,
                pos,
            } => {
                self.drag = DragState::Dragging { last: pos };
                Reaction::Nothing
            }
            PointerEvent::Press {
                button: PointerButton::Secondary,
                pos,
            } => {
                if session.running {
                    Reaction::PlaceRoadwork(view.screen_to_world(pos))
                } else {
                    debug!("Ignoring roadwork request: simulation is not running");
                    Reaction::Nothing
                }
            }
            PointerEvent::Press { .. } => Reaction::Nothing,
            PointerEvent::Move { pos } => match self.drag {
                DragState::Dragging { last } => {
                    view.apply_pan(pos - last);
                    self.drag = DragState::Dragging { last: pos };
                    redraw
                }
                DragState::Idle => Reaction::Nothing,
            },
            PointerEvent::Release {
                button: PointerButton::Primary,
            } => {
                self.drag = DragState::Idle;
                Reaction::Nothing
            }
            PointerEvent::Release { .. } => Reaction::Nothing,
            PointerEvent::Wheel { delta_y, .. } if delta_y == 0.0 => Reaction::Nothing,
            PointerEvent::Wheel { pos, delta_y } => {
                let factor = zoom_factor(self.zoom_step, delta_y < 0.0);
                match view.apply_zoom(pos, factor) {
                    Ok(()) => redraw,
                    Err(err) => {
                        warn!("Zoom rejected: {}", err);
                        Reaction::Nothing
                    }
                }
            }
        }
    }
}
