use glam::Vec2;

use crate::coords::{ViewState, Viewport};

use super::types::{InputEvent, MouseButton};

/// Turns pointer gestures into [`ViewState`] changes.
///
/// - primary-button drag pans
/// - wheel zooms around the cursor
///
/// Every handler returns `true` when the view changed and a redraw is due.
#[derive(Debug, Default)]
pub struct PanZoomController {
    pressed: bool,
    last_pos: Vec2,
}

impl PanZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pressed = true;
        self.last_pos = pos;
    }

    /// Pans by the model-space distance between the previous and current pointer
    /// positions. No-op unless a drag is in progress.
    pub fn move_to(&mut self, pos: Vec2, viewport: Viewport, view: &mut ViewState) -> bool {
        if !self.pressed {
            return false;
        }

        let from = viewport.to_model_coords(self.last_pos);
        let to = viewport.to_model_coords(pos);
        self.last_pos = pos;

        view.pan(from, to);
        true
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Zooms by `angle_delta` (120 per notch) around the screen position `pos`.
    pub fn wheel(
        &mut self,
        angle_delta: f32,
        pos: Vec2,
        viewport: Viewport,
        view: &mut ViewState,
    ) -> bool {
        view.zoom_at(angle_delta, viewport.to_model_coords(pos));
        true
    }

    /// Dispatches a raw input event. Events the controller does not use return `false`.
    ///
    /// Pointer motion and wheel input are dropped while the window has no area.
    pub fn handle(&mut self, event: &InputEvent, viewport: Viewport, view: &mut ViewState) -> bool {
        let has_area = viewport.is_valid();
        match *event {
            InputEvent::PointerButton {
                button: MouseButton::Left,
                state,
                pos,
                ..
            } => {
                if state.is_pressed() {
                    self.press(pos);
                } else {
                    self.release();
                }
                false
            }

            InputEvent::PointerMoved { pos } if has_area => self.move_to(pos, viewport, view),

            InputEvent::Wheel { delta, pos, .. } if has_area => {
                self.wheel(delta.angle_delta_y(), pos, viewport, view)
            }

            // Losing focus mid-drag would otherwise leave the drag latched.
            InputEvent::Focused(false) => {
                self.release();
                false
            }

            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonState, Modifiers, WheelDelta};

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn left(state: ButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
            pos: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved { pos: Vec2::new(x, y) }
    }

    fn wheel(delta: WheelDelta, x: f32, y: f32) -> InputEvent {
        InputEvent::Wheel {
            delta,
            pos: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn move_without_press_does_nothing() {
        let mut c = PanZoomController::new();
        let mut view = ViewState::default();
        assert!(!c.handle(&moved(100.0, 100.0), VP, &mut view));
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn drag_pans_and_release_stops() {
        let mut c = PanZoomController::new();
        let mut view = ViewState { zoom_log: 0.0, center: Vec2::ZERO };

        c.handle(&left(ButtonState::Pressed, 400.0, 300.0), VP, &mut view);
        assert!(c.is_dragging());

        // 150px right is 0.5 model units at 600px short side.
        assert!(c.handle(&moved(550.0, 300.0), VP, &mut view));
        assert!((view.center - Vec2::new(-0.5, 0.0)).length() < 1e-6);

        c.handle(&left(ButtonState::Released, 550.0, 300.0), VP, &mut view);
        assert!(!c.is_dragging());

        let before = view;
        assert!(!c.handle(&moved(10.0, 10.0), VP, &mut view));
        assert_eq!(view, before);
    }

    #[test]
    fn drag_there_and_back_restores_center() {
        let mut c = PanZoomController::new();
        let mut view = ViewState { zoom_log: 0.8, center: Vec2::new(0.1, -0.3) };
        let start = view.center;

        c.press(Vec2::new(120.0, 80.0));
        c.move_to(Vec2::new(300.0, 410.0), VP, &mut view);
        c.move_to(Vec2::new(120.0, 80.0), VP, &mut view);
        c.release();

        assert!((view.center - start).length() < 1e-5);
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let mut c = PanZoomController::new();
        let mut view = ViewState::default();
        let right = InputEvent::PointerButton {
            button: MouseButton::Right,
            state: ButtonState::Pressed,
            pos: Vec2::ZERO,
            modifiers: Modifiers::default(),
        };
        c.handle(&right, VP, &mut view);
        assert!(!c.is_dragging());
    }

    #[test]
    fn wheel_at_center_zooms_in_place() {
        let mut c = PanZoomController::new();
        let mut view = ViewState::default();
        let event = wheel(WheelDelta::Pixels(Vec2::new(0.0, 500.0)), 400.0, 300.0);
        assert!(c.handle(&event, VP, &mut view));
        assert_eq!(view.zoom_log, -0.5);
        assert_eq!(view.center, Vec2::ZERO);
    }

    #[test]
    fn wheel_keeps_cursor_point_fixed() {
        let mut c = PanZoomController::new();
        let mut view = ViewState { zoom_log: 1.0, center: Vec2::new(-0.5, 0.25) };
        let cursor = Vec2::new(650.0, 120.0);
        let before = view.plane_point(VP.to_model_coords(cursor));

        c.wheel(3.0 * 120.0, cursor, VP, &mut view);

        let after = view.plane_point(VP.to_model_coords(cursor));
        assert!((before - after).length() < 1e-5);
    }

    #[test]
    fn minimized_window_ignores_wheel() {
        let mut c = PanZoomController::new();
        let mut view = ViewState::default();
        let event = wheel(WheelDelta::Lines(Vec2::Y), 0.0, 0.0);
        assert!(!c.handle(&event, Viewport::new(0.0, 0.0), &mut view));
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut c = PanZoomController::new();
        let mut view = ViewState::default();
        c.press(Vec2::new(5.0, 5.0));
        c.handle(&InputEvent::Focused(false), VP, &mut view);
        assert!(!c.is_dragging());
    }
}
