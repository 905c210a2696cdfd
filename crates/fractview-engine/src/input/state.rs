use glam::Vec2;

use super::types::{InputEvent, Modifiers};

/// Modifier and pointer state carried between window events.
///
/// Wheel and button events carry no position of their own on every platform,
/// so the runtime stamps them with `pointer_pos`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    /// Last known pointer position in physical pixels; `None` until the first motion.
    ///
    /// Kept across `PointerLeft` so a release outside the window still reaches the
    /// controller.
    pub pointer_pos: Option<Vec2>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = m,
            InputEvent::PointerMoved { pos } => self.pointer_pos = Some(pos),

            InputEvent::Key { modifiers, .. } | InputEvent::Wheel { modifiers, .. } => {
                self.modifiers = modifiers
            }

            InputEvent::PointerButton { pos, modifiers, .. } => {
                self.pointer_pos = Some(pos);
                self.modifiers = modifiers;
            }

            InputEvent::PointerLeft | InputEvent::Focused(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonState, Key, MouseButton};

    fn left(state: ButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
            pos: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn tracks_pointer() {
        let mut s = InputState::default();
        assert_eq!(s.pointer_pos, None);

        s.apply_event(&left(ButtonState::Pressed, 10.0, 20.0));
        assert_eq!(s.pointer_pos, Some(Vec2::new(10.0, 20.0)));

        s.apply_event(&InputEvent::PointerMoved { pos: Vec2::new(11.0, 25.0) });
        assert_eq!(s.pointer_pos, Some(Vec2::new(11.0, 25.0)));
    }

    #[test]
    fn key_events_refresh_modifiers() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Key {
            key: Key::Shift,
            state: ButtonState::Pressed,
            modifiers: Modifiers { shift: true, ..Default::default() },
            repeat: false,
        });
        assert!(s.modifiers.shift);

        s.apply_event(&InputEvent::ModifiersChanged(Modifiers::default()));
        assert!(!s.modifiers.shift);
    }

    #[test]
    fn pointer_left_keeps_last_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { pos: Vec2::ONE });
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, Some(Vec2::ONE));
    }
}
