use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{ButtonState, InputEvent, InputState, Key, Modifiers, MouseButton, WheelDelta};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Positions stay in physical pixels, the unit the resize hook reports. Button
/// and wheel events are stamped with the last tracked pointer position, and are
/// dropped until the first cursor motion gives one.
pub(crate) fn translate_window_event(state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    let pointer = state.pointer_pos;
    let modifiers = state.modifiers;

    let ev = match event {
        // winit 0.30 wraps the state; `.state()` yields `ModifiersState`.
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(map_modifiers(m.state())),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::CursorMoved { position, .. } => InputEvent::PointerMoved {
            pos: Vec2::new(position.x as f32, position.y as f32),
        },

        WindowEvent::MouseInput { state: st, button, .. } => InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*st),
            pos: pointer?,
            modifiers,
        },

        WindowEvent::MouseWheel { delta, .. } => InputEvent::Wheel {
            delta: match *delta {
                MouseScrollDelta::LineDelta(x, y) => WheelDelta::Lines(Vec2::new(x, y)),
                MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixels(Vec2::new(p.x as f32, p.y as f32)),
            },
            pos: pointer?,
            modifiers,
        },

        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            modifiers,
            repeat: event.repeat,
        },

        _ => return None,
    };
    Some(ev)
}

fn map_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn map_key(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        // NativeKeyCode has no stable numeric form in winit 0.30.
        return Key::Other(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Home => Key::Home,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyB => Key::B,
        other => Key::Other(other as u32),
    }
}
