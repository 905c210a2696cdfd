use glam::Vec2;

/// Angle units reported for one wheel notch.
pub const WHEEL_NOTCH: f32 = 120.0;

/// Keys the viewer binds. Anything else arrives as `Other` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Home,
    ArrowUp,
    ArrowDown,
    Shift,
    R,
    G,
    B,
    Other(u32),
}

/// Pressed/released, for keys and pointer buttons alike.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side and extra buttons.
    Other,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Scroll amount as reported by the platform.
///
/// Wheels report whole lines (notches); touchpads report pixels, which are
/// already close to angle units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Lines(Vec2),
    Pixels(Vec2),
}

impl WheelDelta {
    /// Vertical scroll in angle units. Positive scrolls away from the user.
    pub fn angle_delta_y(self) -> f32 {
        match self {
            WheelDelta::Lines(d) => d.y * WHEEL_NOTCH,
            WheelDelta::Pixels(d) => d.y,
        }
    }
}

/// Platform-agnostic input events. Positions are physical pixels, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: ButtonState,
        modifiers: Modifiers,
        /// Auto-repeat while held.
        repeat: bool,
    },

    PointerMoved {
        pos: Vec2,
    },

    PointerButton {
        button: MouseButton,
        state: ButtonState,
        pos: Vec2,
        modifiers: Modifiers,
    },

    /// Scroll at the pointer position.
    Wheel {
        delta: WheelDelta,
        pos: Vec2,
        modifiers: Modifiers,
    },

    PointerLeft,

    Focused(bool),
}
