//! Keyboard bindings for the viewer.
//!
//! | key            | action                       |
//! |----------------|------------------------------|
//! | ArrowUp / Down | iterations +1 / -1           |
//! | R, G, B        | color channel +5             |
//! | Shift+R, G, B  | color channel -5             |
//! | Space          | toggle continuous redraw     |
//! | Home           | reset pan/zoom               |
//! | Escape         | exit                         |

use fractview_engine::core::ColorChannel;
use fractview_engine::input::{Key, Modifiers};

pub const ITERATION_STEP: i32 = 1;
pub const COLOR_STEP: i32 = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    NudgeIterations(i32),
    NudgeChannel(ColorChannel, i32),
    ToggleContinuous,
    ResetView,
    Exit,
}

/// Command bound to a key press, if any.
pub fn command_for(key: Key, modifiers: Modifiers) -> Option<Command> {
    let color_step = if modifiers.shift { -COLOR_STEP } else { COLOR_STEP };

    let cmd = match key {
        Key::ArrowUp => Command::NudgeIterations(ITERATION_STEP),
        Key::ArrowDown => Command::NudgeIterations(-ITERATION_STEP),
        Key::R => Command::NudgeChannel(ColorChannel::Red, color_step),
        Key::G => Command::NudgeChannel(ColorChannel::Green, color_step),
        Key::B => Command::NudgeChannel(ColorChannel::Blue, color_step),
        Key::Space => Command::ToggleContinuous,
        Key::Home => Command::ResetView,
        Key::Escape => Command::Exit,
        _ => return None,
    };
    Some(cmd)
}
