//! SDL2 event translation
//!
//! Turns raw SDL2 events into [`InputState`] updates. The game never sees an
//! SDL keycode: everything is mapped onto [`Key`] here.
//!
//! | Key            | Action           |
//! |----------------|------------------|
//! | W A S D / arrows | Move           |
//! | J              | Skill            |
//! | Enter / R      | Toggle recording |
//! | Esc            | Quit             |

use hulu_brawl::input::{InputState, Key, MouseButton};
use sdl2::EventPump;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Scancode};

/// What the window itself asked for, outside of game input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    None,
    /// The window was closed
    Close,
}

/// Maps an SDL key onto a game key
///
/// Unmapped keys become `Key::Other` so "press any key" prompts still see them.
pub fn translate_key(keycode: Keycode, scancode: Option<Scancode>) -> Key {
    match keycode {
        Keycode::W | Keycode::Up => Key::MoveUp,
        Keycode::S | Keycode::Down => Key::MoveDown,
        Keycode::A | Keycode::Left => Key::MoveLeft,
        Keycode::D | Keycode::Right => Key::MoveRight,
        Keycode::J => Key::Skill,
        Keycode::Return | Keycode::R => Key::ToggleRecording,
        Keycode::Escape => Key::Quit,
        _ => Key::Other(scancode.map(|s| s as i32).unwrap_or(-1)),
    }
}

fn translate_button(button: sdl2::mouse::MouseButton) -> Option<MouseButton> {
    match button {
        sdl2::mouse::MouseButton::Left => Some(MouseButton::Left),
        sdl2::mouse::MouseButton::Right => Some(MouseButton::Right),
        sdl2::mouse::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Drains pending events into `input`
///
/// Call once per frame after `input.begin_frame()`.
pub fn poll_events(event_pump: &mut EventPump, input: &mut InputState) -> HostCommand {
    let mut command = HostCommand::None;

    for event in event_pump.poll_iter() {
        match event {
            Event::Quit { .. } => command = HostCommand::Close,
            Event::KeyDown {
                keycode: Some(keycode),
                scancode,
                ..
            } => input.key_down(translate_key(keycode, scancode)),
            Event::KeyUp {
                keycode: Some(keycode),
                scancode,
                ..
            } => input.key_up(translate_key(keycode, scancode)),
            Event::MouseMotion { x, y, .. } => input.mouse_moved(x as f32, y as f32),
            Event::MouseButtonDown { mouse_btn, x, y, .. } => {
                if let Some(button) = translate_button(mouse_btn) {
                    input.mouse_down(button, x as f32, y as f32);
                }
            }
            Event::Window {
                win_event: WindowEvent::FocusLost,
                ..
            } => input.release_all(),
            _ => {}
        }
    }

    command
}
