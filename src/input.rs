use crate::math::Vector2;
use std::collections::HashSet;

/// Game-level keys the simulation understands
///
/// The host maps its own keycodes onto these. Anything else arrives as
/// `Other` so "press any key" prompts still see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Cast the player skill (J)
    Skill,
    /// Start/stop recording (Enter / R)
    ToggleRecording,
    /// Leave the session (Esc)
    Quit,
    Other(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Immutable view of input for one tick
///
/// Built by [`InputState::snapshot`]; every phase of a tick reads the same
/// snapshot, so nothing changes under the rule engine mid-frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    mouse_position: Vector2,
    mouse_just_pressed: HashSet<MouseButton>,
}

impl InputSnapshot {
    /// Snapshot with nothing pressed
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// True only on the frame the key went down
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn any_key_just_pressed(&self) -> bool {
        !self.just_pressed.is_empty() || !self.mouse_just_pressed.is_empty()
    }

    pub fn mouse_position(&self) -> Vector2 {
        self.mouse_position
    }

    pub fn is_mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_just_pressed.contains(&button)
    }

    /// WASD direction, not normalised (each axis is -1, 0, or 1)
    pub fn movement_axis(&self) -> Vector2 {
        let axis = |negative: Key, positive: Key| -> f32 {
            let mut value = 0.0;
            if self.is_key_down(negative) {
                value -= 1.0;
            }
            if self.is_key_down(positive) {
                value += 1.0;
            }
            value
        };
        Vector2::new(
            axis(Key::MoveLeft, Key::MoveRight),
            axis(Key::MoveUp, Key::MoveDown),
        )
    }
}

/// Accumulates host input events and produces per-frame snapshots
///
/// # Example
///
/// ```rust
/// use hulu_brawl::input::{InputState, Key};
///
/// let mut input = InputState::new();
/// input.key_down(Key::Skill);
///
/// let frame = input.snapshot();
/// assert!(frame.is_key_just_pressed(Key::Skill));
///
/// input.begin_frame();
/// let next = input.snapshot();
/// assert!(next.is_key_down(Key::Skill));
/// assert!(!next.is_key_just_pressed(Key::Skill));
/// ```
#[derive(Debug, Default)]
pub struct InputState {
    current: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the "just pressed" edges; call once per frame before polling events
    pub fn begin_frame(&mut self) {
        self.current.just_pressed.clear();
        self.current.mouse_just_pressed.clear();
    }

    pub fn key_down(&mut self, key: Key) {
        // Key repeat: only the first down event is an edge
        if self.current.held.insert(key) {
            self.current.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.current.held.remove(&key);
    }

    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        self.current.mouse_position = Vector2::new(x, y);
    }

    pub fn mouse_down(&mut self, button: MouseButton, x: f32, y: f32) {
        self.mouse_moved(x, y);
        self.current.mouse_just_pressed.insert(button);
    }

    /// Drops all held keys (focus loss)
    pub fn release_all(&mut self) {
        self.current.held.clear();
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.current.clone()
    }
}
