//! Platform-agnostic input
//!
//! Key and mouse types plus the input state container. Platform adapters
//! (e.g. the winit adapter) translate native events into these types.
//!
//! Keys feed the frog's key map one press at a time; pointer state is
//! accumulated per frame for the orbit camera.

use glam::Vec2;
use rustc_hash::FxHashSet;

/// Keyboard key enumeration (platform-agnostic)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Control keys
    Space,
    Enter,
    Escape,

    // Modifier keys
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    #[must_use]
    pub fn is_shift(self) -> bool {
        matches!(self, Key::ShiftLeft | Key::ShiftRight)
    }
}

/// Mouse button enumeration
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// One key-down event, as seen by the key map.
///
/// Auto-repeat events are key-downs too; each one counts as a press.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub repeat: bool,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            repeat: false,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Held keys for modifier tracking, plus per-frame pointer state.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed_keys: FxHashSet<Key>,

    pressed_mouse: FxHashSet<MouseButton>,
    mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
    scroll_delta: Vec2,

    screen_size: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a keyboard event. Returns the resulting press for key-down
    /// events, including auto-repeats.
    pub fn inject_key(&mut self, key: Key, state: ButtonState, repeat: bool) -> Option<KeyPress> {
        match state {
            ButtonState::Pressed => {
                self.pressed_keys.insert(key);
                Some(KeyPress {
                    key,
                    shift: self.shift_held(),
                    repeat,
                })
            }
            ButtonState::Released => {
                self.pressed_keys.remove(&key);
                None
            }
        }
    }

    /// Clears per-frame deltas. Call after the frame has read them.
    pub fn start_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Forgets held keys and buttons, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
        self.pressed_mouse.clear();
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => self.pressed_mouse.insert(button),
            ButtonState::Released => self.pressed_mouse.remove(&button),
        };
    }

    /// Moves the cursor. The first position after startup produces no delta.
    pub fn inject_mouse_position(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        if let Some(old) = self.mouse_position {
            self.mouse_delta += new_pos - old;
        }
        self.mouse_position = Some(new_pos);
    }

    pub fn inject_scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll_delta += Vec2::new(delta_x, delta_y);
    }

    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    #[must_use]
    pub fn get_key(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.pressed_keys.iter().any(|k| k.is_shift())
    }

    #[must_use]
    pub fn get_mouse_button(&self, button: MouseButton) -> bool {
        self.pressed_mouse.contains(&button)
    }

    /// Cursor movement since the last [`start_frame`](Self::start_frame).
    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll wheel movement since the last [`start_frame`](Self::start_frame).
    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    /// Window size in physical pixels.
    #[must_use]
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_carries_shift_state() {
        let mut input = Input::new();
        assert_eq!(
            input.inject_key(Key::ArrowUp, ButtonState::Pressed, false),
            Some(KeyPress::new(Key::ArrowUp))
        );

        input.inject_key(Key::ShiftRight, ButtonState::Pressed, false);
        let press = input.inject_key(Key::ArrowUp, ButtonState::Pressed, true).unwrap();
        assert!(press.shift);
        assert!(press.repeat);

        input.inject_key(Key::ShiftRight, ButtonState::Released, false);
        assert!(!input.shift_held());
    }

    #[test]
    fn release_yields_no_press() {
        let mut input = Input::new();
        input.inject_key(Key::W, ButtonState::Pressed, false);
        assert_eq!(input.inject_key(Key::W, ButtonState::Released, false), None);
        assert!(!input.get_key(Key::W));
    }

    #[test]
    fn either_shift_key_counts() {
        let mut input = Input::new();
        input.inject_key(Key::ShiftLeft, ButtonState::Pressed, false);
        assert!(input.shift_held());
        input.inject_key(Key::ControlLeft, ButtonState::Pressed, false);
        input.inject_key(Key::ShiftLeft, ButtonState::Released, false);
        assert!(!input.shift_held());
    }

    #[test]
    fn pointer_deltas_accumulate_until_frame_start() {
        let mut input = Input::new();
        input.inject_mouse_position(100.0, 100.0);
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.inject_mouse_position(110.0, 95.0);
        input.inject_mouse_position(115.0, 95.0);
        input.inject_scroll(0.0, 1.0);
        input.inject_scroll(0.0, 2.0);
        assert_eq!(input.mouse_delta(), Vec2::new(15.0, -5.0));
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 3.0));

        input.start_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }

    #[test]
    fn focus_loss_releases_buttons() {
        let mut input = Input::new();
        input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
        assert!(input.get_mouse_button(MouseButton::Left));
        input.clear();
        assert!(!input.get_mouse_button(MouseButton::Left));
    }
}
