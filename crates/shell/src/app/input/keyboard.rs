use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::{ButtonId, ButtonStates, StickId, StickVector, TriggerId};

/// Keyboard side of the input merge. Raw key events arrive between frames
/// and are buffered here until the aggregator's next `update` consumes the
/// resulting state.
///
/// Key to button mapping:
///
/// | Key                  | Button       |
/// |----------------------|--------------|
/// | Arrow keys           | d-pad        |
/// | Enter, Space         | A            |
/// | Escape, Backspace    | B            |
/// | Q                    | X            |
/// | E                    | Y            |
/// | Left/Right Shift     | bumpers      |
/// | F1                   | Start        |
/// | Tab                  | Select       |
///
/// WASD composes the left stick and IJKL the right stick as unit vectors;
/// Z and C simulate full pulls of the left and right triggers; number row
/// and numpad digits are buffered as literal digit presses.
#[derive(Debug, Default)]
pub struct KeyboardState {
    keys_down: HashSet<KeyCode>,
    held: ButtonStates,
    digit_presses: Vec<u8>,
}

impl KeyboardState {
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        self.handle_key(code, event.state == ElementState::Pressed);
    }

    pub fn handle_key(&mut self, code: KeyCode, is_down: bool) {
        if is_down {
            let is_edge = self.keys_down.insert(code);
            if is_edge {
                if let Some(digit) = digit_for_key(code) {
                    self.digit_presses.push(digit);
                }
            }
        } else {
            self.keys_down.remove(&code);
        }

        if let Some(button) = button_for_key(code) {
            // A button stays held while any of its keys is down.
            let still_down = self
                .keys_down
                .iter()
                .any(|down| button_for_key(*down) == Some(button));
            self.held.set(button, still_down);
        }
    }

    pub fn held_buttons(&self) -> ButtonStates {
        self.held
    }

    pub fn any_key_down(&self) -> bool {
        !self.keys_down.is_empty()
    }

    pub fn any_stick_active(&self) -> bool {
        self.stick(StickId::Left).magnitude() > 0.0
            || self.stick(StickId::Right).magnitude() > 0.0
    }

    /// Unit vector synthesized from the stick's directional keys; diagonal
    /// combinations are normalized.
    pub fn stick(&self, stick: StickId) -> StickVector {
        let (up, down, left, right) = match stick {
            StickId::Left => (KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD),
            StickId::Right => (KeyCode::KeyI, KeyCode::KeyK, KeyCode::KeyJ, KeyCode::KeyL),
        };

        let mut x = 0.0;
        let mut y = 0.0;
        if self.keys_down.contains(&up) {
            y += 1.0;
        }
        if self.keys_down.contains(&down) {
            y -= 1.0;
        }
        if self.keys_down.contains(&right) {
            x += 1.0;
        }
        if self.keys_down.contains(&left) {
            x -= 1.0;
        }

        let vector = StickVector::new(x, y);
        let magnitude = vector.magnitude();
        if magnitude > 1.0 {
            StickVector::new(vector.x / magnitude, vector.y / magnitude)
        } else {
            vector
        }
    }

    pub fn trigger(&self, trigger: TriggerId) -> f32 {
        let key = match trigger {
            TriggerId::Left => KeyCode::KeyZ,
            TriggerId::Right => KeyCode::KeyC,
        };
        if self.keys_down.contains(&key) {
            1.0
        } else {
            0.0
        }
    }

    pub fn take_digit_presses(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.digit_presses)
    }
}

fn button_for_key(code: KeyCode) -> Option<ButtonId> {
    match code {
        KeyCode::ArrowUp => Some(ButtonId::Up),
        KeyCode::ArrowDown => Some(ButtonId::Down),
        KeyCode::ArrowLeft => Some(ButtonId::Left),
        KeyCode::ArrowRight => Some(ButtonId::Right),
        KeyCode::Enter | KeyCode::Space => Some(ButtonId::A),
        KeyCode::Escape | KeyCode::Backspace => Some(ButtonId::B),
        KeyCode::KeyQ => Some(ButtonId::X),
        KeyCode::KeyE => Some(ButtonId::Y),
        KeyCode::ShiftLeft => Some(ButtonId::LeftBumper),
        KeyCode::ShiftRight => Some(ButtonId::RightBumper),
        KeyCode::F1 => Some(ButtonId::Start),
        KeyCode::Tab => Some(ButtonId::Select),
        _ => None,
    }
}

fn digit_for_key(code: KeyCode) -> Option<u8> {
    match code {
        KeyCode::Digit0 | KeyCode::Numpad0 => Some(0),
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Some(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Some(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Some(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Some(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Some(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Some(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => Some(9),
        _ => None,
    }
}
