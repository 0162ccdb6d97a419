mod gamepad;
mod keyboard;

pub use gamepad::GamepadState;
pub use keyboard::KeyboardState;

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Logical button, independent of which physical source reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Start,
    Select,
}

pub const BUTTON_COUNT: usize = 12;

impl ButtonId {
    pub const ALL: [ButtonId; BUTTON_COUNT] = [
        ButtonId::Up,
        ButtonId::Down,
        ButtonId::Left,
        ButtonId::Right,
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
        ButtonId::LeftBumper,
        ButtonId::RightBumper,
        ButtonId::Start,
        ButtonId::Select,
    ];

    const fn index(self) -> usize {
        match self {
            ButtonId::Up => 0,
            ButtonId::Down => 1,
            ButtonId::Left => 2,
            ButtonId::Right => 3,
            ButtonId::A => 4,
            ButtonId::B => 5,
            ButtonId::X => 6,
            ButtonId::Y => 7,
            ButtonId::LeftBumper => 8,
            ButtonId::RightBumper => 9,
            ButtonId::Start => 10,
            ButtonId::Select => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ButtonId::Up => "up",
            ButtonId::Down => "down",
            ButtonId::Left => "left",
            ButtonId::Right => "right",
            ButtonId::A => "a",
            ButtonId::B => "b",
            ButtonId::X => "x",
            ButtonId::Y => "y",
            ButtonId::LeftBumper => "left-bumper",
            ButtonId::RightBumper => "right-bumper",
            ButtonId::Start => "start",
            ButtonId::Select => "select",
        }
    }

    /// Resolve a configuration-provided button name. Unknown names are a
    /// programmer/configuration error, not a runtime condition.
    pub fn from_name(name: &str) -> Result<Self, InputError> {
        Self::ALL
            .into_iter()
            .find(|button| button.name() == name)
            .ok_or_else(|| InputError::InvalidIdentifier {
                kind: "button",
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickId {
    Left,
    Right,
}

impl StickId {
    pub fn name(self) -> &'static str {
        match self {
            StickId::Left => "left",
            StickId::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, InputError> {
        match name {
            "left" => Ok(StickId::Left),
            "right" => Ok(StickId::Right),
            _ => Err(InputError::InvalidIdentifier {
                kind: "stick",
                name: name.to_string(),
            }),
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            StickId::Left => 0,
            StickId::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerId {
    Left,
    Right,
}

impl TriggerId {
    pub fn name(self) -> &'static str {
        match self {
            TriggerId::Left => "left",
            TriggerId::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, InputError> {
        match name {
            "left" => Ok(TriggerId::Left),
            "right" => Ok(TriggerId::Right),
            _ => Err(InputError::InvalidIdentifier {
                kind: "trigger",
                name: name.to_string(),
            }),
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            TriggerId::Left => 0,
            TriggerId::Right => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown {kind} identifier '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
}

/// Held state for every logical button, one frame's worth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonStates {
    down: [bool; BUTTON_COUNT],
}

impl ButtonStates {
    pub fn set(&mut self, button: ButtonId, is_down: bool) {
        self.down[button.index()] = is_down;
    }

    pub fn is_down(&self, button: ButtonId) -> bool {
        self.down[button.index()]
    }

    pub fn any_down(&self) -> bool {
        self.down.iter().any(|down| *down)
    }

    pub fn union(self, other: ButtonStates) -> ButtonStates {
        let mut merged = ButtonStates::default();
        for button in ButtonId::ALL {
            merged.set(button, self.is_down(button) || other.is_down(button));
        }
        merged
    }

    pub fn pressed_buttons(&self) -> Vec<ButtonId> {
        ButtonId::ALL
            .into_iter()
            .filter(|button| self.is_down(*button))
            .collect()
    }
}

/// Analog stick reading, axes in [-1, 1], +y is up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickVector {
    pub x: f32,
    pub y: f32,
}

impl StickVector {
    pub const ZERO: StickVector = StickVector { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMethod {
    #[default]
    None,
    Gamepad,
    Keyboard,
    Both,
}

/// Analog values below this are treated as noise floor; the keyboard
/// fallback wins instead of fighting an idle stick.
pub const ANALOG_PRIORITY_THRESHOLD: f32 = 0.1;

/// Merges the polled gamepad and the event-driven keyboard into one
/// per-frame snapshot with edge detection. `update` must run exactly once
/// per frame before any query.
#[derive(Debug)]
pub struct InputAggregator {
    gamepad: GamepadState,
    keyboard: KeyboardState,
    held: ButtonStates,
    previous: ButtonStates,
    last_method: InputMethod,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::with_gamepad(GamepadState::new())
    }

    pub(crate) fn with_gamepad(gamepad: GamepadState) -> Self {
        Self {
            gamepad,
            keyboard: KeyboardState::default(),
            held: ButtonStates::default(),
            previous: ButtonStates::default(),
            last_method: InputMethod::None,
        }
    }

    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        Self::with_gamepad(GamepadState::disconnected())
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    /// Advances the snapshot by one frame: the current held set becomes the
    /// previous one, the gamepad is polled, and the new held set is the
    /// union of both sources.
    pub fn update(&mut self) {
        self.previous = self.held;
        self.gamepad.poll();
        self.held = self.gamepad.held_buttons().union(self.keyboard.held_buttons());

        let method = self.active_input_method();
        if method != self.last_method {
            debug!(method = ?method, "input_method_changed");
            self.last_method = method;
        }
    }

    /// Held by gamepad OR keyboard; a union, not a priority pick.
    pub fn is_down(&self, button: ButtonId) -> bool {
        self.held.is_down(button)
    }

    pub fn just_pressed(&self, button: ButtonId) -> bool {
        self.held.is_down(button) && !self.previous.is_down(button)
    }

    pub fn just_released(&self, button: ButtonId) -> bool {
        !self.held.is_down(button) && self.previous.is_down(button)
    }

    /// Gamepad value when its magnitude clears the noise floor, keyboard
    /// synthesis otherwise. Never a sum of both.
    pub fn stick(&self, stick: StickId) -> StickVector {
        let pad = self.gamepad.stick(stick);
        if pad.magnitude() > ANALOG_PRIORITY_THRESHOLD {
            pad
        } else {
            self.keyboard.stick(stick)
        }
    }

    pub fn trigger(&self, trigger: TriggerId) -> f32 {
        let pad = self.gamepad.trigger(trigger);
        if pad > ANALOG_PRIORITY_THRESHOLD {
            pad
        } else {
            self.keyboard.trigger(trigger)
        }
    }

    pub fn pressed_buttons(&self) -> Vec<ButtonId> {
        self.held.pressed_buttons()
    }

    pub fn active_input_method(&self) -> InputMethod {
        let gamepad_active = self.gamepad.connected() && self.gamepad.any_activity();
        let keyboard_active = self.keyboard.any_key_down() || self.keyboard.any_stick_active();
        match (gamepad_active, keyboard_active) {
            (true, true) => InputMethod::Both,
            (true, false) => InputMethod::Gamepad,
            (false, true) => InputMethod::Keyboard,
            (false, false) => InputMethod::None,
        }
    }

    /// Fire-and-forget; silently a no-op when the pad is missing or has no
    /// force feedback.
    pub fn request_rumble(&mut self, intensity: f32, duration: Duration, device_index: usize) {
        self.gamepad.rumble(intensity, duration, device_index);
    }

    /// Drains number-row/numpad digit press edges buffered since the last
    /// call. Literal PIN entry consumes these.
    pub fn take_digit_presses(&mut self) -> Vec<u8> {
        self.keyboard.take_digit_presses()
    }

    #[cfg(test)]
    fn inject_gamepad_sample(&mut self, sample: gamepad::PadSample) {
        self.gamepad.set_sample(sample);
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::gamepad::PadSample;
    use super::*;
    use winit::keyboard::KeyCode;

    fn pad_sample_with_button(button: ButtonId) -> PadSample {
        let mut held = ButtonStates::default();
        held.set(button, true);
        PadSample {
            connected: true,
            held,
            sticks: [StickVector::ZERO; 2],
            triggers: [0.0; 2],
        }
    }

    #[test]
    fn just_pressed_fires_only_on_first_held_frame() {
        let mut input = InputAggregator::disconnected();

        input.keyboard_mut().handle_key(KeyCode::ArrowUp, true);
        input.update();
        assert!(input.is_down(ButtonId::Up));
        assert!(input.just_pressed(ButtonId::Up));

        input.update();
        assert!(input.is_down(ButtonId::Up));
        assert!(!input.just_pressed(ButtonId::Up));

        input.update();
        assert!(!input.just_pressed(ButtonId::Up));
    }

    #[test]
    fn just_released_fires_only_on_release_frame() {
        let mut input = InputAggregator::disconnected();

        input.keyboard_mut().handle_key(KeyCode::Enter, true);
        input.update();
        input.keyboard_mut().handle_key(KeyCode::Enter, false);
        input.update();
        assert!(input.just_released(ButtonId::A));

        input.update();
        assert!(!input.just_released(ButtonId::A));
    }

    #[test]
    fn is_down_is_union_of_both_sources() {
        let mut input = InputAggregator::disconnected();
        input.inject_gamepad_sample(pad_sample_with_button(ButtonId::A));
        input.keyboard_mut().handle_key(KeyCode::ArrowLeft, true);
        input.update();

        assert!(input.is_down(ButtonId::A));
        assert!(input.is_down(ButtonId::Left));
    }

    #[test]
    fn pressed_buttons_deduplicates_across_sources() {
        let mut input = InputAggregator::disconnected();
        input.inject_gamepad_sample(pad_sample_with_button(ButtonId::A));
        // Enter maps to A as well; the union must report A once.
        input.keyboard_mut().handle_key(KeyCode::Enter, true);
        input.update();

        let pressed = input.pressed_buttons();
        assert_eq!(pressed, vec![ButtonId::A]);
    }

    #[test]
    fn stick_prefers_gamepad_above_noise_floor() {
        let mut input = InputAggregator::disconnected();
        let mut sample = PadSample {
            connected: true,
            held: ButtonStates::default(),
            sticks: [StickVector::ZERO; 2],
            triggers: [0.0; 2],
        };
        sample.sticks[StickId::Left.index()] = StickVector::new(0.6, 0.0);
        input.inject_gamepad_sample(sample);
        input.keyboard_mut().handle_key(KeyCode::KeyW, true);
        input.update();

        let stick = input.stick(StickId::Left);
        assert!((stick.x - 0.6).abs() < 0.0001);
        assert!(stick.y.abs() < 0.0001);
    }

    #[test]
    fn stick_falls_back_to_keyboard_below_noise_floor() {
        let mut input = InputAggregator::disconnected();
        let mut sample = PadSample {
            connected: true,
            held: ButtonStates::default(),
            sticks: [StickVector::ZERO; 2],
            triggers: [0.0; 2],
        };
        sample.sticks[StickId::Left.index()] = StickVector::new(0.05, 0.05);
        input.inject_gamepad_sample(sample);
        input.keyboard_mut().handle_key(KeyCode::KeyW, true);
        input.update();

        let stick = input.stick(StickId::Left);
        assert!((stick.y - 1.0).abs() < 0.0001);
        assert!(stick.x.abs() < 0.0001);
    }

    #[test]
    fn trigger_uses_same_priority_rule_as_sticks() {
        let mut input = InputAggregator::disconnected();
        let mut sample = PadSample {
            connected: true,
            held: ButtonStates::default(),
            sticks: [StickVector::ZERO; 2],
            triggers: [0.0; 2],
        };
        sample.triggers[TriggerId::Left.index()] = 0.08;
        input.inject_gamepad_sample(sample);
        input.keyboard_mut().handle_key(KeyCode::KeyZ, true);
        input.update();
        assert!((input.trigger(TriggerId::Left) - 1.0).abs() < 0.0001);

        sample.triggers[TriggerId::Left.index()] = 0.4;
        input.inject_gamepad_sample(sample);
        input.update();
        assert!((input.trigger(TriggerId::Left) - 0.4).abs() < 0.0001);
    }

    #[test]
    fn idle_everything_reports_no_input_method() {
        let mut input = InputAggregator::disconnected();
        input.update();
        assert_eq!(input.active_input_method(), InputMethod::None);
    }

    #[test]
    fn input_method_tracks_each_active_source() {
        let mut input = InputAggregator::disconnected();
        input.keyboard_mut().handle_key(KeyCode::ArrowDown, true);
        input.update();
        assert_eq!(input.active_input_method(), InputMethod::Keyboard);

        input.inject_gamepad_sample(pad_sample_with_button(ButtonId::B));
        input.update();
        assert_eq!(input.active_input_method(), InputMethod::Both);

        input.keyboard_mut().handle_key(KeyCode::ArrowDown, false);
        input.update();
        assert_eq!(input.active_input_method(), InputMethod::Gamepad);
    }

    #[test]
    fn rumble_without_gamepad_is_a_silent_no_op() {
        let mut input = InputAggregator::disconnected();
        input.request_rumble(0.8, Duration::from_millis(200), 0);
    }

    #[test]
    fn button_names_round_trip() {
        for button in ButtonId::ALL {
            assert_eq!(ButtonId::from_name(button.name()), Ok(button));
        }
    }

    #[test]
    fn unknown_identifiers_fail_fast() {
        assert_eq!(
            ButtonId::from_name("turbo"),
            Err(InputError::InvalidIdentifier {
                kind: "button",
                name: "turbo".to_string(),
            })
        );
        assert!(StickId::from_name("middle").is_err());
        assert!(TriggerId::from_name("z").is_err());
    }
}
