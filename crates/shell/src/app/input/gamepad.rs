use std::fmt;
use std::time::{Duration, Instant};

use gilrs::ff::{BaseEffect, BaseEffectType, EffectBuilder, Replay, Ticks};
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use tracing::{debug, info, warn};

use super::{ButtonId, ButtonStates, StickId, StickVector, TriggerId};

const BUTTON_MAP: [(ButtonId, Button); super::BUTTON_COUNT] = [
    (ButtonId::Up, Button::DPadUp),
    (ButtonId::Down, Button::DPadDown),
    (ButtonId::Left, Button::DPadLeft),
    (ButtonId::Right, Button::DPadRight),
    (ButtonId::A, Button::South),
    (ButtonId::B, Button::East),
    (ButtonId::X, Button::West),
    (ButtonId::Y, Button::North),
    (ButtonId::LeftBumper, Button::LeftTrigger),
    (ButtonId::RightBumper, Button::RightTrigger),
    (ButtonId::Start, Button::Start),
    (ButtonId::Select, Button::Select),
];

/// One frame's worth of sampled pad state. Neutral when no pad is present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PadSample {
    pub(crate) connected: bool,
    pub(crate) held: ButtonStates,
    pub(crate) sticks: [StickVector; 2],
    pub(crate) triggers: [f32; 2],
}

struct ActiveRumble {
    // Keeps the ff effect alive until its deadline; dropping it stops play.
    _effect: gilrs::ff::Effect,
    deadline: Instant,
}

/// Gamepad side of the input merge. Polled once per frame; a missing pad
/// degrades every query to neutral values instead of failing.
pub struct GamepadState {
    gilrs: Option<Gilrs>,
    active_id: Option<GamepadId>,
    sample: PadSample,
    active_rumble: Option<ActiveRumble>,
}

impl GamepadState {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(error) => {
                warn!(error = %error, "gamepad_support_unavailable");
                None
            }
        };
        Self {
            gilrs,
            active_id: None,
            sample: PadSample::default(),
            active_rumble: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        Self {
            gilrs: None,
            active_id: None,
            sample: PadSample::default(),
            active_rumble: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_sample(&mut self, sample: PadSample) {
        self.sample = sample;
    }

    /// Drains pending platform events and re-samples the active pad.
    pub fn poll(&mut self) {
        if self
            .active_rumble
            .as_ref()
            .is_some_and(|rumble| Instant::now() >= rumble.deadline)
        {
            self.active_rumble = None;
        }

        let Some(gilrs) = self.gilrs.as_mut() else {
            return;
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event())
            .map(|event| (event.id, event.event))
            .collect();
        for (id, event) in events {
            match event {
                EventType::Connected => {
                    info!(id = %id, name = gilrs.gamepad(id).name(), "gamepad_connected");
                }
                EventType::Disconnected => {
                    info!(id = %id, "gamepad_disconnected");
                }
                _ => {}
            }
        }

        self.active_id = self
            .active_id
            .filter(|id| gilrs.gamepad(*id).is_connected())
            .or_else(|| gilrs.gamepads().next().map(|(id, _)| id));

        self.sample = match self.active_id {
            Some(id) => sample_gamepad(&gilrs.gamepad(id)),
            None => PadSample::default(),
        };
    }

    pub fn connected(&self) -> bool {
        self.sample.connected
    }

    pub fn held_buttons(&self) -> ButtonStates {
        self.sample.held
    }

    pub fn stick(&self, stick: StickId) -> StickVector {
        self.sample.sticks[stick.index()]
    }

    pub fn trigger(&self, trigger: TriggerId) -> f32 {
        self.sample.triggers[trigger.index()]
    }

    /// Whether the pad currently reports any button, stick, or trigger
    /// activity above the noise floor.
    pub fn any_activity(&self) -> bool {
        self.sample.held.any_down()
            || self
                .sample
                .sticks
                .iter()
                .any(|stick| stick.magnitude() > super::ANALOG_PRIORITY_THRESHOLD)
            || self
                .sample
                .triggers
                .iter()
                .any(|value| *value > super::ANALOG_PRIORITY_THRESHOLD)
    }

    /// Fire-and-forget force feedback. Unsupported hardware, a missing pad,
    /// and platform refusals all degrade to a logged no-op.
    pub fn rumble(&mut self, intensity: f32, duration: Duration, device_index: usize) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            debug!(device_index, "rumble_skipped_no_backend");
            return;
        };
        let Some(id) = gilrs.gamepads().nth(device_index).map(|(id, _)| id) else {
            debug!(device_index, "rumble_skipped_not_connected");
            return;
        };

        let magnitude = (intensity.clamp(0.0, 1.0) * f32::from(u16::MAX)) as u16;
        let play_for = Ticks::from_ms(duration.as_millis().min(u128::from(u32::MAX)) as u32);
        let mut builder = EffectBuilder::new();
        builder.add_effect(BaseEffect {
            kind: BaseEffectType::Strong { magnitude },
            scheduling: Replay {
                play_for,
                ..Default::default()
            },
            ..Default::default()
        });
        {
            let gamepad = gilrs.gamepad(id);
            if !gamepad.is_ff_supported() {
                debug!(device_index, "rumble_skipped_unsupported");
                return;
            }
            builder.add_gamepad(&gamepad);
        }

        match builder.finish(gilrs) {
            Ok(effect) => {
                if let Err(error) = effect.play() {
                    debug!(error = %error, "rumble_play_failed");
                    return;
                }
                self.active_rumble = Some(ActiveRumble {
                    _effect: effect,
                    deadline: Instant::now() + duration,
                });
            }
            Err(error) => debug!(error = %error, "rumble_effect_failed"),
        }
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GamepadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GamepadState")
            .field("backend", &self.gilrs.is_some())
            .field("sample", &self.sample)
            .finish_non_exhaustive()
    }
}

fn sample_gamepad(gamepad: &gilrs::Gamepad<'_>) -> PadSample {
    let mut held = ButtonStates::default();
    for (button, pad_button) in BUTTON_MAP {
        if gamepad.is_pressed(pad_button) {
            held.set(button, true);
        }
    }

    let sticks = [
        StickVector::new(
            gamepad.value(Axis::LeftStickX),
            gamepad.value(Axis::LeftStickY),
        ),
        StickVector::new(
            gamepad.value(Axis::RightStickX),
            gamepad.value(Axis::RightStickY),
        ),
    ];
    let triggers = [
        trigger_value(gamepad, Button::LeftTrigger2),
        trigger_value(gamepad, Button::RightTrigger2),
    ];

    PadSample {
        connected: gamepad.is_connected(),
        held,
        sticks,
        triggers,
    }
}

fn trigger_value(gamepad: &gilrs::Gamepad<'_>, button: Button) -> f32 {
    gamepad
        .button_data(button)
        .map(|data| data.value())
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
}
