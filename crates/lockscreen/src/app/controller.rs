use std::time::{Duration, Instant};

use shell::{ButtonId, InputAggregator, ShellApp, ShellCommand, StickId, StickVector};
use tracing::info;

use super::nav::{Direction, DirectionSource, NavEvent, NavMachine, NavOutcome, SoundCue};
use super::options::ResolvedOptions;
use super::profiles::ProfileCatalog;
use super::view::{project, Presenter};

/// Deflection a stick axis must exceed to count as a navigation pulse.
/// Deliberately higher than the aggregator's priority threshold so a
/// drifting stick can win input priority without moving focus.
pub const ANALOG_NAV_THRESHOLD: f32 = 0.7;

const SELECT_RUMBLE_INTENSITY: f32 = 0.8;
const SELECT_RUMBLE_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Locked,
    Unlocked,
}

/// One frame's worth of decoded intent, extracted from the aggregator so
/// the controller logic stays clock- and hardware-free in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub stick: StickVector,
    pub select: bool,
    pub back: bool,
    pub digits: Vec<u8>,
}

impl FrameInput {
    fn from_aggregator(
        input: &mut InputAggregator,
        select_button: ButtonId,
        back_button: ButtonId,
    ) -> Self {
        Self {
            up: input.just_pressed(ButtonId::Up),
            down: input.just_pressed(ButtonId::Down),
            left: input.just_pressed(ButtonId::Left),
            right: input.just_pressed(ButtonId::Right),
            stick: input.stick(StickId::Left),
            select: input.just_pressed(select_button),
            back: input.just_pressed(back_button),
            digits: input.take_digit_presses(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_direction(direction: Direction) -> Self {
        let mut frame = Self::default();
        match direction {
            Direction::Up => frame.up = true,
            Direction::Down => frame.down = true,
            Direction::Left => frame.left = true,
            Direction::Right => frame.right = true,
        }
        frame
    }

    #[cfg(test)]
    pub(crate) fn with_stick(x: f32, y: f32) -> Self {
        Self {
            stick: StickVector { x, y },
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn with_select() -> Self {
        Self {
            select: true,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn with_back() -> Self {
        Self {
            back: true,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn with_digits(digits: &[u8]) -> Self {
        Self {
            digits: digits.to_vec(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameResult {
    pub command: ShellCommand,
    pub rumble: bool,
}

/// Lockscreen application: owns the navigation machine, maps frame input
/// onto it, and forwards outcomes to the presenter.
pub struct LockscreenApp {
    machine: NavMachine,
    options: ResolvedOptions,
    presenter: Box<dyn Presenter>,
    mode: AppMode,
    needs_present: bool,
}

impl LockscreenApp {
    pub fn new(
        options: ResolvedOptions,
        catalog: ProfileCatalog,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let machine = NavMachine::new(
            options.pin_target,
            options.digit_source,
            options.regions.clone(),
            catalog,
        );
        Self {
            machine,
            options,
            presenter,
            mode: AppMode::Locked,
            // First frame always paints the baseline model.
            needs_present: true,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub(crate) fn run_frame(&mut self, frame: FrameInput, now: Instant) -> FrameResult {
        if self.mode == AppMode::Unlocked {
            return FrameResult {
                command: ShellCommand::Exit,
                rumble: false,
            };
        }

        let directions = [
            (frame.up, Direction::Up),
            (frame.down, Direction::Down),
            (frame.left, Direction::Left),
            (frame.right, Direction::Right),
        ];
        for (pressed, direction) in directions {
            if pressed {
                let outcome = self.machine.navigate(direction, DirectionSource::Digital, now);
                self.dispatch(outcome);
            }
        }
        if let Some(direction) = analog_direction(frame.stick) {
            let outcome = self.machine.navigate(direction, DirectionSource::Analog, now);
            self.dispatch(outcome);
        }

        let mut rumble = false;
        if frame.select {
            let outcome = self.machine.select(now);
            let accepted = outcome.focus_changed || outcome.event.is_some();
            if accepted && self.options.rumble_on_select {
                rumble = true;
            }
            self.dispatch(outcome);
        }
        if frame.back {
            let outcome = self.machine.back();
            self.dispatch(outcome);
        }
        for digit in frame.digits {
            let outcome = self.machine.enter_digit(digit);
            self.dispatch(outcome);
        }

        if self.mode == AppMode::Locked && self.machine.unlocked() {
            let cue = self.options.cue_name(SoundCue::SelectConfirm).to_string();
            self.presenter.play_cue(&cue);
            self.presenter.unlock();
            // Leave the machine in its baseline locked state so a re-lock
            // would start clean; the app-level mode governs shutdown.
            self.machine.reset();
            self.mode = AppMode::Unlocked;
        }

        if self.needs_present {
            let model = project(self.machine.focus(), self.machine.catalog());
            self.presenter.apply(&model);
            self.needs_present = false;
        }

        FrameResult {
            command: if self.mode == AppMode::Unlocked {
                ShellCommand::Exit
            } else {
                ShellCommand::None
            },
            rumble,
        }
    }

    fn dispatch(&mut self, outcome: NavOutcome) {
        if let Some(cue) = outcome.cue {
            let name = self.options.cue_name(cue).to_string();
            self.presenter.play_cue(&name);
        }
        match outcome.event {
            Some(NavEvent::TileSelected { index, download }) => {
                self.presenter.tile_selected(index, download);
            }
            Some(NavEvent::PinRejected) => {
                self.presenter.show_pin_error();
                self.machine.reset_pin();
            }
            Some(NavEvent::PinAccepted) => {
                info!("unlocked");
            }
            Some(NavEvent::ProfileSwitched(_)) | None => {}
        }
        if outcome.focus_changed {
            self.needs_present = true;
        }
    }
}

impl ShellApp for LockscreenApp {
    fn frame(&mut self, input: &mut InputAggregator, now: Instant) -> ShellCommand {
        let frame = FrameInput::from_aggregator(
            input,
            self.options.select_button,
            self.options.back_button,
        );
        let result = self.run_frame(frame, now);
        if result.rumble {
            input.request_rumble(SELECT_RUMBLE_INTENSITY, SELECT_RUMBLE_DURATION, 0);
        }
        result.command
    }

    fn on_exit(&mut self) {
        info!(mode = ?self.mode(), "lockscreen_app_exit");
    }
}

/// Maps a stick vector onto a direction pulse: past the threshold on the
/// dominant axis, positive y pointing up.
fn analog_direction(stick: StickVector) -> Option<Direction> {
    if stick.magnitude() <= ANALOG_NAV_THRESHOLD {
        return None;
    }
    if stick.x.abs() > stick.y.abs() {
        if stick.x > ANALOG_NAV_THRESHOLD {
            Some(Direction::Right)
        } else if stick.x < -ANALOG_NAV_THRESHOLD {
            Some(Direction::Left)
        } else {
            None
        }
    } else if stick.y > ANALOG_NAV_THRESHOLD {
        Some(Direction::Up)
    } else if stick.y < -ANALOG_NAV_THRESHOLD {
        Some(Direction::Down)
    } else {
        None
    }
}
