pub mod input;
mod loop_runner;
mod metrics;

pub use input::{
    ButtonId, ButtonStates, GamepadState, InputAggregator, InputError, InputMethod, KeyboardState,
    StickId, StickVector, TriggerId, ANALOG_PRIORITY_THRESHOLD, BUTTON_COUNT,
};
pub use loop_runner::{run_shell, AppError, ShellApp, ShellCommand, ShellConfig};
