mod app;

pub use app::{
    run_shell, AppError, ButtonId, ButtonStates, GamepadState, InputAggregator, InputError,
    InputMethod, KeyboardState, ShellApp, ShellCommand, ShellConfig, StickId, StickVector,
    TriggerId, ANALOG_PRIORITY_THRESHOLD, BUTTON_COUNT,
};
