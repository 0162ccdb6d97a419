use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::options::PinDigitSource;
use super::profiles::{ProfileCatalog, ProfileId};

/// Minimum gap between accepted analog stick direction pulses. Digital
/// edges are already rate-limited by physical presses and bypass this.
pub const DIRECTION_THROTTLE: Duration = Duration::from_millis(200);

/// Minimum gap between accepted PIN pad select presses.
pub const SELECT_DEBOUNCE: Duration = Duration::from_millis(300);

pub const PIN_LENGTH: usize = 4;

/// Vertical focus order on the lockscreen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Avatar,
    Pin,
    Games,
}

pub const REGION_ORDER: [Region; 3] = [Region::Avatar, Region::Pin, Region::Games];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Where a direction pulse came from. Analog pulses repeat while the
/// stick is held, so only they are subject to [`DIRECTION_THROTTLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionSource {
    Digital,
    Analog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Nav,
    SelectPin,
    SelectConfirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    ProfileSwitched(ProfileId),
    TileSelected { index: usize, download: bool },
    PinAccepted,
    PinRejected,
}

/// What a single input dispatch produced. The controller turns this into
/// presenter calls; the machine itself never touches the outside world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOutcome {
    pub focus_changed: bool,
    pub cue: Option<SoundCue>,
    pub event: Option<NavEvent>,
}

impl NavOutcome {
    fn focus(cue: Option<SoundCue>) -> Self {
        Self {
            focus_changed: true,
            cue,
            event: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    pub region: Region,
    pub game_index: usize,
    pub pin_index: usize,
    pub profile: ProfileId,
    pin_digits: Vec<u8>,
    pin_checked: bool,
    last_analog_direction_at: Option<Instant>,
    last_pin_select_at: Option<Instant>,
}

impl FocusState {
    fn new(region: Region, game_index: usize) -> Self {
        Self {
            region,
            game_index,
            pin_index: 0,
            profile: ProfileId::Primary,
            pin_digits: Vec::new(),
            pin_checked: false,
            last_analog_direction_at: None,
            last_pin_select_at: None,
        }
    }

    pub fn pin_digits(&self) -> &[u8] {
        &self.pin_digits
    }
}

/// Lockscreen focus and PIN entry state machine. All methods take the
/// current frame instant so throttle and debounce windows are testable
/// without real clocks.
pub struct NavMachine {
    focus: FocusState,
    catalog: ProfileCatalog,
    pin_target: [u8; PIN_LENGTH],
    digit_source: PinDigitSource,
    regions: Vec<Region>,
    unlocked: bool,
}

impl NavMachine {
    pub fn new(
        pin_target: [u8; PIN_LENGTH],
        digit_source: PinDigitSource,
        regions: Vec<Region>,
        catalog: ProfileCatalog,
    ) -> Self {
        let initial_region = regions.first().copied().unwrap_or(Region::Pin);
        let game_index = catalog
            .profile(ProfileId::Primary)
            .first_interactive_index()
            .unwrap_or(0);
        Self {
            focus: FocusState::new(initial_region, game_index),
            catalog,
            pin_target,
            digit_source,
            regions,
            unlocked: false,
        }
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn unlocked(&self) -> bool {
        self.unlocked
    }

    /// Returns to the initial locked state: first enabled region focused,
    /// PIN cleared, primary profile active.
    pub fn reset(&mut self) {
        let region = self.regions.first().copied().unwrap_or(Region::Pin);
        let game_index = self
            .catalog
            .profile(ProfileId::Primary)
            .first_interactive_index()
            .unwrap_or(0);
        self.focus = FocusState::new(region, game_index);
        self.unlocked = false;
    }

    /// Clears entered digits after a rejected attempt. Until this runs the
    /// rejected digits stay on display and further appends are no-ops.
    pub fn reset_pin(&mut self) {
        self.focus.pin_digits.clear();
        self.focus.pin_checked = false;
        self.focus.pin_index = 0;
    }

    pub fn navigate(
        &mut self,
        direction: Direction,
        source: DirectionSource,
        now: Instant,
    ) -> NavOutcome {
        if self.unlocked {
            return NavOutcome::default();
        }
        if source == DirectionSource::Analog {
            if let Some(last) = self.focus.last_analog_direction_at {
                if now.saturating_duration_since(last) < DIRECTION_THROTTLE {
                    return NavOutcome::default();
                }
            }
            self.focus.last_analog_direction_at = Some(now);
        }

        match direction {
            Direction::Up => self.move_vertical(-1),
            Direction::Down => self.move_vertical(1),
            Direction::Left => self.move_lateral(-1),
            Direction::Right => self.move_lateral(1),
        }
    }

    pub fn select(&mut self, now: Instant) -> NavOutcome {
        if self.unlocked {
            return NavOutcome::default();
        }
        if let Some(last) = self.focus.last_pin_select_at {
            if now.saturating_duration_since(last) < SELECT_DEBOUNCE {
                debug!("select_debounced");
                return NavOutcome::default();
            }
        }

        match self.focus.region {
            Region::Avatar => self.switch_profile(),
            Region::Games => self.select_tile(),
            Region::Pin => {
                // The debounce window only advances on PIN pad selects, so
                // avatar/tile presses never delay a following PIN press.
                self.focus.last_pin_select_at = Some(now);
                self.select_pin_digit()
            }
        }
    }

    /// Removes the most recent PIN digit. Outside the PIN region, or with
    /// nothing entered, this does nothing.
    pub fn back(&mut self) -> NavOutcome {
        if self.unlocked || self.focus.region != Region::Pin {
            return NavOutcome::default();
        }
        if self.focus.pin_digits.pop().is_none() {
            return NavOutcome::default();
        }
        self.focus.pin_checked = false;
        self.focus.pin_index = self.focus.pin_index.saturating_sub(1);
        NavOutcome::focus(None)
    }

    /// Appends a literal digit (number row / keypad). Only honored when
    /// the PIN region is focused and literal entry is configured.
    pub fn enter_digit(&mut self, digit: u8) -> NavOutcome {
        if self.unlocked
            || self.focus.region != Region::Pin
            || self.digit_source != PinDigitSource::LiteralKeys
            || digit > 9
        {
            return NavOutcome::default();
        }
        let (appended, event) = self.append_pin_digit(digit);
        if !appended {
            return NavOutcome::default();
        }
        self.focus.pin_index = (self.focus.pin_digits.len()).min(PIN_LENGTH - 1);
        NavOutcome {
            focus_changed: true,
            cue: Some(SoundCue::SelectPin),
            event,
        }
    }

    fn move_vertical(&mut self, step: isize) -> NavOutcome {
        let position = self
            .regions
            .iter()
            .position(|region| *region == self.focus.region)
            .unwrap_or(0) as isize;
        let target = (position + step).clamp(0, self.regions.len() as isize - 1) as usize;
        if self.regions[target] == self.focus.region {
            return NavOutcome::default();
        }
        self.focus.region = self.regions[target];
        NavOutcome::focus(Some(SoundCue::Nav))
    }

    fn move_lateral(&mut self, step: isize) -> NavOutcome {
        match self.focus.region {
            Region::Avatar => self.switch_profile(),
            Region::Games => {
                let profile = self.catalog.profile(self.focus.profile);
                let next = profile.next_interactive(self.focus.game_index, step);
                if next == self.focus.game_index {
                    return NavOutcome::default();
                }
                self.focus.game_index = next;
                NavOutcome::focus(Some(SoundCue::Nav))
            }
            Region::Pin => {
                if step < 0 {
                    if self.focus.pin_index == 0 {
                        return NavOutcome::default();
                    }
                    self.focus.pin_index -= 1;
                    return NavOutcome::focus(Some(SoundCue::Nav));
                }
                let target = (self.focus.pin_index + 1).min(PIN_LENGTH - 1);
                if target == self.focus.pin_index {
                    return NavOutcome::default();
                }
                self.focus.pin_index = target;
                // Moving right past the filled prefix commits the skipped
                // position's value, mirroring the pad's position-is-digit
                // entry scheme.
                let mut event = None;
                if self.digit_source == PinDigitSource::FocusPosition
                    && self.focus.pin_index > self.focus.pin_digits.len()
                {
                    let (_, appended_event) = self.append_pin_digit(self.focus.pin_index as u8);
                    event = appended_event;
                }
                NavOutcome {
                    focus_changed: true,
                    cue: Some(SoundCue::Nav),
                    event,
                }
            }
        }
    }

    fn switch_profile(&mut self) -> NavOutcome {
        self.focus.profile = self.focus.profile.toggled();
        self.focus.game_index = self
            .catalog
            .profile(self.focus.profile)
            .first_interactive_index()
            .unwrap_or(0);
        info!(profile = ?self.focus.profile, "profile_switched");
        NavOutcome {
            focus_changed: true,
            cue: Some(SoundCue::Nav),
            event: Some(NavEvent::ProfileSwitched(self.focus.profile)),
        }
    }

    fn select_tile(&mut self) -> NavOutcome {
        let profile = self.catalog.profile(self.focus.profile);
        let Some(tile) = profile.tiles.get(self.focus.game_index).and_then(Option::as_ref) else {
            return NavOutcome::default();
        };
        info!(tile = %tile.name, download = tile.download, "tile_selected");
        NavOutcome {
            focus_changed: false,
            cue: None,
            event: Some(NavEvent::TileSelected {
                index: self.focus.game_index,
                download: tile.download,
            }),
        }
    }

    fn select_pin_digit(&mut self) -> NavOutcome {
        if self.digit_source != PinDigitSource::FocusPosition {
            return NavOutcome::default();
        }
        let digit = (self.focus.pin_index + 1) as u8;
        let (appended, event) = self.append_pin_digit(digit);
        if !appended {
            return NavOutcome::default();
        }
        if self.focus.pin_index < PIN_LENGTH - 1 {
            self.focus.pin_index += 1;
        }
        NavOutcome {
            focus_changed: true,
            cue: Some(SoundCue::SelectPin),
            event,
        }
    }

    /// Appends one digit and, exactly once per attempt, checks the full
    /// entry against the target when the fourth digit lands.
    fn append_pin_digit(&mut self, digit: u8) -> (bool, Option<NavEvent>) {
        if self.focus.pin_digits.len() >= PIN_LENGTH {
            return (false, None);
        }
        self.focus.pin_digits.push(digit);
        if self.focus.pin_digits.len() < PIN_LENGTH || self.focus.pin_checked {
            return (true, None);
        }
        self.focus.pin_checked = true;
        if self.focus.pin_digits == self.pin_target {
            self.unlocked = true;
            info!("pin_accepted");
            (true, Some(NavEvent::PinAccepted))
        } else {
            info!("pin_rejected");
            (true, Some(NavEvent::PinRejected))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> NavMachine {
        NavMachine::new(
            [1, 2, 3, 4],
            PinDigitSource::FocusPosition,
            REGION_ORDER.to_vec(),
            ProfileCatalog::demo(),
        )
    }

    fn literal_machine() -> NavMachine {
        NavMachine::new(
            [1, 2, 3, 4],
            PinDigitSource::LiteralKeys,
            REGION_ORDER.to_vec(),
            ProfileCatalog::demo(),
        )
    }

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn initial_focus_is_first_region() {
        let machine = machine();
        assert_eq!(machine.focus().region, Region::Avatar);
        assert_eq!(machine.focus().profile, ProfileId::Primary);
        assert!(!machine.unlocked());
    }

    #[test]
    fn vertical_navigation_clamps_at_edges() {
        let mut machine = machine();
        let now = t0();
        let outcome = machine.navigate(Direction::Up, DirectionSource::Digital, now);
        assert!(!outcome.focus_changed);

        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        assert_eq!(machine.focus().region, Region::Pin);
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        assert_eq!(machine.focus().region, Region::Games);
        let outcome = machine.navigate(Direction::Down, DirectionSource::Digital, now);
        assert!(!outcome.focus_changed);
        assert_eq!(machine.focus().region, Region::Games);
    }

    #[test]
    fn analog_directions_are_throttled_digital_are_not() {
        let mut machine = machine();
        let now = t0();
        let accepted = machine.navigate(Direction::Down, DirectionSource::Analog, now);
        assert!(accepted.focus_changed);

        let throttled = machine.navigate(
            Direction::Down,
            DirectionSource::Analog,
            now + Duration::from_millis(100),
        );
        assert!(!throttled.focus_changed);
        assert_eq!(machine.focus().region, Region::Pin);

        // A digital edge inside the same window still lands.
        let digital = machine.navigate(
            Direction::Down,
            DirectionSource::Digital,
            now + Duration::from_millis(100),
        );
        assert!(digital.focus_changed);
        assert_eq!(machine.focus().region, Region::Games);

        let after_window = machine.navigate(
            Direction::Up,
            DirectionSource::Analog,
            now + Duration::from_millis(250),
        );
        assert!(after_window.focus_changed);
    }

    #[test]
    fn avatar_lateral_and_select_both_toggle_profile() {
        let mut machine = machine();
        let now = t0();
        let outcome = machine.navigate(Direction::Left, DirectionSource::Digital, now);
        assert_eq!(
            outcome.event,
            Some(NavEvent::ProfileSwitched(ProfileId::Secondary))
        );

        let outcome = machine.select(now);
        assert_eq!(
            outcome.event,
            Some(NavEvent::ProfileSwitched(ProfileId::Primary))
        );
    }

    #[test]
    fn profile_switch_refocuses_first_interactive_tile() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().game_index, 1);

        machine.navigate(Direction::Up, DirectionSource::Digital, now);
        machine.navigate(Direction::Up, DirectionSource::Digital, now);
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().profile, ProfileId::Secondary);
        assert_eq!(machine.focus().game_index, 0);
    }

    #[test]
    fn tile_navigation_wraps_and_skips_empty_slots() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Right, DirectionSource::Digital, now); // secondary: 3 tiles + 3 empty
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        assert_eq!(machine.focus().region, Region::Games);

        machine.navigate(Direction::Left, DirectionSource::Digital, now);
        assert_eq!(machine.focus().game_index, 2, "wraps backward over empty slots");
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().game_index, 0, "wraps forward over empty slots");
    }

    #[test]
    fn tile_select_reports_index_and_download_flag() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        machine.navigate(Direction::Left, DirectionSource::Digital, now); // wrap to last tile
        let outcome = machine.select(now);
        assert_eq!(
            outcome.event,
            Some(NavEvent::TileSelected {
                index: 5,
                download: true
            })
        );
        assert!(!outcome.focus_changed);
    }

    #[test]
    fn pin_selects_append_position_digits_and_unlock() {
        let mut machine = machine();
        let mut now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        assert_eq!(machine.focus().region, Region::Pin);

        // Select at position 0 enters "1" and advances; stepping right past
        // the fill enters the next position's value.
        let outcome = machine.select(now);
        assert_eq!(machine.focus().pin_digits(), &[1]);
        assert_eq!(outcome.cue, Some(SoundCue::SelectPin));
        assert!(outcome.event.is_none());

        for _ in 0..3 {
            now += SELECT_DEBOUNCE;
            machine.select(now);
        }
        assert_eq!(machine.focus().pin_digits(), &[1, 2, 3, 4]);
        assert!(machine.unlocked());
    }

    #[test]
    fn pin_right_navigation_past_fill_commits_skipped_digit() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);

        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().pin_digits(), &[1]);
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().pin_digits(), &[1, 2]);

        // Moving left then right again stays within the filled prefix and
        // appends nothing.
        machine.navigate(Direction::Left, DirectionSource::Digital, now);
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().pin_digits(), &[1, 2]);
    }

    #[test]
    fn pin_right_navigation_stops_at_clamp_edge() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);

        for _ in 0..3 {
            machine.navigate(Direction::Right, DirectionSource::Digital, now);
        }
        assert_eq!(machine.focus().pin_digits(), &[1, 2, 3]);
        assert_eq!(machine.focus().pin_index, PIN_LENGTH - 1);

        // Already at the last position: no movement, no fourth digit, no
        // PIN check.
        let clamped = machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(clamped, NavOutcome::default());
        assert_eq!(machine.focus().pin_digits(), &[1, 2, 3]);
        assert_eq!(machine.focus().pin_index, PIN_LENGTH - 1);
        assert!(!machine.unlocked());
    }

    #[test]
    fn select_debounce_swallows_rapid_presses() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);

        assert!(machine.select(now).focus_changed);
        let rapid = machine.select(now + Duration::from_millis(150));
        assert_eq!(rapid, NavOutcome::default());
        assert_eq!(machine.focus().pin_digits(), &[1]);

        let spaced = machine.select(now + SELECT_DEBOUNCE);
        assert!(spaced.focus_changed);
        assert_eq!(machine.focus().pin_digits(), &[1, 2]);
    }

    #[test]
    fn avatar_select_does_not_arm_pin_debounce() {
        let mut machine = machine();
        let now = t0();
        machine.select(now); // toggles profile, no debounce window
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        let outcome = machine.select(now + Duration::from_millis(10));
        assert!(outcome.focus_changed, "pin select lands despite recent avatar select");
    }

    #[test]
    fn wrong_pin_is_rejected_once_and_held_until_reset() {
        let mut machine = machine();
        let mut now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);

        // Build 1-2-3, return to position 0, then select there for a
        // duplicate "1" as the final digit.
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert_eq!(machine.focus().pin_digits(), &[1]);
        for _ in 0..2 {
            now += SELECT_DEBOUNCE;
            machine.select(now);
        }
        assert_eq!(machine.focus().pin_digits(), &[1, 2, 3]);
        now += SELECT_DEBOUNCE;
        machine.navigate(Direction::Left, DirectionSource::Digital, now);
        machine.navigate(Direction::Left, DirectionSource::Digital, now);
        machine.navigate(Direction::Left, DirectionSource::Digital, now);
        let outcome = machine.select(now);
        assert_eq!(machine.focus().pin_digits(), &[1, 2, 3, 1]);
        assert_eq!(outcome.event, Some(NavEvent::PinRejected));
        assert!(!machine.unlocked());

        // Rejected digits stay until the controller resets; further appends
        // are no-ops and the check never re-fires.
        now += SELECT_DEBOUNCE;
        let extra = machine.select(now);
        assert_eq!(extra, NavOutcome::default());
        assert_eq!(machine.focus().pin_digits().len(), PIN_LENGTH);

        machine.reset_pin();
        assert!(machine.focus().pin_digits().is_empty());
        assert_eq!(machine.focus().pin_index, 0);
    }

    #[test]
    fn back_removes_last_digit_and_rearms_check() {
        let mut machine = machine();
        let mut now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        for _ in 0..3 {
            machine.select(now);
            now += SELECT_DEBOUNCE;
        }
        assert_eq!(machine.focus().pin_digits(), &[1, 2, 3]);

        let outcome = machine.back();
        assert!(outcome.focus_changed);
        assert_eq!(machine.focus().pin_digits(), &[1, 2]);
        assert_eq!(machine.focus().pin_index, 2);

        machine.back();
        machine.back();
        assert_eq!(machine.back(), NavOutcome::default());
    }

    #[test]
    fn back_outside_pin_region_is_ignored() {
        let mut machine = machine();
        assert_eq!(machine.back(), NavOutcome::default());
    }

    #[test]
    fn literal_digits_enter_pin_and_unlock() {
        let mut machine = literal_machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);

        for digit in [1, 2, 3] {
            let outcome = machine.enter_digit(digit);
            assert!(outcome.focus_changed);
            assert_eq!(outcome.cue, Some(SoundCue::SelectPin));
        }
        let outcome = machine.enter_digit(4);
        assert_eq!(outcome.event, Some(NavEvent::PinAccepted));
        assert!(machine.unlocked());
    }

    #[test]
    fn literal_digits_ignored_outside_pin_region_or_mode() {
        let mut literal = literal_machine();
        assert_eq!(literal.enter_digit(1), NavOutcome::default());

        let mut positional = machine();
        let now = t0();
        positional.navigate(Direction::Down, DirectionSource::Digital, now);
        assert_eq!(positional.enter_digit(1), NavOutcome::default());
    }

    #[test]
    fn literal_source_disables_positional_entry() {
        let mut machine = literal_machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        assert_eq!(machine.select(now), NavOutcome::default());
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        assert!(machine.focus().pin_digits().is_empty());
    }

    #[test]
    fn unlocked_machine_ignores_all_input() {
        let mut machine = literal_machine();
        let now = t0();
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        for digit in [1, 2, 3, 4] {
            machine.enter_digit(digit);
        }
        assert!(machine.unlocked());

        assert_eq!(
            machine.navigate(Direction::Up, DirectionSource::Digital, now),
            NavOutcome::default()
        );
        assert_eq!(machine.select(now + SELECT_DEBOUNCE), NavOutcome::default());
        assert_eq!(machine.back(), NavOutcome::default());
    }

    #[test]
    fn reset_restores_initial_locked_state() {
        let mut machine = machine();
        let now = t0();
        machine.navigate(Direction::Right, DirectionSource::Digital, now);
        machine.navigate(Direction::Down, DirectionSource::Digital, now);
        machine.select(now);

        machine.reset();
        assert_eq!(machine.focus().region, Region::Avatar);
        assert_eq!(machine.focus().profile, ProfileId::Primary);
        assert!(machine.focus().pin_digits().is_empty());
        assert!(!machine.unlocked());
    }

    #[test]
    fn pin_only_region_list_starts_on_pin() {
        let machine = NavMachine::new(
            [1, 2, 3, 4],
            PinDigitSource::FocusPosition,
            vec![Region::Pin],
            ProfileCatalog::demo(),
        );
        assert_eq!(machine.focus().region, Region::Pin);
    }
}
