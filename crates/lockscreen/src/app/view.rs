use tracing::{debug, info};

use super::nav::{FocusState, Region, PIN_LENGTH};
use super::profiles::{ProfileCatalog, ProfileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDot {
    Empty,
    Filled,
    Focused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub name: Option<String>,
    pub focused: bool,
}

/// Everything a renderer needs for one lockscreen frame, derived from
/// focus state alone. Building this never mutates anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub profile: ProfileId,
    pub profile_name: String,
    pub avatar_focused: bool,
    pub pin_dots: [PinDot; PIN_LENGTH],
    pub tiles: Vec<TileView>,
}

pub fn project(focus: &FocusState, catalog: &ProfileCatalog) -> RenderModel {
    let profile = catalog.profile(focus.profile);
    let filled = focus.pin_digits().len();

    let mut pin_dots = [PinDot::Empty; PIN_LENGTH];
    for (index, dot) in pin_dots.iter_mut().enumerate() {
        if focus.region == Region::Pin && index == focus.pin_index {
            *dot = PinDot::Focused;
        } else if index < filled {
            *dot = PinDot::Filled;
        }
    }

    let tiles = profile
        .tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| TileView {
            name: tile.as_ref().map(|t| t.name.clone()),
            focused: focus.region == Region::Games && index == focus.game_index,
        })
        .collect();

    RenderModel {
        profile: focus.profile,
        profile_name: profile.display_name.clone(),
        avatar_focused: focus.region == Region::Avatar,
        pin_dots,
        tiles,
    }
}

/// Output side of the lockscreen. The controller drives this once per
/// change; implementations decide what "render" and "sound" mean.
pub trait Presenter {
    fn apply(&mut self, model: &RenderModel);

    fn play_cue(&mut self, cue_name: &str);

    fn tile_selected(&mut self, index: usize, download: bool);

    fn show_pin_error(&mut self);

    fn unlock(&mut self);
}

/// Headless presenter that narrates through tracing. Stands in for the
/// real renderer in the demo binary.
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn apply(&mut self, model: &RenderModel) {
        let focused_tile = model.tiles.iter().position(|tile| tile.focused);
        debug!(
            profile = %model.profile_name,
            avatar_focused = model.avatar_focused,
            pin_filled = model
                .pin_dots
                .iter()
                .filter(|dot| **dot == PinDot::Filled)
                .count(),
            focused_tile = ?focused_tile,
            "focus_applied"
        );
    }

    fn play_cue(&mut self, cue_name: &str) {
        debug!(cue = cue_name, "sound_cue");
    }

    fn tile_selected(&mut self, index: usize, download: bool) {
        info!(index, download, "tile_activated");
    }

    fn show_pin_error(&mut self) {
        info!("pin_error_shown");
    }

    fn unlock(&mut self) {
        info!("lockscreen_dismissed");
    }
}
