use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use shell::ButtonId;
use thiserror::Error;
use tracing::info;

use super::nav::{Region, SoundCue, PIN_LENGTH, REGION_ORDER};

/// Environment variable naming an optional JSON options file. When unset
/// the built-in defaults apply.
pub const OPTIONS_ENV_VAR: &str = "LOCKSHELL_OPTIONS";

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options JSON at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid options field '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
    #[error(transparent)]
    Button(#[from] shell::InputError),
}

/// How digits reach the PIN entry.
///
/// `FocusPosition` is the pad scheme: selecting with the cursor on pad
/// position N enters the digit N+1. `LiteralKeys` takes digits from the
/// keyboard number row instead and turns pad selects into no-ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinDigitSource {
    #[default]
    FocusPosition,
    LiteralKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CueNames {
    pub nav: String,
    pub select_pin: String,
    pub select_confirm: String,
}

impl Default for CueNames {
    fn default() -> Self {
        Self {
            nav: "nav".to_string(),
            select_pin: "select-pin".to_string(),
            select_confirm: "select-confirm".to_string(),
        }
    }
}

/// Raw on-disk options shape. Every field is optional in the file; the
/// defaults reproduce the stock demo behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ShellOptions {
    pub pin_target: String,
    pub pin_digit_source: PinDigitSource,
    pub regions: Vec<String>,
    pub select_button: String,
    pub back_button: String,
    pub rumble_on_select: bool,
    pub cues: CueNames,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            pin_target: "1234".to_string(),
            pin_digit_source: PinDigitSource::FocusPosition,
            regions: vec![
                "avatar".to_string(),
                "pin".to_string(),
                "games".to_string(),
            ],
            select_button: "a".to_string(),
            back_button: "b".to_string(),
            rumble_on_select: true,
            cues: CueNames::default(),
        }
    }
}

impl ShellOptions {
    pub fn load_from_env() -> Result<Self, OptionsError> {
        match std::env::var(OPTIONS_ENV_VAR) {
            Ok(path) => {
                info!(path = %path, "loading_options_file");
                Self::load_from_file(Path::new(&path))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let raw = fs::read_to_string(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_options_json(&raw)
    }

    /// Validates and converts raw strings into typed values the rest of
    /// the app consumes.
    pub fn resolve(&self) -> Result<ResolvedOptions, OptionsError> {
        Ok(ResolvedOptions {
            pin_target: resolve_pin_target(&self.pin_target)?,
            digit_source: self.pin_digit_source,
            regions: resolve_regions(&self.regions)?,
            select_button: ButtonId::from_name(&self.select_button)?,
            back_button: ButtonId::from_name(&self.back_button)?,
            rumble_on_select: self.rumble_on_select,
            cues: self.cues.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub pin_target: [u8; PIN_LENGTH],
    pub digit_source: PinDigitSource,
    pub regions: Vec<Region>,
    pub select_button: ButtonId,
    pub back_button: ButtonId,
    pub rumble_on_select: bool,
    pub cues: CueNames,
}

impl ResolvedOptions {
    pub fn cue_name(&self, cue: SoundCue) -> &str {
        match cue {
            SoundCue::Nav => &self.cues.nav,
            SoundCue::SelectPin => &self.cues.select_pin,
            SoundCue::SelectConfirm => &self.cues.select_confirm,
        }
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            pin_target: [1, 2, 3, 4],
            digit_source: PinDigitSource::FocusPosition,
            regions: REGION_ORDER.to_vec(),
            select_button: ButtonId::A,
            back_button: ButtonId::B,
            rumble_on_select: true,
            cues: CueNames::default(),
        }
    }
}

fn parse_options_json(raw: &str) -> Result<ShellOptions, OptionsError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, ShellOptions>(&mut deserializer) {
        Ok(options) => Ok(options),
        Err(error) => {
            let path = error.path().to_string();
            let path = if path.is_empty() || path == "." {
                "document root".to_string()
            } else {
                path
            };
            let source = error.into_inner();
            Err(OptionsError::Parse { path, source })
        }
    }
}

fn resolve_pin_target(raw: &str) -> Result<[u8; PIN_LENGTH], OptionsError> {
    let digits: Vec<u8> = raw
        .chars()
        .map(|ch| ch.to_digit(10).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| OptionsError::Invalid {
            field: "pin_target",
            message: format!("'{raw}' contains a non-digit character"),
        })?;
    digits
        .try_into()
        .map_err(|_| OptionsError::Invalid {
            field: "pin_target",
            message: format!("expected exactly {PIN_LENGTH} digits, got {}", raw.len()),
        })
}

fn resolve_regions(raw: &[String]) -> Result<Vec<Region>, OptionsError> {
    let mut regions = Vec::new();
    for name in raw {
        let region = match name.as_str() {
            "avatar" => Region::Avatar,
            "pin" => Region::Pin,
            "games" => Region::Games,
            other => {
                return Err(OptionsError::Invalid {
                    field: "regions",
                    message: format!("unknown region '{other}'"),
                })
            }
        };
        if regions.contains(&region) {
            return Err(OptionsError::Invalid {
                field: "regions",
                message: format!("region '{name}' listed twice"),
            });
        }
        regions.push(region);
    }
    if !regions.contains(&Region::Pin) {
        return Err(OptionsError::Invalid {
            field: "regions",
            message: "the 'pin' region is required".to_string(),
        });
    }
    // Vertical order is fixed; the file only chooses which regions exist.
    Ok(REGION_ORDER
        .iter()
        .copied()
        .filter(|region| regions.contains(region))
        .collect())
}
