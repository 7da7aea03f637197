use anyhow::{Context, Result, bail};
use freccette_types::InputMode;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_STORAGE_KEY: &str = "freccette_pro_v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub storage_key: String,
    pub default_target: u32,
    pub default_input_mode: InputMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_target: 301,
            default_input_mode: InputMode::Total,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source, falling back to defaults
    /// for unset variables
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let storage_dir = lookup("FRECCETTE_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let storage_key = lookup("FRECCETTE_STORAGE_KEY").unwrap_or(defaults.storage_key);
        if storage_key.trim().is_empty() {
            bail!("FRECCETTE_STORAGE_KEY cannot be empty");
        }

        let default_target = match lookup("FRECCETTE_DEFAULT_TARGET") {
            Some(raw) => parse_target(&raw).context("Invalid FRECCETTE_DEFAULT_TARGET")?,
            None => defaults.default_target,
        };

        let default_input_mode = match lookup("FRECCETTE_DEFAULT_INPUT_MODE") {
            Some(raw) => parse_input_mode(&raw).context("Invalid FRECCETTE_DEFAULT_INPUT_MODE")?,
            None => defaults.default_input_mode,
        };

        Ok(Self {
            storage_dir,
            storage_key,
            default_target,
            default_input_mode,
        })
    }
}

fn parse_target(raw: &str) -> Result<u32> {
    let target: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{raw:?} is not a number"))?;
    if target == 0 {
        bail!("target score must be positive");
    }
    Ok(target)
}

fn parse_input_mode(raw: &str) -> Result<InputMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "total" => Ok(InputMode::Total),
        "granular" => Ok(InputMode::Granular),
        other => bail!("unknown input mode {other:?}, expected total or granular"),
    }
}
