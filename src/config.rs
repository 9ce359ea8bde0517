// src/config.rs

//! Runtime configuration, loaded from a JSON file.
//!
//! Every field has a default, and a missing or malformed file degrades to
//! the defaults with a warning rather than refusing to start. The defaults
//! reproduce the stock look: blue screen, light gray text, word-paced game
//! output and letter-paced command echo.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, C64_BLUE, C64_LIGHT_BLUE, C64_LIGHT_GRAY};
use crate::pacer::Cadence;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub pacing: PacingConfig,
    pub colors: ColorConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Integer upscale factor; 0 derives the largest that fits the window
    /// bounds.
    pub scale: usize,
    /// Border thickness around the scaled frame, in output pixels.
    pub border: usize,
    /// Darken the last scaled row of each source row.
    pub scanlines: bool,
    pub title: String,
    pub target_fps: usize,
    /// Run without a window even if one could be opened.
    pub headless: bool,
    /// Bounds the derived scale must fit when `scale` is 0. Zero or absent
    /// falls back to a conservative screen-size assumption.
    pub window_width: Option<usize>,
    pub window_height: Option<usize>,
    /// Top-left window position on screen.
    pub position: Option<(isize, isize)>,
    pub borderless: bool,
    pub topmost: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            border: 24,
            scanlines: true,
            title: "FAKETERM".to_string(),
            target_fps: 50,
            headless: false,
            window_width: None,
            window_height: None,
            position: Some((60, 40)),
            borderless: true,
            topmost: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    pub base: f64,
    pub min: f64,
    pub max: f64,
}

impl CadenceConfig {
    pub fn cadence(&self) -> Cadence {
        Cadence {
            base: self.base,
            min: self.min,
            max: self.max,
        }
    }

    fn from_cadence(c: Cadence) -> Self {
        Self {
            base: c.base,
            min: c.min,
            max: c.max,
        }
    }
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self::from_cadence(Cadence::game())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Cadence for interpreter output.
    pub game: CadenceConfig,
    /// Cadence for echoing player commands.
    pub echo: CadenceConfig,
    /// Key clicks and buzzes while typing.
    pub sound: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            game: CadenceConfig::from_cadence(Cadence::game()),
            echo: CadenceConfig::from_cadence(Cadence::echo()),
            sound: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub foreground: Rgb,
    pub background: Rgb,
    pub status_background: Rgb,
    pub border: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            foreground: C64_LIGHT_GRAY,
            background: C64_BLUE,
            status_background: C64_LIGHT_BLUE,
            border: C64_LIGHT_BLUE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Interpreter binary to spawn.
    pub program: String,
    pub args: Vec<String>,
    /// File of commands to play, one per line; `#` lines are comments.
    pub script: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            program: "dfrotz".to_string(),
            args: Vec::new(),
            script: None,
        }
    }
}

impl Config {
    /// Loads from `path`. A missing file is normal and yields the defaults;
    /// a file that exists but does not parse is a warning, not a failure.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(config)) => {
                info!("loaded configuration from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(
                    "ignoring configuration at {}: {e:#}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }
}
