use anyhow::{Context, Result};
use directories::ProjectDirs;
use knuffel::Decode;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dwt::DEFAULT_SECTION_MARGIN;

pub const DEFAULT_LEVEL: i32 = 4;

#[derive(Decode, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RippleConfig {
    #[knuffel(child)]
    pub dwt: Option<DwtConfig>,
    #[knuffel(child)]
    pub peaks: Option<PeaksConfig>,
    #[knuffel(child)]
    pub filter: Option<FilterConfig>,
}

#[derive(Decode, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwtConfig {
    #[knuffel(property, default = DEFAULT_LEVEL)]
    pub level: i32,
    #[knuffel(property(name = "section-margin"), default = DEFAULT_SECTION_MARGIN)]
    pub section_margin: usize,
    #[knuffel(property, default)]
    pub downsample: bool,
}

#[derive(Decode, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeaksConfig {
    #[knuffel(property, default)]
    pub fraction: f64,
    #[knuffel(property, default)]
    pub separation: usize,
}

/// Pre-filtering applied before peak detection. Zero disables a stage.
#[derive(Decode, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[knuffel(property, default)]
    pub alpha: f64,
    #[knuffel(property, default)]
    pub cutoff: f64,
}

impl Default for DwtConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            section_margin: DEFAULT_SECTION_MARGIN,
            downsample: false,
        }
    }
}

impl RippleConfig {
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let config = knuffel::parse(name, content)?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Loads `path` if given, otherwise the per-user config file if it
    /// exists, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            info!("Loading config from {}", path.display());
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn dwt(&self) -> DwtConfig {
        self.dwt.clone().unwrap_or_default()
    }

    pub fn peaks(&self) -> PeaksConfig {
        self.peaks.clone().unwrap_or_default()
    }

    pub fn filter(&self) -> FilterConfig {
        self.filter.clone().unwrap_or_default()
    }
}

pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "ripple", "ripple").map(|dirs| dirs.config_dir().join("config.kdl"))
}
