//! Configuration handling

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gradplan_progress::{EngineConfig, SUBJECTS_PER_SEMESTER};
use serde::{Deserialize, Serialize};

/// Main configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding saved progress
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Curriculum JSON document; the built-in catalog when unset
    #[serde(default)]
    pub curriculum: Option<PathBuf>,

    /// Page that share links point to
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            curriculum: None,
            share_base_url: default_share_base_url(),
            log_level: default_log_level(),
            engine: EngineSection::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSection {
    /// Pace assumed by the graduation estimate
    #[serde(default = "default_subjects_per_semester")]
    pub subjects_per_semester: u32,

    /// Max priority recommendations
    #[serde(default = "default_priority_limit")]
    pub priority_limit: usize,

    /// Max other recommendations
    #[serde(default = "default_other_limit")]
    pub other_limit: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            subjects_per_semester: default_subjects_per_semester(),
            priority_limit: default_priority_limit(),
            other_limit: default_other_limit(),
        }
    }
}

impl From<&EngineSection> for EngineConfig {
    fn from(section: &EngineSection) -> Self {
        Self {
            subjects_per_semester: section.subjects_per_semester,
            priority_limit: section.priority_limit,
            other_limit: section.other_limit,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".gradplan")
}
fn default_share_base_url() -> String {
    "http://localhost:8080/".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_subjects_per_semester() -> u32 {
    SUBJECTS_PER_SEMESTER
}
fn default_priority_limit() -> usize {
    4
}
fn default_other_limit() -> usize {
    2
}
