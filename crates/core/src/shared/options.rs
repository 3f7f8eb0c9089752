use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alignment::domain::fuzzy_aligner::GroupingSource;
use crate::playback::domain::transition::AutoScroll;

use super::constants::{
    DEFAULT_ALIGNMENT_FUZZINESS, DEFAULT_TIME_OFFSET, OPTIONS_DIR_NAME, OPTIONS_FILE_NAME,
};

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("failed to read options from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write options to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tracer configuration. Keys are camelCase in JSON and every key is optional.
///
/// A block or phrase selector being present means the transcript supplies its own
/// containers at that level; otherwise grouping follows the caption cues and lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TracerOptions {
    pub block_selector: Option<String>,
    pub phrase_selector: Option<String>,
    pub alignment_fuzziness: usize,
    pub time_offset: f64,
    pub auto_scroll: AutoScroll,
    pub clickable: bool,
}

impl Default for TracerOptions {
    fn default() -> Self {
        Self {
            block_selector: None,
            phrase_selector: None,
            alignment_fuzziness: DEFAULT_ALIGNMENT_FUZZINESS,
            time_offset: DEFAULT_TIME_OFFSET,
            auto_scroll: AutoScroll::Off,
            clickable: false,
        }
    }
}

impl TracerOptions {
    pub fn block_grouping(&self) -> GroupingSource {
        grouping(self.block_selector.as_deref())
    }

    pub fn phrase_grouping(&self) -> GroupingSource {
        grouping(self.phrase_selector.as_deref())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(OPTIONS_DIR_NAME).join(OPTIONS_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let json = fs::read_to_string(path).map_err(|e| OptionsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| OptionsError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Options from the per-user config file, or defaults if it is missing or invalid.
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring options file: {e}");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), OptionsError> {
        let write_err = |e: std::io::Error| OptionsError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| OptionsError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(write_err)
    }
}

fn grouping(selector: Option<&str>) -> GroupingSource {
    match selector {
        Some(_) => GroupingSource::Transcript,
        None => GroupingSource::Captions,
    }
}
