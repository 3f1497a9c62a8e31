use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::version::DEFAULT_SUFFIX_MARKER;
use crate::versions_index::VersionsData;

/// Settings for one documentation build.
///
/// Loaded once and handed around by reference; command-line overrides are
/// applied through the consuming `with_*` methods before the build starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_project")]
    pub project: String,

    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,

    #[serde(default = "default_copyright_start_year")]
    pub copyright_start_year: i32,

    #[serde(default = "default_descriptor")]
    pub descriptor: PathBuf,

    #[serde(default = "default_suffix_marker")]
    pub suffix_marker: String,

    #[serde(default)]
    pub versions_url: Option<String>,

    #[serde(default)]
    pub versions_data: VersionsData,

    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_project() -> String {
    "Coopr".to_string()
}

fn default_copyright_holder() -> String {
    "Cask Data, Inc.".to_string()
}

fn default_copyright_start_year() -> i32 {
    2014
}

fn default_descriptor() -> PathBuf {
    PathBuf::from("../../../pom.xml")
}

fn default_suffix_marker() -> String {
    DEFAULT_SUFFIX_MARKER.to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            copyright_holder: default_copyright_holder(),
            copyright_start_year: default_copyright_start_year(),
            descriptor: default_descriptor(),
            suffix_marker: default_suffix_marker(),
            versions_url: None,
            versions_data: VersionsData::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl DocsConfig {
    /// Loads settings from a JSON file.
    ///
    /// A missing file yields the defaults. Relative paths inside the file
    /// resolve against the file's directory.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let base_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str::<Self>(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No docs config at {}, using defaults", path.display());
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        config.base_dir = base_dir;
        Ok(config)
    }

    /// Overrides the descriptor with a path relative to the working directory.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: PathBuf) -> Self {
        self.descriptor = descriptor;
        self.base_dir = PathBuf::from(".");
        self
    }

    #[must_use]
    pub fn with_suffix_marker(mut self, marker: impl Into<String>) -> Self {
        self.suffix_marker = marker.into();
        self
    }

    #[must_use]
    pub fn descriptor_path(&self) -> PathBuf {
        if self.descriptor.is_absolute() {
            self.descriptor.clone()
        } else {
            self.base_dir.join(&self.descriptor)
        }
    }

    /// URL of the versions script; derived from the project name unless set.
    #[must_use]
    pub fn versions_url(&self) -> String {
        self.versions_url.clone().unwrap_or_else(|| {
            format!(
                "http://docs.cask.co/{}/json-versions.js",
                self.project.to_lowercase()
            )
        })
    }

    /// File name the versions script is published under.
    #[must_use]
    pub fn versions_file_name(&self) -> Option<String> {
        self.versions_url()
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}
