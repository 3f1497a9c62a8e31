use serde::{Deserialize, Serialize};

use crate::version::{VersionInfo, versions_match};

/// A `[directory, label]` pair in the version switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry(pub String, pub String);

impl VersionEntry {
    #[must_use]
    pub fn new(dir: impl Into<String>, label: impl Into<String>) -> Self {
        Self(dir.into(), label.into())
    }

    #[must_use]
    pub fn dir(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.1
    }

    fn matches(&self, info: &VersionInfo) -> bool {
        versions_match(self.dir(), info.full())
    }
}

/// Listing served to the docs theme as `versionscallback(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsData {
    #[serde(default)]
    pub development: Vec<VersionEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<VersionEntry>,

    #[serde(default)]
    pub older: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    Development,
    Current,
    Older,
    Unlisted,
}

impl VersionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Current => "current",
            Self::Older => "older",
            Self::Unlisted => "unlisted",
        }
    }
}

impl VersionsData {
    /// JSONP payload consumed by the version switcher script.
    ///
    /// # Errors
    /// Returns an error if the listing cannot be serialized.
    pub fn jsonp(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("versionscallback({json});"))
    }

    /// Where the resolved version sits in the listing, with its entry.
    ///
    /// Entries are matched on their directory against the full version,
    /// checking development first, then current, then older.
    #[must_use]
    pub fn find(&self, info: &VersionInfo) -> Option<(VersionStatus, &VersionEntry)> {
        let development = self
            .development
            .iter()
            .find(|entry| entry.matches(info))
            .map(|entry| (VersionStatus::Development, entry));

        development
            .or_else(|| {
                self.current
                    .as_ref()
                    .filter(|entry| entry.matches(info))
                    .map(|entry| (VersionStatus::Current, entry))
            })
            .or_else(|| {
                self.older
                    .iter()
                    .find(|entry| entry.matches(info))
                    .map(|entry| (VersionStatus::Older, entry))
            })
    }

    #[must_use]
    pub fn status_of(&self, info: &VersionInfo) -> VersionStatus {
        self.find(info)
            .map_or(VersionStatus::Unlisted, |(status, _)| status)
    }
}

impl Default for VersionsData {
    fn default() -> Self {
        Self {
            development: vec![VersionEntry::new("0.9.10-SNAPSHOT", "0.9.10")],
            current: Some(VersionEntry::new("0.9.9", "0.9.9")),
            older: vec![VersionEntry::new("0.9.8", "0.9.8")],
        }
    }
}
