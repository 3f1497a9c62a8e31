use semver::Version;
use std::fmt;

/// Suffix Maven puts on in-development versions.
pub const DEFAULT_SUFFIX_MARKER: &str = "-SNAPSHOT";

/// A version scraped from a build descriptor, in its full and release forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionInfo {
    full: String,
    release: String,
}

impl VersionInfo {
    /// Builds both forms from the declared version.
    ///
    /// `release` is `full` with `marker` removed when `full` ends with it,
    /// otherwise the two are identical.
    #[must_use]
    pub fn from_full(full: impl Into<String>, marker: &str) -> Self {
        let full = full.into();
        let release = if marker.is_empty() {
            full.clone()
        } else {
            full.strip_suffix(marker).unwrap_or(&full).to_string()
        };
        Self { full, release }
    }

    #[must_use]
    pub fn full(&self) -> &str {
        &self.full
    }

    #[must_use]
    pub fn release(&self) -> &str {
        &self.release
    }

    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.full != self.release
    }

    /// One-line summary printed at the start of a docs build.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_prerelease() {
            format!("SDK Version: {} ({})", self.release, self.full)
        } else {
            format!("SDK Version: {}", self.full)
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Compares two version strings, semantically when both parse.
#[must_use]
pub fn versions_match(a: &str, b: &str) -> bool {
    match (parse_semver(a), parse_semver(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

pub(crate) fn parse_semver(version: &str) -> Option<Version> {
    let version = version.trim();
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }

    let (core, suffix) = split_core_and_suffix(version);
    let mut parts = core.split('.');
    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = parts.next().and_then(|part| part.parse::<u64>().ok());
    let patch = parts.next().and_then(|part| part.parse::<u64>().ok());

    if parts.next().is_some() {
        return None;
    }

    let normalized = match (minor, patch) {
        (None, None) => format!("{major}.0.0{suffix}"),
        (Some(minor), None) => format!("{major}.{minor}.0{suffix}"),
        (Some(minor), Some(patch)) => format!("{major}.{minor}.{patch}{suffix}"),
        (None, Some(_)) => return None,
    };

    Version::parse(&normalized).ok()
}

fn split_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}
