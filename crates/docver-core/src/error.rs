use std::path::PathBuf;

use thiserror::Error;

/// Failure to pull a version out of a build descriptor.
///
/// Callers only branch on success or failure; the variant is kept so the
/// diagnostic can say what went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionExtractionError {
    #[error("could not read {}: {message}", path.display())]
    Unreadable {
        path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("malformed build descriptor: {details}")]
    Malformed { details: String },

    #[error("no <version> declaration found")]
    MissingTag,

    #[error("<version> declaration is empty")]
    EmptyValue,
}

impl VersionExtractionError {
    pub fn unreadable(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn malformed<E>(error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Malformed {
            details: error.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read docs config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse docs config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, VersionExtractionError};

    #[test]
    fn unreadable_keeps_kind_and_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let mapped = VersionExtractionError::unreadable("pom.xml", &io_error);

        assert!(matches!(
            mapped,
            VersionExtractionError::Unreadable { kind, ref message, .. }
                if kind == std::io::ErrorKind::NotFound && message.contains("no such file")
        ));
        assert!(mapped.to_string().starts_with("could not read pom.xml"));
    }

    #[test]
    fn missing_tag_display() {
        assert_eq!(
            VersionExtractionError::MissingTag.to_string(),
            "no <version> declaration found"
        );
    }

    #[test]
    fn config_parse_error_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConfigError::Parse {
            path: "docver.json".into(),
            source,
        };

        assert!(error.to_string().contains("docver.json"));
    }
}
