use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a metadata record could not become a model value.
///
/// `attribute` is a dotted path from the record root, so a problem inside a
/// nested field reads `fields.host.type`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("{entity} is missing required attribute `{attribute}`")]
    MissingField {
        entity: &'static str,
        attribute: String,
    },

    #[error("{entity}#{attribute} must be one of: {allowed:?}, got {actual:?}")]
    InvalidEnum {
        entity: &'static str,
        attribute: String,
        allowed: Vec<&'static str>,
        actual: String,
    },

    #[error("{entity}#{attribute} {reason}")]
    InvalidFormat {
        entity: &'static str,
        attribute: String,
        reason: String,
    },

    #[error("{entity}#{attribute} is malformed: expected {expected}")]
    Malformed {
        entity: &'static str,
        attribute: String,
        expected: &'static str,
    },
}

impl MetadataError {
    /// The dotted path of the attribute at fault.
    pub fn attribute(&self) -> &str {
        match self {
            Self::MissingField { attribute, .. }
            | Self::InvalidEnum { attribute, .. }
            | Self::InvalidFormat { attribute, .. }
            | Self::Malformed { attribute, .. } => attribute,
        }
    }

    /// Re-anchor the error under `prefix`, e.g. `type` becomes `fields.host.type`.
    pub(crate) fn nested(mut self, prefix: &str) -> Self {
        match &mut self {
            Self::MissingField { attribute, .. }
            | Self::InvalidEnum { attribute, .. }
            | Self::InvalidFormat { attribute, .. }
            | Self::Malformed { attribute, .. } => {
                *attribute = format!("{}.{}", prefix, attribute);
            }
        }
        self
    }
}

/// Why a single source entry was rejected while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("already defined in {}", .0.display())]
    Duplicate(PathBuf),

    #[error("expected a table of attributes")]
    NotATable,
}

/// One rejected source, with the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub path: PathBuf,
    pub name: String,
    pub reason: FailureReason,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: sources.{}: {}",
            self.path.display(),
            self.name,
            self.reason
        )
    }
}

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported metadata document {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{} invalid source(s)", .0.len())]
    Invalid(Vec<SourceFailure>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_enum_message_lists_allowed_values() {
        let err = MetadataError::InvalidEnum {
            entity: "Source",
            attribute: "delivery_guarantee".to_string(),
            allowed: vec!["at_least_once", "best_effort"],
            actual: "sometimes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"Source#delivery_guarantee must be one of: ["at_least_once", "best_effort"], got "sometimes""#
        );
    }

    #[test]
    fn nested_prefixes_the_attribute_path() {
        let err = MetadataError::MissingField {
            entity: "Field",
            attribute: "type".to_string(),
        }
        .nested("host")
        .nested("fields");
        assert_eq!(err.attribute(), "fields.host.type");
        assert_eq!(
            err.to_string(),
            "Field is missing required attribute `fields.host.type`"
        );
    }

    #[test]
    fn source_failure_names_document_and_source() {
        let failure = SourceFailure {
            path: PathBuf::from("meta/http.toml"),
            name: "http".to_string(),
            reason: FailureReason::Duplicate(PathBuf::from("meta/a.toml")),
        };
        assert_eq!(
            failure.to_string(),
            "meta/http.toml: sources.http: already defined in meta/a.toml"
        );
    }
}
