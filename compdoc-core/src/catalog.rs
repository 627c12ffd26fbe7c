//! Loading every source of a documentation build.
//!
//! A metadata document is a TOML or JSON table with a `sources` table whose
//! keys are source names:
//!
//! ```toml
//! [sources.stdin]
//! title = "STDIN"
//! delivery_guarantee = "at_least_once"
//! output_types = ["log"]
//! through_description = "standard input (STDIN)"
//!
//! [sources.stdin.fields.max_length]
//! type = "int"
//! ```
//!
//! Loading keeps going after a bad source so that one run reports every
//! problem in the tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::attributes::{with_name, Attributes};
use crate::error::{CatalogError, FailureReason, SourceFailure};
use crate::models::Source;

/// Document formats the catalog can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(&self, text: &str) -> Result<Attributes, String> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// The validated sources of one documentation build, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sources: BTreeMap<String, Source>,
}

impl Catalog {
    /// Load a single document, or every `.toml`/`.json` document under a
    /// directory.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file or directory",
                ),
            });
        }

        let documents = if path.is_dir() {
            let mut found = Vec::new();
            collect_documents(path, &mut found)?;
            found.sort();
            found
        } else {
            if DocumentFormat::from_path(path).is_none() {
                return Err(CatalogError::UnsupportedFormat(path.to_path_buf()));
            }
            vec![path.to_path_buf()]
        };

        tracing::debug!(
            "Loading {} metadata document(s) from {}",
            documents.len(),
            path.display()
        );

        let mut builder = CatalogBuilder::default();
        for document in &documents {
            let format = DocumentFormat::from_path(document)
                .ok_or_else(|| CatalogError::UnsupportedFormat(document.clone()))?;
            let text = fs::read_to_string(document).map_err(|source| CatalogError::Io {
                path: document.clone(),
                source,
            })?;
            builder.add_document(document, format, &text)?;
        }
        builder.finish()
    }

    /// Build a catalog from one in-memory document. `origin` only labels errors.
    pub fn from_document(
        origin: &Path,
        format: DocumentFormat,
        text: &str,
    ) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::default();
        builder.add_document(origin, format, text)?;
        builder.finish()
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(Default)]
struct CatalogBuilder {
    sources: BTreeMap<String, Source>,
    origins: BTreeMap<String, PathBuf>,
    failures: Vec<SourceFailure>,
}

impl CatalogBuilder {
    fn add_document(
        &mut self,
        path: &Path,
        format: DocumentFormat,
        text: &str,
    ) -> Result<(), CatalogError> {
        let document = format.parse(text).map_err(|message| CatalogError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        let Some(entries) = document.get("sources") else {
            tracing::debug!("{} declares no sources", path.display());
            return Ok(());
        };
        let entries = entries.as_object().ok_or_else(|| CatalogError::Parse {
            path: path.to_path_buf(),
            message: "`sources` must be a table".to_string(),
        })?;

        for (name, value) in entries {
            // The first document to name a source owns it, valid or not.
            let reason = if let Some(origin) = self.origins.get(name) {
                Some(FailureReason::Duplicate(origin.clone()))
            } else {
                self.origins.insert(name.clone(), path.to_path_buf());
                match value.as_object() {
                    None => Some(FailureReason::NotATable),
                    Some(attrs) => match Source::from_attributes(&with_name(attrs, name)) {
                        Ok(source) => {
                            tracing::debug!("Loaded source {}", name);
                            self.sources.insert(name.clone(), source);
                            None
                        }
                        Err(e) => Some(FailureReason::Metadata(e)),
                    },
                }
            };

            if let Some(reason) = reason {
                tracing::warn!("Rejected source {} in {}: {}", name, path.display(), reason);
                self.failures.push(SourceFailure {
                    path: path.to_path_buf(),
                    name: name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Catalog, CatalogError> {
        if !self.failures.is_empty() {
            return Err(CatalogError::Invalid(self.failures));
        }
        Ok(Catalog {
            sources: self.sources,
        })
    }
}

fn collect_documents(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), CatalogError> {
    let io_err = |source: std::io::Error| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks, so links are never walked.
        let file_type = entry.file_type().map_err(io_err)?;
        if file_type.is_symlink() {
            tracing::debug!("Skipping symlink {}", path.display());
        } else if file_type.is_dir() {
            collect_documents(&path, found)?;
        } else if file_type.is_file() && DocumentFormat::from_path(&path).is_some() {
            found.push(path);
        }
    }
    Ok(())
}
