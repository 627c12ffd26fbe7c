use serde::{Deserialize, Serialize};

use crate::attributes::Reader;
use crate::error::MetadataError;

/// Attributes shared by every documented component.
///
/// All of them are optional in the raw record. `name` is normally supplied by
/// the catalog key the record is filed under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ComponentStatus,
}

impl Component {
    pub(crate) fn read(reader: &Reader<'_>) -> Result<Self, MetadataError> {
        let status = match reader.optional_str("status")? {
            None => ComponentStatus::default(),
            Some(raw) => {
                ComponentStatus::from_str(raw).ok_or_else(|| MetadataError::InvalidEnum {
                    entity: reader.entity(),
                    attribute: "status".to_string(),
                    allowed: ComponentStatus::ALL.iter().map(|s| s.as_str()).collect(),
                    actual: raw.to_string(),
                })?
            }
        };

        Ok(Self {
            name: reader.optional_str("name")?.map(str::to_string),
            title: reader.optional_str("title")?.map(str::to_string),
            description: reader.optional_str("description")?.map(str::to_string),
            status,
        })
    }

    /// The title to show for this component, falling back to its name.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }
}

/// Maturity of a component.
///
/// - `Beta`: not yet recommended for production environments
/// - `ProdReady`: has passed the project's reliability standards
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComponentStatus {
    #[serde(rename = "beta")]
    Beta,
    #[default]
    #[serde(rename = "prod-ready", alias = "prod_ready")]
    ProdReady,
}

impl ComponentStatus {
    pub const ALL: [Self; 2] = [Self::Beta, Self::ProdReady];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beta => "beta",
            Self::ProdReady => "prod-ready",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "beta" => Some(Self::Beta),
            "prod-ready" | "prod_ready" => Some(Self::ProdReady),
            _ => None,
        }
    }
}
