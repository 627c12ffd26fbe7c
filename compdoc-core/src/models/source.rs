use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::component::Component;
use super::field::{build_fields, Field};
use crate::attributes::{Attributes, Reader};
use crate::error::MetadataError;

/// A component that ingests data into the pipeline.
///
/// A `Source` only exists in a valid state: [`Source::from_attributes`] checks
/// every invariant up front and nothing can change afterwards.
///
/// # Invariants
/// - `delivery_guarantee` is one of [`DeliveryGuarantee::ALL`].
/// - `through_description`, trimmed, does not end with a period. Generated
///   docs append their own.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    #[serde(flatten)]
    component: Component,
    delivery_guarantee: DeliveryGuarantee,
    output_types: Vec<String>,
    through_description: String,
    fields: IndexMap<String, Field>,
    #[serde(skip)]
    fields_list: OnceLock<Vec<Field>>,
}

impl Source {
    pub const REQUIRED: [&'static str; 3] =
        ["delivery_guarantee", "output_types", "through_description"];

    /// Validate a raw record and build a source from it.
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, MetadataError> {
        let reader = Reader::new("Source", attrs);

        for key in Self::REQUIRED {
            reader.require(key)?;
        }

        let component = Component::read(&reader)?;
        let raw_guarantee = reader.require_str("delivery_guarantee")?;
        let output_types = reader.require_str_list("output_types")?;
        let through_description = reader.require_str("through_description")?.to_string();

        let fields = match reader.optional_table("fields")? {
            Some(table) => build_fields(table)?,
            None => IndexMap::new(),
        };

        let delivery_guarantee = DeliveryGuarantee::from_str(raw_guarantee)
            .ok_or_else(|| MetadataError::InvalidEnum {
                entity: "Source",
                attribute: "delivery_guarantee".to_string(),
                allowed: DeliveryGuarantee::ALL.iter().map(|g| g.as_str()).collect(),
                actual: raw_guarantee.to_string(),
            })?;

        if through_description.trim().ends_with('.') {
            return Err(MetadataError::InvalidFormat {
                entity: "Source",
                attribute: "through_description".to_string(),
                reason: "cannot end with a period".to_string(),
            });
        }

        Ok(Self {
            component,
            delivery_guarantee,
            output_types,
            through_description,
            fields,
            fields_list: OnceLock::new(),
        })
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn name(&self) -> Option<&str> {
        self.component.name.as_deref()
    }

    pub fn delivery_guarantee(&self) -> DeliveryGuarantee {
        self.delivery_guarantee
    }

    pub fn output_types(&self) -> &[String] {
        &self.output_types
    }

    pub fn through_description(&self) -> &str {
        &self.through_description
    }

    /// Fields keyed by name, in document order.
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Every field sorted by name. Computed on first use, then cached.
    pub fn fields_list(&self) -> &[Field] {
        self.fields_list.get_or_init(|| {
            let mut list: Vec<Field> = self.fields.values().cloned().collect();
            list.sort_by(Field::cmp_by_name);
            list
        })
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component
            && self.delivery_guarantee == other.delivery_guarantee
            && self.output_types == other.output_types
            && self.through_description == other.through_description
            && self.fields == other.fields
    }
}

/// Whether a component can lose data when something fails.
///
/// - `AtLeastOnce`: every event is delivered, possibly more than once
/// - `BestEffort`: delivery is attempted, and in rare cases data can be lost
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryGuarantee {
    AtLeastOnce,
    BestEffort,
}

impl DeliveryGuarantee {
    pub const ALL: [Self; 2] = [Self::AtLeastOnce, Self::BestEffort];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtLeastOnce => "at_least_once",
            Self::BestEffort => "best_effort",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "at_least_once" => Some(Self::AtLeastOnce),
            "best_effort" => Some(Self::BestEffort),
            _ => None,
        }
    }
}
