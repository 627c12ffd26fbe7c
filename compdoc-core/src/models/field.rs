use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::attributes::{with_name, Attributes, Reader};
use crate::error::MetadataError;

/// One named attribute of the data a component emits.
///
/// Fields are built from a raw record that already carries its `name` (the
/// key it was filed under is merged in by the parent). A `table` field can
/// describe its own sub-fields, built with the same rule.
///
/// Fields order by name. Names are unique within one collection, so sorting a
/// collection by name is a total order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    examples: Vec<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    fields: IndexMap<String, Field>,
}

impl Field {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, MetadataError> {
        let reader = Reader::new("Field", attrs);

        let name = reader.require_str("name")?.to_string();
        let kind = reader.require_str("type")?.trim().to_string();
        if kind.is_empty() {
            return Err(MetadataError::InvalidFormat {
                entity: "Field",
                attribute: "type".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        let fields = match reader.optional_table("fields")? {
            Some(children) => build_fields(children)?,
            None => IndexMap::new(),
        };

        Ok(Self {
            name,
            kind,
            description: reader.optional_str("description")?.map(str::to_string),
            required: reader.optional_bool("required")?.unwrap_or(false),
            default: reader.optional_value("default").cloned(),
            examples: reader.optional_list("examples")?.cloned().unwrap_or_default(),
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type identifier, e.g. `string`, `int` or `[string]`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn examples(&self) -> &[Value] {
        &self.examples
    }

    /// Nested fields, in document order.
    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    /// Nested fields sorted by name.
    pub fn sorted_fields(&self) -> Vec<&Field> {
        let mut list: Vec<&Field> = self.fields.values().collect();
        list.sort_by(|a, b| Field::cmp_by_name(a, b));
        list
    }

    pub fn cmp_by_name(a: &Field, b: &Field) -> Ordering {
        a.name.cmp(&b.name)
    }
}

/// Build a keyed field collection, merging each key in as the field's `name`.
///
/// Errors are anchored at `fields.<key>` so callers can report the full path.
pub(crate) fn build_fields(table: &Attributes) -> Result<IndexMap<String, Field>, MetadataError> {
    let mut fields = IndexMap::with_capacity(table.len());
    for (name, value) in table {
        let attrs = value.as_object().ok_or_else(|| MetadataError::Malformed {
            entity: "Field",
            attribute: format!("fields.{}", name),
            expected: "a table",
        })?;

        let field = Field::from_attributes(&with_name(attrs, name))
            .map_err(|e| e.nested(name).nested("fields"))?;
        fields.insert(name.clone(), field);
    }
    Ok(fields)
}
