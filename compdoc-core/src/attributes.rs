use serde_json::{Map, Value};

use crate::error::MetadataError;

/// A raw metadata record: attribute name to value, in document order.
pub type Attributes = Map<String, Value>;

/// Typed, error-reporting access to a raw record.
///
/// `null` is treated the same as an absent key, since TOML has no null and a
/// JSON document should not be able to smuggle one past a required check.
pub(crate) struct Reader<'a> {
    entity: &'static str,
    attrs: &'a Attributes,
}

impl<'a> Reader<'a> {
    pub fn new(entity: &'static str, attrs: &'a Attributes) -> Self {
        Self { entity, attrs }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.attrs.get(key).filter(|v| !v.is_null())
    }

    pub fn require(&self, key: &str) -> Result<&'a Value, MetadataError> {
        self.get(key).ok_or_else(|| MetadataError::MissingField {
            entity: self.entity,
            attribute: key.to_string(),
        })
    }

    pub fn require_str(&self, key: &str) -> Result<&'a str, MetadataError> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| self.malformed(key, "a string"))
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>, MetadataError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.malformed(key, "a string")),
        }
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, MetadataError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.malformed(key, "a boolean")),
        }
    }

    pub fn optional_value(&self, key: &str) -> Option<&'a Value> {
        self.get(key)
    }

    pub fn optional_list(&self, key: &str) -> Result<Option<&'a Vec<Value>>, MetadataError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_array()
                .map(Some)
                .ok_or_else(|| self.malformed(key, "a list")),
        }
    }

    pub fn require_str_list(&self, key: &str) -> Result<Vec<String>, MetadataError> {
        let items = self
            .require(key)?
            .as_array()
            .ok_or_else(|| self.malformed(key, "a list of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.malformed(key, "a list of strings"))
            })
            .collect()
    }

    pub fn optional_table(&self, key: &str) -> Result<Option<&'a Attributes>, MetadataError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_object()
                .map(Some)
                .ok_or_else(|| self.malformed(key, "a table")),
        }
    }

    pub fn malformed(&self, key: &str, expected: &'static str) -> MetadataError {
        MetadataError::Malformed {
            entity: self.entity,
            attribute: key.to_string(),
            expected,
        }
    }
}

/// Copy `attrs` with `name` set to the key it was filed under.
///
/// The key wins over any `name` the record carries itself.
pub(crate) fn with_name(attrs: &Attributes, name: &str) -> Attributes {
    let mut merged = attrs.clone();
    merged.insert("name".to_string(), Value::String(name.to_string()));
    merged
}
