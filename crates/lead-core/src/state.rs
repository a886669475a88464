//! Form State
//!
//! Current value of every schema key. Entries are created once from the
//! schema and replaced one at a time; no key is ever removed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::schema::FormSchema;

/// Stored value of one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Multi(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            FieldValue::Multi(v) => Some(v),
            FieldValue::Text(_) => None,
        }
    }

    fn same_shape(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (FieldValue::Text(_), FieldValue::Text(_)) | (FieldValue::Multi(_), FieldValue::Multi(_))
        )
    }
}

/// Mapping from field name to current value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
}

impl FormState {
    /// Initial state: empty scalars, empty selections, auxiliary literals
    pub fn from_schema(schema: &FormSchema) -> Self {
        let visible = schema.fields().iter().map(|f| {
            let value = if f.is_multi_select() {
                FieldValue::Multi(Vec::new())
            } else {
                FieldValue::Text(String::new())
            };
            (f.name.clone(), value)
        });
        let auxiliary = schema
            .auxiliary()
            .iter()
            .map(|a| (a.name.clone(), FieldValue::Text(a.value.clone())));

        Self {
            values: visible.chain(auxiliary).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Scalar value, or `""` for unknown and multi-valued keys
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or_default()
    }

    /// Selection, or empty for unknown and scalar keys
    pub fn selection(&self, name: &str) -> &[String] {
        self.get(name).and_then(FieldValue::as_multi).unwrap_or_default()
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.get(name).is_none_or(FieldValue::is_empty)
    }

    /// Replace an existing entry; the new value must keep the entry's shape
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.into()))?;

        if !slot.same_shape(&value) {
            return Err(FormError::ValueShape(name.into()));
        }

        *slot = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_present() {
        let schema = FormSchema::landing_page();
        let state = FormState::from_schema(&schema);

        assert_eq!(state.len(), schema.fields().len() + schema.auxiliary().len());
        assert_eq!(state.get("features"), Some(&FieldValue::Multi(Vec::new())));
        assert_eq!(state.text("email"), "");
        assert_eq!(state.text("type"), "Prospect");
        assert_eq!(state.text("hs_lead_status"), "");
    }

    #[test]
    fn test_set_keeps_shape() {
        let schema = FormSchema::landing_page();
        let mut state = FormState::from_schema(&schema);

        state.set("email", FieldValue::Text("a@b.co".into())).unwrap();
        assert_eq!(state.text("email"), "a@b.co");

        let err = state.set("features", FieldValue::Text("Polls".into()));
        assert!(matches!(err, Err(FormError::ValueShape(_))));

        let err = state.set("nickname", FieldValue::Text("x".into()));
        assert!(matches!(err, Err(FormError::UnknownField(_))));
    }
}
