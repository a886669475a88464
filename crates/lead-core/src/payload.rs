//! Submission Payload
//!
//! Normalized record handed to the submission sink: one entry per visible
//! field in schema order, followed by the auxiliary fields.

use serde::{Deserialize, Serialize};

use crate::schema::{FieldType, FormSchema};
use crate::state::{FieldValue, FormState};

/// Separator used when flattening multi-select values
pub const MULTI_VALUE_SEPARATOR: &str = ", ";

/// Submitted value after coercion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Integer(i64),
    Text(String),
}

/// One submitted field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadField {
    pub object_type_id: String,
    pub name: String,
    pub value: PayloadValue,
}

/// Everything the sink receives on submit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub fields: Vec<PayloadField>,

    /// Page the form was submitted from
    pub page_name: String,
}

impl SubmissionPayload {
    /// Build from the current state, coercing per field type
    pub fn build(schema: &FormSchema, state: &FormState, page_name: impl Into<String>) -> Self {
        let visible = schema.fields().iter().map(|field| {
            let value = match (field.field_type, state.get(&field.name)) {
                (FieldType::Integer, Some(FieldValue::Text(raw))) => coerce_integer(&field.name, raw),
                (_, Some(FieldValue::Multi(values))) => {
                    PayloadValue::Text(values.join(MULTI_VALUE_SEPARATOR))
                }
                (_, Some(FieldValue::Text(text))) => PayloadValue::Text(text.clone()),
                (_, None) => PayloadValue::Text(String::new()),
            };
            PayloadField {
                object_type_id: field.object_type_id.clone(),
                name: field.name.clone(),
                value,
            }
        });

        let auxiliary = schema.auxiliary().iter().map(|aux| PayloadField {
            object_type_id: aux.object_type_id.clone(),
            name: aux.name.clone(),
            value: PayloadValue::Text(state.text(&aux.name).to_string()),
        });

        Self {
            fields: visible.chain(auxiliary).collect(),
            page_name: page_name.into(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn coerce_integer(name: &str, raw: &str) -> PayloadValue {
    match raw.parse::<i64>() {
        Ok(n) => PayloadValue::Integer(n),
        Err(e) => {
            tracing::warn!(field = name, value = raw, "Integer coercion failed, sending text: {}", e);
            PayloadValue::Text(raw.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_coerces_values() {
        let schema = FormSchema::landing_page();
        let mut state = FormState::from_schema(&schema);
        state.set("followers", FieldValue::Text("250000".into())).unwrap();
        state
            .set("features", FieldValue::Multi(vec!["Polls".into(), "Ad Network".into()]))
            .unwrap();

        let payload = SubmissionPayload::build(&schema, &state, "/");

        assert_eq!(payload.fields.len(), 14);
        assert_eq!(payload.get("followers"), Some(&PayloadValue::Integer(250_000)));
        assert_eq!(
            payload.get("features"),
            Some(&PayloadValue::Text("Polls, Ad Network".into()))
        );
        assert_eq!(payload.fields[9].name, "type");
        assert_eq!(payload.get("qualification"), Some(&PayloadValue::Text("migrating".into())));
    }

    #[test]
    fn test_json_shape() {
        let schema = FormSchema::landing_page();
        let mut state = FormState::from_schema(&schema);
        state.set("followers", FieldValue::Text("12".into())).unwrap();

        let payload = SubmissionPayload::build(&schema, &state, "/landing");
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["pageName"], "/landing");
        assert_eq!(json["fields"][2]["name"], "followers");
        assert_eq!(json["fields"][2]["value"], 12);
        assert_eq!(json["fields"][2]["objectTypeId"], "0-2");
    }
}
