//! Field Renderer
//!
//! Turns one descriptor plus the current state into a view model, and turns
//! user input events into the value to store for that field.

use serde::{Deserialize, Serialize};

use crate::chips::toggle_chip;
use crate::error::{FormError, Result};
use crate::schema::{ControlKind, FieldDescriptor, FieldType, LabelPosition};
use crate::state::{FieldValue, FormState};
use crate::validation::parse_integer_field;

/// Input event raised by a rendered control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldEvent {
    TextChange { field: String, value: String },
    CheckboxChange { field: String, checked: bool },
    SelectChange { field: String, value: String },
    ChipToggle { field: String, value: String },
}

impl FieldEvent {
    /// Name of the field the event targets
    pub fn field(&self) -> &str {
        match self {
            FieldEvent::TextChange { field, .. }
            | FieldEvent::CheckboxChange { field, .. }
            | FieldEvent::SelectChange { field, .. }
            | FieldEvent::ChipToggle { field, .. } => field,
        }
    }

    fn control(&self) -> ControlKind {
        match self {
            FieldEvent::TextChange { .. } => ControlKind::Text,
            FieldEvent::CheckboxChange { .. } => ControlKind::Checkbox,
            FieldEvent::SelectChange { .. } => ControlKind::Select,
            FieldEvent::ChipToggle { .. } => ControlKind::Chips,
        }
    }
}

/// Value extracted from an event, before it is written to state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedValue {
    pub value: FieldValue,

    /// Characters were dropped while cleaning integer input
    pub sanitized: bool,

    /// Chip click ignored because the selection is full
    pub ignored: bool,
}

impl ExtractedValue {
    fn plain(value: FieldValue) -> Self {
        Self {
            value,
            sanitized: false,
            ignored: false,
        }
    }
}

/// Compute the new value `event` produces for `field`
pub fn extract_value(
    field: &FieldDescriptor,
    event: &FieldEvent,
    state: &FormState,
) -> Result<ExtractedValue> {
    let control = field.control();
    if event.control() != control {
        return Err(FormError::EventMismatch {
            field: field.name.clone(),
            control: control.as_str(),
        });
    }

    let extracted = match event {
        FieldEvent::TextChange { value, .. } if field.field_type == FieldType::Integer => {
            let parsed = parse_integer_field(value);
            ExtractedValue {
                sanitized: !parsed.valid && !value.is_empty(),
                value: FieldValue::Text(parsed.cleaned),
                ignored: false,
            }
        }
        FieldEvent::TextChange { value, .. } => ExtractedValue::plain(FieldValue::Text(value.clone())),
        FieldEvent::CheckboxChange { checked, .. } => {
            ExtractedValue::plain(FieldValue::Text(checked.to_string()))
        }
        FieldEvent::SelectChange { value, .. } => {
            let selectable = field.option(value).is_some_and(|o| o.is_selectable());
            if !selectable {
                return Err(FormError::OptionUnavailable {
                    field: field.name.clone(),
                    value: value.clone(),
                });
            }
            ExtractedValue::plain(FieldValue::Text(value.clone()))
        }
        FieldEvent::ChipToggle { value, .. } => {
            let current = state.selection(&field.name);
            let toggle = toggle_chip(current, value, field.capacity());
            let ignored = toggle.is_ignored();
            ExtractedValue {
                value: FieldValue::Multi(toggle.into_selection(current)),
                sanitized: false,
                ignored,
            }
        }
    };

    Ok(extracted)
}

/// Validator verdict for a stored value; `None` when the field has no validator
pub fn check_field(field: &FieldDescriptor, value: &FieldValue) -> Option<bool> {
    let validator = field.validator?;
    Some(value.as_text().is_some_and(|text| validator.check(text)))
}

/// Required field with nothing stored
pub fn is_missing(field: &FieldDescriptor, state: &FormState) -> bool {
    field.required && state.is_empty(&field.name)
}

/// Validated, non-empty field whose value fails its validator
pub fn is_invalid(field: &FieldDescriptor, state: &FormState) -> bool {
    match state.get(&field.name) {
        Some(value) if !value.is_empty() => check_field(field, value) == Some(false),
        _ => false,
    }
}

/// Single-select option as rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: String,
    pub value: String,
    pub disabled: bool,
    pub selected: bool,
}

/// Chip token as rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChipView {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// Control-specific part of a field view
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum ControlView {
    Text {
        value: String,
        placeholder: String,
        numeric: bool,
    },
    Checkbox {
        checked: bool,
    },
    Select {
        value: String,
        /// Nothing chosen yet; rendered in the muted placeholder color
        placeholder_shown: bool,
        options: Vec<OptionView>,
    },
    Chips {
        chips: Vec<ChipView>,
        at_capacity: bool,
    },
}

/// Everything needed to draw one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub subtext: Option<String>,
    pub required: bool,
    pub label_position: LabelPosition,
    pub class: Option<String>,
    pub label_class: Option<String>,
    pub control: ControlView,

    /// Inline validation message, only for non-empty failing values
    pub error: Option<String>,
}

/// Render one field against the current state
pub fn render_field(field: &FieldDescriptor, state: &FormState) -> FieldView {
    let control = match field.control() {
        ControlKind::Text => ControlView::Text {
            value: state.text(&field.name).to_string(),
            placeholder: field.placeholder.clone().unwrap_or_default(),
            numeric: field.field_type == FieldType::Integer,
        },
        ControlKind::Checkbox => ControlView::Checkbox {
            checked: state.text(&field.name) == "true",
        },
        ControlKind::Select => {
            let value = state.text(&field.name);
            ControlView::Select {
                value: value.to_string(),
                placeholder_shown: value.is_empty(),
                options: field
                    .visible_options()
                    .map(|o| OptionView {
                        label: o.label.clone(),
                        value: o.value.clone(),
                        disabled: o.disabled,
                        selected: o.value == value,
                    })
                    .collect(),
            }
        }
        ControlKind::Chips => {
            let selection = state.selection(&field.name);
            ControlView::Chips {
                chips: field
                    .visible_options()
                    .map(|o| ChipView {
                        label: o.label.clone(),
                        value: o.value.clone(),
                        selected: selection.contains(&o.value),
                    })
                    .collect(),
                at_capacity: selection.len() >= field.capacity(),
            }
        }
    };

    let error = if is_invalid(field, state) {
        field.validation_message.clone()
    } else {
        None
    };

    FieldView {
        name: field.name.clone(),
        label: field.label.clone(),
        subtext: field.subtext.clone(),
        required: field.required,
        label_position: field.layout.label_position,
        class: field.layout.class.clone(),
        label_class: field.layout.label_class.clone(),
        control,
        error,
    }
}
