//! Field Schema
//!
//! Immutable description of every field the lead form renders or submits.
//! Built once at start (`FormSchema::landing_page` or `FormSchema::from_json`)
//! and shared by reference with the renderer and the controller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::validation::FieldValidator;

/// CRM object a field belongs to
pub const CONTACT_OBJECT: &str = "0-1";
pub const COMPANY_OBJECT: &str = "0-2";

/// Declared data type of a field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Enumeration,
}

/// Concrete control a descriptor renders as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Checkbox,
    Select,
    Chips,
}

impl ControlKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ControlKind::Text => "text input",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Select => "select",
            ControlKind::Chips => "chip group",
        }
    }
}

/// Where the label sits relative to its control
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Above,
    Below,
}

/// Presentation hints for one field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    /// Consecutive fields sharing a group share a two-column row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default)]
    pub label_position: LabelPosition,

    /// Extra classes on the field wrapper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Extra classes on the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_class: Option<String>,
}

/// One selectable option of an enumeration field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    pub label: String,

    #[serde(default)]
    pub value: String,

    /// Never rendered
    #[serde(default)]
    pub hidden: bool,

    /// Rendered but not selectable
    #[serde(default)]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
}

impl OptionDescriptor {
    pub fn new(label: impl Into<String>, value: impl Into<String>, display_order: u32) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            hidden: false,
            disabled: false,
            display_order: Some(display_order),
        }
    }

    /// Disabled leading entry shown while nothing is chosen
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            hidden: false,
            disabled: true,
            display_order: None,
        }
    }

    pub fn is_selectable(&self) -> bool {
        !self.hidden && !self.disabled
    }
}

/// Static metadata for one visible field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique key, doubles as the state key
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<FieldValidator>,

    /// Shown inline when the validator fails on a non-empty value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,

    pub object_type_id: String,

    #[serde(default)]
    pub layout: FieldLayout,
}

impl FieldDescriptor {
    fn new(name: &str, field_type: FieldType, label: &str, object_type_id: &str) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            subtext: None,
            placeholder: None,
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            validator: None,
            validation_message: None,
            object_type_id: object_type_id.into(),
            layout: FieldLayout::default(),
        }
    }

    fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn validated(mut self, validator: FieldValidator, message: &str) -> Self {
        self.validator = Some(validator);
        self.validation_message = Some(message.into());
        self
    }

    fn grouped(mut self, group: &str, class: &str) -> Self {
        self.layout.group = Some(group.into());
        self.layout.class = Some(class.into());
        self
    }

    /// Bounded multi-select: enumeration with both bounds set
    pub fn is_multi_select(&self) -> bool {
        self.field_type == FieldType::Enumeration
            && self.min.is_some_and(|n| n > 0)
            && self.max.is_some_and(|n| n > 0)
    }

    pub fn control(&self) -> ControlKind {
        match self.field_type {
            FieldType::String | FieldType::Integer => ControlKind::Text,
            FieldType::Boolean => ControlKind::Checkbox,
            FieldType::Enumeration if self.is_multi_select() => ControlKind::Chips,
            FieldType::Enumeration => ControlKind::Select,
        }
    }

    /// Selection capacity of a chip group
    pub fn capacity(&self) -> usize {
        self.max.unwrap_or(usize::MAX)
    }

    pub fn visible_options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter().filter(|o| !o.hidden)
    }

    pub fn option(&self, value: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Field not shown to the user but always submitted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryField {
    pub name: String,

    /// Initial literal value; collaborators may replace it at runtime
    #[serde(default)]
    pub value: String,

    pub object_type_id: String,
}

impl AuxiliaryField {
    fn new(name: &str, value: &str, object_type_id: &str) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            object_type_id: object_type_id.into(),
        }
    }
}

/// Threshold on one field that swaps the submit action for sign-up
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateCtaRule {
    pub field: String,
    pub threshold: u64,
}

/// Consecutive fields rendered together
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRow<'a> {
    pub group: Option<&'a str>,
    pub fields: Vec<&'a FieldDescriptor>,
}

/// Complete, validated form definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
    auxiliary: Vec<AuxiliaryField>,
    alternate_cta: Option<AlternateCtaRule>,
}

#[derive(Serialize, Deserialize)]
struct RawSchema {
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    auxiliary: Vec<AuxiliaryField>,
    #[serde(default)]
    alternate_cta: Option<AlternateCtaRule>,
}

impl TryFrom<RawSchema> for FormSchema {
    type Error = FormError;

    fn try_from(raw: RawSchema) -> Result<Self> {
        Self::new(raw.fields, raw.auxiliary, raw.alternate_cta)
    }
}

impl From<FormSchema> for RawSchema {
    fn from(schema: FormSchema) -> Self {
        Self {
            fields: schema.fields,
            auxiliary: schema.auxiliary,
            alternate_cta: schema.alternate_cta,
        }
    }
}

impl FormSchema {
    /// Build a schema, enforcing unique names and a resolvable CTA rule
    pub fn new(
        fields: Vec<FieldDescriptor>,
        auxiliary: Vec<AuxiliaryField>,
        alternate_cta: Option<AlternateCtaRule>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let names = fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(auxiliary.iter().map(|a| a.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(FormError::DuplicateField(name.into()));
            }
        }

        for field in fields.iter().filter(|f| f.is_multi_select()) {
            if field.options.is_empty() {
                return Err(FormError::InvalidSchema(format!(
                    "multi-select '{}' has no options",
                    field.name
                )));
            }
        }

        if let Some(rule) = &alternate_cta {
            if !fields.iter().any(|f| f.name == rule.field) {
                return Err(FormError::InvalidSchema(format!(
                    "alternate CTA rule references unknown field '{}'",
                    rule.field
                )));
            }
        }

        Ok(Self {
            fields,
            auxiliary,
            alternate_cta,
        })
    }

    /// Load and validate a schema from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn auxiliary(&self) -> &[AuxiliaryField] {
        &self.auxiliary
    }

    pub fn alternate_cta(&self) -> Option<&AlternateCtaRule> {
        self.alternate_cta.as_ref()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn auxiliary_field(&self, name: &str) -> Option<&AuxiliaryField> {
        self.auxiliary.iter().find(|a| a.name == name)
    }

    /// Fields grouped into rows; ungrouped fields get a row of their own
    pub fn rows(&self) -> Vec<FieldRow<'_>> {
        let mut rows: Vec<FieldRow<'_>> = Vec::new();
        for field in &self.fields {
            let group = field.layout.group.as_deref();
            match rows.last_mut() {
                Some(row) if group.is_some() && row.group == group => row.fields.push(field),
                _ => rows.push(FieldRow {
                    group,
                    fields: vec![field],
                }),
            }
        }
        rows
    }

    /// The landing page's lead capture form
    pub fn landing_page() -> Self {
        let mut paid_followers = FieldDescriptor::new(
            "paid_followers",
            FieldType::Boolean,
            "Do you have paid/premium followers?",
            COMPANY_OBJECT,
        )
        .placeholder("Check for yes.")
        .grouped("audience", "-mt-2 lg:mt-2 order-2 lg:order-3");
        paid_followers.layout.label_position = LabelPosition::Below;
        paid_followers.layout.label_class = Some("text-xs ml-2".into());

        let mut platform = FieldDescriptor::new(
            "platform",
            FieldType::Enumeration,
            "Which platform do you currently use?",
            COMPANY_OBJECT,
        )
        .placeholder("Please select one")
        .required()
        .grouped("audience", "order-3 lg:order-2 lg:!mb-0");
        platform.options = platform_options();

        let mut features = FieldDescriptor::new(
            "features",
            FieldType::Enumeration,
            "Which features are you most interested in?",
            COMPANY_OBJECT,
        );
        features.subtext = Some("Please select up to three:".into());
        features.options = feature_options();
        features.min = Some(1);
        features.max = Some(3);

        let fields = vec![
            FieldDescriptor::new(
                "name",
                FieldType::String,
                "What is the name of your website?",
                COMPANY_OBJECT,
            )
            .placeholder("Website Name")
            .required(),
            FieldDescriptor::new(
                "website",
                FieldType::String,
                "What is your website url?",
                COMPANY_OBJECT,
            )
            .placeholder("website.com")
            .required()
            .validated(FieldValidator::Url, "Please enter a valid URL"),
            FieldDescriptor::new(
                "followers",
                FieldType::Integer,
                "How many followers do you have?",
                COMPANY_OBJECT,
            )
            .placeholder("100,000+")
            .required()
            .validated(
                FieldValidator::FollowerCount,
                "Please enter a number, ex. 100000 rather than 100k",
            )
            .grouped("audience", "order-1 pr-0 lg:pr-4 lg:!mb-0"),
            platform,
            paid_followers,
            features,
            FieldDescriptor::new("firstname", FieldType::String, "First Name", CONTACT_OBJECT)
                .placeholder("Emily")
                .required()
                .grouped("contact", "pr-0 lg:pr-4"),
            FieldDescriptor::new("lastname", FieldType::String, "Last Name", CONTACT_OBJECT)
                .placeholder("Jones")
                .required()
                .grouped("contact", ""),
            FieldDescriptor::new("email", FieldType::String, "Email Address", CONTACT_OBJECT)
                .placeholder("email@mail.com")
                .required()
                .validated(FieldValidator::Email, "Please enter a valid email"),
        ];

        // hs_lead_status has no literal; it is filled in by whoever owns lead routing
        let auxiliary = vec![
            AuxiliaryField::new("type", "Prospect", COMPANY_OBJECT),
            AuxiliaryField::new("lead_type", "Customer", CONTACT_OBJECT),
            AuxiliaryField::new("hs_buying_role", "DECISION_MAKER", CONTACT_OBJECT),
            AuxiliaryField::new("qualification", "migrating", CONTACT_OBJECT),
            AuxiliaryField::new("hs_lead_status", "", COMPANY_OBJECT),
        ];

        Self {
            fields,
            auxiliary,
            alternate_cta: Some(AlternateCtaRule {
                field: "followers".into(),
                threshold: 100_000,
            }),
        }
    }
}

fn platform_options() -> Vec<OptionDescriptor> {
    vec![
        OptionDescriptor::placeholder("Please select one"),
        OptionDescriptor::new("Active Campaign", "ActiveCampaign", 1),
        OptionDescriptor::new("Automizy", "Automizy", 2),
        OptionDescriptor::new("AWeber", "AWeber", 3),
        OptionDescriptor::new("Buttondown", "ButtonDown", 7),
        OptionDescriptor::new("Buy Me a Coffee", "Buy Me a Coffee", 8),
    ]
}

fn feature_options() -> Vec<OptionDescriptor> {
    let mut blank = OptionDescriptor::placeholder("");
    blank.hidden = true;

    vec![
        blank,
        OptionDescriptor::new("Referral program", "Referral program", 1),
        OptionDescriptor::new("Ad Network", "Ad Network", 2),
        OptionDescriptor::new("3D analytics", "3D analytics", 3),
        OptionDescriptor::new("Polls", "Polls", 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page_is_valid() {
        let schema = FormSchema::landing_page();
        let rebuilt = FormSchema::new(
            schema.fields().to_vec(),
            schema.auxiliary().to_vec(),
            schema.alternate_cta().cloned(),
        );
        assert!(rebuilt.is_ok());
        assert_eq!(schema.fields().len(), 9);
        assert_eq!(schema.auxiliary().len(), 5);
    }

    #[test]
    fn test_control_kinds() {
        let schema = FormSchema::landing_page();
        let kind = |name: &str| schema.field(name).map(FieldDescriptor::control);

        assert_eq!(kind("followers"), Some(ControlKind::Text));
        assert_eq!(kind("paid_followers"), Some(ControlKind::Checkbox));
        assert_eq!(kind("platform"), Some(ControlKind::Select));
        assert_eq!(kind("features"), Some(ControlKind::Chips));
        assert_eq!(schema.field("features").map(FieldDescriptor::capacity), Some(3));
    }

    #[test]
    fn test_rows_follow_groups() {
        let schema = FormSchema::landing_page();
        let rows = schema.rows();
        let shape: Vec<usize> = rows.iter().map(|r| r.fields.len()).collect();

        assert_eq!(shape, vec![1, 1, 3, 1, 2, 1]);
        assert_eq!(rows[2].group, Some("audience"));
        assert_eq!(rows[4].fields[1].name, "lastname");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let schema = FormSchema::landing_page();
        let mut auxiliary = schema.auxiliary().to_vec();
        auxiliary.push(AuxiliaryField::new("email", "x", CONTACT_OBJECT));

        let result = FormSchema::new(schema.fields().to_vec(), auxiliary, None);
        assert!(matches!(result, Err(FormError::DuplicateField(name)) if name == "email"));
    }

    #[test]
    fn test_cta_rule_must_resolve() {
        let schema = FormSchema::landing_page();
        let result = FormSchema::new(
            schema.fields().to_vec(),
            Vec::new(),
            Some(AlternateCtaRule {
                field: "subscribers".into(),
                threshold: 10,
            }),
        );
        assert!(matches!(result, Err(FormError::InvalidSchema(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "fields": [
                {"name": "email", "type": "string", "label": "Email", "required": true,
                 "validator": "email", "validation_message": "Bad email", "object_type_id": "0-1"},
                {"name": "tags", "type": "enumeration", "label": "Tags", "min": 1, "max": 2,
                 "options": [{"label": "A", "value": "a"}], "object_type_id": "0-2"}
            ],
            "auxiliary": [{"name": "source", "value": "landing", "object_type_id": "0-1"}]
        }"#;

        let schema = FormSchema::from_json(json).unwrap();
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.field("email").unwrap().validator, Some(FieldValidator::Email));
        assert_eq!(schema.field("tags").unwrap().control(), ControlKind::Chips);
        assert!(schema.alternate_cta().is_none());

        let duplicate = r#"{"fields": [
            {"name": "a", "type": "string", "label": "A", "object_type_id": "0-1"},
            {"name": "a", "type": "string", "label": "A", "object_type_id": "0-1"}
        ]}"#;
        assert!(FormSchema::from_json(duplicate).is_err());
    }
}
