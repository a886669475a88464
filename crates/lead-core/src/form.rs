//! Form Controller
//!
//! Owns the form state for one mounted form. Submit enablement and the
//! alternate call-to-action mode are derived from the stored values on every
//! read; the only stored flag is the terminal `Submitted` phase.

use std::sync::Arc;

use serde::Serialize;

use crate::copy::FormCopy;
use crate::error::{FormError, Result};
use crate::field::{FieldEvent, FieldView, check_field, extract_value, is_invalid, is_missing, render_field};
use crate::payload::SubmissionPayload;
use crate::schema::FormSchema;
use crate::state::{FieldValue, FormState};
use crate::validation::should_show_alternate_cta;

/// Lifecycle of a mounted form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    #[default]
    Editing,
    Submitted,
}

/// Result of a successful submit click
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Payload assembled; the form is now closed
    Submitted(SubmissionPayload),

    /// Sign-up mode is active; nothing is assembled and the form stays open
    AlternateCta,
}

/// What an accepted field event did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeReport {
    pub field: String,

    /// Validator verdict for the new value, if the field has one
    pub valid: Option<bool>,

    /// Integer input lost characters during cleaning
    pub sanitized: bool,

    /// Chip click ignored at capacity
    pub ignored: bool,

    pub submit_disabled: bool,
    pub alternate_cta: bool,
}

/// Consecutive fields rendered side by side
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// More than one column on wide screens
    pub columns: bool,
    pub fields: Vec<FieldView>,
}

/// Submit button as rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitButtonView {
    pub label: String,
    pub disabled: bool,
}

/// Post-submission message with its link
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    pub text: String,
    pub link_text: String,
    pub link: String,
    pub trailing_text: String,
}

/// Entire form as rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub phase: FormPhase,

    /// Empty once submitted
    pub rows: Vec<RowView>,

    /// Hidden inputs, name and current value
    pub auxiliary: Vec<(String, String)>,

    pub helper_text: Option<String>,

    /// Absent once submitted
    pub submit: Option<SubmitButtonView>,
    pub confirmation: Option<ConfirmationView>,
}

/// Controller for one mounted lead form
#[derive(Clone, Debug)]
pub struct FormController {
    schema: Arc<FormSchema>,
    copy: Arc<FormCopy>,
    state: FormState,
    phase: FormPhase,
}

impl FormController {
    pub fn new(schema: Arc<FormSchema>, copy: Arc<FormCopy>) -> Self {
        let state = FormState::from_schema(&schema);
        Self {
            schema,
            copy,
            state,
            phase: FormPhase::Editing,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn copy(&self) -> &FormCopy {
        &self.copy
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    /// Apply one user input event
    pub fn apply(&mut self, event: FieldEvent) -> Result<ChangeReport> {
        if self.is_submitted() {
            return Err(FormError::Closed);
        }

        let name = event.field();
        let Some(field) = self.schema.field(name) else {
            let err = if self.schema.auxiliary_field(name).is_some() {
                FormError::NotEditable(name.into())
            } else {
                FormError::UnknownField(name.into())
            };
            tracing::warn!("Rejected field event: {}", err);
            return Err(err);
        };

        let extracted = extract_value(field, &event, &self.state).inspect_err(|e| {
            tracing::warn!("Rejected field event: {}", e);
        })?;

        if extracted.sanitized {
            tracing::debug!(field = %field.name, "Dropped non-digit characters from integer input");
        }
        if extracted.ignored {
            tracing::debug!(field = %field.name, "Chip selection at capacity, click ignored");
        }

        let valid = check_field(field, &extracted.value).filter(|_| !extracted.value.is_empty());
        let report_field = field.name.clone();
        self.state.set(&report_field, extracted.value)?;

        let report = ChangeReport {
            field: report_field,
            valid,
            sanitized: extracted.sanitized,
            ignored: extracted.ignored,
            submit_disabled: self.submit_disabled(),
            alternate_cta: self.alternate_cta_active(),
        };
        tracing::debug!(
            field = %report.field,
            valid = ?report.valid,
            submit_disabled = report.submit_disabled,
            "Field updated"
        );

        Ok(report)
    }

    /// Overwrite an auxiliary field on behalf of an external collaborator
    pub fn set_auxiliary_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if self.is_submitted() {
            return Err(FormError::Closed);
        }
        if self.schema.auxiliary_field(name).is_none() {
            return Err(if self.schema.field(name).is_some() {
                FormError::NotEditable(name.into())
            } else {
                FormError::UnknownField(name.into())
            });
        }

        self.state.set(name, FieldValue::Text(value.into()))
    }

    /// Required visible fields that are still empty
    pub fn missing_fields(&self) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .filter(|f| is_missing(f, &self.state))
            .map(|f| f.name.clone())
            .collect()
    }

    /// Validated, non-empty fields that currently fail
    pub fn invalid_fields(&self) -> Vec<String> {
        self.schema
            .fields()
            .iter()
            .filter(|f| is_invalid(f, &self.state))
            .map(|f| f.name.clone())
            .collect()
    }

    /// True if any required field is empty or any validated value fails
    pub fn submit_disabled(&self) -> bool {
        self.schema
            .fields()
            .iter()
            .any(|f| is_missing(f, &self.state) || is_invalid(f, &self.state))
    }

    /// Threshold field currently below its threshold
    pub fn alternate_cta_active(&self) -> bool {
        self.schema
            .alternate_cta()
            .is_some_and(|rule| should_show_alternate_cta(self.state.text(&rule.field), rule.threshold))
    }

    pub fn submit_label(&self) -> &str {
        if self.alternate_cta_active() {
            &self.copy.sign_up_button
        } else if self.is_submitted() {
            &self.copy.submitted_button
        } else {
            &self.copy.submit_button
        }
    }

    /// Sign-up helper is shown once the form is complete and in CTA mode
    pub fn show_sign_up_helper(&self) -> bool {
        !self.submit_disabled() && !self.is_submitted() && self.alternate_cta_active()
    }

    /// Handle a submit click
    pub fn submit(&mut self, page_name: &str) -> Result<SubmitOutcome> {
        if self.is_submitted() {
            tracing::warn!("Submit ignored: form already submitted");
            return Err(FormError::AlreadySubmitted);
        }

        if self.submit_disabled() {
            let err = FormError::Incomplete {
                missing: self.missing_fields(),
                invalid: self.invalid_fields(),
            };
            tracing::warn!("Submit rejected: {}", err);
            return Err(err);
        }

        if self.alternate_cta_active() {
            tracing::info!(link = %self.copy.sign_up_link, "Submit routed to sign-up");
            return Ok(SubmitOutcome::AlternateCta);
        }

        let payload = SubmissionPayload::build(&self.schema, &self.state, page_name);
        self.phase = FormPhase::Submitted;
        tracing::info!(page = page_name, fields = payload.fields.len(), "Lead form submitted");

        Ok(SubmitOutcome::Submitted(payload))
    }

    /// View of a single visible field
    pub fn field_view(&self, name: &str) -> Option<FieldView> {
        self.schema.field(name).map(|f| render_field(f, &self.state))
    }

    /// Render the whole form
    pub fn view(&self) -> FormView {
        let rows = if self.is_submitted() {
            Vec::new()
        } else {
            self.schema
                .rows()
                .into_iter()
                .map(|row| RowView {
                    columns: row.group.is_some() && row.fields.len() > 1,
                    fields: row.fields.iter().map(|f| render_field(f, &self.state)).collect(),
                })
                .collect()
        };

        let auxiliary = self
            .schema
            .auxiliary()
            .iter()
            .map(|a| (a.name.clone(), self.state.text(&a.name).to_string()))
            .collect();

        let confirmation = self.is_submitted().then(|| ConfirmationView {
            text: self.copy.submitted_text.clone(),
            link_text: self.copy.submitted_link_text.clone(),
            link: self.copy.sign_up_link.clone(),
            trailing_text: self.copy.submitted_secondary_text.clone(),
        });

        FormView {
            phase: self.phase,
            rows,
            auxiliary,
            helper_text: self
                .show_sign_up_helper()
                .then(|| self.copy.sign_up_helper_text.clone()),
            submit: (!self.is_submitted()).then(|| SubmitButtonView {
                label: self.submit_label().to_string(),
                disabled: self.submit_disabled(),
            }),
            confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PayloadValue;

    fn controller() -> FormController {
        FormController::new(
            Arc::new(FormSchema::landing_page()),
            Arc::new(FormCopy::default()),
        )
    }

    fn text(field: &str, value: &str) -> FieldEvent {
        FieldEvent::TextChange {
            field: field.into(),
            value: value.into(),
        }
    }

    fn fill_required(form: &mut FormController, followers: &str) {
        form.apply(text("name", "Daily Digest")).unwrap();
        form.apply(text("website", "dailydigest.com")).unwrap();
        form.apply(text("followers", followers)).unwrap();
        form.apply(FieldEvent::SelectChange {
            field: "platform".into(),
            value: "AWeber".into(),
        })
        .unwrap();
        form.apply(text("firstname", "Emily")).unwrap();
        form.apply(text("lastname", "Jones")).unwrap();
        form.apply(text("email", "emily@dailydigest.com")).unwrap();
    }

    #[test]
    fn test_starts_disabled() {
        let form = controller();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.submit_disabled());
        assert!(!form.alternate_cta_active());
        assert_eq!(form.submit_label(), "Request a demo");
        assert_eq!(form.missing_fields().len(), 7);
    }

    #[test]
    fn test_submit_enablement_tracks_validity() {
        let mut form = controller();
        fill_required(&mut form, "250000");
        assert!(!form.submit_disabled());

        let report = form.apply(text("email", "a@b")).unwrap();
        assert_eq!(report.valid, Some(false));
        assert!(report.submit_disabled);
        assert_eq!(form.invalid_fields(), vec!["email".to_string()]);

        let report = form.apply(text("email", "a@b.co")).unwrap();
        assert_eq!(report.valid, Some(true));
        assert!(!report.submit_disabled);

        // clearing a required field disables again without flagging it invalid
        let report = form.apply(text("website", "")).unwrap();
        assert_eq!(report.valid, None);
        assert!(report.submit_disabled);
        assert!(form.invalid_fields().is_empty());
    }

    #[test]
    fn test_alternate_cta_threshold() {
        let mut form = controller();

        assert!(form.apply(text("followers", "99999")).unwrap().alternate_cta);
        assert!(!form.apply(text("followers", "100000")).unwrap().alternate_cta);
    }

    #[test]
    fn test_alternate_cta_submit_is_noop() {
        let mut form = controller();
        fill_required(&mut form, "500");

        assert!(form.show_sign_up_helper());
        assert_eq!(form.submit_label(), "Create an account");
        assert_eq!(form.submit("/").unwrap(), SubmitOutcome::AlternateCta);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn test_incomplete_submit_rejected() {
        let mut form = controller();
        form.apply(text("email", "nope")).unwrap();

        match form.submit("/") {
            Err(FormError::Incomplete { missing, invalid }) => {
                assert!(missing.contains(&"name".to_string()));
                assert_eq!(invalid, vec!["email".to_string()]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn test_end_to_end_submission() {
        let mut form = controller();
        fill_required(&mut form, "250,000");
        form.apply(FieldEvent::ChipToggle {
            field: "features".into(),
            value: "Polls".into(),
        })
        .unwrap();
        form.apply(FieldEvent::ChipToggle {
            field: "features".into(),
            value: "3D analytics".into(),
        })
        .unwrap();
        form.set_auxiliary_field("hs_lead_status", "OPEN").unwrap();

        let SubmitOutcome::Submitted(payload) = form.submit("/demo").unwrap() else {
            panic!("expected a payload");
        };
        assert_eq!(payload.page_name, "/demo");
        assert_eq!(payload.get("followers"), Some(&PayloadValue::Integer(250_000)));
        assert_eq!(
            payload.get("features"),
            Some(&PayloadValue::Text("3D analytics, Polls".into()))
        );
        assert_eq!(payload.get("hs_lead_status"), Some(&PayloadValue::Text("OPEN".into())));

        let view = form.view();
        assert_eq!(view.phase, FormPhase::Submitted);
        assert!(view.rows.is_empty());
        assert!(view.submit.is_none());
        assert_eq!(form.submit_label(), "Submitted ✓");
        assert_eq!(view.confirmation.map(|c| c.link), Some("/privacy".to_string()));

        // terminal: no resubmission, no edits
        assert!(matches!(form.submit("/demo"), Err(FormError::AlreadySubmitted)));
        assert!(matches!(form.apply(text("name", "x")), Err(FormError::Closed)));
        assert!(matches!(
            form.set_auxiliary_field("hs_lead_status", "CLOSED"),
            Err(FormError::Closed)
        ));
    }

    #[test]
    fn test_auxiliary_fields_only_via_setter() {
        let mut form = controller();

        assert!(matches!(form.apply(text("lead_type", "Partner")), Err(FormError::NotEditable(_))));
        assert!(matches!(
            form.set_auxiliary_field("email", "x@y.zz"),
            Err(FormError::NotEditable(_))
        ));
        assert!(matches!(
            form.set_auxiliary_field("utm_source", "ad"),
            Err(FormError::UnknownField(_))
        ));

        form.set_auxiliary_field("lead_type", "Partner").unwrap();
        assert_eq!(form.state().text("lead_type"), "Partner");
        assert!(form.view().auxiliary.contains(&("lead_type".into(), "Partner".into())));
    }

    #[test]
    fn test_chip_capacity_through_controller() {
        let mut form = controller();
        let toggle = |value: &str| FieldEvent::ChipToggle {
            field: "features".into(),
            value: value.into(),
        };

        for value in ["Polls", "Ad Network", "3D analytics"] {
            form.apply(toggle(value)).unwrap();
        }
        let report = form.apply(toggle("Referral program")).unwrap();
        assert!(report.ignored);
        assert_eq!(
            form.state().selection("features"),
            ["3D analytics", "Ad Network", "Polls"]
        );

        form.apply(toggle("Ad Network")).unwrap();
        assert_eq!(form.state().selection("features"), ["3D analytics", "Polls"]);
    }

    #[test]
    fn test_view_rows_and_empty_errors() {
        let form = controller();
        let view = form.view();

        assert_eq!(view.rows.len(), 6);
        assert!(view.rows[2].columns);
        assert!(!view.rows[0].columns);
        assert!(view.rows.iter().flat_map(|r| &r.fields).all(|f| f.error.is_none()));
        assert!(view.submit.is_some_and(|s| s.disabled));
        assert!(view.helper_text.is_none());
        assert!(view.confirmation.is_none());
        assert_eq!(view.auxiliary.len(), 5);
    }
}
