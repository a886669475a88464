//! # lead-core
//!
//! Schema-driven lead capture form: field rendering, validation, bounded chip
//! selection and normalized submission payloads. No DOM, no I/O.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────────┐   ┌────────────────┐
//! │ FormSchema   │──▶│ Field Renderer │──▶│ FormController   │──▶│ SubmissionSink │
//! │ (immutable)  │   │ render / event │   │ state + phase    │   │ (Strategy)     │
//! └──────────────┘   └────────────────┘   └──────────────────┘   └────────────────┘
//!                            ▲                     │
//!                            └──── FieldEvent ◀────┘ user input
//! ```
//!
//! The schema is built once and passed in explicitly. Every derived flag
//! (submit enablement, alternate call-to-action mode) is recomputed from the
//! stored values, so the controller's only stored transition is
//! `Editing → Submitted`.

pub mod chips;
pub mod copy;
pub mod error;
pub mod field;
pub mod form;
pub mod payload;
pub mod schema;
pub mod sink;
pub mod state;
pub mod validation;

pub use copy::FormCopy;
pub use error::{FormError, Result, SubmitError};
pub use field::{ControlView, FieldEvent, FieldView, render_field};
pub use form::{ChangeReport, FormController, FormPhase, FormView, SubmitOutcome};
pub use payload::{PayloadField, PayloadValue, SubmissionPayload};
pub use schema::{ControlKind, FieldDescriptor, FieldType, FormSchema, LabelPosition};
pub use sink::{MemorySink, SubmissionSink, deliver};
pub use state::{FieldValue, FormState};
pub use validation::FieldValidator;
