//! Form Copy
//!
//! User-facing strings around the form: button labels, the sign-up helper
//! shown in alternate CTA mode, and the post-submission confirmation.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormCopy {
    pub submit_button: String,
    pub submitted_button: String,
    pub sign_up_button: String,
    pub sign_up_helper_text: String,

    /// Opaque route for the confirmation and sign-up links
    pub sign_up_link: String,

    pub submitted_text: String,
    pub submitted_link_text: String,
    pub submitted_secondary_text: String,
}

impl Default for FormCopy {
    fn default() -> Self {
        Self {
            submit_button: "Request a demo".into(),
            submitted_button: "Submitted ✓".into(),
            sign_up_button: "Create an account".into(),
            sign_up_helper_text: "Thank you for your interest in our company. Since you have less \
                than 100,000 followers, our guided onboarding will assist you with your account \
                creation. Click the button below to get started!"
                .into(),
            sign_up_link: "/privacy".into(),
            submitted_text: "Thank you for reaching out, we will be in contact soon. In the mean \
                time, "
                .into(),
            submitted_link_text: "please create a free account to start exploring the platform"
                .into(),
            submitted_secondary_text: ".".into(),
        }
    }
}

impl FormCopy {
    /// Load copy overrides from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
