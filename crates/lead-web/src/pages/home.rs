//! Home Page

use std::sync::Arc;

use leptos::prelude::*;
use lead_core::{FormCopy, FormSchema, SubmissionSink};

use crate::form::LeadForm;

#[component]
pub fn HomePage(
    schema: Arc<FormSchema>,
    copy: Arc<FormCopy>,
    sink: Arc<dyn SubmissionSink>,
) -> impl IntoView {
    view! {
        <div class="home">
            <div class="relative grid">
                <div class="grid grid-cols-1 w-screen max-w-[800px]">
                    <div class="lg:ml-12 mt-5">
                        <div class="bg-white rounded-lg border border-gray-400 h-fit shadow-xl p-4">
                            <LeadForm form_id="lead-capture-form" schema=schema copy=copy sink=sink />
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
