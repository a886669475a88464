//! Main App Component

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::{components::*, path};
use lead_core::{FormCopy, FormSchema, SubmissionSink};

use crate::pages::HomePage;
use crate::submit::ConsoleSink;

/// Root application component
///
/// Schema, copy and the submission sink are built once here and handed down
/// explicitly.
#[component]
pub fn App() -> impl IntoView {
    let schema = Arc::new(FormSchema::landing_page());
    let copy = Arc::new(FormCopy::default());
    let sink: Arc<dyn SubmissionSink> = Arc::new(ConsoleSink);

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route
                        path=path!("/")
                        view=move || view! { <HomePage schema=schema.clone() copy=copy.clone() sink=sink.clone() /> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
