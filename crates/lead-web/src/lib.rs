//! Landing Page Frontend
//!
//! Leptos-based WASM frontend hosting the lead capture form.

mod app;
mod components;
mod form;
mod pages;
mod submit;

pub use app::App;
pub use components::{Arrow, Button, ButtonStyle, ChipList, ColorScheme};
pub use form::{InputItem, LeadForm};
pub use submit::ConsoleSink;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
