//! WASM bindings for browser-based rendering.
//!
//! This module exposes the typographer and the Markdown renderer to
//! JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::markdown::{Markdown, RenderConfig};
use crate::typography;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Apply typographic replacements to plain text.
#[wasm_bindgen]
pub fn smarten(text: &str) -> String {
    typography::replace(text)
}

/// Render Markdown to an HTML fragment.
#[wasm_bindgen]
pub fn render_markdown(source: &str, typographer: bool) -> String {
    let config = RenderConfig::new().with_typographer(typographer);
    Markdown::with_config(config).render(source)
}
