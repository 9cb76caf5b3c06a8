//! WASM bindings for the docgen live document preview.
//!
//! The page creates one `PageController`, calls `init()` once the DOM is
//! ready, and reports form switches and externally constructed editors
//! through `formShown` and `registerEditor`.

mod controller;
mod logging;

pub use controller::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
