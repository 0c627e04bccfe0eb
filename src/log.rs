//! Warning output.
//!
//! In the browser build warnings go to the developer console; natively they
//! go to stderr.

/// Emits a warning message.
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[WARNING] {}", message);
}
