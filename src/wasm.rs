//! WebAssembly bindings.
//!
//! Exposes [`solve`] to JavaScript. The input is a plain object with the same
//! shape as the JSON request body; the output is
//! `{ routes: [...], unroutable: [...] }`.

use wasm_bindgen::prelude::*;

use crate::request::SolveRequest;

/// Solves a routing instance passed as a JS object.
///
/// Errors are thrown as JS `Error` objects carrying the message.
#[wasm_bindgen]
pub fn solve(input: JsValue) -> Result<JsValue, JsValue> {
    let request: SolveRequest = serde_wasm_bindgen::from_value(input)?;
    let solution = request
        .solve()
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&solution)?)
}
