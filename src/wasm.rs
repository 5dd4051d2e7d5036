use crate::commands;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Reconstruct from a share list (or base-encoded points); returns the report JSON.
#[wasm_bindgen]
pub fn wasm_solve(data: String) -> Result<String, JsValue> {
    commands::solve_core(&data)
        .map(|cmd| cmd.result)
        .map_err(|e| JsValue::from_str(&commands::describe_error(&e)))
}

/// Evaluate a single share expression; returns the value as a decimal string.
#[wasm_bindgen]
pub fn wasm_evaluate(expr: String) -> Result<String, JsValue> {
    commands::evaluate_core(&expr)
        .map(|cmd| cmd.result)
        .map_err(|e| JsValue::from_str(&format!("Error: {}", e)))
}

#[wasm_bindgen]
pub fn wasm_example() -> String {
    commands::example_input().to_string()
}
