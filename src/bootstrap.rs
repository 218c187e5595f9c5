//! Browser entry points.
//!
//! `start` runs when the module is instantiated: it creates a full-page canvas
//! and hands it to [`initialize`].

use wasm_bindgen::{JsCast, prelude::*};
use web_sys::HtmlCanvasElement;

use crate::{flow, playground::create_playground_scene, surface::CANVAS_STYLE};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document on the window"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let style = canvas.style();
    for (property, value) in CANVAS_STYLE {
        style.set_property(property, value)?;
    }
    body.append_child(&canvas)?;

    initialize(canvas.clone())?;

    canvas.focus()?;
    Ok(())
}

/// Runs the playground on `canvas`.
#[wasm_bindgen]
pub fn initialize(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    flow::run(Box::new(create_playground_scene), canvas)
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
