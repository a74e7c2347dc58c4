//! Sets up the renderer on the main browser thread and hands it to the animation loop.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as Gl};

use crate::app::{App, InitError};
use crate::config::AppConfig;
use crate::input::EventQueue;
use crate::runtime::animation::AnimationLoop;
use crate::runtime::listeners::EventListeners;
use crate::runtime::ContextOptions;

/// Obtains a WebGL 2.0 context for the `canvas`.
pub fn init(canvas: &HtmlCanvasElement, options: &ContextOptions) -> Result<Gl, InitError> {
    let attributes = JsValue::from_serde(&options.attributes())
        .map_err(|err| InitError::ContextCreation(err.to_string()))?;

    let context = canvas
        .get_context_with_context_options("webgl2", &attributes)
        .map_err(|err| InitError::ContextCreation(js_error_message(&err)))?
        .ok_or_else(|| InitError::ContextCreation("WebGL 2.0 is not supported".to_string()))?;

    context
        .dyn_into::<Gl>()
        .map_err(|_| InitError::ContextCreation("not a WebGL 2.0 context".to_string()))
}

/// Finds the canvas, builds the [App] for it and starts the animation loop.
///
/// Returns the queue the loop drains its input events from, so the caller can inject events of its
/// own. Nothing is scheduled if any step fails.
pub fn launch(config: &AppConfig) -> Result<EventQueue, InitError> {
    let window = web_sys::window()
        .ok_or_else(|| InitError::ContextCreation("no global `window`".to_string()))?;

    let canvas = window
        .document()
        .and_then(|document| document.get_element_by_id(config.canvas_id()))
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| InitError::CanvasNotFound(config.canvas_id().to_string()))?;

    canvas.set_width(config.width());
    canvas.set_height(config.height());

    let events = EventQueue::new();
    let listeners = EventListeners::attach(window.as_ref(), &events)
        .map_err(|err| InitError::ListenerRegistration(js_error_message(&err)))?;

    let frame_provider = arwa::window()
        .ok_or_else(|| InitError::ContextCreation("no global `window`".to_string()))?;
    let gl = init(&canvas, config.context_options())?;
    let app = App::init(gl, config)?;

    AnimationLoop::new(app, events.clone(), listeners, frame_provider).schedule();

    Ok(events)
}

fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
