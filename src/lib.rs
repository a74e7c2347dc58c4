//! Renders a single triangle into a `<canvas>` with WebGL 2.0 and animates its color once per
//! animation frame.
//!
//! The page loads the module and calls [launch] with the id of its canvas and, optionally, the
//! [config::LaunchOptions]:
//!
//! ```js
//! import init, { launch } from "./web_triangle.js";
//!
//! await init();
//! const handle = launch("canvas", { logLevel: "debug" });
//! // ...
//! handle.quit();
//! ```

pub mod app;
pub mod buffer;
pub mod config;
pub mod input;
pub mod pipeline;
pub mod runtime;

use wasm_bindgen::prelude::*;

use crate::app::InitError;
use crate::config::{AppConfig, ConfigError, LaunchOptions};
use crate::input::{EventQueue, InputEvent};

/// Installs the panic hook and routes `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if console_log::init_with_level(AppConfig::default().log_level()).is_err() {
        log::warn!("A logger was already installed");
    }
}

/// Handle to a running animation loop, returned to JavaScript by [launch].
#[wasm_bindgen]
pub struct LoopHandle {
    events: EventQueue,
}

#[wasm_bindgen]
impl LoopHandle {
    /// Stops the animation loop on its next frame and releases the WebGL context.
    pub fn quit(&self) {
        self.events.push(InputEvent::Quit);
    }
}

/// Starts rendering into the canvas with the given `id`.
///
/// `options` is either `undefined` or an object with the [LaunchOptions] fields.
#[wasm_bindgen]
pub fn launch(canvas_id: &str, options: JsValue) -> Result<LoopHandle, JsValue> {
    launch_with_options(canvas_id, &options)
        .map(|events| LoopHandle { events })
        .map_err(|err| {
            log::error!("{}", err);

            JsValue::from_str(&err.to_string())
        })
}

fn launch_with_options(canvas_id: &str, options: &JsValue) -> Result<EventQueue, InitError> {
    let options = if options.is_undefined() || options.is_null() {
        LaunchOptions::default()
    } else {
        options
            .into_serde::<LaunchOptions>()
            .map_err(|err| ConfigError::Malformed(err.to_string()))?
    };

    let config = AppConfig::from_launch_options(canvas_id, options)?;

    log::set_max_level(config.log_level().to_level_filter());

    runtime::single_threaded::launch(&config)
}
