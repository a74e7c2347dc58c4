use arwa::{AnimationFrameCancelled, Window};
use futures::FutureExt;
use wasm_bindgen_futures::spawn_local;
use web_sys::WebGl2RenderingContext as Gl;

use crate::app::{App, LoopState};
use crate::input::EventQueue;
use crate::runtime::listeners::EventListeners;

/// Drives an [App] with the browser's animation frames.
///
/// The loop owns all of its state and moves from one frame request into the next; a frame that
/// ends with [LoopState::Stopped] simply doesn't request another frame.
pub struct AnimationLoop {
    app: App<Gl>,
    events: EventQueue,
    listeners: Option<EventListeners>,
    frame_provider: Window,
}

impl AnimationLoop {
    pub fn new(
        app: App<Gl>,
        events: EventQueue,
        listeners: EventListeners,
        frame_provider: Window,
    ) -> Self {
        AnimationLoop {
            app,
            events,
            listeners: Some(listeners),
            frame_provider,
        }
    }

    /// Requests the next animation frame and dispatches this loop onto it.
    pub fn schedule(self) {
        let next = self.frame_provider.request_animation_frame();

        spawn_local(next.map(move |frame| self.call(frame)));
    }

    fn call(mut self, frame: Result<f64, AnimationFrameCancelled>) {
        match frame {
            Ok(timestamp) => match self.app.tick(self.events.drain(), timestamp) {
                LoopState::Running => self.schedule(),
                LoopState::Stopped => self.stop(),
            },
            Err(_) => {
                log::error!("The animation frame request was cancelled");

                self.app.teardown();
                self.stop();
            }
        }
    }

    fn stop(&mut self) {
        self.listeners.take();

        log::info!("Animation loop stopped");
    }
}
