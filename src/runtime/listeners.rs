use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, PageTransitionEvent};

use crate::input::{EventQueue, InputEvent};

/// Window events that may mean the page is going away.
const UNLOAD_EVENTS: [&str; 2] = ["pagehide", "beforeunload"];

/// Whether an unload event means the page is going away for good.
///
/// A `pagehide` with `persisted` set only moves the page into the back/forward cache; the page
/// can be restored and must keep animating when it is.
fn is_quit(event_name: &str, persisted: bool) -> bool {
    match event_name {
        "beforeunload" => true,
        "pagehide" => !persisted,
        _ => false,
    }
}

/// DOM event listeners that translate the page being closed into [InputEvent::Quit].
///
/// The listeners are removed from their target when this value is dropped.
pub struct EventListeners {
    target: EventTarget,
    registered: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl EventListeners {
    pub fn attach(target: &EventTarget, queue: &EventQueue) -> Result<Self, JsValue> {
        let mut listeners = EventListeners {
            target: target.clone(),
            registered: Vec::new(),
        };

        for &name in UNLOAD_EVENTS.iter() {
            let queue = queue.clone();

            listeners.listen(name, move |event| {
                let persisted = event
                    .dyn_ref::<PageTransitionEvent>()
                    .map(|event| event.persisted())
                    .unwrap_or(false);

                if is_quit(name, persisted) {
                    queue.push(InputEvent::Quit);
                } else {
                    log::debug!("Page entered the back/forward cache, keep running");
                }
            })?;
        }

        Ok(listeners)
    }

    fn listen<F>(&mut self, name: &'static str, f: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);

        self.target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.registered.push((name, closure));

        Ok(())
    }
}

impl Drop for EventListeners {
    fn drop(&mut self) {
        for (name, closure) in self.registered.iter() {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove `{}` listener: {:?}", name, err);
            }
        }
    }
}
