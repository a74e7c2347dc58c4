use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputEvent {
    /// The page is going away or the host asked the animation to stop.
    Quit,
}

/// A FIFO queue of input events, shared between the event listeners that fill it and the frame
/// loop that drains it.
///
/// Clones refer to the same queue.
#[derive(Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        EventQueue::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Removes and returns all pending events in the order they arrived. Never blocks.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}
