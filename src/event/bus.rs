use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::event::{EventHandler, OverlayEvent};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Broadcasts overlay events to the subscribed handlers, in subscription order.
///
/// An event emitted while a dispatch is running is queued and delivered once
/// the current one finishes, so every handler sees events in emission order.
pub struct EventBus {
    handlers: RefCell<Vec<(HandlerId, Box<dyn EventHandler>)>>,
    queue: RefCell<VecDeque<OverlayEvent>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .field("queued", &self.queue.borrow().len())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            queue: RefCell::new(VecDeque::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Returns whether the handler was subscribed
    pub fn unsubscribe(&self, id: HandlerId) -> bool {
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            log::warn!("event bus: unsubscribe during dispatch ignored");
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.try_borrow().map_or(0, |handlers| handlers.len())
    }

    pub fn emit(&self, event: OverlayEvent) {
        log::trace!("event: {:?}", event);
        self.queue.borrow_mut().push_back(event);

        // Whoever holds the handlers is already draining the queue
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            return;
        };
        loop {
            let Some(event) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            for (_, handler) in handlers.iter_mut() {
                handler.handle_event(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Collect(Arc<Mutex<Vec<OverlayEvent>>>);

    impl EventHandler for Collect {
        fn handle_event(&mut self, event: &OverlayEvent) {
            self.0.lock().push(event.clone());
        }
    }

    #[test]
    fn test_every_handler_sees_every_event() {
        let bus = EventBus::new();
        let (a, b) = (Arc::new(Mutex::new(Vec::new())), Arc::new(Mutex::new(Vec::new())));
        bus.subscribe(Box::new(Collect(Arc::clone(&a))));
        bus.subscribe(Box::new(Collect(Arc::clone(&b))));

        bus.emit(OverlayEvent::StatusChanged("Draw Mode"));
        bus.emit(OverlayEvent::StrokesCommitted { count: 1 });

        assert_eq!(a.lock().len(), 2);
        assert_eq!(*a.lock(), *b.lock());
    }

    #[test]
    fn test_unsubscribed_handler_stops_receiving() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let id = bus.subscribe(Box::new(Collect(Arc::clone(&seen))));

        bus.emit(OverlayEvent::Notice("one".into()));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(OverlayEvent::Notice("two".into()));

        assert_eq!(*seen.lock(), vec![OverlayEvent::Notice("one".into())]);
        assert_eq!(bus.handler_count(), 0);
    }
}
