//! Workspace change notifications
//!
//! A single-threaded subscribe/publish bus standing in for the host's
//! workspace event surface. The host publishes whenever visible content may
//! have changed; the plugin's subscriptions re-run the embed pass, whose
//! per-node processed flag makes repeated delivery harmless.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Content-change signals the renderer cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// The rendered layout changed (navigation, pane resize)
    LayoutChanged,
    /// A different view became active
    ActiveViewChanged,
    /// Content was inserted into the live view
    ContentInserted,
}

/// Handle for removing a subscription at plugin stop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn()>;

/// Single-threaded workspace event bus
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<Vec<(WorkspaceEvent, SubscriptionId, Callback)>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for an event
    pub fn subscribe(&self, event: WorkspaceEvent, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((event, id, callback));
        id
    }

    /// Remove a previously registered callback; unknown ids are ignored
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers
            .borrow_mut()
            .retain(|(_, sub_id, _)| *sub_id != id);
    }

    /// Invoke every callback registered for the event
    pub fn publish(&self, event: WorkspaceEvent) {
        // Snapshot first so callbacks may subscribe or unsubscribe freely
        let callbacks: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|(sub_event, _, _)| *sub_event == event)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
