//! Single-threaded signal/listener registration.
//!
//! A [`Signal`] owns a list of listeners. Connecting returns a
//! [`Subscription`]; dropping it disconnects the listener. Disconnecting is
//! allowed from inside the listener's own callback, and a listener that is
//! disconnected during an emission is not called afterwards.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Slots<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register `callback`. It stays connected until the returned
    /// subscription is dropped.
    #[must_use = "dropping the subscription disconnects the listener"]
    pub fn connect(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            let listener: Listener<T> = Rc::new(RefCell::new(callback));
            slots.listeners.push((id, listener));
            id
        };

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        Subscription {
            disconnect: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Call every connected listener in connection order.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .slots
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        for (id, listener) in snapshot {
            let connected = self.slots.borrow().listeners.iter().any(|(lid, _)| *lid == id);
            if !connected {
                continue;
            }
            // A listener re-emitting its own signal is not re-entered.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(value);
            } else {
                tracing::warn!("signal listener re-entered, skipping");
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.slots.borrow().listeners.len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.slots.borrow().listeners.len())
            .finish()
    }
}

/// Scoped connection to a [`Signal`].
pub struct Subscription {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Disconnect now. Equivalent to dropping.
    pub fn disconnect(mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}
