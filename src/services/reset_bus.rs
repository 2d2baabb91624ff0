//! Reset broadcast channel.
//!
//! A page-level "Reset" control has no reference to the frame it should
//! clear. Instead, frames subscribe to a [`ResetBus`] owned by the
//! application root, and the control broadcasts on the bus. Every live
//! subscriber resets independently; broadcast order does not matter since
//! reset is idempotent.
//!
//! Subscriptions are scoped: dropping the returned [`ResetSubscription`]
//! removes the listener, so a torn-down widget is never called.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::models::Abacus;

type Handler = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Payload-less broadcast channel for the reset signal.
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct ResetBus {
    registry: Rc<RefCell<Registry>>,
}

impl ResetBus {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` to run on every broadcast.
    pub fn subscribe(&self, handler: impl FnMut() + 'static) -> ResetSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        registry.handlers.push((id, handler));
        trace!(id, "reset listener subscribed");

        ResetSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Subscribes a shared frame so each broadcast resets it.
    ///
    /// The subscription holds only a weak reference; a frame dropped while
    /// still subscribed is skipped.
    pub fn attach(&self, abacus: &Rc<RefCell<Abacus>>) -> ResetSubscription {
        let frame = Rc::downgrade(abacus);
        self.subscribe(move || {
            if let Some(frame) = frame.upgrade() {
                // A frame already borrowed is mid-mutation on this thread; the
                // broadcast came from its own listener, so skip it
                if let Ok(mut frame) = frame.try_borrow_mut() {
                    frame.reset();
                }
            }
        })
    }

    /// Runs every subscribed handler once.
    ///
    /// Returns the number of handlers invoked.
    pub fn broadcast(&self) -> usize {
        // Snapshot first so handlers may subscribe or drop subscriptions
        let handlers: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        let mut invoked = 0;
        for (id, handler) in handlers {
            // An earlier handler may have dropped this subscription
            if !self.is_subscribed(id) {
                continue;
            }
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (&mut *handler)();
                invoked += 1;
            }
        }
        debug!(listeners = invoked, "reset broadcast");
        invoked
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.registry
            .borrow()
            .handlers
            .iter()
            .any(|(live, _)| *live == id)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl fmt::Debug for ResetBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard for one reset listener; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct ResetSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl ResetSubscription {
    /// Removes the listener now instead of at drop.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ResetSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.handlers.retain(|(id, _)| *id != self.id);
                trace!(id = self.id, "reset listener unsubscribed");
            }
        }
    }
}

impl fmt::Debug for ResetSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetSubscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
