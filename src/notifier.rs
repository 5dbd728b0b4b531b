use log::debug;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use uuid::Uuid;

/// Handle returned by [`Notifier::attach`], used to detach the listener
/// again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Subscription(Uuid);

type Listener<S, A> = Rc<dyn Fn(&S, &A)>;

/// Broadcasts state changes of a single source object to an ordered list of
/// listeners.
///
/// The source is held weakly and serves as identity only: the notifier has
/// no lifecycle of its own and stops delivering once its source is gone.
/// Dispatch is synchronous and runs listeners in attach order. Attaching the
/// same callback twice is permitted and invokes it twice per notification.
pub struct Notifier<S, A> {
    source: Weak<S>,
    listeners: RefCell<Vec<(Subscription, Listener<S, A>)>>,
}

impl<S, A> Notifier<S, A> {
    pub fn bound_to(source: Weak<S>) -> Self {
        Notifier {
            source,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Append a listener invoked with `(source, args)` on every subsequent
    /// notification.
    pub fn attach(&self, listener: impl Fn(&S, &A) + 'static) -> Subscription {
        let subscription = Subscription(Uuid::new_v4());
        self.listeners
            .borrow_mut()
            .push((subscription, Rc::new(listener)));
        subscription
    }

    /// Remove the listener registered under `subscription`. Unknown tokens
    /// are ignored. Returns whether a listener was removed.
    pub fn detach(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|(s, _)| *s == subscription) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every currently attached listener exactly once, in attach
    /// order, with `(source, args)`.
    ///
    /// Listeners attached while a dispatch is running only see future
    /// notifications. A panicking listener aborts the remaining dispatch and
    /// propagates to the caller.
    pub fn notify(&self, args: &A) {
        let Some(source) = self.source.upgrade() else {
            debug!("dropping notification, source is gone");
            return;
        };

        // Snapshot keeps the list borrow out of listener scope, so listeners
        // may attach or detach freely without affecting this dispatch.
        let snapshot: Vec<Listener<S, A>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(source.as_ref(), args);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
