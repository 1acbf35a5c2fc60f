use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`EventChannel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Synchronous single-threaded broadcast.
///
/// `raise` walks a snapshot of the listener list, so listeners may subscribe
/// or unsubscribe while being notified; the change applies from the next
/// raise. A listener that re-raises the channel it is listening on is not
/// re-entered.
pub struct EventChannel<T> {
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: Cell<u64>,
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let listener: Listener<T> = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Notify every listener, in subscription order.
    pub fn raise(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in snapshot {
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_reaches_listeners_in_order() {
        let channel = EventChannel::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&log);
        channel.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&log);
        channel.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        channel.raise(&7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let channel = EventChannel::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = channel.subscribe(move |_| h.set(h.get() + 1));

        channel.raise(&());
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.raise(&());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscribing_during_raise_applies_next_time() {
        let channel = Rc::new(EventChannel::<u8>::new());
        let late_hits = Rc::new(Cell::new(0));

        let ch = Rc::clone(&channel);
        let late = Rc::clone(&late_hits);
        let added = Rc::new(Cell::new(false));
        channel.subscribe(move |_| {
            if !added.get() {
                added.set(true);
                let late = Rc::clone(&late);
                ch.subscribe(move |_| late.set(late.get() + 1));
            }
        });

        channel.raise(&1);
        assert_eq!(late_hits.get(), 0);
        channel.raise(&2);
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn unsubscribing_during_raise_applies_next_time() {
        let channel = Rc::new(EventChannel::<u8>::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let later_id = Rc::new(Cell::new(None));

        // The first listener removes itself and the one after it.
        let ch = Rc::clone(&channel);
        let first_log = Rc::clone(&log);
        let later = Rc::clone(&later_id);
        let first_id = Rc::new(Cell::new(None));
        let own = Rc::clone(&first_id);
        let id = channel.subscribe(move |v| {
            first_log.borrow_mut().push(("first", *v));
            if let Some(id) = own.get() {
                ch.unsubscribe(id);
            }
            if let Some(id) = later.get() {
                ch.unsubscribe(id);
            }
        });
        first_id.set(Some(id));

        let second_log = Rc::clone(&log);
        later_id.set(Some(channel.subscribe(move |v| second_log.borrow_mut().push(("second", *v)))));

        channel.raise(&1);
        assert_eq!(*log.borrow(), vec![("first", 1), ("second", 1)]);
        assert_eq!(channel.listener_count(), 0);

        channel.raise(&2);
        assert_eq!(*log.borrow(), vec![("first", 1), ("second", 1)]);
    }
}
