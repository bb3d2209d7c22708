//! # Change Notification
//!
//! A plain listener list. Numbers and the equation queue each own one and
//! call [`Notifier::notify`] exactly once per applied mutation, synchronously,
//! before the mutating call returns.
//!
//! Listeners are `FnMut() + 'static` and carry no payload: subscribers
//! re-read whatever state they care about. A listener cannot reach back into
//! the object that is notifying it: the owner is mutably borrowed for the
//! whole `notify` call. A listener holding it behind `Rc<RefCell<_>>` panics
//! on `borrow_mut()` during notification, or gets `Err` from
//! `try_borrow_mut()`.

use std::fmt;

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was never issued or is already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Calls every listener in subscription order.
    pub fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
