//! Ordered state-change listeners.
//!
//! ```text
//!   transition ──▶ on_change[0..n] ──▶ on_<new state>[0..m]
//! ```
//!
//! Lists are append-only; registration order is invocation order.

use super::state::MotionState;

/// A zero-argument state-change callback.
pub type Listener = Box<dyn FnMut()>;

/// Listener lists, one per resting/travelling state plus a catch-all.
#[derive(Default)]
pub struct ListenerSet {
    on_change: Vec<Listener>,
    on_open: Vec<Listener>,
    on_opening: Vec<Listener>,
    on_closed: Vec<Listener>,
    on_closing: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_change(&mut self, listener: Listener) {
        self.on_change.push(listener);
    }

    /// Append a listener for transitions *into* `state`.
    ///
    /// `Unknown` is never entered, so listeners for it are discarded.
    pub fn push_for(&mut self, state: MotionState, listener: Listener) {
        match self.list_for(state) {
            Some(list) => list.push(listener),
            None => log::warn!("listener for {} ignored: state is never entered", state),
        }
    }

    /// Run every `on_change` listener, then every listener for `state`.
    pub fn fire(&mut self, state: MotionState) {
        for listener in &mut self.on_change {
            listener();
        }
        if let Some(list) = self.list_for(state) {
            for listener in list.iter_mut() {
                listener();
            }
        }
    }

    /// Total number of registered listeners.
    pub fn len(&self) -> usize {
        self.on_change.len()
            + self.on_open.len()
            + self.on_opening.len()
            + self.on_closed.len()
            + self.on_closing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_for(&mut self, state: MotionState) -> Option<&mut Vec<Listener>> {
        match state {
            MotionState::Open => Some(&mut self.on_open),
            MotionState::Opening => Some(&mut self.on_opening),
            MotionState::Closed => Some(&mut self.on_closed),
            MotionState::Closing => Some(&mut self.on_closing),
            MotionState::Unknown => None,
        }
    }
}

impl core::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("on_change", &self.on_change.len())
            .field("on_open", &self.on_open.len())
            .field("on_opening", &self.on_opening.len())
            .field("on_closed", &self.on_closed.len())
            .field("on_closing", &self.on_closing.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Listener {
        let log = Rc::clone(log);
        Box::new(move || log.borrow_mut().push(tag))
    }

    #[test]
    fn change_fires_before_specific() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.push_for(MotionState::Open, recorder(&log, "open"));
        set.push_change(recorder(&log, "change"));

        set.fire(MotionState::Open);
        assert_eq!(*log.borrow(), vec!["change", "open"]);
    }

    #[test]
    fn registration_order_is_invocation_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.push_for(MotionState::Closing, recorder(&log, "first"));
        set.push_for(MotionState::Closing, recorder(&log, "second"));
        set.push_for(MotionState::Closing, recorder(&log, "third"));

        set.fire(MotionState::Closing);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn only_matching_category_fires() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.push_for(MotionState::Open, recorder(&log, "open"));
        set.push_for(MotionState::Closed, recorder(&log, "closed"));

        set.fire(MotionState::Closed);
        assert_eq!(*log.borrow(), vec!["closed"]);
    }

    #[test]
    fn unknown_listeners_are_dropped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.push_for(MotionState::Unknown, recorder(&log, "unknown"));
        assert!(set.is_empty());
    }
}
