// SPDX-License-Identifier: MPL-2.0
//! Picker status holder with change notification.

use crate::domain::picker::PickerStatus;
use std::fmt;

type StatusObserver = Box<dyn FnMut(PickerStatus)>;

/// Tracks [`PickerStatus`] and notifies observers of every applied change.
#[derive(Default)]
pub struct LifecycleStateMachine {
    status: PickerStatus,
    observers: Vec<StatusObserver>,
}

impl LifecycleStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> PickerStatus {
        self.status
    }

    pub fn subscribe(&mut self, observer: impl FnMut(PickerStatus) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Moves to `next` if the transition table allows it.
    ///
    /// Returns `true` when the status changed. Re-entering the current status
    /// is a silent no-op; any other refused transition is logged.
    pub fn transition(&mut self, next: PickerStatus) -> bool {
        if self.status == next {
            return false;
        }
        if !self.status.can_transition_to(next) {
            tracing::warn!(from = %self.status, to = %next, "rejected picker status transition");
            return false;
        }

        tracing::debug!(from = %self.status, to = %next, "picker status changed");
        self.status = next;
        for observer in &mut self.observers {
            observer(next);
        }
        true
    }

    /// `Unknown -> Selecting` on first interaction; no-op afterwards.
    pub fn begin_selecting(&mut self) -> bool {
        self.status == PickerStatus::Unknown && self.transition(PickerStatus::Selecting)
    }
}

impl fmt::Debug for LifecycleStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleStateMachine")
            .field("status", &self.status)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded() -> (LifecycleStateMachine, Rc<RefCell<Vec<PickerStatus>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut machine = LifecycleStateMachine::new();
        let sink = Rc::clone(&seen);
        machine.subscribe(move |status| sink.borrow_mut().push(status));
        (machine, seen)
    }

    #[test]
    fn starts_unknown() {
        assert_eq!(LifecycleStateMachine::new().status(), PickerStatus::Unknown);
    }

    #[test]
    fn every_applied_transition_notifies() {
        let (mut machine, seen) = recorded();
        assert!(machine.begin_selecting());
        assert!(machine.transition(PickerStatus::Exporting));
        assert!(machine.transition(PickerStatus::Completed));

        assert_eq!(
            *seen.borrow(),
            [
                PickerStatus::Selecting,
                PickerStatus::Exporting,
                PickerStatus::Completed
            ]
        );
    }

    #[test]
    fn terminal_status_is_never_left() {
        let (mut machine, seen) = recorded();
        machine.transition(PickerStatus::Cancelled);
        assert!(!machine.transition(PickerStatus::Selecting));
        assert!(!machine.transition(PickerStatus::Completed));
        assert!(!machine.begin_selecting());

        assert_eq!(machine.status(), PickerStatus::Cancelled);
        assert_eq!(*seen.borrow(), [PickerStatus::Cancelled]);
    }

    #[test]
    fn same_status_is_not_renotified() {
        let (mut machine, seen) = recorded();
        machine.begin_selecting();
        assert!(!machine.transition(PickerStatus::Selecting));
        assert!(!machine.begin_selecting());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn unknown_may_complete_directly() {
        let mut machine = LifecycleStateMachine::new();
        assert!(machine.transition(PickerStatus::Completed));
        assert_eq!(machine.status(), PickerStatus::Completed);
    }
}
