//! Flat state machines for widget lifecycle and interaction states
//!
//! States are plain `Copy` enums; each state decides which events it reacts
//! to. No history, guards, or hierarchical states.

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Implemented by state enums that transition on event identifiers
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Apply `event` to `state` in place
///
/// Returns true if the state changed.
pub fn send<S: StateTransitions>(state: &mut S, event: EventType) -> bool {
    match state.on_event(event) {
        Some(next) if next != *state => {
            tracing::debug!("state transition {:?} --{}--> {:?}", state, event, next);
            *state = next;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Toggle {
        Off,
        On,
    }

    const FLIP: EventType = 1;
    const NOOP: EventType = 2;

    impl StateTransitions for Toggle {
        fn on_event(&self, event: EventType) -> Option<Self> {
            match (self, event) {
                (Toggle::Off, FLIP) => Some(Toggle::On),
                (Toggle::On, FLIP) => Some(Toggle::Off),
                (state, NOOP) => Some(*state),
                _ => None,
            }
        }
    }

    #[test]
    fn test_send_transitions() {
        let mut state = Toggle::Off;
        assert!(send(&mut state, FLIP));
        assert_eq!(state, Toggle::On);
        assert!(send(&mut state, FLIP));
        assert_eq!(state, Toggle::Off);
    }

    #[test]
    fn test_self_transition_is_not_a_change() {
        let mut state = Toggle::On;
        assert!(!send(&mut state, NOOP));
        assert!(!send(&mut state, 99));
        assert_eq!(state, Toggle::On);
    }
}
