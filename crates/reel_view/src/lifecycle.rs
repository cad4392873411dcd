//! Initialization lifecycle
//!
//! A list cannot lay out slots before the host has produced valid viewport
//! bounds. Construction leaves the view `Uninitialized`; the host's first
//! completed layout moves it to `AwaitingLayout`, and the end of the next
//! frame makes it `Ready`, at which point the pool is built.
//!
//! ```text
//! Uninitialized --LAYOUT_COMPLETE--> AwaitingLayout --FRAME_END--> Ready
//!        ^                                 ^                         |
//!        |                                 +---------RESET-----------+
//!        +------------------TEARDOWN (from any state)----------------+
//! ```

use reel_core::{EventType, StateTransitions};

/// Event identifiers for [`InitState`]
pub mod lifecycle_events {
    use reel_core::EventType;

    pub const LAYOUT_COMPLETE: EventType = 100;
    pub const FRAME_END: EventType = 101;
    pub const RESET: EventType = 102;
    pub const TEARDOWN: EventType = 103;
}

/// Two-phase initialization state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InitState {
    #[default]
    Uninitialized,
    /// Waiting one frame for layout to settle
    AwaitingLayout,
    Ready,
}

impl InitState {
    pub fn is_ready(&self) -> bool {
        matches!(self, InitState::Ready)
    }
}

impl StateTransitions for InitState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use lifecycle_events::*;

        match (self, event) {
            (InitState::Uninitialized, LAYOUT_COMPLETE) => Some(InitState::AwaitingLayout),
            (InitState::AwaitingLayout, FRAME_END) => Some(InitState::Ready),
            (_, RESET) => Some(InitState::AwaitingLayout),
            (_, TEARDOWN) => Some(InitState::Uninitialized),
            _ => None,
        }
    }
}
