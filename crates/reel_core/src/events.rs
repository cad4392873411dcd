//! Input events consumed by the list view
//!
//! Hosts translate their own pointer/wheel callbacks into a single
//! [`InputEvent`] stream fed to one entry point.

use crate::geometry::Vec2;

/// Identifier of an event fed to a state machine
pub type EventType = u32;

/// Pointer button that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer or wheel event
///
/// `position` is in host screen space; the view converts it to
/// viewport-local space through its layout host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Drag gesture started
    Begin { position: Vec2, button: PointerButton },
    /// Drag gesture moved
    Drag { position: Vec2, button: PointerButton },
    /// Drag gesture ended
    End { button: PointerButton },
    /// Wheel step in device convention: positive `delta.y` is wheel up
    Scroll { delta: Vec2 },
}

impl InputEvent {
    /// Button for pointer events, `None` for wheel events
    pub fn button(&self) -> Option<PointerButton> {
        match self {
            InputEvent::Begin { button, .. }
            | InputEvent::Drag { button, .. }
            | InputEvent::End { button } => Some(*button),
            InputEvent::Scroll { .. } => None,
        }
    }

    /// Drag gestures only respond to the primary button
    pub fn is_primary(&self) -> bool {
        matches!(self.button(), None | Some(PointerButton::Primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_of_pointer_events_only() {
        let begin = InputEvent::Begin {
            position: Vec2::ZERO,
            button: PointerButton::Middle,
        };
        assert_eq!(begin.button(), Some(PointerButton::Middle));
        assert_eq!(InputEvent::Scroll { delta: Vec2::ONE }.button(), None);
    }

    #[test]
    fn test_primary_filter() {
        let secondary = InputEvent::Drag {
            position: Vec2::ZERO,
            button: PointerButton::Secondary,
        };
        assert!(!secondary.is_primary());
        assert!(InputEvent::Scroll { delta: Vec2::ZERO }.is_primary());
        assert!(InputEvent::End {
            button: PointerButton::Primary
        }
        .is_primary());
    }
}
