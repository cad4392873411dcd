//! Scrollbar synchronisation
//!
//! Mirrors the normalized position and handle size onto optional scrollbar
//! widgets, applies the visibility policy, and reports how much room
//! expand-viewport scrollbars take from the viewport.

use reel_core::{Axis, Vec2};

use crate::bounds::BoundsTracker;
use crate::config::{ListConfig, ScrollbarVisibility};
use crate::host::ScrollbarWidget;

#[derive(Default)]
pub struct ScrollbarSync {
    horizontal: Option<Box<dyn ScrollbarWidget>>,
    vertical: Option<Box<dyn ScrollbarWidget>>,
}

impl ScrollbarSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or unbind with None) the scrollbar for an axis
    pub fn set(&mut self, axis: Axis, scrollbar: Option<Box<dyn ScrollbarWidget>>) {
        match axis {
            Axis::Horizontal => self.horizontal = scrollbar,
            Axis::Vertical => self.vertical = scrollbar,
        }
    }

    pub fn get(&self, axis: Axis) -> Option<&dyn ScrollbarWidget> {
        match axis {
            Axis::Horizontal => self.horizontal.as_deref(),
            Axis::Vertical => self.vertical.as_deref(),
        }
    }

    fn get_mut(&mut self, axis: Axis) -> Option<&mut (dyn ScrollbarWidget + 'static)> {
        match axis {
            Axis::Horizontal => self.horizontal.as_deref_mut(),
            Axis::Vertical => self.vertical.as_deref_mut(),
        }
    }

    /// Push handle size and value for both axes
    pub fn update(&mut self, bounds: &BoundsTracker, offset: Vec2) {
        let normalized = bounds.normalized_position();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let Some(scrollbar) = self.get_mut(axis) {
                scrollbar.set_size(bounds.scrollbar_size(axis, offset));
                scrollbar.set_value(normalized.along(axis));
            }
        }
    }

    /// Show or hide auto-hiding scrollbars
    pub fn update_visibility(&mut self, bounds: &BoundsTracker, config: &ListConfig) {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let policy = config.scrollbar(axis).visibility;
            if !policy.auto_hides() {
                continue;
            }
            let needed = bounds.scrolling_needed(axis);
            if let Some(scrollbar) = self.get_mut(axis) {
                if scrollbar.is_visible() != needed {
                    tracing::debug!("{:?} scrollbar visible: {}", axis, needed);
                    scrollbar.set_visible(needed);
                }
            }
        }
    }

    /// Room the viewport gives up to visible expand-viewport scrollbars
    ///
    /// `x` is taken from the right edge by the vertical scrollbar and `y`
    /// from the bottom edge by the horizontal one.
    pub fn viewport_inset(&self, config: &ListConfig) -> Vec2 {
        let inset = |axis: Axis| {
            let scrollbar_config = config.scrollbar(axis);
            match self.get(axis) {
                Some(scrollbar)
                    if scrollbar_config.visibility
                        == ScrollbarVisibility::AutoHideAndExpandViewport
                        && scrollbar.is_visible() =>
                {
                    scrollbar.thickness() + scrollbar_config.spacing
                }
                _ => 0.0,
            }
        };
        Vec2::new(inset(Axis::Vertical), inset(Axis::Horizontal))
    }
}

impl std::fmt::Debug for ScrollbarSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollbarSync")
            .field("horizontal", &self.horizontal.is_some())
            .field("vertical", &self.vertical.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::ContentRect;
    use crate::config::ScrollbarConfig;
    use crate::headless::RecordingScrollbar;
    use reel_core::Rect;

    fn bounds(content_height: f32, offset_y: f32) -> BoundsTracker {
        let mut bounds = BoundsTracker::new();
        bounds.update(
            Rect::from_top_left(Vec2::new(100.0, 200.0)),
            &ContentRect::new(Vec2::new(0.0, offset_y), Vec2::new(100.0, content_height)),
        );
        bounds
    }

    #[test]
    fn test_update_pushes_value_and_size() {
        let bar = RecordingScrollbar::new(8.0);
        let mut sync = ScrollbarSync::new();
        sync.set(Axis::Vertical, Some(Box::new(bar.clone())));

        sync.update(&bounds(1000.0, 400.0), Vec2::ZERO);
        assert!((bar.value() - 0.5).abs() < 1e-6);
        assert!((bar.size() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_auto_hide_follows_scrollability() {
        let bar = RecordingScrollbar::new(8.0);
        let mut sync = ScrollbarSync::new();
        sync.set(Axis::Vertical, Some(Box::new(bar.clone())));
        let config = ListConfig::default().scrollbar_config(
            Axis::Vertical,
            ScrollbarConfig {
                visibility: ScrollbarVisibility::AutoHideAndExpandViewport,
                spacing: 2.0,
            },
        );

        sync.update_visibility(&bounds(100.0, 0.0), &config);
        assert!(!bar.is_visible());
        assert_eq!(sync.viewport_inset(&config), Vec2::ZERO);

        sync.update_visibility(&bounds(1000.0, 0.0), &config);
        assert!(bar.is_visible());
        assert_eq!(sync.viewport_inset(&config), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_permanent_scrollbar_untouched() {
        let bar = RecordingScrollbar::new(8.0);
        let mut sync = ScrollbarSync::new();
        sync.set(Axis::Vertical, Some(Box::new(bar.clone())));
        sync.update_visibility(&bounds(100.0, 0.0), &ListConfig::default());
        assert!(bar.is_visible());
        assert_eq!(sync.viewport_inset(&ListConfig::default()), Vec2::ZERO);
    }
}
