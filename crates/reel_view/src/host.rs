//! Host collaborator interfaces
//!
//! The list view never talks to a particular engine. Everything it needs
//! from the outside world arrives through these traits at construction:
//! a presenter that owns visual instances, a layout host that owns the
//! viewport and content rectangles, and optional scrollbar widgets.

use std::fmt::Debug;

use reel_core::{Rect, Vec2};

use crate::bounds::ContentRect;

// ============================================================================
// Item Template
// ============================================================================

/// Description of the visual template slots are instantiated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTemplate {
    /// Host-defined template identity
    pub id: u64,
    /// Natural size of one instance; used where the configured item size is zero
    pub size: Vec2,
}

impl ItemTemplate {
    pub fn new(id: u64, size: Vec2) -> Self {
        Self { id, size }
    }
}

// ============================================================================
// Slot Presenter
// ============================================================================

/// Creates and positions pooled visual instances
pub trait SlotPresenter {
    /// Opaque reference to one visual instance
    type Handle: Clone + PartialEq + Debug;

    /// Create an instance of `template`, or None if the host refuses
    fn instantiate(&mut self, template: &ItemTemplate) -> Option<Self::Handle>;

    /// Destroy an instance (template change or teardown only)
    fn destroy(&mut self, handle: Self::Handle);

    fn set_active(&mut self, handle: &Self::Handle, active: bool);

    /// Place an instance's centre, in content-local coordinates
    fn set_position(&mut self, handle: &Self::Handle, position: Vec2);

    fn set_scale(&mut self, handle: &Self::Handle, scale: f32);
}

// ============================================================================
// Layout Host
// ============================================================================

/// Provides viewport and content rectangles and layout scheduling
pub trait LayoutHost {
    /// Viewport rectangle in viewport-local space, None if not bound
    fn viewport_rect(&self) -> Option<Rect>;

    /// Current content rectangle, None if not bound
    fn content(&self) -> Option<ContentRect>;

    /// Write back the content rectangle (position, size or pivot changed)
    fn set_content(&mut self, content: ContentRect);

    /// Convert a screen-space pointer position into viewport-local space
    fn screen_to_local(&self, screen: Vec2) -> Option<Vec2>;

    /// Schedule a layout pass for the next frame
    fn mark_layout_dirty(&mut self);

    /// Run a layout pass immediately
    fn force_layout_rebuild(&mut self);
}

// ============================================================================
// Scrollbar Widget
// ============================================================================

/// A scrollbar bound to one axis of the view
pub trait ScrollbarWidget {
    /// Normalized handle position in `[0, 1]`
    fn set_value(&mut self, value: f32);

    /// Handle size as a fraction of the track
    fn set_size(&mut self, size: f32);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Extent of the scrollbar across its track
    fn thickness(&self) -> f32;
}

/// Invoked with `(actual_index, handle)` for every slot needing content
pub type RenderCallback<H> = Box<dyn FnMut(usize, &H)>;

/// Invoked with the normalized position when bounds or position changed
pub type ValueChangedCallback = Box<dyn FnMut(Vec2)>;
