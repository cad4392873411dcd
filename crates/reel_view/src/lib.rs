//! Reel View
//!
//! A virtualized, recyclable scroll list. A small pool of slots represents
//! an arbitrarily long (optionally looping) dataset; slots are remapped to
//! new indices as the content scrolls, and a render callback tells the host
//! which dataset index a slot now shows.
//!
//! # Features
//!
//! - **Virtual window**: bounded reassignment cost, independent of dataset size
//! - **Looping**: circular datasets with shortest-path programmatic scroll
//! - **Motion**: inertia, elastic rubber-banding, clamping, wheel input
//! - **Snapping**: auto-attach to the nearest line once motion slows
//! - **Scrollbars**: two-way normalized position binding with auto-hide
//! - **Headless host**: in-memory collaborators for tests and simulation
//!
//! # Example
//!
//! ```rust
//! use reel_animation::ManualClock;
//! use reel_core::{InputEvent, Vec2};
//! use reel_view::prelude::*;
//!
//! let clock = ManualClock::new();
//! let config = ListConfig::default().num_items(20).looping(true).movement(MovementType::Unrestricted);
//! let mut view = ScrollView::new(
//!     config,
//!     HeadlessPresenter::new(),
//!     HeadlessLayout::new(Vec2::new(200.0, 200.0)),
//!     clock.clone(),
//! );
//! view.set_template(Some(ItemTemplate::new(1, Vec2::new(200.0, 50.0))));
//!
//! for _ in 0..2 {
//!     clock.advance(0.016);
//!     view.tick();
//! }
//!
//! // Wheel up past the first item: looping lists wrap to the end
//! view.handle_input(InputEvent::Scroll { delta: Vec2::new(0.0, 60.0) });
//! clock.advance(0.016);
//! view.tick();
//! assert!(view.window().slot_for(19).is_some());
//! ```

pub mod bounds;
pub mod config;
pub mod error;
pub mod grid;
pub mod headless;
pub mod host;
pub mod lifecycle;
pub mod motion;
pub mod scroll_view;
pub mod scrollbar;
pub mod snap;
pub mod window;

pub use bounds::{BoundsTracker, ContentRect};
pub use config::{AttachSnap, ListConfig, MovementType, ScrollbarConfig, ScrollbarVisibility};
pub use error::{ConfigError, Result};
pub use grid::GridLayout;
pub use host::{
    ItemTemplate, LayoutHost, RenderCallback, ScrollbarWidget, SlotPresenter, ValueChangedCallback,
};
pub use lifecycle::{lifecycle_events, InitState};
pub use motion::{rubber_delta, MotionModel, MotionPhase};
pub use scroll_view::ScrollView;
pub use scrollbar::ScrollbarSync;
pub use snap::{closest_line_delta, AutoScroll, ScrollTarget};
pub use window::{loop_index, ItemSlot, VirtualWindow, WindowUpdate};

/// Common imports for hosts embedding a list view
pub mod prelude {
    pub use crate::config::{AttachSnap, ListConfig, MovementType, ScrollbarVisibility};
    pub use crate::headless::{HeadlessLayout, HeadlessPresenter, RecordingScrollbar};
    pub use crate::host::{ItemTemplate, LayoutHost, ScrollbarWidget, SlotPresenter};
    pub use crate::scroll_view::ScrollView;
    pub use crate::snap::ScrollTarget;
}
