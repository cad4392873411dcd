//! List view configuration
//!
//! # Example
//!
//! ```rust
//! use reel_view::{ListConfig, MovementType};
//! use reel_core::{Axis, Vec2};
//!
//! let config = ListConfig::default()
//!     .motion(Axis::Horizontal)
//!     .movement(MovementType::Unrestricted)
//!     .item_size(Vec2::new(120.0, 80.0))
//!     .looping(true);
//! assert!(config.validate().is_ok());
//!
//! let parsed = ListConfig::from_toml_str(
//!     r#"
//!     motion = "vertical"
//!     fixed_count = 3
//!     item_size = { x = 64.0, y = 64.0 }
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(parsed.fixed_count, 3);
//! ```

use std::path::Path;

use reel_animation::{Curve, Easing};
use reel_core::{Axis, Margin, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

// ============================================================================
// Movement
// ============================================================================

/// How content behaves at its edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Scroll forever, no edges (typical for looping lists)
    Unrestricted,
    /// Can pass the edges, springs back into place (default)
    #[default]
    Elastic,
    /// Hard-limited to the content edges
    Clamped,
}

/// Snap-to-item parameters used when auto-attach is enabled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachSnap {
    /// Coasting speed (units/second) below which the list snaps
    pub velocity_threshold: f32,
    /// Seconds the snap animation takes
    pub duration: f32,
}

impl Default for AttachSnap {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.5,
            duration: 0.3,
        }
    }
}

// ============================================================================
// Scrollbars
// ============================================================================

/// Scrollbar visibility policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollbarVisibility {
    /// Always shown (default)
    #[default]
    Permanent,
    /// Shown only when content exceeds the viewport on the scrollbar's axis
    AutoHide,
    /// Auto-hide, and the viewport shrinks to make room while shown
    AutoHideAndExpandViewport,
}

impl ScrollbarVisibility {
    pub fn auto_hides(&self) -> bool {
        !matches!(self, ScrollbarVisibility::Permanent)
    }
}

/// Per-scrollbar configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarConfig {
    pub visibility: ScrollbarVisibility,
    /// Gap between the viewport and the scrollbar when the viewport expands
    pub spacing: f32,
}

// ============================================================================
// List Configuration
// ============================================================================

/// Settings of a list view
///
/// Changing `fixed_count`, `item_size`, `spacing`, `margin` or the template
/// on a live view invalidates pooled geometry; the view repositions every
/// slot on the next pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Axis the list scrolls along
    pub motion: Axis,
    /// Edge behavior
    pub movement: MovementType,
    /// Elastic snap-back smoothing time in seconds
    pub elasticity: f32,
    /// Keep moving after a drag is released
    pub inertia: bool,
    /// Fraction of velocity retained per second while coasting
    pub deceleration_rate: f32,
    /// Multiplier for wheel deltas
    pub scroll_sensitivity: f32,
    /// Padding around the items inside the content
    pub margin: Margin,
    /// Items per line
    pub fixed_count: u32,
    /// Item size; zero components fall back to the template's size
    pub item_size: Vec2,
    /// Gap between items
    pub spacing: Vec2,
    /// Wrap the dataset end to its start
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Snap to the nearest item once motion slows down
    pub auto_attach: bool,
    pub attach_snap: AttachSnap,
    /// Easing of programmatic and snap scrolls
    pub snap_easing: Easing,
    /// Per-item scale by distance from the viewport centre (off when None)
    pub scale_curve: Option<Curve>,
    /// Number of items in the dataset
    pub num_items: usize,
    pub horizontal_scrollbar: ScrollbarConfig,
    pub vertical_scrollbar: ScrollbarConfig,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            motion: Axis::Vertical,
            movement: MovementType::Elastic,
            elasticity: 0.1,
            inertia: true,
            deceleration_rate: 0.135,
            scroll_sensitivity: 1.0,
            margin: Margin::ZERO,
            fixed_count: 1,
            item_size: Vec2::ZERO,
            spacing: Vec2::ZERO,
            looping: false,
            auto_attach: false,
            attach_snap: AttachSnap::default(),
            snap_easing: Easing::EaseInOutCubic,
            scale_curve: None,
            num_items: 0,
            horizontal_scrollbar: ScrollbarConfig::default(),
            vertical_scrollbar: ScrollbarConfig::default(),
        }
    }
}

impl ListConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ListConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("loaded list config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.fixed_count == 0 {
            return Err(ConfigError::InvalidFixedCount);
        }
        if self.item_size.x < 0.0 || self.item_size.y < 0.0 {
            return Err(ConfigError::InvalidItemSize(self.item_size));
        }
        if !self.elasticity.is_finite() || self.elasticity < 0.0 {
            return Err(ConfigError::InvalidElasticity(self.elasticity));
        }
        if !(0.0..=1.0).contains(&self.deceleration_rate) {
            return Err(ConfigError::InvalidDecelerationRate(
                self.deceleration_rate,
            ));
        }
        if self.attach_snap.duration < 0.0 {
            return Err(ConfigError::InvalidSnapDuration(self.attach_snap.duration));
        }
        Ok(())
    }

    /// Scrollbar settings for an axis
    pub fn scrollbar(&self, axis: Axis) -> &ScrollbarConfig {
        match axis {
            Axis::Horizontal => &self.horizontal_scrollbar,
            Axis::Vertical => &self.vertical_scrollbar,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    pub fn motion(mut self, axis: Axis) -> Self {
        self.motion = axis;
        self
    }

    pub fn movement(mut self, movement: MovementType) -> Self {
        self.movement = movement;
        self
    }

    pub fn elasticity(mut self, seconds: f32) -> Self {
        self.elasticity = seconds;
        self
    }

    /// Enable or disable inertia
    pub fn inertia(mut self, enabled: bool) -> Self {
        self.inertia = enabled;
        self
    }

    pub fn deceleration_rate(mut self, rate: f32) -> Self {
        self.deceleration_rate = rate;
        self
    }

    pub fn scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn fixed_count(mut self, count: u32) -> Self {
        self.fixed_count = count;
        self
    }

    pub fn item_size(mut self, size: Vec2) -> Self {
        self.item_size = size;
        self
    }

    pub fn spacing(mut self, spacing: Vec2) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Enable snapping with the given parameters
    pub fn auto_attach(mut self, snap: AttachSnap) -> Self {
        self.auto_attach = true;
        self.attach_snap = snap;
        self
    }

    pub fn snap_easing(mut self, easing: Easing) -> Self {
        self.snap_easing = easing;
        self
    }

    pub fn scale_curve(mut self, curve: Curve) -> Self {
        self.scale_curve = Some(curve);
        self
    }

    pub fn num_items(mut self, count: usize) -> Self {
        self.num_items = count;
        self
    }

    pub fn scrollbar_config(mut self, axis: Axis, scrollbar: ScrollbarConfig) -> Self {
        match axis {
            Axis::Horizontal => self.horizontal_scrollbar = scrollbar,
            Axis::Vertical => self.vertical_scrollbar = scrollbar,
        }
        self
    }
}
