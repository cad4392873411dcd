//! Reel Widget Library
//!
//! Composite widgets that drive a [`reel_view::ScrollView`] as a black box.

pub mod dropdown;

pub use dropdown::{Caption, Dropdown, DropdownOption, RowView};
