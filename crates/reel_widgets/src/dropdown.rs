//! Dropdown widget
//!
//! A caption plus a recyclable option list. Opening the dropdown feeds the
//! option count into the list; rows are filled from the list's render
//! callback and keep their selected highlight in sync with the current
//! selection.
//!
//! Drawing is left to the host. It reads [`Dropdown::caption`],
//! [`Dropdown::is_open`] and [`Dropdown::row`], and forwards row clicks to
//! [`Dropdown::click_row`].
//!
//! # Example
//!
//! ```rust
//! use reel_animation::ManualClock;
//! use reel_core::Vec2;
//! use reel_view::prelude::*;
//! use reel_widgets::Dropdown;
//!
//! let clock = ManualClock::new();
//! let mut list = ScrollView::new(
//!     ListConfig::default(),
//!     HeadlessPresenter::new(),
//!     HeadlessLayout::new(Vec2::new(120.0, 160.0)),
//!     clock.clone(),
//! );
//! list.set_template(Some(ItemTemplate::new(1, Vec2::new(120.0, 32.0))));
//!
//! let mut dropdown = Dropdown::new(list).with_options(["Low", "Medium", "High"]);
//! dropdown.select_value("High");
//! assert_eq!(dropdown.caption().text, "High");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use reel_core::InputEvent;
use reel_view::{ScrollView, SlotPresenter};

// ============================================================================
// Options and views
// ============================================================================

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropdownOption {
    pub text: String,
    /// Host image key
    pub image: Option<String>,
}

impl DropdownOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    /// Image-only option
    pub fn image(image: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            image: Some(image.into()),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl From<&str> for DropdownOption {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for DropdownOption {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// What the caption shows; empty when nothing is selectable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caption {
    pub text: String,
    pub image: Option<String>,
}

/// Content last rendered into one pooled row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Option index the row shows
    pub index: usize,
    pub text: String,
    pub image: Option<String>,
    /// Draw the selected highlight
    pub selected: bool,
}

// ============================================================================
// Shared state
// ============================================================================

/// State shared with the list's render callback
#[derive(Debug)]
struct DropdownState<H> {
    options: Vec<DropdownOption>,
    selected: usize,
    rows: Vec<(H, RowView)>,
}

impl<H: Clone + PartialEq> DropdownState<H> {
    fn render_row(&mut self, index: usize, handle: &H) {
        let Some(option) = self.options.get(index) else {
            return;
        };
        let view = RowView {
            index,
            text: option.text.clone(),
            image: option.image.clone(),
            selected: index == self.selected,
        };
        match self.rows.iter_mut().find(|(h, _)| h == handle) {
            Some((_, row)) => *row = view,
            None => self.rows.push((handle.clone(), view)),
        }
    }

    fn refresh_highlight(&mut self) {
        let selected = self.selected;
        for (_, row) in &mut self.rows {
            row.selected = row.index == selected;
        }
    }

    fn caption(&self) -> Caption {
        self.options
            .get(self.selected)
            .map(|option| Caption {
                text: option.text.clone(),
                image: option.image.clone(),
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Dropdown
// ============================================================================

type ValueListener = Box<dyn FnMut(usize)>;

pub struct Dropdown<P: SlotPresenter> {
    list: ScrollView<P>,
    state: Rc<RefCell<DropdownState<P::Handle>>>,
    open: bool,
    listeners: Vec<ValueListener>,
}

impl<P> Dropdown<P>
where
    P: SlotPresenter,
    P::Handle: 'static,
{
    /// Take over `list`; its render callback is replaced by the dropdown's
    pub fn new(mut list: ScrollView<P>) -> Self {
        let state = Rc::new(RefCell::new(DropdownState {
            options: Vec::new(),
            selected: 0,
            rows: Vec::new(),
        }));
        let rows = state.clone();
        list.on_render(move |index, handle| rows.borrow_mut().render_row(index, handle));
        Self {
            list,
            state,
            open: false,
            listeners: Vec::new(),
        }
    }

    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<DropdownOption>,
    {
        self.add_options(options);
        self
    }

    pub fn list(&self) -> &ScrollView<P> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ScrollView<P> {
        &mut self.list
    }

    pub fn option_count(&self) -> usize {
        self.state.borrow().options.len()
    }

    pub fn option(&self, index: usize) -> Option<DropdownOption> {
        self.state.borrow().options.get(index).cloned()
    }

    pub fn selected_index(&self) -> usize {
        self.state.borrow().selected
    }

    /// Text of the selected option
    pub fn selected_value(&self) -> Option<String> {
        let state = self.state.borrow();
        state.options.get(state.selected).map(|o| o.text.clone())
    }

    pub fn caption(&self) -> Caption {
        self.state.borrow().caption()
    }

    /// Row content last rendered into `handle`
    pub fn row(&self, handle: &P::Handle) -> Option<RowView> {
        self.state
            .borrow()
            .rows
            .iter()
            .find(|(h, _)| h == handle)
            .map(|(_, row)| row.clone())
    }

    /// Rows of every active slot, in option order
    pub fn visible_rows(&self) -> Vec<RowView> {
        let state = self.state.borrow();
        let mut rows: Vec<RowView> = self
            .list
            .window()
            .active_slots()
            .filter_map(|slot| {
                state
                    .rows
                    .iter()
                    .find(|(h, _)| *h == slot.handle)
                    .map(|(_, row)| row.clone())
            })
            .collect();
        rows.sort_by_key(|row| row.index);
        rows
    }

    /// Register a listener for selection changes
    pub fn on_value_changed<F>(&mut self, listener: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn add_options<I, O>(&mut self, options: I)
    where
        I: IntoIterator<Item = O>,
        O: Into<DropdownOption>,
    {
        self.state
            .borrow_mut()
            .options
            .extend(options.into_iter().map(Into::into));
        if self.open {
            self.sync_list();
        }
    }

    /// Remove the option at `index`
    ///
    /// Removing the selected option selects the one before it. Removing an
    /// option before the selection keeps the same option selected.
    pub fn remove_at(&mut self, index: usize) {
        let reselect = {
            let mut state = self.state.borrow_mut();
            if index >= state.options.len() {
                return;
            }
            state.options.remove(index);
            if index == state.selected {
                Some(index.saturating_sub(1))
            } else {
                if index < state.selected {
                    state.selected -= 1;
                    state.refresh_highlight();
                }
                None
            }
        };

        match reselect {
            Some(index) => self.select_index(index),
            None if self.open => self.sync_list(),
            None => {}
        }
    }

    /// Remove the first option whose text is `value`
    pub fn remove_value(&mut self, value: &str) {
        let index = self.position_of(value);
        if let Some(index) = index {
            self.remove_at(index);
        }
    }

    pub fn clear_options(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.options.clear();
            state.rows.clear();
            state.selected = 0;
        }
        if self.open {
            self.sync_list();
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select `index`, clamped to the option range, and close the list
    ///
    /// Listeners fire even when the index did not change.
    pub fn select_index(&mut self, index: usize) {
        let index = {
            let mut state = self.state.borrow_mut();
            let index = index.min(state.options.len().saturating_sub(1));
            state.selected = index;
            state.refresh_highlight();
            index
        };
        tracing::debug!("dropdown selected {}", index);
        for listener in &mut self.listeners {
            listener(index);
        }
        self.close();
    }

    /// Select the first option whose text is `value`; unknown values are ignored
    pub fn select_value(&mut self, value: &str) {
        if let Some(index) = self.position_of(value) {
            self.select_index(index);
        }
    }

    /// Host click on the row shown by `handle`
    ///
    /// Returns true if the click changed the selection.
    pub fn click_row(&mut self, handle: &P::Handle) -> bool {
        if !self.open || !self.list.window().active_slots().any(|s| s.handle == *handle) {
            return false;
        }
        let Some(row) = self.row(handle) else {
            return false;
        };
        if row.selected {
            return false;
        }
        self.select_index(row.index);
        true
    }

    fn position_of(&self, value: &str) -> Option<usize> {
        self.state
            .borrow()
            .options
            .iter()
            .position(|option| option.text == value)
    }

    // =========================================================================
    // Open state
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the list with the current option count
    pub fn open(&mut self) {
        self.open = true;
        tracing::debug!("dropdown opened");
        self.sync_list();
    }

    pub fn close(&mut self) {
        if self.open {
            tracing::debug!("dropdown closed");
        }
        self.open = false;
    }

    /// Caption toggle
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Advance the list one frame; a closed list does not update
    pub fn tick(&mut self) {
        if self.open {
            self.list.tick();
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        if self.open {
            self.list.handle_input(event);
        }
    }

    fn sync_list(&mut self) {
        let count = self.option_count();
        self.list.set_num_items(count);
    }
}

impl<P: SlotPresenter> std::fmt::Debug for Dropdown<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Dropdown")
            .field("options", &state.options.len())
            .field("selected", &state.selected)
            .field("open", &self.open)
            .finish()
    }
}
