//! Virtualized window over the listing rows.
//!
//! Only rows inside [`Viewport::window`] are materialized on each frame. The
//! selection is tracked by row key so it survives the data being replaced.

use std::ops::Range;

/// Terminal lines per table row: one for the text columns, one more for the
/// second description line.
pub const ROW_HEIGHT: u16 = 2;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Viewport {
    keys: Vec<String>,
    selected: usize,
    selected_key: Option<String>,
    scroll_top: usize,
    view_rows: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.keys.is_empty()).then_some(self.selected)
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn view_rows(&self) -> usize {
        self.view_rows
    }

    /// Replace the row keys, keeping the selection on the same key when it
    /// still exists. Duplicate keys resolve to the first match.
    pub fn reconcile(&mut self, keys: Vec<String>) {
        let kept = self
            .selected_key
            .as_ref()
            .and_then(|key| keys.iter().position(|k| k == key));
        self.keys = keys;
        self.selected = kept.unwrap_or(self.selected);
        self.clamp();
    }

    /// Rows that fit on screen; called from render.
    pub fn set_view_rows(&mut self, rows: usize) {
        self.view_rows = rows;
        self.ensure_selected_visible();
    }

    /// Indices of the rows to draw this frame.
    pub fn window(&self) -> Range<usize> {
        let end = self.scroll_top.saturating_add(self.view_rows).min(self.keys.len());
        self.scroll_top.min(end)..end
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp();
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn page_up(&mut self) {
        self.select(self.selected.saturating_sub(self.page()));
    }

    pub fn page_down(&mut self) {
        self.select(self.selected.saturating_add(self.page()));
    }

    pub fn first(&mut self) {
        self.select(0);
    }

    pub fn last(&mut self) {
        self.select(self.keys.len().saturating_sub(1));
    }

    fn page(&self) -> usize {
        self.view_rows.max(1)
    }

    fn clamp(&mut self) {
        self.selected = self.selected.min(self.keys.len().saturating_sub(1));
        self.selected_key = self.keys.get(self.selected).cloned();
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        let capacity = self.page();
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        } else if self.selected >= self.scroll_top + capacity {
            self.scroll_top = self.selected + 1 - capacity;
        }
        let max_top = self.keys.len().saturating_sub(capacity);
        self.scroll_top = self.scroll_top.min(max_top);
    }
}
