use crate::view::ViewRef;
use std::rc::Rc;

/// Ordered history of views plus a cursor. `entries[0..=cursor]` is the live
/// window; anything past the cursor only exists transiently while a
/// navigation call is tearing it down.
#[derive(Default)]
pub struct NavigationStack {
    entries: Vec<ViewRef>,
    cursor: Option<usize>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<ViewRef> {
        self.cursor.map(|c| self.entries[c].clone())
    }

    pub fn entry(&self, index: usize) -> Option<ViewRef> {
        self.entries.get(index).cloned()
    }

    /// Truncates everything past the cursor, appends, and moves the cursor to
    /// the new top.
    pub fn push(&mut self, view: ViewRef) {
        self.entries.truncate(self.live_len());
        self.entries.push(view);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Overwrites the entry at the cursor, leaving cursor and length alone.
    /// Returns the previous entry. An empty stack degenerates to a push.
    pub fn replace_current(&mut self, view: ViewRef) -> Option<ViewRef> {
        match self.cursor {
            Some(cursor) => Some(std::mem::replace(&mut self.entries[cursor], view)),
            None => {
                self.push(view);
                None
            }
        }
    }

    /// Removes and returns the entries past the cursor.
    pub fn drain_forward(&mut self) -> Vec<ViewRef> {
        self.entries.split_off(self.live_len())
    }

    /// The entries past the given cursor position, left in place. `back` tears
    /// these down without changing the stack length.
    pub fn entries_after(&self, cursor: Option<usize>) -> Vec<ViewRef> {
        let from = cursor.map_or(0, |c| c + 1);
        self.entries[from.min(self.entries.len())..].to_vec()
    }

    /// Whether a ptr-equal reference to the view sits at or before the
    /// cursor. A cached instance can appear at several stack positions at
    /// once; tearing down a stale duplicate must not touch the live one.
    pub fn live_window_contains(&self, view: &ViewRef) -> bool {
        self.entries[..self.live_len()]
            .iter()
            .any(|entry| Rc::ptr_eq(entry, view))
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        debug_assert!(cursor.map_or(true, |c| c < self.entries.len()));
        self.cursor = cursor;
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewRef> {
        self.entries.iter()
    }

    fn live_len(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }
}
