use crate::view::ViewRef;
use std::collections::HashMap;

/// Memoizes one view per `(name, query)` key. Owned by a single manager
/// instance so independent managers never share state. Entries are removed by
/// the manager in the same synchronous call that unmounts the view, so no
/// entry outlives every live-window reference to it.
#[derive(Default)]
pub struct ViewCache {
    views: HashMap<String, ViewRef>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ViewRef> {
        self.views.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, view: ViewRef) {
        self.views.insert(key, view);
    }

    pub fn remove(&mut self, key: &str) -> Option<ViewRef> {
        self.views.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.views.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
