use crate::cache::ViewCache;
use crate::events::{HistoryState, NavigationEvent, NavigationReason, RouteChange, StackEntry};
use crate::navigator::NavigatorAdapter;
use crate::query::{build_href, view_key, Query};
use crate::routes::RouteTable;
use crate::stack::NavigationStack;
use crate::view::{self, View, ViewRef};
use log::{debug, warn};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("no matched route for '{0}'")]
    NoMatchedRoute(String),
    #[error("could not resolve the parent chain of '{0}'")]
    UnresolvedParent(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PushOptions {
    /// Carried through to `RouteChange` untouched; the anchor-interception
    /// layer uses it to skip navigations it initiated itself.
    pub ignore: bool,
}

type Listener = Box<dyn FnMut(&NavigationEvent)>;

/// Orchestrates the route table, the view cache and the navigation stack, and
/// keeps the address-bar adapter in sync. Every public method runs its whole
/// read-mutate-notify cycle synchronously; a call either commits a consistent
/// `(entries, cursor, cache)` triple or aborts before mutating anything.
pub struct NavigationManager<N: NavigatorAdapter> {
    routes: RouteTable,
    navigator: N,
    cache: ViewCache,
    stack: NavigationStack,
    listeners: Vec<Listener>,
}

impl<N: NavigatorAdapter> NavigationManager<N> {
    pub fn new(routes: RouteTable, navigator: N) -> Self {
        NavigationManager {
            routes,
            navigator,
            cache: ViewCache::new(),
            stack: NavigationStack::new(),
            listeners: vec![],
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&NavigationEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }

    pub fn current_view(&self) -> Option<ViewRef> {
        self.stack.current()
    }

    pub fn push(&mut self, name: &str, query: Query) {
        self.push_with_options(name, query, PushOptions::default());
    }

    /// Navigates forward, appending a new (or reused) entry to the live
    /// window. Everything past the cursor is torn down first, browser style.
    pub fn push_with_options(&mut self, name: &str, query: Query, options: PushOptions) {
        let Some(href) = self.resolve_href(name, &query) else {
            warn!("no matched route for '{}', push ignored", name);
            return;
        };
        if self.navigator.href() == href {
            debug!("already at '{}', push ignored", href);
            return;
        }
        let view = match self.resolve(name, query) {
            Ok(view) => view,
            Err(e) => {
                warn!("push to '{}' aborted: {}", name, e);
                return;
            }
        };
        for stale in self.stack.drain_forward() {
            self.destroy(&stale);
        }
        let previous = self.stack.current();
        self.stack.push(view.clone());
        self.navigator.set_location(&href, name);
        Self::activate(previous.as_ref(), &view);
        self.emit_route_change(&view, NavigationReason::Push, options.ignore);
        self.emit_state_change();
    }

    /// Overwrites the current top of stack in place: the previous top never
    /// existed as far as back-history is concerned (redirect semantics).
    pub fn replace(&mut self, name: &str, query: Query) {
        let Some(href) = self.resolve_href(name, &query) else {
            warn!("no matched route for '{}', replace ignored", name);
            return;
        };
        if self.navigator.href() == href {
            debug!("already at '{}', replace ignored", href);
            return;
        }
        let view = match self.resolve(name, query) {
            Ok(view) => view,
            Err(e) => {
                warn!("replace with '{}' aborted: {}", name, e);
                return;
            }
        };
        let previous = self.stack.current();
        self.stack.replace_current(view.clone());
        if let Some(previous) = previous {
            if !Rc::ptr_eq(&previous, &view) {
                Self::hide_chain(&previous);
                self.destroy(&previous);
            }
        }
        self.navigator.set_location(&href, name);
        Self::show_chain(&view);
        self.emit_route_change(&view, NavigationReason::Replace, false);
        self.emit_state_change();
    }

    pub fn back(&mut self) {
        let target = match self.stack.cursor() {
            Some(cursor) if cursor > 0 => cursor - 1,
            _ => {
                debug!("back ignored, nothing before the cursor");
                return;
            }
        };
        self.traverse(target, NavigationReason::Back);
    }

    pub fn forward(&mut self) {
        let target = match self.stack.cursor() {
            Some(cursor) => cursor + 1,
            None => {
                debug!("forward ignored, empty stack");
                return;
            }
        };
        if target >= self.stack.len() {
            debug!("forward ignored, nothing past the cursor");
            return;
        }
        self.traverse(target, NavigationReason::Forward);
    }

    /// Moves the cursor to an existing entry. Never creates views and never
    /// changes the stack length; entries past the target are torn down in
    /// place.
    fn traverse(&mut self, target: usize, reason: NavigationReason) {
        let Some(view) = self.stack.entry(target) else {
            return;
        };
        // The target's chain may have been torn down by a sibling truncation,
        // so re-validate it before showing.
        if let Err(e) = self.ensure_parent(&view) {
            warn!("{:?} aborted: {}", reason, e);
            return;
        }
        let (href, name, key) = {
            let view = view.borrow();
            (view.href(), view.name.clone(), view.key())
        };
        let previous = self.stack.current();
        self.navigator.set_location(&href, &name);
        self.stack.set_cursor(Some(target));
        for stale in self.stack.entries_after(Some(target)) {
            self.destroy(&stale);
        }
        // A target evicted by an earlier truncation re-enters the cache, so
        // the live window stays cache-consistent.
        if !self.cache.contains(&key) {
            self.cache.insert(key, view.clone());
        }
        Self::activate(previous.as_ref(), &view);
        self.emit_route_change(&view, reason, false);
        match reason {
            NavigationReason::Back => self.emit(NavigationEvent::Back),
            NavigationReason::Forward => self.emit(NavigationEvent::Forward),
            _ => {}
        }
        self.emit_state_change();
    }

    /// Synthesizes a transient, uncached view purely for URL formatting.
    /// Unknown names fall back to the configured not-found pathname, so
    /// callers always get a renderable string.
    pub fn build_url(&self, name: &str, query: &Query) -> String {
        match self.routes.lookup(name) {
            Some(route) => View::from_route(route, query.clone()).borrow().build_url(),
            None => {
                warn!("no matched route for '{}', using not-found url", name);
                self.not_found_url()
            }
        }
    }

    pub fn build_url_with_prefix(&self, name: &str, query: &Query) -> String {
        let origin = self.navigator.origin();
        match self.routes.lookup(name) {
            Some(route) => View::from_route(route, query.clone())
                .borrow()
                .build_url_with_prefix(&origin),
            None => {
                warn!("no matched route for '{}', using not-found url", name);
                format!("{}{}", origin, self.not_found_url())
            }
        }
    }

    /// Stateless pass-through for the anchor-interception layer.
    pub fn handle_click_link(&mut self, href: &str, target: Option<&str>) {
        self.emit(NavigationEvent::ClickLink {
            href: href.to_string(),
            target: target.map(str::to_string),
        });
    }

    /// The same projection `StateChange` carries, recomputed on demand.
    pub fn history_state(&self) -> HistoryState {
        HistoryState {
            href: self.navigator.href(),
            stacks: self
                .stack
                .iter()
                .map(|view| {
                    let view = view.borrow();
                    StackEntry {
                        id: view.id,
                        key: view.key(),
                        title: view.title.clone(),
                        query: view.query.clone(),
                        visible: view.visible,
                    }
                })
                .collect(),
            cursor: self.stack.cursor(),
        }
    }

    fn resolve_href(&self, name: &str, query: &Query) -> Option<String> {
        self.routes
            .lookup(name)
            .map(|route| build_href(&route.pathname, query))
    }

    fn not_found_url(&self) -> String {
        self.routes
            .not_found_route()
            .map(|route| route.pathname.clone())
            .unwrap_or_else(|| "/".to_string())
    }

    /// Reuses the cached view for `(name, query)` or constructs and caches a
    /// new one, with a fully resolved parent chain either way. A freshly
    /// cached view whose chain cannot be resolved is evicted again before the
    /// error propagates, so the cache never leaks an unmountable entry.
    fn resolve(&mut self, name: &str, query: Query) -> Result<ViewRef, NavigationError> {
        let key = view_key(name, &query);
        if let Some(view) = self.cache.get(&key) {
            view.borrow_mut().query = query;
            self.ensure_parent(&view)?;
            return Ok(view);
        }
        let route = self
            .routes
            .lookup(name)
            .cloned()
            .ok_or_else(|| NavigationError::NoMatchedRoute(name.to_string()))?;
        let view = View::from_route(&route, query);
        self.cache.insert(key.clone(), view.clone());
        if let Err(e) = self.ensure_parent(&view) {
            self.cache.remove(&key);
            return Err(e);
        }
        Ok(view)
    }

    /// Materializes/reuses the ancestor chain up to the root. Parent views
    /// carry an empty query and are keyed by name alone. Acyclicity of the
    /// route table is asserted at load time, so the recursion needs no guard.
    fn ensure_parent(&mut self, view: &ViewRef) -> Result<(), NavigationError> {
        if view.borrow().is_root() {
            return Ok(());
        }
        let wired = view.borrow().parent.clone();
        if let Some(parent) = wired {
            return self.ensure_parent(&parent);
        }
        let name = view.borrow().name.clone();
        let parent_name = self
            .routes
            .lookup(&name)
            .and_then(|route| route.parent.clone())
            .ok_or_else(|| NavigationError::UnresolvedParent(name.clone()))?;
        let parent = match self.cache.get(&parent_name) {
            Some(parent) => parent,
            None => {
                let route = self
                    .routes
                    .lookup(&parent_name)
                    .cloned()
                    .ok_or(NavigationError::UnresolvedParent(name))?;
                let parent = View::from_route(&route, Query::new());
                self.cache.insert(parent_name, parent.clone());
                parent
            }
        };
        view.borrow_mut().parent = Some(parent.clone());
        self.ensure_parent(&parent)
    }

    /// Unmounts the view from its parent and evicts its cache entry, in the
    /// same synchronous call. A view is only torn down once no reference to
    /// it remains at or before the cursor: a cached instance can sit at
    /// several stack positions, and destroying a stale duplicate must leave
    /// the live one mounted and cached. The cache entry is only removed when
    /// it still refers to this exact instance; a successor under the same key
    /// stays.
    fn destroy(&mut self, view: &ViewRef) {
        let key = view.borrow().key();
        if self.stack.live_window_contains(view) {
            debug!("view '{}' is still live, teardown skipped", key);
            return;
        }
        let parent = view.borrow().parent.clone();
        match parent {
            Some(parent) => {
                view::remove_view(&parent, view);
            }
            None => view.borrow_mut().visible = false,
        }
        let cached_here = self
            .cache
            .get(&key)
            .is_some_and(|cached| Rc::ptr_eq(&cached, view));
        if cached_here {
            self.cache.remove(&key);
        }
        debug!("destroyed view '{}'", key);
    }

    fn activate(previous: Option<&ViewRef>, view: &ViewRef) {
        if let Some(previous) = previous {
            if !Rc::ptr_eq(previous, view) {
                Self::hide_chain(previous);
            }
        }
        Self::show_chain(view);
    }

    fn hide_chain(view: &ViewRef) {
        let mut current = Some(view.clone());
        while let Some(view) = current {
            view.borrow_mut().visible = false;
            current = view.borrow().parent.clone();
        }
    }

    /// Mounts the whole chain bottom-up; every ancestor shows its child.
    fn show_chain(view: &ViewRef) {
        let mut current = view.clone();
        loop {
            let parent = current.borrow().parent.clone();
            match parent {
                Some(parent) => {
                    view::show_view(&parent, &current);
                    current = parent;
                }
                None => {
                    current.borrow_mut().visible = true;
                    break;
                }
            }
        }
    }

    fn emit_route_change(&mut self, view: &ViewRef, reason: NavigationReason, ignore: bool) {
        let (name, href, pathname, query) = {
            let view = view.borrow();
            (
                view.name.clone(),
                view.href(),
                view.pathname.clone(),
                view.query.clone(),
            )
        };
        self.emit(NavigationEvent::RouteChange(RouteChange {
            view: view.clone(),
            name,
            href,
            pathname,
            query,
            reason,
            ignore,
        }));
    }

    fn emit_state_change(&mut self) {
        let state = self.history_state();
        self.emit(NavigationEvent::StateChange(state));
    }

    fn emit(&mut self, event: NavigationEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
