use crate::query::{build_href, view_key, Query};
use crate::routes::RouteDefinition;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Views are shared between the stack, the cache and parent pointers within a
/// single-threaded manager, so `Rc<RefCell<_>>` is the ownership model.
/// Identity is pointer identity (`Rc::ptr_eq`).
pub type ViewRef = Rc<RefCell<View>>;

/// A live instance of a route bound to a specific query.
pub struct View {
    pub id: Uuid,
    pub name: String,
    pub pathname: String,
    pub title: String,
    pub query: Query,
    pub parent: Option<ViewRef>,
    children: Vec<ViewRef>,
    pub visible: bool,
}

impl View {
    pub fn from_route(route: &RouteDefinition, query: Query) -> ViewRef {
        Rc::new(RefCell::new(View {
            id: Uuid::new_v4(),
            name: route.name.clone(),
            pathname: route.pathname.clone(),
            title: route.title.clone(),
            query,
            parent: None,
            children: vec![],
            visible: false,
        }))
    }

    /// Cache identity: the route name plus the canonical query serialization.
    pub fn key(&self) -> String {
        view_key(&self.name, &self.query)
    }

    pub fn href(&self) -> String {
        build_href(&self.pathname, &self.query)
    }

    pub fn build_url(&self) -> String {
        self.href()
    }

    pub fn build_url_with_prefix(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.href())
    }

    /// The root terminates parent resolution.
    pub fn is_root(&self) -> bool {
        self.pathname == "/"
    }

    pub fn has_child(&self, child: &ViewRef) -> bool {
        self.children.iter().any(|c| Rc::ptr_eq(c, child))
    }
}

/// Mounts `child` under `parent` (idempotent) and marks it visible.
pub fn show_view(parent: &ViewRef, child: &ViewRef) {
    if !parent.borrow().has_child(child) {
        parent.borrow_mut().children.push(child.clone());
    }
    child.borrow_mut().visible = true;
}

/// Unmounts `child` from `parent` and hides it. Returns whether the child was
/// actually mounted. Completes synchronously; the caller evicts the cache
/// entry immediately after this returns.
pub fn remove_view(parent: &ViewRef, child: &ViewRef) -> bool {
    let mut parent = parent.borrow_mut();
    let before = parent.children.len();
    parent.children.retain(|c| !Rc::ptr_eq(c, child));
    let removed = parent.children.len() < before;
    drop(parent);
    child.borrow_mut().visible = false;
    removed
}
