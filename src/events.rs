use crate::query::Query;
use crate::view::ViewRef;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NavigationReason {
    Push,
    Replace,
    Back,
    Forward,
}

/// Fired on every successful navigation.
#[derive(Clone)]
pub struct RouteChange {
    pub view: ViewRef,
    pub name: String,
    pub href: String,
    pub pathname: String,
    pub query: Query,
    pub reason: NavigationReason,
    /// Passed through from `PushOptions` for the anchor-interception layer.
    pub ignore: bool,
}

/// One stack entry as seen by observers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StackEntry {
    pub id: Uuid,
    pub key: String,
    pub title: String,
    pub query: Query,
    pub visible: bool,
}

/// Pure projection of the stack and the address bar; recomputed on every
/// change, owns nothing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub href: String,
    pub stacks: Vec<StackEntry>,
    pub cursor: Option<usize>,
}

#[derive(Clone)]
pub enum NavigationEvent {
    RouteChange(RouteChange),
    Back,
    Forward,
    StateChange(HistoryState),
    ClickLink {
        href: String,
        target: Option<String>,
    },
}
