mod cache;
mod events;
mod manager;
mod navigator;
pub mod query;
mod routes;
mod stack;
mod view;

pub use cache::ViewCache;
pub use events::{HistoryState, NavigationEvent, NavigationReason, RouteChange, StackEntry};
pub use manager::{NavigationError, NavigationManager, PushOptions};
pub use navigator::{InMemoryNavigator, NavigatorAdapter};
pub use query::Query;
pub use routes::{RouteDefinition, RouteTable, RouteTableError};
pub use stack::NavigationStack;
pub use view::{remove_view, show_view, View, ViewRef};
