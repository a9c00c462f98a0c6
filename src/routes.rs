use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteTableError {
    #[error("duplicate route name '{0}'")]
    DuplicateRoute(String),
    #[error("route '{0}' is part of a parent cycle")]
    ParentCycle(String),
    #[error("An error occurred while parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Builder, Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct RouteDefinition {
    pub name: String,
    pub pathname: String,
    pub title: String,
    /// Name of the parent route, if any. The chain must end at a route whose
    /// pathname is "/".
    #[serde(default)]
    pub parent: Option<String>,
}

/// Immutable name -> route mapping, loaded once at startup.
pub struct RouteTable {
    routes: HashMap<String, RouteDefinition>,
    not_found: Option<String>,
}

impl RouteTable {
    /// Builds the table and asserts the parent graph is acyclic, so that
    /// parent resolution at navigation time can recurse without a guard.
    /// Parent names that reference no known route are accepted here and fail
    /// the individual navigation instead.
    pub fn new(definitions: Vec<RouteDefinition>) -> Result<Self, RouteTableError> {
        let mut routes = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            if routes.contains_key(&definition.name) {
                return Err(RouteTableError::DuplicateRoute(definition.name));
            }
            routes.insert(definition.name.clone(), definition);
        }
        let table = RouteTable {
            routes,
            not_found: None,
        };
        table.assert_acyclic()?;
        Ok(table)
    }

    pub fn from_json(json: &str) -> Result<Self, RouteTableError> {
        let definitions: Vec<RouteDefinition> = serde_json::from_str(json)?;
        Self::new(definitions)
    }

    /// Configures the route whose pathname is returned by `build_url` for
    /// unknown names.
    pub fn with_not_found<N: Into<String>>(mut self, name: N) -> Self {
        self.not_found = Some(name.into());
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&RouteDefinition> {
        self.routes.get(name)
    }

    pub fn not_found_route(&self) -> Option<&RouteDefinition> {
        self.not_found.as_deref().and_then(|name| self.lookup(name))
    }

    fn assert_acyclic(&self) -> Result<(), RouteTableError> {
        for start in self.routes.keys() {
            let mut seen = vec![start.as_str()];
            let mut current = start.as_str();
            while let Some(parent) = self
                .routes
                .get(current)
                .and_then(|route| route.parent.as_deref())
            {
                if seen.contains(&parent) {
                    return Err(RouteTableError::ParentCycle(start.clone()));
                }
                seen.push(parent);
                if !self.routes.contains_key(parent) {
                    break;
                }
                current = parent;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, pathname: &str, parent: Option<&str>) -> RouteDefinition {
        RouteDefinition::builder()
            .name(name.to_string())
            .pathname(pathname.to_string())
            .title(name.to_string())
            .maybe_parent(parent.map(str::to_string))
            .build()
    }

    #[test]
    fn test_lookup_known_and_unknown_route() {
        let table = RouteTable::new(vec![route("root", "/", None)]).unwrap();
        assert_eq!(table.lookup("root").unwrap().pathname, "/");
        assert!(table.lookup("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let result = RouteTable::new(vec![route("a", "/a", None), route("a", "/b", None)]);
        assert!(matches!(result, Err(RouteTableError::DuplicateRoute(name)) if name == "a"));
    }

    #[test]
    fn test_parent_cycle_is_rejected_at_load() {
        let result = RouteTable::new(vec![
            route("a", "/a", Some("b")),
            route("b", "/b", Some("a")),
        ]);
        assert!(matches!(result, Err(RouteTableError::ParentCycle(_))));
    }

    #[test]
    fn test_self_parent_is_rejected_at_load() {
        let result = RouteTable::new(vec![route("a", "/a", Some("a"))]);
        assert!(matches!(result, Err(RouteTableError::ParentCycle(_))));
    }

    #[test]
    fn test_dangling_parent_name_is_accepted_at_load() {
        let table = RouteTable::new(vec![route("a", "/a", Some("gone"))]).unwrap();
        assert!(table.lookup("a").is_some());
    }

    #[test]
    fn test_from_json() {
        let table = RouteTable::from_json(
            r#"[
                {"name": "root", "pathname": "/", "title": "Home"},
                {"name": "list", "pathname": "/list", "title": "List", "parent": "root"}
            ]"#,
        )
        .unwrap();
        assert_eq!(table.lookup("list").unwrap().parent.as_deref(), Some("root"));
    }

    #[test]
    fn test_not_found_route() {
        let table = RouteTable::new(vec![route("oops", "/not-found", None)])
            .unwrap()
            .with_not_found("oops");
        assert_eq!(table.not_found_route().unwrap().pathname, "/not-found");
    }
}
