use std::collections::BTreeMap;

pub type Query = BTreeMap<String, String>;

/// Canonical, order-stable serialization used for cache keys and hrefs.
pub fn serialize(query: &Query) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn view_key(name: &str, query: &Query) -> String {
    if query.is_empty() {
        name.to_string()
    } else {
        format!("{}?{}", name, serialize(query))
    }
}

pub fn build_href(pathname: &str, query: &Query) -> String {
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{}?{}", pathname, serialize(query))
    }
}
