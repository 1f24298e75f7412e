//! Template variables.
//!
//! A `RenderContext` is an insertion-ordered map of variable name to JSON
//! value. Ordering is kept so dry-run output and logs list variables the way
//! they were supplied; re-inserting a name replaces the value in place.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    variables: Vec<(String, Value)>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.variables.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.variables.push((name, value)),
        }
    }

    /// Insert any serializable value. Values that fail to serialize become
    /// `null`.
    pub fn insert_serialized<T: Serialize>(&mut self, name: impl Into<String>, value: &T) {
        self.insert(name, serde_json::to_value(value).unwrap_or(Value::Null));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// String value of a variable, if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Later values win.
    pub fn merge(&mut self, other: RenderContext) {
        for (k, v) in other.variables {
            self.insert(k, v);
        }
    }

    /// JSON object view handed to template engines.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.variables
                .iter()
                .cloned()
                .collect::<Map<String, Value>>(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RenderContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Self::new();
        for (k, v) in iter {
            ctx.insert(k, v);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order_and_replaces_in_place() {
        let mut ctx = RenderContext::new()
            .with("className", "Book")
            .with("namespace", "app::models")
            .with("tableName", "books");
        ctx.insert("namespace", "crate::models");

        let keys: Vec<_> = ctx.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["className", "namespace", "tableName"]);
        assert_eq!(ctx.get_str("namespace"), Some("crate::models"));
    }

    #[test]
    fn merge_overrides() {
        let mut base = RenderContext::new().with("className", "Draft");
        base.merge(RenderContext::new().with("className", "Book").with("x", 1));
        assert_eq!(base.get_str("className"), Some("Book"));
        assert_eq!(base.get("x"), Some(&json!(1)));
    }

    #[test]
    fn json_view() {
        let ctx: RenderContext = [("a", json!([1, 2])), ("b", json!(true))]
            .into_iter()
            .collect();
        assert_eq!(ctx.to_json(), json!({"a": [1, 2], "b": true}));
    }
}
