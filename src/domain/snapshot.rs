// Health payload as delivered by the provider, with forgiving accessors
use serde_json::{Map, Value};

/// One decoded provider response.
///
/// Fields are looked up lazily by dotted path so that a missing or mistyped
/// field only affects the widget reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    root: Value,
}

impl Snapshot {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn value(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
    }

    /// Non-empty string at `path`.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.value(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Finite number at `path`; numeric strings are accepted.
    pub fn number(&self, path: &str) -> Option<f64> {
        let value = match self.value(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        value.is_finite().then_some(value)
    }

    /// Number at `path`, or 0 when absent or not a number.
    pub fn number_or_zero(&self, path: &str) -> f64 {
        self.number(path).unwrap_or(0.0)
    }

    /// Rendered form of a scalar field, whatever its JSON type.
    pub fn display(&self, path: &str) -> Option<String> {
        match self.value(path)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn array(&self, path: &str) -> &[Value] {
        self.value(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Attach `other` under `key` on the root object.
    pub fn merge(&mut self, key: &str, other: Snapshot) {
        if !self.root.is_object() {
            self.root = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.root {
            map.insert(key.to_string(), other.root);
        }
    }

    #[cfg(test)]
    pub fn into_value(self) -> Value {
        self.root
    }
}

/// String field of an array element, e.g. a service's `name`.
pub fn item_text<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
