// Metric descriptors and the per-dashboard registry
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    pub label: String,
    pub color: String,
    pub unit: String,
}

impl MetricDescriptor {
    pub fn new(label: &str, color: &str, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            unit: unit.to_string(),
        }
    }

    pub fn fallback() -> Self {
        Self::new("Metric", "#38bdf8", "")
    }
}

/// Ordered lookup table from metric key to descriptor.
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    entries: Vec<(String, MetricDescriptor)>,
}

impl MetricRegistry {
    pub fn new(entries: Vec<(String, MetricDescriptor)>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&MetricDescriptor> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, descriptor)| descriptor)
    }

    /// Descriptor for `key`, or a neutral one for unknown keys.
    pub fn descriptor(&self, key: &str) -> MetricDescriptor {
        self.lookup(key)
            .cloned()
            .unwrap_or_else(MetricDescriptor::fallback)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}
