// Rolling per-metric sample history
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Retention target every dashboard keeps, regardless of poll cadence.
pub const RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

/// Number of samples needed to cover [`RETENTION`] at `poll_interval`.
pub fn capacity_for(poll_interval: Duration) -> usize {
    let poll_ms = poll_interval.as_millis().max(1);
    RETENTION.as_millis().div_ceil(poll_ms) as usize
}

/// Ordered samples for one metric, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    samples: VecDeque<f64>,
}

impl MetricSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value`, evicting the oldest sample once `capacity` is exceeded.
    pub fn push(&mut self, value: f64, capacity: usize) {
        self.samples.push_back(value);
        if self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    pub fn last(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

/// Every tracked series of one dashboard, keyed by metric key.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    series: HashMap<String, MetricSeries>,
}

impl HistoryStore {
    /// Store with an empty series registered for each key.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let series = keys
            .into_iter()
            .map(|k| (k.into(), MetricSeries::new()))
            .collect();
        Self { series }
    }

    pub fn push(&mut self, key: &str, value: f64, capacity: usize) {
        self.series
            .entry(key.to_string())
            .or_default()
            .push(value, capacity);
    }

    pub fn get(&self, key: &str) -> Option<&MetricSeries> {
        self.series.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.series.contains_key(key)
    }

    pub fn values(&self, key: &str) -> Vec<f64> {
        self.get(key).map(MetricSeries::values).unwrap_or_default()
    }

    pub fn last(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(MetricSeries::last)
    }
}
