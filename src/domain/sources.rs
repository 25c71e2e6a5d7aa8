// Extraction of chartable samples from a health snapshot
use super::snapshot::Snapshot;
use serde::Serialize;

/// Where a metric's sample comes from in the provider payload.
///
/// Every variant yields a finite number; absent or malformed input becomes 0
/// (or the carried-forward value for container runtime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSource {
    /// First token of the `"1m 5m 15m"` load string.
    LoadAverage,
    /// `memory_used_mb / memory_total_mb * 100`.
    MemoryPercent,
    ContainersUp,
    /// `container_runtime_minutes`, then `containers_up`, then the previous sample.
    ContainerRuntime,
    /// Security risk band mapped to low=1, medium=2, high=3.
    RiskBand,
    OpenTasks,
    RiskScore,
    FindingCount,
}

impl MetricSource {
    pub fn sample(&self, snapshot: &Snapshot, previous: Option<f64>) -> f64 {
        match self {
            Self::LoadAverage => load_one_minute(snapshot),
            Self::MemoryPercent => memory_percent(snapshot).unwrap_or(0.0),
            Self::ContainersUp => snapshot.number_or_zero("containers_up"),
            Self::ContainerRuntime => container_runtime(snapshot, previous),
            Self::RiskBand => risk_band_ordinal(snapshot.text("security.risk_band")),
            Self::OpenTasks => snapshot.number_or_zero("security.open_tasks"),
            Self::RiskScore => snapshot.number_or_zero("risk_score"),
            Self::FindingCount => snapshot.array("findings").len() as f64,
        }
    }
}

fn load_one_minute(snapshot: &Snapshot) -> f64 {
    snapshot
        .display("load_avg")
        .and_then(|s| s.split_whitespace().next().map(str::parse::<f64>))
        .and_then(Result::ok)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn memory_percent(snapshot: &Snapshot) -> Option<f64> {
    let used = snapshot.number("memory_used_mb")?;
    let total = snapshot.number("memory_total_mb")?;
    (total > 0.0).then(|| used / total * 100.0)
}

// Both sources missing carries the last sample forward instead of recording
// a gap; long outages therefore flatten the chart at the last known value.
// An explicit null reads as 0, an absent key as missing.
fn container_runtime(snapshot: &Snapshot, previous: Option<f64>) -> f64 {
    let non_negative = |path: &str| match snapshot.value(path) {
        Some(serde_json::Value::Null) => Some(0.0),
        _ => snapshot.number(path).filter(|v| *v >= 0.0),
    };
    non_negative("container_runtime_minutes")
        .or_else(|| non_negative("containers_up"))
        .unwrap_or_else(|| previous.unwrap_or(0.0))
}

pub fn risk_band_ordinal(band: Option<&str>) -> f64 {
    match band.map(str::to_ascii_lowercase).as_deref() {
        Some("low") => 1.0,
        Some("medium") => 2.0,
        Some("high") => 3.0,
        _ => 0.0,
    }
}
