use crate::domain::fields::{FieldKind, ListKind};
use crate::domain::history::capacity_for;
use crate::domain::metric::{MetricDescriptor, MetricRegistry};
use crate::domain::sources::MetricSource;
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default)]
    pub variant: Variant,
    pub poll_interval_ms: Option<u64>,
    /// Fixed sample capacity; derived from the poll interval when absent.
    pub history_capacity: Option<usize>,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            poll_interval_ms: None,
            history_capacity: None,
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// Which built-in dashboard to run.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Public,
    Admin,
    SecurityAdmin,
}

/// Everything that distinguishes one dashboard from another.
#[derive(Debug, Clone)]
pub struct DashboardProfile {
    pub name: String,
    pub poll_interval_ms: u64,
    pub history_capacity: Option<usize>,
    pub endpoints: Vec<EndpointConfig>,
    pub metrics: Vec<MetricBinding>,
    pub fields: Vec<FieldBinding>,
    pub lists: Vec<ListBinding>,
    pub findings_table: Option<FindingsTableBinding>,
    /// Laid-out size of each inline sparkline canvas.
    pub sparkline_size: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub path: String,
    /// Key under which this response joins the first endpoint's payload.
    pub merge_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetricBinding {
    pub key: String,
    pub descriptor: MetricDescriptor,
    pub source: MetricSource,
    /// Clickable summary widget.
    pub widget: String,
    pub chart: String,
    pub trend: String,
}

#[derive(Debug, Clone)]
pub struct FieldBinding {
    pub selector: String,
    pub kind: FieldKind,
    pub prefix: String,
}

#[derive(Debug, Clone)]
pub struct ListBinding {
    pub selector: String,
    pub kind: ListKind,
}

#[derive(Debug, Clone)]
pub struct FindingsTableBinding {
    /// Scrollable wrapper that expands into the findings overlay.
    pub wrapper: String,
    /// Table body the rows are rendered into.
    pub rows: String,
}

impl DashboardProfile {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn capacity(&self) -> usize {
        self.history_capacity
            .unwrap_or_else(|| capacity_for(self.poll_interval()))
            .max(1)
    }

    pub fn registry(&self) -> MetricRegistry {
        MetricRegistry::new(
            self.metrics
                .iter()
                .map(|m| (m.key.clone(), m.descriptor.clone()))
                .collect(),
        )
    }

    /// Apply file/environment overrides on top of a built-in profile.
    pub fn with_settings(mut self, settings: &DashboardSettings) -> Self {
        if let Some(poll_interval_ms) = settings.poll_interval_ms {
            self.poll_interval_ms = poll_interval_ms;
        }
        if settings.history_capacity.is_some() {
            self.history_capacity = settings.history_capacity;
        }
        self
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read dashboard configuration")?;

    settings
        .try_deserialize()
        .context("Invalid dashboard configuration")
}
