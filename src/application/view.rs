// Serializable snapshot of a running dashboard
use super::dashboard::{Dashboard, RefreshStats};
use super::dom_host::DomHost;
use super::modal::ModalViewState;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub name: String,
    pub stats: RefreshStats,
    pub capacity: usize,
    pub modal: ModalViewState,
    /// Current samples per metric, oldest first.
    pub series: BTreeMap<String, Vec<f64>>,
    pub document: serde_json::Value,
}

impl DashboardView {
    pub fn capture<H: DomHost + Serialize>(dashboard: &Dashboard<H>) -> Self {
        let series = dashboard
            .profile()
            .metrics
            .iter()
            .map(|m| (m.key.clone(), dashboard.history().values(&m.key)))
            .collect();

        let document = serde_json::to_value(dashboard.host()).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize host document: {}", e);
            serde_json::Value::Null
        });

        Self {
            name: dashboard.profile().name.clone(),
            stats: dashboard.stats(),
            capacity: dashboard.profile().capacity(),
            modal: dashboard.modal_state(),
            series,
            document,
        }
    }
}
