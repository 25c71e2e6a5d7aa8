// Dashboard engine - one owned context per dashboard instance
use super::dom_host::DomHost;
use super::events::{EventOutcome, Key, Target, UiEvent};
use super::health_provider::FetchError;
use super::modal::{self, ModalController, ModalViewState, Overlay};
use crate::domain::fields::Row;
use crate::domain::history::HistoryStore;
use crate::domain::metric::MetricRegistry;
use crate::domain::snapshot::Snapshot;
use crate::domain::sparkline;
use crate::domain::trend::compute_trend;
use crate::infrastructure::config::DashboardProfile;

/// Refresh counters, for logging and the inspection endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RefreshStats {
    pub cycles: u64,
    pub failures: u64,
    pub degraded: bool,
}

pub struct Dashboard<H> {
    profile: DashboardProfile,
    registry: MetricRegistry,
    history: HistoryStore,
    modal: ModalController,
    host: H,
    findings: Vec<Row>,
    stats: RefreshStats,
}

impl<H: DomHost> Dashboard<H> {
    /// Build the dashboard and make its summary widgets activatable.
    pub fn new(profile: DashboardProfile, host: H) -> Self {
        let registry = profile.registry();
        let history = HistoryStore::with_keys(registry.keys());
        let mut dashboard = Self {
            profile,
            registry,
            history,
            modal: ModalController::new(),
            host,
            findings: Vec::new(),
            stats: RefreshStats::default(),
        };
        dashboard.wire_widgets();
        dashboard
    }

    fn wire_widgets(&mut self) {
        for metric in &self.profile.metrics {
            make_button(&mut self.host, &metric.widget, "Expand chart");
        }
        if let Some(table) = &self.profile.findings_table {
            make_button(&mut self.host, &table.wrapper, "Expand findings table");
        }
    }

    /// Apply one fetch outcome. Returns whether the fetch succeeded.
    pub fn apply(&mut self, result: Result<Snapshot, FetchError>) -> bool {
        self.stats.cycles += 1;
        match result {
            Ok(snapshot) => {
                self.apply_snapshot(&snapshot);
                self.stats.degraded = false;
                tracing::debug!(
                    dashboard = %self.profile.name,
                    cycle = self.stats.cycles,
                    "refresh applied"
                );
                true
            }
            Err(e) => {
                self.stats.failures += 1;
                self.stats.degraded = true;
                tracing::warn!(dashboard = %self.profile.name, "refresh failed, showing degraded state: {}", e);
                self.degrade();
                false
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        for binding in &self.profile.fields {
            let rendered = binding.kind.render(snapshot);
            self.host
                .set_text(&binding.selector, &format!("{}{}", binding.prefix, rendered.text));
            self.host.set_class(&binding.selector, &rendered.class);
        }

        for binding in &self.profile.lists {
            let rows = binding.kind.rows(snapshot);
            self.host.replace_rows(&binding.selector, &rows);
        }
        if let Some(table) = &self.profile.findings_table {
            if let Some(binding) = self.profile.lists.iter().find(|l| l.selector == table.rows) {
                self.findings = binding.kind.rows(snapshot);
            }
        }

        let capacity = self.profile.capacity();
        for metric in &self.profile.metrics {
            let previous = self.history.last(&metric.key);
            let sample = metric.source.sample(snapshot, previous);
            self.history.push(&metric.key, sample, capacity);

            let values = self.history.values(&metric.key);
            if let Some(surface) = self.host.surface(&metric.chart) {
                sparkline::render(surface, &values, &metric.descriptor.color);
            }
            if let Some(trend) = compute_trend(&values, &metric.descriptor.unit) {
                self.host.set_class(&metric.trend, trend.direction.css_class());
                self.host.set_text(&metric.trend, &trend.text);
            }
        }

        self.render_modal();
    }

    fn degrade(&mut self) {
        for binding in &self.profile.fields {
            let rendered = binding.kind.degraded();
            self.host
                .set_text(&binding.selector, &format!("{}{}", binding.prefix, rendered.text));
            self.host.set_class(&binding.selector, &rendered.class);
        }
    }

    /// Open the chart overlay for `key`. Unknown metrics are ignored.
    pub fn open_chart(&mut self, key: &str) -> bool {
        if !self.history.contains(key) {
            tracing::debug!(metric = key, "ignoring open for unregistered metric");
            return false;
        }
        self.modal.open(&mut self.host, Overlay::Chart(key.to_string()));
        self.render_modal();
        true
    }

    pub fn open_findings(&mut self) -> bool {
        if self.profile.findings_table.is_none() {
            return false;
        }
        self.modal.open(&mut self.host, Overlay::Findings);
        self.render_modal();
        true
    }

    pub fn close_overlay(&mut self) -> bool {
        self.modal.close(&mut self.host).is_some()
    }

    /// Redraw whichever overlay is open; nothing when closed.
    pub fn render_modal(&mut self) {
        match self.modal.active() {
            Some(Overlay::Chart(key)) => {
                let descriptor = self.registry.descriptor(key);
                let values = self.history.values(key);
                modal::render_chart(&mut self.host, &descriptor, &values);
            }
            Some(Overlay::Findings) => modal::render_findings(&mut self.host, &self.findings),
            None => {}
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Click { target } => {
                match target {
                    Target::ChartWidget { metric } => {
                        self.open_chart(&metric);
                    }
                    Target::FindingsTable => {
                        self.open_findings();
                    }
                    Target::CloseControl { overlay } | Target::Backdrop { overlay } => {
                        if self.modal.active().map(Overlay::kind) == Some(overlay) {
                            self.close_overlay();
                        }
                    }
                    Target::FindingsLink | Target::Panel { .. } | Target::Document => {}
                }
                EventOutcome::default()
            }
            UiEvent::KeyDown { key, target } => match (key, target) {
                (Key::Escape, _) => {
                    self.close_overlay();
                    EventOutcome::default()
                }
                (Key::Enter | Key::Space, Target::ChartWidget { metric }) => {
                    self.open_chart(&metric);
                    EventOutcome {
                        prevent_default: true,
                    }
                }
                (Key::Enter | Key::Space, Target::FindingsTable) => {
                    self.open_findings();
                    EventOutcome {
                        prevent_default: true,
                    }
                }
                _ => EventOutcome::default(),
            },
            UiEvent::Navigate => {
                self.close_overlay();
                EventOutcome::default()
            }
        }
    }

    pub fn profile(&self) -> &DashboardProfile {
        &self.profile
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn modal_state(&self) -> ModalViewState {
        self.modal.state()
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

fn make_button<H: DomHost>(host: &mut H, selector: &str, label: &str) {
    host.set_attribute(selector, "role", "button");
    host.set_attribute(selector, "tabindex", "0");
    host.set_attribute(selector, "aria-label", label);
}
