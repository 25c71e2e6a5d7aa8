// Detail overlays: state machine and enlarged chart rendering
use super::dom_host::{DomHost, OverlayKind};
use crate::domain::fields::Row;
use crate::domain::metric::MetricDescriptor;
use crate::domain::sparkline;
use crate::domain::trend::{format_metric, PLACEHOLDER};
use serde::Serialize;

pub const BODY_OPEN_CLASS: &str = "modal-open";
pub const WINDOW_LABEL: &str = "24h";

pub const MODAL_TITLE: &str = ".chart-modal__title";
pub const MODAL_CANVAS: &str = ".chart-modal__canvas";
pub const STAT_CURRENT: &str = "[data-stat-current]";
pub const STAT_MIN: &str = "[data-stat-min]";
pub const STAT_MAX: &str = "[data-stat-max]";
pub const STAT_DELTA: &str = "[data-stat-delta]";
pub const STAT_SAMPLES: &str = "[data-stat-samples]";
pub const STAT_WINDOW: &str = "[data-stat-window]";
pub const FINDINGS_EXPANDED: &str = "[data-findings-expanded]";

/// Logical size of the enlarged chart canvas.
pub const MODAL_CANVAS_SIZE: (f64, f64) = (960.0, 280.0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "metric", rename_all = "snake_case")]
pub enum Overlay {
    Chart(String),
    Findings,
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Self::Chart(_) => OverlayKind::Chart,
            Self::Findings => OverlayKind::Findings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModalViewState {
    pub is_open: bool,
    pub active_metric_key: Option<String>,
    pub overlay: Option<OverlayKind>,
}

/// At most one overlay is open at a time, whatever its kind.
#[derive(Debug, Default)]
pub struct ModalController {
    active: Option<Overlay>,
    mounted: Vec<OverlayKind>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `overlay`, first closing whatever else is open.
    pub fn open<H: DomHost>(&mut self, host: &mut H, overlay: Overlay) {
        let other_kind_open = self
            .active
            .as_ref()
            .is_some_and(|current| current.kind() != overlay.kind());
        if other_kind_open {
            self.close(host);
        }

        let kind = overlay.kind();
        if !self.mounted.contains(&kind) {
            host.mount_overlay(kind);
            self.mounted.push(kind);
        }
        host.set_overlay_hidden(kind, false);
        host.toggle_body_class(BODY_OPEN_CLASS, true);
        tracing::debug!(?overlay, "overlay opened");
        self.active = Some(overlay);
    }

    /// Hide the open overlay, if any, and return it.
    pub fn close<H: DomHost>(&mut self, host: &mut H) -> Option<Overlay> {
        let closed = self.active.take()?;
        host.set_overlay_hidden(closed.kind(), true);
        host.toggle_body_class(BODY_OPEN_CLASS, false);
        tracing::debug!(overlay = ?closed, "overlay closed");
        Some(closed)
    }

    pub fn active(&self) -> Option<&Overlay> {
        self.active.as_ref()
    }

    pub fn active_metric(&self) -> Option<&str> {
        match &self.active {
            Some(Overlay::Chart(key)) => Some(key),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> ModalViewState {
        ModalViewState {
            is_open: self.is_open(),
            active_metric_key: self.active_metric().map(str::to_string),
            overlay: self.active.as_ref().map(Overlay::kind),
        }
    }
}

/// Summary statistics shown under the enlarged chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalStats {
    pub current: String,
    pub min: String,
    pub max: String,
    pub delta: String,
    pub samples: usize,
}

impl ModalStats {
    pub fn compute(values: &[f64], unit: &str) -> Self {
        let Some((&current, rest)) = values.split_last() else {
            return Self {
                current: "No data".to_string(),
                min: PLACEHOLDER.to_string(),
                max: PLACEHOLDER.to_string(),
                delta: PLACEHOLDER.to_string(),
                samples: 0,
            };
        };

        let previous = rest.last().copied().unwrap_or(current);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let delta = current - previous;
        let sign = if delta >= 0.0 { "+" } else { "" };

        Self {
            current: format_metric(current, unit),
            min: format_metric(min, unit),
            max: format_metric(max, unit),
            delta: format!("{sign}{}", format_metric(delta, unit)),
            samples: values.len(),
        }
    }
}

/// Fill the chart overlay for one metric and redraw its enlarged sparkline.
pub fn render_chart<H: DomHost>(host: &mut H, descriptor: &MetricDescriptor, values: &[f64]) {
    let stats = ModalStats::compute(values, &descriptor.unit);

    host.set_text(MODAL_TITLE, &format!("{} ({WINDOW_LABEL})", descriptor.label));
    host.set_text(STAT_SAMPLES, &stats.samples.to_string());
    host.set_text(STAT_WINDOW, WINDOW_LABEL);
    host.set_text(STAT_CURRENT, &stats.current);
    host.set_text(STAT_MIN, &stats.min);
    host.set_text(STAT_MAX, &stats.max);
    host.set_text(STAT_DELTA, &stats.delta);

    if let Some(surface) = host.surface(MODAL_CANVAS) {
        sparkline::render(surface, values, &descriptor.color);
    }
}

/// Mirror the findings table into the expanded overlay.
pub fn render_findings<H: DomHost>(host: &mut H, rows: &[Row]) {
    host.replace_rows(FINDINGS_EXPANDED, rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_document::MemoryDocument;

    #[test]
    fn test_stats_for_empty_series() {
        let stats = ModalStats::compute(&[], "%");
        assert_eq!(stats.current, "No data");
        assert_eq!((stats.min.as_str(), stats.max.as_str(), stats.delta.as_str()), ("--", "--", "--"));
        assert_eq!(stats.samples, 0);
    }

    #[test]
    fn test_stats_with_units() {
        let stats = ModalStats::compute(&[20.0, 32.5, 25.0], "%");
        assert_eq!(stats.current, "25.0%");
        assert_eq!(stats.min, "20.0%");
        assert_eq!(stats.max, "32.5%");
        assert_eq!(stats.delta, "-7.50%");
        assert_eq!(stats.samples, 3);

        // a single sample has a zero delta, shown with a sign
        assert_eq!(ModalStats::compute(&[3.0], "").delta, "+0.0000");
    }

    #[test]
    fn test_open_mounts_once_and_switches_kinds() {
        let mut host = MemoryDocument::new(1.0);
        let mut modal = ModalController::new();

        modal.open(&mut host, Overlay::Findings);
        assert!(host.overlay_visible(OverlayKind::Findings));
        assert!(host.body_has_class(BODY_OPEN_CLASS));

        modal.open(&mut host, Overlay::Chart("load".into()));
        assert!(!host.overlay_visible(OverlayKind::Findings));
        assert!(host.overlay_visible(OverlayKind::Chart));
        assert!(host.body_has_class(BODY_OPEN_CLASS));
        assert_eq!(modal.active_metric(), Some("load"));

        modal.open(&mut host, Overlay::Chart("memoryPct".into()));
        modal.close(&mut host);
        modal.open(&mut host, Overlay::Chart("load".into()));
        assert_eq!(host.mount_count(OverlayKind::Chart), 1);
        assert_eq!(host.mount_count(OverlayKind::Findings), 1);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut host = MemoryDocument::new(1.0);
        let mut modal = ModalController::new();
        assert_eq!(modal.close(&mut host), None);
        assert_eq!(modal.state(), ModalViewState::default());
    }

    #[test]
    fn test_render_chart_writes_title_and_stats() {
        let mut host = MemoryDocument::new(1.0);
        let mut modal = ModalController::new();
        modal.open(&mut host, Overlay::Chart("load".into()));

        let descriptor = MetricDescriptor::new("Load Average", "#5eead4", "");
        render_chart(&mut host, &descriptor, &[0.42, 0.5]);
        assert_eq!(host.text(MODAL_TITLE), Some("Load Average (24h)"));
        assert_eq!(host.text(STAT_SAMPLES), Some("2"));
        assert_eq!(host.text(STAT_WINDOW), Some("24h"));
        assert_eq!(host.text(STAT_DELTA), Some("+0.0800"));

        let canvas = host.recording(MODAL_CANVAS).unwrap();
        assert!(canvas.ops().len() > 2);
    }
}
