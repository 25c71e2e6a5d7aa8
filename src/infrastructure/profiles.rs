// Built-in dashboard profiles
use super::config::{
    DashboardProfile, EndpointConfig, FieldBinding, FindingsTableBinding, ListBinding,
    MetricBinding, Variant,
};
use crate::domain::fields::{FieldKind, ListKind};
use crate::domain::metric::MetricDescriptor;
use crate::domain::sources::MetricSource;

impl Variant {
    pub fn profile(self) -> DashboardProfile {
        match self {
            Self::Public => public(),
            Self::Admin => admin(),
            Self::SecurityAdmin => security_admin(),
        }
    }
}

fn endpoint(path: &str) -> EndpointConfig {
    EndpointConfig {
        path: path.to_string(),
        merge_key: None,
    }
}

fn field(selector: &str, kind: FieldKind) -> FieldBinding {
    FieldBinding {
        selector: selector.to_string(),
        kind,
        prefix: String::new(),
    }
}

fn list(selector: &str, kind: ListKind) -> ListBinding {
    ListBinding {
        selector: selector.to_string(),
        kind,
    }
}

/// A metric whose canvas and trend ids follow the `chart-<slug>` /
/// `trend-<slug>` convention.
fn metric(key: &str, slug: &str, descriptor: MetricDescriptor, source: MetricSource) -> MetricBinding {
    MetricBinding {
        key: key.to_string(),
        descriptor,
        source,
        widget: format!(".chart-widget[data-metric=\"{key}\"]"),
        chart: format!("#chart-{slug}"),
        trend: format!("#trend-{slug}"),
    }
}

fn public() -> DashboardProfile {
    DashboardProfile {
        name: "public".to_string(),
        poll_interval_ms: 15_000,
        history_capacity: None,
        endpoints: vec![endpoint("/api/public")],
        metrics: vec![
            metric(
                "load",
                "load",
                MetricDescriptor::new("Load Average", "#5eead4", ""),
                MetricSource::LoadAverage,
            ),
            metric(
                "containers",
                "containers",
                MetricDescriptor::new("Container Runtime", "#38bdf8", "m"),
                MetricSource::ContainerRuntime,
            ),
            metric(
                "secRisk",
                "sec-risk",
                MetricDescriptor::new("Risk Band", "#c084fc", ""),
                MetricSource::RiskBand,
            ),
            metric(
                "secTasks",
                "sec-tasks",
                MetricDescriptor::new("Open Tasks", "#38bdf8", ""),
                MetricSource::OpenTasks,
            ),
        ],
        fields: vec![
            field("#w-status", FieldKind::Status),
            field("#w-uptime", FieldKind::Uptime),
            field("#w-containers", FieldKind::Containers),
            field("#w-updated", FieldKind::UpdatedAt),
            field("#w-load", FieldKind::LoadAverage),
            field("#w-memory", FieldKind::Memory),
            field("#w-sec-posture", FieldKind::SecurityPosture),
            field("#w-sec-risk", FieldKind::RiskBand),
            field("#w-sec-tasks", FieldKind::OpenTasks),
            field("#w-sec-scan", FieldKind::LastScan),
        ],
        lists: Vec::new(),
        findings_table: None,
        sparkline_size: (240.0, 56.0),
    }
}

fn admin() -> DashboardProfile {
    DashboardProfile {
        name: "admin".to_string(),
        poll_interval_ms: 15_000,
        history_capacity: None,
        endpoints: vec![endpoint("/api/admin/health")],
        metrics: vec![
            metric(
                "load",
                "load",
                MetricDescriptor::new("Load Average", "#5eead4", ""),
                MetricSource::LoadAverage,
            ),
            metric(
                "memoryPct",
                "memory",
                MetricDescriptor::new("Memory Use", "#f59e0b", "%"),
                MetricSource::MemoryPercent,
            ),
            metric(
                "containers",
                "containers",
                MetricDescriptor::new("Containers Up", "#38bdf8", ""),
                MetricSource::ContainersUp,
            ),
        ],
        fields: vec![
            field("#status", FieldKind::Status),
            field("#load", FieldKind::LoadAverage),
            field("#memory", FieldKind::Memory),
            field("#disk", FieldKind::DiskUsed),
            field("#containers", FieldKind::Containers),
            field("#dns-status", FieldKind::DnsStatus),
            FieldBinding {
                prefix: "Updated: ".to_string(),
                ..field("#updated", FieldKind::UpdatedAt)
            },
        ],
        lists: vec![
            list("#services", ListKind::Services),
            list("#dns-details", ListKind::DnsDetails),
        ],
        findings_table: None,
        sparkline_size: (240.0, 56.0),
    }
}

fn security_admin() -> DashboardProfile {
    DashboardProfile {
        name: "security_admin".to_string(),
        poll_interval_ms: 30_000,
        history_capacity: None,
        endpoints: vec![
            endpoint("/api/admin/security"),
            EndpointConfig {
                merge_key: Some("remediation".to_string()),
                ..endpoint("/api/admin/security/tasks")
            },
        ],
        metrics: vec![
            metric(
                "risk",
                "risk",
                MetricDescriptor::new("Risk Score", "#fb7185", ""),
                MetricSource::RiskScore,
            ),
            metric(
                "findingCount",
                "findings",
                MetricDescriptor::new("Finding Count", "#f97316", ""),
                MetricSource::FindingCount,
            ),
        ],
        fields: vec![
            field("#risk", FieldKind::RiskScore),
            field("#status", FieldKind::Status),
            field("#last-run", FieldKind::LastRun),
            field("#finding-count", FieldKind::FindingCount),
        ],
        lists: vec![
            list("#findings", ListKind::Findings),
            list("#tasks", ListKind::RemediationTasks),
        ],
        findings_table: Some(FindingsTableBinding {
            wrapper: ".table-scroll".to_string(),
            rows: "#findings".to_string(),
        }),
        sparkline_size: (240.0, 56.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_have_unique_metric_keys() {
        for variant in [Variant::Public, Variant::Admin, Variant::SecurityAdmin] {
            let profile = variant.profile();
            let mut keys: Vec<_> = profile.metrics.iter().map(|m| m.key.as_str()).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total, "duplicate metric in {}", profile.name);
            assert!(!profile.endpoints.is_empty());
        }
    }

    #[test]
    fn test_metric_selectors() {
        let profile = Variant::Admin.profile();
        let memory = profile.metrics.iter().find(|m| m.key == "memoryPct").unwrap();
        assert_eq!(memory.chart, "#chart-memory");
        assert_eq!(memory.trend, "#trend-memory");
        assert_eq!(memory.widget, ".chart-widget[data-metric=\"memoryPct\"]");
        assert_eq!(memory.descriptor.unit, "%");
    }

    #[test]
    fn test_security_admin_merges_tasks() {
        let profile = Variant::SecurityAdmin.profile();
        assert_eq!(profile.poll_interval_ms, 30_000);
        assert_eq!(profile.endpoints[1].merge_key.as_deref(), Some("remediation"));
        assert!(profile.findings_table.is_some());
    }
}
