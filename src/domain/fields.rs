// Text fields and row lists populated from a health snapshot
use super::snapshot::{item_text, Snapshot};
use super::sources::memory_percent;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEGRADED: &str = "DEGRADED";
pub const UNAVAILABLE: &str = "Unavailable";
pub const BAD_CLASS: &str = "value bad";
const PLAIN_CLASS: &str = "value";
const OK_CLASS: &str = "value ok";
const WARN_CLASS: &str = "value warn";

/// Text and class to write into one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub text: String,
    pub class: String,
}

impl Rendered {
    fn new(text: impl Into<String>, class: &str) -> Self {
        Self {
            text: text.into(),
            class: class.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Status,
    Uptime,
    Containers,
    UpdatedAt,
    LoadAverage,
    Memory,
    DiskUsed,
    DnsStatus,
    SecurityPosture,
    RiskBand,
    OpenTasks,
    LastScan,
    RiskScore,
    LastRun,
    FindingCount,
}

impl FieldKind {
    pub fn render(self, snap: &Snapshot) -> Rendered {
        match self {
            Self::Status => badge(snap.text("status")),
            Self::Uptime => plain(format_uptime(snap.number("uptime_seconds"))),
            Self::Containers => plain(
                snap.number("containers_up")
                    .filter(|n| *n >= 0.0)
                    .map(|n| format!("{n}"))
                    .unwrap_or_else(|| UNAVAILABLE.to_string()),
            ),
            Self::UpdatedAt => plain(format_timestamp(snap.text("updated_at"), "Unknown")),
            Self::LoadAverage => plain(snap.display("load_avg").unwrap_or_else(|| "Unknown".into())),
            Self::Memory => plain(format_memory(snap)),
            Self::DiskUsed => plain(snap.text("disk_used_pct").unwrap_or("unknown")),
            Self::DnsStatus => {
                let status = snap.text("dns_status");
                Rendered::new(upper_or_unknown(status), status_class(status.or(Some("degraded"))))
            }
            Self::SecurityPosture => {
                let posture = snap.text("security.posture");
                let class = if posture == Some("good") { OK_CLASS } else { BAD_CLASS };
                Rendered::new(upper_or_unknown(posture), class)
            }
            Self::RiskBand => plain(upper_or_unknown(snap.text("security.risk_band"))),
            Self::OpenTasks => plain(
                snap.number("security.open_tasks")
                    .map(|n| format!("{n}"))
                    .unwrap_or_else(|| "Unknown".to_string()),
            ),
            Self::LastScan => plain(format_timestamp(snap.text("security.last_scan"), "Unknown")),
            Self::RiskScore => plain(snap.display("risk_score").unwrap_or_else(|| "unknown".into())),
            Self::LastRun => plain(format_timestamp(snap.text("last_run"), "never")),
            Self::FindingCount => plain(snap.array("findings").len().to_string()),
        }
    }

    /// What the field shows when no snapshot could be fetched.
    pub fn degraded(self) -> Rendered {
        let text = match self {
            Self::Status | Self::DnsStatus | Self::SecurityPosture => DEGRADED,
            _ => UNAVAILABLE,
        };
        Rendered::new(text, BAD_CLASS)
    }
}

fn plain(text: impl Into<String>) -> Rendered {
    Rendered::new(text, PLAIN_CLASS)
}

fn badge(status: Option<&str>) -> Rendered {
    Rendered::new(upper_or_unknown(status), status_class(status))
}

fn upper_or_unknown(value: Option<&str>) -> String {
    value.unwrap_or("unknown").to_uppercase()
}

pub fn status_class(status: Option<&str>) -> &'static str {
    match status {
        Some("ok" | "active") => OK_CLASS,
        Some("degraded") => WARN_CLASS,
        _ => BAD_CLASS,
    }
}

pub fn format_uptime(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| *s > 0.0) else {
        return "Unknown".to_string();
    };
    let seconds = seconds.floor() as u64;
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    format!("{days}d {hours}h {minutes}m")
}

pub fn format_timestamp(value: Option<&str>, missing: &str) -> String {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| missing.to_string())
}

fn format_memory(snap: &Snapshot) -> String {
    let (Some(pct), Some(used), Some(total)) = (
        memory_percent(snap),
        snap.number("memory_used_mb"),
        snap.number("memory_total_mb"),
    ) else {
        return "Unknown".to_string();
    };
    format!("{pct:.1}% ({used}MB/{total}MB)")
}

/// One generated list item or table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub class: String,
    pub cells: Vec<String>,
}

impl Row {
    fn item(text: String, class: &str) -> Self {
        Self {
            class: class.to_string(),
            cells: vec![text],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Services,
    DnsDetails,
    Findings,
    RemediationTasks,
}

impl ListKind {
    pub fn rows(self, snap: &Snapshot) -> Vec<Row> {
        match self {
            Self::Services => snap
                .array("services")
                .iter()
                .map(|s| {
                    let status = item_text(s, "status").unwrap_or("unknown");
                    let class = if status == "active" { OK_CLASS } else { WARN_CLASS };
                    let name = item_text(s, "name").unwrap_or("unknown");
                    Row::item(format!("{name}: {status}"), class)
                })
                .collect(),
            Self::DnsDetails => snap
                .array("dns_details")
                .iter()
                .filter_map(|d| d.as_str())
                .map(|d| {
                    let class = if d.contains("unresolved") { BAD_CLASS } else { OK_CLASS };
                    Row::item(d.to_string(), class)
                })
                .collect(),
            Self::Findings => finding_rows(snap),
            Self::RemediationTasks => task_rows(snap),
        }
    }
}

pub fn severity_class(severity: Option<&str>) -> &'static str {
    match severity.map(str::to_ascii_lowercase).as_deref() {
        Some("high") => "sev-high",
        Some("medium") => "sev-medium",
        _ => "sev-low",
    }
}

fn finding_rows(snap: &Snapshot) -> Vec<Row> {
    let findings = snap.array("findings");
    if findings.is_empty() {
        return vec![Row::item(
            "No active findings from the latest scan.".to_string(),
            "sev-low",
        )];
    }
    findings
        .iter()
        .map(|f| {
            let cell = |field: &str, missing: &str| item_text(f, field).unwrap_or(missing).to_string();
            Row {
                class: severity_class(item_text(f, "severity")).to_string(),
                cells: vec![
                    cell("severity", "unknown"),
                    cell("tool", "n/a"),
                    cell("target", "n/a"),
                    cell("cve", "n/a"),
                    cell("cve_url", "n/a"),
                    cell("summary", "n/a"),
                ],
            }
        })
        .collect()
}

fn task_rows(snap: &Snapshot) -> Vec<Row> {
    let tasks = snap.array("remediation.tasks");
    if tasks.is_empty() {
        return vec![Row::item(
            "No open remediation tasks right now.".to_string(),
            "sev-low",
        )];
    }
    tasks
        .iter()
        .map(|t| {
            let field = |name: &str| item_text(t, name).unwrap_or("n/a");
            Row::item(
                format!(
                    "[{}] {} - {} ({})",
                    field("priority"),
                    field("title"),
                    field("action"),
                    field("status")
                ),
                "",
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_badges() {
        let ok = Snapshot::new(json!({ "status": "ok" }));
        assert_eq!(FieldKind::Status.render(&ok), Rendered::new("OK", "value ok"));

        let degraded = Snapshot::new(json!({ "status": "degraded" }));
        assert_eq!(FieldKind::Status.render(&degraded).class, "value warn");

        let missing = Snapshot::new(json!({}));
        assert_eq!(FieldKind::Status.render(&missing), Rendered::new("UNKNOWN", "value bad"));
        // absent DNS status is treated as degraded
        assert_eq!(FieldKind::DnsStatus.render(&missing).class, "value warn");
    }

    #[test]
    fn test_uptime_and_memory() {
        assert_eq!(format_uptime(Some(93_784.0)), "1d 2h 3m");
        assert_eq!(format_uptime(Some(0.0)), "Unknown");
        assert_eq!(format_uptime(None), "Unknown");

        let snap = Snapshot::new(json!({ "memory_used_mb": 512, "memory_total_mb": 2048 }));
        assert_eq!(FieldKind::Memory.render(&snap).text, "25.0% (512MB/2048MB)");
        let snap = Snapshot::new(json!({ "memory_used_mb": 512 }));
        assert_eq!(FieldKind::Memory.render(&snap).text, "Unknown");
    }

    #[test]
    fn test_containers_and_counts() {
        let snap = Snapshot::new(json!({ "containers_up": -1, "security": { "open_tasks": 4 } }));
        assert_eq!(FieldKind::Containers.render(&snap).text, "Unavailable");
        assert_eq!(FieldKind::OpenTasks.render(&snap).text, "4");

        let snap = Snapshot::new(json!({ "containers_up": 3 }));
        assert_eq!(FieldKind::Containers.render(&snap).text, "3");
    }

    #[test]
    fn test_load_average_accepts_numbers() {
        let snap = Snapshot::new(json!({ "load_avg": "0.42 0.30 0.25" }));
        assert_eq!(FieldKind::LoadAverage.render(&snap).text, "0.42 0.30 0.25");
        let snap = Snapshot::new(json!({ "load_avg": 17 }));
        assert_eq!(FieldKind::LoadAverage.render(&snap).text, "17");
        let snap = Snapshot::new(json!({ "load_avg": null }));
        assert_eq!(FieldKind::LoadAverage.render(&snap).text, "Unknown");
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(
            format_timestamp(Some("2024-01-01T02:30:00+02:00"), "Unknown"),
            "2024-01-01 00:30:00 UTC"
        );
        assert_eq!(format_timestamp(Some("yesterday"), "Unknown"), "Unknown");
        assert_eq!(format_timestamp(None, "never"), "never");
    }

    #[test]
    fn test_degraded_texts() {
        assert_eq!(FieldKind::Status.degraded(), Rendered::new("DEGRADED", "value bad"));
        assert_eq!(FieldKind::Memory.degraded(), Rendered::new("Unavailable", "value bad"));
    }

    #[test]
    fn test_service_and_dns_rows() {
        let snap = Snapshot::new(json!({
            "services": [
                { "name": "caddy", "status": "active" },
                { "name": "ufw", "status": "inactive" }
            ],
            "dns_details": ["git: 10.8.0.1", "cloud: unresolved", 7]
        }));
        let services = ListKind::Services.rows(&snap);
        assert_eq!(services[0], Row::item("caddy: active".into(), "value ok"));
        assert_eq!(services[1].class, "value warn");

        let dns = ListKind::DnsDetails.rows(&snap);
        assert_eq!(dns.len(), 2);
        assert_eq!(dns[1].class, "value bad");
    }

    #[test]
    fn test_findings_and_tasks_rows() {
        let empty = Snapshot::new(json!({}));
        assert_eq!(ListKind::Findings.rows(&empty)[0].class, "sev-low");
        assert_eq!(
            ListKind::RemediationTasks.rows(&empty)[0].cells,
            vec!["No open remediation tasks right now."]
        );

        let snap = Snapshot::new(json!({
            "findings": [{ "severity": "HIGH", "tool": "trivy", "cve": "CVE-2024-1" }],
            "remediation": { "tasks": [
                { "priority": "P1", "title": "Patch", "action": "upgrade", "status": "open" }
            ]}
        }));
        let findings = ListKind::Findings.rows(&snap);
        assert_eq!(findings[0].class, "sev-high");
        assert_eq!(findings[0].cells[3], "CVE-2024-1");
        assert_eq!(findings[0].cells[5], "n/a");
        assert_eq!(
            ListKind::RemediationTasks.rows(&snap)[0].cells[0],
            "[P1] Patch - upgrade (open)"
        );
    }
}
