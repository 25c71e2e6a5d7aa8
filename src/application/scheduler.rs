// Refresh loop - one task owns the dashboard and serializes all mutations
use super::dashboard::Dashboard;
use super::dom_host::DomHost;
use super::events::UiEvent;
use super::health_provider::{FetchError, HealthProvider};
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use futures::future::{BoxFuture, OptionFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Source of refresh cadence. Returns `false` once no more ticks will come.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> bool;
}

pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    /// First tick fires immediately, so the initial refresh happens at startup.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    Ui(UiEvent),
    /// Refresh now, outside the regular cadence.
    Refresh,
}

type Fetch = BoxFuture<'static, Result<Snapshot, FetchError>>;

/// Drive `dashboard` until the ticker and the command channel are done and
/// no fetch is outstanding.
///
/// At most one fetch is in flight. While it is, ticks are not taken and
/// refresh commands are dropped, but UI events are still handled at once.
/// `publish` is called after every change.
pub async fn run_dashboard<H, T, F>(
    mut dashboard: Dashboard<H>,
    provider: Arc<dyn HealthProvider>,
    mut ticker: T,
    mut commands: mpsc::Receiver<DashboardCommand>,
    mut publish: F,
) -> Dashboard<H>
where
    H: DomHost + Send,
    T: Ticker,
    F: FnMut(&Dashboard<H>) + Send,
{
    let mut ticking = true;
    let mut listening = true;
    let mut inflight: Option<Fetch> = None;

    while ticking || listening || inflight.is_some() {
        tokio::select! {
            Some(result) = OptionFuture::from(inflight.as_mut()), if inflight.is_some() => {
                inflight = None;
                dashboard.apply(result);
            }
            more = ticker.tick(), if ticking && inflight.is_none() => {
                if more {
                    inflight = Some(start_fetch(&provider));
                } else {
                    tracing::debug!("ticker finished");
                    ticking = false;
                }
            }
            command = commands.recv(), if listening => match command {
                Some(DashboardCommand::Refresh) => {
                    if inflight.is_none() {
                        inflight = Some(start_fetch(&provider));
                    } else {
                        tracing::debug!("refresh already in flight, coalescing");
                    }
                }
                Some(DashboardCommand::Ui(event)) => {
                    dashboard.handle_event(event);
                }
                None => {
                    tracing::debug!("command channel closed");
                    listening = false;
                }
            },
        }
        publish(&dashboard);
    }

    tracing::info!(
        dashboard = %dashboard.profile().name,
        cycles = dashboard.stats().cycles,
        "refresh loop stopped"
    );
    dashboard
}

fn start_fetch(provider: &Arc<dyn HealthProvider>) -> Fetch {
    let provider = Arc::clone(provider);
    Box::pin(async move { provider.fetch().await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::Target;
    use crate::application::modal::ModalViewState;
    use crate::infrastructure::config::Variant;
    use crate::infrastructure::memory_document::MemoryDocument;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{watch, Notify};
    use tokio::time::timeout;

    struct ManualTicker {
        remaining: usize,
    }

    #[async_trait]
    impl Ticker for ManualTicker {
        async fn tick(&mut self) -> bool {
            if self.remaining == 0 {
                return false;
            }
            self.remaining -= 1;
            tokio::task::yield_now().await;
            true
        }
    }

    /// Returns load averages 1, 2, 3... and fails every third call.
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HealthProvider for CountingProvider {
        async fn fetch(&self) -> Result<Snapshot, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call % 3 == 0 {
                return Err(FetchError::Status {
                    url: "http://status/api/admin/health".into(),
                    status: 502,
                });
            }
            Ok(Snapshot::new(json!({ "status": "ok", "load_avg": format!("{call} 0 0") })))
        }
    }

    fn provider() -> Arc<CountingProvider> {
        Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_runs_one_refresh_per_tick() {
        let dashboard = Dashboard::new(Variant::Admin.profile(), MemoryDocument::new(1.0));
        let provider = provider();
        let (tx, rx) = mpsc::channel(4);
        drop(tx);

        let mut published = 0;
        let dashboard = run_dashboard(
            dashboard,
            provider.clone(),
            ManualTicker { remaining: 4 },
            rx,
            |_| published += 1,
        )
        .await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
        assert_eq!(dashboard.stats().cycles, 4);
        assert_eq!(dashboard.stats().failures, 1);
        // failed cycles add no sample
        assert_eq!(dashboard.history().values("load"), vec![1.0, 2.0, 4.0]);
        assert!(published >= 4);
    }

    #[tokio::test]
    async fn test_open_modal_tracks_queued_refresh() {
        let dashboard = Dashboard::new(Variant::Admin.profile(), MemoryDocument::new(1.0));
        let provider = provider();
        let (tx, rx) = mpsc::channel(8);

        tx.send(DashboardCommand::Refresh).await.unwrap();
        tx.send(DashboardCommand::Ui(UiEvent::Click {
            target: Target::ChartWidget { metric: "load".into() },
        }))
        .await
        .unwrap();
        drop(tx);

        let mut last_open = None;
        let dashboard = run_dashboard(
            dashboard,
            provider.clone(),
            ManualTicker { remaining: 0 },
            rx,
            |d| last_open = d.modal_state().active_metric_key,
        )
        .await;

        // whichever lands first, the open chart ends up showing the sample
        assert_eq!(dashboard.history().values("load"), vec![1.0]);
        assert_eq!(last_open.as_deref(), Some("load"));
        assert_eq!(dashboard.host().text("[data-stat-samples]"), Some("1"));
    }

    /// Holds every fetch until released.
    struct GatedProvider {
        calls: AtomicUsize,
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl HealthProvider for GatedProvider {
        async fn fetch(&self) -> Result<Snapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(Snapshot::new(json!({ "status": "ok", "load_avg": "0.42 0.30 0.25" })))
        }
    }

    #[tokio::test]
    async fn test_ui_events_handled_while_fetch_in_flight() {
        let dashboard = Dashboard::new(Variant::Admin.profile(), MemoryDocument::new(1.0));
        let provider = Arc::new(GatedProvider {
            calls: AtomicUsize::new(0),
            started: Notify::new(),
            release: Notify::new(),
        });
        let (tx, rx) = mpsc::channel(8);
        let (state_tx, mut state_rx) = watch::channel(ModalViewState::default());

        let task = tokio::spawn(run_dashboard(
            dashboard,
            provider.clone(),
            ManualTicker { remaining: 1 },
            rx,
            move |d| {
                state_tx.send_replace(d.modal_state());
            },
        ));

        provider.started.notified().await;
        tx.send(DashboardCommand::Refresh).await.unwrap();
        tx.send(DashboardCommand::Ui(UiEvent::Click {
            target: Target::ChartWidget { metric: "load".into() },
        }))
        .await
        .unwrap();

        timeout(Duration::from_secs(2), state_rx.wait_for(|s| s.is_open))
            .await
            .expect("click not handled while fetch was pending")
            .unwrap();
        // the refresh command was coalesced into the pending fetch
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        provider.release.notify_one();
        drop(tx);
        let dashboard = task.await.unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(dashboard.history().values("load"), vec![0.42]);
        assert_eq!(dashboard.stats().cycles, 1);
        assert_eq!(dashboard.host().text("[data-stat-samples]"), Some("1"));
    }
}
