// HTTP request handlers
use crate::application::events::{EventOutcome, UiEvent};
use crate::application::scheduler::DashboardCommand;
use crate::application::view::DashboardView;
use crate::presentation::app_state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard state as JSON
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.view.borrow().clone())
}

/// Queue a pointer or keyboard event for the dashboard
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<UiEvent>,
) -> impl IntoResponse {
    let outcome = activation_outcome(&event);
    match state.commands.send(DashboardCommand::Ui(event)).await {
        Ok(()) => (StatusCode::ACCEPTED, Json(outcome)).into_response(),
        Err(e) => {
            tracing::error!("Dashboard loop is gone, dropping event: {}", e);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

/// Request an immediate refresh
pub async fn post_refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.commands.send(DashboardCommand::Refresh).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!("Dashboard loop is gone, dropping refresh: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

// Events are applied asynchronously, so the host learns up front whether to
// suppress its default action.
fn activation_outcome(event: &UiEvent) -> EventOutcome {
    use crate::application::events::{Key, Target};

    let prevent_default = matches!(
        event,
        UiEvent::KeyDown {
            key: Key::Enter | Key::Space,
            target: Target::ChartWidget { .. } | Target::FindingsTable,
        }
    );
    EventOutcome { prevent_default }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::{Key, Target};
    use tokio::sync::{mpsc, watch};

    fn state() -> (Arc<AppState>, mpsc::Receiver<DashboardCommand>) {
        let (_publisher, view) = watch::channel(DashboardView {
            name: "admin".into(),
            ..DashboardView::default()
        });
        let (commands, rx) = mpsc::channel(4);
        (Arc::new(AppState { view, commands }), rx)
    }

    #[tokio::test]
    async fn test_get_dashboard_returns_latest_view() {
        let (state, _rx) = state();
        let Json(view) = get_dashboard(State(state)).await;
        assert_eq!(view.name, "admin");
    }

    #[tokio::test]
    async fn test_post_event_forwards_command() {
        let (state, mut rx) = state();
        let event = UiEvent::KeyDown {
            key: Key::Space,
            target: Target::ChartWidget { metric: "load".into() },
        };
        let response = post_event(State(state), Json(event.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(rx.recv().await, Some(DashboardCommand::Ui(event)));
        assert!(activation_outcome(&UiEvent::Navigate) == EventOutcome::default());
    }

    #[tokio::test]
    async fn test_refresh_fails_when_loop_stopped() {
        let (state, rx) = state();
        drop(rx);
        assert_eq!(post_refresh(State(state)).await, StatusCode::SERVICE_UNAVAILABLE);
    }
}
