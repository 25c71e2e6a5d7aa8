// Application state for HTTP handlers
use crate::application::scheduler::DashboardCommand;
use crate::application::view::DashboardView;
use tokio::sync::{mpsc, watch};

#[derive(Clone)]
pub struct AppState {
    /// Latest view published by the refresh loop.
    pub view: watch::Receiver<DashboardView>,
    pub commands: mpsc::Sender<DashboardCommand>,
}
