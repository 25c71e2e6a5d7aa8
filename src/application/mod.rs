// Application layer - Dashboard engine, overlays and refresh loop
pub mod dashboard;
pub mod dom_host;
pub mod events;
pub mod health_provider;
pub mod modal;
pub mod scheduler;
pub mod view;
