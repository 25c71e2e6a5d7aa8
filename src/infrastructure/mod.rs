// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_provider;
pub mod memory_document;
pub mod profiles;
pub mod recording_surface;
