// Domain layer - Core dashboard types and pure rendering logic
pub mod color;
pub mod fields;
pub mod history;
pub mod metric;
pub mod snapshot;
pub mod sources;
pub mod sparkline;
pub mod surface;
pub mod trend;
