// Export modules for the binary and the integration tests
pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod models;
pub mod rpc;
pub mod telemetry;
