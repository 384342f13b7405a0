//! Router assembly, serving with graceful shutdown, and the liveness/readiness endpoints.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_router, serve};
pub use health::{HealthResponse, Probe, ProbeState, ReadinessReport, health_router};
pub use shutdown::shutdown_signal;
