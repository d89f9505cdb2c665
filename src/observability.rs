//! Observability hooks for gateway traffic.
//!
//! Implement [`GatewayMetrics`] to feed request outcomes into a monitoring
//! system; the default trait methods log via the `log` crate, and
//! [`NoOpMetrics`] silences them entirely.
//!
//! ```ignore
//! use backoffice_kit::observability::GatewayMetrics;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl GatewayMetrics for PrometheusMetrics {
//!     fn record_request(&self, _route: &str, _duration: Duration) {
//!         // counter!("gateway_requests").inc();
//!         // histogram!("gateway_latency").record(duration);
//!     }
//!     fn record_failure(&self, _route: &str, _error: &str) {
//!         // counter!("gateway_failures").inc();
//!     }
//! }
//!
//! // let gateways = HttpGateways::with_metrics(config, Arc::new(PrometheusMetrics))?;
//! ```

use std::time::Duration;

/// Trait for gateway request metrics collection.
pub trait GatewayMetrics: Send + Sync {
    /// Record a completed request.
    fn record_request(&self, route: &str, duration: Duration) {
        debug!("Gateway OK: {} took {:?}", route, duration);
    }

    /// Record a failed request.
    fn record_failure(&self, route: &str, error: &str) {
        warn!("Gateway FAILED: {}: {}", route, error);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Default)]
pub struct NoOpMetrics;

impl GatewayMetrics for NoOpMetrics {
    fn record_request(&self, _route: &str, _duration: Duration) {}
    fn record_failure(&self, _route: &str, _error: &str) {}
}
