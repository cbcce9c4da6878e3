//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, upstream client, middleware
//!     → logging.rs (structured tracing events, EnvFilter)
//!     → metrics.rs (upstream call counters and latencies)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (when enabled)
//! ```

pub mod logging;
pub mod metrics;
