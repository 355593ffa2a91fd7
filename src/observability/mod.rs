//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - The forwarding core stays silent; logging happens around it
//! - Metrics are cheap (atomic increments) and off unless enabled

pub mod logging;
pub mod metrics;
