//! Student Records API subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (Host header, x-request-id)
//!     → target.rs (BaseResolver → UpstreamTarget, one per request)
//!     → client.rs (StudentApi: GET / POST / PUT / DELETE on /etudiants/)
//!     → UpstreamReply or UpstreamError
//! ```
//!
//! # Design Decisions
//! - The target is a value passed into each call, never shared state
//! - Calls are bounded by a timeout and never retried
//! - Non-2xx answers are errors carrying the API's body

pub mod client;
pub mod target;

pub use client::{Action, StudentApi, UpstreamError, UpstreamReply};
pub use target::{derive_base, BaseResolver, TargetError, UpstreamTarget};

/// An opaque student record, as submitted by the browser.
pub type Record = serde_json::Map<String, serde_json::Value>;
