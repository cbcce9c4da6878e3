//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Load config → PORT override → Validate → Logging/metrics → Bind → Serve
//!
//! Shutdown:
//!     Ctrl+C / SIGTERM / Shutdown::trigger → signals.rs → stop accepting → drain → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
