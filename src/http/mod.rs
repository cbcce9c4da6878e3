//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (x-request-id assigned)
//!     → extract.rs (FormPayload from the body, UpstreamTarget from Host + config)
//!     → handlers.rs (one Student API call per action)
//!     → view::Page, or error.rs mapping the failure to an error page
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ProxyError;
pub use extract::FormPayload;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
