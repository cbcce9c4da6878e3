//! Student records form proxy.
//!
//! Serves an HTML page with four forms (view, add, update, delete) and turns
//! each submission into one call on the external Student Records API
//! (`/etudiants/`), rendering the API's answer back into the page.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;
pub mod view;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
