//! Server-rendered view.
//!
//! One askama template (`templates/index.html`) holds the four forms and the
//! result of the last action. Handlers return a [`Page`], which carries both
//! the render context and the HTTP status to serve it with.

pub mod page;

pub use page::{IndexPage, Page};
