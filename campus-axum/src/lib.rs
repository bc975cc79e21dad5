//! campus-axum: axum adapter for the Campus LMS edge.
//!
//! Request tagging middleware (tenant header + admin gate), a tenant
//! extractor, and error-to-response mapping.

pub mod app;
pub mod extract;
pub mod middlewares;
mod error;

pub use error::CampusAxumError;
pub use extract::Tenant;

pub use app::{axum, AxumApp};
