//! API route definitions.
//!
//! This module organizes all HTTP routes for the OTEL translator API server.

mod health;
mod translate;

pub use health::health_routes;
pub use translate::translate_routes;
