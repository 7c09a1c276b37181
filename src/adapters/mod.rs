// Adapters layer: concrete implementations of domain ports for external systems.

pub mod engine_http;

pub use engine_http::HttpGeoEngine;
