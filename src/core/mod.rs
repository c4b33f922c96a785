pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod middleware;
pub mod openapi;
