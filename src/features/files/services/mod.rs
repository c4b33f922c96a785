pub mod content_type;
mod file_service;

pub use file_service::{parse_expiry, FileService};
