//! Storage module for file management
//!
//! Provides the object-store seam used by the files feature and its
//! Cloudflare R2 implementation.

mod object_store;
mod r2_client;

pub use object_store::{ObjectStore, ObjectSummary};
pub use r2_client::R2Client;
