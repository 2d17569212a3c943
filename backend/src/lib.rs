//! Todo Backend service

#![deny(clippy::all, missing_docs, dead_code)]

/// S3 presigning for object uploads
pub mod object_storage;

/// HTTP routes
pub mod routes;

/// HTTP server
pub mod server;

/// Shared API types and configuration
pub mod types;

/// Upload links for todo attachments
pub mod upload_link;

/// In-memory collaborators for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
