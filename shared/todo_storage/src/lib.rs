//! Todo storage services
//!
//! This crate provides the `DynamoDB`-backed persistence for todo items that the
//! backend reads when issuing attachment upload links.

pub mod todo;
