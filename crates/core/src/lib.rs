//! Domain types and pure workflow logic for the quill editorial platform.
//!
//! This crate has no I/O: it defines the id/timestamp aliases, the error
//! taxonomy, the role and status sum types, the lifecycle transition table,
//! and the closed notification-type enum consumed by the other crates.

pub mod error;
pub mod notifications;
pub mod roles;
pub mod types;
pub mod workflow;
