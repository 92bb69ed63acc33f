//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod article;
pub mod assignment;
pub mod notification;
pub mod review_request;
pub mod user;
pub mod workflow_log;
