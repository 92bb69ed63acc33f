//! User entity models.
//!
//! Users are owned by the external identity provider; this model exists for
//! role lookups and test seeding only.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quill_core::error::CoreError;
use quill_core::roles::Role;
use quill_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
}

impl User {
    /// Parse the stored role into the typed enum.
    pub fn parsed_role(&self) -> Result<Role, CoreError> {
        self.role
            .parse()
            .map_err(|_| CoreError::Internal(format!("Unknown stored role '{}'", self.role)))
    }
}

/// DTO for inserting a user (seeds and tests).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub display_name: String,
    pub role: Role,
}
