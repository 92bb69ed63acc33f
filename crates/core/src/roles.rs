//! Editorial roles.
//!
//! Every user holds exactly one role, resolved by the identity provider and
//! carried in the access token. The string constants must match the CHECK
//! constraint seeded in `20260301000001_create_users_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_AUTHOR: &str = "author";
pub const ROLE_REVIEWER: &str = "reviewer";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_ADMINISTRATOR: &str = "administrator";

/// A user's editorial role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Author,
    Reviewer,
    Editor,
    Administrator,
}

impl Role {
    /// All roles, in seed order.
    pub const ALL: [Role; 4] = [Role::Author, Role::Reviewer, Role::Editor, Role::Administrator];

    /// The database/wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Author => ROLE_AUTHOR,
            Role::Reviewer => ROLE_REVIEWER,
            Role::Editor => ROLE_EDITOR,
            Role::Administrator => ROLE_ADMINISTRATOR,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_AUTHOR => Ok(Role::Author),
            ROLE_REVIEWER => Ok(Role::Reviewer),
            ROLE_EDITOR => Ok(Role::Editor),
            ROLE_ADMINISTRATOR => Ok(Role::Administrator),
            other => Err(format!("Unknown role '{other}'")),
        }
    }
}
