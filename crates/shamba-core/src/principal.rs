//! The authenticated principal as reported by the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::de::string_or_number;
use crate::error::{Error, InvalidInputError};

/// The kind of account a principal holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Buyer,
    Agrovet,
    Admin,
    /// A role this client does not know about.
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Buyer => "buyer",
            Role::Agrovet => "agrovet",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "buyer" => Ok(Role::Buyer),
            "agrovet" => Ok(Role::Agrovet),
            "admin" => Ok(Role::Admin),
            other => Err(InvalidInputError::Other {
                message: format!("unknown role '{}'", other),
            }
            .into()),
        }
    }
}

/// A cached copy of the signed-in profile.
///
/// Used for display only. The backend re-validates every privileged action,
/// so nothing here is treated as an access-control decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "unknown_role")]
    pub user_type: Role,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

fn unknown_role() -> Role {
    Role::Unknown
}
