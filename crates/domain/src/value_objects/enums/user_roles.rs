use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The three user classes the platform serves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Company,
    Affiliate,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Company => "company",
            UserRole::Affiliate => "affiliate",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "company" => Some(UserRole::Company),
            "affiliate" => Some(UserRole::Affiliate),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
