//! Domain values carried by destinations and sheets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub number: String,
}

impl Card {
    /// Card reconstructed from an id alone, as deep links do.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            number: format!("number-{id}"),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTransaction {
    pub id: String,
    pub merchant: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Fixed session used by the `/login` deep link.
    pub fn demo() -> Self {
        Self::new("access-token", "refresh-token")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaEnrollmentRequirement {
    pub mfa_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaChallengeRequirement {
    pub mfa_token: String,
    pub binding_code: String,
}
