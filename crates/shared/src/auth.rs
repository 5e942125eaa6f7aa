//! Authentication types for identity-provider tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims issued after a successful identity-provider sign-in.
///
/// The subject is the user's email address, which is the stable key the
/// service uses to look the user up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email).
    pub sub: String,
    /// Display name reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar URL reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user profile.
    #[must_use]
    pub fn new(
        email: &str,
        name: Option<&str>,
        picture: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: email.to_string(),
            name: name.map(String::from),
            picture: picture.map(String::from),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the email address from claims.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.sub
    }
}
