use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Signed token payload.
///
/// Fixed claim set: the identity id, the email and display name snapshot
/// taken at issuance, and the validity window. Claims are immutable once
/// issued; changing any of them means minting a new token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity record id
    pub sub: String,

    /// Email at issuance
    pub email: String,

    /// Display name at issuance
    pub nama: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Build the claim set for an identity.
    ///
    /// # Arguments
    /// * `id` - Identity record id
    /// * `email` - Email address at issuance
    /// * `nama` - Display name at issuance
    /// * `validity_hours` - Hours until the token expires
    pub fn for_identity(
        id: impl Into<String>,
        email: impl Into<String>,
        nama: impl Into<String>,
        validity_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(validity_hours);

        Self {
            sub: id.into(),
            email: email.into(),
            nama: nama.into(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Whether the claim set is expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
