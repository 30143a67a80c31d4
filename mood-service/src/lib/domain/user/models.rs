use std::fmt;
use std::str::FromStr;

use crate::domain::user::errors::DisplayNameError;
use crate::domain::user::errors::EmailError;

/// Identity record.
///
/// A stored user profile including credentials. The password field only
/// ever holds a hash; plaintext never reaches the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub nama: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// Identity awaiting insertion; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nama: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Opaque identity identifier.
///
/// New records carry the store's native ObjectId in hex form; legacy
/// records may carry an arbitrary string. Which encoding applies is the
/// store adapter's concern, not the domain's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type (`nama` on the wire).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Empty` - name is empty or all whitespace
    /// * `TooLong` - name longer than 100 characters
    pub fn new(nama: String) -> Result<Self, DisplayNameError> {
        if nama.trim().is_empty() {
            return Err(DisplayNameError::Empty);
        }
        let length = nama.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(nama))
    }

    /// Get the display name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address value type.
///
/// Validated against RFC 5322; stored and compared case-sensitively,
/// exactly as provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get the email as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity plus freshly minted access token, produced by login.
#[derive(Debug)]
pub struct AuthenticatedIdentity {
    pub user: User,
    pub token: String,
}

/// Command to register a new identity with validated fields.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub nama: DisplayName,
    pub email: EmailAddress,
    pub password: String,
}

/// Requested password rotation.
///
/// `current` must verify against the stored hash before `new` is applied.
#[derive(Debug)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
}

/// Command to update an identity; only provided fields are applied.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub nama: Option<DisplayName>,
    pub email: Option<EmailAddress>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub password_change: Option<PasswordChange>,
}

impl UpdateUserCommand {
    /// True when the command would not change anything.
    pub fn is_empty(&self) -> bool {
        self.nama.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.bio.is_none()
            && self.profile_image.is_none()
            && self.password_change.is_none()
    }
}

/// Partial field set handed to the store adapter.
///
/// Built by the service after password-change verification; by this point
/// every field is plain storable data.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub nama: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub password_hash: Option<String>,
}
