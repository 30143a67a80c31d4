use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;

/// Persistence port for identity records.
///
/// Implementations must resolve identifiers in both supported encodings —
/// the store's native ObjectId form and the legacy plain-string form — by
/// trying them in that order and taking the first hit.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Look up an identity by exact, case-sensitive email match.
    ///
    /// # Errors
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Look up an identity by either identifier encoding.
    ///
    /// # Errors
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Persist a new identity and return the store-assigned id.
    ///
    /// # Errors
    /// * `DuplicateEmail` - an identity with this email already exists
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn insert(&self, user: NewUser) -> Result<UserId, UserError>;

    /// Apply the provided fields to an existing identity.
    ///
    /// # Errors
    /// * `NotFound` - neither identifier encoding matched a record
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserError>;

    /// All identities, for the public listing.
    ///
    /// # Errors
    /// * `StoreUnavailable` - timeout or connectivity failure
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
