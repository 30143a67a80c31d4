use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticatedIdentity;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::ports::UserRepository;

/// Authentication and profile flow.
///
/// Orchestrates the credential hasher, the identity store, and the token
/// service. Holds no mutable state; a single instance is shared across
/// request tasks.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    authenticator: Arc<Authenticator>,
    token_validity_hours: i64,
}

impl UserService {
    /// Create the service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - identity persistence implementation
    /// * `authenticator` - credential hashing + token issuance
    /// * `token_validity_hours` - lifetime of issued tokens
    pub fn new(
        repository: Arc<dyn UserRepository>,
        authenticator: Arc<Authenticator>,
        token_validity_hours: i64,
    ) -> Self {
        Self {
            repository,
            authenticator,
            token_validity_hours,
        }
    }

    /// Register a new identity.
    ///
    /// The password is hashed before anything is persisted; email
    /// uniqueness is enforced by the store adapter on insert.
    ///
    /// # Errors
    /// * `DuplicateEmail` - email is already registered
    /// * `HashingFailure` - password could not be hashed
    /// * `StoreUnavailable` - store timeout or connectivity failure
    pub async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::HashingFailure(e.to_string()))?;

        let new_user = NewUser {
            nama: command.nama,
            email: command.email,
            password_hash,
        };

        let id = self.repository.insert(new_user.clone()).await?;
        tracing::info!(user_id = %id, "identity registered");

        Ok(User {
            id,
            nama: new_user.nama,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: None,
            bio: None,
            profile_image: None,
        })
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password collapse into the same
    /// `InvalidCredentials`, so the response cannot reveal which one it was.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no such email, or password mismatch
    /// * `TokenIssuance` - signing the token failed
    /// * `StoreUnavailable` - store timeout or connectivity failure
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedIdentity, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let claims = Claims::for_identity(
            user.id.as_str(),
            user.email.as_str(),
            user.nama.as_str(),
            self.token_validity_hours,
        );

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, &claims)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                other => UserError::TokenIssuance(other.to_string()),
            })?;

        Ok(AuthenticatedIdentity {
            user,
            token: result.access_token,
        })
    }

    /// Retrieve one identity by either identifier encoding.
    ///
    /// # Errors
    /// * `NotFound` - no record matched
    /// * `StoreUnavailable` - store timeout or connectivity failure
    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// All identities, for the public listing.
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    /// Apply a profile update.
    ///
    /// When a password change is requested the current password is loaded
    /// and verified first; the stored hash is never touched otherwise.
    ///
    /// # Errors
    /// * `InvalidCredentials` - current password did not verify
    /// * `NotFound` - no record matched either identifier encoding
    /// * `HashingFailure` - new password could not be hashed
    /// * `StoreUnavailable` - store timeout or connectivity failure
    pub async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<(), UserError> {
        let mut patch = UserPatch {
            nama: command.nama.map(|n| n.as_str().to_string()),
            email: command.email.map(|e| e.as_str().to_string()),
            role: command.role,
            bio: command.bio,
            profile_image: command.profile_image,
            password_hash: None,
        };

        if let Some(change) = command.password_change {
            let user = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| UserError::NotFound(id.to_string()))?;

            if !self
                .authenticator
                .verify_password(&change.current, &user.password_hash)
            {
                return Err(UserError::InvalidCredentials);
            }

            patch.password_hash = Some(
                self.authenticator
                    .hash_password(&change.new)
                    .map_err(|e| UserError::HashingFailure(e.to_string()))?,
            );
        }

        self.repository.update_fields(id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PasswordChange;

    const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn insert(&self, user: NewUser) -> Result<UserId, UserError>;
            async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
        }
    }

    fn service(repository: MockTestUserRepository) -> UserService {
        UserService::new(
            Arc::new(repository),
            Arc::new(Authenticator::new(TEST_SECRET)),
            72,
        )
    }

    fn stored_user(id: &str, email: &str, password: &str) -> User {
        let authenticator = Authenticator::new(TEST_SECRET);
        User {
            id: UserId::new(id),
            nama: DisplayName::new("Alice".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            role: None,
            bio: None,
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_insert()
            .withf(|user| {
                user.email.as_str() == "alice@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "secret123"
            })
            .times(1)
            .returning(|_| Ok(UserId::new("abc123")));

        let service = service(repository);

        let command = RegisterUserCommand {
            nama: DisplayName::new("Alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: "secret123".to_string(),
        };

        let user = service.register(command).await.unwrap();
        assert_eq!(user.id, UserId::new("abc123"));
        assert_eq!(user.nama.as_str(), "Alice");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_insert()
            .times(1)
            .returning(|user| Err(UserError::DuplicateEmail(user.email.as_str().to_string())));

        let service = service(repository);

        let command = RegisterUserCommand {
            nama: DisplayName::new("Alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: "secret123".to_string(),
        };

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("abc123", "alice@example.com", "secret123");

        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .with(eq("alice@example.com"))
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(repository);

        let authenticated = service.login("alice@example.com", "secret123").await.unwrap();
        assert!(!authenticated.token.is_empty());

        let claims = Authenticator::new(TEST_SECRET)
            .validate_token(&authenticated.token)
            .unwrap();
        assert_eq!(claims.sub, "abc123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.nama, "Alice");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.login("nobody@example.com", "secret123").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("abc123", "alice@example.com", "secret123");

        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = service(repository);

        let result = service.login("alice@example.com", "wrong_password").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.get_user(&UserId::new("missing")).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_profile_fields_pass_through() {
        let mut repository = MockTestUserRepository::new();

        // No password change requested, so the record is never loaded.
        repository.expect_find_by_id().times(0);
        repository
            .expect_update_fields()
            .withf(|id, patch| {
                id.as_str() == "abc123"
                    && patch.nama.as_deref() == Some("Bob")
                    && patch.bio.as_deref() == Some("hello")
                    && patch.password_hash.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository);

        let command = UpdateUserCommand {
            nama: Some(DisplayName::new("Bob".to_string()).unwrap()),
            bio: Some("hello".to_string()),
            ..Default::default()
        };

        service
            .update_user(&UserId::new("abc123"), command)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_password_wrong_current_never_mutates() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("abc123", "alice@example.com", "secret123");

        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));
        repository.expect_update_fields().times(0);

        let service = service(repository);

        let command = UpdateUserCommand {
            password_change: Some(PasswordChange {
                current: "wrong_password".to_string(),
                new: "brand_new_password".to_string(),
            }),
            ..Default::default()
        };

        let result = service.update_user(&UserId::new("abc123"), command).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_password_with_correct_current() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("abc123", "alice@example.com", "secret123");

        let returned_user = user.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));
        repository
            .expect_update_fields()
            .withf(|_, patch| {
                let hash = patch.password_hash.as_deref();
                hash.is_some_and(|h| h.starts_with("$argon2") && h != "brand_new_password")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository);

        let command = UpdateUserCommand {
            password_change: Some(PasswordChange {
                current: "secret123".to_string(),
                new: "brand_new_password".to_string(),
            }),
            ..Default::default()
        };

        service
            .update_user(&UserId::new("abc123"), command)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_password_unknown_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update_fields().times(0);

        let service = service(repository);

        let command = UpdateUserCommand {
            password_change: Some(PasswordChange {
                current: "secret123".to_string(),
                new: "brand_new_password".to_string(),
            }),
            ..Default::default()
        };

        let result = service.update_user(&UserId::new("missing"), command).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_not_found_from_store() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update_fields()
            .times(1)
            .returning(|id, _| Err(UserError::NotFound(id.to_string())));

        let service = service(repository);

        let command = UpdateUserCommand {
            bio: Some("hello".to_string()),
            ..Default::default()
        };

        let result = service.update_user(&UserId::new("missing"), command).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
