use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use mood_service::domain::emotion::errors::EmotionError;
use mood_service::domain::emotion::models::Emotion;
use mood_service::domain::emotion::models::NewEmotion;
use mood_service::domain::emotion::ports::EmotionRepository;
use mood_service::domain::emotion::service::EmotionService;
use mood_service::domain::user::errors::UserError;
use mood_service::domain::user::models::DisplayName;
use mood_service::domain::user::models::EmailAddress;
use mood_service::domain::user::models::NewUser;
use mood_service::domain::user::models::User;
use mood_service::domain::user::models::UserId;
use mood_service::domain::user::models::UserPatch;
use mood_service::domain::user::ports::UserRepository;
use mood_service::domain::user::service::UserService;
use mood_service::inbound::http::router::create_router;
use mood_service::inbound::http::router::AppState;

pub const TEST_JWT_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// Test application serving the real router on a random local port.
///
/// Backed by in-memory implementations of the repository ports, so the
/// suite runs without a live MongoDB.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::new(InMemoryUserRepository::default()),
                Arc::clone(&authenticator),
                72,
            )),
            emotion_service: Arc::new(EmotionService::new(Arc::new(
                InMemoryEmotionRepository::default(),
            ))),
            authenticator: Arc::clone(&authenticator),
        };

        let router = create_router(state);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server crashed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Register a user through the API.
    pub async fn register(&self, nama: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({
                "nama": nama,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the API and return `(user_id, token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (user_id, token)
    }
}

/// In-memory stand-in for the MongoDB identity adapter.
///
/// Implements the same port contract: case-sensitive email uniqueness via
/// check-then-insert, store-assigned ObjectId-hex ids, partial updates.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::DuplicateEmail(user.email.as_str().to_string()));
        }

        let id = UserId::new(ObjectId::new().to_hex());
        users.push(User {
            id: id.clone(),
            nama: user.nama,
            email: user.email,
            password_hash: user.password_hash,
            role: None,
            bio: None,
            profile_image: None,
        });

        Ok(id)
    }

    async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();

        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Some(nama) = patch.nama {
            user.nama = DisplayName::new(nama)?;
        }
        if let Some(email) = patch.email {
            user.email = EmailAddress::new(email)?;
        }
        if let Some(role) = patch.role {
            user.role = Some(role);
        }
        if let Some(bio) = patch.bio {
            user.bio = Some(bio);
        }
        if let Some(profile_image) = patch.profile_image {
            user.profile_image = Some(profile_image);
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

/// In-memory stand-in for the MongoDB mood-entry adapter.
#[derive(Default)]
pub struct InMemoryEmotionRepository {
    entries: Mutex<Vec<Emotion>>,
}

#[async_trait]
impl EmotionRepository for InMemoryEmotionRepository {
    async fn insert(&self, entry: NewEmotion) -> Result<String, EmotionError> {
        let mut entries = self.entries.lock().unwrap();

        let id = ObjectId::new().to_hex();
        entries.push(Emotion {
            id: id.clone(),
            user_id: entry.user_id,
            user_name: entry.user_name,
            mood: entry.mood,
            note: entry.note,
            created_at: entry.created_at,
        });

        Ok(id)
    }

    async fn find_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Emotion>, EmotionError> {
        let entries = self.entries.lock().unwrap();

        let mut found: Vec<Emotion> = entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit as usize);

        Ok(found)
    }
}
