use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use mongodb::bson::Document;
use mongodb::Collection;
use mongodb::Database;
use serde::Deserialize;
use serde::Serialize;

use super::bounded;
use super::StoreError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatch;
use crate::domain::user::ports::UserRepository;

/// Identity store adapter backed by a MongoDB collection.
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

/// Stored identity document; field names match the legacy collection.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    /// ObjectId on new records, a plain string on legacy ones.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<Bson>,

    nama: String,
    email: String,

    /// Argon2 hash; the legacy field name is kept.
    password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    bio: Option<String>,

    #[serde(default, rename = "profileImage", skip_serializing_if = "Option::is_none")]
    profile_image: Option<String>,
}

impl MongoUserRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection::<UserDocument>(collection),
        }
    }
}

fn id_string(id: &Bson) -> Option<String> {
    match id {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Ordered id-lookup strategies: the store's native ObjectId encoding
/// first, then the legacy raw-string encoding.
fn id_filters(id: &UserId) -> Vec<Document> {
    let mut filters = Vec::with_capacity(2);
    if let Ok(oid) = ObjectId::parse_str(id.as_str()) {
        filters.push(doc! { "_id": oid });
    }
    filters.push(doc! { "_id": id.as_str() });
    filters
}

fn store_err(e: StoreError) -> UserError {
    UserError::StoreUnavailable(e.to_string())
}

impl UserDocument {
    fn from_new(user: &NewUser) -> Self {
        Self {
            id: None,
            nama: user.nama.as_str().to_string(),
            email: user.email.as_str().to_string(),
            password: user.password_hash.clone(),
            role: None,
            bio: None,
            profile_image: None,
        }
    }

    fn into_user(self) -> Result<User, UserError> {
        let id = self.id.as_ref().and_then(id_string).ok_or_else(|| {
            UserError::StoreUnavailable("identity document has no usable _id".to_string())
        })?;

        Ok(User {
            id: UserId::new(id),
            nama: DisplayName::new(self.nama)?,
            email: EmailAddress::new(self.email)?,
            password_hash: self.password,
            role: self.role,
            bio: self.bio,
            profile_image: self.profile_image,
        })
    }
}

fn set_document(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    if let Some(nama) = &patch.nama {
        set.insert("nama", nama.clone());
    }
    if let Some(email) = &patch.email {
        set.insert("email", email.clone());
    }
    if let Some(role) = &patch.role {
        set.insert("role", role.clone());
    }
    if let Some(bio) = &patch.bio {
        set.insert("bio", bio.clone());
    }
    if let Some(profile_image) = &patch.profile_image {
        set.insert("profileImage", profile_image.clone());
    }
    if let Some(password_hash) = &patch.password_hash {
        set.insert("password", password_hash.clone());
    }
    set
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let document = bounded(self.collection.find_one(doc! { "email": email }))
            .await
            .map_err(store_err)?;

        document.map(UserDocument::into_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        for filter in id_filters(id) {
            let document = bounded(self.collection.find_one(filter))
                .await
                .map_err(store_err)?;

            if let Some(document) = document {
                return document.into_user().map(Some);
            }
        }

        Ok(None)
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, UserError> {
        // Check-then-insert; no unique index backs this up, so concurrent
        // registrations of the same email can race.
        if self.find_by_email(user.email.as_str()).await?.is_some() {
            return Err(UserError::DuplicateEmail(user.email.as_str().to_string()));
        }

        let document = UserDocument::from_new(&user);
        let result = bounded(self.collection.insert_one(&document))
            .await
            .map_err(store_err)?;

        let id = id_string(&result.inserted_id).ok_or_else(|| {
            UserError::StoreUnavailable("store returned an unusable inserted id".to_string())
        })?;

        Ok(UserId::new(id))
    }

    async fn update_fields(&self, id: &UserId, patch: UserPatch) -> Result<(), UserError> {
        let update = doc! { "$set": set_document(&patch) };

        for filter in id_filters(id) {
            let result = bounded(self.collection.update_one(filter, update.clone()))
                .await
                .map_err(store_err)?;

            if result.matched_count > 0 {
                return Ok(());
            }
        }

        Err(UserError::NotFound(id.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let documents = bounded(async {
            let cursor = self.collection.find(doc! {}).await?;
            cursor.try_collect::<Vec<UserDocument>>().await
        })
        .await
        .map_err(store_err)?;

        documents
            .into_iter()
            .map(UserDocument::into_user)
            .collect()
    }
}
