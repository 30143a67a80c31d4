use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Collection;
use mongodb::Database;
use serde::Deserialize;
use serde::Serialize;

use super::bounded;
use super::StoreError;
use crate::domain::emotion::errors::EmotionError;
use crate::domain::emotion::models::Emotion;
use crate::domain::emotion::models::NewEmotion;
use crate::domain::emotion::ports::EmotionRepository;

/// Mood-entry store adapter backed by a MongoDB collection.
pub struct MongoEmotionRepository {
    collection: Collection<EmotionDocument>,
}

/// Stored mood-entry document.
#[derive(Debug, Serialize, Deserialize)]
struct EmotionDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,

    user_id: String,
    user_name: String,
    mood: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,

    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl MongoEmotionRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection::<EmotionDocument>(collection),
        }
    }
}

fn store_err(e: StoreError) -> EmotionError {
    EmotionError::StoreUnavailable(e.to_string())
}

impl EmotionDocument {
    fn from_new(entry: &NewEmotion) -> Self {
        Self {
            id: None,
            user_id: entry.user_id.clone(),
            user_name: entry.user_name.clone(),
            mood: entry.mood.clone(),
            note: entry.note.clone(),
            created_at: entry.created_at,
        }
    }

    fn into_emotion(self) -> Result<Emotion, EmotionError> {
        let id = self.id.ok_or_else(|| {
            EmotionError::StoreUnavailable("mood entry document has no _id".to_string())
        })?;

        Ok(Emotion {
            id: id.to_hex(),
            user_id: self.user_id,
            user_name: self.user_name,
            mood: self.mood,
            note: self.note,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl EmotionRepository for MongoEmotionRepository {
    async fn insert(&self, entry: NewEmotion) -> Result<String, EmotionError> {
        let document = EmotionDocument::from_new(&entry);

        let result = bounded(self.collection.insert_one(&document))
            .await
            .map_err(store_err)?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| {
                EmotionError::StoreUnavailable("store returned an unusable inserted id".to_string())
            })
    }

    async fn find_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Emotion>, EmotionError> {
        let documents = bounded(async {
            let cursor = self
                .collection
                .find(doc! { "user_id": user_id })
                .sort(doc! { "created_at": -1 })
                .limit(limit)
                .await?;
            cursor.try_collect::<Vec<EmotionDocument>>().await
        })
        .await
        .map_err(store_err)?;

        documents
            .into_iter()
            .map(EmotionDocument::into_emotion)
            .collect()
    }
}
