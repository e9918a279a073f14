//! MongoDB implementation of StorageGateway

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Bson, Document, doc, oid::ObjectId},
    options::FindOptions,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::error::{RecipeError, RecipeResult};
use crate::gateway::StorageGateway;
use crate::models::{Difficulty, Recipe, RecipeId};

pub const COLLECTION_NAME: &str = "recipes";

/// Persisted shape of a recipe. `ObjectId` never leaves this module.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RecipeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(deserialize_with = "lenient_prep_time")]
    prep_time: Option<bson::DateTime>,
    difficulty: Difficulty,
    vegetarian: bool,
    average_rating: f64,
    ratings_count: i64,
}

/// Older records keep `prepTime` as an RFC 3339 string.
fn lenient_prep_time<'de, D>(deserializer: D) -> Result<Option<bson::DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Bson>::deserialize(deserializer)?;
    Ok(match value {
        Some(Bson::DateTime(dt)) => Some(dt),
        Some(Bson::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| bson::DateTime::from_millis(dt.timestamp_millis())),
        _ => None,
    })
}

fn parse_object_id(id: &RecipeId) -> RecipeResult<ObjectId> {
    ObjectId::parse_str(id.as_str()).map_err(|_| RecipeError::InvalidId(id.to_string()))
}

impl RecipeDocument {
    fn from_recipe(recipe: &Recipe, id: Option<ObjectId>) -> RecipeResult<Self> {
        let ratings_count = i64::try_from(recipe.ratings_count).map_err(|_| {
            RecipeError::Storage(format!(
                "ratings count {} does not fit a stored integer",
                recipe.ratings_count
            ))
        })?;

        Ok(Self {
            id,
            name: recipe.name.clone(),
            prep_time: recipe
                .prep_time
                .map(|dt| bson::DateTime::from_millis(dt.timestamp_millis())),
            difficulty: recipe.difficulty,
            vegetarian: recipe.vegetarian,
            average_rating: recipe.average_rating,
            ratings_count,
        })
    }

    /// Every field except `_id`, for a `$set` update.
    fn mutable_fields(&self) -> RecipeResult<Document> {
        let mut fields = bson::to_document(self).map_err(|e| RecipeError::Storage(e.to_string()))?;
        fields.remove("_id");
        Ok(fields)
    }
}

impl TryFrom<RecipeDocument> for Recipe {
    type Error = RecipeError;

    fn try_from(document: RecipeDocument) -> RecipeResult<Self> {
        let ratings_count = u64::try_from(document.ratings_count).map_err(|_| {
            RecipeError::Storage(format!(
                "stored ratings count {} is negative",
                document.ratings_count
            ))
        })?;

        Ok(Self {
            id: document.id.map(|oid| RecipeId::new(oid.to_hex())),
            name: document.name,
            prep_time: document
                .prep_time
                .and_then(|dt| DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())),
            difficulty: document.difficulty,
            vegetarian: document.vegetarian,
            average_rating: document.average_rating,
            ratings_count,
        })
    }
}

/// MongoDB implementation of the StorageGateway
pub struct MongoGateway {
    collection: Collection<RecipeDocument>,
}

impl MongoGateway {
    /// Gateway over the `recipes` collection of `db`
    ///
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let gateway = MongoGateway::new(client.database("hellofresh"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<RecipeDocument>(collection_name),
        }
    }

    async fn find_all(&self, filter: Document, options: FindOptions) -> RecipeResult<Vec<Recipe>> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        let documents: Vec<RecipeDocument> = cursor.try_collect().await?;
        documents.into_iter().map(Recipe::try_from).collect()
    }
}

#[async_trait]
impl StorageGateway for MongoGateway {
    #[instrument(skip(self))]
    async fn get_range(&self, start: u64, limit: u64) -> RecipeResult<Vec<Recipe>> {
        // The driver treats a limit of 0 as "no limit".
        if limit == 0 {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(start)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        self.find_all(doc! {}, options).await
    }

    #[instrument(skip(self), fields(recipe_id = %id))]
    async fn get_by_id(&self, id: &RecipeId) -> RecipeResult<Recipe> {
        let oid = parse_object_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;
        Recipe::try_from(document)
    }

    #[instrument(skip(self), fields(recipe_id = %id))]
    async fn delete_by_id(&self, id: &RecipeId) -> RecipeResult<()> {
        let oid = parse_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count == 0 {
            return Err(RecipeError::NotFound(id.to_string()));
        }

        tracing::info!("Recipe deleted");
        Ok(())
    }

    #[instrument(skip(self, recipe), fields(recipe_name = %recipe.name))]
    async fn store(&self, recipe: &mut Recipe) -> RecipeResult<()> {
        let document = RecipeDocument::from_recipe(recipe, None)?;
        let result = self.collection.insert_one(&document).await?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            RecipeError::Storage(format!("unexpected inserted id {}", result.inserted_id))
        })?;
        recipe.id = Some(RecipeId::new(oid.to_hex()));

        tracing::info!(recipe_id = %oid, "Recipe stored");
        Ok(())
    }

    #[instrument(skip(self, recipe), fields(recipe_id = ?recipe.id))]
    async fn update(&self, recipe: &Recipe) -> RecipeResult<()> {
        let id = recipe
            .id
            .as_ref()
            .ok_or_else(|| RecipeError::InvalidId(String::new()))?;
        let oid = parse_object_id(id)?;

        let fields = RecipeDocument::from_recipe(recipe, None)?.mutable_fields()?;
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(RecipeError::NotFound(id.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, pattern: &str) -> RecipeResult<Vec<Recipe>> {
        let filter = doc! { "name": { "$regex": pattern } };
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        self.find_all(filter, options).await
    }
}
