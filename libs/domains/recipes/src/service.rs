//! Recipe Service - use cases over a StorageGateway

use std::sync::Arc;
use tracing::instrument;

use crate::error::{RecipeError, RecipeResult};
use crate::gateway::StorageGateway;
use crate::models::{MAX_SCORE, MIN_SCORE, Recipe, RecipeId};

/// One method per use case. Apart from rating, each one forwards to the
/// gateway and hands its errors back unchanged.
pub struct RecipeService<G: StorageGateway> {
    gateway: Arc<G>,
}

impl<G: StorageGateway> RecipeService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Store a new recipe. A client-supplied id is discarded before the
    /// gateway assigns a fresh one.
    #[instrument(skip(self, recipe), fields(recipe_name = %recipe.name))]
    pub async fn create_recipe(&self, mut recipe: Recipe) -> RecipeResult<Recipe> {
        recipe.id = None;
        self.gateway.store(&mut recipe).await?;
        Ok(recipe)
    }

    #[instrument(skip(self), fields(recipe_id = %id))]
    pub async fn get_recipe(&self, id: &RecipeId) -> RecipeResult<Recipe> {
        self.gateway.get_by_id(id).await
    }

    /// Replace the recipe stored under `id`. The id in the body is ignored.
    #[instrument(skip(self, recipe), fields(recipe_id = %id))]
    pub async fn update_recipe(&self, id: RecipeId, mut recipe: Recipe) -> RecipeResult<Recipe> {
        recipe.id = Some(id);
        self.gateway.update(&recipe).await?;
        Ok(recipe)
    }

    #[instrument(skip(self), fields(recipe_id = %id))]
    pub async fn delete_recipe(&self, id: &RecipeId) -> RecipeResult<()> {
        self.gateway.delete_by_id(id).await
    }

    /// Delete the recipe identified by `recipe.id`.
    #[instrument(skip(self, recipe), fields(recipe_id = ?recipe.id))]
    pub async fn delete(&self, recipe: &Recipe) -> RecipeResult<()> {
        self.gateway.delete(recipe).await
    }

    #[instrument(skip(self))]
    pub async fn list_recipes(&self, start: u64, limit: u64) -> RecipeResult<Vec<Recipe>> {
        self.gateway.get_range(start, limit).await
    }

    #[instrument(skip(self))]
    pub async fn search_recipes(&self, pattern: &str) -> RecipeResult<Vec<Recipe>> {
        self.gateway.search(pattern).await
    }

    /// Fold `score` into the recipe's running average.
    ///
    /// Read and write are two separate gateway calls without isolation, so
    /// concurrent ratings of one recipe can overwrite each other.
    #[instrument(skip(self), fields(recipe_id = %id))]
    pub async fn rate_recipe(&self, id: &RecipeId, score: u8) -> RecipeResult<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(RecipeError::InvalidScore(score));
        }

        let mut recipe = self
            .gateway
            .get_by_id(id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Could not load recipe to rate"))?;
        tracing::info!(
            ratings_count = recipe.ratings_count,
            average_rating = recipe.average_rating,
            "Rating recipe"
        );

        recipe
            .apply_rating(score)
            .inspect_err(|e| tracing::warn!(error = %e, "Could not rate recipe"))?;
        tracing::info!(
            ratings_count = recipe.ratings_count,
            average_rating = recipe.average_rating,
            "Recomputed rating"
        );

        self.gateway
            .update(&recipe)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Could not save rated recipe"))
    }

    /// [`RecipeService::rate_recipe`] for a recipe already in hand. Only its
    /// id is used; the stored record is re-read before rating.
    pub async fn rate(&self, recipe: &Recipe, score: u8) -> RecipeResult<()> {
        let id = recipe
            .id
            .as_ref()
            .ok_or_else(|| RecipeError::InvalidId(String::new()))?;
        self.rate_recipe(id, score).await
    }
}

impl<G: StorageGateway> Clone for RecipeService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockStorageGateway;
    use crate::models::Difficulty;

    fn stored(id: &str, average_rating: f64, ratings_count: u64) -> Recipe {
        Recipe {
            id: Some(RecipeId::from(id)),
            average_rating,
            ratings_count,
            ..Recipe::new("My Recipe", Difficulty::Easy)
        }
    }

    #[tokio::test]
    async fn test_rate_out_of_range_touches_no_storage() {
        // No expectations: any gateway call panics.
        let service = RecipeService::new(MockStorageGateway::new());
        let id = RecipeId::from("r1");

        for score in [0u8, 6, 42, u8::MAX] {
            let result = service.rate_recipe(&id, score).await;
            assert!(matches!(result, Err(RecipeError::InvalidScore(s)) if s == score));
        }
    }

    #[tokio::test]
    async fn test_rate_fresh_recipe_sets_average_to_score() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_by_id()
            .withf(|id| id.as_str() == "r1")
            .times(1)
            .returning(|_| Ok(stored("r1", 0.0, 0)));
        mock_gateway
            .expect_update()
            .withf(|r| r.ratings_count == 1 && r.average_rating == 5.0)
            .times(1)
            .returning(|_| Ok(()));

        let service = RecipeService::new(mock_gateway);
        service.rate_recipe(&RecipeId::from("r1"), 5).await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_updates_running_average() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_by_id()
            .returning(|_| Ok(stored("r1", 4.0, 3)));
        mock_gateway
            .expect_update()
            .withf(|r| {
                r.id == Some(RecipeId::from("r1"))
                    && r.name == "My Recipe"
                    && r.ratings_count == 4
                    && (r.average_rating - 3.75).abs() < f64::EPSILON
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = RecipeService::new(mock_gateway);
        service.rate_recipe(&RecipeId::from("r1"), 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_missing_recipe_propagates_not_found() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_by_id()
            .returning(|id| Err(RecipeError::NotFound(id.to_string())));
        mock_gateway.expect_update().never();

        let service = RecipeService::new(mock_gateway);
        let result = service.rate_recipe(&RecipeId::from("gone"), 4).await;

        assert!(matches!(result, Err(RecipeError::NotFound(id)) if id == "gone"));
    }

    #[tokio::test]
    async fn test_rate_update_failure_propagates() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_by_id()
            .returning(|_| Ok(stored("r1", 2.0, 1)));
        mock_gateway
            .expect_update()
            .returning(|_| Err(RecipeError::Storage("connection reset".to_string())));

        let service = RecipeService::new(mock_gateway);
        let result = service.rate_recipe(&RecipeId::from("r1"), 1).await;

        assert!(matches!(result, Err(RecipeError::Storage(_))));
    }

    #[tokio::test]
    async fn test_rate_at_max_count_fails_without_update() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_by_id()
            .returning(|_| Ok(stored("r1", 4.0, u64::MAX)));
        mock_gateway.expect_update().never();

        let service = RecipeService::new(mock_gateway);
        let result = service.rate_recipe(&RecipeId::from("r1"), 3).await;

        assert!(matches!(result, Err(RecipeError::RatingsOverflow)));
    }

    #[tokio::test]
    async fn test_rate_by_recipe_uses_its_id() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_by_id()
            .withf(|id| id.as_str() == "r1")
            .times(1)
            .returning(|_| Ok(stored("r1", 0.0, 0)));
        mock_gateway
            .expect_update()
            .withf(|r| r.ratings_count == 1 && r.average_rating == 2.0)
            .times(1)
            .returning(|_| Ok(()));

        let service = RecipeService::new(mock_gateway);
        service.rate(&stored("r1", 0.0, 0), 2).await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_by_recipe_without_id_is_invalid() {
        let service = RecipeService::new(MockStorageGateway::new());
        let result = service.rate(&Recipe::default(), 4).await;
        assert!(matches!(result, Err(RecipeError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_delete_by_recipe_forwards_to_gateway() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_delete()
            .withf(|r| r.id == Some(RecipeId::from("r1")))
            .times(1)
            .returning(|_| Ok(()));

        let service = RecipeService::new(mock_gateway);
        service.delete(&stored("r1", 0.0, 0)).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_discards_client_id() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_store()
            .withf(|r| r.id.is_none())
            .times(1)
            .returning(|r| {
                r.id = Some(RecipeId::from("assigned"));
                Ok(())
            });

        let service = RecipeService::new(mock_gateway);
        let mut input = Recipe::new("Soup", Difficulty::Normal);
        input.id = Some(RecipeId::from("client"));

        let created = service.create_recipe(input).await.unwrap();
        assert_eq!(created.id, Some(RecipeId::from("assigned")));
        assert_eq!(created.name, "Soup");
    }

    #[tokio::test]
    async fn test_update_uses_path_id() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_update()
            .withf(|r| r.id == Some(RecipeId::from("path-id")))
            .times(1)
            .returning(|_| Ok(()));

        let service = RecipeService::new(mock_gateway);
        let mut body = Recipe::new("Stew", Difficulty::Hard);
        body.id = Some(RecipeId::from("body-id"));

        let updated = service
            .update_recipe(RecipeId::from("path-id"), body)
            .await
            .unwrap();
        assert_eq!(updated.id, Some(RecipeId::from("path-id")));
    }

    #[tokio::test]
    async fn test_list_forwards_range() {
        let mut mock_gateway = MockStorageGateway::new();
        mock_gateway
            .expect_get_range()
            .withf(|start, limit| *start == 20 && *limit == 10)
            .returning(|_, _| Ok(vec![stored("a", 0.0, 0)]));

        let service = RecipeService::new(mock_gateway);
        assert_eq!(service.list_recipes(20, 10).await.unwrap().len(), 1);
    }
}
