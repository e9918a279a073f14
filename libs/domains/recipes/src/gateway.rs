use async_trait::async_trait;

use crate::error::{RecipeError, RecipeResult};
use crate::models::{Recipe, RecipeId};

/// Storage gateway for recipes
///
/// The only boundary between the use cases and a persistence technology.
/// Implementations own the conversion between [`RecipeId`] and their native
/// key type and report failures as [`RecipeError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Up to `limit` recipes after skipping the first `start`, in storage order.
    /// `limit == 0` yields an empty list.
    async fn get_range(&self, start: u64, limit: u64) -> RecipeResult<Vec<Recipe>>;

    /// Fails with `NotFound` for an unknown id and `InvalidId` for an id the
    /// backend cannot parse.
    async fn get_by_id(&self, id: &RecipeId) -> RecipeResult<Recipe>;

    /// Remove a recipe by id.
    async fn delete_by_id(&self, id: &RecipeId) -> RecipeResult<()>;

    /// Persist a new recipe and write the assigned id back into `recipe`.
    /// Any id already present on `recipe` is ignored.
    async fn store(&self, recipe: &mut Recipe) -> RecipeResult<()>;

    /// Replace every mutable field of the recipe identified by `recipe.id`.
    async fn update(&self, recipe: &Recipe) -> RecipeResult<()>;

    /// Same as [`StorageGateway::delete_by_id`] with the recipe's own id.
    async fn delete(&self, recipe: &Recipe) -> RecipeResult<()> {
        let id = recipe
            .id
            .as_ref()
            .ok_or_else(|| RecipeError::InvalidId(String::new()))?;
        self.delete_by_id(id).await
    }

    /// Recipes whose name matches `pattern` as a regular expression.
    async fn search(&self, pattern: &str) -> RecipeResult<Vec<Recipe>>;
}
