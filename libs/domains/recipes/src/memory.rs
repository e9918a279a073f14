//! In-memory implementation of StorageGateway (for development/testing)

use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{RecipeError, RecipeResult};
use crate::gateway::StorageGateway;
use crate::models::{Recipe, RecipeId};

/// Recipes kept in a map keyed by UUIDv7 strings, so iteration order
/// follows insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGateway {
    recipes: Arc<RwLock<BTreeMap<String, Recipe>>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_id(id: &RecipeId) -> RecipeResult<String> {
        Uuid::parse_str(id.as_str())
            .map(|uuid| uuid.to_string())
            .map_err(|_| RecipeError::InvalidId(id.to_string()))
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl StorageGateway for InMemoryGateway {
    async fn get_range(&self, start: u64, limit: u64) -> RecipeResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .values()
            .skip(to_usize(start))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &RecipeId) -> RecipeResult<Recipe> {
        let key = Self::parse_id(id)?;
        let recipes = self.recipes.read().await;
        recipes
            .get(&key)
            .cloned()
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))
    }

    async fn delete_by_id(&self, id: &RecipeId) -> RecipeResult<()> {
        let key = Self::parse_id(id)?;
        let mut recipes = self.recipes.write().await;
        match recipes.remove(&key) {
            Some(_) => {
                tracing::info!(recipe_id = %id, "Deleted recipe");
                Ok(())
            }
            None => Err(RecipeError::NotFound(id.to_string())),
        }
    }

    async fn store(&self, recipe: &mut Recipe) -> RecipeResult<()> {
        let key = Uuid::now_v7().to_string();
        recipe.id = Some(RecipeId::new(key.clone()));

        let mut recipes = self.recipes.write().await;
        recipes.insert(key, recipe.clone());

        tracing::info!(recipe_id = ?recipe.id, "Stored recipe");
        Ok(())
    }

    async fn update(&self, recipe: &Recipe) -> RecipeResult<()> {
        let id = recipe
            .id
            .as_ref()
            .ok_or_else(|| RecipeError::InvalidId(String::new()))?;
        let key = Self::parse_id(id)?;

        let mut recipes = self.recipes.write().await;
        let existing = recipes
            .get_mut(&key)
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;
        *existing = Recipe {
            id: Some(RecipeId::new(key)),
            ..recipe.clone()
        };
        Ok(())
    }

    async fn search(&self, pattern: &str) -> RecipeResult<Vec<Recipe>> {
        let regex = Regex::new(pattern).map_err(|e| RecipeError::Storage(e.to_string()))?;
        let recipes = self.recipes.read().await;
        Ok(recipes
            .values()
            .filter(|recipe| regex.is_match(&recipe.name))
            .cloned()
            .collect())
    }
}
