use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;
use utoipa::ToSchema;

use crate::error::{RecipeError, RecipeResult};

/// Lowest score a recipe can be rated with
pub const MIN_SCORE: u8 = 1;
/// Highest score a recipe can be rated with
pub const MAX_SCORE: u8 = 5;

/// Opaque recipe identifier.
///
/// Assigned by the storage gateway on creation. Gateways convert it to and
/// from their native key type; nothing above the gateway interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Recipe difficulty, exchanged as the integers 1, 2 and 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Difficulty {
    #[default]
    Easy = 1,
    Normal = 2,
    Hard = 3,
}

#[derive(Debug, thiserror::Error)]
#[error("difficulty must be 1 (easy), 2 (normal) or 3 (hard), got {0}")]
pub struct InvalidDifficulty(pub u8);

impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Normal),
            3 => Ok(Difficulty::Hard),
            other => Err(InvalidDifficulty(other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty as u8
    }
}

/// Recipe entity as exchanged with clients
///
/// Missing fields decode to their zero values, so a `PUT` with a partial
/// body replaces the omitted fields with those zero values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    /// Storage-assigned identifier; absent before the first store
    #[serde(rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "5cb0a7f2e1d2b7a1c8e4f3a9")]
    pub id: Option<RecipeId>,
    /// Display name
    pub name: String,
    /// Preparation time marker, RFC 3339
    pub prep_time: Option<DateTime<Utc>>,
    /// 1 = easy, 2 = normal, 3 = hard
    #[schema(value_type = u8, minimum = 1, maximum = 3)]
    pub difficulty: Difficulty,
    pub vegetarian: bool,
    /// Running mean of every score applied; meaningful only when `ratingsCount > 0`
    pub average_rating: f64,
    /// Number of scores applied
    pub ratings_count: u64,
}

impl Recipe {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
            ..Self::default()
        }
    }

    /// Fold one score into the running average.
    ///
    /// `avg' = avg + (score - avg) / (count + 1)`, `count' = count + 1`.
    /// No rounding or clamping is applied. The score range is the caller's
    /// responsibility. Fails without touching the recipe when the count is
    /// already at its maximum.
    pub fn apply_rating(&mut self, score: u8) -> RecipeResult<()> {
        let count = self
            .ratings_count
            .checked_add(1)
            .ok_or(RecipeError::RatingsOverflow)?;
        self.ratings_count = count;
        self.average_rating += (f64::from(score) - self.average_rating) / count as f64;
        Ok(())
    }
}

/// Body returned by operations without a resource to echo back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = "success")]
    pub result: String,
}

impl SuccessResponse {
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn my_recipe() -> Recipe {
        Recipe {
            id: None,
            name: "My Recipe".to_string(),
            prep_time: Some(Utc.with_ymd_and_hms(2019, 4, 11, 9, 0, 20).unwrap()),
            difficulty: Difficulty::Easy,
            vegetarian: true,
            average_rating: 4.0,
            ratings_count: 3,
        }
    }

    #[test]
    fn test_recipe_wire_shape() {
        let mut recipe = my_recipe();
        recipe.id = Some(RecipeId::from("abc"));

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "abc",
                "name": "My Recipe",
                "prepTime": "2019-04-11T09:00:20Z",
                "difficulty": 1,
                "vegetarian": true,
                "averageRating": 4.0,
                "ratingsCount": 3
            })
        );
    }

    #[test]
    fn test_recipe_without_id_omits_field() {
        let value = serde_json::to_value(my_recipe()).unwrap();
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_partial_body_decodes_to_zero_values() {
        let recipe: Recipe = serde_json::from_value(json!({ "name": "Updated" })).unwrap();
        assert_eq!(recipe.name, "Updated");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert!(recipe.prep_time.is_none());
        assert!(!recipe.vegetarian);
        assert_eq!(recipe.ratings_count, 0);
        assert_eq!(recipe.average_rating, 0.0);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let result = serde_json::from_value::<Recipe>(json!({ "name": "x", "difficulty": 4 }));
        assert!(result.is_err());

        let result = serde_json::from_value::<Recipe>(json!({ "name": "x", "difficulty": 0 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_ratings_count_is_rejected() {
        let result = serde_json::from_value::<Recipe>(json!({ "ratingsCount": -1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_difficulty_conversions() {
        assert_eq!(Difficulty::try_from(2).unwrap(), Difficulty::Normal);
        assert_eq!(u8::from(Difficulty::Hard), 3);
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        assert!(Difficulty::try_from(9).is_err());
    }

    #[test]
    fn test_first_rating_sets_average_to_score() {
        for score in MIN_SCORE..=MAX_SCORE {
            let mut recipe = Recipe::new("fresh", Difficulty::Normal);
            recipe.apply_rating(score).unwrap();
            assert_eq!(recipe.ratings_count, 1);
            assert_eq!(recipe.average_rating, f64::from(score));
        }
    }

    #[test]
    fn test_rating_example_from_four_to_three_point_seven_five() {
        let mut recipe = my_recipe();
        recipe.apply_rating(3).unwrap();
        assert_eq!(recipe.ratings_count, 4);
        assert!((recipe.average_rating - 3.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rating_at_max_count_is_rejected_unchanged() {
        let mut recipe = my_recipe();
        recipe.ratings_count = u64::MAX;

        let result = recipe.apply_rating(5);

        assert!(matches!(result, Err(RecipeError::RatingsOverflow)));
        assert_eq!(recipe.ratings_count, u64::MAX);
        assert_eq!(recipe.average_rating, 4.0);
    }

    #[test]
    fn test_repeated_ratings_converge_to_true_mean() {
        let scores = [5u8, 3, 4, 1, 2, 5, 5, 4, 3, 1, 2, 4];
        let mut recipe = Recipe::new("mean", Difficulty::Hard);
        for score in scores {
            recipe.apply_rating(score).unwrap();
        }

        let mean = scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64;
        assert_eq!(recipe.ratings_count, scores.len() as u64);
        assert!((recipe.average_rating - mean).abs() < 1e-9);
    }
}
