//! Recipes Domain
//!
//! CRUD, paging, name search and rating for recipes, stored behind a
//! swappable gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status code mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use cases (create, get, update, delete, list, search, rate)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Gateway   │  ← StorageGateway trait + MongoDB / in-memory adapters
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Recipe, RecipeId, Difficulty
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_recipes::{handlers, MongoGateway, RecipeService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let gateway = MongoGateway::new(client.database("hellofresh"));
//! let service = RecipeService::new(gateway);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod gateway;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod service;

// Re-export commonly used types
pub use error::{RecipeError, RecipeResult};
pub use gateway::StorageGateway;
pub use handlers::ApiDoc;
pub use memory::InMemoryGateway;
pub use models::{Difficulty, MAX_SCORE, MIN_SCORE, Recipe, RecipeId, SuccessResponse};
pub use crate::mongodb::MongoGateway;
pub use service::RecipeService;
