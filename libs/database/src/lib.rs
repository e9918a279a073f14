//! Database library providing connectors and utilities for the service's stores
//!
//! # Features
//!
//! - `mongodb` - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv` and JSON file sections
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::new("localhost", 27017).with_database("hellofresh");
//! let client = mongodb::connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
