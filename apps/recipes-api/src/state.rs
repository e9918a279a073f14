//! Application state management.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned for each handler (inexpensive Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// Database holding the recipes collection
    pub db: Database,
}
