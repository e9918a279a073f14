use mongodb::Client;

use super::connector::ping;

/// Check MongoDB health with a ping command
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let healthy = check_health(&client).await;
/// ```
pub async fn check_health(client: &Client) -> bool {
    match ping(client).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("MongoDB health check failed: {}", e);
            false
        }
    }
}
