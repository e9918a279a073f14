//! Load recipes from a JSON file and post them to a running recipes API.
//!
//! Every recipe is posted as non-vegetarian; missing ratings become 0 and a
//! `prepTime` that is not an RFC 3339 timestamp is dropped.

use chrono::DateTime;
use clap::Parser;
use core_config::{
    Environment,
    tracing::{init_tracing, install_color_eyre},
};
use eyre::WrapErr;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Load recipes from a JSON file and post them to the server")]
struct Cli {
    /// Path to a JSON file holding an array of recipes
    #[arg(long, value_name = "PATH")]
    filepath: PathBuf,

    /// Server address
    #[arg(long, default_value = "http://localhost:8080")]
    address: String,
}

/// Request body for one scraped recipe
fn payload(recipe: &Value) -> Value {
    let prep_time = recipe
        .get("prepTime")
        .and_then(Value::as_str)
        .filter(|s| DateTime::parse_from_rfc3339(s).is_ok());
    if prep_time.is_none() && recipe.get("prepTime").is_some_and(|v| !v.is_null()) {
        warn!(prep_time = %recipe["prepTime"], "Dropping prepTime that is not RFC 3339");
    }

    json!({
        "name": recipe.get("name").cloned().unwrap_or(Value::Null),
        "difficulty": recipe.get("difficulty").cloned().unwrap_or(Value::Null),
        "prepTime": prep_time,
        "vegetarian": false,
        "averageRating": number_or_zero(recipe.get("averageRating")),
        "ratingsCount": number_or_zero(recipe.get("ratingsCount")),
    })
}

fn number_or_zero(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Number(n)) => Value::Number(n.clone()),
        _ => json!(0),
    }
}

fn recipes_url(address: &str) -> String {
    format!("{}/recipes", address.trim_end_matches('/'))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();

    let contents = std::fs::read_to_string(&cli.filepath)
        .wrap_err_with(|| format!("reading {}", cli.filepath.display()))?;
    let recipes: Vec<Value> = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("parsing {}", cli.filepath.display()))?;

    let client = reqwest::Client::new();
    let url = recipes_url(&cli.address);

    let mut created = 0usize;
    for recipe in &recipes {
        let body = payload(recipe);
        let response = client
            .post(&url)
            .body(body.to_string())
            .send()
            .await
            .wrap_err_with(|| format!("posting to {}", url))?;

        let status = response.status();
        info!(name = %body["name"], %status, "Posted recipe");
        if status.is_success() {
            created += 1;
        }
    }

    info!(created, total = recipes.len(), "Seeding finished");
    Ok(())
}
