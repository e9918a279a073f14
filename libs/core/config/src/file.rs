//! JSON file configuration loading.

use crate::ConfigError;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::path::Path;

/// Load a JSON configuration file into `T`.
///
/// Missing keys are handled by `T`'s own `#[serde(default)]` attributes.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::FileParse {
        path: display,
        source,
    })
}

/// Accept a port written either as a JSON number or a numeric string.
pub fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
