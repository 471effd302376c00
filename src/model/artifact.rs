//! Artifact decoding
//!
//! `.json` files are read with serde_json, anything else as bincode.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::{ModelError, Result};

pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
        path: display.clone(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_slice(&bytes).map_err(|source| ModelError::Json {
            path: display,
            source,
        })
    } else {
        bincode::deserialize(&bytes).map_err(|source| ModelError::Bincode {
            path: display,
            source,
        })
    }
}
