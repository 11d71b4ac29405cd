//! Credential file handling.
//!
//! The vendor account credentials live in a local JSON file with the shape
//! `{"username": "...", "password": "..."}`. The file is read exactly once
//! at startup and the parsed value is dropped right after the token
//! exchange. A missing or malformed file is a startup-fatal condition.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Load credentials from the given file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {}", path.display()))?;
        let credentials: Credentials = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials file: {}", path.display()))?;
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bassinet-buttons-test-{}", name))
    }

    #[test]
    fn test_load_valid_credentials() {
        let path = temp_path("credentials-valid.json");
        std::fs::write(&path, r#"{"username":"u","password":"p"}"#).unwrap();

        let credentials = Credentials::load(&path).expect("valid file should parse");
        assert_eq!(credentials.username, "u");
        assert_eq!(credentials.password, "p");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_fails() {
        let path = temp_path("credentials-missing.json");
        std::fs::remove_file(&path).ok();

        let err = Credentials::load(&path).expect_err("missing file must fail");
        assert!(err.to_string().contains("Failed to read credentials file"));
    }

    #[test]
    fn test_malformed_file_fails() {
        let path = temp_path("credentials-malformed.json");
        std::fs::write(&path, r#"{"user":"u"}"#).unwrap();

        let err = Credentials::load(&path).expect_err("malformed file must fail");
        assert!(err.to_string().contains("Failed to parse credentials file"));

        std::fs::remove_file(&path).ok();
    }
}
