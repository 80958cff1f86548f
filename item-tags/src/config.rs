//! Store configuration
//!
//! Everything the store needs to know before opening the database.
//! Loadable from JSON so the host application can keep it with its own settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{DomainError, DomainResult};

/// Database file name used when none is configured
pub const DEFAULT_DB_FILENAME: &str = "item_tags.db";

/// SQLite path that opens a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// What happens to association records when their item or tag is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Remove the links together with the owner
    #[default]
    Cascade,
    /// Refuse to delete an owner that is still linked
    Restrict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    /// Check that both ends of a link exist before storing it
    pub enforce_references: bool,
    /// Treat an (item, tag) pair as linked at most once
    pub unique_pairs: bool,
    pub delete_policy: DeletePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILENAME),
            enforce_references: true,
            unique_pairs: true,
            delete_policy: DeletePolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            db_path: PathBuf::from(IN_MEMORY_PATH),
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: StoreConfig =
            serde_json::from_str(json).map_err(|e| DomainError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(DomainError::Config("db_path must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY_PATH
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_enforce_references(mut self, enforce: bool) -> Self {
        self.enforce_references = enforce;
        self
    }

    pub fn with_unique_pairs(mut self, unique: bool) -> Self {
        self.unique_pairs = unique;
        self
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path, PathBuf::from("item_tags.db"));
        assert!(config.enforce_references);
        assert!(config.unique_pairs);
        assert_eq!(config.delete_policy, DeletePolicy::Cascade);
        assert!(!config.is_in_memory());
        assert!(StoreConfig::in_memory().is_in_memory());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{ "unique_pairs": false, "delete_policy": "restrict" }"#;
        let config = StoreConfig::from_json(json).expect("Failed to parse config");
        assert!(!config.unique_pairs);
        assert!(config.enforce_references);
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(StoreConfig::from_json("{ not json"), Err(DomainError::Config(_))));
        assert!(matches!(
            StoreConfig::from_json(r#"{ "db_path": "" }"#),
            Err(DomainError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::from_json(r#"{ "delete_policy": "orphan" }"#),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::in_memory()
            .with_enforce_references(false)
            .with_delete_policy(DeletePolicy::Restrict);
        assert!(config.is_in_memory());
        assert!(!config.enforce_references);
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
    }
}
