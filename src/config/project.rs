use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::GraphEntitiesError;
use crate::validation::Strictness;

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE_NAME: &str = "graph-entities.toml";

/// Environment variable overriding the configured strictness
pub const STRICTNESS_ENV_VAR: &str = "GRAPH_ENTITIES_STRICTNESS";

/// Validation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Non-emptiness policy applied when constructing entities
    #[serde(default)]
    pub strictness: Strictness,
}

/// Project-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl ProjectConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, GraphEntitiesError> {
        toml::from_str(text).map_err(|e| GraphEntitiesError::Config(e.to_string()))
    }

    /// Load configuration from a file that must exist
    pub fn load_from(path: &Path) -> Result<Self, GraphEntitiesError> {
        let text = std::fs::read_to_string(path).map_err(|source| GraphEntitiesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with precedence: env > file > defaults.
    ///
    /// An explicit `path` must exist. Otherwise `graph-entities.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, GraphEntitiesError> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::load_from(default_path)?
                } else {
                    debug!("no configuration file found, using defaults");
                    Self::default()
                }
            }
        };

        config.with_env_override(std::env::var(STRICTNESS_ENV_VAR).ok().as_deref())
    }

    /// Apply the value of the strictness environment variable, if set
    pub fn with_env_override(
        mut self,
        strictness: Option<&str>,
    ) -> Result<Self, GraphEntitiesError> {
        if let Some(value) = strictness {
            self.validation.strictness = value.parse()?;
            debug!(strictness = %self.validation.strictness, "strictness set from environment");
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_to_non_empty() {
        let config = ProjectConfig::from_toml_str("").unwrap();
        assert_eq!(config.validation.strictness, Strictness::NonEmpty);
    }

    #[test]
    fn parses_strictness() {
        let config = ProjectConfig::from_toml_str(
            r#"
[validation]
strictness = "presence_only"
"#,
        )
        .unwrap();
        assert_eq!(config.validation.strictness, Strictness::PresenceOnly);
    }

    #[test]
    fn accepts_cli_spelling_of_strictness() {
        let config =
            ProjectConfig::from_toml_str("[validation]\nstrictness = \"non-blank\"\n").unwrap();
        assert_eq!(config.validation.strictness, Strictness::NonBlank);
    }

    #[test]
    fn rejects_unknown_strictness() {
        let err =
            ProjectConfig::from_toml_str("[validation]\nstrictness = \"loose\"\n").unwrap_err();
        assert!(matches!(err, GraphEntitiesError::Config(_)));
    }

    #[test]
    fn env_override_wins_over_file() {
        let config = ProjectConfig::from_toml_str("[validation]\nstrictness = \"non_empty\"\n")
            .unwrap()
            .with_env_override(Some("presence-only"))
            .unwrap();
        assert_eq!(config.validation.strictness, Strictness::PresenceOnly);

        let unchanged = ProjectConfig::default().with_env_override(None).unwrap();
        assert_eq!(unchanged, ProjectConfig::default());
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\nstrictness = \"presence_only\"").unwrap();

        let config = ProjectConfig::load_from(file.path()).unwrap();
        assert_eq!(config.validation.strictness, Strictness::PresenceOnly);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, GraphEntitiesError::Io { .. }));
    }
}
