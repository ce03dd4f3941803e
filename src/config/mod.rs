mod project;

pub use project::{CONFIG_FILE_NAME, ProjectConfig, STRICTNESS_ENV_VAR, ValidationConfig};
