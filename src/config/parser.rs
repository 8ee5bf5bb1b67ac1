use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Resolves the bearer credential for the classification service
///
/// The credential is never stored in the config file itself; the config
/// names an environment variable and this reads it.
pub fn resolve_api_key(config: &Config) -> Result<String, ConfigError> {
    std::env::var(&config.classifier.api_key_env)
        .map_err(|_| ConfigError::MissingCredential(config.classifier.api_key_env.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_minimal_config_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).expect("load empty config");

        assert_eq!(config.pipeline.concurrent_limit, 5);
        assert_eq!(config.pipeline.max_retries, 3);
        assert_eq!(config.pipeline.retry_delay_ms, 1000);
        assert_eq!(config.health.timeout_ms, 10_000);
        assert_eq!(config.classifier.timeout_ms, 10_000);
        assert_eq!(config.files.input_path, "./bookmarks.html");
        assert!(!config.classifier.categories.is_empty());
    }

    #[test]
    fn load_full_config() {
        let file = write_config(
            r#"
[files]
input-path = "./export.html"
report-path = "./report.json"
output-path = "./clean.html"

[pipeline]
concurrent-limit = 8
max-retries = 2
retry-delay-ms = 250
checkpoint-every = 20

[health]
timeout-ms = 5000
spam-keywords = ["parked free"]

[classifier]
endpoint = "https://llm.example.com/v1/chat/completions"
model = "test-model"
api-key-env = "TEST_KEY"
fallback-category = "Other"
categories = ["Tech", "Reading"]
"#,
        );
        let config = load_config(file.path()).expect("load full config");

        assert_eq!(config.files.input_path, "./export.html");
        assert_eq!(config.pipeline.concurrent_limit, 8);
        assert_eq!(config.pipeline.checkpoint_every, 20);
        assert_eq!(config.health.timeout_ms, 5000);
        assert_eq!(config.health.spam_keywords, vec!["parked free"]);
        assert_eq!(config.classifier.model, "test-model");
        assert_eq!(config.classifier.categories, vec!["Tech", "Reading"]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let file = write_config("[pipeline\nconcurrent-limit = 5");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_config(Path::new("/nonexistent/sweep.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
