use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks that tunables are in sane ranges and that the classifier
/// endpoint is a well-formed HTTP(S) URL.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.pipeline.concurrent_limit == 0 {
        return Err(ConfigError::Validation(
            "pipeline.concurrent-limit must be at least 1".to_string(),
        ));
    }

    if config.health.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "health.timeout-ms must be greater than 0".to_string(),
        ));
    }

    if config.classifier.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "classifier.timeout-ms must be greater than 0".to_string(),
        ));
    }

    if config.files.input_path.is_empty() {
        return Err(ConfigError::Validation(
            "files.input-path must not be empty".to_string(),
        ));
    }

    if config.files.report_path.is_empty() || config.files.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "files.report-path and files.output-path must not be empty".to_string(),
        ));
    }

    match Url::parse(&config.classifier.endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => {
            return Err(ConfigError::InvalidUrl(format!(
                "classifier.endpoint has unsupported scheme: {}",
                url.scheme()
            )))
        }
        Err(_) => {
            return Err(ConfigError::InvalidUrl(format!(
                "classifier.endpoint is not a valid URL: {}",
                config.classifier.endpoint
            )))
        }
    }

    if config.classifier.categories.is_empty() {
        return Err(ConfigError::Validation(
            "classifier.categories must not be empty".to_string(),
        ));
    }

    if config.classifier.fallback_category.trim().is_empty() {
        return Err(ConfigError::Validation(
            "classifier.fallback-category must not be empty".to_string(),
        ));
    }

    Ok(())
}
