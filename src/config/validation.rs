use crate::config::types::RunConfig;
use crate::ConfigError;

/// Validates the entire run configuration
pub fn validate(config: &RunConfig) -> Result<(), ConfigError> {
    validate_page_range(config)?;
    validate_catalog_url(config)?;
    validate_paths(config)?;
    validate_retry(config)?;
    Ok(())
}

/// Validates the page range bounds
fn validate_page_range(config: &RunConfig) -> Result<(), ConfigError> {
    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start_page must be >= 1, got {}",
            config.start_page
        )));
    }

    if let Some(end) = config.end_page {
        if end <= config.start_page {
            return Err(ConfigError::Validation(format!(
                "end_page must be greater than start_page, got {}..{}",
                config.start_page, end
            )));
        }
    }

    Ok(())
}

/// Validates the catalog base URL
fn validate_catalog_url(config: &RunConfig) -> Result<(), ConfigError> {
    let scheme = config.catalog_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "catalog_url must be http or https, got '{}'",
            scheme
        )));
    }

    if config.catalog_url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "catalog_url has no host".to_string(),
        ));
    }

    Ok(())
}

/// Validates destination and output paths
fn validate_paths(config: &RunConfig) -> Result<(), ConfigError> {
    if config.dest_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "dest_dir cannot be empty".to_string(),
        ));
    }

    if config.output_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates retry settings
fn validate_retry(config: &RunConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizationPolicy;
    use std::path::PathBuf;
    use std::time::Duration;
    use url::Url;

    fn base_config() -> RunConfig {
        RunConfig {
            start_page: 1,
            end_page: None,
            catalog_url: Url::parse("https://tululu.org/l55/").unwrap(),
            dest_dir: PathBuf::from("download"),
            output_path: PathBuf::from("books.json"),
            skip_text: false,
            skip_images: false,
            max_attempts: 5,
            retry_delay: Duration::from_secs(10),
            normalization: NormalizationPolicy::Normalized,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_zero_start_page_rejected() {
        let mut config = base_config();
        config.start_page = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_end_page_must_exceed_start() {
        let mut config = base_config();
        config.start_page = 5;
        config.end_page = Some(5);
        assert!(validate(&config).is_err());

        config.end_page = Some(6);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_open_ended_range_allowed() {
        let mut config = base_config();
        config.end_page = None;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_non_http_catalog_url_rejected() {
        let mut config = base_config();
        config.catalog_url = Url::parse("ftp://tululu.org/l55/").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_dest_dir_rejected() {
        let mut config = base_config();
        config.dest_dir = PathBuf::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let mut config = base_config();
        config.output_path = PathBuf::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        let mut config = base_config();
        config.max_attempts = 0;
        assert!(validate(&config).is_err());
    }
}
