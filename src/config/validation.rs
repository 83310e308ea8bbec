use crate::config::types::Config;
use crate::url::PatternSet;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_parallelism(config.parallelism)?;
    validate_start_pages(&config.start_pages)?;
    PatternSet::new(&config.ignored_urls)?;
    PatternSet::new(&config.ignored_words)?;
    Ok(())
}

fn validate_parallelism(parallelism: Option<usize>) -> Result<(), ConfigError> {
    match parallelism {
        Some(0) => Err(ConfigError::Validation(
            "parallelism must be >= 1 when given, got 0".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Every start page must be an absolute URL
fn validate_start_pages(pages: &[String]) -> Result<(), ConfigError> {
    for page in pages {
        Url::parse(page).map_err(|e| {
            ConfigError::Validation(format!("Invalid start page '{}': {}", page, e))
        })?;
    }
    Ok(())
}
