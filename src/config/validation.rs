//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address and store endpoint are well-formed
//! - Reject an enforced access gate with no secret configured
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CatalogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::CatalogConfig;

/// A single semantic problem with the configuration.
#[derive(Debug)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidStoreEndpoint(String),
    MissingApiKey,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::InvalidStoreEndpoint(endpoint) => {
                write!(f, "invalid store endpoint '{}'", endpoint)
            }
            ValidationError::MissingApiKey => {
                write!(f, "auth.api_key must be set when permissive mode is off")
            }
        }
    }
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &CatalogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !config.store.endpoint.is_empty() {
        match url::Url::parse(&config.store.endpoint) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::InvalidStoreEndpoint(
                config.store.endpoint.clone(),
            )),
        }
    }

    if !config.auth.permissive && config.auth.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CatalogConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = CatalogConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.store.endpoint = "ftp://kv.example.com".into();
        config.auth.permissive = false;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn enforced_mode_with_key_is_valid() {
        let mut config = CatalogConfig::default();
        config.auth.permissive = false;
        config.auth.api_key = "secret".into();
        assert!(validate_config(&config).is_ok());
    }
}
