// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as absolute base URLs, known log levels and non-zero timeouts.

use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::OwuiConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OwuiConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.general.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "general.log_level `{}` must be one of {}",
                config.general.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.http.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "http.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.http.connect_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "http.connect_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.execution.credential.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "execution.credential must not be empty".to_string(),
        });
    }

    for (name, credential) in &config.credentials {
        if let Err(reason) = check_api_url(&credential.api_url) {
            errors.push(ConfigError::Validation {
                message: format!("credentials.{name}.api_url {reason}"),
            });
        }
        if credential.jwt_token.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("credentials.{name}.jwt_token must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that a base URL is absolute and uses http or https.
pub fn check_api_url(api_url: &str) -> Result<(), String> {
    let trimmed = api_url.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".to_string());
    }
    let url = Url::parse(trimmed).map_err(|e| format!("`{trimmed}` is not a valid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("`{trimmed}` must use http or https, not `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CredentialConfig;

    fn credential(api_url: &str, jwt_token: &str) -> CredentialConfig {
        CredentialConfig {
            api_url: api_url.to_string(),
            jwt_token: jwt_token.to_string(),
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&OwuiConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = OwuiConfig::default();
        config.general.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| {
            matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        }));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = OwuiConfig::default();
        config.http.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| {
            matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))
        }));
    }

    #[test]
    fn bad_credentials_collect_all_errors() {
        let mut config = OwuiConfig::default();
        config
            .credentials
            .insert("a".into(), credential("ftp://files.example.com", "tok"));
        config.credentials.insert("b".into(), credential("", ""));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3, "got: {errors:?}");
    }

    #[test]
    fn valid_credential_passes() {
        let mut config = OwuiConfig::default();
        config.credentials.insert(
            "openWebUiApi".into(),
            credential("http://localhost:8080/", "tok"),
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn relative_url_is_rejected() {
        assert!(check_api_url("webui.local/api").is_err());
        assert!(check_api_url("https://webui.local").is_ok());
    }
}
