// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./owui.toml` > `~/.config/owui/owui.toml` > `/etc/owui/owui.toml`
//! with environment variable overrides via the `OWUI_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::OwuiConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/owui/owui.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "owui.toml";

/// Sections that may be overridden from the environment.
const ENV_SECTIONS: [&str; 3] = ["general_", "http_", "execution_"];

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("owui").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/owui/owui.toml` (system-wide)
/// 3. `~/.config/owui/owui.toml` (user XDG config)
/// 4. `./owui.toml` (local directory)
/// 5. `OWUI_*` environment variables
pub fn load_config() -> Result<OwuiConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<OwuiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OwuiConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the XDG lookup, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<OwuiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OwuiConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for standard config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(OwuiConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscore keys
/// survive: `OWUI_HTTP_TIMEOUT_SECS` maps to `http.timeout_secs`. Variables
/// outside the known sections (such as the `OWUI_API_URL` credential
/// fallback) are filtered out so they do not trip `deny_unknown_fields`.
fn env_provider() -> Env {
    Env::prefixed("OWUI_")
        .filter(|key| ENV_SECTIONS.iter().any(|s| key.as_str().starts_with(s)))
        .map(|key| {
            let mapped = key
                .as_str()
                .replacen("general_", "general.", 1)
                .replacen("http_", "http.", 1)
                .replacen("execution_", "execution.", 1);
            mapped.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_overrides_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[http]
timeout_secs = 30

[execution]
continue_on_fail = false
"#,
            )?;
            jail.set_env("OWUI_HTTP_TIMEOUT_SECS", "5");
            jail.set_env("OWUI_EXECUTION_CONTINUE_ON_FAIL", "true");
            jail.set_env("OWUI_GENERAL_LOG_LEVEL", "debug");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.http.timeout_secs, 5);
            assert!(config.execution.continue_on_fail);
            assert_eq!(config.general.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn credential_fallback_vars_are_not_config_keys() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "")?;
            jail.set_env("OWUI_API_URL", "https://webui.example.com");
            jail.set_env("OWUI_JWT_TOKEN", "tok");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert!(config.credentials.is_empty());
            Ok(())
        });
    }

    #[test]
    fn explicit_path_must_exist() {
        Jail::expect_with(|_jail| {
            assert!(load_config_from_path(Path::new("missing.toml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[credentials.openWebUiApi]
api_url = "https://local.example.com"
jwt_token = "abc"
"#,
            )?;
            let config = load_config()?;
            assert_eq!(
                config.credentials["openWebUiApi"].api_url,
                "https://local.example.com"
            );
            Ok(())
        });
    }
}
