use crate::config::{DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::core::manager::DEFAULT_STORAGE_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("Invalid env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.api.endpoint.as_deref().unwrap_or_default()
    }

    fn storage_path(&self) -> &str {
        self.storage.path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH)
    }

    fn storage_key(&self) -> &str {
        self.storage.key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_required_field("api.endpoint", &self.api.endpoint)?;
        crate::config::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
endpoint = "http://localhost:3333"
timeout_seconds = 3

[storage]
path = "./carts"
key = "@RocketShoes:cart"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "http://localhost:3333");
        assert_eq!(config.storage_path(), "./carts");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_defaults() {
        let config = TomlConfig::from_toml_str("[api]\nendpoint = \"https://shop.example.com\"\n")
            .unwrap();

        assert_eq!(config.storage_path(), DEFAULT_STORAGE_PATH);
        assert_eq!(config.storage_key(), DEFAULT_STORAGE_KEY);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHOP_CART_TEST_ENDPOINT", "https://test.shop.com");

        let config =
            TomlConfig::from_toml_str("[api]\nendpoint = \"${SHOP_CART_TEST_ENDPOINT}\"\n")
                .unwrap();
        assert_eq!(config.api_endpoint(), "https://test.shop.com");

        std::env::remove_var("SHOP_CART_TEST_ENDPOINT");
    }

    #[test]
    fn test_unknown_env_var_is_left_in_place() {
        let raw = "[storage]\nkey = \"${SHOP_CART_UNSET_VARIABLE}\"\n";
        assert_eq!(TomlConfig::substitute_env_vars(raw).unwrap(), raw);

        let config = TomlConfig::from_toml_str(&format!(
            "[api]\nendpoint = \"http://localhost:3333\"\n{}",
            raw
        ))
        .unwrap();
        assert_eq!(config.storage_key(), "${SHOP_CART_UNSET_VARIABLE}");
    }

    #[test]
    fn test_missing_endpoint_fails_validation() {
        let config = TomlConfig::from_toml_str("[api]\ntimeout_seconds = 5\n").unwrap();

        assert!(matches!(
            config.validate(),
            Err(CartError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_url = TomlConfig::from_toml_str("[api]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str(
            "[api]\nendpoint = \"http://localhost:3333\"\ntimeout_seconds = 0\n",
        )
        .unwrap();
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nendpoint = \"http://localhost:3333\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_endpoint(), "http://localhost:3333");
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = TomlConfig::from_toml_str("[api\n").unwrap_err();
        assert!(matches!(err, CartError::ConfigError { .. }));
    }
}
