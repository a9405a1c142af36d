use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DashboardConfig {
    pub storage: StorageConfig,
    pub list: ListConfig,
    pub notifications: NotificationsConfig,
    pub auth: AuthConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Префикс всех ключей localStorage
    pub namespace: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationsConfig {
    /// Сколько последних записей каждого вида попадает в ленту
    pub per_kind: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    pub demo_email: String,
    pub demo_password: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalyticsConfig {
    /// Глубина графика выручки по месяцам
    pub months: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[storage]
namespace = "laguna"

[list]
page_size = 10

[notifications]
per_kind = 5

[auth]
demo_email = "test@example.com"
demo_password = "password"

[analytics]
months = 12
"#;

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.namespace is empty".into()));
        }
        if self.storage.namespace.contains(':') {
            return Err(ConfigError::Invalid(
                "storage.namespace must not contain ':'".into(),
            ));
        }
        if self.list.page_size == 0 {
            return Err(ConfigError::Invalid("list.page_size must be > 0".into()));
        }
        if self.notifications.per_kind == 0 {
            return Err(ConfigError::Invalid(
                "notifications.per_kind must be > 0".into(),
            ));
        }
        if self.analytics.months == 0 {
            return Err(ConfigError::Invalid("analytics.months must be > 0".into()));
        }
        Ok(())
    }

    /// Embedded default, validated. Falls back to hard-coded values only if the
    /// embedded text itself is broken.
    pub fn load_or_default() -> Self {
        match load_config(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Embedded config rejected, using built-in values: {}", e);
                Self::builtin()
            }
        }
    }

    fn builtin() -> Self {
        Self {
            storage: StorageConfig {
                namespace: "laguna".into(),
            },
            list: ListConfig { page_size: 10 },
            notifications: NotificationsConfig { per_kind: 5 },
            auth: AuthConfig {
                demo_email: "test@example.com".into(),
                demo_password: "password".into(),
            },
            analytics: AnalyticsConfig { months: 12 },
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::load_or_default()
    }
}

/// Parse and validate a TOML configuration
pub fn load_config(contents: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.storage.namespace, "laguna");
        assert_eq!(config.list.page_size, 10);
        assert_eq!(config.notifications.per_kind, 5);
        assert_eq!(config, DashboardConfig::builtin());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let broken = DEFAULT_CONFIG.replace("page_size = 10", "page_size = 0");
        assert!(matches!(load_config(&broken), Err(ConfigError::Invalid(_))));

        let broken = DEFAULT_CONFIG.replace("namespace = \"laguna\"", "namespace = \"a:b\"");
        assert!(matches!(load_config(&broken), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(load_config("[list"), Err(ConfigError::Parse(_))));
    }
}
