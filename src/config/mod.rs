//! # ماژول تنظیمات (Configuration)
//!
//! این ماژول مسئول خوندن و مدیریت تنظیمات سرویس شمارنده هست.
//!
//! ## مفاهیم Rust:
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Serde**: سریالایز/دسریالایز
//! - **Builder Pattern**: ساخت تدریجی آبجکت
//!
//! ## متغیرهای محیطی
//! - `STORE_CONNECTION_STRING` (اجباری)
//! - `COUNTER_DATABASE_NAME`, `COUNTER_CONTAINER_NAME`
//! - `COUNTER_HOST`, `COUNTER_PORT`, `COUNTER_ENVIRONMENT`
//!
//! همه (جز connection string) prefix دارن تا با متغیرهای عمومی
//! مثل `HOST` یا `CONTAINER_NAME` که orchestrator ست میکنه قاطی نشن.

use std::env;
use serde::{Deserialize, Serialize};
use crate::error::{AppError, Result};

/// نام متغیر محیطی connection string
pub const CONNECTION_STRING_VAR: &str = "STORE_CONNECTION_STRING";
pub const HOST_VAR: &str = "COUNTER_HOST";
pub const PORT_VAR: &str = "COUNTER_PORT";
pub const DATABASE_NAME_VAR: &str = "COUNTER_DATABASE_NAME";
pub const CONTAINER_NAME_VAR: &str = "COUNTER_CONTAINER_NAME";
pub const ENVIRONMENT_VAR: &str = "COUNTER_ENVIRONMENT";

/// تنظیمات اصلی برنامه
///
/// # مثال
/// ```rust
/// use view_counter::config::Config;
///
/// let config = Config::default();
/// println!("Port: {}", config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس هاست سرور
    pub host: String,

    /// پورت سرور
    pub port: u16,

    /// آدرس اتصال به document store
    pub connection_string: String,

    /// نام دیتابیس داخل store
    pub database_name: String,

    /// نام container شمارنده‌ها
    pub container_name: String,

    /// محیط اجرا؛ فرمت لاگ رو تعیین میکنه
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// محیط توسعه - لاگ‌های خوانا
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید - لاگ‌های JSON
    Production,
}

impl Environment {
    /// آیا در محیط تولید هستیم؟
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7071,
            connection_string: String::new(),
            database_name: "resume-db".to_string(),
            container_name: "counters".to_string(),
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// # Errors
    /// اگه `STORE_CONNECTION_STRING` تنظیم نشده باشه یا خالی باشه خطا برمیگردونه؛
    /// در این حالت سرویس اصلا بالا نمیاد.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// ساخت تنظیمات از یه منبع دلخواه کلید/مقدار
    ///
    /// `from_env` همین رو با `std::env::var` صدا میزنه؛ تست‌ها یه HashMap میدن
    /// تا به متغیرهای محیطی process وابسته نباشن.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let get = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let connection_string = lookup(CONNECTION_STRING_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(format!("{} must be set", CONNECTION_STRING_VAR))
            })?;

        let port = match lookup(PORT_VAR) {
            Some(v) => v
                .parse()
                .map_err(|_| AppError::Config(format!("{} is not a valid port: {}", PORT_VAR, v)))?,
            None => defaults.port,
        };

        let config = Self {
            host: get(HOST_VAR, &defaults.host),
            port,
            connection_string,
            database_name: get(DATABASE_NAME_VAR, &defaults.database_name),
            container_name: get(CONTAINER_NAME_VAR, &defaults.container_name),
            environment: get(ENVIRONMENT_VAR, "development").into(),
        };

        config.validate()?;
        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    pub fn validate(&self) -> Result<()> {
        if self.connection_string.trim().is_empty() {
            return Err(AppError::Config(format!(
                "{} cannot be empty",
                CONNECTION_STRING_VAR
            )));
        }

        if self.port == 0 {
            return Err(AppError::Config(format!("{} cannot be 0", PORT_VAR)));
        }

        if self.database_name.is_empty() || self.container_name.is_empty() {
            return Err(AppError::Config(format!(
                "{} and {} cannot be empty",
                DATABASE_NAME_VAR, CONTAINER_NAME_VAR
            )));
        }

        Ok(())
    }

    /// آدرس کامل سرور
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use view_counter::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .port(8080)
///     .connection_string("sqlite::memory:")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    #[must_use]
    pub fn connection_string(mut self, url: impl Into<String>) -> Self {
        self.config.connection_string = url.into();
        self
    }

    #[must_use]
    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.config.database_name = name.into();
        self
    }

    #[must_use]
    pub fn container_name(mut self, name: impl Into<String>) -> Self {
        self.config.container_name = name.into();
        self
    }

    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 7071);
        assert_eq!(config.database_name, "resume-db");
        assert_eq!(config.container_name, "counters");
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .port(8080)
            .host("127.0.0.1")
            .connection_string("sqlite::memory:")
            .build();

        assert_eq!(config.port, 8080);
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert_eq!(config.connection_string, "sqlite::memory:");
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("PROD".to_string()), Environment::Production);
        assert_eq!(Environment::from("test".to_string()), Environment::Testing);
        assert_eq!(Environment::from("unknown".to_string()), Environment::Development);
    }

    /// بدون connection string سرویس نباید بالا بیاد
    #[test]
    fn test_validation_requires_connection_string() {
        assert!(ConfigBuilder::new().build_validated().is_err());
        assert!(ConfigBuilder::new()
            .connection_string("   ")
            .build_validated()
            .is_err());
        assert!(ConfigBuilder::new()
            .connection_string("sqlite::memory:")
            .build_validated()
            .is_ok());
    }

    #[test]
    fn test_lookup_without_connection_string_fails() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[(
            CONNECTION_STRING_VAR,
            "sqlite://data/counter.db?mode=rwc",
        )]))
        .unwrap();

        assert_eq!(config.connection_string, "sqlite://data/counter.db?mode=rwc");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7071);
        assert_eq!(config.database_name, "resume-db");
        assert_eq!(config.container_name, "counters");
        assert_eq!(config.environment, Environment::Development);
    }

    /// متغیرهای عمومی orchestrator نباید container یا host رو عوض کنن
    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            (CONNECTION_STRING_VAR, "sqlite::memory:"),
            ("CONTAINER_NAME", "mean-robust-golden-port"),
            ("DATABASE_NAME", "other-db"),
            ("HOST", "10.9.8.7"),
            ("PORT", "9999"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();

        assert_eq!(config.container_name, "counters");
        assert_eq!(config.database_name, "resume-db");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7071);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_prefixed_variables_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            (CONNECTION_STRING_VAR, "sqlite::memory:"),
            (CONTAINER_NAME_VAR, "archive"),
            (DATABASE_NAME_VAR, "site-db"),
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "8081"),
            (ENVIRONMENT_VAR, "prod"),
        ]))
        .unwrap();

        assert_eq!(config.container_name, "archive");
        assert_eq!(config.database_name, "site-db");
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_invalid_port_fails() {
        for port in ["0", "70000", "abc"] {
            let result = Config::from_lookup(lookup_from(&[
                (CONNECTION_STRING_VAR, "sqlite::memory:"),
                (PORT_VAR, port),
            ]));
            assert!(matches!(result, Err(AppError::Config(_))), "port {port}");
        }
    }
}
