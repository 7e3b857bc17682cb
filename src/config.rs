use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the exodus binary
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExodusConfig {
    /// Logging and metrics settings
    pub observability: ObservabilityConfig,
    /// Demonstration run settings
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON lines instead of compact text
    pub json_logs: bool,
    /// Log kernel metrics when a command finishes
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Print the fingerprint after every step of `exodus run`
    pub show_fingerprint: bool,
    /// Print the capability hint once the run completes
    pub print_hint: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
            metrics_enabled: false,
        }
    }
}

impl ExodusConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. exodus.toml in the working directory
    /// 3. Environment variables (EXODUS_ prefix, `__` between sections)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("exodus.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("EXODUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<ExodusConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = ExodusConfig::load_env_file();
        ExodusConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static ExodusConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ExodusConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.observability.log_level, "warn");
        assert!(!config.demo.show_fingerprint);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exodus.toml");
        std::fs::write(
            &path,
            "[demo]\nshow_fingerprint = true\n\n[observability]\njson_logs = true\n",
        )
        .unwrap();

        let config = ExodusConfig::load_from(&path).unwrap();
        assert!(config.demo.show_fingerprint);
        assert!(!config.demo.print_hint);
        assert!(config.observability.json_logs);
        assert_eq!(config.observability.log_level, "warn");
    }

    #[test]
    fn test_save_then_load_preserves_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exodus.toml");
        let mut original = ExodusConfig::default();
        original.demo.print_hint = true;
        original.observability.log_level = "debug".to_string();
        original.save_to_file(&path).unwrap();

        let loaded = ExodusConfig::load_from(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
