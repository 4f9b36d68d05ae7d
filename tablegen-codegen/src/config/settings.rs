//! Configuration settings for tablegen-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::naming;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Database the table is introspected from
    #[serde(default)]
    pub datasource: DataSourceConfig,

    /// Project root the fixed output path patterns are resolved against
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory of `*.tera` templates overriding the built-in ones by name
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Default target package, e.g. `com.example`
    #[serde(default = "default_package")]
    pub package: String,

    /// Default table-name prefix stripped before deriving the class name
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,

    /// Dry run mode - render without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Connection parameters for the database being introspected
#[derive(Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// `"oracle"` selects the Oracle dialect, anything else MySQL
    #[serde(default = "default_driver")]
    pub driver: String,

    /// `mysql://host:3306/schema?...` or an Oracle connect string
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

// Keep the password out of logs and `inspect` output.
impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("driver", &self.driver)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            url: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

// Default value functions for serde
fn default_driver() -> String {
    defaults::DRIVER.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_package() -> String {
    defaults::PACKAGE.to_string()
}
fn default_table_prefix() -> String {
    defaults::TABLE_PREFIX.to_string()
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            datasource: DataSourceConfig::default(),
            output_dir: default_output_dir(),
            template_dir: None,
            package: default_package(),
            table_prefix: default_table_prefix(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config for the given data source
    pub fn default_with_datasource(datasource: DataSourceConfig) -> Self {
        Self {
            datasource,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE).required(false));
        }

        // Override with environment variables (TABLEGEN_DATASOURCE__PASSWORD, ...)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.datasource.driver.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "datasource.driver is required".into(),
            ));
        }

        if self.datasource.url.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "datasource.url is required".into(),
            ));
        }

        if self.datasource.username.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "datasource.username is required".into(),
            ));
        }

        if !self.package.is_empty() && !naming::is_valid_package(&self.package) {
            return Err(CodegenError::ValidationError(format!(
                "package `{}` is not a dotted identifier",
                self.package
            )));
        }

        if let Some(dir) = &self.template_dir {
            if !dir.is_dir() {
                return Err(CodegenError::ValidationError(format!(
                    "Template directory not found: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}
