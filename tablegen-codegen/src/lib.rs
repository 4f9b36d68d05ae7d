//! tablegen-codegen: Generate Java entity, DAO and MyBatis mapper files from a
//! live MySQL or Oracle table
//!
//! This crate provides both a CLI tool and a library. For one table it reads
//! the column metadata from the database catalog and renders:
//!
//! - An entity object (`eo/UserEO.java`) with one typed field per column
//! - A DAO interface (`dao/UserEODao.java`)
//! - A MyBatis mapper (`mapper/mybatis/UserEOMapper.xml`)
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use tablegen_codegen::config::DataSourceConfig;
//!
//! let report = tablegen_codegen::CodegenBuilder::new(DataSourceConfig {
//!     url: "mysql://localhost:3306/app".into(),
//!     username: "root".into(),
//!     password: "secret".into(),
//!     ..Default::default()
//! })
//! .output_dir("./my-service")
//! .package("com.example")
//! .table_prefix("t_")
//! .generate("t_user")?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! tablegen --config tablegen.toml generate --table t_user --package com.example --prefix t_
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod schema;

use std::path::Path;

use tracing::info;

use codegen::{GenerationReport, TemplateGenerator, TemplateKind};
use schema::{ConnectionFactory, DriverFactory, SchemaConnector, TableDescriptor};

pub use config::{CodegenConfig, DataSourceConfig};
pub use error::{CodegenError, Result};

/// One table to generate files for
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub table_name: String,
    pub package: String,
    pub table_prefix: String,
    /// Subset of files to produce; empty means all three
    pub kinds: Vec<TemplateKind>,
}

impl GenerationRequest {
    /// A request using the package and prefix defaults from `config`
    pub fn from_config(table_name: impl Into<String>, config: &CodegenConfig) -> Self {
        Self {
            table_name: table_name.into(),
            package: config.package.clone(),
            table_prefix: config.table_prefix.clone(),
            kinds: Vec::new(),
        }
    }

    fn kinds(&self) -> &[TemplateKind] {
        if self.kinds.is_empty() {
            &TemplateKind::ALL
        } else {
            &self.kinds
        }
    }
}

/// Main entry point for code generation
pub fn generate(config: &CodegenConfig, request: &GenerationRequest) -> Result<GenerationReport> {
    generate_with_factory(config, request, DriverFactory)
}

/// Like [`generate`], opening connections through `factory`
pub fn generate_with_factory<F: ConnectionFactory>(
    config: &CodegenConfig,
    request: &GenerationRequest,
    factory: F,
) -> Result<GenerationReport> {
    let table = inspect_with_factory(config, request, factory)?;
    let generator =
        TemplateGenerator::with_template_dir(&config.output_dir, config.template_dir.as_deref())?
            .dry_run(config.dry_run);

    let report = generator.generate_kinds(&table, request.kinds())?;
    info!(
        "Generated {} file(s) for {} ({} skipped, {} failed)",
        report.written.len(),
        table.class_name(),
        report.skipped.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Introspect a table without generating anything
pub fn inspect(config: &CodegenConfig, request: &GenerationRequest) -> Result<TableDescriptor> {
    inspect_with_factory(config, request, DriverFactory)
}

/// Like [`inspect`], opening connections through `factory`
pub fn inspect_with_factory<F: ConnectionFactory>(
    config: &CodegenConfig,
    request: &GenerationRequest,
    factory: F,
) -> Result<TableDescriptor> {
    config.validate()?;
    if !request.package.is_empty() && !codegen::naming::is_valid_package(&request.package) {
        return Err(CodegenError::ValidationError(format!(
            "package `{}` is not a dotted identifier",
            request.package
        )));
    }

    let connector = SchemaConnector::with_factory(config.datasource.clone(), factory)?;
    connector.fetch_table_info(
        &request.table_name,
        &request.package,
        &request.table_prefix,
    )
}

/// Builder pattern for programmatic use
pub struct CodegenBuilder {
    config: CodegenConfig,
    kinds: Vec<TemplateKind>,
}

impl CodegenBuilder {
    /// Create a new builder for the given data source
    pub fn new(datasource: DataSourceConfig) -> Self {
        Self {
            config: CodegenConfig::default_with_datasource(datasource),
            kinds: Vec::new(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: CodegenConfig) -> Self {
        Self {
            config,
            kinds: Vec::new(),
        }
    }

    /// Set the project root the files are written under
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Load templates from a directory, overriding built-ins by name
    pub fn template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.template_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the target package
    pub fn package(mut self, package: &str) -> Self {
        self.config.package = package.to_string();
        self
    }

    /// Set the table-name prefix to strip
    pub fn table_prefix(mut self, prefix: &str) -> Self {
        self.config.table_prefix = prefix.to_string();
        self
    }

    /// Generate only the given files
    pub fn only(mut self, kinds: &[TemplateKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Enable dry run mode (render without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    fn request(&self, table_name: &str) -> GenerationRequest {
        GenerationRequest {
            kinds: self.kinds.clone(),
            ..GenerationRequest::from_config(table_name, &self.config)
        }
    }

    /// Generate the files for `table_name`
    pub fn generate(self, table_name: &str) -> Result<GenerationReport> {
        generate(&self.config, &self.request(table_name))
    }

    /// Generate using a custom connection factory
    pub fn generate_with_factory<F: ConnectionFactory>(
        self,
        table_name: &str,
        factory: F,
    ) -> Result<GenerationReport> {
        generate_with_factory(&self.config, &self.request(table_name), factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_all_kinds() {
        let config = CodegenConfig {
            package: "com.example".into(),
            table_prefix: "t_".into(),
            ..Default::default()
        };
        let request = GenerationRequest::from_config("t_user", &config);
        assert_eq!(request.package, "com.example");
        assert_eq!(request.table_prefix, "t_");
        assert_eq!(request.kinds(), &TemplateKind::ALL);
    }

    #[test]
    fn test_builder_request() {
        let builder = CodegenBuilder::new(DataSourceConfig::default())
            .package("com.acme")
            .only(&[TemplateKind::Mapper]);
        let request = builder.request("orders");
        assert_eq!(request.table_name, "orders");
        assert_eq!(request.package, "com.acme");
        assert_eq!(request.kinds(), &[TemplateKind::Mapper]);
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = CodegenConfig::default();
        let request = GenerationRequest::from_config("t_user", &config);
        assert!(matches!(
            generate(&config, &request),
            Err(CodegenError::ValidationError(_))
        ));
    }
}
