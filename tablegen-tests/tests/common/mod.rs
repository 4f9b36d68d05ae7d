//! In-memory catalog standing in for a database

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tablegen_codegen::config::DataSourceConfig;
use tablegen_codegen::schema::{ConnectionFactory, Dialect, MetadataConnection, MetadataRow};
use tablegen_codegen::{CodegenConfig, Result};

#[derive(Clone, Default)]
struct TableEntry {
    comment: Option<String>,
    columns: Vec<MetadataRow>,
}

/// Tables keyed by name, shared by every connection the factory opens
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<Mutex<HashMap<String, TableEntry>>>,
    open_connections: Arc<Mutex<usize>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table; each column is `(name, type, precision, comment, scale)`
    pub fn with_table(
        self,
        name: &str,
        comment: Option<&str>,
        columns: &[(&str, &str, Option<u32>, Option<&str>, Option<i32>)],
    ) -> Self {
        let columns = columns
            .iter()
            .map(|(col, ty, precision, col_comment, scale)| {
                vec![
                    Some(col.to_string()),
                    Some(ty.to_string()),
                    precision.map(|p| p.to_string()),
                    col_comment.map(str::to_string),
                    scale.map(|s| s.to_string()),
                ]
            })
            .collect();
        self.tables.lock().unwrap().insert(
            name.to_string(),
            TableEntry {
                comment: comment.map(str::to_string),
                columns,
            },
        );
        self
    }

    /// Connections opened but not yet dropped
    pub fn open_connections(&self) -> usize {
        *self.open_connections.lock().unwrap()
    }
}

struct MemoryConnection {
    catalog: MemoryCatalog,
}

impl MetadataConnection for MemoryConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>> {
        let tables = self.catalog.tables.lock().unwrap();
        let Some(entry) = params.first().and_then(|name| tables.get(*name)) else {
            return Ok(Vec::new());
        };
        if sql.contains("COLUMN_NAME") {
            Ok(entry.columns.clone())
        } else {
            Ok(vec![vec![entry.comment.clone()]])
        }
    }
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        *self.catalog.open_connections.lock().unwrap() -= 1;
    }
}

impl ConnectionFactory for MemoryCatalog {
    fn connect(
        &self,
        _dialect: Dialect,
        _datasource: &DataSourceConfig,
    ) -> Result<Box<dyn MetadataConnection>> {
        *self.open_connections.lock().unwrap() += 1;
        Ok(Box::new(MemoryConnection {
            catalog: self.clone(),
        }))
    }
}

/// A MySQL config writing into `output_dir`
pub fn mysql_config(output_dir: &std::path::Path) -> CodegenConfig {
    let mut config = CodegenConfig::default_with_datasource(DataSourceConfig {
        url: "mysql://localhost:3306/app".into(),
        username: "root".into(),
        password: "secret".into(),
        ..Default::default()
    });
    config.output_dir = output_dir.to_path_buf();
    config
}

/// The `t_user` table used across tests
pub fn user_catalog() -> MemoryCatalog {
    MemoryCatalog::new().with_table(
        "t_user",
        Some("User accounts"),
        &[
            ("id", "bigint", Some(19), Some("Primary key"), Some(0)),
            ("user_name", "varchar", None, Some("Login name"), None),
            ("balance", "decimal", Some(12), None, Some(2)),
            ("is_active", "bit", Some(1), None, None),
            ("created_at", "datetime", None, None, None),
        ],
    )
}
