//! Oracle metadata connection (feature `oracle`)

use ::oracle::sql_type::ToSql;
use ::oracle::Connection;
use tracing::{debug, warn};

use super::connector::{MetadataConnection, MetadataRow};
use crate::config::DataSourceConfig;
use crate::error::{CodegenError, Result};

/// A single blocking Oracle connection, closed on drop
///
/// The datasource URL is used as the connect string (`//host:1521/SERVICE`).
pub struct OracleConnection {
    conn: Option<Connection>,
}

impl OracleConnection {
    pub fn open(datasource: &DataSourceConfig) -> Result<Self> {
        let conn = Connection::connect(&datasource.username, &datasource.password, &datasource.url)
            .map_err(|e| CodegenError::Unreachable(format!("failed to connect to Oracle: {}", e)))?;
        debug!("Opened Oracle connection to {}", datasource.url);
        Ok(Self { conn: Some(conn) })
    }
}

impl MetadataConnection for OracleConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>> {
        let conn = self
            .conn
            .as_ref()
            .ok_or_else(|| CodegenError::QueryError("connection already closed".into()))?;

        let binds: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
        let result_set = conn
            .query(sql, &binds)
            .map_err(|e| CodegenError::QueryError(e.to_string()))?;

        let mut rows = Vec::new();
        for row in result_set {
            let row = row.map_err(|e| CodegenError::QueryError(e.to_string()))?;
            let cells = (0..row.sql_values().len())
                .map(|idx| row.get::<usize, Option<String>>(idx))
                .collect::<::oracle::Result<MetadataRow>>()
                .map_err(|e| CodegenError::QueryError(e.to_string()))?;
            rows.push(cells);
        }
        Ok(rows)
    }
}

impl Drop for OracleConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.close() {
                warn!("Failed to close Oracle connection: {}", e);
            }
        }
    }
}
