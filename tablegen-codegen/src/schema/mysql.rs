//! MySQL metadata connection on top of mysql_async

use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder, Row, Value};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};

use super::connector::{MetadataConnection, MetadataRow};
use crate::config::DataSourceConfig;
use crate::error::{CodegenError, Result};

/// A single blocking MySQL connection
///
/// Drives `mysql_async` on a private current-thread runtime, so it must not
/// be used from inside another tokio runtime. The connection is closed when
/// the value is dropped.
pub struct MySqlConnection {
    runtime: Runtime,
    conn: Option<Conn>,
}

impl MySqlConnection {
    /// Connect using the datasource URL, overriding its credentials with
    /// the configured username and password
    pub fn open(datasource: &DataSourceConfig) -> Result<Self> {
        let opts = Opts::from_url(&datasource.url)
            .map_err(|e| CodegenError::ConfigError(format!("invalid MySQL url: {}", e)))?;
        let opts = OptsBuilder::from_opts(opts)
            .user(Some(datasource.username.as_str()))
            .pass(Some(datasource.password.as_str()));

        let runtime = Builder::new_current_thread().enable_all().build()?;
        let conn = runtime.block_on(Conn::new(opts)).map_err(|e| {
            CodegenError::Unreachable(format!("failed to connect to MySQL: {}", e))
        })?;
        debug!("Opened MySQL connection {}", conn.id());

        Ok(Self {
            runtime,
            conn: Some(conn),
        })
    }
}

impl MetadataConnection for MySqlConnection {
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| CodegenError::QueryError("connection already closed".into()))?;

        let mysql_params: Vec<Value> = params.iter().map(|p| Value::from(*p)).collect();
        let rows: Vec<Row> = self
            .runtime
            .block_on(conn.exec(sql, mysql_params))
            .map_err(|e| CodegenError::QueryError(e.to_string()))?;

        Ok(rows.into_iter().map(row_to_cells).collect())
    }
}

impl Drop for MySqlConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = self.runtime.block_on(conn.disconnect()) {
                warn!("Failed to close MySQL connection: {}", e);
            }
        }
    }
}

fn row_to_cells(mut row: Row) -> MetadataRow {
    (0..row.len())
        .map(|idx| row.take::<Value, _>(idx).and_then(cell_to_string))
        .collect()
}

/// Render a MySQL value as text; information_schema numbers arrive as
/// integers over the binary protocol.
fn cell_to_string(value: Value) -> Option<String> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Int(v) => Some(v.to_string()),
        Value::UInt(v) => Some(v.to_string()),
        Value::Float(v) => Some(v.to_string()),
        Value::Double(v) => Some(v.to_string()),
        other => Some(other.as_sql(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(Value::NULL), None);
        assert_eq!(
            cell_to_string(Value::Bytes(b"varchar".to_vec())),
            Some("varchar".to_string())
        );
        assert_eq!(cell_to_string(Value::UInt(20)), Some("20".to_string()));
        assert_eq!(cell_to_string(Value::Int(-1)), Some("-1".to_string()));
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let source = DataSourceConfig {
            url: "not a url".into(),
            username: "root".into(),
            ..Default::default()
        };
        assert!(matches!(
            MySqlConnection::open(&source),
            Err(CodegenError::ConfigError(_))
        ));
    }
}
