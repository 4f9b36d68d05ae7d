//! Schema connector: runs the introspection queries for one table

use tracing::{debug, info};

use super::dialect::Dialect;
use super::metadata::{ColumnDescriptor, TableDescriptor};
use crate::codegen::naming;
use crate::config::DataSourceConfig;
use crate::error::{CodegenError, Result};

/// Scheme stripped from a MySQL URL before the schema name is read
pub const MYSQL_URL_PREFIX: &str = "mysql://";

/// One result row with every cell rendered as text (`None` for SQL NULL)
pub type MetadataRow = Vec<Option<String>>;

/// An open connection able to run parameterized metadata queries
///
/// Implementations release the connection and any server-side statement
/// state when dropped.
pub trait MetadataConnection {
    /// Execute `sql` with positional `params` and collect every row
    fn query(&mut self, sql: &str, params: &[&str]) -> Result<Vec<MetadataRow>>;
}

/// Opens [`MetadataConnection`]s for a dialect
pub trait ConnectionFactory {
    fn connect(
        &self,
        dialect: Dialect,
        datasource: &DataSourceConfig,
    ) -> Result<Box<dyn MetadataConnection>>;
}

/// Factory backed by the real database drivers
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverFactory;

impl ConnectionFactory for DriverFactory {
    fn connect(
        &self,
        dialect: Dialect,
        datasource: &DataSourceConfig,
    ) -> Result<Box<dyn MetadataConnection>> {
        match dialect {
            Dialect::MySql => Ok(Box::new(super::mysql::MySqlConnection::open(datasource)?)),
            Dialect::Oracle => open_oracle(datasource),
        }
    }
}

#[cfg(feature = "oracle")]
fn open_oracle(datasource: &DataSourceConfig) -> Result<Box<dyn MetadataConnection>> {
    Ok(Box::new(super::oracle::OracleConnection::open(datasource)?))
}

#[cfg(not(feature = "oracle"))]
fn open_oracle(_datasource: &DataSourceConfig) -> Result<Box<dyn MetadataConnection>> {
    Err(CodegenError::Unreachable(
        "Oracle driver is not available in this build (enable the `oracle` feature)".into(),
    ))
}

/// Introspects tables of one configured database
///
/// The dialect and schema are fixed at construction; each
/// [`fetch_table_info`](Self::fetch_table_info) call opens its own
/// connection and drops it before returning.
pub struct SchemaConnector<F = DriverFactory> {
    datasource: DataSourceConfig,
    dialect: Dialect,
    schema: String,
    factory: F,
}

impl SchemaConnector<DriverFactory> {
    /// Create a connector using the real drivers
    pub fn new(datasource: DataSourceConfig) -> Result<Self> {
        Self::with_factory(datasource, DriverFactory)
    }
}

impl<F: ConnectionFactory> SchemaConnector<F> {
    /// Create a connector that opens connections through `factory`
    pub fn with_factory(datasource: DataSourceConfig, factory: F) -> Result<Self> {
        let dialect = Dialect::from_driver(&datasource.driver);
        let schema = match dialect {
            Dialect::MySql => schema_from_url(&datasource.url)?,
            Dialect::Oracle => datasource.username.to_uppercase(),
        };
        debug!("Using {} dialect, schema {}", dialect, schema);

        Ok(Self {
            datasource,
            dialect,
            schema,
            factory,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Schema the introspection queries are scoped to
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Read a table's comment and columns into a [`TableDescriptor`]
    pub fn fetch_table_info(
        &self,
        table_name: &str,
        package: &str,
        table_prefix: &str,
    ) -> Result<TableDescriptor> {
        naming::validate_identifier(table_name)?;
        if !table_prefix.is_empty() {
            naming::validate_identifier(table_prefix)?;
        }

        info!(
            "Introspecting table {} ({} schema {})",
            table_name, self.dialect, self.schema
        );
        let mut conn = self.factory.connect(self.dialect, &self.datasource)?;
        let params = self.dialect.bind_params(table_name, &self.schema);

        let comment_rows = conn.query(self.dialect.table_comment_sql(), &params)?;
        let table_comment = match comment_rows.into_iter().next() {
            Some(row) => row.into_iter().next().flatten(),
            None => {
                return Err(CodegenError::TableNotFound(format!(
                    "table `{}` not found in schema `{}`",
                    table_name, self.schema
                )))
            }
        };

        let column_rows = conn.query(self.dialect.columns_sql(), &params)?;
        let columns = column_rows
            .into_iter()
            .map(column_from_row)
            .collect::<Result<Vec<_>>>()?;
        debug!("Table {} has {} columns", table_name, columns.len());

        TableDescriptor::new(
            table_name,
            &self.schema,
            package,
            table_prefix,
            table_comment,
            columns,
        )
    }
}

/// Read the schema name out of a MySQL connection URL
///
/// `mysql://host:3306/app?useSSL=false` -> `app`
pub fn schema_from_url(url: &str) -> Result<String> {
    let rest = url.strip_prefix(MYSQL_URL_PREFIX).unwrap_or(url);
    let path = rest
        .find('/')
        .map(|idx| &rest[idx + 1..])
        .ok_or_else(|| {
            CodegenError::ConfigError(format!("no schema in datasource url `{}`", url))
        })?;
    let schema = match path.find('?') {
        Some(end) => &path[..end],
        None => path,
    };
    if schema.is_empty() {
        return Err(CodegenError::ConfigError(format!(
            "no schema in datasource url `{}`",
            url
        )));
    }
    Ok(schema.to_string())
}

/// Map one `(name, type, precision, comment, scale)` row to a column
fn column_from_row(row: MetadataRow) -> Result<ColumnDescriptor> {
    let mut cells = row.into_iter();
    let mut next = || cells.next().flatten();

    let name = next().ok_or_else(|| {
        CodegenError::QueryError("column query returned a row without a column name".into())
    })?;
    let data_type = next().ok_or_else(|| {
        CodegenError::QueryError(format!("column `{}` has no data type", name))
    })?;
    let length = parse_number::<u32>(next(), &name, "precision")?;
    let comment = next();
    let scale = parse_number::<i32>(next(), &name, "scale")?;

    debug!("Column {} {} ({:?}, {:?})", name, data_type, length, scale);
    Ok(ColumnDescriptor::new(
        &name, &data_type, length, scale, comment,
    ))
}

fn parse_number<T: std::str::FromStr>(
    cell: Option<String>,
    column: &str,
    what: &str,
) -> Result<Option<T>> {
    match cell.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| {
            CodegenError::QueryError(format!(
                "column `{}` has non-numeric {} `{}`",
                column, what, text
            ))
        }),
    }
}
