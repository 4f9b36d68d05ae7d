//! Introspection SQL for the supported database engines

use std::fmt;

/// Driver identifier that selects [`Dialect::Oracle`]
pub const ORACLE_DRIVER: &str = "oracle";

/// Driver identifier of [`Dialect::MySql`]
pub const MYSQL_DRIVER: &str = "mysql";

const MYSQL_COLUMNS_SQL: &str = "SELECT COLUMN_NAME, DATA_TYPE, NUMERIC_PRECISION, COLUMN_COMMENT, NUMERIC_SCALE \
     FROM information_schema.COLUMNS \
     WHERE TABLE_NAME = ? AND TABLE_SCHEMA = ? \
     ORDER BY ORDINAL_POSITION";

const MYSQL_TABLE_COMMENT_SQL: &str = "SELECT TABLE_COMMENT FROM information_schema.TABLES \
     WHERE TABLE_NAME = ? AND TABLE_SCHEMA = ?";

const ORACLE_COLUMNS_SQL: &str = "SELECT UTC.COLUMN_NAME, UTC.DATA_TYPE, UTC.DATA_PRECISION, UCC.COMMENTS, UTC.DATA_SCALE \
     FROM user_tab_cols UTC LEFT JOIN user_col_comments UCC \
     ON UTC.TABLE_NAME = UCC.TABLE_NAME AND UTC.COLUMN_NAME = UCC.COLUMN_NAME \
     WHERE UTC.TABLE_NAME = :1 \
     ORDER BY UTC.COLUMN_ID";

const ORACLE_TABLE_COMMENT_SQL: &str = "SELECT COMMENTS FROM user_tab_comments WHERE TABLE_NAME = :1";

/// A supported database engine family
///
/// Both introspection queries return their columns in a fixed order:
/// the column query yields `(name, type, precision, comment, scale)` and the
/// comment query yields a single `comment` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    Oracle,
}

impl Dialect {
    /// Select the dialect for a driver identifier
    ///
    /// Only an exact match on [`ORACLE_DRIVER`] selects Oracle; everything
    /// else falls back to MySQL.
    pub fn from_driver(driver: &str) -> Self {
        if driver == ORACLE_DRIVER {
            Dialect::Oracle
        } else {
            Dialect::MySql
        }
    }

    pub fn driver(&self) -> &'static str {
        match self {
            Dialect::MySql => MYSQL_DRIVER,
            Dialect::Oracle => ORACLE_DRIVER,
        }
    }

    /// Query listing a table's columns
    pub fn columns_sql(&self) -> &'static str {
        match self {
            Dialect::MySql => MYSQL_COLUMNS_SQL,
            Dialect::Oracle => ORACLE_COLUMNS_SQL,
        }
    }

    /// Query reading a table's comment
    pub fn table_comment_sql(&self) -> &'static str {
        match self {
            Dialect::MySql => MYSQL_TABLE_COMMENT_SQL,
            Dialect::Oracle => ORACLE_TABLE_COMMENT_SQL,
        }
    }

    /// Positional parameters bound to both introspection queries
    ///
    /// Oracle's `user_*` views are already scoped to the connected schema.
    pub fn bind_params<'a>(&self, table_name: &'a str, schema: &'a str) -> Vec<&'a str> {
        match self {
            Dialect::MySql => vec![table_name, schema],
            Dialect::Oracle => vec![table_name],
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.driver())
    }
}
