//! Database introspection: dialects, connections and the table model

mod connector;
mod dialect;
mod metadata;
mod mysql;
#[cfg(feature = "oracle")]
mod oracle;

pub use connector::*;
pub use dialect::*;
pub use metadata::*;
pub use mysql::MySqlConnection;
#[cfg(feature = "oracle")]
pub use self::oracle::OracleConnection;
