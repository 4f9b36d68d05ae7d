//! Default configuration values - single source of truth

/// Driver identifier selecting the MySQL dialect
pub const DRIVER: &str = "mysql";

/// Default project root that generated paths are resolved against
pub const OUTPUT_DIR: &str = ".";

/// Default target package (empty means the default package)
pub const PACKAGE: &str = "";

/// Default table prefix to strip (none)
pub const TABLE_PREFIX: &str = "";

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Prefix for environment variable overrides (`TABLEGEN_DATASOURCE__URL`, ...)
pub const ENV_PREFIX: &str = "TABLEGEN";

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE: &str = "tablegen";
