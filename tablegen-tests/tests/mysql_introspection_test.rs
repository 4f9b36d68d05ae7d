//! Introspection against a real MySQL server in a testcontainer
//!
//! Needs a running Docker daemon, so these tests are ignored by default:
//!
//! ```bash
//! cargo test -p tablegen-tests -- --ignored
//! ```

use mysql_async::prelude::*;
use serial_test::serial;
use testcontainers::runners::SyncRunner;
use testcontainers::Container;
use testcontainers_modules::mysql::Mysql;

use tablegen_codegen::codegen::FieldType;
use tablegen_codegen::config::DataSourceConfig;
use tablegen_codegen::{CodegenBuilder, CodegenConfig, CodegenError, GenerationRequest};

const SCHEMA: &str = r#"
CREATE TABLE t_order (
    order_id BIGINT NOT NULL AUTO_INCREMENT COMMENT 'Order id',
    order_no VARCHAR(32) NOT NULL COMMENT 'Business number',
    amount DECIMAL(12, 2) COMMENT 'Total amount',
    quantity INT,
    paid BIT(1),
    remark TEXT,
    created_at DATETIME,
    PRIMARY KEY (order_id)
) COMMENT = 'Customer orders';
CREATE TABLE t_empty_comment (
    id INT NOT NULL
)
"#;

fn start_mysql() -> anyhow::Result<(Container<Mysql>, String)> {
    let container = Mysql::default().start()?;
    let port = container.get_host_port_ipv4(3306)?;
    let url = format!("mysql://root@127.0.0.1:{}/test", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(async {
        let mut conn = mysql_async::Conn::from_url(&url).await?;
        for stmt in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            conn.query_drop(stmt.trim()).await?;
        }
        conn.disconnect().await?;
        Ok::<_, mysql_async::Error>(())
    })?;

    Ok((container, url))
}

fn config_for(url: &str, output_dir: &std::path::Path) -> CodegenConfig {
    let mut config = CodegenConfig::default_with_datasource(DataSourceConfig {
        url: url.to_string(),
        username: "root".into(),
        ..Default::default()
    });
    config.output_dir = output_dir.to_path_buf();
    config.package = "com.shop".into();
    config.table_prefix = "t_".into();
    config
}

#[test]
#[ignore = "requires Docker"]
#[serial]
fn test_mysql_introspection_and_generation() {
    let (_container, url) = start_mysql().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&url, dir.path());

    let table =
        tablegen_codegen::inspect(&config, &GenerationRequest::from_config("t_order", &config))
            .unwrap();
    assert_eq!(table.table_schema(), "test");
    assert_eq!(table.class_name(), "com.shop.OrderEO");
    assert_eq!(table.table_comment(), "Customer orders");

    let summary: Vec<(&str, FieldType)> = table
        .columns()
        .iter()
        .map(|c| (c.field_name.as_str(), c.field_type))
        .collect();
    assert_eq!(
        summary,
        [
            ("orderId", FieldType::Long),
            ("orderNo", FieldType::String),
            ("amount", FieldType::BigDecimal),
            ("quantity", FieldType::Integer),
            ("paid", FieldType::Boolean),
            ("remark", FieldType::String),
            ("createdAt", FieldType::Date),
        ]
    );
    assert_eq!(table.columns()[0].column_comment, "Order id");

    let report = CodegenBuilder::from_config(config).generate("t_order").unwrap();
    assert!(report.is_complete());
    assert_eq!(report.written.len(), 3);
    assert!(dir
        .path()
        .join("src/main/java/com/shop/eo/OrderEO.java")
        .is_file());
}

#[test]
#[ignore = "requires Docker"]
#[serial]
fn test_mysql_missing_table_and_empty_comment() {
    let (_container, url) = start_mysql().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&url, dir.path());

    let err = tablegen_codegen::inspect(
        &config,
        &GenerationRequest::from_config("t_nothing_here", &config),
    )
    .unwrap_err();
    assert!(matches!(err, CodegenError::TableNotFound(_)));

    let table = tablegen_codegen::inspect(
        &config,
        &GenerationRequest::from_config("t_empty_comment", &config),
    )
    .unwrap();
    assert_eq!(table.table_comment(), "");
    assert_eq!(table.short_class_name(), "EmptyCommentEO");
}

#[test]
fn test_mysql_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    // Nothing listens on port 1
    let config = config_for("mysql://127.0.0.1:1/test", dir.path());

    let err = tablegen_codegen::inspect(&config, &GenerationRequest::from_config("t_order", &config))
        .unwrap_err();
    assert!(matches!(err, CodegenError::Unreachable(_)));
}
