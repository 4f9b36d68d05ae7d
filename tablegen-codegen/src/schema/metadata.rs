//! Table and column descriptors handed to the templates

use serde::Serialize;

use crate::codegen::naming;
use crate::codegen::type_resolver::{FieldType, TypeResolver};
use crate::error::{CodegenError, Result};

/// Metadata for one introspected table
///
/// Built once per generation request and never mutated afterwards; the
/// column list is guaranteed non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct TableDescriptor {
    table_name: String,
    table_schema: String,
    short_class_name: String,
    class_name: String,
    package: String,
    table_comment: String,
    columns: Vec<ColumnDescriptor>,
}

/// Metadata for one column, with its derived field name and type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name as stored in the database
    pub column_name: String,

    /// Raw type name, lower-cased (e.g. "varchar", "number")
    pub column_type: String,

    /// Numeric precision, if the engine reports one
    pub column_length: Option<u32>,

    /// Numeric scale, if the engine reports one
    pub column_scale: Option<i32>,

    /// Column comment, empty when the column has none
    pub column_comment: String,

    /// camelCase field name
    pub field_name: String,

    /// PascalCase form used for accessor names (`getUserName`)
    pub property_name: String,

    pub field_type: FieldType,

    /// `field_type` without its package
    pub short_field_type: String,

    /// MyBatis jdbcType for the field type
    pub jdbc_type: String,
}

impl ColumnDescriptor {
    /// Build a column descriptor from one row of the column query
    pub fn new(
        column_name: &str,
        column_type: &str,
        column_length: Option<u32>,
        column_scale: Option<i32>,
        column_comment: Option<String>,
    ) -> Self {
        let column_type = column_type.to_lowercase();
        let field_type = TypeResolver::resolve(&column_type, column_length, column_scale);
        Self {
            column_name: column_name.to_string(),
            column_length,
            column_scale,
            column_comment: column_comment.unwrap_or_default(),
            field_name: naming::to_field_name(column_name),
            property_name: naming::to_class_name(column_name),
            short_field_type: field_type.short_name().to_string(),
            jdbc_type: field_type.jdbc_type().to_string(),
            field_type,
            column_type,
        }
    }
}

impl TableDescriptor {
    /// Assemble a table descriptor, deriving its class names
    ///
    /// Fails with [`CodegenError::TableNotFound`] when `columns` is empty and
    /// with [`CodegenError::InvalidTableName`] when nothing is left of the
    /// table name after stripping `table_prefix`.
    pub fn new(
        table_name: &str,
        table_schema: &str,
        package: &str,
        table_prefix: &str,
        table_comment: Option<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(CodegenError::TableNotFound(format!(
                "no columns found for table `{}`",
                table_name
            )));
        }
        if naming::strip_table_prefix(table_name, table_prefix).is_empty() {
            return Err(CodegenError::InvalidTableName(format!(
                "`{}` is empty after stripping prefix `{}`",
                table_name, table_prefix
            )));
        }

        let short_class_name = naming::entity_class_name(table_name, table_prefix);
        let class_name = naming::qualified_class_name(package, &short_class_name);

        Ok(Self {
            table_name: table_name.to_string(),
            table_schema: table_schema.to_string(),
            short_class_name,
            class_name,
            package: package.to_string(),
            table_comment: table_comment.unwrap_or_default(),
            columns,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Owning schema (MySQL database, or Oracle user)
    pub fn table_schema(&self) -> &str {
        &self.table_schema
    }

    /// Entity class name without package, e.g. `UserEO`
    pub fn short_class_name(&self) -> &str {
        &self.short_class_name
    }

    /// Package plus short class name, e.g. `com.example.UserEO`
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn table_comment(&self) -> &str {
        &self.table_comment
    }

    /// Columns in introspection order
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Get a column by its database name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.column_name == name)
    }

    /// Qualified types the entity has to import, sorted and deduplicated
    pub fn imports(&self) -> Vec<&'static str> {
        let mut imports: Vec<&'static str> = self
            .columns
            .iter()
            .filter(|c| c.field_type.needs_import())
            .map(|c| c.field_type.qualified_name())
            .collect();
        imports.sort_unstable();
        imports.dedup();
        imports
    }
}
