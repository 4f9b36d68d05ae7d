//! Database column type to field type mapping

use serde::{Serialize, Serializer};

/// Field type of a generated entity property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Boolean,
    Long,
    Integer,
    Float,
    Double,
    BigDecimal,
    Date,
    Clob,
    /// Fallback for column types without a dedicated mapping
    Object,
}

impl FieldType {
    /// Fully qualified type name, e.g. `java.lang.Long`
    pub fn qualified_name(&self) -> &'static str {
        match self {
            FieldType::String => "java.lang.String",
            FieldType::Boolean => "java.lang.Boolean",
            FieldType::Long => "java.lang.Long",
            FieldType::Integer => "java.lang.Integer",
            FieldType::Float => "java.lang.Float",
            FieldType::Double => "java.lang.Double",
            FieldType::BigDecimal => "java.math.BigDecimal",
            FieldType::Date => "java.util.Date",
            FieldType::Clob => "java.sql.Clob",
            FieldType::Object => "java.lang.Object",
        }
    }

    /// Type name without its package, e.g. `Long`
    pub fn short_name(&self) -> &'static str {
        let qualified = self.qualified_name();
        match qualified.rfind('.') {
            Some(idx) => &qualified[idx + 1..],
            None => qualified,
        }
    }

    /// MyBatis `jdbcType` used in result maps and parameter markers
    pub fn jdbc_type(&self) -> &'static str {
        match self {
            FieldType::String => "VARCHAR",
            FieldType::Boolean => "BIT",
            FieldType::Long => "BIGINT",
            FieldType::Integer => "INTEGER",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::BigDecimal => "DECIMAL",
            FieldType::Date => "TIMESTAMP",
            FieldType::Clob => "CLOB",
            FieldType::Object => "OTHER",
        }
    }

    /// Whether the type lives outside `java.lang` and needs an import
    pub fn needs_import(&self) -> bool {
        !self.qualified_name().starts_with("java.lang.")
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.qualified_name())
    }
}

/// Resolve database column types to field types
pub struct TypeResolver;

impl TypeResolver {
    /// Get the field type for a raw column type
    ///
    /// Types are classified by substring in a fixed priority order, so
    /// `bigint` is tested before `int` and `datetime` resolves through the
    /// date/time rule. Anything unmatched becomes [`FieldType::Object`].
    pub fn resolve(column_type: &str, length: Option<u32>, scale: Option<i32>) -> FieldType {
        let column_type = column_type.to_lowercase();

        if column_type.contains("char") || column_type.contains("text") {
            FieldType::String
        } else if column_type.contains("bit") {
            FieldType::Boolean
        } else if column_type.contains("bigint") {
            FieldType::Long
        } else if column_type.contains("int") {
            FieldType::Integer
        } else if column_type.contains("float") {
            FieldType::Float
        } else if column_type.contains("double") {
            FieldType::Double
        } else if column_type.contains("decimal") {
            FieldType::BigDecimal
        } else if column_type.contains("number") {
            Self::resolve_number(length, scale)
        } else if column_type.contains("date") || column_type.contains("time") {
            FieldType::Date
        } else if column_type.contains("clob") {
            FieldType::Clob
        } else {
            FieldType::Object
        }
    }

    /// Disambiguate the generic `number` type; a positive scale wins over length
    fn resolve_number(length: Option<u32>, scale: Option<i32>) -> FieldType {
        if scale.is_some_and(|s| s > 0) {
            FieldType::Double
        } else if length.is_some_and(|l| l > 10) {
            FieldType::Long
        } else {
            FieldType::Integer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_types() {
        assert_eq!(TypeResolver::resolve("varchar", None, None), FieldType::String);
        assert_eq!(TypeResolver::resolve("CHAR", None, None), FieldType::String);
        assert_eq!(TypeResolver::resolve("longtext", None, None), FieldType::String);
        assert_eq!(TypeResolver::resolve("NVARCHAR2", None, None), FieldType::String);
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(TypeResolver::resolve("bigint(20)", Some(20), None), FieldType::Long);
        assert_eq!(TypeResolver::resolve("int", Some(10), Some(0)), FieldType::Integer);
        assert_eq!(TypeResolver::resolve("tinyint", Some(3), Some(0)), FieldType::Integer);
        assert_eq!(TypeResolver::resolve("smallint", None, None), FieldType::Integer);
    }

    #[test]
    fn test_bit_before_int() {
        assert_eq!(TypeResolver::resolve("bit", Some(1), None), FieldType::Boolean);
    }

    #[test]
    fn test_floating_types() {
        assert_eq!(TypeResolver::resolve("float", Some(12), None), FieldType::Float);
        assert_eq!(TypeResolver::resolve("double", Some(22), None), FieldType::Double);
        assert_eq!(
            TypeResolver::resolve("decimal", Some(10), Some(2)),
            FieldType::BigDecimal
        );
    }

    #[test]
    fn test_number_types() {
        assert_eq!(TypeResolver::resolve("NUMBER", Some(12), Some(0)), FieldType::Long);
        assert_eq!(TypeResolver::resolve("number", Some(5), Some(2)), FieldType::Double);
        assert_eq!(TypeResolver::resolve("number", Some(20), Some(4)), FieldType::Double);
        assert_eq!(TypeResolver::resolve("number", Some(10), Some(0)), FieldType::Integer);
        assert_eq!(TypeResolver::resolve("number", None, None), FieldType::Integer);
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(TypeResolver::resolve("datetime", None, None), FieldType::Date);
        assert_eq!(TypeResolver::resolve("DATE", None, None), FieldType::Date);
        assert_eq!(TypeResolver::resolve("timestamp", None, None), FieldType::Date);
        assert_eq!(
            TypeResolver::resolve("TIMESTAMP(6)", None, Some(6)),
            FieldType::Date
        );
    }

    #[test]
    fn test_clob_and_fallback() {
        assert_eq!(TypeResolver::resolve("CLOB", None, None), FieldType::Clob);
        assert_eq!(TypeResolver::resolve("varbinary", None, None), FieldType::Object);
        assert_eq!(TypeResolver::resolve("RAW", None, None), FieldType::Object);
        assert_eq!(TypeResolver::resolve("geometry", None, None), FieldType::Object);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let first = TypeResolver::resolve("bigint", Some(20), None);
        for _ in 0..3 {
            assert_eq!(TypeResolver::resolve("bigint", Some(20), None), first);
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(FieldType::Long.qualified_name(), "java.lang.Long");
        assert_eq!(FieldType::Long.short_name(), "Long");
        assert_eq!(FieldType::BigDecimal.short_name(), "BigDecimal");
        assert_eq!(FieldType::Date.jdbc_type(), "TIMESTAMP");
        assert!(FieldType::Date.needs_import());
        assert!(!FieldType::String.needs_import());
    }
}
