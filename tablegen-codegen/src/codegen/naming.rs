//! Naming utilities for code generation

use crate::error::{CodegenError, Result};

/// Separator between words in database identifiers
pub const WORD_SEPARATOR: char = '_';

/// Suffix appended to every entity class name
pub const ENTITY_SUFFIX: &str = "EO";

/// Convert a database identifier to a class name (PascalCase)
///
/// `user_name` -> `UserName`. An identifier without separators only has its
/// first letter upper-cased, so `userName` -> `UserName` and `id` -> `Id`.
pub fn to_class_name(identifier: &str) -> String {
    if !identifier.contains(WORD_SEPARATOR) {
        return recase_first(identifier, true);
    }
    identifier
        .split(WORD_SEPARATOR)
        .map(capitalize_word)
        .collect()
}

/// Convert a database identifier to a field name (camelCase)
///
/// `created_at` -> `createdAt`, `Id` -> `id`.
pub fn to_field_name(identifier: &str) -> String {
    if !identifier.contains(WORD_SEPARATOR) {
        return recase_first(identifier, false);
    }
    recase_first(&to_class_name(identifier), false)
}

/// Remove `prefix` once from the start of `table_name`
pub fn strip_table_prefix<'a>(table_name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return table_name;
    }
    table_name.strip_prefix(prefix).unwrap_or(table_name)
}

/// Derive the short entity class name for a table
/// e.g., ("t_user", "t_") -> "UserEO"
pub fn entity_class_name(table_name: &str, prefix: &str) -> String {
    format!(
        "{}{}",
        to_class_name(strip_table_prefix(table_name, prefix)),
        ENTITY_SUFFIX
    )
}

/// Join a package and a short class name into a qualified class name
pub fn qualified_class_name(package: &str, short_class_name: &str) -> String {
    if package.is_empty() {
        short_class_name.to_string()
    } else {
        format!("{}.{}", package, short_class_name)
    }
}

/// Check that a table name only uses characters valid in an unquoted identifier
///
/// Derived names end up in file paths, so anything outside `[A-Za-z0-9_$#]`
/// is rejected before a connection is opened.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CodegenError::InvalidTableName("name is empty".into()));
    }
    if let Some(bad) = name.chars().find(|c| !is_identifier_char(*c)) {
        return Err(CodegenError::InvalidTableName(format!(
            "`{}` contains unsupported character {:?}",
            name, bad
        )));
    }
    Ok(())
}

/// Check that a package is a dotted identifier such as `com.example.user`
pub fn is_valid_package(package: &str) -> bool {
    package.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#')
}

fn recase_first(word: &str, upper: bool) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
