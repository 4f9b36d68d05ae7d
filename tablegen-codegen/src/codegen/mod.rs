//! Code generation: naming rules, type mapping and template rendering

pub mod naming;
mod template_generator;
pub mod type_resolver;

pub use template_generator::*;
pub use type_resolver::{FieldType, TypeResolver};
