//! Descriptors for the testable units found in a Java source file.

use serde::Serialize;
use std::fmt;

/// Visibility of an extracted method
///
/// Only methods reachable from a test in the same package are extracted, so
/// `private` and `protected` have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Package,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Package => write!(f, "package-private"),
        }
    }
}

/// One formal parameter of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }

    pub fn is_numeric(&self) -> bool {
        is_numeric_type(&self.ty)
    }
}

/// A method located by the extractor. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub visibility: Visibility,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    /// Types named in `throw new X` statements, first occurrence order
    pub declared_exceptions: Vec<String>,
    pub is_static: bool,
    /// Declaration text up to the opening brace, whitespace collapsed
    pub signature: String,
}

impl MethodDescriptor {
    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }

    pub fn numeric_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.is_numeric())
    }
}

/// Everything the extractor learns about one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    pub class_name: String,
    pub package: Option<String>,
    /// Non-static import targets, source order
    pub imports: Vec<String>,
    pub methods: Vec<MethodDescriptor>,
}

const INTEGRAL_TYPES: &[&str] = &["byte", "short", "int", "Byte", "Short", "Integer"];

/// Whether a Java type name is one of the primitive or boxed numeric types
pub fn is_numeric_type(ty: &str) -> bool {
    zero_literal(ty).is_some()
}

/// Integral numeric types, where division by zero throws instead of
/// yielding infinity or NaN
pub fn is_integral_type(ty: &str) -> bool {
    matches!(zero_literal(ty), Some("0") | Some("0L"))
}

/// The zero literal used as the boundary value for a numeric type
pub fn zero_literal(ty: &str) -> Option<&'static str> {
    match ty {
        t if INTEGRAL_TYPES.contains(&t) => Some("0"),
        "long" | "Long" => Some("0L"),
        "float" | "Float" => Some("0.0f"),
        "double" | "Double" => Some("0.0"),
        _ => None,
    }
}

/// A non-boundary argument value for a type, used to fill in calls
pub fn sample_literal(ty: &str) -> &'static str {
    match ty {
        t if INTEGRAL_TYPES.contains(&t) => "1",
        "long" | "Long" => "1L",
        "float" | "Float" => "1.0f",
        "double" | "Double" => "1.0",
        "boolean" | "Boolean" => "true",
        "char" | "Character" => "'a'",
        "String" | "CharSequence" => "\"test\"",
        _ => "null",
    }
}

/// Placeholder expected value for an `assertEquals` on a return type
pub fn expected_placeholder(ty: &str) -> &'static str {
    match ty {
        "boolean" | "Boolean" => "true",
        "char" | "Character" => "'a'",
        "String" | "CharSequence" => "\"\"",
        t => zero_literal(t).unwrap_or("null"),
    }
}
