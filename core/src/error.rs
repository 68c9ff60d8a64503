//! Path-aware validation failure reporting.
//!
//! A [`ValidationError`] is raised by the first failing constraint on a
//! shape and re-raised through every enclosing composite node. Each
//! composite prepends one [`PathSegment`] on the way out, so the final
//! error pinpoints the nested field that failed.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use value_schema_core::ValidationError;
//!
//! let err = ValidationError::new("%name must be a string, got %type", json!(42), None)
//!     .nest_index(2)
//!     .nest_property("servers");
//!
//! assert_eq!(err.to_string(), "servers[2] must be a string, got number");
//! assert_eq!(err.path().to_string(), "servers[2]");
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// One step in the path from the schema root to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named property of an enclosing object (`.host`).
    Property(String),
    /// Index into an enclosing array (`[3]`).
    Index(usize),
    /// Any element of an array; used by description walks (`[]`).
    AnyIndex,
    /// Any dictionary property; used by description walks (`.*`).
    AnyProperty,
}

/// Ordered path from the schema root down to one value.
///
/// Renders in the conventional dotted/bracketed form: property segments are
/// joined with dots, index segments append brackets.
///
/// # Examples
///
/// ```
/// use value_schema_core::{Path, PathSegment};
///
/// let mut path = Path::new();
/// path.push(PathSegment::Property("servers".into()));
/// path.push(PathSegment::Index(2));
/// path.push(PathSegment::Property("port".into()));
///
/// assert_eq!(path.to_string(), "servers[2].port");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates an empty path (the schema root).
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns true when the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the segments in root-to-leaf order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Appends a segment at the leaf end.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Removes the leaf segment, if any.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Inserts a segment at the root end.
    ///
    /// Used while an error ascends nested validators: the innermost segment
    /// is prepended first, so the finished path reads root-to-leaf.
    pub fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Property(name) => {
                    if i > 0 {
                        write!(f, ".{name}")?;
                    } else {
                        write!(f, "{name}")?;
                    }
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::AnyIndex => write!(f, "[]")?,
                PathSegment::AnyProperty => {
                    if i > 0 {
                        write!(f, ".*")?;
                    } else {
                        write!(f, "*")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Name a path resolves to in messages: the literal `Value` at the root.
const ROOT_NAME: &str = "Value";

/// A concrete value's failure against one declared constraint.
///
/// Carries the failing value, the constraint's message template, an optional
/// machine-readable code, and the path accumulated while the error propagated
/// outward. The error is immutable: [`nest_property`](Self::nest_property) and
/// [`nest_index`](Self::nest_index) return a rebuilt error with one more
/// segment at the root end.
///
/// The display message is resolved on demand from the template. Placeholders:
///
/// - `%type` — `null`, `boolean`, `number`, `string`, `array`, or `object`
/// - `%name` — the accumulated path, or `Value` when no segment was added
/// - `%value` — the value itself, string-coerced
/// - `%length` — element/property/character count, or `undefined`
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use value_schema_core::ValidationError;
///
/// let err = ValidationError::new("%name has length %length", json!("abc"), Some("E_LEN"));
/// assert_eq!(err.message(), "Value has length 3");
/// assert_eq!(err.code(), Some("E_LEN"));
/// ```
#[derive(Debug, Clone, Error)]
#[error("{}", resolve_template(.template, .value, .path))]
pub struct ValidationError {
    template: String,
    value: Value,
    code: Option<String>,
    path: Path,
}

impl ValidationError {
    /// Creates an error with an empty path.
    pub fn new(template: impl Into<String>, value: Value, code: Option<&str>) -> Self {
        Self {
            template: template.into(),
            value,
            code: code.map(String::from),
            path: Path::new(),
        }
    }

    /// Rebuilds the error with a property segment prepended.
    #[must_use]
    pub fn nest_property(mut self, name: &str) -> Self {
        self.path.prepend(PathSegment::Property(name.to_string()));
        self
    }

    /// Rebuilds the error with an array-index segment prepended.
    #[must_use]
    pub fn nest_index(mut self, index: usize) -> Self {
        self.path.prepend(PathSegment::Index(index));
        self
    }

    /// Resolves the display message from the template.
    ///
    /// Resolution is idempotent; it may be called at any point while the
    /// error ascends nested validators and always reflects the current path.
    pub fn message(&self) -> String {
        resolve_template(&self.template, &self.value, &self.path)
    }

    /// The accumulated field path, innermost segments prepended last.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The resolved field name: the path, or `Value` at the root.
    pub fn name(&self) -> String {
        if self.path.is_empty() {
            ROOT_NAME.to_string()
        } else {
            self.path.to_string()
        }
    }

    /// The caller-supplied machine-readable code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The offending value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Returns the `%type` name of a value.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// String-coerces a value for `%value`: strings render raw, everything else
/// as compact JSON.
fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns the `%length` of a value when it has one.
fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

fn resolve_template(template: &str, value: &Value, path: &Path) -> String {
    let name = if path.is_empty() {
        ROOT_NAME.to_string()
    } else {
        path.to_string()
    };
    let length = value_length(value)
        .map(|n| n.to_string())
        .unwrap_or_else(|| "undefined".to_string());

    template
        .replace("%type", type_name(value))
        .replace("%name", &name)
        .replace("%value", &value_display(value))
        .replace("%length", &length)
}

/// Resolves only `%name` against a walk path, for description records where
/// no concrete value exists yet.
pub(crate) fn resolve_name(template: &str, path: &Path) -> String {
    let name = if path.is_empty() {
        ROOT_NAME.to_string()
    } else {
        path.to_string()
    };
    template.replace("%name", &name)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_path_display_mixes_properties_and_indices() {
        let mut path = Path::new();
        path.push(PathSegment::Property("servers".to_string()));
        path.push(PathSegment::Index(0));
        path.push(PathSegment::Property("port".to_string()));
        assert_eq!(path.to_string(), "servers[0].port");
    }

    #[test]
    fn test_path_display_leading_index() {
        let mut path = Path::new();
        path.push(PathSegment::Index(3));
        path.push(PathSegment::Property("name".to_string()));
        assert_eq!(path.to_string(), "[3].name");
    }

    #[test]
    fn test_nest_prepends_segments_innermost_first() {
        let err = ValidationError::new("%name", json!(1), None)
            .nest_property("port")
            .nest_index(2)
            .nest_property("servers");
        assert_eq!(err.name(), "servers[2].port");
    }

    #[test]
    fn test_message_resolution_is_idempotent() {
        let err = ValidationError::new("%name: %value (%type)", json!("x"), None);
        assert_eq!(err.message(), "Value: x (string)");
        assert_eq!(err.message(), "Value: x (string)");
    }

    #[test]
    fn test_root_name_is_value_literal() {
        let err = ValidationError::new("%name is required", json!(null), None);
        assert_eq!(err.message(), "Value is required");
    }

    #[test]
    fn test_length_resolves_per_kind() {
        let err = ValidationError::new("%length", json!("héllo"), None);
        assert_eq!(err.message(), "5");

        let err = ValidationError::new("%length", json!([1, 2]), None);
        assert_eq!(err.message(), "2");

        let err = ValidationError::new("%length", json!({"a": 1}), None);
        assert_eq!(err.message(), "1");

        let err = ValidationError::new("%length", json!(true), None);
        assert_eq!(err.message(), "undefined");
    }

    #[test]
    fn test_value_coercion_renders_strings_raw() {
        let err = ValidationError::new("%value", json!("plain"), None);
        assert_eq!(err.message(), "plain");

        let err = ValidationError::new("%value", json!({"a": 1}), None);
        assert_eq!(err.message(), "{\"a\":1}");
    }

    #[test]
    fn test_path_serializes_as_display_string() {
        let mut path = Path::new();
        path.push(PathSegment::Property("db".to_string()));
        path.push(PathSegment::AnyIndex);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"db[]\"");
    }
}
