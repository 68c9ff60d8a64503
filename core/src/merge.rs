//! Default materialization and structural merging of partial updates.
//!
//! [`Shape::create_from_defaults`] builds a value from the schema's declared
//! defaults, merges caller data over it, and validates the result.
//! [`Shape::merge_into`] applies the same merge-then-validate discipline to
//! an existing value.
//!
//! The merge itself is structural, not schema-aware: object sources merge
//! per property, recursively; arrays and scalars replace the destination
//! wholesale. An update that supplies a shorter array truncates the rest —
//! elements are never merged index-by-index.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use value_schema_core::Shape;
//!
//! let schema = Shape::object(None)
//!     .property("host", Shape::string(None).with_default(json!("localhost")))
//!     .property("port", Shape::integer(None).with_default(json!(8080)));
//!
//! let config = schema.create_from_defaults(&json!({"port": 9090})).unwrap();
//! assert_eq!(config, json!({"host": "localhost", "port": 9090}));
//! ```

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{DefaultSource, Kind, Shape};

impl Shape {
    /// Materializes a value from the schema's declared defaults.
    ///
    /// An explicit default wins (literal defaults are deep-copied, factory
    /// defaults invoked lazily here). Otherwise optional shapes materialize
    /// as `null`; required objects materialize one entry per declared
    /// property, recursively (dictionary-only properties never appear);
    /// required unions materialize the first alternative's non-null default.
    /// Everything else materializes as `null`.
    ///
    /// Defaults are rebuilt on every call, so factories run once per
    /// materialization.
    pub fn materialize_default(&self) -> Value {
        if let Some(source) = self.default_source() {
            return match source {
                DefaultSource::Literal(value) => value.clone(),
                DefaultSource::Factory(factory) => factory(),
            };
        }
        if self.is_optional() {
            return Value::Null;
        }
        match self.kind() {
            Kind::Object { properties, .. } => {
                let mut map = Map::new();
                for property in properties {
                    map.insert(property.name.clone(), property.shape.materialize_default());
                }
                Value::Object(map)
            }
            Kind::Union(alternatives) => alternatives
                .iter()
                .map(Shape::materialize_default)
                .find(|v| !v.is_null())
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Materializes the schema's defaults, merges `data` over them, and
    /// validates the result.
    ///
    /// Explicit input wins over defaults. Returns the merged value, or the
    /// first validation failure in it.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let schema = Shape::object(None)
    ///     .property("s", Shape::string(None).optional().with_default(json!("str")));
    ///
    /// assert_eq!(
    ///     schema.create_from_defaults(&json!({})).unwrap(),
    ///     json!({"s": "str"})
    /// );
    /// assert_eq!(
    ///     schema.create_from_defaults(&json!({"s": "other"})).unwrap(),
    ///     json!({"s": "other"})
    /// );
    /// ```
    pub fn create_from_defaults(&self, data: &Value) -> Result<Value, ValidationError> {
        let mut merged = self.materialize_default();
        merge_value(&mut merged, data);
        self.validate(&merged)?;
        Ok(merged)
    }

    /// Merges `data` into `existing`, then re-validates the whole result.
    ///
    /// The merge can fail validation even when both operands were never
    /// individually validated; `existing` is left in its merged state either
    /// way.
    pub fn merge_into(&self, existing: &mut Value, data: &Value) -> Result<(), ValidationError> {
        merge_value(existing, data);
        self.validate(existing)
    }
}

/// Structural merge of `data` into `existing`.
///
/// When both sides are objects, the source's properties are merged in,
/// recursively. Any other source — arrays included — replaces the
/// destination wholesale.
pub fn merge_value(existing: &mut Value, data: &Value) {
    if let (Value::Object(destination), Value::Object(source)) = (&mut *existing, data) {
        for (name, value) in source {
            match destination.get_mut(name) {
                Some(slot) => merge_value(slot, value),
                None => {
                    destination.insert(name.clone(), value.clone());
                }
            }
        }
        return;
    }
    *existing = data.clone();
}
