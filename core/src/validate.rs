//! Recursive validation of candidate values against a shape tree.
//!
//! Each node runs its compiled check first (presence decision, then every
//! constraint in declaration order, fail-fast), then descends into children.
//! A failure deep in the tree ascends through the enclosing composites, each
//! prepending one path segment, so the surfaced error names the exact field.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use value_schema_core::Shape;
//!
//! let schema = Shape::object(None)
//!     .property("servers", Shape::array(
//!         Shape::object(None).property("port", Shape::integer(None)),
//!         None,
//!     ));
//!
//! let err = schema
//!     .validate(&json!({"servers": [{"port": 80}, {"port": "x"}]}))
//!     .unwrap_err();
//! assert_eq!(err.path().to_string(), "servers[1].port");
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{Dictionary, Kind, Property, Shape};

/// Message for properties present on the candidate but neither declared nor
/// covered by a dictionary extension.
const UNKNOWN_PROPERTY_TEMPLATE: &str = "%name is not a declared property";

impl Shape {
    /// Validates a candidate value against this shape.
    ///
    /// `Value::Null` is treated as *absent*: optional shapes pass it,
    /// required shapes fail their presence check. Returns the first failure
    /// encountered, with the path to the offending field accumulated through
    /// every enclosing array and object.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let shape = Shape::string(None).optional();
    /// assert!(shape.validate(&json!(null)).is_ok());
    ///
    /// let required = Shape::string(None);
    /// let err = required.validate(&json!(null)).unwrap_err();
    /// assert_eq!(err.message(), "Value is required");
    /// ```
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.assert_value(Some(value))
    }

    /// Validates a possibly-absent value: the compiled check first, then the
    /// kind-specific descent into children.
    pub(crate) fn assert_value(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        let check = self.compiled_check();
        let Some(value) = check.run(value)? else {
            return Ok(());
        };

        match self.kind() {
            Kind::Array(element) => assert_elements(element, value),
            Kind::Object {
                properties,
                dictionary,
            } => assert_properties(properties, dictionary.as_deref(), value),
            Kind::Union(alternatives) => assert_alternatives(alternatives, value),
            _ => Ok(()),
        }
    }
}

fn present(value: &Value) -> Option<&Value> {
    if value.is_null() { None } else { Some(value) }
}

fn assert_elements(element: &Shape, value: &Value) -> Result<(), ValidationError> {
    let Some(items) = value.as_array() else {
        return Ok(());
    };
    for (index, item) in items.iter().enumerate() {
        element
            .assert_value(present(item))
            .map_err(|e| e.nest_index(index))?;
    }
    Ok(())
}

fn assert_properties(
    properties: &[Property],
    dictionary: Option<&Dictionary>,
    value: &Value,
) -> Result<(), ValidationError> {
    let Some(map) = value.as_object() else {
        return Ok(());
    };

    for (name, item) in map {
        if let Some(property) = properties.iter().find(|p| p.name == *name) {
            property
                .shape
                .assert_value(present(item))
                .map_err(|e| e.nest_property(name))?;
        } else if let Some(dictionary) = dictionary {
            let key = Value::String(name.clone());
            dictionary
                .key
                .assert_value(Some(&key))
                .map_err(|e| e.nest_property(name))?;
            dictionary
                .value
                .assert_value(present(item))
                .map_err(|e| e.nest_property(name))?;
        } else {
            return Err(
                ValidationError::new(UNKNOWN_PROPERTY_TEMPLATE, item.clone(), None)
                    .nest_property(name),
            );
        }
    }

    // Declared properties absent from the candidate still go through their
    // shape, surfacing missing required fields.
    for property in properties {
        if !map.contains_key(&property.name) {
            property
                .shape
                .assert_value(None)
                .map_err(|e| e.nest_property(&property.name))?;
        }
    }
    Ok(())
}

fn assert_alternatives(alternatives: &[Shape], value: &Value) -> Result<(), ValidationError> {
    let mut last = None;
    for alternative in alternatives {
        match alternative.assert_value(Some(value)) {
            Ok(()) => return Ok(()),
            Err(err) => last = Some(err),
        }
    }
    match last {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::Shape;

    #[test]
    fn test_optional_leaf_accepts_null_without_path() {
        let shape = Shape::string(None).optional();
        assert!(shape.validate(&json!(null)).is_ok());
    }

    #[test]
    fn test_required_leaf_rejects_null_without_code() {
        let shape = Shape::string(None);
        let err = shape.validate(&json!(null)).unwrap_err();
        assert!(err.message().contains("Value"));
        assert_eq!(err.code(), None);
        assert!(err.path().is_empty());
    }

    #[test]
    fn test_array_failure_carries_element_index() {
        let shape = Shape::array(Shape::string(None), None);
        let err = shape.validate(&json!(["ok", 7])).unwrap_err();
        assert_eq!(err.path().to_string(), "[1]");
        assert_eq!(err.message(), "[1] must be a string, got number");
    }

    #[test]
    fn test_nested_path_reads_innermost_to_outermost() {
        let shape = Shape::object(None).property(
            "db",
            Shape::object(None).property("replicas", Shape::array(Shape::integer(None), None)),
        );
        let err = shape
            .validate(&json!({"db": {"replicas": [1, 2, "x"]}}))
            .unwrap_err();
        assert_eq!(err.path().to_string(), "db.replicas[2]");
    }

    #[test]
    fn test_missing_required_property_is_reported() {
        let shape = Shape::object(None).property("host", Shape::string(None));
        let err = shape.validate(&json!({})).unwrap_err();
        assert_eq!(err.message(), "host is required");
    }

    #[test]
    fn test_null_property_counts_as_absent() {
        let shape = Shape::object(None).property("host", Shape::string(None));
        let err = shape.validate(&json!({"host": null})).unwrap_err();
        assert_eq!(err.message(), "host is required");

        let relaxed = Shape::object(None).property("host", Shape::string(None).optional());
        assert!(relaxed.validate(&json!({"host": null})).is_ok());
    }

    #[test]
    fn test_unknown_property_rejected_without_dictionary() {
        let shape = Shape::object(None).property("known", Shape::integer(None));
        let err = shape.validate(&json!({"known": 1, "extra": 2})).unwrap_err();
        assert_eq!(err.path().to_string(), "extra");
        assert!(err.message().contains("not a declared property"));
    }

    #[test]
    fn test_dictionary_admits_unknown_properties() {
        let shape = Shape::object(None)
            .property("known", Shape::integer(None))
            .dictionary(Shape::string(None), Shape::any());
        assert!(shape.validate(&json!({"known": 1, "extra": 2})).is_ok());
    }

    #[test]
    fn test_dictionary_key_shape_constrains_property_names() {
        let shape =
            Shape::object(None).dictionary(Shape::string(None).regexp("^[a-z]+$", None), Shape::any());
        assert!(shape.validate(&json!({"lower": 1})).is_ok());

        let err = shape.validate(&json!({"UPPER": 1})).unwrap_err();
        assert_eq!(err.path().to_string(), "UPPER");
    }

    #[test]
    fn test_union_first_match_wins() {
        let shape = Shape::union(vec![Shape::integer(None), Shape::string(None)]);
        assert!(shape.validate(&json!("x")).is_ok());
        assert!(shape.validate(&json!(3)).is_ok());
    }

    #[test]
    fn test_union_surfaces_last_alternatives_error() {
        let shape = Shape::union(vec![
            Shape::integer(Some("E_INT")),
            Shape::number(Some("E_NUM")),
        ]);
        let err = shape.validate(&json!("x")).unwrap_err();
        assert_eq!(err.code(), Some("E_NUM"));
        assert_eq!(err.message(), "Value must be a number, got string");
    }

    #[test]
    fn test_optional_union_accepts_absent() {
        let shape = Shape::union(vec![Shape::integer(None)]).optional();
        assert!(shape.validate(&json!(null)).is_ok());
    }

    #[test]
    fn test_object_length_counts_present_properties() {
        let shape = Shape::object(None)
            .dictionary(Shape::string(None), Shape::any())
            .max(2.0, None);
        assert!(shape.validate(&json!({"a": 1, "b": 2})).is_ok());

        let err = shape.validate(&json!({"a": 1, "b": 2, "c": 3})).unwrap_err();
        assert!(err.message().contains("has 3 properties, maximum 2"));
    }

    #[test]
    fn test_constraints_run_in_declaration_order() {
        let shape = Shape::string(None).min(5.0, Some("MIN")).max(2.0, Some("MAX"));
        // Both constraints fail for a 3-char string; the earlier one wins.
        let err = shape.validate(&json!("abc")).unwrap_err();
        assert_eq!(err.code(), Some("MIN"));
    }
}
