//! Flattening a shape tree into descriptor records.
//!
//! A description walk visits every node and appends one [`Descriptor`] per
//! owned constraint, tagging each with the path to the node. The records
//! are plain, serializable values for documentation and reporting; walking
//! has no validation side effects and never touches candidate data.

use serde::Serialize;

use crate::constraint::{REQUIRED_CONDITION, REQUIRED_TEMPLATE};
use crate::error::{Path, PathSegment, resolve_name};
use crate::types::{Kind, Shape};

/// Flattened, path-tagged representation of one constraint.
///
/// `message` is the constraint's template with `%name` resolved against the
/// walk path; the value-dependent placeholders (`%type`, `%value`,
/// `%length`) stay verbatim since no candidate value exists at description
/// time.
#[derive(Debug, Clone, Serialize)]
pub struct Descriptor {
    /// Path to the owning node (`db.replicas[]`).
    pub path: Path,
    /// Design-level description of the failure condition.
    pub condition: String,
    /// The failure message, `%name`-resolved.
    pub message: String,
    /// Machine-readable code, when one was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Hooks applied to each record before it is appended.
///
/// `filter` suppresses records it returns `false` for; `transform` rewrites
/// a record in place. The filter runs first.
#[derive(Default)]
pub struct DescribeOptions {
    /// Suppresses individual records.
    pub filter: Option<Box<dyn Fn(&Descriptor) -> bool>>,
    /// Rewrites records before they are appended.
    pub transform: Option<Box<dyn Fn(&mut Descriptor)>>,
}

impl Shape {
    /// Walks the shape tree into a flat list of descriptor records.
    ///
    /// Required nodes contribute a synthetic presence record before their
    /// declared constraints; optional nodes skip it. Children extend the
    /// path: array elements as `[]`, declared properties as `.name`,
    /// dictionary key/value shapes as `.*`, union alternatives in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{DescribeOptions, Shape};
    ///
    /// let schema = Shape::object(None)
    ///     .property("host", Shape::string(None).min(1.0, None));
    ///
    /// let records = schema.descriptors(&DescribeOptions::default());
    /// let conditions: Vec<_> = records
    ///     .iter()
    ///     .map(|r| format!("{}: {}", r.path, r.condition))
    ///     .collect();
    /// assert!(conditions.contains(&"host: length >= 1".to_string()));
    /// ```
    pub fn descriptors(&self, options: &DescribeOptions) -> Vec<Descriptor> {
        let mut out = Vec::new();
        let mut path = Path::new();
        self.describe_into(&mut path, &mut out, options);
        out
    }

    /// Appends this node's records to `out` under `path` and recurses into
    /// owned children.
    pub fn describe_into(
        &self,
        path: &mut Path,
        out: &mut Vec<Descriptor>,
        options: &DescribeOptions,
    ) {
        if !self.is_optional() {
            emit(
                path,
                REQUIRED_CONDITION,
                REQUIRED_TEMPLATE,
                self.code(),
                out,
                options,
            );
        }
        for constraint in self.constraints() {
            emit(
                path,
                constraint.condition(),
                constraint.template(),
                constraint.code(),
                out,
                options,
            );
        }

        match self.kind() {
            Kind::Array(element) => {
                path.push(PathSegment::AnyIndex);
                element.describe_into(path, out, options);
                path.pop();
            }
            Kind::Object {
                properties,
                dictionary,
            } => {
                for property in properties {
                    path.push(PathSegment::Property(property.name.clone()));
                    property.shape.describe_into(path, out, options);
                    path.pop();
                }
                if let Some(dictionary) = dictionary {
                    path.push(PathSegment::AnyProperty);
                    dictionary.key.describe_into(path, out, options);
                    dictionary.value.describe_into(path, out, options);
                    path.pop();
                }
            }
            Kind::Union(alternatives) => {
                for alternative in alternatives {
                    alternative.describe_into(path, out, options);
                }
            }
            _ => {}
        }
    }
}

fn emit(
    path: &Path,
    condition: &str,
    template: &str,
    code: Option<&str>,
    out: &mut Vec<Descriptor>,
    options: &DescribeOptions,
) {
    let mut record = Descriptor {
        path: path.clone(),
        condition: condition.to_string(),
        message: resolve_name(template, path),
        code: code.map(String::from),
    };
    if let Some(filter) = &options.filter {
        if !filter(&record) {
            return;
        }
    }
    if let Some(transform) = &options.transform {
        transform(&mut record);
    }
    out.push(record);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn conditions(records: &[Descriptor]) -> Vec<String> {
        records
            .iter()
            .map(|r| format!("{}: {}", r.path, r.condition))
            .collect()
    }

    #[test]
    fn test_required_node_contributes_presence_record() {
        let records = Shape::string(None).descriptors(&DescribeOptions::default());
        assert_eq!(
            conditions(&records),
            vec![": is present", ": is a string"]
        );
    }

    #[test]
    fn test_optional_node_skips_presence_record() {
        let records = Shape::string(None)
            .optional()
            .descriptors(&DescribeOptions::default());
        assert_eq!(conditions(&records), vec![": is a string"]);
    }

    #[test]
    fn test_paths_extend_through_composites() {
        let schema = Shape::object(None).property(
            "replicas",
            Shape::array(Shape::integer(None).range(0.0, 16.0, None), None),
        );
        let records = schema.descriptors(&DescribeOptions::default());
        let got = conditions(&records);

        assert!(got.contains(&"replicas: is an array".to_string()));
        assert!(got.contains(&"replicas[]: is an integer".to_string()));
        assert!(got.contains(&"replicas[]: >= 0".to_string()));
        assert!(got.contains(&"replicas[]: <= 16".to_string()));
    }

    #[test]
    fn test_dictionary_shapes_described_under_star() {
        let schema = Shape::object(None)
            .dictionary(Shape::string(None).regexp("^[a-z]+$", None), Shape::any());
        let records = schema.descriptors(&DescribeOptions::default());
        let got = conditions(&records);
        assert!(got.contains(&"*: matches /^[a-z]+$/".to_string()));
    }

    #[test]
    fn test_union_alternatives_share_the_path() {
        let schema = Shape::object(None).property(
            "id",
            Shape::union(vec![Shape::integer(None), Shape::string(None)]),
        );
        let records = schema.descriptors(&DescribeOptions::default());
        let got = conditions(&records);
        assert!(got.contains(&"id: is an integer".to_string()));
        assert!(got.contains(&"id: is a string".to_string()));
    }

    #[test]
    fn test_message_resolves_name_against_path() {
        let schema = Shape::object(None).property("host", Shape::string(None));
        let records = schema.descriptors(&DescribeOptions::default());
        assert!(
            records
                .iter()
                .any(|r| r.message == "host must be a string, got %type")
        );
    }

    #[test]
    fn test_filter_suppresses_records() {
        let schema = Shape::object(None).property("host", Shape::string(None));
        let options = DescribeOptions {
            filter: Some(Box::new(|r: &Descriptor| r.code.is_some())),
            transform: None,
        };
        assert!(schema.descriptors(&options).is_empty());
    }

    #[test]
    fn test_transform_rewrites_records_in_place() {
        let schema = Shape::string(Some("E_STR"));
        let options = DescribeOptions {
            filter: None,
            transform: Some(Box::new(|r: &mut Descriptor| {
                r.message = format!("[{}] {}", r.code.as_deref().unwrap_or("-"), r.message);
            })),
        };
        let records = schema.descriptors(&options);
        assert!(records.iter().all(|r| r.message.starts_with('[')));
    }

    #[test]
    fn test_walk_has_no_validation_side_effects() {
        let schema = Shape::string(None).max(2.0, None);
        let _ = schema.descriptors(&DescribeOptions::default());
        // Still validates normally afterwards.
        assert!(schema.validate(&json!("ab")).is_ok());
        assert!(schema.validate(&json!("abc")).is_err());
    }

    #[test]
    fn test_descriptor_serializes_with_string_path() {
        let schema = Shape::object(None).property("host", Shape::string(Some("E_H")));
        let records = schema.descriptors(&DescribeOptions::default());
        let json = serde_json::to_value(&records).unwrap();
        let host_record = json
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["path"] == "host" && r["code"] == "E_H")
            .unwrap();
        assert_eq!(host_record["condition"], "is a string");
    }
}
