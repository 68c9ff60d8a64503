//! Core shape model and validation engine for structured values.
//!
//! This crate lets a program declare the *shape* of structured data and
//! then:
//!
//! - [`Shape::validate`] — check a candidate [`serde_json::Value`] against
//!   the declared constraints, with path-aware error reporting.
//! - [`Shape::materialize_default`] — build a value satisfying the schema's
//!   declared defaults.
//! - [`Shape::create_from_defaults`] / [`Shape::merge_into`] — merge partial
//!   updates over defaults or an existing value, then re-validate.
//! - [`Shape::descriptors`] — flatten the declared constraints into
//!   [`Descriptor`] records for documentation and reporting.
//!
//! Shapes are built by composition: scalar constructors ([`Shape::string`],
//! [`Shape::integer`], …) at the leaves, [`Shape::array`], [`Shape::object`],
//! and [`Shape::union`] above them, refined with fluent builders. Schema
//! definition is cheap and happens once; each node's constraint list is
//! compiled into a single cached check on first validation and recompiled
//! only after further builder calls.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use value_schema_core::Shape;
//!
//! let schema = Shape::object(None)
//!     .property("host", Shape::string(None).min(1.0, None).with_default(json!("localhost")))
//!     .property("port", Shape::integer(None).range(1.0, 65535.0, None).with_default(json!(8080)))
//!     .property("tags", Shape::array(Shape::string(None), None).optional());
//!
//! // Validate a full document.
//! assert!(schema.validate(&json!({"host": "db1", "port": 5432, "tags": null})).is_ok());
//!
//! // Build one from defaults plus a partial update.
//! let config = schema.create_from_defaults(&json!({"port": 9090})).unwrap();
//! assert_eq!(config, json!({"host": "localhost", "port": 9090, "tags": null}));
//!
//! // Failures name the offending field.
//! let err = schema.validate(&json!({"host": "db1", "port": "https"})).unwrap_err();
//! assert_eq!(err.path().to_string(), "port");
//! ```

mod constraint;
mod describe;
mod error;
mod merge;
mod types;
mod validate;

pub use constraint::Constraint;
pub use describe::{DescribeOptions, Descriptor};
pub use error::{Path, PathSegment, ValidationError};
pub use merge::merge_value;
pub use types::{DefaultSource, Dictionary, Kind, Property, Shape};
