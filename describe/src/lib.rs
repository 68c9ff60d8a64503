//! Rendering schema constraint descriptions.
//!
//! The core crate flattens a schema into [`Descriptor`] records; this crate
//! turns those records into text. A [`Describer`] maps style names to
//! [`Renderer`] implementations and dispatches per call, so callers can add
//! their own output formats next to the built-in ones:
//!
//! | Style | Output |
//! |---|---|
//! | `text` | delimiter-separated rows |
//! | `table` | width-aligned plain-text columns |
//! | `markdown` | pipe table |
//! | `json` | pretty-printed JSON array |
//! | `yaml` | YAML sequence |
//!
//! # Example
//!
//! ```
//! use value_schema_core::{DescribeOptions, Shape};
//! use value_schema_describe::{Describer, FieldSelection};
//!
//! let schema = Shape::object(None)
//!     .property("host", Shape::string(None).min(1.0, None));
//!
//! let describer = Describer::default();
//! let text = describer
//!     .describe(&schema, "text", &FieldSelection::all(), &DescribeOptions::default())
//!     .unwrap();
//! assert!(text.contains("host | length >= 1"));
//!
//! assert!(describer
//!     .describe(&schema, "html", &FieldSelection::all(), &DescribeOptions::default())
//!     .is_err());
//! ```

mod render;

pub use render::{JsonRenderer, MarkdownRenderer, TableRenderer, TextRenderer, YamlRenderer};

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;
use value_schema_core::{DescribeOptions, Descriptor, Shape};

/// Errors raised while describing a schema.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// The requested style has no registered renderer.
    #[error("no renderer registered for style '{0}'")]
    UnknownStyle(String),

    /// A renderer failed to serialize the records.
    #[error("rendering failed: {0}")]
    RenderFailed(String),
}

/// Which descriptor fields a rendering includes.
///
/// All fields are included by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    /// Include the node path.
    pub path: bool,
    /// Include the failure-condition description.
    pub condition: bool,
    /// Include the resolved message.
    pub message: bool,
    /// Include the machine-readable code.
    pub code: bool,
}

impl FieldSelection {
    /// Selects every field.
    pub fn all() -> Self {
        Self {
            path: true,
            condition: true,
            message: true,
            code: true,
        }
    }

    /// Field names in rendering order, filtered by this selection.
    pub(crate) fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.path {
            names.push("path");
        }
        if self.condition {
            names.push("condition");
        }
        if self.message {
            names.push("message");
        }
        if self.code {
            names.push("code");
        }
        names
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Renders descriptor records into one output representation.
///
/// The core dictates only the record shape; what a renderer produces —
/// delimited rows, an indented outline, embeddable source fragments — is
/// its own business.
pub trait Renderer: Send + Sync {
    /// Renders the records, honoring the field selection.
    fn render(&self, records: &[Descriptor], fields: &FieldSelection)
    -> Result<String, DescribeError>;
}

/// Registry of named rendering styles.
///
/// [`Describer::default`] pre-registers the built-in styles; [`register`]
/// adds or replaces entries.
///
/// [`register`]: Describer::register
pub struct Describer {
    renderers: HashMap<String, Box<dyn Renderer>>,
}

impl Default for Describer {
    fn default() -> Self {
        let mut describer = Self::empty();
        describer.register("text", Box::new(TextRenderer::default()));
        describer.register("table", Box::new(TableRenderer));
        describer.register("markdown", Box::new(MarkdownRenderer));
        describer.register("json", Box::new(JsonRenderer));
        describer.register("yaml", Box::new(YamlRenderer));
        describer
    }
}

impl Describer {
    /// Creates a registry with no styles.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers a renderer under a style name, replacing any previous one.
    pub fn register(&mut self, style: impl Into<String>, renderer: Box<dyn Renderer>) {
        self.renderers.insert(style.into(), renderer);
    }

    /// Registered style names, sorted.
    pub fn styles(&self) -> Vec<&str> {
        let mut styles: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        styles.sort_unstable();
        styles
    }

    /// Walks `schema` into descriptor records and renders them in `style`.
    ///
    /// `options` is forwarded to the description walk, so its filter and
    /// transform hooks apply before rendering. Fails when `style` is not
    /// registered.
    pub fn describe(
        &self,
        schema: &Shape,
        style: &str,
        fields: &FieldSelection,
        options: &DescribeOptions,
    ) -> Result<String, DescribeError> {
        let renderer = self
            .renderers
            .get(style)
            .ok_or_else(|| DescribeError::UnknownStyle(style.to_string()))?;
        let records = schema.descriptors(options);
        debug!(style, records = records.len(), "rendering schema description");
        renderer.render(&records, fields)
    }
}

#[cfg(test)]
mod tests {
    use value_schema_core::{DescribeOptions, Shape};

    use super::*;

    #[test]
    fn test_unknown_style_is_an_error() {
        let describer = Describer::default();
        let err = describer
            .describe(
                &Shape::any(),
                "dot",
                &FieldSelection::all(),
                &DescribeOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, DescribeError::UnknownStyle(style) if style == "dot"));
    }

    #[test]
    fn test_builtin_styles_are_registered() {
        let describer = Describer::default();
        assert_eq!(
            describer.styles(),
            vec!["json", "markdown", "table", "text", "yaml"]
        );
    }

    #[test]
    fn test_custom_renderer_can_be_registered() {
        struct CountRenderer;
        impl Renderer for CountRenderer {
            fn render(
                &self,
                records: &[value_schema_core::Descriptor],
                _fields: &FieldSelection,
            ) -> Result<String, DescribeError> {
                Ok(records.len().to_string())
            }
        }

        let mut describer = Describer::empty();
        describer.register("count", Box::new(CountRenderer));

        let schema = Shape::string(None);
        let out = describer
            .describe(
                &schema,
                "count",
                &FieldSelection::all(),
                &DescribeOptions::default(),
            )
            .unwrap();
        // Presence check plus the innate type check.
        assert_eq!(out, "2");
    }

    #[test]
    fn test_walk_options_apply_before_rendering() {
        let schema = Shape::object(None).property("host", Shape::string(None));
        let options = DescribeOptions {
            filter: Some(Box::new(|r| r.path.to_string() == "host")),
            transform: None,
        };

        let describer = Describer::default();
        let text = describer
            .describe(&schema, "text", &FieldSelection::all(), &options)
            .unwrap();
        assert!(text.contains("host"));
        assert!(!text.contains("is an object"));
    }
}
