//! Shape declarations for structured values.
//!
//! A schema is a tree of [`Shape`] nodes built by composition: scalar kinds
//! at the leaves, arrays/objects/unions above them. Every node carries the
//! same capability set — an ordered constraint list, an optional flag, and
//! an optional default — while the [`Kind`] tag selects the type-specific
//! constraint builders and validation behavior.
//!
//! Construction is cheap and happens once; validation may happen per
//! request. The first `validate` call compiles the node's constraint list
//! into a single cached check, and every builder call invalidates that
//! cache.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use value_schema_core::Shape;
//!
//! let server = Shape::object(None)
//!     .property("host", Shape::string(None).min(1.0, None))
//!     .property("port", Shape::integer(None).range(1.0, 65535.0, None).with_default(json!(8080)))
//!     .property("tags", Shape::array(Shape::string(None), None).optional());
//!
//! assert!(server.validate(&json!({"host": "db1", "port": 5432})).is_ok());
//! assert!(server.validate(&json!({"host": "db1", "port": 0})).is_err());
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde_json::Value;

use crate::constraint::{CompiledCheck, Constraint};
use crate::error::type_name;

/// Closed set of shape kinds.
///
/// Composite kinds own their children exclusively (`Box`/`Vec`, no shared
/// nodes), so a shape tree cannot form a cycle.
#[derive(Debug, Clone)]
pub enum Kind {
    /// UTF-8 string scalar.
    String,
    /// Any numeric value.
    Number,
    /// Numeric value with no fractional part.
    Integer,
    /// Boolean scalar.
    Boolean,
    /// No innate type constraint.
    Any,
    /// Homogeneous list; every element validates against one shape.
    Array(Box<Shape>),
    /// Fixed property map, optionally extended by a dictionary.
    Object {
        /// Declared properties in declaration order.
        properties: Vec<Property>,
        /// Fallback shapes for property names not declared above.
        dictionary: Option<Box<Dictionary>>,
    },
    /// Ordered alternatives; the first that validates wins.
    Union(Vec<Shape>),
}

impl Kind {
    /// Short kind name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Any => "any",
            Kind::Array(_) => "array",
            Kind::Object { .. } => "object",
            Kind::Union(_) => "union",
        }
    }
}

/// One declared property of an object shape.
#[derive(Debug, Clone)]
pub struct Property {
    /// Property name, unique within the owning object.
    pub name: String,
    /// Shape the property's value must satisfy.
    pub shape: Shape,
}

/// Fallback validation for object properties that are not declared.
///
/// The key shape validates the property *name*, the value shape the
/// property's value.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Shape for undeclared property names.
    pub key: Shape,
    /// Shape for undeclared property values.
    pub value: Shape,
}

/// Where a shape's default value comes from.
#[derive(Clone)]
pub enum DefaultSource {
    /// A literal value, deep-copied on every materialization.
    Literal(Value),
    /// A factory invoked lazily at materialization time, never at
    /// definition time.
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl fmt::Debug for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSource::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultSource::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// One node in a schema tree.
///
/// Built with the kind constructors ([`string`](Shape::string),
/// [`object`](Shape::object), …) and refined with fluent builders that each
/// take and return the shape. Builder misuse — a kind-inappropriate
/// modifier, a malformed bound, an invalid default — is a programmer error
/// and panics at definition time; validating a candidate value never
/// panics.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use value_schema_core::Shape;
///
/// let level = Shape::string(Some("E_LEVEL"))
///     .values(vec![json!("debug"), json!("info"), json!("warn")], None)
///     .with_default(json!("info"));
///
/// assert!(level.validate(&json!("warn")).is_ok());
/// let err = level.validate(&json!("trace")).unwrap_err();
/// assert!(err.message().contains("must be one of"));
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    kind: Kind,
    constraints: Vec<Constraint>,
    optional: bool,
    default: Option<DefaultSource>,
    code: Option<String>,
    compiled: OnceLock<Arc<CompiledCheck>>,
}

impl Shape {
    fn new(kind: Kind, code: Option<&str>) -> Self {
        Self {
            kind,
            constraints: Vec::new(),
            optional: false,
            default: None,
            code: code.map(String::from),
            compiled: OnceLock::new(),
        }
    }

    /// Declares a string shape.
    ///
    /// The optional `code` is attached to the innate type check and to the
    /// presence check of a required shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let name = Shape::string(None);
    /// assert!(name.validate(&json!("ok")).is_ok());
    /// assert!(name.validate(&json!(42)).is_err());
    /// ```
    pub fn string(code: Option<&str>) -> Self {
        Shape::new(Kind::String, code).push(Constraint::new(
            "is a string",
            Value::is_string,
            "%name must be a string, got %type",
            code,
        ))
    }

    /// Declares a numeric shape.
    pub fn number(code: Option<&str>) -> Self {
        Shape::new(Kind::Number, code).push(Constraint::new(
            "is a number",
            Value::is_number,
            "%name must be a number, got %type",
            code,
        ))
    }

    /// Declares an integer shape: a number with no fractional part.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let count = Shape::integer(None);
    /// assert!(count.validate(&json!(3)).is_ok());
    /// assert!(count.validate(&json!(3.0)).is_ok());
    /// assert!(count.validate(&json!(3.5)).is_err());
    /// ```
    pub fn integer(code: Option<&str>) -> Self {
        Shape::new(Kind::Integer, code).push(Constraint::new(
            "is an integer",
            is_integral,
            "%name must be an integer, got %value",
            code,
        ))
    }

    /// Declares a boolean shape.
    pub fn boolean(code: Option<&str>) -> Self {
        Shape::new(Kind::Boolean, code).push(Constraint::new(
            "is a boolean",
            Value::is_boolean,
            "%name must be a boolean, got %type",
            code,
        ))
    }

    /// Declares a shape with no innate type constraint.
    pub fn any() -> Self {
        Shape::new(Kind::Any, None)
    }

    /// Declares an array shape; every element validates against `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let ports = Shape::array(Shape::integer(None), None);
    /// assert!(ports.validate(&json!([80, 443])).is_ok());
    ///
    /// let err = ports.validate(&json!([80, "x"])).unwrap_err();
    /// assert_eq!(err.path().to_string(), "[1]");
    /// ```
    pub fn array(element: Shape, code: Option<&str>) -> Self {
        Shape::new(Kind::Array(Box::new(element)), code).push(Constraint::new(
            "is an array",
            Value::is_array,
            "%name must be an array, got %type",
            code,
        ))
    }

    /// Declares an object shape with no properties yet.
    ///
    /// Add declared properties with [`property`](Self::property); property
    /// names not declared are rejected unless a
    /// [`dictionary`](Self::dictionary) extension is configured.
    pub fn object(code: Option<&str>) -> Self {
        Shape::new(
            Kind::Object {
                properties: Vec::new(),
                dictionary: None,
            },
            code,
        )
        .push(Constraint::new(
            "is an object",
            Value::is_object,
            "%name must be an object, got %type",
            code,
        ))
    }

    /// Declares a union shape over ordered alternatives.
    ///
    /// Validation tries alternatives in declaration order and accepts the
    /// first that passes. When every alternative fails, the error from the
    /// *last* attempted alternative is surfaced, which suits the convention
    /// of listing the most specific alternative last.
    ///
    /// # Panics
    ///
    /// Panics when `alternatives` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let id = Shape::union(vec![Shape::integer(None), Shape::string(None)]);
    /// assert!(id.validate(&json!(7)).is_ok());
    /// assert!(id.validate(&json!("abc-7")).is_ok());
    /// assert!(id.validate(&json!(true)).is_err());
    /// ```
    pub fn union(alternatives: Vec<Shape>) -> Self {
        assert!(
            !alternatives.is_empty(),
            "union shapes need at least one alternative"
        );
        Shape::new(Kind::Union(alternatives), None)
    }

    /// Marks the shape optional: an absent value (missing or `null`) passes
    /// without evaluating any other constraint.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.invalidate();
        self
    }

    /// Declares a literal default value.
    ///
    /// The value is validated against the constraints declared so far,
    /// immediately — an invalid default is a definition error, not a latent
    /// validation failure. Array defaults are deep-copied on every
    /// materialization, so mutating a materialized value never corrupts the
    /// stored default.
    ///
    /// # Panics
    ///
    /// Panics when the value has the wrong kind for this shape (scalar
    /// shapes take scalar defaults, array shapes array defaults; object and
    /// union shapes materialize defaults from their members) or violates
    /// the constraints declared so far.
    pub fn with_default(mut self, value: Value) -> Self {
        match &self.kind {
            Kind::String | Kind::Number | Kind::Integer | Kind::Boolean => {
                assert!(
                    !value.is_array() && !value.is_object(),
                    "{} shapes take scalar defaults, got {}",
                    self.kind.name(),
                    type_name(&value)
                );
            }
            Kind::Array(_) => {
                assert!(
                    value.is_array(),
                    "array shapes take array defaults, got {}",
                    type_name(&value)
                );
            }
            Kind::Any => {}
            Kind::Object { .. } | Kind::Union(_) => {
                panic!(
                    "{} shapes materialize defaults from their members",
                    self.kind.name()
                );
            }
        }
        if let Err(err) = self.validate(&value) {
            panic!("default value violates the declared constraints: {err}");
        }
        self.default = Some(DefaultSource::Literal(value));
        self.invalidate();
        self
    }

    /// Declares a deferred default factory.
    ///
    /// The factory is invoked lazily each time a default is materialized and
    /// never at definition time, so side-effecting factories are safe to
    /// declare during setup. Its output is not eagerly validated.
    ///
    /// # Panics
    ///
    /// Panics for object and union shapes, which materialize defaults from
    /// their members.
    pub fn with_default_fn(mut self, factory: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        assert!(
            !matches!(self.kind, Kind::Object { .. } | Kind::Union(_)),
            "{} shapes materialize defaults from their members",
            self.kind.name()
        );
        self.default = Some(DefaultSource::Factory(Arc::new(factory)));
        self.invalidate();
        self
    }

    /// Constrains length (strings, arrays, objects) between `min` and `max`.
    ///
    /// Delegates to [`min`](Self::min) and [`max`](Self::max), skipping a
    /// bound at its neutral value (`0` / `f64::INFINITY`).
    ///
    /// # Panics
    ///
    /// Panics for kinds without a length, or on non-integer bounds.
    pub fn length(self, min: f64, max: f64, code: Option<&str>) -> Self {
        assert!(
            matches!(self.kind, Kind::String | Kind::Array(_) | Kind::Object { .. }),
            "length constraints are not supported for {} shapes",
            self.kind.name()
        );
        let mut shape = self;
        if min != 0.0 {
            shape = shape.min(min, code);
        }
        if max != f64::INFINITY {
            shape = shape.max(max, code);
        }
        shape
    }

    /// Constrains the lower bound.
    ///
    /// For strings, arrays, and objects this is a length bound and must be a
    /// non-negative integer. For numbers and integers it is a value bound;
    /// `f64::NEG_INFINITY` means "no bound", and integer shapes only accept
    /// integral bounds.
    ///
    /// # Panics
    ///
    /// Panics on a malformed bound or a kind that supports neither length
    /// nor range constraints.
    pub fn min(self, bound: f64, code: Option<&str>) -> Self {
        if matches!(self.kind, Kind::String) {
            let n = length_bound(bound, "minimum");
            return self.push(Constraint::new(
                format!("length >= {n}"),
                move |v: &Value| v.as_str().is_none_or(|s| s.chars().count() >= n),
                format!("%name is too short: length %length, minimum {n}"),
                code,
            ));
        }
        if matches!(self.kind, Kind::Array(_)) {
            let n = length_bound(bound, "minimum");
            return self.push(Constraint::new(
                format!("has at least {n} elements"),
                move |v: &Value| v.as_array().is_none_or(|items| items.len() >= n),
                format!("%name has %length elements, minimum {n}"),
                code,
            ));
        }
        if matches!(self.kind, Kind::Object { .. }) {
            let n = length_bound(bound, "minimum");
            return self.push(Constraint::new(
                format!("has at least {n} properties"),
                move |v: &Value| v.as_object().is_none_or(|map| map.len() >= n),
                format!("%name has %length properties, minimum {n}"),
                code,
            ));
        }
        if matches!(self.kind, Kind::Number | Kind::Integer) {
            if bound == f64::NEG_INFINITY {
                return self;
            }
            assert!(!bound.is_nan(), "numeric bound cannot be NaN");
            if matches!(self.kind, Kind::Integer) {
                assert!(
                    bound.is_finite() && bound.fract() == 0.0,
                    "integer shapes take integer bounds, got {bound}"
                );
            }
            return self.push(Constraint::new(
                format!(">= {bound}"),
                move |v: &Value| v.as_f64().is_none_or(|n| n >= bound),
                format!("%name is %value, minimum {bound}"),
                code,
            ));
        }
        panic!(
            "min constraints are not supported for {} shapes",
            self.kind.name()
        );
    }

    /// Constrains the upper bound; the counterpart of [`min`](Self::min).
    ///
    /// `f64::INFINITY` means "no bound" for numeric shapes.
    ///
    /// # Panics
    ///
    /// Panics on a malformed bound or a kind that supports neither length
    /// nor range constraints.
    pub fn max(self, bound: f64, code: Option<&str>) -> Self {
        if matches!(self.kind, Kind::String) {
            let n = length_bound(bound, "maximum");
            return self.push(Constraint::new(
                format!("length <= {n}"),
                move |v: &Value| v.as_str().is_none_or(|s| s.chars().count() <= n),
                format!("%name is too long: length %length, maximum {n}"),
                code,
            ));
        }
        if matches!(self.kind, Kind::Array(_)) {
            let n = length_bound(bound, "maximum");
            return self.push(Constraint::new(
                format!("has at most {n} elements"),
                move |v: &Value| v.as_array().is_none_or(|items| items.len() <= n),
                format!("%name has %length elements, maximum {n}"),
                code,
            ));
        }
        if matches!(self.kind, Kind::Object { .. }) {
            let n = length_bound(bound, "maximum");
            return self.push(Constraint::new(
                format!("has at most {n} properties"),
                move |v: &Value| v.as_object().is_none_or(|map| map.len() <= n),
                format!("%name has %length properties, maximum {n}"),
                code,
            ));
        }
        if matches!(self.kind, Kind::Number | Kind::Integer) {
            if bound == f64::INFINITY {
                return self;
            }
            assert!(!bound.is_nan(), "numeric bound cannot be NaN");
            if matches!(self.kind, Kind::Integer) {
                assert!(
                    bound.is_finite() && bound.fract() == 0.0,
                    "integer shapes take integer bounds, got {bound}"
                );
            }
            return self.push(Constraint::new(
                format!("<= {bound}"),
                move |v: &Value| v.as_f64().is_none_or(|n| n <= bound),
                format!("%name is %value, maximum {bound}"),
                code,
            ));
        }
        panic!(
            "max constraints are not supported for {} shapes",
            self.kind.name()
        );
    }

    /// Constrains a numeric shape between `min` and `max` inclusive.
    ///
    /// # Panics
    ///
    /// Panics for non-numeric kinds or malformed bounds.
    pub fn range(self, min: f64, max: f64, code: Option<&str>) -> Self {
        assert!(
            matches!(self.kind, Kind::Number | Kind::Integer),
            "range constraints are not supported for {} shapes",
            self.kind.name()
        );
        self.min(min, code).max(max, code)
    }

    /// Restricts a scalar shape to an enumerated set of values.
    ///
    /// Every enumerated value is checked against the constraints declared so
    /// far, immediately — an enumeration that contradicts earlier
    /// constraints is a definition error.
    ///
    /// # Panics
    ///
    /// Panics for composite kinds, on an empty list, or when an enumerated
    /// value violates a prior constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let format = Shape::string(None).values(vec![json!("json"), json!("yaml")], None);
    /// assert!(format.validate(&json!("yaml")).is_ok());
    /// assert!(format.validate(&json!("toml")).is_err());
    /// ```
    pub fn values(self, list: Vec<Value>, code: Option<&str>) -> Self {
        assert!(
            matches!(
                self.kind,
                Kind::String | Kind::Number | Kind::Integer | Kind::Boolean | Kind::Any
            ),
            "value enumerations are not supported for {} shapes",
            self.kind.name()
        );
        assert!(!list.is_empty(), "value enumeration cannot be empty");
        for value in &list {
            if let Some(violated) = self.first_violated(value) {
                panic!(
                    "enumerated value {value} violates `{}`",
                    violated.condition()
                );
            }
        }

        let rendered = Value::Array(list.clone()).to_string();
        let allowed = list;
        self.push(Constraint::new(
            format!("is one of {rendered}"),
            move |v: &Value| allowed.contains(v),
            format!("%name must be one of {rendered}, got %value"),
            code,
        ))
    }

    /// Constrains a string shape to match a pattern.
    ///
    /// The pattern is compiled eagerly; matching uses the pattern's own
    /// anchors (pass `^...$` for a full-string match).
    ///
    /// # Panics
    ///
    /// Panics for non-string kinds or an invalid pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let slug = Shape::string(None).regexp("^[a-z]+$", None);
    /// assert!(slug.validate(&json!("str")).is_ok());
    /// assert!(slug.validate(&json!("STR")).is_err());
    /// ```
    pub fn regexp(self, pattern: &str, code: Option<&str>) -> Self {
        assert!(
            matches!(self.kind, Kind::String),
            "regexp constraints are only supported for string shapes, not {}",
            self.kind.name()
        );
        let re = Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern /{pattern}/: {e}"));
        let rendered = pattern.to_string();
        self.push(Constraint::new(
            format!("matches /{rendered}/"),
            move |v: &Value| v.as_str().is_none_or(|s| re.is_match(s)),
            format!("%name does not match /{rendered}/, got %value"),
            code,
        ))
    }

    /// Declares a property on an object shape.
    ///
    /// Declaration order defines default-materialization and description
    /// order.
    ///
    /// # Panics
    ///
    /// Panics for non-object kinds or a duplicate property name.
    pub fn property(mut self, name: &str, shape: Shape) -> Self {
        let kind_name = self.kind.name();
        let Kind::Object { properties, .. } = &mut self.kind else {
            panic!("properties can only be declared on object shapes, not {kind_name}");
        };
        assert!(
            properties.iter().all(|p| p.name != name),
            "duplicate property `{name}`"
        );
        properties.push(Property {
            name: name.to_string(),
            shape,
        });
        self.invalidate();
        self
    }

    /// Enables the open-extension mode of an object shape.
    ///
    /// Property names not explicitly declared are then validated against
    /// `key` (the name, as a string value) and `value` instead of being
    /// rejected.
    ///
    /// # Panics
    ///
    /// Panics for non-object kinds or when a dictionary was already
    /// declared.
    pub fn dictionary(mut self, key: Shape, value: Shape) -> Self {
        let kind_name = self.kind.name();
        let Kind::Object { dictionary, .. } = &mut self.kind else {
            panic!("dictionary extensions are only supported for object shapes, not {kind_name}");
        };
        assert!(dictionary.is_none(), "dictionary extension already declared");
        *dictionary = Some(Box::new(Dictionary { key, value }));
        self.invalidate();
        self
    }

    /// Appends a custom constraint.
    ///
    /// `condition` is the design-level description used by description
    /// walks; `predicate` decides whether a present value passes; `template`
    /// may use the `%type`/`%name`/`%value`/`%length` placeholders.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use value_schema_core::Shape;
    ///
    /// let even = Shape::integer(None).with_check(
    ///     "is even",
    ///     |v| v.as_i64().is_none_or(|n| n % 2 == 0),
    ///     "%name must be even, got %value",
    ///     Some("E_ODD"),
    /// );
    /// assert!(even.validate(&json!(4)).is_ok());
    /// assert_eq!(even.validate(&json!(3)).unwrap_err().code(), Some("E_ODD"));
    /// ```
    pub fn with_check(
        self,
        condition: &str,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        template: &str,
        code: Option<&str>,
    ) -> Self {
        self.push(Constraint::new(condition, predicate, template, code))
    }

    /// The shape's kind tag and children.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Whether an absent value passes this shape.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The declared constraints in declaration order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub(crate) fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub(crate) fn default_source(&self) -> Option<&DefaultSource> {
        self.default.as_ref()
    }

    /// Returns the cached compiled check, compiling it on first use after a
    /// builder call. The `OnceLock` makes racing first validations compute
    /// the check exactly once.
    pub(crate) fn compiled_check(&self) -> Arc<CompiledCheck> {
        self.compiled
            .get_or_init(|| {
                Arc::new(CompiledCheck::compile(
                    self.optional,
                    self.code.as_deref(),
                    &self.constraints,
                ))
            })
            .clone()
    }

    fn push(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self.invalidate();
        self
    }

    fn invalidate(&mut self) {
        self.compiled = OnceLock::new();
    }

    fn first_violated(&self, value: &Value) -> Option<&Constraint> {
        self.constraints.iter().find(|c| !c.holds(value))
    }
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

fn length_bound(bound: f64, what: &str) -> usize {
    assert!(
        bound.is_finite() && bound.fract() == 0.0 && bound >= 0.0,
        "{what} length bound must be a non-negative integer, got {bound}"
    );
    bound as usize
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_constructor_code_lands_on_type_check() {
        let shape = Shape::string(Some("E_STR"));
        let err = shape.validate(&json!(1)).unwrap_err();
        assert_eq!(err.code(), Some("E_STR"));
    }

    #[test]
    fn test_builder_call_invalidates_compiled_check() {
        let shape = Shape::string(None);
        assert!(shape.validate(&json!("abcdef")).is_ok());

        // The compiled check is cached now; a further builder call must
        // recompute it.
        let shape = shape.max(3.0, None);
        assert!(shape.validate(&json!("abcdef")).is_err());
        assert!(shape.validate(&json!("abc")).is_ok());
    }

    #[test]
    #[should_panic(expected = "non-negative integer")]
    fn test_non_integer_length_bound_is_definition_error() {
        let _ = Shape::string(None).min(1.5, None);
    }

    #[test]
    #[should_panic(expected = "value enumeration cannot be empty")]
    fn test_empty_enumeration_is_definition_error() {
        let _ = Shape::string(None).values(vec![], None);
    }

    #[test]
    #[should_panic(expected = "violates")]
    fn test_enumerated_values_checked_against_prior_constraints() {
        let _ = Shape::string(None)
            .max(2.0, None)
            .values(vec![json!("toolong")], None);
    }

    #[test]
    #[should_panic(expected = "scalar defaults")]
    fn test_object_default_on_scalar_is_definition_error() {
        let _ = Shape::string(None).with_default(json!({"not": "scalar"}));
    }

    #[test]
    #[should_panic(expected = "default value violates")]
    fn test_default_validated_eagerly() {
        let _ = Shape::string(None)
            .max(2.0, None)
            .with_default(json!("toolong"));
    }

    #[test]
    fn test_default_factory_not_invoked_at_definition_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let shape = Shape::string(None).with_default_fn(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            json!("lazy")
        });
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        assert_eq!(shape.materialize_default(), json!("lazy"));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[should_panic(expected = "only supported for string shapes")]
    fn test_regexp_on_number_is_definition_error() {
        let _ = Shape::number(None).regexp("^[0-9]+$", None);
    }

    #[test]
    #[should_panic(expected = "invalid pattern")]
    fn test_invalid_pattern_is_definition_error() {
        let _ = Shape::string(None).regexp("(unclosed", None);
    }

    #[test]
    #[should_panic(expected = "duplicate property")]
    fn test_duplicate_property_is_definition_error() {
        let _ = Shape::object(None)
            .property("a", Shape::any())
            .property("a", Shape::any());
    }

    #[test]
    #[should_panic(expected = "at least one alternative")]
    fn test_empty_union_is_definition_error() {
        let _ = Shape::union(vec![]);
    }

    #[test]
    fn test_infinite_numeric_bounds_add_no_constraint() {
        let before = Shape::number(None).constraints().len();
        let shape = Shape::number(None).range(f64::NEG_INFINITY, f64::INFINITY, None);
        assert_eq!(shape.constraints().len(), before);
    }

    #[test]
    fn test_shape_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Shape>();
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Shape::any().kind().name(), "any");
        assert_eq!(Shape::array(Shape::any(), None).kind().name(), "array");
        assert_eq!(Shape::union(vec![Shape::any()]).kind().name(), "union");
    }
}
