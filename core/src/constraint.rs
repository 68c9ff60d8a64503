//! Constraints and the compile-once check they fold into.
//!
//! Every shape accumulates an ordered list of [`Constraint`]s. The first
//! `validate` call after a builder mutation folds the list (prefixed by the
//! presence decision) into a single [`CompiledCheck`] that is cached on the
//! shape and reused until the next mutation. Compilation is purely a
//! performance measure: evaluating the list directly produces identical
//! results.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationError;

/// Message template for the synthetic presence check on required shapes.
pub(crate) const REQUIRED_TEMPLATE: &str = "%name is required";

/// Failure-condition description for the synthetic presence check.
pub(crate) const REQUIRED_CONDITION: &str = "is present";

/// A named predicate attached to a shape.
///
/// Holds a design-level description of the failure condition (used by
/// description walks), a boolean predicate over the candidate value, a
/// message template, and an optional machine-readable code.
#[derive(Clone)]
pub struct Constraint {
    condition: String,
    template: String,
    code: Option<String>,
    predicate: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Constraint {
    pub(crate) fn new(
        condition: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        template: impl Into<String>,
        code: Option<&str>,
    ) -> Self {
        Self {
            condition: condition.into(),
            template: template.into(),
            code: code.map(String::from),
            predicate: Arc::new(predicate),
        }
    }

    /// Design-level description of what the predicate requires.
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// The failure message template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The machine-readable code, if one was supplied.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Evaluates the predicate against a present value.
    pub(crate) fn holds(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    /// Builds the error raised when this constraint fails on `value`.
    pub(crate) fn fail(&self, value: &Value) -> ValidationError {
        ValidationError::new(&self.template, value.clone(), self.code.as_deref())
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("condition", &self.condition)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

/// Compile-once artifact for one shape's constraint list.
///
/// Snapshots the optional flag, the shape's innate code, and the constraint
/// list at compile time. Evaluation order is fixed: the presence decision
/// first, then every constraint in declaration order, short-circuiting on the
/// first failure.
#[derive(Debug, Clone)]
pub(crate) struct CompiledCheck {
    optional: bool,
    code: Option<String>,
    constraints: Vec<Constraint>,
}

impl CompiledCheck {
    pub(crate) fn compile(optional: bool, code: Option<&str>, constraints: &[Constraint]) -> Self {
        Self {
            optional,
            code: code.map(String::from),
            constraints: constraints.to_vec(),
        }
    }

    /// Runs the check.
    ///
    /// `None` and `Value::Null` both mean *absent*. Returns `Ok(Some(value))`
    /// when the value is present and passed every constraint (composite
    /// shapes then descend into children), `Ok(None)` when an optional value
    /// is absent, and the first failing constraint's error otherwise.
    pub(crate) fn run<'a>(
        &self,
        value: Option<&'a Value>,
    ) -> Result<Option<&'a Value>, ValidationError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            if self.optional {
                return Ok(None);
            }
            return Err(ValidationError::new(
                REQUIRED_TEMPLATE,
                Value::Null,
                self.code.as_deref(),
            ));
        };

        for constraint in &self.constraints {
            if !constraint.holds(value) {
                return Err(constraint.fail(value));
            }
        }
        Ok(Some(value))
    }
}
