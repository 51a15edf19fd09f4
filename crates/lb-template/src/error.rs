//! Error types for template resolution.

use thiserror::Error;

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while resolving a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{placeholder}` names no known parameter.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// A function was called with the wrong arity or unusable arguments.
    #[error("malformed call to {function}(): {reason}")]
    MalformedFunctionCall {
        /// The function name.
        function: String,
        /// What was wrong with the call.
        reason: String,
    },

    /// An arithmetic expression could not be parsed or produced a non-finite value.
    #[error("cannot evaluate \"{expression}\": {reason}")]
    ExpressionEvaluation {
        /// The offending expression text.
        expression: String,
        /// Why evaluation failed.
        reason: String,
    },
}

impl TemplateError {
    pub(crate) fn call(function: &str, reason: impl Into<String>) -> Self {
        Self::MalformedFunctionCall {
            function: function.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn expression(expression: &str, reason: impl Into<String>) -> Self {
        Self::ExpressionEvaluation {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
