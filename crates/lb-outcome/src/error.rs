//! Error types for the outcome crate.

use std::fmt;

use lb_core::Identifier;
use lb_template::TemplateError;
use thiserror::Error;

/// Result type for outcome operations.
pub type OutcomeResult<T> = Result<T, OutcomeError>;

/// One of the two registry partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Outcomes eligible for luck-weighted random draws.
    Random,
    /// Outcomes reachable only by exact identifier.
    Nonrandom,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Nonrandom => write!(f, "nonrandom"),
        }
    }
}

/// Errors raised while loading, selecting, resolving or looking up outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutcomeError {
    /// No definitions are loaded where the operation needs them. `None` means
    /// both partitions are empty.
    #[error("no outcomes loaded{}", scope(.0))]
    RegistryEmpty(Option<Partition>),

    /// No definition with this identifier exists in either partition.
    #[error("outcome '{0}' does not exist")]
    UnknownIdentifier(Identifier),

    /// A definition is missing a required field or has one of the wrong type.
    #[error("malformed outcome '{id}': {reason}")]
    MalformedDefinition {
        /// The definition's identifier.
        id: Identifier,
        /// What is wrong with it.
        reason: String,
    },

    /// Template resolution failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

fn scope(partition: &Option<Partition>) -> String {
    partition
        .map(|p| format!(" in the {p} partition"))
        .unwrap_or_default()
}

impl OutcomeError {
    pub(crate) fn malformed(id: &Identifier, reason: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            id: id.clone(),
            reason: reason.into(),
        }
    }
}
