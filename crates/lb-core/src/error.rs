/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while parsing core value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The string is not a valid `namespace:path` identifier.
    #[error("invalid identifier \"{input}\": {reason}")]
    InvalidIdentifier {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The string is not a valid `x,y,z` vector.
    #[error("invalid vector \"{0}\": expected three comma-separated numbers")]
    InvalidVector(String),
}
