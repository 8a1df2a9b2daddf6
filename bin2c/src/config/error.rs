//! Errors raised while validating encoder options.

/// Configuration error variants.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The line width must be a positive number of encoded units.
    #[error("The line width must be greater than zero, got {0}")]
    InvalidLineWidth(i64),

    /// The variable name of the declaration cannot be empty.
    #[error("The variable name cannot be empty")]
    EmptyVariableName,

    /// An option was set that the selected output format does not support.
    #[error("The `{option}` option cannot be used with the {format} output format")]
    IncompatibleOption {
        /// The offending option.
        option: &'static str,
        /// The selected output format.
        format: &'static str,
    },
}
