use thiserror::Error;

/// Errors raised by column selection, channel construction, and lookup.
///
/// Everything here is synchronous: the error surfaces at the offending call,
/// with no partial-success state left behind.
#[derive(Debug, Error)]
pub enum DataError {
    /// A selected column could not be read as numeric or datetime data.
    #[error("column '{column}' cannot be interpreted as numeric or datetime")]
    MalformedColumn { column: String },

    /// A vector's length disagrees with the channel's row count.
    #[error("'{dimension}' has {actual} values but {expected} were expected")]
    DimensionMismatch {
        dimension: String,
        expected: usize,
        actual: usize,
    },

    /// Positional channel lookup past the end of the set.
    #[error("channel index {index} out of range for a set of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Name-based channel lookup found no match.
    #[error("no channel named '{name}'")]
    ChannelNotFound { name: String },

    /// A selected column name is absent from the source table.
    #[error("no column named '{name}' in the table")]
    UnknownColumn { name: String },
}
