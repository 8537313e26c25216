//! Error types for schema construction, value decoding, and parsing.
//!
//! Parse failures are never recoverable: the first error aborts the whole
//! dispatch chain and is returned to the caller of
//! [`OptionParser::parse`](crate::OptionParser::parse). The `Display` impl of
//! every variant is the user-facing message.

use thiserror::Error;

/// Failure to decode a raw string into a typed value.
///
/// Produced by [`OptionValue`](crate::OptionValue) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not one of the accepted boolean spellings.
    #[error("Invalid boolean value: '{0}'")]
    InvalidBoolean(String),
    /// Not a base-10 integer in range of the target type.
    #[error("Invalid integer value: '{0}'")]
    InvalidInteger(String),
    /// Not a decimal or infinity literal.
    #[error("Invalid floating point value: '{0}'")]
    InvalidFloat(String),
    /// Not one of the known labels of an enumeration.
    #[error("Invalid value: '{0}'")]
    InvalidValue(String),
}

/// Errors surfaced by a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No option with this name exists in the active node. Carries the
    /// original argument text.
    #[error("Unknown option {0}")]
    UnknownOption(String),

    /// An inline value was given to a flag.
    #[error("Unexpected value '{value}' for option -{option}")]
    UnexpectedValue { option: String, value: String },

    /// A value option without a default was given no inline value.
    #[error("Option -{0} requires a value")]
    MissingValue(String),

    /// A supplied value failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Fewer positional arguments than required parameters.
    #[error("Missing argument for {0}")]
    MissingArgument(String),

    /// More positional arguments than the parameters can absorb.
    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    /// `help <name>` named a command that does not exist.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Failure reported by a user-supplied action.
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    /// Creates an error carrying an arbitrary message, for use in actions.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Structural problems found while building a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An option was declared with an empty name.
    #[error("option name cannot be empty")]
    EmptyOptionName,
    /// Two options in the same node share a name.
    #[error("duplicate option in scope: {0}")]
    DuplicateOption(String),
    /// A node declared positional parameters and subcommands.
    #[error("{0} cannot declare both positional parameters and subcommands")]
    ParametersWithCommands(String),
    /// A node declared a second repeating parameter.
    #[error("{node} declares more than one repeating parameter: {metavariable}")]
    MultipleRepeating { node: String, metavariable: String },
    /// A command was declared with an empty name.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two commands in the same node share a name.
    #[error("duplicate command in scope: {0}")]
    DuplicateCommand(String),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
