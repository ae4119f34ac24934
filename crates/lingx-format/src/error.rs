//! Error types for message parsing and formatting

use thiserror::Error;

/// Errors raised while compiling or rendering a message template.
///
/// These never cross the formatter's public boundary; the formatter logs
/// them and falls back to the original message text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The message ended in the middle of a placeholder
    #[error("Unexpected end of message at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A character that cannot appear at this point of the grammar
    #[error("Unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// An argument type other than plural/selectordinal/select/number/date/time
    #[error("Unknown argument type '{keyword}' at offset {offset}")]
    UnknownType { keyword: String, offset: usize },

    /// An unknown style word for a number/date/time argument
    #[error("Unknown {kind} style '{style}'")]
    UnknownStyle { kind: &'static str, style: String },

    /// A plural arm selector outside the CLDR category set
    #[error("Unknown plural category '{selector}' in argument '{arg}'")]
    UnknownCategory { selector: String, arg: String },

    /// plural/selectordinal/select without the mandatory `other` arm
    #[error("Missing mandatory 'other' arm in {kind} argument '{arg}'")]
    MissingOther { kind: &'static str, arg: String },

    /// The same selector appeared twice in one argument
    #[error("Duplicate arm '{selector}' in argument '{arg}'")]
    DuplicateArm { selector: String, arg: String },

    /// No value supplied for an argument that requires one
    #[error("No value provided for argument '{name}'")]
    MissingValue { name: String },

    /// A value of the wrong kind for the argument type
    #[error("Value for argument '{name}' is not {expected}")]
    WrongType { name: String, expected: &'static str },
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
