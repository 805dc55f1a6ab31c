use thiserror::Error;

/// Failure to read the bracket notation. Positions are byte offsets into the input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Unexpected character {found:?} at {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("Expected a label at {position}")]
    EmptyLabel { position: usize },
    #[error("Trailing input at {position}")]
    TrailingInput { position: usize },
}
