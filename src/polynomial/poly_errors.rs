use std::fmt;
use strum_macros::Display;

/// Kind of failure, for callers that only need to tell the cases apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    Format,
    InvalidOperand,
    DivisionByZero,
}

/// Error types of the polynomial engine
#[derive(Debug, Clone, PartialEq)]
pub enum PolyError {
    /// malformed or empty polynomial text, raised by the parser only
    Format(String),
    /// an operand of a binary operation could not be obtained
    InvalidOperand(String),
    /// divisor is empty or has no non-zero leading term
    DivisionByZero(String),
}

impl PolyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolyError::Format(_) => ErrorKind::Format,
            PolyError::InvalidOperand(_) => ErrorKind::InvalidOperand,
            PolyError::DivisionByZero(_) => ErrorKind::DivisionByZero,
        }
    }

    /// human-readable cause without the kind prefix
    pub fn cause(&self) -> &str {
        match self {
            PolyError::Format(msg)
            | PolyError::InvalidOperand(msg)
            | PolyError::DivisionByZero(msg) => msg,
        }
    }
}

impl fmt::Display for PolyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolyError::Format(msg) => write!(f, "Invalid polynomial format: {}", msg),
            PolyError::InvalidOperand(msg) => write!(f, "Invalid operand: {}", msg),
            PolyError::DivisionByZero(msg) => write!(f, "Division by zero polynomial: {}", msg),
        }
    }
}

impl std::error::Error for PolyError {}
