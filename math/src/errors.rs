use core::fmt;

/// Errors produced by field element operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Attempted to invert or divide by the additive identity.
    DivisionByZero,
    /// A byte slice could not be interpreted as a canonical field element.
    InvalidValue,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::DivisionByZero => write!(f, "division by zero in field"),
            FieldError::InvalidValue => write!(f, "value is not a canonical field element"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}
