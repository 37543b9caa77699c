//! The errors this mechanism can report.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Which side of a signature an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The parameter side, checked at construction time.
    In,
    /// The result side, checked at construction time.
    Out,
    /// The argument list of an invocation, checked at call time.
    Call,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::In => write!(f, "In"),
            Self::Out => write!(f, "Out"),
            Self::Call => write!(f, "Call"),
        }
    }
}

/// Everything that can go wrong constructing or invoking a dynamic function
/// wrapper.
///
/// Faults raised inside the wrapped function itself are not part of this
/// taxonomy; they propagate to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value handed to construction is not a function.
    #[error("the value is not a function")]
    NotAFunction,

    /// A declared input/output count disagrees with the expectation, or the
    /// call-site argument count disagrees with the declared parameter count.
    #[error("number of {side} values expected: {expected}, actual: {actual}")]
    ArityMismatch {
        /// The side the counts disagree on.
        side: Side,
        /// The expected count.
        expected: usize,
        /// The actual count.
        actual: usize,
    },

    /// A non-wildcard expected type disagrees with the actual type at its
    /// position.
    #[error("{side}[{index}] expected type: {expected}, actual type: {actual}")]
    TypeMismatch {
        /// The side the types disagree on.
        side: Side,
        /// The position of the disagreement.
        index: usize,
        /// The expected type at that position.
        expected: Type,
        /// The actual type at that position.
        actual: Type,
    },

    /// A call-time argument cannot be converted to its declared parameter
    /// type.
    #[error("params[{index}] of type '{actual}' is not convertible to '{declared}'")]
    NotConvertible {
        /// The position of the offending argument.
        index: usize,
        /// The runtime type of the argument.
        actual: Type,
        /// The declared parameter type.
        declared: Type,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_enough_context() {
        let err = Error::ArityMismatch {
            side: Side::In,
            expected: 1,
            actual: 2,
        };
        assert_eq!(err.to_string(), "number of In values expected: 1, actual: 2");

        let err = Error::NotConvertible {
            index: 0,
            actual: Type::Str,
            declared: Type::I32,
        };
        assert_eq!(
            err.to_string(),
            "params[0] of type 'str' is not convertible to 'i32'"
        );

        let err = Error::TypeMismatch {
            side: Side::Out,
            index: 1,
            expected: Type::List(Box::new(Type::Bool)),
            actual: Type::List(Box::new(Type::I32)),
        };
        assert_eq!(
            err.to_string(),
            "Out[1] expected type: [bool], actual type: [i32]"
        );
    }
}
