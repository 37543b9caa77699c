//! Expected signatures and one-time validation of function types.

use crate::error::{Error, Side};
use crate::types::{FunctionType, Type};

/// An expected signature, checked once against a function's actual signature
/// at [`DynFunc::new`](crate::DynFunc::new) time.
///
/// Each side is either `None` (do not check that side at all) or an ordered
/// list of type descriptors, where [`Type::Any`] matches any actual type at
/// its position. Note that `Some(vec![])` is not the same as `None`: it
/// demands exactly zero parameters or results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpectedSignature {
    params: Option<Vec<Type>>,
    results: Option<Vec<Type>>,
}

impl ExpectedSignature {
    /// Creates an expected signature from the two sides. Pass `None` to skip
    /// a side entirely.
    ///
    /// ```
    /// use dynfunc::{ExpectedSignature, Type};
    ///
    /// let expected = ExpectedSignature::new(
    ///     vec![Type::I32, Type::Any],
    ///     vec![Type::Bool],
    /// );
    /// # let _ = expected;
    /// ```
    pub fn new<P, R>(params: P, results: R) -> Self
    where
        P: Into<Option<Vec<Type>>>,
        R: Into<Option<Vec<Type>>>,
    {
        Self {
            params: params.into(),
            results: results.into(),
        }
    }

    /// An expected signature that checks nothing. Validation always passes;
    /// only the callability of the wrapped value is enforced.
    pub fn any() -> Self {
        Self::default()
    }

    /// Checks only the parameter side.
    pub fn params_only(params: Vec<Type>) -> Self {
        Self::new(params, None)
    }

    /// Checks only the result side.
    pub fn results_only(results: Vec<Type>) -> Self {
        Self::new(None, results)
    }

    /// Checks a function type against this expectation.
    ///
    /// For each supplied side, arity is checked first so that a length
    /// mismatch reports as [`Error::ArityMismatch`] rather than a misleading
    /// type error; then each non-wildcard expected type must be identical to
    /// the actual type at its position. The first mismatch wins.
    ///
    /// This check is pure and may be shared across concurrent construction
    /// attempts.
    pub fn check(&self, ty: &FunctionType) -> Result<(), Error> {
        if let Some(params) = &self.params {
            check_side(Side::In, params, ty.params())?;
        }
        if let Some(results) = &self.results {
            check_side(Side::Out, results, ty.results())?;
        }
        Ok(())
    }
}

fn check_side(side: Side, expected: &[Type], actual: &[Type]) -> Result<(), Error> {
    if expected.len() != actual.len() {
        return Err(Error::ArityMismatch {
            side,
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    for (index, (expected, actual)) in expected.iter().zip(actual).enumerate() {
        if !expected.is_any() && expected != actual {
            return Err(Error::TypeMismatch {
                side,
                index,
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty() -> FunctionType {
        FunctionType::new(vec![Type::I32, Type::Str], vec![Type::Bool])
    }

    #[test]
    fn matching_signature_passes() {
        let expected = ExpectedSignature::new(vec![Type::I32, Type::Str], vec![Type::Bool]);
        assert_eq!(expected.check(&ty()), Ok(()));
    }

    #[test]
    fn wildcard_matches_any_position() {
        let expected = ExpectedSignature::new(vec![Type::Any, Type::Any], vec![Type::Any]);
        assert_eq!(expected.check(&ty()), Ok(()));
    }

    #[test]
    fn arity_is_checked_before_types() {
        // One expected parameter against two actual ones must report arity,
        // not a type mismatch at index 0.
        let expected = ExpectedSignature::params_only(vec![Type::Bool]);
        assert_eq!(
            expected.check(&ty()),
            Err(Error::ArityMismatch {
                side: Side::In,
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn first_type_mismatch_wins() {
        let expected = ExpectedSignature::params_only(vec![Type::Bool, Type::F64]);
        assert_eq!(
            expected.check(&ty()),
            Err(Error::TypeMismatch {
                side: Side::In,
                index: 0,
                expected: Type::Bool,
                actual: Type::I32,
            })
        );
    }

    #[test]
    fn identity_not_convertibility() {
        // i64 is convertible to i32 at call time, but validation demands
        // exact identity.
        let expected = ExpectedSignature::params_only(vec![Type::I64, Type::Str]);
        assert!(matches!(
            expected.check(&ty()),
            Err(Error::TypeMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn result_side_reports_out() {
        let expected = ExpectedSignature::results_only(vec![Type::I32]);
        assert_eq!(
            expected.check(&ty()),
            Err(Error::TypeMismatch {
                side: Side::Out,
                index: 0,
                expected: Type::I32,
                actual: Type::Bool,
            })
        );
    }

    #[test]
    fn omitted_side_is_not_empty_side() {
        // None skips the side entirely.
        assert_eq!(ExpectedSignature::any().check(&ty()), Ok(()));
        // An explicit empty side demands zero entries.
        let expected = ExpectedSignature::new(Vec::new(), None);
        assert_eq!(
            expected.check(&ty()),
            Err(Error::ArityMismatch {
                side: Side::In,
                expected: 0,
                actual: 2,
            })
        );
    }
}
