//! The validated, ready-to-call wrapper.

use tracing::trace;

use crate::error::{Error, Side};
use crate::function::Function;
use crate::native::TypeList;
use crate::types::FunctionType;
use crate::validate::ExpectedSignature;
use crate::values::Value;

/// A dynamic function wrapper: one [`Function`] whose signature passed
/// validation against an [`ExpectedSignature`].
///
/// A `DynFunc` is immutable after construction and invocation reads its
/// cached signature without mutation, so it is safe to call repeatedly and
/// from multiple threads with no coordination.
///
/// ```
/// use dynfunc::{DynFunc, ExpectedSignature, Function, Type, Value};
///
/// let value = Value::from(Function::new(|item: i32| -> bool { item > 10 }));
/// let expected = ExpectedSignature::new(vec![Type::I32], vec![Type::Bool]);
/// let wrapper = DynFunc::new(value, &expected)?;
///
/// assert_eq!(wrapper.call(&[Value::I32(15)])?, vec![Value::Bool(true)]);
/// # Ok::<(), dynfunc::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DynFunc {
    func: Function,
}

impl DynFunc {
    /// Validates `value` against `expected` and returns the ready-to-call
    /// wrapper.
    ///
    /// Fails with [`Error::NotAFunction`] if `value` is not a function, and
    /// with the validator's error if the signature does not match the
    /// expectation. On failure no wrapper is produced and the underlying
    /// function is never invoked. `expected` is only read during
    /// construction; it is not retained by the wrapper.
    pub fn new(value: Value, expected: &ExpectedSignature) -> Result<Self, Error> {
        let func = match value {
            Value::Func(func) => func,
            other => {
                trace!(actual = %other.ty(), "construction rejected: value is not a function");
                return Err(Error::NotAFunction);
            }
        };
        if let Err(err) = expected.check(func.ty()) {
            trace!(ty = %func.ty(), %err, "signature validation failed");
            return Err(err);
        }
        Ok(Self { func })
    }

    /// The cached signature of the wrapped function.
    pub fn ty(&self) -> &FunctionType {
        self.func.ty()
    }

    /// Re-wraps the inner function as a [`Value`], e.g. to put it back into
    /// a dispatch table.
    pub fn into_value(self) -> Value {
        Value::Func(self.func)
    }

    /// Calls the wrapped function with loosely-typed arguments.
    ///
    /// The argument count must equal the declared parameter count. Each
    /// argument is then checked in order: a parameter declared as the
    /// wildcard receives the argument unconverted; otherwise the argument
    /// must be convertible to the declared type or the call fails with
    /// [`Error::NotConvertible`] before any invocation happens. Only once
    /// every argument has been converted is the function invoked,
    /// synchronously, on the caller's thread.
    ///
    /// Results come back as one [`Value`] per declared result, in order.
    /// Panics raised inside the wrapped function propagate unchanged.
    pub fn call(&self, params: &[Value]) -> Result<Vec<Value>, Error> {
        let declared = self.func.ty().params();
        if params.len() != declared.len() {
            return Err(Error::ArityMismatch {
                side: Side::Call,
                expected: declared.len(),
                actual: params.len(),
            });
        }
        let mut args = Vec::with_capacity(params.len());
        for (index, (param, ty)) in params.iter().zip(declared).enumerate() {
            match param.convert(ty) {
                Some(arg) => args.push(arg),
                None => {
                    trace!(index, actual = %param.ty(), declared = %ty, "argument not convertible");
                    return Err(Error::NotConvertible {
                        index,
                        actual: param.ty(),
                        declared: ty.clone(),
                    });
                }
            }
        }
        Ok(self.func.run(args))
    }

    /// Like [`call`](Self::call), but extracts the results into native Rust
    /// types.
    ///
    /// `Rets` must match the declared result types exactly; a disagreement
    /// reports as [`Error::ArityMismatch`] or [`Error::TypeMismatch`] on the
    /// `Out` side.
    ///
    /// ```
    /// use dynfunc::{DynFunc, ExpectedSignature, Function, Value};
    ///
    /// let value = Value::from(Function::new(|i: i32| -> i32 { i * 3 }));
    /// let tripler = DynFunc::new(value, &ExpectedSignature::any())?;
    ///
    /// let tripled: i32 = tripler.call_typed(&[Value::I32(3)])?;
    /// assert_eq!(tripled, 9);
    /// # Ok::<(), dynfunc::Error>(())
    /// ```
    pub fn call_typed<Rets: TypeList>(&self, params: &[Value]) -> Result<Rets, Error> {
        let declared = self.func.ty().results();
        let requested = Rets::types();
        if requested.len() != declared.len() {
            return Err(Error::ArityMismatch {
                side: Side::Out,
                expected: requested.len(),
                actual: declared.len(),
            });
        }
        for (index, (requested, declared)) in requested.iter().zip(declared).enumerate() {
            if !requested.is_any() && requested != declared {
                return Err(Error::TypeMismatch {
                    side: Side::Out,
                    index,
                    expected: requested.clone(),
                    actual: declared.clone(),
                });
            }
        }
        let results = self.call(params)?;
        let Some(rets) = Rets::from_values(results) else {
            unreachable!("results were checked against the declared types")
        };
        Ok(rets)
    }
}
