//! Host function wrapping and signature extraction.

use std::fmt;
use std::sync::Arc;

use crate::native::{NativeType, TypeList};
use crate::types::FunctionType;
use crate::values::Value;

/// A function value: an erased callable plus its cached signature.
///
/// The signature is derived once, at construction, from the Rust type of the
/// wrapped closure; it is immutable for the lifetime of the `Function`.
/// Cloning is cheap (the callable is shared).
///
/// A `Function` is not callable directly: it first has to pass validation
/// through [`DynFunc::new`](crate::DynFunc::new), which is also where
/// call-time argument checking lives.
#[derive(Clone)]
pub struct Function {
    ty: FunctionType,
    runner: Arc<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>,
}

impl Function {
    /// Wraps a Rust closure or function as a `Function`, deriving its
    /// signature from the parameter and return types.
    ///
    /// ```
    /// use dynfunc::{Function, Type};
    ///
    /// let f = Function::new(|item: i32| -> bool { item > 10 });
    /// assert_eq!(f.ty().params(), &[Type::I32]);
    /// assert_eq!(f.ty().results(), &[Type::Bool]);
    /// ```
    pub fn new<F, Args, Rets>(func: F) -> Self
    where
        F: HostFunction<Args, Rets>,
    {
        Self {
            ty: func.function_type(),
            runner: Arc::new(move |args| func.call_erased(args)),
        }
    }

    /// The cached signature of this function.
    pub fn ty(&self) -> &FunctionType {
        &self.ty
    }

    /// Runs the underlying callable. Arguments must already be converted to
    /// the declared parameter types.
    pub(crate) fn run(&self, args: Vec<Value>) -> Vec<Value> {
        (self.runner)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Function({})", self.ty)
    }
}

/// The trait implemented by Rust closures and functions that can be wrapped
/// by [`Function::new`].
///
/// Implemented for `Fn` values of arity 0 through 8 whose parameter types are
/// [`NativeType`]s and whose return type is a [`TypeList`] (`()`, a single
/// native type, or a tuple of them).
pub trait HostFunction<Args, Rets>: Send + Sync + 'static {
    /// Derives the signature from the Rust function type.
    fn function_type(&self) -> FunctionType;

    /// Calls the function with arguments already converted to the declared
    /// parameter types, boxing the results back into values.
    fn call_erased(&self, args: Vec<Value>) -> Vec<Value>;
}

macro_rules! impl_host_function {
    ( $( $x:ident ),* ) => {
        #[allow(unused_parens)]
        impl< $( $x, )* Rets, Func > HostFunction<( $( $x ),* ), Rets> for Func
        where
            $( $x: NativeType, )*
            Rets: TypeList,
            Func: Fn( $( $x ),* ) -> Rets + Send + Sync + 'static,
        {
            fn function_type(&self) -> FunctionType {
                FunctionType::new(vec![ $( $x::ty() ),* ], Rets::types())
            }

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn call_erased(&self, args: Vec<Value>) -> Vec<Value> {
                let mut args = args.into_iter();
                $(
                    let Some($x) = args.next().and_then($x::from_value) else {
                        unreachable!("arguments are checked and converted before dispatch")
                    };
                )*
                self( $( $x ),* ).into_values()
            }
        }
    };
}

impl_host_function!();
impl_host_function!(A1);
impl_host_function!(A1, A2);
impl_host_function!(A1, A2, A3);
impl_host_function!(A1, A2, A3, A4);
impl_host_function!(A1, A2, A3, A4, A5);
impl_host_function!(A1, A2, A3, A4, A5, A6);
impl_host_function!(A1, A2, A3, A4, A5, A6, A7);
impl_host_function!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    #[test]
    fn signature_is_derived_from_the_closure_type() {
        let f = Function::new(|_idx: i32, _item: String| {});
        assert_eq!(f.ty().params(), &[Type::I32, Type::Str]);
        assert_eq!(f.ty().results(), &[]);

        let g = Function::new(|items: Vec<i32>| -> bool { !items.is_empty() });
        assert_eq!(g.ty().params(), &[Type::List(Box::new(Type::I32))]);
        assert_eq!(g.ty().results(), &[Type::Bool]);
    }

    #[test]
    fn value_parameters_type_as_any() {
        let f = Function::new(|_: Value| {});
        assert_eq!(f.ty().params(), &[Type::Any]);
    }

    #[test]
    fn multi_result_functions() {
        let f = Function::new(|a: i32, b: i32| -> (i32, i32) { (b, a) });
        assert_eq!(f.ty().results(), &[Type::I32, Type::I32]);
        assert_eq!(
            f.run(vec![Value::I32(1), Value::I32(2)]),
            vec![Value::I32(2), Value::I32(1)]
        );
    }

    #[test]
    fn zero_arity_functions() {
        let f = Function::new(|| -> i64 { 40 + 2 });
        assert_eq!(f.ty().params(), &[]);
        assert_eq!(f.run(vec![]), vec![Value::I64(42)]);
    }
}
