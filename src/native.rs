//! Conversion between native Rust types and loosely-typed [`Value`]s.
//!
//! `NativeType` is the capability a concrete Rust type needs to appear in a
//! dynamic function signature. `TypeList` lifts it to tuples so host
//! functions can take several parameters and return several results.

use crate::function::Function;
use crate::types::Type;
use crate::values::Value;

/// A native Rust type that can appear in a dynamic function signature.
///
/// Implementing this trait fixes the [`Type`] descriptor of the type and the
/// conversions between it and [`Value`]. A parameter of type [`Value`] itself
/// is the wildcard: it types as [`Type::Any`] and receives the caller's
/// argument unconverted.
pub trait NativeType: Sized + Send + Sync + 'static {
    /// The type descriptor of this type.
    fn ty() -> Type;

    /// Extracts `Self` from a value of exactly this type.
    fn from_value(value: Value) -> Option<Self>;

    /// Boxes `self` back into a loosely-typed value.
    fn into_value(self) -> Value;
}

macro_rules! impl_native_type {
    ($(($ty:ty, $variant:ident, $descriptor:ident))*) => ($(
        impl NativeType for $ty {
            fn ty() -> Type {
                Type::$descriptor
            }

            fn from_value(value: Value) -> Option<Self> {
                if let Value::$variant(v) = value {
                    Some(v)
                } else {
                    None
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    )*)
}

impl_native_type! {
    (i32, I32, I32)
    (i64, I64, I64)
    (f32, F32, F32)
    (f64, F64, F64)
    (bool, Bool, Bool)
    (String, Str, Str)
    (Function, Func, Func)
}

impl<T: NativeType> NativeType for Vec<T> {
    fn ty() -> Type {
        Type::List(Box::new(T::ty()))
    }

    fn from_value(value: Value) -> Option<Self> {
        if let Value::List(items) = value {
            items.into_iter().map(T::from_value).collect()
        } else {
            None
        }
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(T::into_value).collect())
    }
}

// A raw `Value` parameter accepts any argument; the invoker passes it
// through without conversion.
impl NativeType for Value {
    fn ty() -> Type {
        Type::Any
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }

    fn into_value(self) -> Value {
        self
    }
}

/// A tuple (list) of [`NativeType`]s, as used for the parameters and results
/// of a host function.
///
/// Implemented for `()`, for every `T: NativeType` (a one-element list), and
/// for tuples up to eight elements.
pub trait TypeList: Sized + Send + Sync + 'static {
    /// The type descriptors of the list, in order.
    fn types() -> Vec<Type>;

    /// Builds the tuple from one value per element, in order. Returns `None`
    /// on a length or type mismatch.
    fn from_values(values: Vec<Value>) -> Option<Self>;

    /// Boxes the tuple back into one value per element, in order.
    fn into_values(self) -> Vec<Value>;
}

// Black-magic to count the number of identifiers at compile-time.
macro_rules! count_idents {
    ( $($idents:ident),* ) => {
        {
            #[allow(dead_code, non_camel_case_types)]
            enum Idents { $( $idents, )* __CountIdentsLast }
            const COUNT: usize = Idents::__CountIdentsLast as usize;
            COUNT
        }
    };
}

macro_rules! impl_type_list {
    ( $( $x:ident ),* ) => {
        #[allow(unused_parens)]
        impl< $( $x ),* > TypeList for ( $( $x ),* )
        where
            $( $x: NativeType ),*
        {
            fn types() -> Vec<Type> {
                vec![ $( $x::ty() ),* ]
            }

            #[allow(non_snake_case, unused_variables, unused_mut, clippy::unused_unit)]
            fn from_values(values: Vec<Value>) -> Option<Self> {
                if values.len() != count_idents!( $( $x ),* ) {
                    return None;
                }
                let mut values = values.into_iter();
                $( let $x = $x::from_value(values.next()?)?; )*
                Some(( $( $x ),* ))
            }

            #[allow(non_snake_case, clippy::unused_unit)]
            fn into_values(self) -> Vec<Value> {
                let ( $( $x ),* ) = self;
                vec![ $( $x.into_value() ),* ]
            }
        }
    };
}

impl_type_list!();
impl_type_list!(A1);
impl_type_list!(A1, A2);
impl_type_list!(A1, A2, A3);
impl_type_list!(A1, A2, A3, A4);
impl_type_list!(A1, A2, A3, A4, A5);
impl_type_list!(A1, A2, A3, A4, A5, A6);
impl_type_list!(A1, A2, A3, A4, A5, A6, A7);
impl_type_list!(A1, A2, A3, A4, A5, A6, A7, A8);
