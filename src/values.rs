//! Loosely-typed values passed in and out of dynamic functions.

use std::convert::TryFrom;
use std::fmt;

use crate::function::Function;
use crate::types::Type;

/// A loosely-typed value.
///
/// Arguments to [`DynFunc::call`](crate::DynFunc::call) and the results it
/// produces are `Value`s. A `Value` can also hold a [`Function`], which is
/// how a caller keeps functions as opaque entries in a heterogeneous table.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 32-bit integer.
    I32(i32),
    /// A 64-bit integer.
    I64(i64),
    /// A 32-bit float.
    F32(f32),
    /// A 64-bit float.
    F64(f64),
    /// A boolean.
    Bool(bool),
    /// An owned string.
    Str(String),
    /// A homogeneous list of values.
    List(Vec<Value>),
    /// A dynamic function value.
    Func(Function),
}

macro_rules! accessors {
    ($bind:ident $(($variant:ident($ty:ty) $get:ident $unwrap:ident $cvt:expr))*) => ($(
        /// Attempt to access the underlying value of this `Value`, returning
        /// `None` if it is not the correct type.
        pub fn $get(&self) -> Option<$ty> {
            if let Self::$variant($bind) = self {
                Some($cvt)
            } else {
                None
            }
        }

        /// Returns the underlying value of this `Value`, panicking if it's the
        /// wrong type.
        ///
        /// # Panics
        ///
        /// Panics if `self` is not of the right type.
        pub fn $unwrap(&self) -> $ty {
            self.$get().expect(concat!("expected ", stringify!($ty)))
        }
    )*)
}

impl Value {
    /// Returns the corresponding [`Type`] for this `Value`.
    ///
    /// The element type of a list is taken from its first element; an empty
    /// list types as `[any]`, which is convertible to any list type.
    pub fn ty(&self) -> Type {
        match self {
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::F32(_) => Type::F32,
            Self::F64(_) => Type::F64,
            Self::Bool(_) => Type::Bool,
            Self::Str(_) => Type::Str,
            Self::List(items) => Type::List(Box::new(
                items.first().map(Self::ty).unwrap_or(Type::Any),
            )),
            Self::Func(_) => Type::Func,
        }
    }

    /// Converts this value to the given target type, returning `None` if the
    /// conversion is not allowed.
    ///
    /// Numeric values convert between the numeric types with host `as`-cast
    /// semantics. `Bool`, `Str` and `Func` values only convert to their own
    /// type. A list converts element by element with the same rules, so the
    /// result is homogeneous at the target element type and a list holding an
    /// inconvertible element is rejected as a whole. Any value converts to
    /// [`Type::Any`] unchanged.
    pub fn convert(&self, target: &Type) -> Option<Self> {
        if target.is_any() {
            return Some(self.clone());
        }
        match (self, target) {
            (Self::I32(v), Type::I64) => Some(Self::I64(i64::from(*v))),
            (Self::I32(v), Type::F32) => Some(Self::F32(*v as f32)),
            (Self::I32(v), Type::F64) => Some(Self::F64(f64::from(*v))),
            (Self::I64(v), Type::I32) => Some(Self::I32(*v as i32)),
            (Self::I64(v), Type::F32) => Some(Self::F32(*v as f32)),
            (Self::I64(v), Type::F64) => Some(Self::F64(*v as f64)),
            (Self::F32(v), Type::I32) => Some(Self::I32(*v as i32)),
            (Self::F32(v), Type::I64) => Some(Self::I64(*v as i64)),
            (Self::F32(v), Type::F64) => Some(Self::F64(f64::from(*v))),
            (Self::F64(v), Type::I32) => Some(Self::I32(*v as i32)),
            (Self::F64(v), Type::I64) => Some(Self::I64(*v as i64)),
            (Self::F64(v), Type::F32) => Some(Self::F32(*v as f32)),
            (Self::List(items), Type::List(elem)) => items
                .iter()
                .map(|item| item.convert(elem))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            _ => (self.ty() == *target).then(|| self.clone()),
        }
    }

    accessors! {
        e
        (I32(i32) i32 unwrap_i32 *e)
        (I64(i64) i64 unwrap_i64 *e)
        (F32(f32) f32 unwrap_f32 *e)
        (F64(f64) f64 unwrap_f64 *e)
        (Bool(bool) bool unwrap_bool *e)
        (Str(&str) str unwrap_str e.as_str())
        (List(&[Value]) list unwrap_list e.as_slice())
        (Func(&Function) func unwrap_func e)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::List(items) => {
                let rendered = items
                    .iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{rendered}]")
            }
            Self::Func(func) => write!(f, "{}", func.ty()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, o: &Self) -> bool {
        match (self, o) {
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            // Function values have no useful equality.
            _ => false,
        }
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Self::I32(val)
    }
}

impl From<u32> for Value {
    fn from(val: u32) -> Self {
        // A 4 byte storage that can hold signed or unsigned 32-bit integers.
        Self::I32(val as i32)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Self::I64(val)
    }
}

impl From<u64> for Value {
    fn from(val: u64) -> Self {
        // An 8 byte storage that can hold signed or unsigned 64-bit integers.
        Self::I64(val as i64)
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Self::F32(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Self::F64(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Bool(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Self::Str(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Self::Str(val.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(val: Vec<T>) -> Self {
        Self::List(val.into_iter().map(Into::into).collect())
    }
}

impl From<Function> for Value {
    fn from(val: Function) -> Self {
        Self::Func(val)
    }
}

const NOT_I32: &str = "value is not of type i32";
const NOT_I64: &str = "value is not of type i64";
const NOT_F32: &str = "value is not of type f32";
const NOT_F64: &str = "value is not of type f64";
const NOT_BOOL: &str = "value is not of type bool";
const NOT_STR: &str = "value is not of type str";
const NOT_FUNC: &str = "value is not of type func";

impl TryFrom<Value> for i32 {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.i32().ok_or(NOT_I32)
    }
}

impl TryFrom<Value> for u32 {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.i32().ok_or(NOT_I32).map(|int| int as Self)
    }
}

impl TryFrom<Value> for i64 {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.i64().ok_or(NOT_I64)
    }
}

impl TryFrom<Value> for u64 {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.i64().ok_or(NOT_I64).map(|int| int as Self)
    }
}

impl TryFrom<Value> for f32 {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.f32().ok_or(NOT_F32)
    }
}

impl TryFrom<Value> for f64 {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.f64().ok_or(NOT_F64)
    }
}

impl TryFrom<Value> for bool {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.bool().ok_or(NOT_BOOL)
    }
}

impl TryFrom<Value> for String {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(s) => Ok(s),
            _ => Err(NOT_STR),
        }
    }
}

impl TryFrom<Value> for Function {
    type Error = &'static str;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Func(f) => Ok(f),
            _ => Err(NOT_FUNC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types() {
        assert_eq!(Value::I32(1).ty(), Type::I32);
        assert_eq!(Value::from("x").ty(), Type::Str);
        assert_eq!(
            Value::from(vec![1i32, 2, 3]).ty(),
            Type::List(Box::new(Type::I32))
        );
        assert_eq!(
            Value::List(vec![]).ty(),
            Type::List(Box::new(Type::Any))
        );
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(Value::I32(5).convert(&Type::I64), Some(Value::I64(5)));
        assert_eq!(Value::I64(-1).convert(&Type::I32), Some(Value::I32(-1)));
        assert_eq!(Value::I32(2).convert(&Type::F64), Some(Value::F64(2.0)));
        assert_eq!(Value::F64(2.9).convert(&Type::I32), Some(Value::I32(2)));
        assert_eq!(Value::from("s").convert(&Type::I32), None);
        assert_eq!(Value::Bool(true).convert(&Type::I32), None);
    }

    #[test]
    fn conversion_to_any_is_identity() {
        let v = Value::from("hello");
        assert_eq!(v.convert(&Type::Any), Some(v.clone()));
    }

    #[test]
    fn list_conversions() {
        let ints = Value::from(vec![1i32, 2]);
        let int_list = Type::List(Box::new(Type::I32));
        let bool_list = Type::List(Box::new(Type::Bool));
        assert_eq!(ints.convert(&int_list), Some(ints.clone()));
        assert_eq!(ints.convert(&bool_list), None);
        // An empty list converts to a list of any element type.
        assert!(Value::List(vec![]).convert(&bool_list).is_some());
    }

    #[test]
    fn list_elements_convert_with_scalar_rules() {
        let ints = Value::from(vec![1i32, 2]);
        assert_eq!(
            ints.convert(&Type::List(Box::new(Type::I64))),
            Some(Value::from(vec![1i64, 2]))
        );
        // A non-empty list converts to `[any]` with its elements untouched.
        let mixed = Value::List(vec![Value::I32(1), Value::from("two")]);
        assert_eq!(
            mixed.convert(&Type::List(Box::new(Type::Any))),
            Some(mixed.clone())
        );
    }

    #[test]
    fn heterogeneous_nested_lists_are_rejected() {
        // The outer type descriptor comes from the first element, so only
        // element-wise conversion catches the mismatch in the tail.
        let rows = Value::List(vec![Value::List(vec![
            Value::I32(1),
            Value::Bool(true),
        ])]);
        let matrix = Type::List(Box::new(Type::List(Box::new(Type::I32))));
        assert_eq!(rows.ty(), matrix);
        assert_eq!(rows.convert(&matrix), None);
    }

    #[test]
    fn convert_value_to_i32() {
        let value = Value::I32(5678);
        let result = i32::try_from(value);
        assert_eq!(result.unwrap(), 5678);

        let value = Value::from(u32::MAX);
        let result = i32::try_from(value);
        assert_eq!(result.unwrap(), -1);

        let value = Value::Bool(true);
        let result = i32::try_from(value);
        assert_eq!(result.unwrap_err(), "value is not of type i32");
    }

    #[test]
    fn convert_value_to_string() {
        let value = Value::from("hi");
        assert_eq!(String::try_from(value).unwrap(), "hi");

        let value = Value::I64(1);
        assert_eq!(
            String::try_from(value).unwrap_err(),
            "value is not of type str"
        );
    }

    #[test]
    fn accessors_match_variants() {
        let v = Value::from(vec![true, false]);
        assert_eq!(v.list().unwrap().len(), 2);
        assert!(v.i32().is_none());
        assert_eq!(Value::Bool(true).unwrap_bool(), true);
    }
}
