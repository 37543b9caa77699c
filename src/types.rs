//! Type descriptors for dynamic function signatures.

use std::fmt;

use crate::native::NativeType;

/// A list of all possible value types a dynamic function can traffic in.
///
/// `Type::Any` is the wildcard marker: in an expected signature it matches
/// any actual type, and in a signature record it marks a parameter that
/// accepts (or a result that produces) a raw [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Signed 32 bit integer.
    I32,
    /// Signed 64 bit integer.
    I64,
    /// Floating point 32 bit number.
    F32,
    /// Floating point 64 bit number.
    F64,
    /// Boolean.
    Bool,
    /// Owned UTF-8 string.
    Str,
    /// Homogeneous list with the given element type.
    List(Box<Type>),
    /// A dynamic function value.
    Func,
    /// The wildcard marker. Matches any type.
    Any,
}

impl Type {
    /// Returns the type descriptor of `T`.
    ///
    /// This is the preferred way to spell out an expected signature:
    ///
    /// ```
    /// use dynfunc::Type;
    ///
    /// assert_eq!(Type::of::<i32>(), Type::I32);
    /// assert_eq!(Type::of::<Vec<bool>>(), Type::List(Box::new(Type::Bool)));
    /// ```
    pub fn of<T: NativeType>() -> Self {
        T::ty()
    }

    /// Returns true if this is the wildcard marker.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns true if `Type` matches any of the numeric types. (e.g. `I32`,
    /// `I64`, `F32`, `F64`).
    pub fn is_num(&self) -> bool {
        matches!(self, Self::I32 | Self::I64 | Self::F32 | Self::F64)
    }

    /// Returns true if a value of this type can be converted to `target`.
    ///
    /// Numeric types are mutually convertible (widening and narrowing).
    /// `Bool`, `Str` and `Func` convert only to themselves. Lists convert
    /// element-wise with the same rules, and the type of an empty list
    /// (`List(Any)`) converts to any list type. Everything converts to `Any`.
    pub fn is_convertible_to(&self, target: &Self) -> bool {
        if target.is_any() || self == target {
            return true;
        }
        match (self, target) {
            (a, b) if a.is_num() && b.is_num() => true,
            (Self::List(a), Self::List(b)) => a.is_any() || a.is_convertible_to(b),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::Bool => write!(f, "bool"),
            Self::Str => write!(f, "str"),
            Self::List(elem) => write!(f, "[{elem}]"),
            Self::Func => write!(f, "func"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// The signature of a dynamic function: its parameter and result types,
/// in declaration order.
///
/// Derived once when a [`Function`](crate::Function) is created and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    /// The parameters of the function
    params: Box<[Type]>,
    /// The return values of the function
    results: Box<[Type]>,
}

impl FunctionType {
    /// Creates a new function type with the given parameter and result types.
    pub fn new<Params, Results>(params: Params, results: Results) -> Self
    where
        Params: Into<Box<[Type]>>,
        Results: Into<Box<[Type]>>,
    {
        Self {
            params: params.into(),
            results: results.into(),
        }
    }

    /// Parameter types.
    pub fn params(&self) -> &[Type] {
        &self.params
    }

    /// Result types.
    pub fn results(&self) -> &[Type] {
        &self.results
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let results = self
            .results
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{params}] -> [{results}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_are_mutually_convertible() {
        let nums = [Type::I32, Type::I64, Type::F32, Type::F64];
        for a in &nums {
            for b in &nums {
                assert!(a.is_convertible_to(b), "{a} should convert to {b}");
            }
        }
    }

    #[test]
    fn non_numeric_types_convert_only_to_themselves_or_any() {
        assert!(Type::Bool.is_convertible_to(&Type::Bool));
        assert!(!Type::Bool.is_convertible_to(&Type::I32));
        assert!(!Type::Str.is_convertible_to(&Type::Bool));
        assert!(!Type::I32.is_convertible_to(&Type::Str));
        assert!(Type::Str.is_convertible_to(&Type::Any));
        assert!(Type::Func.is_convertible_to(&Type::Any));
        assert!(!Type::Func.is_convertible_to(&Type::Str));
    }

    #[test]
    fn list_convertibility_follows_element_rules() {
        let ints = Type::List(Box::new(Type::I32));
        let longs = Type::List(Box::new(Type::I64));
        let bools = Type::List(Box::new(Type::Bool));
        let any = Type::List(Box::new(Type::Any));
        assert!(ints.is_convertible_to(&ints));
        assert!(ints.is_convertible_to(&longs));
        assert!(!ints.is_convertible_to(&bools));
        // Any list converts to `[any]`, and the type of an empty list
        // converts to any list type.
        assert!(bools.is_convertible_to(&any));
        assert!(any.is_convertible_to(&ints));
        assert!(any.is_convertible_to(&bools));
    }

    #[test]
    fn type_of_derives_descriptors() {
        assert_eq!(Type::of::<i64>(), Type::I64);
        assert_eq!(Type::of::<String>(), Type::Str);
        assert_eq!(
            Type::of::<Vec<Vec<i32>>>(),
            Type::List(Box::new(Type::List(Box::new(Type::I32))))
        );
        assert_eq!(Type::of::<crate::Value>(), Type::Any);
    }

    #[test]
    fn function_type_display() {
        let ty = FunctionType::new(vec![Type::I32, Type::Str], vec![Type::Bool]);
        assert_eq!(ty.to_string(), "[i32, str] -> [bool]");
    }
}
