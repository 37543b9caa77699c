//! Dynamically-typed function wrappers with one-time signature validation.
//!
//! This crate wraps arbitrary Rust functions as opaque, loosely-typed values,
//! validates their parameter and result signature against a caller-supplied
//! expectation once at construction time, and invokes them later with
//! loosely-typed arguments that are checked and converted at call time. It
//! targets registered callbacks, plugin hooks and table-driven dispatch,
//! where the code holding a function does not know its concrete type.
//!
//! The building blocks:
//!
//! * [`Type`] — a type descriptor, including the wildcard [`Type::Any`] that
//!   matches any type at its position.
//! * [`Value`] — a loosely-typed value, including [`Value::Func`] so that
//!   functions can live in heterogeneous tables.
//! * [`Function`] — an erased callable plus its cached signature, created
//!   from any ordinary Rust closure with [`Function::new`].
//! * [`ExpectedSignature`] — the caller's expectation, checked once.
//! * [`DynFunc`] — the validated, ready-to-call wrapper.
//!
//! ```
//! use dynfunc::{DynFunc, ExpectedSignature, Function, Type, Value};
//!
//! // Some table of opaque values, only some of which are functions.
//! let entry = Value::from(Function::new(|item: i32| -> bool { item > 10 }));
//!
//! let expected = ExpectedSignature::new(vec![Type::I32], vec![Type::Bool]);
//! let predicate = DynFunc::new(entry, &expected)?;
//!
//! assert_eq!(predicate.call(&[Value::I32(15)])?, vec![Value::Bool(true)]);
//! // Arguments convert where the host type system allows it.
//! assert_eq!(predicate.call(&[Value::I64(2)])?, vec![Value::Bool(false)]);
//! # Ok::<(), dynfunc::Error>(())
//! ```
//!
//! Everything is synchronous and stateless per call: a `DynFunc` is immutable
//! after construction and may be invoked concurrently from multiple threads.

#![deny(missing_docs, unused_extern_crates)]
#![warn(unused_import_braces)]

mod dynamic;
mod error;
mod function;
mod native;
mod types;
mod validate;
mod values;

pub use crate::dynamic::DynFunc;
pub use crate::error::{Error, Side};
pub use crate::function::{Function, HostFunction};
pub use crate::native::{NativeType, TypeList};
pub use crate::types::{FunctionType, Type};
pub use crate::validate::ExpectedSignature;
pub use crate::values::Value;
