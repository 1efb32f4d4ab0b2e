//! Typed path parameters for URL routers.
//!
//! A route such as `/item/{id:number min(1) max(100)}` declares a parameter of
//! type `number` with two constraints. This crate provides the registry those
//! types are resolved against:
//!
//! - a [`Macro`] is a named type with a base [`Evaluator`] and a table of named
//!   functions building further evaluators from route arguments,
//! - a [`MacroSet`] holds macros under unique names and aliases, with at most
//!   one master (the type of parameters declared without one),
//! - the [`builtin`] types cover strings, integers, booleans, file names and
//!   trailing paths.
//!
//! Parsing the route pattern is left to the router. It hands over a
//! [`ParamType`] and a list of [`ParamFunc`]s, and receives a single evaluator
//! to run against the request path segment:
//!
//! ```rust
//! use path_macros::{MacroSet, ParamFunc};
//!
//! let macros = MacroSet::builtin();
//!
//! let number = macros.lookup("number").unwrap();
//! let matcher = number
//!     .matcher(&[ParamFunc::new("min", [1]), ParamFunc::new("max", [100])])
//!     .unwrap();
//!
//! assert!(matcher.evaluate("42"));
//! assert!(!matcher.evaluate("0"));
//! assert!(!matcher.evaluate("abc"));
//! ```
//!
//! A set is configured through `&mut` access and shared read-only once the
//! router starts serving; evaluators are `Send + Sync` and can be called from
//! any number of request handlers at once.
#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod builtin;
mod error;
mod evaluator;
mod func;
mod param;
mod param_macro;
mod set;

pub use error::{BuildError, RegisterError};
pub use evaluator::Evaluator;
pub use func::{Arg, BoxedFunc, FromArg, IntoEvaluator, MacroFunc};
pub use param::{ParamFunc, ParamType};
pub use param_macro::Macro;
pub use set::MacroSet;
