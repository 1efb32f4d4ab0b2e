//! Named macro functions, e.g. the `min` in `{id:number min(1)}`.
//!
//! A macro function is any closure taking up to three typed parameters and
//! returning an [`Evaluator`]. The route parser hands over the literal
//! arguments as a list of [`Arg`]s, each of which is converted to the declared
//! parameter type through [`FromArg`] before the closure is called.
//!
//! ```rust
//! use path_macros::{Arg, Evaluator, Macro};
//!
//! let number = Macro::new("number", "", false, false, Evaluator::any())
//!     .with_func("min", |min: i64| {
//!         Evaluator::new(move |s| s.parse::<i64>().is_ok_and(|n| n >= min))
//!     });
//!
//! let min = number.build("min", &[Arg::Int(10)]).unwrap();
//! assert!(min.evaluate("10"));
//! assert!(!min.evaluate("9"));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::BuildError;
use crate::evaluator::Evaluator;

/// A literal argument of a macro function call, as produced by the route parser.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arg {
    /// A string literal.
    Str(String),
    /// A signed integer literal.
    Int(i64),
    /// An unsigned integer literal too large for [`Arg::Int`].
    Uint(u64),
    /// A boolean literal.
    Bool(bool),
}

impl Arg {
    /// Infers the argument kind from raw literal text.
    ///
    /// Integers become [`Arg::Int`] (or [`Arg::Uint`] past `i64::MAX`),
    /// `true`/`false` become [`Arg::Bool`], and anything else is kept as a
    /// string with surrounding double quotes removed.
    pub fn from_literal(literal: &str) -> Arg {
        if let Ok(n) = literal.parse::<i64>() {
            return Arg::Int(n);
        }

        if let Ok(n) = literal.parse::<u64>() {
            return Arg::Uint(n);
        }

        match literal {
            "true" => Arg::Bool(true),
            "false" => Arg::Bool(false),
            _ => {
                let unquoted = literal
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(literal);
                Arg::Str(unquoted.to_owned())
            }
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Uint(n) => write!(f, "{}", n),
            Arg::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_owned())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Int(n.into())
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        Arg::Uint(n)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

/// Types a macro function parameter can be declared as.
pub trait FromArg: Sized {
    /// Converts the argument, returning `None` if it does not fit.
    fn from_arg(arg: &Arg) -> Option<Self>;
}

impl FromArg for Arg {
    fn from_arg(arg: &Arg) -> Option<Self> {
        Some(arg.clone())
    }
}

// Any literal has a textual form, so string parameters accept all of them.
impl FromArg for String {
    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Str(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl FromArg for bool {
    fn from_arg(arg: &Arg) -> Option<Self> {
        match arg {
            Arg::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! from_arg_int {
    ($($int:ty),+) => {
        $(impl FromArg for $int {
            fn from_arg(arg: &Arg) -> Option<Self> {
                match *arg {
                    Arg::Int(n) => <$int>::try_from(n).ok(),
                    Arg::Uint(n) => <$int>::try_from(n).ok(),
                    _ => None,
                }
            }
        })+
    };
}

from_arg_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Values a macro function may return.
pub trait IntoEvaluator {
    /// Performs the conversion.
    fn into_evaluator(self) -> Result<Evaluator, BuildError>;
}

impl IntoEvaluator for Evaluator {
    fn into_evaluator(self) -> Result<Evaluator, BuildError> {
        Ok(self)
    }
}

impl<E> IntoEvaluator for Result<Evaluator, E>
where
    E: Into<BuildError>,
{
    fn into_evaluator(self) -> Result<Evaluator, BuildError> {
        self.map_err(Into::into)
    }
}

/// A function that builds an [`Evaluator`] from typed arguments.
///
/// Implemented for closures of up to three parameters, each implementing
/// [`FromArg`]. `T` is the tuple of parameter types and only serves to keep
/// the implementations apart.
pub trait MacroFunc<T>: Send + Sync + 'static {
    /// Number of declared parameters.
    fn arity(&self) -> usize;

    /// Converts `args` to the declared parameter types and calls the function.
    fn call(&self, args: &[Arg]) -> Result<Evaluator, BuildError>;
}

fn extract<T: FromArg>(args: &[Arg], position: usize) -> Result<T, BuildError> {
    let arg = &args[position];
    T::from_arg(arg).ok_or_else(|| BuildError::ArgType {
        position,
        expected: std::any::type_name::<T>(),
        found: arg.clone(),
    })
}

fn check_arity(expected: usize, args: &[Arg]) -> Result<(), BuildError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(BuildError::Arity {
            indent: String::new(),
            func: String::new(),
            expected,
            got: args.len(),
        })
    }
}

impl<Func, Out> MacroFunc<()> for Func
where
    Func: Fn() -> Out + Send + Sync + 'static,
    Out: IntoEvaluator,
{
    fn arity(&self) -> usize {
        0
    }

    fn call(&self, args: &[Arg]) -> Result<Evaluator, BuildError> {
        check_arity(0, args)?;
        (self)().into_evaluator()
    }
}

/// Implement `MacroFunc` for closures with multiple parameters
macro_rules! func_tuple ({ $len:literal; $(($n:tt, $T:ident)),+ } => {
    impl<Func, $($T,)+ Out> MacroFunc<($($T,)+)> for Func
    where
        Func: Fn($($T,)+) -> Out + Send + Sync + 'static,
        $($T: FromArg,)+
        Out: IntoEvaluator,
    {
        fn arity(&self) -> usize {
            $len
        }

        fn call(&self, args: &[Arg]) -> Result<Evaluator, BuildError> {
            check_arity($len, args)?;
            (self)($(extract::<$T>(args, $n)?,)+).into_evaluator()
        }
    }
});

#[rustfmt::skip]
mod m {
    use super::*;

    func_tuple!(1; (0, A));
    func_tuple!(2; (0, A), (1, B));
    func_tuple!(3; (0, A), (1, B), (2, C));
}

trait ErasedFunc: Send + Sync {
    fn arity(&self) -> usize;
    fn call(&self, args: &[Arg]) -> Result<Evaluator, BuildError>;
}

struct Holder<F, T> {
    func: F,
    _t: PhantomData<fn() -> T>,
}

impl<F, T> ErasedFunc for Holder<F, T>
where
    F: MacroFunc<T>,
{
    fn arity(&self) -> usize {
        self.func.arity()
    }

    fn call(&self, args: &[Arg]) -> Result<Evaluator, BuildError> {
        self.func.call(args)
    }
}

/// A type-erased [`MacroFunc`], as stored in a macro's function table.
#[derive(Clone)]
pub struct BoxedFunc(Arc<dyn ErasedFunc>);

impl BoxedFunc {
    pub(crate) fn new<F, T>(func: F) -> Self
    where
        F: MacroFunc<T>,
        T: 'static,
    {
        BoxedFunc(Arc::new(Holder {
            func,
            _t: PhantomData,
        }))
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    /// Calls the function with the given literal arguments.
    pub fn call(&self, args: &[Arg]) -> Result<Evaluator, BuildError> {
        self.0.call(args)
    }
}

impl fmt::Debug for BoxedFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedFunc")
            .field("arity", &self.arity())
            .finish()
    }
}
