//! What the route parser hands over for a typed parameter such as
//! `{id:int min(1) max(100)}`.

use crate::func::Arg;

/// The type part of a parsed parameter, e.g. `int` above.
///
/// Implemented by the route parser's own type descriptors; a bare `str`
/// is a descriptor with no alias.
pub trait ParamType {
    /// The primary type name.
    fn indent(&self) -> &str;

    /// A secondary name the type may also be known by.
    fn alias(&self) -> Option<&str> {
        None
    }
}

impl ParamType for str {
    fn indent(&self) -> &str {
        self
    }
}

impl ParamType for String {
    fn indent(&self) -> &str {
        self
    }
}

impl<P: ParamType + ?Sized> ParamType for &P {
    fn indent(&self) -> &str {
        (**self).indent()
    }

    fn alias(&self) -> Option<&str> {
        (**self).alias()
    }
}

/// A single macro function call, e.g. `min(1)` above.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamFunc {
    /// The function name.
    pub name: String,
    /// The literal arguments, in declaration order.
    pub args: Vec<Arg>,
}

impl ParamFunc {
    /// Creates a function call.
    pub fn new<I, A>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        ParamFunc {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}
