use crate::func::Arg;

/// Represents errors that can occur when registering a macro in a [`MacroSet`](crate::MacroSet).
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegisterError {
    /// Macros must be registered with a name.
    #[error("macros must be registered with a non-empty name")]
    EmptyIndent,
    /// Every macro needs a base evaluator.
    #[error("macro `{indent}` has no base evaluator")]
    MissingEvaluator {
        /// The name of the refused macro.
        indent: String,
    },
    /// A macro with the same name is already registered.
    #[error("a macro named `{indent}` is already registered")]
    DuplicateIndent {
        /// The conflicting name.
        indent: String,
    },
    /// The alias is already used as the name or alias of another macro.
    #[error("alias `{alias}` conflicts with previously registered macro `{with}`")]
    AliasConflict {
        /// The conflicting alias.
        alias: String,
        /// The existing macro the alias collides with.
        with: String,
    },
    /// The name is already used as the alias of another macro.
    #[error("name `{indent}` is already an alias of macro `{with}`")]
    IndentConflict {
        /// The conflicting name.
        indent: String,
        /// The existing macro owning that alias.
        with: String,
    },
    /// Only one master macro is allowed per set.
    #[error("macro `{with}` is already the master macro of this set")]
    DuplicateMaster {
        /// The existing master macro.
        with: String,
    },
}

/// Represents errors that can occur when building an evaluator from a named
/// macro function.
#[non_exhaustive]
#[derive(Clone, Debug, thiserror::Error)]
pub enum BuildError {
    /// The macro has no function registered under that name.
    #[error("macro `{indent}` has no function named `{func}`")]
    UnknownFunc {
        /// The macro that was asked.
        indent: String,
        /// The missing function name.
        func: String,
    },
    /// The function was called with the wrong number of arguments.
    #[error("function `{func}` of macro `{indent}` expects {expected} argument(s), got {got}")]
    Arity {
        /// The macro owning the function.
        indent: String,
        /// The function that was called.
        func: String,
        /// Number of parameters the function declares.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },
    /// An argument could not be converted to the declared parameter type.
    #[error("argument {position} must be of type `{expected}`, got {found:?}")]
    ArgType {
        /// Zero-based argument index.
        position: usize,
        /// The declared parameter type.
        expected: &'static str,
        /// The argument that was supplied.
        found: Arg,
    },
    /// The macro has no base evaluator to compose with.
    #[error("macro `{indent}` has no base evaluator")]
    MissingEvaluator {
        /// The macro lacking an evaluator.
        indent: String,
    },
    /// A `regexp` argument did not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl BuildError {
    // Names the macro and function an arity error came from; a bare
    // `BoxedFunc` does not know under which name it was registered.
    pub(crate) fn in_func(self, indent: &str, func: &str) -> Self {
        match self {
            BuildError::Arity { expected, got, .. } => BuildError::Arity {
                indent: indent.to_owned(),
                func: func.to_owned(),
                expected,
                got,
            },
            other => other,
        }
    }
}
