use std::collections::HashMap;
use std::fmt;

use crate::error::BuildError;
use crate::evaluator::Evaluator;
use crate::func::{Arg, BoxedFunc, MacroFunc};
use crate::param::ParamFunc;

/// A named path parameter type.
///
/// A macro owns a base [`Evaluator`] deciding whether a segment belongs to the
/// type at all, and a table of named functions producing additional
/// constraints from the arguments written in the route, e.g. `min(1)`.
///
/// ```rust
/// use path_macros::{Evaluator, Macro, ParamFunc};
///
/// let hex = Macro::new("hex", "", false, false, Evaluator::must_from_pattern("^[0-9a-f]+$"))
///     .with_func("len", |n: usize| Evaluator::new(move |s| s.len() == n));
///
/// let matcher = hex.matcher(&[ParamFunc::new("len", [4])]).unwrap();
/// assert!(matcher.evaluate("beef"));
/// assert!(!matcher.evaluate("bee"));
/// assert!(!matcher.evaluate("buzz"));
/// ```
#[derive(Clone)]
pub struct Macro {
    indent: String,
    alias: String,
    master: bool,
    trailing: bool,
    evaluator: Option<Evaluator>,
    funcs: HashMap<String, BoxedFunc>,
}

impl Macro {
    /// Creates a standalone macro.
    ///
    /// Nothing is validated here; a macro without a name or base evaluator is
    /// refused once it is registered in a [`MacroSet`](crate::MacroSet).
    pub fn new(
        indent: impl Into<String>,
        alias: impl Into<String>,
        is_master: bool,
        is_trailing: bool,
        evaluator: impl Into<Option<Evaluator>>,
    ) -> Self {
        Macro {
            indent: indent.into(),
            alias: alias.into(),
            master: is_master,
            trailing: is_trailing,
            evaluator: evaluator.into(),
            funcs: HashMap::new(),
        }
    }

    /// Registers `func` under `name`, replacing any function already
    /// registered under that name.
    pub fn register_func<F, T>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: MacroFunc<T>,
        T: 'static,
    {
        self.funcs.insert(name.into(), BoxedFunc::new(func));
        self
    }

    /// Builder form of [`register_func`](Macro::register_func).
    pub fn with_func<F, T>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: MacroFunc<T>,
        T: 'static,
    {
        self.register_func(name, func);
        self
    }

    /// The primary name.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// The secondary name, empty if there is none.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Whether this is the type assumed for parameters without a type.
    pub fn is_master(&self) -> bool {
        self.master
    }

    /// Whether this type may only appear as the last segment of a route.
    pub fn is_trailing(&self) -> bool {
        self.trailing
    }

    /// The base evaluator.
    pub fn evaluator(&self) -> Option<&Evaluator> {
        self.evaluator.as_ref()
    }

    /// Runs the base evaluator. A macro without one accepts nothing.
    pub fn evaluate(&self, segment: &str) -> bool {
        self.evaluator
            .as_ref()
            .is_some_and(|evaluator| evaluator.evaluate(segment))
    }

    /// Returns `true` if a function is registered under `name`.
    pub fn has_func(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    /// Returns the function registered under `name`.
    pub fn func(&self, name: &str) -> Option<&BoxedFunc> {
        self.funcs.get(name)
    }

    /// The names of all registered functions, sorted.
    pub fn func_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Calls the function registered under `name` with the given arguments.
    pub fn build(&self, name: &str, args: &[Arg]) -> Result<Evaluator, BuildError> {
        let func = self.funcs.get(name).ok_or_else(|| BuildError::UnknownFunc {
            indent: self.indent.clone(),
            func: name.to_owned(),
        })?;

        trace!("building `{}({:?})` for macro `{}`", name, args, self.indent);
        func.call(args).map_err(|err| err.in_func(&self.indent, name))
    }

    /// Builds the matcher for a parameter of this type: the base evaluator
    /// followed by every function call, in order. Evaluation stops at the
    /// first evaluator rejecting the segment.
    pub fn matcher(&self, funcs: &[ParamFunc]) -> Result<Evaluator, BuildError> {
        let base = self
            .evaluator
            .clone()
            .ok_or_else(|| BuildError::MissingEvaluator {
                indent: self.indent.clone(),
            })?;

        let mut evaluators = Vec::with_capacity(funcs.len() + 1);
        evaluators.push(base);
        for func in funcs {
            evaluators.push(self.build(&func.name, &func.args)?);
        }

        Ok(Evaluator::all(evaluators))
    }
}

impl fmt::Debug for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macro")
            .field("indent", &self.indent)
            .field("alias", &self.alias)
            .field("master", &self.master)
            .field("trailing", &self.trailing)
            .field("evaluator", &self.evaluator.is_some())
            .field("funcs", &self.func_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixed() -> Macro {
        Macro::new("prefixed", "pre", false, false, Evaluator::new(|s| !s.is_empty()))
            .with_func("prefix", |p: String| {
                Evaluator::new(move |s| s.starts_with(p.as_str()))
            })
    }

    #[test]
    fn accessors() {
        let m = Macro::new("path", "", false, true, Evaluator::any());
        assert_eq!(m.indent(), "path");
        assert_eq!(m.alias(), "");
        assert!(!m.is_master());
        assert!(m.is_trailing());
        assert!(m.evaluator().is_some());
        assert!(m.func_names().is_empty());
    }

    #[test]
    fn last_write_wins() {
        let mut m = prefixed();
        m.register_func("prefix", |_: String| Evaluator::new(|_| false))
            .register_func("nonempty", || Evaluator::new(|s| !s.is_empty()));

        assert_eq!(m.func_names(), vec!["nonempty", "prefix"]);
        assert!(m.has_func("nonempty"));
        assert!(!m.has_func("suffix"));
        assert_eq!(m.func("prefix").map(BoxedFunc::arity), Some(1));
        assert_eq!(m.func("nonempty").map(BoxedFunc::arity), Some(0));
        assert!(m.func("suffix").is_none());

        let overwritten = m.build("prefix", &[Arg::from("a")]).unwrap();
        assert!(!overwritten.evaluate("abc"));
    }

    #[test]
    fn unknown_func() {
        match prefixed().build("suffix", &[Arg::from("a")]) {
            Err(BuildError::UnknownFunc { indent, func }) => {
                assert_eq!(indent, "prefixed");
                assert_eq!(func, "suffix");
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn arity_names_func() {
        match prefixed().build("prefix", &[]) {
            Err(err @ BuildError::Arity { .. }) => {
                assert_eq!(
                    err.to_string(),
                    "function `prefix` of macro `prefixed` expects 1 argument(s), got 0"
                );
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn missing_evaluator() {
        let m = Macro::new("broken", "", false, false, None::<Evaluator>);
        assert!(!m.evaluate("anything"));
        assert!(matches!(
            m.matcher(&[]),
            Err(BuildError::MissingEvaluator { .. })
        ));
    }

    #[test]
    fn matcher() {
        let matcher = prefixed()
            .matcher(&[ParamFunc::new("prefix", ["ab"])])
            .unwrap();

        assert!(matcher.evaluate("abc"));
        assert!(!matcher.evaluate("bc"));
        assert!(!matcher.evaluate(""));
    }
}
