use std::slice;

use crate::error::RegisterError;
use crate::evaluator::Evaluator;
use crate::param::ParamType;
use crate::param_macro::Macro;

/// An ordered collection of [`Macro`]s with unique names.
///
/// Within a set no two macros share a name, no alias equals another macro's
/// name or alias, and at most one macro is the master. The set is meant to be
/// configured at startup through `&mut` access and then shared read-only with
/// the router.
///
/// ```rust
/// use path_macros::{Evaluator, MacroSet};
///
/// let mut macros = MacroSet::builtin();
/// macros
///     .register("uuid", "", false, false, Evaluator::must_from_pattern(
///         "^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
///     ))
///     .expect("`uuid` is not taken");
///
/// assert!(macros.get("uuid").is_some());
/// assert_eq!(macros.get("int").map(|m| m.indent()), Some("number"));
/// assert_eq!(macros.master().map(|m| m.indent()), Some("number"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MacroSet {
    macros: Vec<Macro>,
}

impl MacroSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a macro, returning it so that functions can be
    /// attached. Returns `None` if the registration was refused, see
    /// [`try_insert`](MacroSet::try_insert) for the reasons.
    pub fn register(
        &mut self,
        indent: impl Into<String>,
        alias: impl Into<String>,
        is_master: bool,
        is_trailing: bool,
        evaluator: impl Into<Option<Evaluator>>,
    ) -> Option<&mut Macro> {
        self.insert(Macro::new(indent, alias, is_master, is_trailing, evaluator))
    }

    /// Registers an existing macro. Returns `None` if the registration was
    /// refused.
    pub fn insert(&mut self, m: Macro) -> Option<&mut Macro> {
        match self.try_insert(m) {
            Ok(m) => Some(m),
            Err(err) => {
                warn!("refused to register path macro: {}", err);
                None
            }
        }
    }

    /// Registers an existing macro, or explains why it was refused.
    ///
    /// The macro is appended only if it has a name and a base evaluator, its
    /// name is neither the name nor the alias of a registered macro, its
    /// alias (if any) is neither, and it is not a second master.
    pub fn try_insert(&mut self, m: Macro) -> Result<&mut Macro, RegisterError> {
        self.check(&m)?;

        debug!("registered path macro `{}`", m.indent());
        self.macros.push(m);
        let last = self.macros.len() - 1;
        Ok(&mut self.macros[last])
    }

    fn check(&self, m: &Macro) -> Result<(), RegisterError> {
        if m.indent().is_empty() {
            return Err(RegisterError::EmptyIndent);
        }

        if m.evaluator().is_none() {
            return Err(RegisterError::MissingEvaluator {
                indent: m.indent().to_owned(),
            });
        }

        for existing in &self.macros {
            if m.indent() == existing.indent() {
                return Err(RegisterError::DuplicateIndent {
                    indent: m.indent().to_owned(),
                });
            }

            if !existing.alias().is_empty() && m.indent() == existing.alias() {
                return Err(RegisterError::IndentConflict {
                    indent: m.indent().to_owned(),
                    with: existing.indent().to_owned(),
                });
            }

            if !m.alias().is_empty()
                && (m.alias() == existing.indent() || m.alias() == existing.alias())
            {
                return Err(RegisterError::AliasConflict {
                    alias: m.alias().to_owned(),
                    with: existing.indent().to_owned(),
                });
            }

            if m.is_master() && existing.is_master() {
                return Err(RegisterError::DuplicateMaster {
                    with: existing.indent().to_owned(),
                });
            }
        }

        Ok(())
    }

    /// Removes the macro named `indent`. Aliases are not considered.
    pub fn unregister(&mut self, indent: &str) -> bool {
        match self.macros.iter().position(|m| m.indent() == indent) {
            Some(i) => {
                self.macros.remove(i);
                debug!("unregistered path macro `{}`", indent);
                true
            }
            None => false,
        }
    }

    /// Resolves a parsed parameter type by its name, then by the descriptor's
    /// alias if it has one. Both are matched against names and aliases.
    pub fn lookup<P>(&self, param: &P) -> Option<&Macro>
    where
        P: ParamType + ?Sized,
    {
        self.get(param.indent())
            .or_else(|| param.alias().and_then(|alias| self.get(alias)))
    }

    /// Returns the macro whose name or alias is `key`.
    pub fn get(&self, key: &str) -> Option<&Macro> {
        if key.is_empty() {
            return None;
        }

        self.macros
            .iter()
            .find(|m| m.indent() == key || m.alias() == key)
    }

    /// Mutable form of [`get`](MacroSet::get), for attaching functions to an
    /// already registered macro.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Macro> {
        if key.is_empty() {
            return None;
        }

        self.macros
            .iter_mut()
            .find(|m| m.indent() == key || m.alias() == key)
    }

    /// Returns the master macro, if any.
    pub fn master(&self) -> Option<&Macro> {
        self.macros.iter().find(|m| m.is_master())
    }

    /// Returns all trailing macros in registration order.
    pub fn trailings(&self) -> Vec<&Macro> {
        self.macros.iter().filter(|m| m.is_trailing()).collect()
    }

    /// Returns an iterator over the macros in registration order.
    pub fn iter(&self) -> slice::Iter<'_, Macro> {
        self.macros.iter()
    }

    /// Returns the number of registered macros.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Returns `true` if no macros are registered.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

impl<'a> IntoIterator for &'a MacroSet {
    type Item = &'a Macro;
    type IntoIter = slice::Iter<'a, Macro>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any(indent: &str, alias: &str) -> Macro {
        Macro::new(indent, alias, false, false, Evaluator::any())
    }

    #[test]
    fn empty_aliases_do_not_conflict() {
        let mut set = MacroSet::new();
        assert!(set.insert(any("a", "")).is_some());
        assert!(set.insert(any("b", "")).is_some());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn refusal_leaves_set_untouched() {
        let mut set = MacroSet::new();
        set.insert(any("a", "x")).unwrap();

        assert_eq!(
            set.try_insert(any("b", "x")).err(),
            Some(RegisterError::AliasConflict {
                alias: "x".into(),
                with: "a".into()
            })
        );
        assert_eq!(set.len(), 1);
        assert!(set.get("b").is_none());
    }

    #[test]
    fn remove_keeps_order() {
        let mut set = MacroSet::new();
        for name in ["a", "b", "c"] {
            set.insert(any(name, "")).unwrap();
        }

        assert!(set.unregister("b"));
        let names: Vec<&str> = set.iter().map(Macro::indent).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn attach_after_register() {
        let mut set = MacroSet::new();
        set.register("word", "", false, false, Evaluator::any())
            .unwrap()
            .register_func("max", |n: usize| Evaluator::new(move |s| s.len() <= n));

        set.get_mut("word")
            .unwrap()
            .register_func("min", |n: usize| Evaluator::new(move |s| s.len() >= n));

        assert_eq!(set.get("word").unwrap().func_names(), vec!["max", "min"]);
    }
}
