//! The builtin parameter types.
//!
//! | Type                 | Alias     | Accepts                                       |
//! |----------------------|-----------|-----------------------------------------------|
//! | `string`             |           | anything within a single segment              |
//! | `number`             | `int`     | `-?[0-9]+`, the master type                   |
//! | `int64`              | `long`    | a number fitting in an `i64`                  |
//! | `uint8`              |           | `0` to `255`, no sign                         |
//! | `uint64`             |           | a number fitting in a `u64`                   |
//! | `bool`               | `boolean` | `1 t T TRUE true True 0 f F FALSE false False` |
//! | `alphabetical`       |           | letters and spaces                            |
//! | `file`               |           | letters, digits, `_`, `-` and `.`             |
//! | `path`               |           | anything, as the last segment only            |
//!
//! All types except `file` make up [`MacroSet::builtin`].

use std::str::FromStr;

use crate::evaluator::Evaluator;
use crate::param_macro::Macro;
use crate::set::MacroSet;

const NUMBER: &str = "^-?[0-9]+$";
const UINT8: &str = "^([0-9]|[1-8][0-9]|9[0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$";
const ALPHABETICAL: &str = "^[a-zA-Z ]+$";
const FILE: &str = "^[a-zA-Z0-9_.-]*$";

impl MacroSet {
    /// Creates a set holding the builtin types `string`, `number`, `int64`,
    /// `uint8`, `uint64`, `bool`, `alphabetical` and `path`, in that order.
    ///
    /// Each call returns a fresh set owned by the caller.
    pub fn builtin() -> Self {
        let mut set = MacroSet::new();
        for m in [
            string(),
            number(),
            int64(),
            uint8(),
            uint64(),
            boolean(),
            alphabetical(),
            path(),
        ] {
            let registered = set.insert(m).is_some();
            debug_assert!(registered);
        }
        set
    }
}

/// Anything within a single path segment.
///
/// Functions: `regexp(expr)`, `prefix(s)`, `suffix(s)`, `contains(s)`, and
/// `min(n)`/`max(n)` bounding the length in bytes.
pub fn string() -> Macro {
    Macro::new("string", "", false, false, Evaluator::any())
        .with_func("regexp", |expr: String| Evaluator::from_pattern(&expr))
        .with_func("prefix", |prefix: String| {
            Evaluator::new(move |s| s.starts_with(prefix.as_str()))
        })
        .with_func("suffix", |suffix: String| {
            Evaluator::new(move |s| s.ends_with(suffix.as_str()))
        })
        .with_func("contains", |needle: String| {
            Evaluator::new(move |s| s.contains(needle.as_str()))
        })
        .with_func("min", |min: usize| Evaluator::new(move |s| s.len() >= min))
        .with_func("max", |max: usize| Evaluator::new(move |s| s.len() <= max))
}

/// Positive and negative integers of any length. The master type.
pub fn number() -> Macro {
    Macro::new("number", "int", true, false, Evaluator::must_from_pattern(NUMBER))
        .with_func("min", at_least::<i64>)
        .with_func("max", at_most::<i64>)
        .with_func("range", between::<i64>)
}

/// `-9223372036854775808` to `9223372036854775807`.
pub fn int64() -> Macro {
    Macro::new("int64", "long", false, false, fits::<i64>())
        .with_func("min", at_least::<i64>)
        .with_func("max", at_most::<i64>)
        .with_func("range", between::<i64>)
}

/// `0` to `255`.
pub fn uint8() -> Macro {
    Macro::new("uint8", "", false, false, Evaluator::must_from_pattern(UINT8))
        .with_func("min", at_least::<u8>)
        .with_func("max", at_most::<u8>)
        .with_func("range", between::<u8>)
}

/// `0` to `18446744073709551615`.
pub fn uint64() -> Macro {
    Macro::new("uint64", "", false, false, fits::<u64>())
        .with_func("min", at_least::<u64>)
        .with_func("max", at_most::<u64>)
        .with_func("range", between::<u64>)
}

/// Boolean literals.
pub fn boolean() -> Macro {
    Macro::new("bool", "boolean", false, false, Evaluator::new(is_bool))
}

/// Upper and lowercase letters and spaces.
pub fn alphabetical() -> Macro {
    Macro::new(
        "alphabetical",
        "",
        false,
        false,
        Evaluator::must_from_pattern(ALPHABETICAL),
    )
}

/// Letters, digits, underscore, dash and dot. No spaces. May be empty.
pub fn file() -> Macro {
    Macro::new("file", "", false, false, Evaluator::must_from_pattern(FILE))
}

/// Anything, consuming the rest of the path. Must be the last segment.
pub fn path() -> Macro {
    Macro::new("path", "", false, true, Evaluator::any())
}

fn is_bool(s: &str) -> bool {
    matches!(
        s,
        "1" | "t" | "T" | "TRUE" | "true" | "True" | "0" | "f" | "F" | "FALSE" | "false" | "False"
    )
}

// A number that parses as `T` without overflow. The pattern check comes
// first, so a negative value is rejected by the unsigned parse, not the pattern.
fn fits<T: FromStr + 'static>() -> Evaluator {
    let number = Evaluator::must_from_pattern(NUMBER);
    number.and(Evaluator::new(|s| s.parse::<T>().is_ok()))
}

fn at_least<T>(min: T) -> Evaluator
where
    T: FromStr + PartialOrd + Send + Sync + 'static,
{
    Evaluator::new(move |s| s.parse::<T>().is_ok_and(|n| n >= min))
}

fn at_most<T>(max: T) -> Evaluator
where
    T: FromStr + PartialOrd + Send + Sync + 'static,
{
    Evaluator::new(move |s| s.parse::<T>().is_ok_and(|n| n <= max))
}

fn between<T>(min: T, max: T) -> Evaluator
where
    T: FromStr + PartialOrd + Send + Sync + 'static,
{
    Evaluator::new(move |s| s.parse::<T>().is_ok_and(|n| n >= min && n <= max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_checks_pattern_first() {
        let uint = fits::<u64>();
        assert!(uint.evaluate("18446744073709551615"));
        assert!(!uint.evaluate("18446744073709551616"));
        assert!(!uint.evaluate("-1"));
        // accepted by `u64::from_str`, but not a number
        assert!(!uint.evaluate("+1"));
    }

    #[test]
    fn file_allows_empty() {
        let file = file();
        assert!(file.evaluate(""));
        assert!(file.evaluate("main.rs"));
        assert!(file.evaluate("a_b-c.d"));
        assert!(!file.evaluate("a b"));
        assert!(!file.evaluate("a/b"));
    }

    #[test]
    fn file_not_builtin() {
        assert!(MacroSet::builtin().get("file").is_none());
    }
}
