use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// A pure predicate over a single path segment.
///
/// Evaluators are shared by every request matched against a route, so the
/// wrapped function must be safe to call concurrently. Cloning is cheap, the
/// function itself sits behind an `Arc`.
///
/// ```rust
/// use path_macros::Evaluator;
///
/// let even = Evaluator::new(|s| s.len() % 2 == 0);
/// assert!(even.evaluate("ab"));
/// assert!(!even.evaluate("abc"));
/// ```
#[derive(Clone)]
pub struct Evaluator(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl Evaluator {
    /// Wraps a predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Evaluator(Arc::new(f))
    }

    /// An evaluator that accepts every segment, including the empty one.
    pub fn any() -> Self {
        Evaluator::new(|_| true)
    }

    /// An evaluator that matches the segment against an already compiled regex.
    pub fn from_regex(re: Regex) -> Self {
        Evaluator::new(move |segment| re.is_match(segment))
    }

    /// Compiles `expr` and returns an evaluator matching against it.
    pub fn from_pattern(expr: &str) -> Result<Self, regex::Error> {
        Regex::new(expr).map(Evaluator::from_regex)
    }

    /// Like [`from_pattern`](Evaluator::from_pattern), for patterns known at
    /// compile time.
    ///
    /// # Panics
    ///
    /// Panics if `expr` is not a valid regular expression.
    pub fn must_from_pattern(expr: &str) -> Self {
        match Evaluator::from_pattern(expr) {
            Ok(evaluator) => evaluator,
            Err(err) => panic!("invalid evaluator pattern `{}`: {}", expr, err),
        }
    }

    /// Runs the predicate.
    #[inline]
    pub fn evaluate(&self, segment: &str) -> bool {
        (self.0)(segment)
    }

    /// Returns an evaluator accepting a segment only if both `self` and
    /// `other` accept it. `other` is not called when `self` rejects.
    pub fn and(self, other: Evaluator) -> Self {
        Evaluator::new(move |segment| self.evaluate(segment) && other.evaluate(segment))
    }

    /// Conjunction of all evaluators, checked in order and stopping at the
    /// first rejection. An empty list accepts everything.
    pub fn all<I>(evaluators: I) -> Self
    where
        I: IntoIterator<Item = Evaluator>,
    {
        let mut evaluators: Vec<Evaluator> = evaluators.into_iter().collect();
        match evaluators.len() {
            0 => Evaluator::any(),
            1 => evaluators.remove(0),
            _ => Evaluator::new(move |segment| evaluators.iter().all(|e| e.evaluate(segment))),
        }
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Evaluator(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn pattern() {
        let digits = Evaluator::must_from_pattern("^[0-9]+$");
        assert!(digits.evaluate("42"));
        assert!(!digits.evaluate("4x"));
        assert!(!digits.evaluate(""));
    }

    #[test]
    fn invalid_pattern() {
        assert!(Evaluator::from_pattern("([").is_err());
    }

    #[test]
    #[should_panic]
    fn must_invalid_pattern() {
        Evaluator::must_from_pattern("([");
    }

    #[test]
    fn all_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = {
            let calls = calls.clone();
            Evaluator::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };

        let matcher = Evaluator::all(vec![Evaluator::new(|s| s == "ok"), counted]);
        assert!(!matcher.evaluate("nope"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(matcher.evaluate("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn all_empty() {
        assert!(Evaluator::all(Vec::new()).evaluate("anything"));
    }

    #[test]
    fn and() {
        let short = Evaluator::new(|s| s.len() < 4);
        let upper = Evaluator::new(|s| s.chars().all(|c| c.is_ascii_uppercase()));
        let both = short.and(upper);
        assert!(both.evaluate("ABC"));
        assert!(!both.evaluate("ABCD"));
        assert!(!both.evaluate("abc"));
    }
}
