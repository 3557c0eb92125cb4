//! Named boolean predicates used by branching combinators.

use std::fmt;
use std::sync::Arc;

type Predicate<I> = Arc<dyn Fn(&I) -> bool + Send + Sync>;

/// A named predicate evaluated against a combinator's input.
///
/// The name is what diagrams show on the decision diamond. A statement
/// without a predicate evaluates to `false`, and so does a missing
/// statement (see [`evaluate`]).
///
/// ```
/// use phasegraph::Statement;
///
/// let is_even = Statement::new("is even?", |n: &u32| n % 2 == 0);
/// assert!(is_even.evaluate(&4));
/// assert_eq!(is_even.name(), "is even?");
///
/// let undecided = Statement::<u32>::named("no predicate");
/// assert!(!undecided.evaluate(&4));
/// ```
pub struct Statement<I> {
    name: String,
    predicate: Option<Predicate<I>>,
}

impl<I> Statement<I> {
    /// Create a named statement.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Some(Arc::new(predicate)),
        }
    }

    /// Create a statement with an empty name.
    pub fn anonymous<F>(predicate: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self::new("", predicate)
    }

    /// Create a statement that has a name but no predicate. It always
    /// evaluates to `false`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicate: None,
        }
    }

    /// The statement's label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate against `input`.
    pub fn evaluate(&self, input: &I) -> bool {
        self.predicate
            .as_ref()
            .is_some_and(|predicate| predicate(input))
    }
}

impl<I> Clone for Statement<I> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<I> fmt::Debug for Statement<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("name", &self.name)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Evaluate an optional statement; a missing statement is `false`.
pub fn evaluate<I>(statement: Option<&Statement<I>>, input: &I) -> bool {
    statement.is_some_and(|statement| statement.evaluate(input))
}

/// The label a diagram shows for an optional statement.
pub fn label<I>(statement: Option<&Statement<I>>) -> &str {
    statement.map_or("", Statement::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_statement_evaluates_predicate() {
        let positive = Statement::new("positive?", |n: &i32| *n > 0);
        assert!(positive.evaluate(&1));
        assert!(!positive.evaluate(&-1));
    }

    #[test]
    fn anonymous_statement_has_empty_name() {
        let always = Statement::anonymous(|_: &()| true);
        assert_eq!(always.name(), "");
        assert!(always.evaluate(&()));
    }

    #[test]
    fn statement_without_predicate_is_false() {
        let statement = Statement::<()>::named("never");
        assert!(!statement.evaluate(&()));
    }

    #[test]
    fn missing_statement_is_false() {
        assert!(!evaluate::<()>(None, &()));
        assert_eq!(label::<()>(None), "");
    }

    #[test]
    fn clone_shares_predicate() {
        let statement = Statement::new("small?", |n: &u8| *n < 10);
        let copy = statement.clone();
        assert!(copy.evaluate(&3));
        assert_eq!(copy.name(), "small?");
    }
}
