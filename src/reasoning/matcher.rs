//! Pattern matching between rule patterns and facts.
//!
//! This is not first-order unification. A pattern either equals
//! a fact verbatim or starts with `?`, in which case the whole pattern is one
//! variable bound to the whole fact text. Chainers only talk to the
//! [`Matcher`] trait, so a real unifier can be dropped in later.

use std::collections::BTreeMap;

/// Variable pattern → bound literal text.
pub type Binding = BTreeMap<String, String>;

/// Matches patterns against facts and instantiates patterns from bindings.
pub trait Matcher: Send + Sync {
    /// Try to match `pattern` against `fact`. `None` means no match.
    fn unify(&self, pattern: &str, fact: &str) -> Option<Binding>;

    /// Instantiate `pattern`: a pattern bound as a whole becomes its value,
    /// otherwise every bound whitespace-delimited token is replaced.
    fn substitute(&self, pattern: &str, binding: &Binding) -> String;
}

/// The literal-or-variable matcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternMatcher;

/// `true` if `pattern` starts with `?` and has something after it.
pub fn is_variable(pattern: &str) -> bool {
    pattern.len() > 1 && pattern.starts_with('?')
}

impl Matcher for PatternMatcher {
    fn unify(&self, pattern: &str, fact: &str) -> Option<Binding> {
        if pattern == fact {
            return Some(Binding::new());
        }
        if is_variable(pattern) {
            let mut binding = Binding::new();
            binding.insert(pattern.to_string(), fact.to_string());
            return Some(binding);
        }
        None
    }

    fn substitute(&self, pattern: &str, binding: &Binding) -> String {
        if binding.is_empty() {
            return pattern.to_string();
        }
        if let Some(value) = binding.get(pattern) {
            return value.clone();
        }
        pattern
            .split(' ')
            .map(|token| binding.get(token).map(String::as_str).unwrap_or(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Merge two bindings. Fails if a variable is bound to two different values.
pub fn merge(base: &Binding, extra: &Binding) -> Option<Binding> {
    let mut merged = base.clone();
    for (var, value) in extra {
        match merged.get(var) {
            Some(existing) if existing != value => return None,
            Some(_) => {}
            None => {
                merged.insert(var.clone(), value.clone());
            }
        }
    }
    Some(merged)
}

/// Every binding under which all `premises` match some fact.
///
/// Premises are matched in order; each is instantiated with the binding built
/// so far before it is unified, so shared variables must agree.
pub fn match_premises(
    matcher: &dyn Matcher,
    premises: &[String],
    facts: &[&str],
) -> Vec<Binding> {
    let mut out = Vec::new();
    extend_matches(matcher, premises, facts, Binding::new(), &mut out);
    out
}

fn extend_matches(
    matcher: &dyn Matcher,
    premises: &[String],
    facts: &[&str],
    binding: Binding,
    out: &mut Vec<Binding>,
) {
    let Some((first, rest)) = premises.split_first() else {
        out.push(binding);
        return;
    };

    let pattern = matcher.substitute(first, &binding);
    for fact in facts {
        if let Some(found) = matcher.unify(&pattern, fact) {
            if let Some(next) = merge(&binding, &found) {
                extend_matches(matcher, rest, facts, next, out);
            }
        }
    }
}
