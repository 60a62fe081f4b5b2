//! Text-overlap heuristics for support and contradiction.
//!
//! These are approximations: negation is detected by substring, so "nothing"
//! or "knot" count as negated text for [`determine_support`].

use std::collections::HashSet;

/// Substrings that flip a memory's overlap score to negative.
const SUPPORT_NEGATIONS: [&str; 3] = ["not", "never", "impossible"];

/// Whole words stripped before contradiction similarity.
const NEGATION_WORDS: [&str; 5] = ["not", "no", "never", "none", "cannot"];

const STRONG_OVERLAP: f64 = 0.3;
const WEAK_OVERLAP: f64 = 0.1;
const CONTRADICTION_SIMILARITY: f64 = 0.7;

/// Lowercased whitespace tokens with surrounding punctuation trimmed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Fraction of `statement` tokens present in `memory`.
fn overlap(memory: &str, statement: &str) -> f64 {
    let statement_tokens = tokenize(statement);
    if statement_tokens.is_empty() {
        return 0.0;
    }
    let memory_tokens: HashSet<String> = tokenize(memory).into_iter().collect();
    let shared = statement_tokens
        .iter()
        .filter(|t| memory_tokens.contains(*t))
        .count();
    shared as f64 / statement_tokens.len() as f64
}

/// How much `memory` supports `statement`.
///
/// Returns the negated overlap fraction when the memory text contains a
/// negation substring, otherwise 1.0 above 0.3 overlap, 0.5 above 0.1, and 0.0
/// below that.
pub fn determine_support(memory: &str, statement: &str) -> f64 {
    let score = overlap(memory, statement);
    let lowered = memory.to_lowercase();
    if SUPPORT_NEGATIONS.iter().any(|n| lowered.contains(n)) {
        return -score;
    }
    if score > STRONG_OVERLAP {
        1.0
    } else if score > WEAK_OVERLAP {
        0.5
    } else {
        0.0
    }
}

fn is_negation(token: &str) -> bool {
    NEGATION_WORDS.contains(&token)
}

/// True when exactly one text is negated and the remaining words are
/// near-identical (Jaccard similarity above 0.7).
pub fn detect_contradiction(a: &str, b: &str) -> bool {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    let negated_a = tokens_a.iter().any(|t| is_negation(t));
    let negated_b = tokens_b.iter().any(|t| is_negation(t));
    if negated_a == negated_b {
        return false;
    }

    let stripped_a: HashSet<&str> = tokens_a
        .iter()
        .map(String::as_str)
        .filter(|t| !is_negation(t))
        .collect();
    let stripped_b: HashSet<&str> = tokens_b
        .iter()
        .map(String::as_str)
        .filter(|t| !is_negation(t))
        .collect();

    jaccard(&stripped_a, &stripped_b) > CONTRADICTION_SIMILARITY
}

fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
