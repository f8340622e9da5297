//! # Similarity Module
//!
//! Decides whether two posts are near-duplicates.
//!
//! ## How It Works
//! 1. Compute the Levenshtein distance between the two texts, counted in
//!    Unicode scalar values so multi-byte characters cost one edit
//! 2. Apply a correction strategy to the distance
//!
//! ## Correction Thresholds
//! | Distance | Meaning                          |
//! |----------|----------------------------------|
//! | 0        | Identical repost                 |
//! | 1-10     | Typo fix (default threshold)     |
//! | 11+      | Different post                   |

mod traits;

pub use traits::{CorrectionStrategy, ThresholdStrategy, DEFAULT_CORRECTION_THRESHOLD};

/// Minimum number of single-character insertions, deletions or
/// substitutions turning `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the edit matrix, indexed by position in `b`
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        for s in ["", "a", "Hello world", "日本語のテキスト"] {
            assert_eq!(distance(s, s), 0);
        }
    }

    #[test]
    fn empty_string_costs_length_of_other() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abcd", ""), 4);
        assert_eq!(distance("", "ü€"), 2);
    }

    #[test]
    fn kitten_to_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("sitting", "kitten"), 3);
    }

    #[test]
    fn transposed_letters_cost_two() {
        assert_eq!(distance("Hello wrold", "Hello world"), 2);
    }

    #[test]
    fn multibyte_characters_count_once() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(distance("🙂", "🙃"), 1);
    }

    #[test]
    fn distance_never_exceeds_longer_length() {
        let pairs = [
            ("short", "a much longer sentence"),
            ("abc", "xyz"),
            ("Ωmega", "omega!"),
        ];
        for (a, b) in pairs {
            let d = distance(a, b);
            assert!(d <= a.chars().count().max(b.chars().count()));
        }
    }

    #[test]
    fn matches_reference_levenshtein() {
        let pairs = [
            ("Just landed in Berlin!", "Just landed in Berlin :)"),
            ("größer", "grosser"),
            ("RT @someone: hello", "hello"),
            ("&amp; then", "and then"),
        ];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), strsim::levenshtein(a, b), "{a} vs {b}");
        }
    }
}
