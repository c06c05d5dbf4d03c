//! Open-answer matching.
//!
//! The one piece of algorithmic logic in the system: answers are compared
//! exactly after normalization. No edit distance, no synonyms.

/// Normalize a candidate answer for comparison: trim, lowercase, and
/// collapse internal whitespace runs to single spaces.
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if the user's answer matches any accepted answer after
/// normalizing both sides.
pub fn answer_matches<S: AsRef<str>>(user_answer: &str, accepted: &[S]) -> bool {
    let user = normalize(user_answer);
    accepted.iter().any(|a| normalize(a.as_ref()) == user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Has  Been \t Working "), "has been working");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["", "  ", "Already   normal", "MIXED\tCase\n input"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn match_is_case_and_whitespace_insensitive() {
        assert!(answer_matches("  Yes   please", &["yes please"]));
        assert!(answer_matches("Three   Times", &["three times"]));
    }

    #[test]
    fn match_tries_every_accepted_answer() {
        let accepted = ["I have been waiting", "I've been waiting"];
        assert!(answer_matches("i've been waiting", &accepted));
        assert!(!answer_matches("i waited", &accepted));
    }

    #[test]
    fn no_fuzzy_matching() {
        assert!(!answer_matches("yes pleas", &["yes please"]));
        assert!(!answer_matches("", &["yes please"]));
    }

    #[test]
    fn empty_accepted_list_never_matches() {
        assert!(!answer_matches("anything", &[] as &[&str]));
    }
}
