//! Case-sensitive subsequence matching.
//!
//! A query matches a candidate when every query character appears in the
//! candidate in the same relative order. There is no scoring: a candidate
//! either matches or it doesn't, and the caller keeps its own ordering.

/// Greedy subsequence test.
///
/// Each query character consumes the candidate up to and including its first
/// occurrence in the unconsumed suffix. An empty query matches everything.
pub fn fuzzy_match(candidate: &str, query: &str) -> bool {
    let mut rest = candidate.chars();
    query.chars().all(|qc| rest.any(|c| c == qc))
}

/// Char positions consumed by the same greedy walk as [`fuzzy_match`], or
/// `None` when the candidate does not match. Used to highlight matches.
pub fn match_indices(candidate: &str, query: &str) -> Option<Vec<usize>> {
    let mut indices = Vec::with_capacity(query.chars().count());
    let mut rest = candidate.chars().enumerate();
    for qc in query.chars() {
        loop {
            match rest.next() {
                Some((i, c)) if c == qc => {
                    indices.push(i);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }
    Some(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(fuzzy_match("alpha.n", ""));
        assert!(fuzzy_match("", ""));
    }

    #[test]
    fn test_subsequence_in_order() {
        assert!(fuzzy_match("abcx.n", "ab"));
        assert!(fuzzy_match("abcx.n", "ax"));
        assert!(fuzzy_match("work/meeting.n", "wmt"));
        assert!(!fuzzy_match("alpha.n", "ab"));
        // 'b' comes before 'a' in "beta.n"
        assert!(!fuzzy_match("beta.n", "ab"));
    }

    #[test]
    fn test_repeated_characters_consume_separately() {
        assert!(fuzzy_match("alpha.n", "aa"));
        assert!(!fuzzy_match("beta.n", "aa"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!fuzzy_match("alpha.n", "A"));
        assert!(fuzzy_match("Alpha.n", "A"));
        assert!(!fuzzy_match("Alpha.n", "a."));
        assert!(fuzzy_match("Alpha.n", "a.n"));
    }

    #[test]
    fn test_query_longer_than_candidate() {
        assert!(!fuzzy_match("ab", "abc"));
        assert!(!fuzzy_match("", "a"));
    }

    #[test]
    fn test_multibyte_characters() {
        assert!(fuzzy_match("café/über.n", "éü"));
        assert!(!fuzzy_match("café/über.n", "üé"));
        assert_eq!(match_indices("café/über.n", "éü"), Some(vec![3, 5]));
    }

    #[test]
    fn test_match_indices_greedy_positions() {
        assert_eq!(match_indices("abcx.n", "ab"), Some(vec![0, 1]));
        assert_eq!(match_indices("alpha.n", "a.n"), Some(vec![0, 5, 6]));
        // Greedy takes the first 'a', not the second
        assert_eq!(match_indices("alpha.n", "a"), Some(vec![0]));
        assert_eq!(match_indices("alpha.n", ""), Some(vec![]));
        assert_eq!(match_indices("alpha.n", "ab"), None);
    }

    fn ascii_name() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9./_ -]{0,24}"
    }

    proptest! {
        #[test]
        fn prop_every_subsequence_matches(
            candidate in ascii_name(),
            picks in prop::collection::vec(any::<bool>(), 24),
        ) {
            let query: String = candidate
                .chars()
                .zip(picks.iter())
                .filter_map(|(c, &keep)| keep.then_some(c))
                .collect();
            prop_assert!(fuzzy_match(&candidate, &query));
        }

        #[test]
        fn prop_indices_agree_with_match(candidate in ascii_name(), query in "[a-zA-Z.]{0,4}") {
            let indices = match_indices(&candidate, &query);
            prop_assert_eq!(indices.is_some(), fuzzy_match(&candidate, &query));

            if let Some(indices) = indices {
                let chars: Vec<char> = candidate.chars().collect();
                let picked: String = indices.iter().map(|&i| chars[i]).collect();
                prop_assert_eq!(picked, query);
                prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
            }
        }

        #[test]
        fn prop_uppercase_never_matches_lowercase_only(
            candidate in "[a-z.]{0,16}",
            query in "[A-Z]{1,3}",
        ) {
            prop_assert!(!fuzzy_match(&candidate, &query));
        }
    }
}
