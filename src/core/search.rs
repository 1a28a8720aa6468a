//! Fuzzy matching for the type-to-select search in llama.
//!
//! Scores the entry names of the current directory against the typed query with
//! [SkimMatcherV2] and returns the candidates ranked best first.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Deserialize;

use std::cmp::Ordering;

/// How letter case is treated while matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCase {
    /// Case-insensitive unless the query contains an uppercase letter.
    #[default]
    Smart,
    Ignore,
    Respect,
}

/// A single ranked candidate.
///
/// `positions` are character (not byte) indices into the candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    index: usize,
    score: i64,
    positions: Vec<usize>,
}

impl FuzzyMatch {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<usize> {
        self.positions
    }
}

/// Higher scores first, ties broken by the earlier candidate.
impl Ord for FuzzyMatch {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for FuzzyMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn matcher(case: SearchCase) -> SkimMatcherV2 {
    let matcher = SkimMatcherV2::default();
    match case {
        SearchCase::Smart => matcher.smart_case(),
        SearchCase::Ignore => matcher.ignore_case(),
        SearchCase::Respect => matcher.respect_case(),
    }
}

/// Ranks every candidate that matches `query`.
///
/// An empty query matches nothing.
pub fn find_matches<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    case: SearchCase,
) -> Vec<FuzzyMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let matcher = matcher(case);
    let mut out: Vec<FuzzyMatch> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            matcher
                .fuzzy_indices(candidate.as_ref(), query)
                .map(|(score, positions)| FuzzyMatch {
                    index,
                    score,
                    positions,
                })
        })
        .collect();
    out.sort_unstable();
    out
}

/// The top ranked candidate, if any candidate matches.
pub fn best_match<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    case: SearchCase,
) -> Option<FuzzyMatch> {
    find_matches(query, candidates, case).into_iter().next()
}
