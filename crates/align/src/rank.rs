use std::collections::HashSet;

use crate::nw::{Scoring, align};

/// One alternative produced by the transcription source for a section.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct TranscriptOption {
    pub text: String,
    pub confidence: f64,
}

impl TranscriptOption {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// A candidate completed against typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub score: i32,
}

/// Completes `typed` with the tail of `candidate` that the alignment leaves
/// unmatched.
///
/// Empty typed text returns the candidate unchanged with a zero score.
pub fn complete(typed: &str, candidate: &str) -> Completion {
    if typed.is_empty() {
        return Completion {
            text: candidate.to_string(),
            score: 0,
        };
    }

    let left: Vec<char> = typed.chars().collect();
    let right: Vec<char> = candidate.chars().collect();
    let alignment = align(&left, &right, &Scoring::completion());

    let tail = alignment.trailing_left_gaps();
    let mut text = String::with_capacity(typed.len() + tail);
    text.push_str(typed);
    text.extend(&right[right.len() - tail..]);

    Completion {
        text,
        score: alignment.score,
    }
}

/// Ranks the completions of every candidate against `typed`.
///
/// Completions are ordered by descending alignment score; equal scores keep
/// their input order. Repeated completion texts keep only their first
/// (best scoring) occurrence.
pub fn rank(typed: &str, candidates: &[TranscriptOption]) -> Vec<String> {
    let mut completions: Vec<Completion> = candidates
        .iter()
        .map(|candidate| complete(typed, &candidate.text))
        .collect();

    // `sort_by` is stable.
    completions.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen = HashSet::with_capacity(completions.len());
    completions
        .into_iter()
        .filter_map(|completion| {
            if seen.contains(&completion.text) {
                return None;
            }
            seen.insert(completion.text.clone());
            Some(completion.text)
        })
        .collect()
}
