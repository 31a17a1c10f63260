//! Global (Needleman–Wunsch) alignment over `char` sequences.
//!
//! The left sequence indexes the rows of the scoring matrix and the right
//! sequence the columns. A gap on the left means a right character has no
//! counterpart on the left, and vice versa.

/// Scores used to fill the alignment matrix.
#[derive(Debug, Clone, Copy)]
pub struct Scoring {
    pub similarity: fn(char, char) -> i32,
    /// Added once for every gapped position.
    pub gap: i32,
}

pub const DEFAULT_GAP_SCORE: i32 = -1;

impl Scoring {
    /// +1 for a case-insensitive match, −2 otherwise, −1 per gap.
    pub const fn completion() -> Self {
        Self {
            similarity: case_insensitive_similarity,
            gap: DEFAULT_GAP_SCORE,
        }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::completion()
    }
}

pub fn case_insensitive_similarity(a: char, b: char) -> i32 {
    if a == b || a.to_lowercase().eq(b.to_lowercase()) {
        1
    } else {
        -2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Diagonal,
    /// Gap on the left, consumes one right character.
    LeftGap,
    /// Gap on the right, consumes one left character.
    RightGap,
}

/// Result of aligning two sequences. Both aligned sequences have the same
/// length; `None` marks a gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: i32,
    pub left: Vec<Option<char>>,
    pub right: Vec<Option<char>>,
}

impl Alignment {
    /// Number of trailing columns in which the left sequence has a gap.
    pub fn trailing_left_gaps(&self) -> usize {
        self.left.iter().rev().take_while(|c| c.is_none()).count()
    }

    /// Renders both aligned sequences, using `gap` for gapped positions.
    pub fn render(&self, gap: char) -> (String, String) {
        let render =
            |seq: &[Option<char>]| -> String { seq.iter().map(|c| c.unwrap_or(gap)).collect() };
        (render(&self.left), render(&self.right))
    }
}

/// Globally aligns `left` against `right`.
///
/// Traceback ties resolve in the order left gap, diagonal, right gap, so an
/// ambiguous tail prefers leaving right characters unmatched at the end.
pub fn align(left: &[char], right: &[char], scoring: &Scoring) -> Alignment {
    let rows = left.len() + 1;
    let cols = right.len() + 1;
    let at = |i: usize, j: usize| i * cols + j;

    let mut scores = vec![0i32; rows * cols];
    let mut steps = vec![Step::Diagonal; rows * cols];

    for i in 1..rows {
        scores[at(i, 0)] = scores[at(i - 1, 0)] + scoring.gap;
        steps[at(i, 0)] = Step::RightGap;
    }
    for j in 1..cols {
        scores[at(0, j)] = scores[at(0, j - 1)] + scoring.gap;
        steps[at(0, j)] = Step::LeftGap;
    }

    for i in 1..rows {
        for j in 1..cols {
            let candidates = [
                (scores[at(i, j - 1)] + scoring.gap, Step::LeftGap),
                (
                    scores[at(i - 1, j - 1)] + (scoring.similarity)(left[i - 1], right[j - 1]),
                    Step::Diagonal,
                ),
                (scores[at(i - 1, j)] + scoring.gap, Step::RightGap),
            ];

            let (mut best, mut step) = candidates[0];
            for &(score, candidate_step) in &candidates[1..] {
                if score > best {
                    best = score;
                    step = candidate_step;
                }
            }

            scores[at(i, j)] = best;
            steps[at(i, j)] = step;
        }
    }

    let mut aligned_left = Vec::with_capacity(rows + cols);
    let mut aligned_right = Vec::with_capacity(rows + cols);
    let (mut i, mut j) = (left.len(), right.len());

    while i > 0 || j > 0 {
        match steps[at(i, j)] {
            Step::Diagonal => {
                aligned_left.push(Some(left[i - 1]));
                aligned_right.push(Some(right[j - 1]));
                i -= 1;
                j -= 1;
            }
            Step::LeftGap => {
                aligned_left.push(None);
                aligned_right.push(Some(right[j - 1]));
                j -= 1;
            }
            Step::RightGap => {
                aligned_left.push(Some(left[i - 1]));
                aligned_right.push(None);
                i -= 1;
            }
        }
    }

    aligned_left.reverse();
    aligned_right.reverse();

    Alignment {
        score: scores[at(rows - 1, cols - 1)],
        left: aligned_left,
        right: aligned_right,
    }
}
