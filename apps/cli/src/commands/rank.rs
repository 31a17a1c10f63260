use lexoral_align::{Scoring, TranscriptOption, align, rank};

pub fn run(typed: &str, candidates: &[String], verbose: bool) -> anyhow::Result<()> {
    if verbose {
        for candidate in candidates {
            eprintln!("{}", alignment(typed, candidate));
        }
    }

    for line in ranked(typed, candidates) {
        println!("{line}");
    }
    Ok(())
}

// Command-line candidates carry no confidence of their own.
fn ranked(typed: &str, candidates: &[String]) -> Vec<String> {
    let options: Vec<TranscriptOption> = candidates
        .iter()
        .map(|text| TranscriptOption::new(text.as_str(), 1.0))
        .collect();
    rank(typed, &options)
}

fn alignment(typed: &str, candidate: &str) -> String {
    let left: Vec<char> = typed.chars().collect();
    let right: Vec<char> = candidate.chars().collect();
    let alignment = align(&left, &right, &Scoring::completion());
    let (left, right) = alignment.render('-');
    format!("{candidate} (score {})\n  {left}\n  {right}", alignment.score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_completion_comes_first() {
        let candidates = vec!["cabin".to_string(), "cab".to_string()];
        assert_eq!(ranked("cab", &candidates), ["cab", "cabin"]);
    }

    #[test]
    fn alignment_shows_gaps_and_score() {
        assert_eq!(alignment("ca", "cats"), "cats (score 0)\n  ca--\n  cats");
    }
}
