//! Set/section runner.
//!
//! Runs an ordered sequence of questions, with optional shuffle and
//! truncation, and reports the outcome. The same runner serves
//! free-practice sets, curriculum checks, and practice sections; they
//! differ only in title and options.

use std::io::{self, BufRead, Write};

use gramcheck_core::model::Question;
use rand::seq::SliceRandom;

use crate::console::Console;
use crate::present::ask_question;

/// How to run a set of questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Uniform random permutation before running; not reproducible
    /// across runs by design.
    pub shuffle: bool,
    /// Keep only the first N questions, applied after shuffling.
    pub max_questions: Option<usize>,
}

/// The result of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Count of questions answered correctly.
    pub score: u32,
    /// Count of questions actually presented.
    pub total: usize,
    /// Indices into `questions` (the as-run ordering) answered wrong.
    pub wrong: Vec<usize>,
    /// The questions in the exact order they were run, so retry and
    /// export can recover them by index.
    pub questions: Vec<Question>,
}

/// Run one titled sequence of questions and collect the outcome.
pub fn run_questions<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    title: &str,
    questions: &[Question],
    opts: RunOptions,
) -> io::Result<RunOutcome> {
    let mut qs: Vec<Question> = questions.to_vec();
    if opts.shuffle {
        qs.shuffle(&mut rand::rng());
    }
    if let Some(max) = opts.max_questions {
        if max < qs.len() {
            qs.truncate(max);
        }
    }

    console.banner(title)?;

    let total = qs.len();
    let mut score = 0;
    let mut wrong = Vec::new();
    for (i, q) in qs.iter().enumerate() {
        if ask_question(console, q, i + 1, total)? {
            score += 1;
        } else {
            wrong.push(i);
        }
    }

    Ok(RunOutcome {
        score,
        total,
        wrong,
        questions: qs,
    })
}

/// Re-present exactly the wrong questions in their original relative
/// order. Practice only: nothing is scored or persisted.
pub fn retry_wrong<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    questions: &[Question],
    wrong: &[usize],
) -> io::Result<()> {
    if wrong.is_empty() {
        return Ok(());
    }
    let to_retry: Vec<&Question> = wrong.iter().filter_map(|&i| questions.get(i)).collect();
    console.divider("Retry: questions you got wrong")?;
    let total = to_retry.len();
    for (i, q) in to_retry.iter().enumerate() {
        ask_question(console, q, i + 1, total)?;
    }
    console.say(format!("\nRetry complete. {total} questions reviewed."))
}
