//! Plain-text review export for wrong answers.
//!
//! The file is human-readable output only, overwritten on every export,
//! and never re-parsed by the program.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::model::Question;

/// Render the review document for the given wrong-answer indices into
/// `questions` (the as-run list). An empty index list still yields a
/// valid header-only document.
pub fn render_review(set_title: &str, questions: &[Question], wrong: &[usize]) -> String {
    let mut lines = vec![
        "=".repeat(60),
        format!("Review: Wrong answers – {set_title}"),
        format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M")),
        "=".repeat(60),
        String::new(),
    ];

    for &i in wrong {
        let Some(q) = questions.get(i) else { continue };
        lines.push("-".repeat(40));
        lines.push(match q {
            Question::MultipleChoice { .. } => "Question:".into(),
            Question::Open { .. } => "Prompt:".into(),
        });
        lines.push(q.text().trim().to_string());
        lines.push(String::new());
        lines.push(format!("Correct answer: {}", q.correct_answer_text()));
        lines.push(String::new());
        lines.push(format!("Explanation: {}", q.explanation()));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Write the review document, fully overwriting any previous export.
pub fn write_review(
    path: &Path,
    set_title: &str,
    questions: &[Question],
    wrong: &[usize],
) -> Result<()> {
    let content = render_review(set_title, questions, wrong);
    std::fs::write(path, content)
        .with_context(|| format!("failed to write review file to {}", path.display()))?;
    Ok(())
}
