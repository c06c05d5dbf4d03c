//! Question presentation.
//!
//! Prints one question, blocks for the answer, reports correctness, and
//! always prints the explanation afterwards.

use std::io::{self, BufRead, Write};

use gramcheck_core::matcher::answer_matches;
use gramcheck_core::model::Question;

use crate::console::Console;

/// Present one question and return whether it was answered correctly.
pub fn ask_question<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    q: &Question,
    number: usize,
    total: usize,
) -> io::Result<bool> {
    console.say(format!("\n--- Question {number} of {total} ---"))?;
    match q {
        Question::MultipleChoice {
            question,
            options,
            correct_option,
            explanation,
        } => ask_mc(console, question, options, correct_option, explanation),
        Question::Open {
            prompt,
            answers,
            explanation,
        } => ask_open(console, prompt, answers, explanation),
    }
}

fn ask_mc<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    question: &str,
    options: &std::collections::BTreeMap<String, String>,
    correct_option: &str,
    explanation: &str,
) -> io::Result<bool> {
    console.say(question)?;
    for (label, text) in options {
        console.say(format!("  {label}) {text}"))?;
    }

    let labels: Vec<&str> = options.keys().map(String::as_str).collect();
    let choice_prompt = format!("Your choice ({}): ", labels.join("/"));
    let choice = loop {
        let answer = console.prompt(&choice_prompt)?.to_lowercase();
        if options.contains_key(&answer) {
            break answer;
        }
        console.say(format!("Please type {}.", labels.join(", ")))?;
    };

    let is_correct = choice == correct_option;
    if is_correct {
        console.say("✅ Correct!")?;
    } else {
        let correct_text = &options[correct_option];
        console.say(format!(
            "❌ Incorrect. Correct answer: {correct_option}) {correct_text}"
        ))?;
    }
    console.say(format!("Explanation: {explanation}"))?;
    Ok(is_correct)
}

fn ask_open<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    answers: &[String],
    explanation: &str,
) -> io::Result<bool> {
    console.say(prompt)?;
    let user_answer = console.prompt("Your answer: ")?;
    let is_correct = answer_matches(&user_answer, answers);
    if is_correct {
        console.say("✅ Correct!")?;
    } else {
        console.say("❌ Incorrect.")?;
        console.say(format!("Correct answer(s): {}", answers.join(" / ")))?;
    }
    console.say(format!("Explanation: {explanation}"))?;
    Ok(is_correct)
}
