//! Core data model types for gramcheck.
//!
//! These are the validated types the rest of the system works with.
//! Raw JSON records are converted into them once, at load time, by the
//! `parser` module; after that no lookup on a question can fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Practice section keys in their canonical run order, used when a
/// curriculum does not declare `practice_order` itself.
pub const DEFAULT_PRACTICE_ORDER: [&str; 4] =
    ["gapfill", "errorcorrection", "makesentence", "makequestion"];

/// Set id under which an "all sets combined" run is recorded.
pub const COMBINED_SET_ID: &str = "all";

/// A quiz topic: which curriculum file and question-bank key to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Stable topic identifier.
    pub id: String,
    /// Human-readable title shown in menus and banners.
    pub title: String,
    /// Curriculum file name, relative to the data directory.
    pub curriculum: String,
    /// Key into the question bank holding this topic's sets.
    pub questions_key: String,
}

impl Default for Topic {
    fn default() -> Self {
        Self {
            id: "default".into(),
            title: "Present Perfect Simple vs Continuous".into(),
            curriculum: "curriculum.json".into(),
            questions_key: "sets".into(),
        }
    }
}

/// A single quiz question with exactly one correctness rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    /// Pick one labeled option; correct iff the label equals
    /// `correct_option`.
    #[serde(rename = "mc")]
    MultipleChoice {
        question: String,
        /// Label → option text, displayed in label order.
        options: BTreeMap<String, String>,
        correct_option: String,
        explanation: String,
    },
    /// Free-text answer; correct iff the normalized input equals the
    /// normalization of any accepted answer.
    #[serde(rename = "open")]
    Open {
        prompt: String,
        answers: Vec<String>,
        explanation: String,
    },
}

impl Question {
    /// The stem or prompt text shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice { question, .. } => question,
            Question::Open { prompt, .. } => prompt,
        }
    }

    /// The explanation shown after the question is answered.
    pub fn explanation(&self) -> &str {
        match self {
            Question::MultipleChoice { explanation, .. } => explanation,
            Question::Open { explanation, .. } => explanation,
        }
    }

    /// Short display string for the correct answer, used by the review
    /// export: the correct option's text for MC, all accepted answers
    /// joined with " / " for open questions.
    pub fn correct_answer_text(&self) -> String {
        match self {
            Question::MultipleChoice {
                options,
                correct_option,
                ..
            } => options.get(correct_option).cloned().unwrap_or_default(),
            Question::Open { answers, .. } => answers.join(" / "),
        }
    }
}

/// A named, ordered collection of questions presentable as one quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Stable identifier; also the score-history key.
    pub id: String,
    pub title: String,
    /// Rule summary printed after a completed run, if any.
    #[serde(default)]
    pub summary: String,
    pub questions: Vec<Question>,
}

/// All question sets, grouped by topic questions-key.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    sets_by_key: BTreeMap<String, Vec<QuestionSet>>,
}

impl QuestionBank {
    pub fn new(sets_by_key: BTreeMap<String, Vec<QuestionSet>>) -> Self {
        Self { sets_by_key }
    }

    /// The sets under one questions-key, in stored order. Unknown keys
    /// yield an empty slice.
    pub fn sets(&self, questions_key: &str) -> &[QuestionSet] {
        self.sets_by_key
            .get(questions_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sets_by_key.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sets_by_key.values().all(Vec::is_empty)
    }
}

/// An optional guided lesson flow layered on top of question data.
#[derive(Debug, Clone)]
pub struct Curriculum {
    pub intro: Intro,
    /// Knowledge-check questions run after the intro.
    pub check: CheckSection,
    /// Practice sections keyed by section key (gapfill, ...).
    pub practice: BTreeMap<String, PracticeSection>,
    /// Explicit sequencing of practice section keys.
    pub practice_order: Vec<String>,
}

/// Intro material: ordered sections of title + prose content.
#[derive(Debug, Clone, Default)]
pub struct Intro {
    pub title: String,
    pub sections: Vec<IntroSection>,
}

#[derive(Debug, Clone)]
pub struct IntroSection {
    pub title: String,
    pub content: String,
}

/// The curriculum's knowledge check.
#[derive(Debug, Clone, Default)]
pub struct CheckSection {
    pub title: String,
    pub questions: Vec<Question>,
}

/// One practice section (gap fill, error correction, ...).
#[derive(Debug, Clone)]
pub struct PracticeSection {
    pub title: String,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc_question() -> Question {
        Question::MultipleChoice {
            question: "She ___ here since 2019.".into(),
            options: BTreeMap::from([
                ("a".to_string(), "has worked".to_string()),
                ("b".to_string(), "works".to_string()),
            ]),
            correct_option: "a".into(),
            explanation: "Unfinished period with 'since'.".into(),
        }
    }

    #[test]
    fn mc_correct_answer_text_is_option_text() {
        assert_eq!(mc_question().correct_answer_text(), "has worked");
    }

    #[test]
    fn open_correct_answer_text_joins_answers() {
        let q = Question::Open {
            prompt: "Rewrite the sentence.".into(),
            answers: vec!["I have been waiting".into(), "I've been waiting".into()],
            explanation: "Continuous for duration.".into(),
        };
        assert_eq!(
            q.correct_answer_text(),
            "I have been waiting / I've been waiting"
        );
    }

    #[test]
    fn question_serde_roundtrip() {
        let q = mc_question();
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
        assert!(json.contains("\"type\":\"mc\""));
    }

    #[test]
    fn bank_unknown_key_is_empty() {
        let bank = QuestionBank::default();
        assert!(bank.sets("nope").is_empty());
        assert!(bank.is_empty());
    }
}
