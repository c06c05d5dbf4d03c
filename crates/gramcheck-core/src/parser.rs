//! JSON loaders for the question bank, manifest, and curriculum.
//!
//! Raw records are deserialized into permissive intermediate structs and
//! then converted into validated model types. Malformed questions are
//! rejected here, at load time, with a specific error naming the set and
//! index — never deferred to presentation time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::DataError;
use crate::matcher::normalize;
use crate::model::{
    CheckSection, Curriculum, Intro, IntroSection, PracticeSection, Question, QuestionBank,
    QuestionSet, Topic, DEFAULT_PRACTICE_ORDER,
};

/// Intermediate structure for a raw question record. Every field is
/// optional here; `convert_question` decides what is actually required.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    options: Option<BTreeMap<String, String>>,
    #[serde(default)]
    correct_option: Option<String>,
    #[serde(default)]
    answers: Option<Vec<String>>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSet {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    topics: Vec<RawTopic>,
}

#[derive(Debug, Deserialize)]
struct RawTopic {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    curriculum: Option<String>,
    #[serde(default)]
    questions_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCurriculum {
    #[serde(default)]
    intro: Option<RawIntro>,
    #[serde(default)]
    check: Option<RawCheck>,
    #[serde(default)]
    practice: BTreeMap<String, RawSet>,
    #[serde(default)]
    practice_order: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawIntro {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    sections: Vec<RawIntroSection>,
}

#[derive(Debug, Deserialize)]
struct RawIntroSection {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: String,
}

/// The check block is either `{title?, questions}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCheck {
    Titled {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        questions: Vec<RawQuestion>,
    },
    Bare(Vec<RawQuestion>),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataError::MissingFile(path.to_path_buf())
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|e| DataError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn convert_question(raw: RawQuestion, set_id: &str, index: usize) -> Result<Question, DataError> {
    let fail = |reason: String| DataError::MalformedQuestion {
        set_id: set_id.to_string(),
        index,
        reason,
    };

    let explanation = raw
        .explanation
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| fail("missing explanation".into()))?;

    if raw.kind == "mc" {
        let question = raw
            .question
            .or(raw.prompt)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| fail("multiple-choice question has no text".into()))?;
        let options = raw
            .options
            .filter(|o| !o.is_empty())
            .ok_or_else(|| fail("multiple-choice question has no options".into()))?;
        let correct_option = raw
            .correct_option
            .ok_or_else(|| fail("missing correct_option".into()))?;
        if !options.contains_key(&correct_option) {
            return Err(fail(format!(
                "correct_option '{correct_option}' is not one of the options"
            )));
        }
        Ok(Question::MultipleChoice {
            question,
            options,
            correct_option,
            explanation,
        })
    } else {
        // open, gapfill, errorcorrection, makesentence, makequestion
        let prompt = raw
            .prompt
            .or(raw.question)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| fail(format!("'{}' question has no prompt text", raw.kind)))?;
        let answers = raw
            .answers
            .filter(|a| !a.is_empty())
            .ok_or_else(|| fail("open question has no accepted answers".into()))?;
        Ok(Question::Open {
            prompt,
            answers,
            explanation,
        })
    }
}

fn convert_questions(
    raw: Vec<RawQuestion>,
    set_id: &str,
) -> Result<Vec<Question>, DataError> {
    raw.into_iter()
        .enumerate()
        .map(|(i, q)| convert_question(q, set_id, i))
        .collect()
}

/// Load and validate the whole question bank.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank, DataError> {
    let raw: BTreeMap<String, BTreeMap<String, RawSet>> = read_json(path)?;

    let mut sets_by_key = BTreeMap::new();
    for (key, sets) in raw {
        let mut converted = Vec::with_capacity(sets.len());
        for (set_id, raw_set) in sets {
            let questions = convert_questions(raw_set.questions, &set_id)?;
            converted.push(QuestionSet {
                title: raw_set.title.unwrap_or_else(|| set_id.clone()),
                summary: raw_set.summary,
                questions,
                id: set_id,
            });
        }
        sets_by_key.insert(key, converted);
    }
    Ok(QuestionBank::new(sets_by_key))
}

/// Load the topic manifest. `Ok(None)` means there is no manifest file,
/// which callers treat as "single implicit topic".
pub fn load_manifest(path: &Path) -> Result<Option<Vec<Topic>>, DataError> {
    let raw: RawManifest = match read_json(path) {
        Ok(m) => m,
        Err(e) if e.is_missing() => return Ok(None),
        Err(e) => return Err(e),
    };

    let defaults = Topic::default();
    let topics = raw
        .topics
        .into_iter()
        .map(|t| Topic {
            title: t.title.unwrap_or_else(|| t.id.clone()),
            curriculum: t.curriculum.unwrap_or_else(|| defaults.curriculum.clone()),
            questions_key: t
                .questions_key
                .unwrap_or_else(|| defaults.questions_key.clone()),
            id: t.id,
        })
        .collect();
    Ok(Some(topics))
}

/// Load and validate a curriculum file.
pub fn load_curriculum(path: &Path) -> Result<Curriculum, DataError> {
    let raw: RawCurriculum = read_json(path)?;

    let intro = match raw.intro {
        Some(i) => Intro {
            title: i.title.unwrap_or_else(|| "Introduction".into()),
            sections: i
                .sections
                .into_iter()
                .enumerate()
                .map(|(n, s)| IntroSection {
                    title: s.title.unwrap_or_else(|| format!("Part {}", n + 1)),
                    content: s.content,
                })
                .collect(),
        },
        None => Intro {
            title: "Introduction".into(),
            sections: Vec::new(),
        },
    };

    let check = match raw.check {
        Some(RawCheck::Titled { title, questions }) => CheckSection {
            title: title.unwrap_or_else(|| "Test your understanding".into()),
            questions: convert_questions(questions, "check")?,
        },
        Some(RawCheck::Bare(questions)) => CheckSection {
            title: "Test your understanding".into(),
            questions: convert_questions(questions, "check")?,
        },
        None => CheckSection::default(),
    };

    let mut practice = BTreeMap::new();
    for (key, raw_set) in raw.practice {
        let questions = convert_questions(raw_set.questions, &key)?;
        let title = raw_set.title.unwrap_or_else(|| titlecase_key(&key));
        practice.insert(key, PracticeSection { title, questions });
    }

    let practice_order = raw
        .practice_order
        .unwrap_or_else(|| DEFAULT_PRACTICE_ORDER.iter().map(|s| s.to_string()).collect());

    Ok(Curriculum {
        intro,
        check,
        practice,
        practice_order,
    })
}

/// "error_correction" → "Error Correction", for sections with no title.
fn titlecase_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A non-fatal finding from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The set id the warning applies to, if any.
    pub set_id: Option<String>,
    pub message: String,
}

/// Check a loaded bank for issues that load-time validation tolerates
/// but an author probably wants to know about.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for key in bank.keys() {
        for set in bank.sets(key) {
            if set.questions.is_empty() {
                warnings.push(ValidationWarning {
                    set_id: Some(set.id.clone()),
                    message: "set has no questions".into(),
                });
            }
            for (i, q) in set.questions.iter().enumerate() {
                match q {
                    Question::MultipleChoice { options, .. } if options.len() < 2 => {
                        warnings.push(ValidationWarning {
                            set_id: Some(set.id.clone()),
                            message: format!("question {} has fewer than 2 options", i + 1),
                        });
                    }
                    Question::Open { answers, .. } => {
                        let mut seen = std::collections::HashSet::new();
                        for a in answers {
                            if !seen.insert(normalize(a)) {
                                warnings.push(ValidationWarning {
                                    set_id: Some(set.id.clone()),
                                    message: format!(
                                        "question {} has duplicate accepted answer '{a}' \
                                         after normalization",
                                        i + 1
                                    ),
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    warnings
}
