//! CLI integration tests using assert_cmd, driving the interactive
//! session through piped stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gramcheck() -> Command {
    Command::cargo_bin("gramcheck").unwrap()
}

const BANK: &str = r#"
{
  "sets": {
    "s1": {
      "title": "Set 1",
      "summary": "Have/has + past participle.",
      "questions": [
        {
          "type": "mc",
          "question": "I ___ to the shop.",
          "options": {"a": "go", "b": "goes"},
          "correct_option": "a",
          "explanation": "First person takes 'go'."
        },
        {
          "type": "open",
          "prompt": "How often? (three times)",
          "answers": ["three times"],
          "explanation": "Frequency phrase."
        }
      ]
    }
  }
}
"#;

fn seed_bank() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("questions.json"), BANK).unwrap();
    dir
}

#[test]
fn play_full_set_and_persist_score() {
    let dir = seed_bank();
    gramcheck()
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("1\n\nn\na\nThree   Times\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available sets:"))
        .stdout(predicate::str::contains("Set 1 (2 questions)"))
        .stdout(predicate::str::contains("Quiz finished! Score: 2 / 2"))
        .stdout(predicate::str::contains("Rule summary:"));

    let scores = std::fs::read_to_string(dir.path().join("scores.json")).unwrap();
    assert!(scores.contains("\"set_id\": \"s1\""));
    assert!(scores.contains("\"score\": 2"));
}

#[test]
fn play_truncates_to_requested_count() {
    let dir = seed_bank();
    gramcheck()
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("1\n1\nn\na\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Question 1 of 1 ---"))
        .stdout(predicate::str::contains("Quiz finished! Score: 1 / 1"));
}

#[test]
fn play_export_writes_review_file() {
    let dir = seed_bank();
    gramcheck()
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("1\n\nn\nb\nwrong\nn\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    let review = std::fs::read_to_string(dir.path().join("review_wrong_answers.txt")).unwrap();
    assert!(review.contains("Review: Wrong answers – Set 1"));
    assert!(review.contains("Correct answer: go"));
    assert!(review.contains("Correct answer: three times"));
}

#[test]
fn play_quit_immediately() {
    let dir = seed_bank();
    gramcheck()
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bye!"));
}

#[test]
fn play_without_data_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    gramcheck()
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "No question sets and no curriculum",
        ));
}

#[test]
fn validate_valid_bank() {
    let dir = seed_bank();
    gramcheck()
        .arg("validate")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sets, 2 questions"))
        .stdout(predicate::str::contains("All data files valid."));
}

#[test]
fn validate_missing_bank_fails() {
    let dir = tempfile::tempdir().unwrap();
    gramcheck()
        .arg("validate")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn validate_rejects_malformed_question() {
    let dir = tempfile::tempdir().unwrap();
    let bad = r#"{"sets": {"s1": {"questions": [
      {"type": "mc", "question": "Pick.", "options": {"a": "x"},
       "correct_option": "z", "explanation": "e"}
    ]}}}"#;
    std::fs::write(dir.path().join("questions.json"), bad).unwrap();
    gramcheck()
        .arg("validate")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("correct_option"));
}

#[test]
fn validate_warns_on_empty_set() {
    let dir = tempfile::tempdir().unwrap();
    let bank = r#"{"sets": {"empty": {"title": "Empty"}}}"#;
    std::fs::write(dir.path().join("questions.json"), bank).unwrap();
    gramcheck()
        .arg("validate")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING: set has no questions"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn scores_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    gramcheck()
        .arg("scores")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No scores recorded yet."));
}

#[test]
fn scores_table_after_runs() {
    let dir = seed_bank();
    gramcheck()
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("1\n\nn\na\nthree times\n")
        .assert()
        .success();

    gramcheck()
        .arg("scores")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("s1"))
        .stdout(predicate::str::contains("2/2"))
        .stdout(predicate::str::contains("1 runs recorded."));
}

#[test]
fn help_describes_the_tool() {
    gramcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive command-line grammar quiz"));
}
