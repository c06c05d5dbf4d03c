//! Session orchestration: topic selection, mode menus, and post-run
//! prompts.
//!
//! The flow is a small state machine: TopicSelect (only with a
//! multi-topic manifest) → ModeSelect (only if the topic has a
//! curriculum file) → set/section runs → post-run retry/export → back to
//! ModeSelect or exit. `0` quits at every menu. Invalid numeric input
//! re-prompts. There is no process-wide state; the chosen topic lives in
//! a `SessionConfig` threaded through the calls.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use gramcheck_core::history::{self, ScoreEntry, SetStats};
use gramcheck_core::model::{Question, QuestionSet, Topic, COMBINED_SET_ID};
use gramcheck_core::parser;
use gramcheck_core::review;

use crate::console::{fill, Console, WRAP_WIDTH};
use crate::runner::{retry_wrong, run_questions, RunOptions, RunOutcome};

/// File names inside the data directory.
const QUESTIONS_FILE: &str = "questions.json";
const MANIFEST_FILE: &str = "manifest.json";
const SCORES_FILE: &str = "scores.json";
const REVIEW_FILE: &str = "review_wrong_answers.txt";

/// Where the data lives and which topic is active.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    pub topic: Topic,
}

impl SessionConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            topic: Topic::default(),
        }
    }

    pub fn questions_path(&self) -> PathBuf {
        self.data_dir.join(QUESTIONS_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(MANIFEST_FILE)
    }

    pub fn curriculum_path(&self) -> PathBuf {
        self.data_dir.join(&self.topic.curriculum)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join(SCORES_FILE)
    }

    pub fn review_path(&self) -> PathBuf {
        self.data_dir.join(REVIEW_FILE)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Normal exit, including the user quitting from a menu.
    Finished,
    /// Neither question sets nor a curriculum exist for the topic; the
    /// caller should exit non-zero.
    NoData,
}

/// Result of one menu interaction: keep going or leave the session.
enum Flow {
    Continue,
    Quit,
}

/// An interactive quiz session over arbitrary line-based I/O.
pub struct Session<R, W> {
    console: Console<R, W>,
    config: SessionConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: SessionConfig, input: R, output: W) -> Self {
        Self {
            console: Console::new(input, output),
            config,
        }
    }

    /// Run the whole interactive session to completion.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        let bank = match parser::load_question_bank(&self.config.questions_path()) {
            Ok(bank) => bank,
            Err(e) if e.is_missing() => {
                self.console.say(format!(
                    "{QUESTIONS_FILE} not found. Please add it to {}.",
                    self.config.data_dir.display()
                ))?;
                Default::default()
            }
            Err(e) => {
                self.console.say(format!("Invalid {QUESTIONS_FILE}: {e}"))?;
                Default::default()
            }
        };

        match parser::load_manifest(&self.config.manifest_path()) {
            Ok(Some(topics)) if !topics.is_empty() => {
                match self.choose_topic(&topics)? {
                    Some(topic) => self.config.topic = topic,
                    None => return Ok(SessionOutcome::Finished),
                }
            }
            Ok(_) => {}
            Err(e) => {
                self.console.say(format!(
                    "Invalid {MANIFEST_FILE}: {e}. Continuing with the default topic."
                ))?;
            }
        }

        let sets = bank.sets(&self.config.topic.questions_key);
        let has_curriculum = self.config.curriculum_path().exists();

        if sets.is_empty() && !has_curriculum {
            self.console
                .say("No question sets and no curriculum for this topic.")?;
            return Ok(SessionOutcome::NoData);
        }

        self.console.banner(&self.config.topic.title)?;

        if has_curriculum {
            self.mode_menu(sets)?;
        } else {
            self.free_practice(sets)?;
        }
        Ok(SessionOutcome::Finished)
    }

    /// Topic menu. `None` means the user quit.
    fn choose_topic(&mut self, topics: &[Topic]) -> Result<Option<Topic>> {
        self.console.banner("Grammar Quiz – Choose topic")?;
        for (i, t) in topics.iter().enumerate() {
            self.console.say(format!("  {}) {}", i + 1, t.title))?;
        }
        self.console.say("  0) Quit")?;

        loop {
            let choice = self.console.prompt("\nChoose a topic (number): ")?;
            if choice == "0" {
                self.console.say("Bye!")?;
                return Ok(None);
            }
            if let Ok(idx) = choice.parse::<usize>() {
                if (1..=topics.len()).contains(&idx) {
                    return Ok(Some(topics[idx - 1].clone()));
                }
            }
            self.console.say("Please enter a valid number.")?;
        }
    }

    /// Mode menu shown when the topic has a curriculum.
    fn mode_menu(&mut self, sets: &[QuestionSet]) -> Result<()> {
        self.console.say("\n  1) Part 1: Intro, rules & test")?;
        self.console.say(
            "  2) Part 2: Practice (gap fill → error correction → making sentences → making questions)",
        )?;
        self.console.say("  3) Part 3: Free practice (choose a set)")?;
        self.console.say("  0) Quit")?;

        loop {
            let choice = self.console.prompt("\nChoose 1, 2, 3, or 0: ")?;
            match choice.as_str() {
                "0" => {
                    self.console.say("Bye!")?;
                    return Ok(());
                }
                "1" => self.part1()?,
                "2" => self.part2()?,
                "3" => {
                    if sets.is_empty() {
                        self.console.say("No question sets for this topic.")?;
                    } else if let Flow::Quit = self.free_practice(sets)? {
                        return Ok(());
                    }
                }
                _ => self.console.say("Please enter 1, 2, 3, or 0.")?,
            }
        }
    }

    /// Part 1: intro sections with pacing, then the knowledge check.
    fn part1(&mut self) -> Result<()> {
        let Some(curriculum) = self.load_curriculum_or_report()? else {
            return Ok(());
        };

        self.console.say("\n--- Part 1: Intro, rules & test ---")?;

        self.console.banner(&curriculum.intro.title)?;
        for section in &curriculum.intro.sections {
            self.console.say(format!("\n--- {} ---\n", section.title))?;
            self.console.say(fill(&section.content, WRAP_WIDTH))?;
            self.console.pause("\nPress Enter to continue...")?;
        }
        self.console.say(format!("\n{}", "-".repeat(60)))?;

        if curriculum.check.questions.is_empty() {
            self.console.say("\nPart 1 complete.")?;
        } else {
            let outcome = run_questions(
                &mut self.console,
                &curriculum.check.title,
                &curriculum.check.questions,
                RunOptions::default(),
            )?;
            self.save_score("part1_check", "Part 1 – Test", &outcome);
            self.console.say(format!(
                "\nPart 1 complete. Score: {}/{}",
                outcome.score, outcome.total
            ))?;
        }
        self.console.pause("Press Enter to return to menu...")?;
        Ok(())
    }

    /// Part 2: the practice sections in curriculum order, each shuffled,
    /// each scored separately, with a combined total at the end.
    fn part2(&mut self) -> Result<()> {
        let Some(curriculum) = self.load_curriculum_or_report()? else {
            return Ok(());
        };

        self.console.say("\n--- Part 2: Practice ---")?;

        let mut total_score: u32 = 0;
        let mut total_questions: usize = 0;

        for key in &curriculum.practice_order {
            let Some(section) = curriculum.practice.get(key) else {
                continue;
            };
            if section.questions.is_empty() {
                continue;
            }

            let opts = RunOptions {
                shuffle: true,
                max_questions: None,
            };
            let outcome =
                run_questions(&mut self.console, &section.title, &section.questions, opts)?;
            total_score += outcome.score;
            total_questions += outcome.total;
            self.save_score(&format!("part2_{key}"), &section.title, &outcome);

            if !outcome.wrong.is_empty()
                && self
                    .console
                    .yes_no("\nRetry the questions you got wrong in this section? (y/n): ")?
            {
                retry_wrong(&mut self.console, &outcome.questions, &outcome.wrong)?;
            }
            self.console
                .pause("\nPress Enter to continue to the next section...")?;
        }

        self.console.banner("Part 2 complete!")?;
        self.console.say(format!(
            "Total practice score: {total_score}/{total_questions}"
        ))?;
        self.append_entry(ScoreEntry::new(
            "part2_full",
            "Part 2 – Practice",
            total_score,
            total_questions as u32,
        ));
        self.console.pause("Press Enter to return to menu...")?;
        Ok(())
    }

    /// Part 3 / standalone mode: pick a set (or all sets combined), run
    /// it with optional truncation and shuffle, then offer retry and
    /// export.
    fn free_practice(&mut self, sets: &[QuestionSet]) -> Result<Flow> {
        if sets.is_empty() {
            self.console
                .say(format!("No question sets found in {QUESTIONS_FILE}."))?;
            return Ok(Flow::Continue);
        }

        self.console.banner("English Grammar Check")?;

        let history = history::load_history_or_empty(&self.config.scores_path());
        let stats = history::stats_by_set(&history);
        self.show_scoreboard(sets, &stats)?;

        self.console.say("\nAvailable sets:")?;
        for (i, set) in sets.iter().enumerate() {
            self.console.say(format!(
                "  {}) {} ({} questions)",
                i + 1,
                set.title,
                set.questions.len()
            ))?;
        }
        self.console
            .say(format!("  {}) All sets (combined)", sets.len() + 1))?;
        self.console.say("  0) Quit")?;

        let choice = loop {
            let raw = self.console.prompt("\nChoose a set (number): ")?;
            if raw == "0" {
                self.console.say("Bye!")?;
                return Ok(Flow::Quit);
            }
            if let Ok(n) = raw.parse::<usize>() {
                if (1..=sets.len() + 1).contains(&n) {
                    break n;
                }
            }
            self.console.say("Please enter a valid number.")?;
        };

        let (questions, title, set_id, summary) = if choice == sets.len() + 1 {
            let all: Vec<Question> = sets
                .iter()
                .flat_map(|s| s.questions.iter().cloned())
                .collect();
            (
                all,
                "All sets combined".to_string(),
                COMBINED_SET_ID.to_string(),
                "Mixed practice from all sets.".to_string(),
            )
        } else {
            let set = &sets[choice - 1];
            (
                set.questions.clone(),
                set.title.clone(),
                set.id.clone(),
                set.summary.clone(),
            )
        };

        let total_available = questions.len();
        self.console
            .say(format!("\nThis set has {total_available} questions."))?;
        if let Some(s) = stats.get(&set_id) {
            if let Some(last) = s.last {
                self.console
                    .say(format!("  Last score for this set: {last}"))?;
            }
            if let Some(best) = s.best {
                if s.last != Some(best) {
                    self.console
                        .say(format!("  Best score for this set:  {best}"))?;
                }
            }
        }

        let max_raw = self.console.prompt("How many to attempt? (Enter for all): ")?;
        let max_questions = if max_raw.is_empty() {
            None
        } else {
            max_raw
                .parse::<usize>()
                .ok()
                .map(|n| n.max(1).min(total_available.max(1)))
        };

        let shuffle = self.console.yes_no("Shuffle order? (y/n, default n): ")?;

        let opts = RunOptions {
            shuffle,
            max_questions,
        };
        let outcome = run_questions(&mut self.console, &title, &questions, opts)?;
        self.save_score(&set_id, &title, &outcome);

        self.console.banner(&format!(
            "Quiz finished! Score: {} / {}",
            outcome.score, outcome.total
        ))?;
        if !summary.is_empty() {
            self.console.say("\nRule summary:")?;
            self.console.say(fill(&summary, WRAP_WIDTH))?;
        }

        if !outcome.wrong.is_empty() {
            if self
                .console
                .yes_no("\nRetry the questions you got wrong? (y/n): ")?
            {
                retry_wrong(&mut self.console, &outcome.questions, &outcome.wrong)?;
            }
            if self
                .console
                .yes_no("Save wrong answers to a file for review? (y/n): ")?
            {
                let path = self.config.review_path();
                match review::write_review(&path, &title, &outcome.questions, &outcome.wrong) {
                    Ok(()) => self.console.say(format!("Saved to: {}", path.display()))?,
                    Err(e) => {
                        tracing::warn!("review export failed: {e:#}");
                        self.console.say(format!("Could not save the review: {e}"))?;
                    }
                }
            }
        }

        self.console
            .say("\nDone. Run the program again to try another set or options.")?;
        Ok(Flow::Continue)
    }

    /// Prior last/best lines at the top of the set menu.
    fn show_scoreboard(
        &mut self,
        sets: &[QuestionSet],
        stats: &std::collections::HashMap<String, SetStats>,
    ) -> Result<()> {
        if !sets.iter().any(|s| stats.contains_key(&s.id)) && !stats.contains_key(COMBINED_SET_ID)
        {
            return Ok(());
        }
        self.console.say("\nYour scores:")?;
        for set in sets {
            let Some(s) = stats.get(&set.id) else { continue };
            let Some(last) = s.last else { continue };
            let best_str = match s.best {
                Some(best) if Some(best) != s.last => format!(" (best: {best})"),
                _ => String::new(),
            };
            self.console
                .say(format!("  {}: last {last}{best_str}", set.title))?;
        }
        if let Some(last) = stats.get(COMBINED_SET_ID).and_then(|s| s.last) {
            self.console
                .say(format!("  All sets combined: last {last}"))?;
        }
        Ok(())
    }

    /// Load the active topic's curriculum, reporting problems to the
    /// user instead of failing; `None` aborts just that menu action.
    fn load_curriculum_or_report(
        &mut self,
    ) -> Result<Option<gramcheck_core::model::Curriculum>> {
        let path = self.config.curriculum_path();
        match parser::load_curriculum(&path) {
            Ok(c) => Ok(Some(c)),
            Err(e) if e.is_missing() => {
                self.console
                    .say(format!("{} not found.", file_name(&path)))?;
                Ok(None)
            }
            Err(e) => {
                self.console
                    .say(format!("Invalid {}: {e}", file_name(&path)))?;
                Ok(None)
            }
        }
    }

    fn save_score(&mut self, set_id: &str, set_title: &str, outcome: &RunOutcome) {
        self.append_entry(ScoreEntry::new(
            set_id,
            set_title,
            outcome.score,
            outcome.total as u32,
        ));
    }

    /// Best-effort: a failed save is logged and never interrupts play.
    fn append_entry(&mut self, entry: ScoreEntry) {
        if let Err(e) = history::append_score(&self.config.scores_path(), entry) {
            tracing::warn!("failed to save score: {e:#}");
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
