//! Prompter that answers from a queue instead of a terminal.
//!
//! Two modes:
//! - scripted: answers are consumed in order; an empty answer selects the
//!   question's default, running out of answers is a `PromptFailed` error.
//! - accept-defaults (`--yes`): every question takes its default. Questions
//!   without a default get an empty answer, except completion questions,
//!   which fail because no target can be chosen without input.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use modelsmith_core::{
    application::{ApplicationError, ports::Prompter},
    error::SmithResult,
};

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    accept_defaults: bool,
    transcript: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Prompter that takes every default.
    pub fn accept_defaults() -> Self {
        Self {
            accept_defaults: true,
            ..Self::default()
        }
    }

    /// Questions asked and lines said, in order. Said lines are prefixed
    /// with `> `.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }

    fn record(&self, line: String) {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push(line);
        }
    }

    fn next(&self, question: &str) -> SmithResult<Option<String>> {
        self.record(question.to_string());
        if self.accept_defaults {
            return Ok(None);
        }

        let mut answers = self
            .answers
            .lock()
            .map_err(|_| prompt_failed("answer queue poisoned".into()))?;
        let answer = answers
            .pop_front()
            .ok_or_else(|| prompt_failed(format!("no answer left for: {question}")))?;
        debug!(%question, %answer, "Scripted answer");
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str, default: Option<&str>) -> SmithResult<String> {
        Ok(self
            .next(question)?
            .or_else(|| default.map(str::to_string))
            .unwrap_or_default())
    }

    fn confirm(&self, question: &str, default: bool) -> SmithResult<bool> {
        Ok(match self.next(question)? {
            None => default,
            Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes" | "true"),
        })
    }

    fn ask_with_completion(
        &self,
        question: &str,
        _candidates: &[String],
        default: Option<&str>,
    ) -> SmithResult<String> {
        match (self.next(question)?, default) {
            (Some(answer), _) => Ok(answer),
            (None, Some(default)) => Ok(default.to_string()),
            (None, None) if self.accept_defaults => Err(prompt_failed(format!(
                "'{question}' needs an answer and has no default"
            ))),
            (None, None) => Ok(String::new()),
        }
    }

    fn say(&self, line: &str) {
        self.record(format!("> {line}"));
    }
}

fn prompt_failed(reason: String) -> modelsmith_core::error::SmithError {
    ApplicationError::PromptFailed { reason }.into()
}
