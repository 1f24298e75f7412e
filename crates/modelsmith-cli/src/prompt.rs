//! Terminal prompter built on `dialoguer`.
//!
//! Questions and informational lines go to stderr so stdout stays clean for
//! `--output-format json`.

use console::Term;
use dialoguer::{
    Completion, Confirm, Input,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};

use modelsmith_core::{
    application::{ApplicationError, ports::Prompter},
    error::{SmithError, SmithResult},
};

pub struct DialoguerPrompter {
    colorful: ColorfulTheme,
    color: bool,
}

impl DialoguerPrompter {
    pub fn new(color: bool) -> Self {
        Self {
            colorful: ColorfulTheme::default(),
            color,
        }
    }

    fn theme(&self) -> &dyn Theme {
        if self.color { &self.colorful } else { &SimpleTheme }
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, question: &str, default: Option<&str>) -> SmithResult<String> {
        let mut input = Input::<String>::with_theme(self.theme())
            .with_prompt(question)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_failed)
    }

    fn confirm(&self, question: &str, default: bool) -> SmithResult<bool> {
        Confirm::with_theme(self.theme())
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(prompt_failed)
    }

    fn ask_with_completion(
        &self,
        question: &str,
        candidates: &[String],
        default: Option<&str>,
    ) -> SmithResult<String> {
        let completion = Candidates(candidates);
        let mut input = Input::<String>::with_theme(self.theme())
            .with_prompt(question)
            .allow_empty(true)
            .completion_with(&completion);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_failed)
    }

    fn say(&self, line: &str) {
        // Nothing useful to do if stderr is gone.
        let _ = Term::stderr().write_line(line);
    }
}

/// Tab completion over a fixed candidate list.
struct Candidates<'a>(&'a [String]);

impl Completion for Candidates<'_> {
    /// The single match, or the longest prefix shared by every match.
    fn get(&self, input: &str) -> Option<String> {
        let mut matches = self.0.iter().filter(|c| c.starts_with(input));
        let first = matches.next()?;
        let prefix = matches.fold(first.as_str(), |prefix, candidate| {
            let shared = prefix
                .char_indices()
                .zip(candidate.chars())
                .take_while(|((_, a), b)| a == b)
                .last()
                .map_or(0, |((i, a), _)| i + a.len_utf8());
            &prefix[..shared]
        });
        (prefix.len() > input.len()).then(|| prefix.to_string())
    }
}

fn prompt_failed(err: dialoguer::Error) -> SmithError {
    ApplicationError::PromptFailed {
        reason: err.to_string(),
    }
    .into()
}
