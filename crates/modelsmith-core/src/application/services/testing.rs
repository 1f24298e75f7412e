//! Test doubles shared by the service unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::{
    ApplicationError,
    ports::{Prompter, TemplateRef, TemplateRenderer, TemplateStore},
};
use crate::domain::RenderContext;
use crate::error::SmithResult;

/// Replays queued answers. `""` falls back to the question's default.
#[derive(Default)]
pub struct Script {
    answers: Mutex<VecDeque<String>>,
    pub asked: Mutex<Vec<String>>,
    pub said: Mutex<Vec<String>>,
    /// Candidate lists offered by completion questions, in order.
    pub offered: Mutex<Vec<Vec<String>>>,
}

impl Script {
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

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn said(&self) -> Vec<String> {
        self.said.lock().unwrap().clone()
    }

    pub fn offered(&self) -> Vec<Vec<String>> {
        self.offered.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, question: &str) -> SmithResult<String> {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| {
                ApplicationError::PromptFailed {
                    reason: format!("script exhausted at: {question}"),
                }
                .into()
            })
    }
}

impl Prompter for Script {
    fn ask(&self, question: &str, default: Option<&str>) -> SmithResult<String> {
        let answer = self.next(question)?;
        Ok(match (answer.is_empty(), default) {
            (true, Some(d)) => d.to_string(),
            _ => answer,
        })
    }

    fn confirm(&self, question: &str, default: bool) -> SmithResult<bool> {
        let answer = self.next(question)?;
        Ok(match answer.as_str() {
            "" => default,
            a => a.starts_with('y'),
        })
    }

    fn ask_with_completion(
        &self,
        question: &str,
        candidates: &[String],
        default: Option<&str>,
    ) -> SmithResult<String> {
        self.offered.lock().unwrap().push(candidates.to_vec());
        self.ask(question, default)
    }

    fn say(&self, line: &str) {
        self.said.lock().unwrap().push(line.to_string());
    }
}

/// Resolves a fixed set of built-in names.
pub struct FixedTemplates(pub Vec<(&'static str, &'static str)>);

impl TemplateStore for FixedTemplates {
    fn resolve(&self, name: &str) -> SmithResult<TemplateRef> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, _)| TemplateRef::Builtin((*n).to_string()))
            .ok_or_else(|| {
                ApplicationError::TemplateResolution {
                    name: name.to_string(),
                    reason: "unknown".into(),
                }
                .into()
            })
    }

    fn load(&self, template: &TemplateRef) -> SmithResult<String> {
        let TemplateRef::Builtin(name) = template else {
            return Err(ApplicationError::TemplateResolution {
                name: template.to_string(),
                reason: "not builtin".into(),
            }
            .into());
        };
        self.resolve(name)?;
        Ok(self
            .0
            .iter()
            .find(|(n, _)| *n == name.as_str())
            .map(|(_, src)| (*src).to_string())
            .unwrap_or_default())
    }
}

/// Replaces `{{name}}` with string variables; nothing else.
pub struct Substitute;

impl TemplateRenderer for Substitute {
    fn render(&self, source: &str, context: &RenderContext) -> SmithResult<String> {
        let mut out = source.to_string();
        for (name, value) in context.iter() {
            if let Some(s) = value.as_str() {
                out = out.replace(&format!("{{{{{name}}}}}"), s);
            }
        }
        Ok(out)
    }
}
