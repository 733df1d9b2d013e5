//! Prompting seam between the menu session and the terminal.
//!
//! `InquirePrompter` drives a real terminal; `ScriptedPrompter` replays a
//! fixed list of answers so sessions can run unattended (tests, demos).

use crate::errors::{AppError, AppResult};
use inquire::{Confirm, Select, Text};
use std::collections::VecDeque;

pub trait Prompter {
    /// Ask the user to pick one of `options`; returns its index.
    fn select(&mut self, message: &str, options: &[String]) -> AppResult<usize>;

    fn text(&mut self, message: &str) -> AppResult<String>;

    /// Yes/no question defaulting to "no".
    fn confirm(&mut self, message: &str) -> AppResult<bool>;
}

/// A labelled value offered in a selection list.
#[derive(Debug, Clone)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Present `choices` and return the value of the picked one.
pub fn choose<P: Prompter + ?Sized, T>(
    prompter: &mut P,
    message: &str,
    choices: Vec<Choice<T>>,
) -> AppResult<T> {
    if choices.is_empty() {
        return Err(AppError::Validation(format!(
            "nothing to choose from for '{}'",
            message
        )));
    }

    let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
    let index = prompter.select(message, &labels)?;

    choices
        .into_iter()
        .nth(index)
        .map(|c| c.value)
        .ok_or_else(|| AppError::Prompt(format!("selection {} is out of range", index)))
}

pub struct InquirePrompter {
    page_size: usize,
}

impl Default for InquirePrompter {
    fn default() -> Self {
        Self { page_size: 15 }
    }
}

impl Prompter for InquirePrompter {
    fn select(&mut self, message: &str, options: &[String]) -> AppResult<usize> {
        let picked = Select::new(message, options.to_vec())
            .with_page_size(self.page_size)
            .raw_prompt()?;
        Ok(picked.index)
    }

    fn text(&mut self, message: &str) -> AppResult<String> {
        Ok(Text::new(message).prompt()?)
    }

    fn confirm(&mut self, message: &str) -> AppResult<bool> {
        Ok(Confirm::new(message).with_default(false).prompt()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick the option with exactly this label.
    Select(String),
    Text(String),
    Confirm(bool),
    /// Behave like Esc / Ctrl-C.
    Cancel,
}

impl Answer {
    pub fn select(label: &str) -> Self {
        Answer::Select(label.to_string())
    }

    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

/// Replays answers in order. Running out of answers, or an answer of the
/// wrong kind, is a `Prompt` error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Every prompt message shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, message: &str) -> AppResult<Answer> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Cancel) => Err(AppError::Cancelled),
            Some(answer) => Ok(answer),
            None => Err(AppError::Prompt(format!(
                "no scripted answer left for '{}'",
                message
            ))),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> AppResult<usize> {
        match self.next(message)? {
            Answer::Select(label) => options.iter().position(|o| *o == label).ok_or_else(|| {
                AppError::Prompt(format!(
                    "'{}' is not an option for '{}' (options: {:?})",
                    label, message, options
                ))
            }),
            other => Err(AppError::Prompt(format!(
                "expected a selection for '{}', got {:?}",
                message, other
            ))),
        }
    }

    fn text(&mut self, message: &str) -> AppResult<String> {
        match self.next(message)? {
            Answer::Text(value) => Ok(value),
            other => Err(AppError::Prompt(format!(
                "expected text for '{}', got {:?}",
                message, other
            ))),
        }
    }

    fn confirm(&mut self, message: &str) -> AppResult<bool> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => Err(AppError::Prompt(format!(
                "expected a confirmation for '{}', got {:?}",
                message, other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_returns_the_value_behind_the_label() {
        let mut p = ScriptedPrompter::new([Answer::select("Sales")]);
        let picked = choose(
            &mut p,
            "Department:",
            vec![Choice::new("Engineering", 1), Choice::new("Sales", 2)],
        )
        .unwrap();
        assert_eq!(picked, 2);
        assert_eq!(p.asked(), ["Department:"]);
    }

    #[test]
    fn choose_with_no_choices_is_a_validation_error() {
        let mut p = ScriptedPrompter::default();
        let res: AppResult<i64> = choose(&mut p, "Department:", Vec::new());
        assert!(matches!(res, Err(AppError::Validation(_))));
        assert!(p.asked().is_empty());
    }

    #[test]
    fn scripted_cancel_and_mismatch() {
        let mut p = ScriptedPrompter::new([Answer::Cancel, Answer::Confirm(true)]);
        assert!(matches!(p.text("Name:"), Err(AppError::Cancelled)));
        assert!(matches!(p.text("Name:"), Err(AppError::Prompt(_))));
        assert!(matches!(p.confirm("Sure?"), Err(AppError::Prompt(_))));
        assert_eq!(p.remaining(), 0);
    }
}
