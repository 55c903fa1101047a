//! Prompt that answers from a script.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::prompt::Prompt;
use crate::ports::PortError;

/// Answers questions from a pre-set queue and remembers what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    /// Creates a prompt that will return `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().expect("prompt lock poisoned").clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> Result<String, PortError> {
        self.asked.lock().expect("prompt lock poisoned").push(question.to_string());
        self.answers
            .lock()
            .expect("prompt lock poisoned")
            .pop_front()
            .ok_or_else(|| "no scripted answer left".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order_then_fails() {
        let prompt = ScriptedPrompt::new(["2", "y"]);
        assert_eq!(prompt.ask("pick").unwrap(), "2");
        assert_eq!(prompt.ask("sure?").unwrap(), "y");
        assert!(prompt.ask("again?").is_err());
        assert_eq!(prompt.questions(), vec!["pick", "sure?", "again?"]);
    }
}
