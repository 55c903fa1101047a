//! Live prompt reading answers from standard input.

use std::io::{BufRead, Write};

use crate::ports::prompt::Prompt;
use crate::ports::PortError;

/// Prints questions to stdout and blocks on a line from stdin.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str) -> Result<String, PortError> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err("input closed before an answer was given".into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
