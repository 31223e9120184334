//! Line-oriented interactive prompts
//!
//! All operator interaction goes through [`Prompter`], which reads answers
//! from any `BufRead` and writes questions and tables to any `Write`. The
//! binary uses stdin/stdout; tests feed scripted input.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{Error, Result};

/// Asks questions and reads answers
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Read passwords from the terminal with echo disabled
    terminal: bool,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
            terminal: io::stdin().is_terminal(),
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompter over arbitrary streams; passwords are read as plain lines
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            terminal: false,
        }
    }

    /// Consume the prompter, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line of text (tables, notices)
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Ask a question and return the answer with surrounding whitespace removed
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer)?;
        if read == 0 {
            return Err(Error::input(format!("No answer given to \"{}\"", question.trim())));
        }
        Ok(answer.trim().to_string())
    }

    /// Ask until a non-empty answer is given
    pub fn ask_required(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    /// Ask a yes/no question until a valid answer is given
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.ask(&format!("{question} [y/n]: "))?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n")?,
            }
        }
    }

    /// Ask until the answer is one of `options` (case-insensitive)
    pub fn choose(&mut self, question: &str, options: &[&str]) -> Result<String> {
        loop {
            let answer = self.ask(&format!("{question} ({}): ", options.join("/")))?;
            if let Some(option) = options.iter().find(|o| o.eq_ignore_ascii_case(&answer)) {
                return Ok((*option).to_string());
            }
            self.say(format!("Please answer one of: {}", options.join(", ")))?;
        }
    }

    /// Ask for a secret without echoing it when attached to a terminal
    pub fn password(&mut self, question: &str) -> Result<String> {
        if self.terminal {
            self.output.flush()?;
            let password = rpassword::prompt_password(question)?;
            return Ok(password);
        }
        self.ask(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims() {
        let mut p = prompter("  chat.example.com \n");
        assert_eq!(p.ask("Host: ").unwrap(), "chat.example.com");
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "Host: ");
    }

    #[test]
    fn test_ask_at_eof_is_input_error() {
        let mut p = prompter("");
        let err = p.ask("Host: ").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Input);
    }

    #[test]
    fn test_ask_required_skips_blank_lines() {
        let mut p = prompter("\n\nalice\n");
        assert_eq!(p.ask_required("Username: ").unwrap(), "alice");
    }

    #[test]
    fn test_confirm_loops_until_valid() {
        let mut p = prompter("maybe\nYES\n");
        assert!(p.confirm("Download files?").unwrap());
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("Please answer y or n"));
    }

    #[test]
    fn test_confirm_no() {
        let mut p = prompter("n\n");
        assert!(!p.confirm("Save config?").unwrap());
    }

    #[test]
    fn test_choose_is_case_insensitive() {
        let mut p = prompter("ldap\nTOKEN\n");
        assert_eq!(p.choose("Login mode", &["password", "token"]).unwrap(), "token");
    }

    #[test]
    fn test_password_reads_line_when_not_terminal() {
        let mut p = prompter("hunter2\n");
        assert_eq!(p.password("Password: ").unwrap(), "hunter2");
    }
}
