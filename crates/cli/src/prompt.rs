//! Terminal answers for scaffolding prompts.
//!
//! Answers given on the command line are used first; after that the user is
//! asked on stderr/stdin, but only when stdin is a terminal.

use std::collections::VecDeque;
use std::io::{BufRead, IsTerminal, Write};

use colored::Colorize;
use relay_ide::Prompter;

pub struct CliPrompter {
    pick: Option<String>,
    names: VecDeque<String>,
    interactive: bool,
}

impl CliPrompter {
    pub fn new(pick: Option<String>, names: Vec<String>, interactive: bool) -> Self {
        Self {
            pick,
            names: names.into(),
            interactive: interactive && std::io::stdin().is_terminal(),
        }
    }

    fn read_line() -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl Prompter for CliPrompter {
    fn pick(&mut self, placeholder: &str, items: &[String]) -> Option<String> {
        if let Some(preset) = self.pick.take() {
            if items.contains(&preset) {
                return Some(preset);
            }
            eprintln!("{} {preset:?} is not one of the choices", "Warning:".yellow());
        }
        if !self.interactive {
            return None;
        }

        eprintln!("{}", placeholder.bold());
        for (index, item) in items.iter().enumerate() {
            eprintln!("{:>4}) {item}", index + 1);
        }
        eprint!("> ");
        let _ = std::io::stderr().flush();
        resolve_choice(&Self::read_line()?, items)
    }

    fn input(&mut self, prompt: &str, value: &str) -> Option<String> {
        if let Some(name) = self.names.pop_front() {
            return Some(name);
        }
        if !self.interactive {
            return None;
        }

        eprint!("{prompt} [{value}]: ");
        let _ = std::io::stderr().flush();
        let answer = Self::read_line()?;
        (!answer.is_empty()).then_some(answer)
    }
}

/// Match an answer against the listed items, by number or by name.
fn resolve_choice(answer: &str, items: &[String]) -> Option<String> {
    if let Ok(number) = answer.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| items.get(index))
            .cloned();
    }
    items.iter().find(|item| *item == answer).cloned()
}
