//! Rustyline helper: slash-command completion, argument hints, and prompt
//! hints drawn from history and the assistant's example requests

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// Slash commands for tab completion
pub const SLASH_COMMANDS: &[&str] = &[
    "/help",
    "/wallet",
    "/connect",
    "/disconnect",
    "/accounts",
    "/switch",
    "/stats",
    "/export",
    "/clear",
    "/quit",
    "/exit",
];

/// Argument shapes shown after a complete command word
const COMMAND_ARGS: &[(&str, &str)] = &[("/switch", " <n|address>"), ("/export", " [path]")];

/// Requests the assistant answers in its own words, offered as hints once
/// the history has nothing better
pub const EXAMPLE_PROMPTS: &[&str] = &[
    "Send 5 DOT to alice",
    "Review my code",
    "Find bugs in my code",
    "How do I optimize this function?",
    "Explain Polkadot consensus",
    "What are the security best practices?",
];

/// Rest of the first example prompt that `line` starts (case-insensitive)
pub fn example_hint(line: &str) -> Option<&'static str> {
    if line.trim().len() < 2 {
        return None;
    }
    let lowered = line.to_lowercase();
    EXAMPLE_PROMPTS.iter().find_map(|prompt| {
        if prompt.len() > line.len() && prompt.to_lowercase().starts_with(&lowered) {
            prompt.get(line.len()..)
        } else {
            None
        }
    })
}

/// Argument hint for a fully typed command word
pub fn argument_hint(line: &str) -> Option<&'static str> {
    COMMAND_ARGS
        .iter()
        .find(|(cmd, _)| *cmd == line)
        .map(|(_, args)| *args)
}

pub struct ForgeHelper {
    hinter: HistoryHinter,
}

impl ForgeHelper {
    pub fn new() -> Self {
        Self {
            hinter: HistoryHinter::new(),
        }
    }
}

/// Commands starting with the first word of `line`
pub fn complete_command(line: &str) -> Vec<&'static str> {
    let word = line.split_whitespace().next().unwrap_or("");
    SLASH_COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(word))
        .collect()
}

impl Completer for ForgeHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only the command word itself completes
        if line.starts_with('/') && pos <= line.find(' ').unwrap_or(line.len()) {
            let matches = complete_command(line)
                .into_iter()
                .map(|cmd| Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect();
            Ok((0, matches))
        } else {
            Ok((pos, vec![]))
        }
    }
}

impl Hinter for ForgeHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        if line.starts_with('/') {
            return argument_hint(line).map(str::to_string);
        }
        self.hinter
            .hint(line, pos, ctx)
            .or_else(|| example_hint(line).map(str::to_string))
    }
}

impl Highlighter for ForgeHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{}\x1b[0m", hint))
    }
}

impl Validator for ForgeHelper {}

impl Helper for ForgeHelper {}
