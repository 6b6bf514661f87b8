//! Interactive REPL for the PolkaForge assistant
//!
//! Provides a readline-based interface with:
//! - Command history
//! - Fenced code blocks spanning several lines
//! - A thinking indicator while the reply is pending
//! - Ctrl+C to drop a pending reply

pub mod colors;
mod commands;
mod helper;

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::path::PathBuf;

use crate::chat::{ChatSession, Turn};
use crate::store::Store;
use crate::wallet::WalletSession;

pub use commands::{CommandHandler, CommandOutcome, SlashCommand};
use helper::ForgeHelper;

const FENCE: &str = "```";

/// REPL state
pub struct Repl {
    editor: Editor<ForgeHelper, DefaultHistory>,
    history_path: PathBuf,
    chat: ChatSession,
    wallet: WalletSession,
    store: Store,
}

impl Repl {
    pub fn new(chat: ChatSession, wallet: WalletSession, store: Store, history_path: PathBuf) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(ForgeHelper::new()));

        Ok(Self {
            editor,
            history_path,
            chat,
            wallet,
            store,
        })
    }

    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }

    fn print_banner(&self) {
        println!("{}", colors::banner_accent("PolkaForge"));
        println!("{}", colors::banner_line("responder", self.chat.responder().name()));
        let wallet = match self.wallet.account() {
            Some(account) if self.wallet.is_connected() => {
                format!("{} ({} DOT)", account.display_name(), self.wallet.balance())
            }
            _ => "not connected".to_string(),
        };
        println!("{}", colors::banner_line("wallet", &wallet));
        println!("{}", colors::separator(40));
        println!("Type your message (Ctrl+D to exit, /help for commands)");
        println!();
        if let Some(welcome) = self.chat.transcript().last() {
            print_turn(welcome);
        }
    }

    /// Run the REPL loop
    pub async fn run(&mut self) -> Result<()> {
        self.load_history();
        self.print_banner();

        loop {
            let Some(line) = self.read_input()? else {
                println!("Goodbye!");
                break;
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history_entry(&line)?;

            if trimmed.starts_with('/') {
                let mut handler = CommandHandler {
                    chat: &mut self.chat,
                    wallet: &mut self.wallet,
                    store: &self.store,
                };
                if handler.handle(trimmed).await? == CommandOutcome::Quit {
                    println!("Goodbye!");
                    break;
                }
                continue;
            }

            self.process_input(&line).await;
        }

        self.save_history();
        Ok(())
    }

    /// Submit one message, showing the indicator until the reply lands.
    /// Ctrl+C during the wait drops the reply.
    async fn process_input(&mut self, input: &str) {
        let wallet = self.wallet.snapshot();
        println!("{}", colors::status("AI is analyzing..."));

        tokio::select! {
            reply = self.chat.submit(input, &wallet) => {
                if let Some(turn) = reply {
                    print_turn(turn);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("{}", colors::warning("^C (reply dropped)"));
            }
        }
    }

    /// Read one message. A line with an unclosed ``` fence keeps reading
    /// until the fence closes.
    fn read_input(&mut self) -> Result<Option<String>> {
        let first_line = match self.editor.readline(">>> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                return Ok(Some(String::new()));
            }
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => {
                eprintln!("Error: {:?}", err);
                return Ok(None);
            }
        };

        if !has_open_fence(&first_line) {
            return Ok(Some(first_line));
        }

        let mut lines = vec![first_line];
        loop {
            match self.editor.readline("... ") {
                Ok(line) => {
                    lines.push(line);
                    if !has_open_fence(&lines.join("\n")) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C (cancelled code block)");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    return Ok(None);
                }
            }
        }

        Ok(Some(lines.join("\n")))
    }
}

/// Odd number of fences: a code block is still open
fn has_open_fence(text: &str) -> bool {
    text.matches(FENCE).count() % 2 == 1
}

fn print_turn(turn: &Turn) {
    println!();
    if turn.is_error {
        println!("{}", colors::error(&turn.text));
    } else {
        println!("{}", turn.text);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_fence_detection() {
        assert!(!has_open_fence("plain"));
        assert!(has_open_fence("review ```js"));
        assert!(!has_open_fence("```let a = 1```"));
        assert!(has_open_fence("```a```\n```b"));
    }
}
