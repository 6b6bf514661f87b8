//! Slash command handlers for the REPL
//!
//! Handles /help, /wallet, /connect, /disconnect, /accounts, /switch,
//! /stats, /export, /clear and /quit.

use anyhow::Result;
use std::path::PathBuf;

use super::colors;
use crate::chat::ChatSession;
use crate::store::Store;
use crate::utils::truncate_middle;
use crate::wallet::WalletSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Wallet,
    Connect,
    Disconnect,
    Accounts,
    /// 1-based account index or full address
    Switch(String),
    Stats,
    Export(Option<PathBuf>),
    Clear,
    Quit,
    Unknown(String),
}

impl SlashCommand {
    pub fn parse(cmd: &str) -> Self {
        let parts: Vec<&str> = cmd.trim().splitn(2, ' ').collect();
        let command = parts[0];
        let arg = parts.get(1).map(|a| a.trim()).unwrap_or("");

        match command {
            "/help" => Self::Help,
            "/wallet" => Self::Wallet,
            "/connect" => Self::Connect,
            "/disconnect" => Self::Disconnect,
            "/accounts" => Self::Accounts,
            "/switch" => Self::Switch(arg.to_string()),
            "/stats" => Self::Stats,
            "/export" => Self::Export((!arg.is_empty()).then(|| PathBuf::from(arg))),
            "/clear" => Self::Clear,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// Command handler with access to REPL state
pub struct CommandHandler<'a> {
    pub chat: &'a mut ChatSession,
    pub wallet: &'a mut WalletSession,
    pub store: &'a Store,
}

impl<'a> CommandHandler<'a> {
    pub async fn handle(&mut self, cmd: &str) -> Result<CommandOutcome> {
        match SlashCommand::parse(cmd) {
            SlashCommand::Help => print_help(),
            SlashCommand::Wallet => self.cmd_wallet(),
            SlashCommand::Connect => match self.wallet.connect().await {
                Ok(()) => {
                    println!("{}", colors::success("Wallet connected."));
                    self.cmd_wallet();
                }
                Err(e) => println!("{}", colors::error(&format!("Connection failed: {}", e))),
            },
            SlashCommand::Disconnect => {
                self.wallet.disconnect();
                println!("Wallet disconnected.");
            }
            SlashCommand::Accounts => self.cmd_accounts(),
            SlashCommand::Switch(arg) => self.cmd_switch(&arg).await,
            SlashCommand::Stats => self.cmd_stats(),
            SlashCommand::Export(path) => self.cmd_export(path),
            SlashCommand::Clear => {
                *self.chat = self.chat.restart();
                println!("Conversation cleared.");
            }
            SlashCommand::Quit => return Ok(CommandOutcome::Quit),
            SlashCommand::Unknown(command) => {
                println!("Unknown command: {}. Try /help", command);
            }
        }
        Ok(CommandOutcome::Continue)
    }

    /// /wallet - show connection state
    fn cmd_wallet(&self) {
        match self.wallet.account() {
            Some(account) if self.wallet.is_connected() => {
                println!(
                    "Account: {} ({})",
                    account.display_name(),
                    colors::address(&truncate_middle(&account.address, 8, 4))
                );
                println!("Balance: {}", colors::balance(self.wallet.balance()));
            }
            _ => println!("{}", colors::warning("Wallet not connected. Use /connect.")),
        }
    }

    /// /accounts - list known accounts, marking the active one
    fn cmd_accounts(&self) {
        let accounts = self.wallet.accounts();
        if accounts.is_empty() {
            println!("No accounts. Use /connect first.");
            return;
        }
        let active = self.wallet.account().map(|a| a.address.as_str());
        for (i, account) in accounts.iter().enumerate() {
            let marker = if Some(account.address.as_str()) == active { "*" } else { " " };
            println!(
                "{} {}. {:<10} {}",
                marker,
                i + 1,
                account.display_name(),
                colors::address(&account.address)
            );
        }
    }

    /// /switch <n|address> - make another account active
    async fn cmd_switch(&mut self, arg: &str) {
        if arg.is_empty() {
            println!("Usage: /switch <account number or address>");
            return;
        }
        let address = resolve_account(self.wallet, arg);
        match self.wallet.switch_account(&address).await {
            Ok(()) => self.cmd_wallet(),
            Err(e) => println!("{}", colors::error(&e.to_string())),
        }
    }

    /// /stats - platform totals, plus the active account's share
    fn cmd_stats(&self) {
        let owner = self.wallet.account().map(|a| a.address.as_str());
        let stats = self.store.stats(owner);

        println!("{}", colors::header("PolkaForge"));
        println!("  Repositories:  {}", stats.total_repos);
        println!("  Jobs:          {}", stats.total_jobs);
        println!("  NFTs:          {}", stats.total_nfts);
        println!("  Stars:         {}", stats.total_stars);
        println!("  Forks:         {}", stats.total_forks);
        println!("  Rewards:       {} DOT", stats.total_rewards);
        if owner.is_some() {
            println!("  Your repos:    {}", stats.user_repos);
            println!("  Your NFTs:     {}", stats.user_nfts);
        }

        let chat = self.chat.transcript().stats();
        println!("{}", colors::header("Conversation"));
        println!("  Messages:      {} ({} from you)", chat.total, chat.user);
        if let Some(ms) = chat.avg_reply_ms {
            println!("  Avg reply:     {} ms", ms);
        }
    }

    /// /export [path] - write the transcript as JSON, or print it
    fn cmd_export(&self, path: Option<PathBuf>) {
        let json = match self.chat.transcript().export_json() {
            Ok(json) => json,
            Err(e) => {
                println!("{}", colors::error(&format!("Export failed: {}", e)));
                return;
            }
        };
        match path {
            Some(path) => match std::fs::write(&path, json) {
                Ok(()) => println!("{}", colors::success(&format!("Transcript written to {}", path.display()))),
                Err(e) => println!(
                    "{}",
                    colors::error(&format!("Failed to write transcript to {}: {}", path.display(), e))
                ),
            },
            None => println!("{}", json),
        }
    }
}

/// Turn a `/switch` argument into an address. Numbers within range pick
/// from the account list; anything else is taken as an address.
pub fn resolve_account(wallet: &WalletSession, arg: &str) -> String {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| wallet.accounts().get(i))
        .map(|a| a.address.clone())
        .unwrap_or_else(|| arg.to_string())
}

fn print_help() {
    println!("Commands:");
    println!("  /help              - Show this help");
    println!("  /wallet            - Show wallet state");
    println!("  /connect           - Connect the wallet");
    println!("  /disconnect        - Disconnect and forget the account");
    println!("  /accounts          - List wallet accounts");
    println!("  /switch <n>        - Switch active account");
    println!("  /stats             - Platform and conversation stats");
    println!("  /export [path]     - Export the transcript as JSON");
    println!("  /clear             - Start a new conversation");
    println!("  /quit              - Exit");
    println!();
    println!("Paste code between ``` fences for a review.");
}
