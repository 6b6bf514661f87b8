//! Wallet session
//!
//! Wraps a browser-extension style account API (`WalletExtension`) and tracks
//! the active account and its balance. Extension failures never leave the
//! session half-connected: balance lookups degrade to placeholder values and
//! the chat layer only ever sees a `WalletSnapshot`.

mod demo;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub use demo::{DemoExtension, MOCK_BALANCES};
pub use memory::AccountMemory;

/// Balance shown while disconnected, and after a failed lookup on connect
pub const DISCONNECTED_BALANCE: &str = "0";

/// Balance assumed when a lookup fails on restore or account switch
pub const PLACEHOLDER_BALANCE: &str = "10.0";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WalletError {
    #[error("no wallet extension detected; install Polkadot.js, Talisman or SubWallet")]
    NoExtension,

    #[error("no accounts found in the wallet extension")]
    NoAccounts,

    #[error("account {0} is not exposed by the wallet extension")]
    UnknownAccount(String),

    #[error("wallet extension failed: {0}")]
    Extension(String),

    #[error("wallet is not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, WalletError>;

/// An account exposed by the extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub name: Option<String>,
    /// Extension that injected the account ("polkadot-js", "talisman", ...)
    pub source: String,
}

impl Account {
    /// Account name, or the first 8 chars of the address when unnamed
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.address.chars().take(8).collect(),
        }
    }
}

/// Read-only view of the session handed to the chat responders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletSnapshot {
    pub connected: bool,
    pub address: Option<String>,
    pub balance: String,
}

impl WalletSnapshot {
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            address: None,
            balance: DISCONNECTED_BALANCE.to_string(),
        }
    }

    pub fn connected(address: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            connected: true,
            address: Some(address.into()),
            balance: balance.into(),
        }
    }
}

/// Account enumeration and balance query offered by a wallet extension
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Extension name for logging
    fn name(&self) -> &'static str;

    /// Whether the extension is installed
    fn is_available(&self) -> bool;

    async fn accounts(&self) -> Result<Vec<Account>>;

    /// Free balance in DOT, as a decimal string
    async fn balance(&self, address: &str) -> Result<String>;
}

pub struct WalletSession {
    extension: Arc<dyn WalletExtension>,
    memory: AccountMemory,
    account: Option<Account>,
    accounts: Vec<Account>,
    connected: bool,
    connecting: bool,
    balance: String,
}

impl WalletSession {
    pub fn new(extension: Arc<dyn WalletExtension>, memory: AccountMemory) -> Self {
        Self {
            extension,
            memory,
            account: None,
            accounts: Vec::new(),
            connected: false,
            connecting: false,
            balance: DISCONNECTED_BALANCE.to_string(),
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    pub fn balance(&self) -> &str {
        &self.balance
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            connected: self.connected && self.account.is_some(),
            address: self.account.as_ref().map(|a| a.address.clone()),
            balance: self.balance.clone(),
        }
    }

    /// Explicit connect: selects the first account and remembers it
    pub async fn connect(&mut self) -> Result<()> {
        self.connecting = true;
        let result = self.connect_inner().await;
        self.connecting = false;
        result
    }

    async fn connect_inner(&mut self) -> Result<()> {
        if !self.extension.is_available() {
            return Err(WalletError::NoExtension);
        }

        let accounts = self.extension.accounts().await?;
        let first = accounts.first().cloned().ok_or(WalletError::NoAccounts)?;

        self.accounts = accounts;
        self.memory.save(&first.address);
        self.balance = self
            .fetch_balance(&first.address, DISCONNECTED_BALANCE)
            .await;
        self.account = Some(first);
        self.connected = true;

        info!(
            "Connected to {} wallet ({} accounts)",
            self.extension.name(),
            self.accounts.len()
        );
        Ok(())
    }

    /// Silent reconnect at start-up. Prefers the remembered account; never
    /// fails, an unusable extension just leaves the session disconnected.
    pub async fn restore(&mut self) {
        if !self.extension.is_available() {
            info!("No wallet extension available");
            return;
        }

        let accounts = match self.extension.accounts().await {
            Ok(accounts) if !accounts.is_empty() => accounts,
            Ok(_) => return,
            Err(e) => {
                warn!("Error checking wallet connection: {}", e);
                return;
            }
        };

        let remembered = self.memory.load();
        let chosen = remembered
            .and_then(|addr| accounts.iter().find(|a| a.address == addr).cloned())
            .unwrap_or_else(|| accounts[0].clone());

        self.accounts = accounts;
        self.balance = self.fetch_balance(&chosen.address, PLACEHOLDER_BALANCE).await;
        self.account = Some(chosen);
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        self.account = None;
        self.accounts.clear();
        self.connected = false;
        self.balance = DISCONNECTED_BALANCE.to_string();
        self.memory.forget();
    }

    /// Make another known account active and refresh its balance
    pub async fn switch_account(&mut self, address: &str) -> Result<()> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.address == address)
            .cloned()
            .ok_or_else(|| WalletError::UnknownAccount(address.to_string()))?;

        self.memory.save(&account.address);
        self.balance = self
            .fetch_balance(&account.address, PLACEHOLDER_BALANCE)
            .await;
        self.account = Some(account);
        Ok(())
    }

    /// Re-query the active account's balance
    pub async fn refresh_balance(&mut self) {
        if let Some(address) = self.account.as_ref().map(|a| a.address.clone()) {
            self.balance = self.fetch_balance(&address, PLACEHOLDER_BALANCE).await;
        }
    }

    async fn fetch_balance(&self, address: &str, fallback: &str) -> String {
        match self.extension.balance(address).await {
            Ok(balance) => balance,
            Err(e) => {
                warn!("Failed to get balance, using {}: {}", fallback, e);
                fallback.to_string()
            }
        }
    }
}
