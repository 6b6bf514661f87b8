//! "send <amount> DOT to <recipient>" command handling
//!
//! The handler is a dry run. It checks the command against the wallet
//! snapshot and describes what would happen; moving funds belongs to the
//! wallet extension and never happens here.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::Response;
use super::rules::Captures;
use crate::utils::truncate_middle;
use crate::wallet::WalletSnapshot;

/// Case-insensitive, matched anywhere in the input
pub const TRANSFER_PATTERN: &str = r"(?i)send (?P<amount>\d+(?:\.\d+)?) dot to (?P<recipient>@?[a-z0-9]+)";

const CONNECT_WALLET: &str = "❌ **Wallet Connection Required**\n\nTo send DOT, you need to:\n1. Connect your Polkadot wallet\n2. Ensure you have sufficient balance\n3. Try the command again\n\n🔗 Use /connect to get started!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    /// Amount exactly as typed
    pub amount: String,
    pub recipient: String,
}

impl TransferCommand {
    pub fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        Some(Self {
            amount: caps.get("amount")?.to_string(),
            recipient: caps.get("recipient")?.to_string(),
        })
    }
}

/// Outcome of checking a transfer against the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferCheck {
    NotConnected,
    InsufficientBalance,
    WouldSucceed,
}

/// Balance strings that do not parse count as zero
fn parse_balance(balance: &str) -> Decimal {
    Decimal::from_str(balance.trim()).unwrap_or(Decimal::ZERO)
}

/// `None` when the amount does not fit in a `Decimal`; such an amount
/// exceeds any balance.
fn parse_amount(amount: &str) -> Option<Decimal> {
    Decimal::from_str(amount.trim()).ok()
}

pub fn check_transfer(command: &TransferCommand, wallet: &WalletSnapshot) -> TransferCheck {
    if !wallet.connected || wallet.address.is_none() {
        return TransferCheck::NotConnected;
    }
    let balance = parse_balance(&wallet.balance);
    match parse_amount(&command.amount) {
        Some(amount) if amount <= balance => TransferCheck::WouldSucceed,
        _ => TransferCheck::InsufficientBalance,
    }
}

pub fn transfer_response(command: &TransferCommand, wallet: &WalletSnapshot) -> Response {
    let check = check_transfer(command, wallet);
    debug!(amount = %command.amount, recipient = %command.recipient, ?check, "transfer command");

    match check {
        TransferCheck::NotConnected => Response::attention(CONNECT_WALLET),
        TransferCheck::InsufficientBalance => Response::attention(format!(
            "❌ **Insufficient Balance**\n\nYou're trying to send **{} DOT** but only have **{} DOT**\n\n💡 **Suggestions:**\n• Check your balance\n• Try a smaller amount\n• Get more DOT from a faucet (testnet)",
            command.amount, wallet.balance
        )),
        TransferCheck::WouldSucceed => {
            let sender = wallet.address.as_deref().unwrap_or_default();
            Response::ok(format!(
                "💰 **DOT Transfer Simulation**\n\n**Details:**\n• Amount: {} DOT\n• Recipient: {}\n• From: {}\n• Available Balance: {} DOT\n\n✅ **Transfer would be successful!**\n\n⚠️ **Demo Mode**: This is a simulation. In production, the transfer would be executed via the Polkadot API with proper transaction confirmation.\n\n🚀 **Next Steps:**\n• Validate recipient address format\n• Confirm transaction details\n• Sign with your wallet\n• Wait for block confirmation",
                command.amount,
                command.recipient,
                truncate_middle(sender, 8, 4),
                wallet.balance
            ))
        }
    }
}

/// Pattern handler wired into the assistant's rule set
pub fn handle_transfer(caps: &Captures<'_>, wallet: &WalletSnapshot) -> Option<Response> {
    let command = TransferCommand::from_captures(caps)?;
    Some(transfer_response(&command, wallet))
}
