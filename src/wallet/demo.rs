//! In-process wallet extension used by the CLI and tests

use async_trait::async_trait;

use super::{Account, Result, WalletExtension};
use crate::config::AccountConfig;
use crate::store::{ALICE_ADDRESS, BOB_ADDRESS};
use crate::utils::char_code_sum;

/// Balances handed out by the demo extension, picked by address
pub const MOCK_BALANCES: [&str; 5] = ["12.5", "25.0", "50.0", "100.0", "5.25"];

const SOURCE: &str = "polkaforge-demo";

#[derive(Debug, Clone)]
pub struct DemoExtension {
    accounts: Vec<Account>,
    available: bool,
}

impl DemoExtension {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            available: true,
        }
    }

    /// Extension preloaded with the sample store's owners
    pub fn with_sample_accounts() -> Self {
        Self::new(vec![
            Account {
                address: ALICE_ADDRESS.to_string(),
                name: Some("alice".to_string()),
                source: SOURCE.to_string(),
            },
            Account {
                address: BOB_ADDRESS.to_string(),
                name: Some("bob".to_string()),
                source: SOURCE.to_string(),
            },
        ])
    }

    pub fn from_config(accounts: &[AccountConfig]) -> Self {
        if accounts.is_empty() {
            return Self::with_sample_accounts();
        }
        Self::new(
            accounts
                .iter()
                .map(|a| Account {
                    address: a.address.clone(),
                    name: a.name.clone(),
                    source: SOURCE.to_string(),
                })
                .collect(),
        )
    }

    /// Extension that reports itself as not installed
    pub fn unavailable() -> Self {
        Self {
            accounts: Vec::new(),
            available: false,
        }
    }

    /// Deterministic mock balance for an address
    pub fn mock_balance(address: &str) -> &'static str {
        let index = (char_code_sum(address) % MOCK_BALANCES.len() as u64) as usize;
        MOCK_BALANCES[index]
    }
}

#[async_trait]
impl WalletExtension for DemoExtension {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn balance(&self, address: &str) -> Result<String> {
        Ok(Self::mock_balance(address).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_balance_is_deterministic() {
        assert_eq!(DemoExtension::mock_balance("5A"), DemoExtension::mock_balance("5A"));
        // "a" = 97, 97 % 5 = 2
        assert_eq!(DemoExtension::mock_balance("a"), "50.0");
        assert!(MOCK_BALANCES.contains(&DemoExtension::mock_balance(ALICE_ADDRESS)));
    }

    #[test]
    fn test_from_config_falls_back_to_samples() {
        let ext = DemoExtension::from_config(&[]);
        assert_eq!(ext.accounts.len(), 2);

        let ext = DemoExtension::from_config(&[AccountConfig {
            address: "5Custom".into(),
            name: None,
        }]);
        assert_eq!(ext.accounts[0].address, "5Custom");
    }

    #[tokio::test]
    async fn test_unavailable_extension() {
        let ext = DemoExtension::unavailable();
        assert!(!ext.is_available());
        assert!(ext.accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_balance_query() {
        let ext = DemoExtension::with_sample_accounts();
        let balance = ext.balance(BOB_ADDRESS).await.unwrap();
        assert_eq!(balance, DemoExtension::mock_balance(BOB_ADDRESS));
    }
}
