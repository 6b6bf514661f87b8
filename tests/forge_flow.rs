// tests/forge_flow.rs
// Store, Wallet and Publishing Flow Tests
//
// Walks the non-chat side of the CLI end to end:
// 1. Wallet restore with a remembered account
// 2. Publishing repositories as the active account
// 3. Dashboard stats before and after
// 4. Job applications and missing-id errors
// 5. NFT metadata determinism

use chrono::{TimeZone, Utc};
use polkaforge::nft::{AttributeValue, RepositoryFacts, generate_metadata};
use polkaforge::ForgeError;
use polkaforge::store::{
    ALICE_ADDRESS, BOB_ADDRESS, JobStatus, JobUpdate, RepositoryDraft, Store, StoreError, publish_repository,
};
use polkaforge::wallet::{AccountMemory, DemoExtension, MOCK_BALANCES, WalletError, WalletSession};
use rust_decimal::Decimal;
use std::sync::Arc;

// ============================================================================
// TEST SETUP UTILITIES
// ============================================================================

fn demo_wallet(memory: AccountMemory) -> WalletSession {
    WalletSession::new(Arc::new(DemoExtension::with_sample_accounts()), memory)
}

fn draft(name: &str, is_private: bool) -> RepositoryDraft {
    RepositoryDraft {
        name: name.to_string(),
        description: "Escrow contract in ink!".to_string(),
        tags: "rust, ink".to_string(),
        is_private,
        files: Vec::new(),
    }
}

// ============================================================================
// WALLET
// ============================================================================

#[tokio::test]
async fn restore_prefers_remembered_account() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("account");

    let mut first = demo_wallet(AccountMemory::new(&path));
    first.connect().await.unwrap();
    first.switch_account(BOB_ADDRESS).await.unwrap();

    let mut second = demo_wallet(AccountMemory::new(&path));
    second.restore().await;
    assert!(second.is_connected());
    assert_eq!(second.account().unwrap().address, BOB_ADDRESS);
    assert!(MOCK_BALANCES.contains(&second.balance()));

    second.disconnect();
    let mut third = demo_wallet(AccountMemory::new(&path));
    third.restore().await;
    assert_eq!(third.account().unwrap().address, ALICE_ADDRESS);
}

// ============================================================================
// PUBLISHING & STATS
// ============================================================================

#[tokio::test]
async fn publish_updates_stats() {
    let mut store = Store::with_sample_data();
    let mut wallet = demo_wallet(AccountMemory::disabled());
    wallet.connect().await.unwrap();
    let account = wallet.account().cloned().unwrap();

    let before = store.stats(Some(account.address.as_str()));
    assert_eq!(before.total_repos, 2);
    assert_eq!(before.total_nfts, 0);

    publish_repository(&mut store, &wallet, draft("ink-escrow", false)).unwrap();
    publish_repository(&mut store, &wallet, draft("secret-sauce", true)).unwrap();

    let after = store.stats(Some(account.address.as_str()));
    // private repositories stay out of the public total
    assert_eq!(after.total_repos, 3);
    assert_eq!(after.user_repos, before.user_repos + 2);
    assert_eq!(after.total_nfts, 2);
    assert_eq!(after.user_nfts, 2);
    assert_eq!(after.total_stars, before.total_stars);

    assert_eq!(store.stats(None).user_repos, 0);
}

#[tokio::test]
async fn published_nft_describes_repository() {
    let mut store = Store::new();
    let mut wallet = demo_wallet(AccountMemory::disabled());
    wallet.connect().await.unwrap();
    wallet.switch_account(BOB_ADDRESS).await.unwrap();

    let published = publish_repository(&mut store, &wallet, draft("ink-escrow", false)).unwrap();

    let nft = store.nft_for_repository(&published.repo_id).unwrap();
    assert_eq!(nft.token_id, published.token_id);
    assert!(nft.token_id.starts_with("PF-"));
    assert_eq!(nft.owner, BOB_ADDRESS);
    assert_eq!(
        nft.metadata.attribute("Primary Language"),
        Some(&AttributeValue::Text("rust".to_string()))
    );
    assert_eq!(nft.metadata.attribute("Tag Count"), Some(&AttributeValue::Number(2)));
    assert_eq!(nft.metadata.attribute("Owner"), Some(&AttributeValue::Text("bob".to_string())));
}

#[tokio::test]
async fn publish_after_disconnect_is_refused() {
    let mut store = Store::with_sample_data();
    let mut wallet = demo_wallet(AccountMemory::disabled());
    wallet.connect().await.unwrap();
    wallet.disconnect();

    let err = publish_repository(&mut store, &wallet, draft("ink-escrow", false)).unwrap_err();
    assert!(matches!(err, ForgeError::Wallet(WalletError::NotConnected)));
    assert_eq!(store.stats(None).total_nfts, 0);
}

// ============================================================================
// JOBS
// ============================================================================

#[test]
fn job_lifecycle() {
    let mut store = Store::with_sample_data();
    let id = store.jobs()[0].id.clone();
    let applicants = store.jobs()[0].applicants;

    assert_eq!(store.apply_to_job(&id).unwrap().applicants, applicants + 1);

    let job = store
        .update_job(
            &id,
            JobUpdate {
                status: Some(JobStatus::InProgress),
                reward: Some(Decimal::new(755, 1)),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(job.status, JobStatus::InProgress);
    assert_eq!(job.reward.to_string(), "75.5");

    assert_eq!(
        store.apply_to_job("missing").unwrap_err(),
        StoreError::JobNotFound("missing".to_string())
    );
}

// ============================================================================
// METADATA
// ============================================================================

#[test]
fn metadata_is_deterministic_for_same_facts() {
    let tags = vec!["rust".to_string(), "ink".to_string()];
    let facts = RepositoryFacts {
        name: "ink-escrow",
        owner: "alice",
        owner_address: ALICE_ADDRESS,
        description: "Escrow",
        tags: &tags,
        ipfs_hash: "QmTest",
        created_at: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
    };

    let a = generate_metadata(&facts);
    let b = generate_metadata(&facts);
    assert_eq!(a, b);
    assert_eq!(
        a.attribute("Creation Date"),
        Some(&AttributeValue::Text("2024-03-09".to_string()))
    );
    assert!(a.image.starts_with("data:image/svg+xml,"));
}
