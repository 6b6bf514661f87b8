//! Demo records loaded by `Store::with_sample_data`

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use super::generate_id;
use super::types::{Job, JobStatus, Repository, RepositoryFile};

pub const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const BOB_ADDRESS: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn file(name: &str, content: &str, kind: &str, size: u64) -> RepositoryFile {
    RepositoryFile {
        name: name.to_string(),
        content: content.to_string(),
        kind: kind.to_string(),
        size,
    }
}

pub(super) fn sample_repositories() -> Vec<Repository> {
    let now = Utc::now();
    vec![
        Repository {
            id: generate_id(),
            name: "polkadot-js-api".to_string(),
            owner: "alice".to_string(),
            owner_address: ALICE_ADDRESS.to_string(),
            description: "JavaScript API for interacting with Polkadot and Substrate nodes".to_string(),
            stars: 245,
            forks: 87,
            last_updated: "2 days ago".to_string(),
            tags: strings(&["api", "javascript", "substrate"]),
            ipfs_hash: Some("QmZ4tDuvesekSs4qM5ZBKpXiZGun7S2CYtEZRB3DYXkjGx".to_string()),
            nft_id: Some("NFT-001".to_string()),
            is_private: false,
            created_at: now - Duration::days(7),
            files: vec![
                file("README.md", "# Polkadot.js API\n\nJavaScript API for Polkadot", "markdown", 1024),
                file(
                    "package.json",
                    "{\n  \"name\": \"@polkadot/api\",\n  \"version\": \"1.0.0\"\n}",
                    "json",
                    512,
                ),
            ],
        },
        Repository {
            id: generate_id(),
            name: "substrate-node-template".to_string(),
            owner: "bob".to_string(),
            owner_address: BOB_ADDRESS.to_string(),
            description: "A template for building custom Substrate nodes".to_string(),
            stars: 189,
            forks: 56,
            last_updated: "5 days ago".to_string(),
            tags: strings(&["substrate", "blockchain", "template"]),
            ipfs_hash: Some("QmULKig5Fxrs2uC5oBBKPNhJawxbq8tGsxYTc9mZQVtpSm".to_string()),
            nft_id: Some("NFT-002".to_string()),
            is_private: false,
            created_at: now - Duration::days(14),
            files: vec![file(
                "Cargo.toml",
                "[package]\nname = \"substrate-node\"\nversion = \"1.0.0\"",
                "toml",
                256,
            )],
        },
    ]
}

pub(super) fn sample_jobs() -> Vec<Job> {
    let now = Utc::now();
    vec![
        Job {
            id: generate_id(),
            title: "Build DeFi Staking Contract".to_string(),
            description: "Need an experienced Substrate developer to build a staking contract with reward distribution mechanism.".to_string(),
            requirements: strings(&[
                "Substrate/ink! experience",
                "Smart contract security knowledge",
                "Testing experience",
            ]),
            reward: Decimal::from(50),
            deadline: "2025-02-15".to_string(),
            poster: "DeFi Protocol".to_string(),
            poster_address: ALICE_ADDRESS.to_string(),
            status: JobStatus::Open,
            applicants: 12,
            created_at: now - Duration::days(3),
            tags: strings(&["defi", "staking", "substrate", "ink"]),
        },
        Job {
            id: generate_id(),
            title: "NFT Marketplace Frontend".to_string(),
            description: "Create a React frontend for an NFT marketplace built on Polkadot. Must integrate with Polkadot.js API.".to_string(),
            requirements: strings(&["React/TypeScript", "Polkadot.js API", "Web3 UI/UX experience"]),
            reward: Decimal::from(30),
            deadline: "2025-01-30".to_string(),
            poster: "NFT Collective".to_string(),
            poster_address: BOB_ADDRESS.to_string(),
            status: JobStatus::Open,
            applicants: 8,
            created_at: now - Duration::days(1),
            tags: strings(&["frontend", "nft", "react", "polkadot"]),
        },
    ]
}
