//! Repository publishing: store the repository, then mint its authorship NFT

use chrono::Utc;
use tracing::info;

use super::types::{NewNft, NewRepository, RepositoryFile, RepositoryUpdate};
use super::{Store, StoreError};
use crate::error::Result;
use crate::nft::{RepositoryFacts, generate_metadata, generate_token_id};
use crate::utils::random_base36;
use crate::wallet::{WalletError, WalletSession};

/// What the author fills in before publishing
#[derive(Debug, Clone, Default)]
pub struct RepositoryDraft {
    pub name: String,
    pub description: String,
    /// Comma-separated tag list as typed by the user
    pub tags: String,
    pub is_private: bool,
    pub files: Vec<RepositoryFile>,
}

impl RepositoryDraft {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Ids produced by a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub repo_id: String,
    pub owner_address: String,
    pub nft_id: String,
    pub token_id: String,
    pub ipfs_hash: String,
}

/// Placeholder content hash; nothing is pinned anywhere
fn mock_ipfs_hash() -> String {
    format!("Qm{}", random_base36(26))
}

fn default_readme(draft: &RepositoryDraft, tags: &[String]) -> RepositoryFile {
    let description = if draft.description.is_empty() {
        "A new repository created on PolkaForge"
    } else {
        draft.description.as_str()
    };
    let tag_lines = tags
        .iter()
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n");

    let content = format!(
        "# {}\n\n{}\n\n## Getting Started\n\nThis repository was created on PolkaForge, the decentralized GitHub on Polkadot.\n\n## Features\n\n- Decentralized storage on IPFS\n- NFT authorship proof\n- Built on Polkadot\n\n## Tags\n\n{}",
        draft.name, description, tag_lines
    );
    RepositoryFile::new("README.md", content, "markdown")
}

/// Create the repository for the wallet's active account, mint its
/// authorship NFT and link the two. A draft without files gets a generated
/// README. Needs a connected wallet and a non-blank name.
pub fn publish_repository(store: &mut Store, wallet: &WalletSession, draft: RepositoryDraft) -> Result<Published> {
    let account = match wallet.account() {
        Some(account) if wallet.is_connected() => account,
        _ => return Err(WalletError::NotConnected.into()),
    };
    if draft.name.trim().is_empty() {
        return Err(StoreError::MissingName.into());
    }

    let ipfs_hash = mock_ipfs_hash();
    let tags = draft.tag_list();
    let owner = account.display_name();

    let files = if draft.files.is_empty() {
        vec![default_readme(&draft, &tags)]
    } else {
        draft.files.clone()
    };

    let repo_id = store
        .create_repository(NewRepository {
            name: draft.name.clone(),
            owner: owner.clone(),
            owner_address: account.address.clone(),
            description: draft.description.clone(),
            tags: tags.clone(),
            ipfs_hash: Some(ipfs_hash.clone()),
            nft_id: None,
            is_private: draft.is_private,
            files,
        })
        .id
        .clone();

    let metadata = generate_metadata(&RepositoryFacts {
        name: &draft.name,
        owner: &owner,
        owner_address: &account.address,
        description: &draft.description,
        tags: &tags,
        ipfs_hash: &ipfs_hash,
        created_at: Utc::now(),
    });

    let token_id = generate_token_id();
    let nft_id = store
        .create_nft(NewNft {
            token_id: token_id.clone(),
            owner: account.address.clone(),
            repo_id: repo_id.clone(),
            metadata,
        })
        .id
        .clone();

    store.update_repository(
        &repo_id,
        RepositoryUpdate {
            nft_id: Some(token_id.clone()),
            ..Default::default()
        },
    )?;

    info!("Published {} as {} (token {})", draft.name, repo_id, token_id);

    Ok(Published {
        repo_id,
        owner_address: account.address.clone(),
        nft_id,
        token_id,
        ipfs_hash,
    })
}
