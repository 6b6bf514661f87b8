//! Record types held by the forge store

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::nft::NftMetadata;

/// A file stored inside a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFile {
    pub name: String,
    pub content: String,
    /// Content kind label ("markdown", "json", "toml", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub size: u64,
}

impl RepositoryFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            content,
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub owner_address: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    /// Human-readable freshness label ("just now", "2 days ago")
    pub last_updated: String,
    pub tags: Vec<String>,
    pub ipfs_hash: Option<String>,
    pub nft_id: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub files: Vec<RepositoryFile>,
}

/// Input for `Store::create_repository`
#[derive(Debug, Clone, Default)]
pub struct NewRepository {
    pub name: String,
    pub owner: String,
    pub owner_address: String,
    pub description: String,
    pub tags: Vec<String>,
    pub ipfs_hash: Option<String>,
    pub nft_id: Option<String>,
    pub is_private: bool,
    pub files: Vec<RepositoryFile>,
}

/// Partial update for a repository; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct RepositoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub stars: Option<u32>,
    pub forks: Option<u32>,
    pub ipfs_hash: Option<String>,
    pub nft_id: Option<String>,
    pub is_private: Option<bool>,
}

/// Ordering for repository listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositorySort {
    /// Most starred first
    #[default]
    Stars,
    /// Most forked first
    Forks,
    /// Newest first
    Recent,
    /// Alphabetical, ignoring case
    Name,
}

impl RepositorySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Recent => "recent",
            Self::Name => "name",
        }
    }
}

impl std::str::FromStr for RepositorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stars" => Ok(Self::Stars),
            "forks" => Ok(Self::Forks),
            "recent" => Ok(Self::Recent),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "unknown sort '{}' (expected stars, forks, recent or name)",
                other
            )),
        }
    }
}

/// Explore-page filter over public repositories
#[derive(Debug, Clone, Default)]
pub struct RepositoryQuery {
    /// Case-insensitive substring of name, description, owner or any tag
    pub search: Option<String>,
    /// Exact tag
    pub tag: Option<String>,
    pub sort: RepositorySort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!(
                "unknown job status '{}' (expected open, in-progress, completed or cancelled)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    /// Reward in DOT
    pub reward: Decimal,
    pub deadline: String,
    pub poster: String,
    pub poster_address: String,
    pub status: JobStatus,
    pub applicants: u32,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

/// Input for `Store::create_job`
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub reward: Decimal,
    pub deadline: String,
    pub poster: String,
    pub poster_address: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reward: Option<Decimal>,
    pub deadline: Option<String>,
    pub status: Option<JobStatus>,
    pub applicants: Option<u32>,
}

/// An authorship NFT minted for a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nft {
    pub id: String,
    pub token_id: String,
    /// Owner account address
    pub owner: String,
    pub repo_id: String,
    pub metadata: NftMetadata,
    pub minted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNft {
    pub token_id: String,
    pub owner: String,
    pub repo_id: String,
    pub metadata: NftMetadata,
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgeStats {
    pub total_repos: usize,
    pub total_jobs: usize,
    pub total_nfts: usize,
    pub user_repos: usize,
    pub user_nfts: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_rewards: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_size_tracks_content() {
        let file = RepositoryFile::new("README.md", "# hi", "markdown");
        assert_eq!(file.size, 4);
    }

    #[test]
    fn test_job_status_serializes_kebab_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(JobStatus::InProgress.to_string(), "in-progress");
    }

    #[test]
    fn test_parse_job_status() {
        assert_eq!("open".parse::<JobStatus>(), Ok(JobStatus::Open));
        assert_eq!("In-Progress".parse::<JobStatus>(), Ok(JobStatus::InProgress));
        assert!("done".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_parse_repository_sort() {
        assert_eq!("recent".parse::<RepositorySort>(), Ok(RepositorySort::Recent));
        assert_eq!(" NAME ".parse::<RepositorySort>(), Ok(RepositorySort::Name));
        assert!("size".parse::<RepositorySort>().is_err());
        assert_eq!(RepositorySort::default().as_str(), "stars");
    }

    #[test]
    fn test_file_kind_serializes_as_type() {
        let file = RepositoryFile::new("a.json", "{}", "json");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "json");
    }
}
