//! In-memory forge store
//!
//! Holds repositories, jobs and authorship NFTs for one process. The store is
//! an explicit object: construct it once and hand `&`/`&mut` to whoever needs
//! it. Nothing is persisted.

mod publish;
mod seed;
pub mod types;

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub use publish::{Published, RepositoryDraft, publish_repository};
pub use seed::{ALICE_ADDRESS, BOB_ADDRESS};
pub use types::{
    ForgeStats, Job, JobStatus, JobUpdate, NewJob, NewNft, NewRepository, Nft, Repository,
    RepositoryFile, RepositoryQuery, RepositorySort, RepositoryUpdate,
};

/// Label applied to `last_updated` on every write
pub const JUST_NOW: &str = "just now";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("repository name is required")]
    MissingName,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// `needle` must already be lowercase
fn repository_mentions(repo: &Repository, needle: &str) -> bool {
    repo.name.to_lowercase().contains(needle)
        || repo.description.to_lowercase().contains(needle)
        || repo.owner.to_lowercase().contains(needle)
        || repo.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Default)]
pub struct Store {
    repositories: Vec<Repository>,
    jobs: Vec<Job>,
    nfts: Vec<Nft>,
}

impl Store {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the demo repositories and jobs
    pub fn with_sample_data() -> Self {
        Self {
            repositories: seed::sample_repositories(),
            jobs: seed::sample_jobs(),
            nfts: Vec::new(),
        }
    }

    // ========================================================================
    // Repositories
    // ========================================================================

    /// All repositories that are not private
    pub fn public_repositories(&self) -> Vec<&Repository> {
        self.repositories.iter().filter(|r| !r.is_private).collect()
    }

    pub fn repository(&self, id: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.id == id)
    }

    /// Repositories owned by an address, private ones included
    pub fn repositories_by_owner(&self, owner_address: &str) -> Vec<&Repository> {
        self.repositories
            .iter()
            .filter(|r| r.owner_address == owner_address)
            .collect()
    }

    /// Public repositories matching `query`, in the requested order
    pub fn search_repositories(&self, query: &RepositoryQuery) -> Vec<&Repository> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut repos: Vec<&Repository> = self
            .public_repositories()
            .into_iter()
            .filter(|r| needle.as_deref().is_none_or(|n| repository_mentions(r, n)))
            .filter(|r| query.tag.as_ref().is_none_or(|t| r.tags.contains(t)))
            .collect();

        match query.sort {
            RepositorySort::Stars => repos.sort_by(|a, b| b.stars.cmp(&a.stars)),
            RepositorySort::Forks => repos.sort_by(|a, b| b.forks.cmp(&a.forks)),
            RepositorySort::Recent => repos.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            RepositorySort::Name => repos.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            }),
        }
        repos
    }

    pub fn create_repository(&mut self, new: NewRepository) -> &Repository {
        let repo = Repository {
            id: generate_id(),
            name: new.name,
            owner: new.owner,
            owner_address: new.owner_address,
            description: new.description,
            stars: 0,
            forks: 0,
            last_updated: JUST_NOW.to_string(),
            tags: new.tags,
            ipfs_hash: new.ipfs_hash,
            nft_id: new.nft_id,
            is_private: new.is_private,
            created_at: Utc::now(),
            files: new.files,
        };
        info!("Repository created with ID: {}", repo.id);
        self.repositories.push(repo);
        &self.repositories[self.repositories.len() - 1]
    }

    pub fn update_repository(&mut self, id: &str, update: RepositoryUpdate) -> Result<&Repository> {
        let repo = self.repository_mut(id)?;

        if let Some(name) = update.name {
            repo.name = name;
        }
        if let Some(description) = update.description {
            repo.description = description;
        }
        if let Some(tags) = update.tags {
            repo.tags = tags;
        }
        if let Some(stars) = update.stars {
            repo.stars = stars;
        }
        if let Some(forks) = update.forks {
            repo.forks = forks;
        }
        if let Some(hash) = update.ipfs_hash {
            repo.ipfs_hash = Some(hash);
        }
        if let Some(nft_id) = update.nft_id {
            repo.nft_id = Some(nft_id);
        }
        if let Some(is_private) = update.is_private {
            repo.is_private = is_private;
        }
        repo.last_updated = JUST_NOW.to_string();

        Ok(repo)
    }

    /// Add a file, replacing any existing file with the same name
    pub fn add_file(&mut self, repo_id: &str, file: RepositoryFile) -> Result<()> {
        let repo = self.repository_mut(repo_id)?;
        repo.files.retain(|f| f.name != file.name);
        repo.files.push(file);
        repo.last_updated = JUST_NOW.to_string();
        Ok(())
    }

    /// Remove a file by name; removing a file that is not there is a no-op
    pub fn delete_file(&mut self, repo_id: &str, file_name: &str) -> Result<()> {
        let repo = self.repository_mut(repo_id)?;
        repo.files.retain(|f| f.name != file_name);
        repo.last_updated = JUST_NOW.to_string();
        Ok(())
    }

    fn repository_mut(&mut self, id: &str) -> Result<&mut Repository> {
        self.repositories
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::RepositoryNotFound(id.to_string()))
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Jobs with the given status; `None` means all of them
    pub fn jobs_by_status(&self, status: Option<JobStatus>) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|j| status.is_none_or(|s| j.status == s))
            .collect()
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn create_job(&mut self, new: NewJob) -> &Job {
        let job = Job {
            id: generate_id(),
            title: new.title,
            description: new.description,
            requirements: new.requirements,
            reward: new.reward,
            deadline: new.deadline,
            poster: new.poster,
            poster_address: new.poster_address,
            status: JobStatus::Open,
            applicants: 0,
            created_at: Utc::now(),
            tags: new.tags,
        };
        info!("Job created with ID: {}", job.id);
        self.jobs.push(job);
        &self.jobs[self.jobs.len() - 1]
    }

    pub fn update_job(&mut self, id: &str, update: JobUpdate) -> Result<&Job> {
        let job = self.job_mut(id)?;

        if let Some(title) = update.title {
            job.title = title;
        }
        if let Some(description) = update.description {
            job.description = description;
        }
        if let Some(reward) = update.reward {
            job.reward = reward;
        }
        if let Some(deadline) = update.deadline {
            job.deadline = deadline;
        }
        if let Some(status) = update.status {
            job.status = status;
        }
        if let Some(applicants) = update.applicants {
            job.applicants = applicants;
        }

        Ok(job)
    }

    /// Register one more applicant on a job
    pub fn apply_to_job(&mut self, id: &str) -> Result<&Job> {
        let job = self.job_mut(id)?;
        job.applicants += 1;
        Ok(job)
    }

    fn job_mut(&mut self, id: &str) -> Result<&mut Job> {
        self.jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| StoreError::JobNotFound(id.to_string()))
    }

    // ========================================================================
    // NFTs
    // ========================================================================

    pub fn nfts(&self) -> &[Nft] {
        &self.nfts
    }

    pub fn nfts_by_owner(&self, owner: &str) -> Vec<&Nft> {
        self.nfts.iter().filter(|n| n.owner == owner).collect()
    }

    pub fn nft_for_repository(&self, repo_id: &str) -> Option<&Nft> {
        self.nfts.iter().find(|n| n.repo_id == repo_id)
    }

    pub fn create_nft(&mut self, new: NewNft) -> &Nft {
        let nft = Nft {
            id: generate_id(),
            token_id: new.token_id,
            owner: new.owner,
            repo_id: new.repo_id,
            metadata: new.metadata,
            minted_at: Utc::now(),
        };
        info!("NFT created with ID: {}", nft.id);
        self.nfts.push(nft);
        &self.nfts[self.nfts.len() - 1]
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Global counters plus the given owner's share, if any
    pub fn stats(&self, owner_address: Option<&str>) -> ForgeStats {
        let public = self.public_repositories();

        ForgeStats {
            total_repos: public.len(),
            total_jobs: self.jobs.len(),
            total_nfts: self.nfts.len(),
            user_repos: owner_address
                .map(|a| self.repositories_by_owner(a).len())
                .unwrap_or(0),
            user_nfts: owner_address
                .map(|a| self.nfts_by_owner(a).len())
                .unwrap_or(0),
            total_stars: public.iter().map(|r| u64::from(r.stars)).sum(),
            total_forks: public.iter().map(|r| u64::from(r.forks)).sum(),
            total_rewards: self.jobs.iter().map(|j| j.reward).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_repo(name: &str, owner_address: &str, is_private: bool) -> NewRepository {
        NewRepository {
            name: name.to_string(),
            owner: "carol".to_string(),
            owner_address: owner_address.to_string(),
            description: "test repo".to_string(),
            tags: vec!["rust".to_string()],
            is_private,
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_data_is_seeded() {
        let store = Store::with_sample_data();
        assert_eq!(store.public_repositories().len(), 2);
        assert_eq!(store.jobs().len(), 2);
        assert!(store.nfts().is_empty());
    }

    #[test]
    fn test_create_repository_defaults() {
        let mut store = Store::new();
        let repo = store.create_repository(new_repo("forge", "5Addr", false));
        assert_eq!(repo.stars, 0);
        assert_eq!(repo.forks, 0);
        assert_eq!(repo.last_updated, JUST_NOW);
        assert!(!repo.id.is_empty());
    }

    #[test]
    fn test_private_repositories_hidden_from_listing() {
        let mut store = Store::new();
        store.create_repository(new_repo("open", "5Addr", false));
        let secret_id = store.create_repository(new_repo("secret", "5Addr", true)).id.clone();

        assert_eq!(store.public_repositories().len(), 1);
        assert_eq!(store.repositories_by_owner("5Addr").len(), 2);
        assert!(store.repository(&secret_id).is_some());
    }

    #[test]
    fn test_update_repository_touches_label() {
        let mut store = Store::with_sample_data();
        let id = store.public_repositories()[0].id.clone();
        let repo = store
            .update_repository(&id, RepositoryUpdate { stars: Some(300), ..Default::default() })
            .unwrap();
        assert_eq!(repo.stars, 300);
        assert_eq!(repo.last_updated, JUST_NOW);
    }

    #[test]
    fn test_update_missing_repository() {
        let mut store = Store::new();
        let err = store.update_repository("nope", RepositoryUpdate::default()).unwrap_err();
        assert_eq!(err, StoreError::RepositoryNotFound("nope".into()));
    }

    #[test]
    fn test_add_file_replaces_same_name() {
        let mut store = Store::new();
        let id = store.create_repository(new_repo("forge", "5Addr", false)).id.clone();

        store.add_file(&id, RepositoryFile::new("main.rs", "fn main() {}", "rust")).unwrap();
        store.add_file(&id, RepositoryFile::new("main.rs", "fn main() { run() }", "rust")).unwrap();

        let repo = store.repository(&id).unwrap();
        assert_eq!(repo.files.len(), 1);
        assert!(repo.files[0].content.contains("run()"));
    }

    #[test]
    fn test_delete_file() {
        let mut store = Store::new();
        let id = store.create_repository(new_repo("forge", "5Addr", false)).id.clone();
        store.add_file(&id, RepositoryFile::new("a.txt", "a", "text")).unwrap();

        store.delete_file(&id, "a.txt").unwrap();
        store.delete_file(&id, "never-existed.txt").unwrap();
        assert!(store.repository(&id).unwrap().files.is_empty());
        assert!(store.delete_file("missing", "a.txt").is_err());
    }

    fn names(repos: &[&Repository]) -> Vec<String> {
        repos.iter().map(|r| r.name.clone()).collect()
    }

    /// Sample data plus a fresh, unstarred repository and a fork-heavy template
    fn explore_store() -> Store {
        let mut store = Store::with_sample_data();
        store.create_repository(new_repo("zk-rollup", "5Addr", false));
        store.create_repository(new_repo("hidden", "5Addr", true));
        let template = store
            .public_repositories()
            .into_iter()
            .find(|r| r.name == "substrate-node-template")
            .map(|r| r.id.clone())
            .unwrap();
        store
            .update_repository(&template, RepositoryUpdate { forks: Some(100), ..Default::default() })
            .unwrap();
        store
    }

    fn sorted(store: &Store, sort: RepositorySort) -> Vec<String> {
        names(&store.search_repositories(&RepositoryQuery { sort, ..Default::default() }))
    }

    #[test]
    fn test_search_sort_keys() {
        let store = explore_store();
        assert_eq!(
            sorted(&store, RepositorySort::Stars),
            ["polkadot-js-api", "substrate-node-template", "zk-rollup"]
        );
        assert_eq!(
            sorted(&store, RepositorySort::Forks),
            ["substrate-node-template", "polkadot-js-api", "zk-rollup"]
        );
        assert_eq!(
            sorted(&store, RepositorySort::Recent),
            ["zk-rollup", "polkadot-js-api", "substrate-node-template"]
        );
        assert_eq!(
            sorted(&store, RepositorySort::Name),
            ["polkadot-js-api", "substrate-node-template", "zk-rollup"]
        );
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let mut store = Store::new();
        store.create_repository(new_repo("beacon", "5Addr", false));
        store.create_repository(new_repo("Anchor", "5Addr", false));
        store.create_repository(new_repo("Cursor", "5Addr", false));
        assert_eq!(sorted(&store, RepositorySort::Name), ["Anchor", "beacon", "Cursor"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let store = explore_store();
        let search = |term: &str| {
            names(&store.search_repositories(&RepositoryQuery {
                search: Some(term.to_string()),
                ..Default::default()
            }))
        };

        // name
        assert_eq!(search("ZK-ROLL"), ["zk-rollup"]);
        // description
        assert_eq!(search("JavaScript api"), ["polkadot-js-api"]);
        // owner
        assert_eq!(search("Bob"), ["substrate-node-template"]);
        // tag
        assert_eq!(search("BLOCKCHAIN"), ["substrate-node-template"]);
        // private repositories never show up
        assert!(search("hidden").is_empty());
        assert_eq!(search("   ").len(), 3);
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let store = explore_store();
        let by_tag = |tag: &str| {
            names(&store.search_repositories(&RepositoryQuery {
                tag: Some(tag.to_string()),
                ..Default::default()
            }))
        };
        assert_eq!(by_tag("substrate"), ["polkadot-js-api", "substrate-node-template"]);
        assert!(by_tag("sub").is_empty());
        assert!(by_tag("Substrate").is_empty());

        let both = store.search_repositories(&RepositoryQuery {
            search: Some("template".into()),
            tag: Some("substrate".into()),
            sort: RepositorySort::Name,
        });
        assert_eq!(names(&both), ["substrate-node-template"]);
    }

    #[test]
    fn test_jobs_by_status() {
        let mut store = Store::with_sample_data();
        let id = store.jobs()[0].id.clone();
        store
            .update_job(&id, JobUpdate { status: Some(JobStatus::InProgress), ..Default::default() })
            .unwrap();

        assert_eq!(store.jobs_by_status(None).len(), 2);
        assert_eq!(store.jobs_by_status(Some(JobStatus::Open)).len(), 1);
        let in_progress = store.jobs_by_status(Some(JobStatus::InProgress));
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, id);
        assert!(store.jobs_by_status(Some(JobStatus::Completed)).is_empty());
    }

    #[test]
    fn test_create_job_is_open() {
        let mut store = Store::new();
        let job = store.create_job(NewJob {
            title: "Audit pallet".into(),
            description: "Review a staking pallet".into(),
            requirements: vec!["Rust".into()],
            reward: Decimal::new(125, 1),
            deadline: "2025-03-01".into(),
            poster: "Audit DAO".into(),
            poster_address: "5Poster".into(),
            tags: vec!["audit".into()],
        });
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.applicants, 0);
    }

    #[test]
    fn test_apply_and_update_job() {
        let mut store = Store::with_sample_data();
        let id = store.jobs()[1].id.clone();
        let before = store.jobs()[1].applicants;

        assert_eq!(store.apply_to_job(&id).unwrap().applicants, before + 1);

        let job = store
            .update_job(&id, JobUpdate { status: Some(JobStatus::InProgress), ..Default::default() })
            .unwrap();
        assert_eq!(job.status, JobStatus::InProgress);
        assert!(matches!(store.apply_to_job("ghost"), Err(StoreError::JobNotFound(_))));
    }

    #[test]
    fn test_stats_sums_rewards_and_stars() {
        let store = Store::with_sample_data();
        let stats = store.stats(None);
        assert_eq!(stats.total_repos, 2);
        assert_eq!(stats.total_stars, 245 + 189);
        assert_eq!(stats.total_forks, 87 + 56);
        assert_eq!(stats.total_rewards, Decimal::from(80));
        assert_eq!(stats.user_repos, 0);
    }

    #[test]
    fn test_stats_for_owner() {
        let store = Store::with_sample_data();
        let stats = store.stats(Some(seed::ALICE_ADDRESS));
        assert_eq!(stats.user_repos, 1);
        assert_eq!(stats.user_nfts, 0);
    }
}
