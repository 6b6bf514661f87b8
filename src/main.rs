//! PolkaForge - decentralized forge demo with a rule-based assistant
//!
//! A standalone CLI that uses:
//! - An in-memory store of repositories, jobs and authorship NFTs
//! - A demo wallet extension with deterministic balances
//! - A rule-based chat assistant (transfers, code review, topic help)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use polkaforge::chat::{Assistant, ChatSession, Responder, ThinkingDelay, Widget};
use polkaforge::config::{Config, ResponderKind};
use polkaforge::repl::{Repl, colors};
use polkaforge::store::{JobStatus, RepositoryDraft, RepositoryQuery, RepositorySort, Store, publish_repository};
use polkaforge::utils::truncate_middle;
use polkaforge::wallet::{AccountMemory, DemoExtension, WalletSession};

#[derive(Parser)]
#[command(name = "polkaforge")]
#[command(about = "Decentralized forge demo with a rule-based assistant")]
#[command(version)]
struct Args {
    /// Config file (defaults to ~/.polkaforge/config.toml)
    #[arg(long, global = true, env = "POLKAFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Lower bound of the simulated thinking delay
    #[arg(long, global = true, env = "POLKAFORGE_THINKING_MIN_MS")]
    thinking_min_ms: Option<u64>,

    /// Upper bound of the simulated thinking delay
    #[arg(long, global = true, env = "POLKAFORGE_THINKING_MAX_MS")]
    thinking_max_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with the assistant (default)
    Chat {
        /// Use the lightweight site-help widget instead of the assistant
        #[arg(long)]
        widget: bool,
    },
    /// List repositories
    Repos {
        /// Only repositories owned by this address, private ones included
        #[arg(long, conflicts_with_all = ["search", "tag"])]
        owner: Option<String>,
        /// Match name, description, owner or tags (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
        /// Only repositories carrying this exact tag
        #[arg(long, short)]
        tag: Option<String>,
        /// Order by stars, forks, recent or name
        #[arg(long, default_value = "stars")]
        sort: RepositorySort,
    },
    /// List jobs
    Jobs {
        /// open, in-progress, completed or cancelled (default: all)
        #[arg(long)]
        status: Option<JobStatus>,
    },
    /// Platform totals
    Stats,
    /// Publish a repository and mint its authorship NFT
    Publish {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long)]
        private: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from ~/.polkaforge/.env or current dir)
    let env_path = dirs::home_dir()
        .map(|h| h.join(".polkaforge").join(".env"))
        .filter(|p| p.exists());
    if let Some(path) = env_path {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }

    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };

    let mut store = Store::with_sample_data();
    let extension = Arc::new(DemoExtension::from_config(&config.accounts));
    let mut wallet = WalletSession::new(extension, AccountMemory::new(config.account_file()));
    wallet.restore().await;

    match args.command.unwrap_or(Command::Chat { widget: false }) {
        Command::Chat { widget } => {
            // CLI flag > config file > default
            let kind = if widget {
                ResponderKind::Widget
            } else {
                config.responder.unwrap_or_default()
            };
            let responder: Arc<dyn Responder> = match kind {
                ResponderKind::Assistant => Arc::new(Assistant::new()),
                ResponderKind::Widget => Arc::new(Widget::new()),
            };

            let default = responder.default_delay();
            let delay = ThinkingDelay::range(
                args.thinking_min_ms.or(config.thinking_min_ms).unwrap_or(default.min_ms),
                args.thinking_max_ms.or(config.thinking_max_ms).unwrap_or(default.max_ms),
            );
            tracing::debug!(responder = kind.as_str(), ?delay, "starting chat");

            let chat = ChatSession::new(responder, delay);
            let mut repl = Repl::new(chat, wallet, store, config.history_file())?;
            repl.run().await?;
        }
        Command::Repos {
            owner,
            search,
            tag,
            sort,
        } => {
            let repos = match owner.as_deref() {
                Some(owner) => store.repositories_by_owner(owner),
                None => store.search_repositories(&RepositoryQuery { search, tag, sort }),
            };
            if repos.is_empty() {
                println!("No repositories.");
            }
            for repo in repos {
                println!(
                    "{}  {} by {}  ★ {}  ⑂ {}  {}",
                    colors::header(&repo.name),
                    colors::status(&repo.id),
                    repo.owner,
                    repo.stars,
                    repo.forks,
                    colors::status(&repo.last_updated)
                );
                if !repo.description.is_empty() {
                    println!("    {}", repo.description);
                }
            }
        }
        Command::Jobs { status } => {
            let jobs = store.jobs_by_status(status);
            if jobs.is_empty() {
                println!("No jobs.");
            }
            for job in jobs {
                println!(
                    "{}  {}  [{}]  {} applicants  due {}",
                    colors::header(&job.title),
                    colors::balance(&job.reward.to_string()),
                    colors::job_status(job.status),
                    job.applicants,
                    job.deadline
                );
            }
        }
        Command::Stats => {
            let owner = wallet.account().map(|a| a.address.clone());
            let stats = store.stats(owner.as_deref());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Publish {
            name,
            description,
            tags,
            private,
        } => {
            let draft = RepositoryDraft {
                name,
                description,
                tags,
                is_private: private,
                files: Vec::new(),
            };
            let published = publish_repository(&mut store, &wallet, draft)
                .context("Failed to publish repository")?;

            println!("{}", colors::success("Repository published."));
            println!("{}", colors::banner_line("repository", &published.repo_id));
            println!("{}", colors::banner_line("token", &published.token_id));
            println!("{}", colors::banner_line("ipfs", &published.ipfs_hash));
            println!(
                "{}",
                colors::banner_line("owner", &truncate_middle(&published.owner_address, 8, 4))
            );
            if let Some(nft) = store.nft_for_repository(&published.repo_id) {
                println!("{}", serde_json::to_string_pretty(&nft.metadata)?);
            }
        }
    }

    Ok(())
}
