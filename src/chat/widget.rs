//! Site-help widget
//!
//! Lighter sibling of the assistant: answers questions about using
//! PolkaForge. Input is lowercased and trimmed, then checked against command
//! patterns, the keyword table, the synonym table and finally a canned reply.

use rand::seq::IndexedRandom;

use super::rules::{Captures, KeywordRule, RuleSet};
use super::session::ThinkingDelay;
use super::{Responder, Response};
use crate::wallet::WalletSnapshot;

pub const WELCOME: &str = "Hello! I'm your PolkaForge assistant. I can help you navigate the platform, understand features, and guide you through decentralized development!";

const ANSWERS: &[KeywordRule] = &[
    // greetings
    KeywordRule::new("hello", &["hello"], "Hello! Welcome to PolkaForge! How can I help you today?"),
    KeywordRule::new("hi", &["hi"], "Hi there! I'm your PolkaForge assistant. What would you like to know?"),
    KeywordRule::new("hey", &["hey"], "Hey! Ready to explore decentralized development?"),
    // repositories
    KeywordRule::new(
        "create repo",
        &["create repo"],
        "To create a repository: 1) Connect your wallet, 2) Run `polkaforge publish`, 3) Enter name and description, 4) Your repository and its authorship NFT are created!",
    ),
    KeywordRule::new(
        "how to create repository",
        &["how to create repository"],
        "Creating a repo is easy! Publish it with a name and description, and your repo will be stored on IPFS with metadata on-chain.",
    ),
    KeywordRule::new(
        "new repository",
        &["new repository"],
        "Ready to create something amazing? Publish a new repository and start building!",
    ),
    // files
    KeywordRule::new(
        "add file",
        &["add file"],
        "To add files: 1) Open your repository, 2) Add a file with a name and code, 3) Save, 4) Push changes to mint an NFT!",
    ),
    KeywordRule::new(
        "upload code",
        &["upload code"],
        "Upload your code by adding files to your repository, then push changes to store it on IPFS and mint your authorship NFT!",
    ),
    KeywordRule::new(
        "push changes",
        &["push changes"],
        "Pushing changes uploads your code to IPFS and mints an NFT as proof of authorship.",
    ),
    // NFTs and chain
    KeywordRule::new(
        "nft",
        &["nft"],
        "Every time you push code, you automatically mint a non-transferable NFT as proof of authorship! It's stored on the blockchain forever.",
    ),
    KeywordRule::new(
        "proof of authorship",
        &["proof of authorship"],
        "Your NFTs serve as permanent proof that you wrote the code. They can't be transferred, ensuring authentic authorship!",
    ),
    KeywordRule::new(
        "blockchain",
        &["blockchain"],
        "PolkaForge uses Polkadot parachains to store metadata and mint NFTs while keeping your code on IPFS.",
    ),
    // collaboration
    KeywordRule::new(
        "fork",
        &["fork"],
        "To fork a repository: 1) Find the repo you want, 2) Fork it, 3) It creates a copy under your account that you can modify!",
    ),
    KeywordRule::new(
        "clone",
        &["clone"],
        "Cloning downloads the repository files to view locally. Any public repository can be cloned!",
    ),
    KeywordRule::new(
        "star",
        &["star"],
        "Show appreciation for great projects by starring them! Stars are stored on-chain.",
    ),
    KeywordRule::new(
        "collaborate",
        &["collaborate"],
        "Collaborate by forking projects, making improvements, and sharing them back!",
    ),
    // wallet and DOT
    KeywordRule::new(
        "wallet",
        &["wallet"],
        "Connect your wallet to interact with PolkaForge. Make sure you have some DOT for transaction fees!",
    ),
    KeywordRule::new(
        "talisman",
        &["talisman"],
        "Talisman is your gateway to the Polkadot ecosystem. Install the extension and connect to start using PolkaForge!",
    ),
    KeywordRule::new(
        "dot",
        &["dot"],
        "DOT is used for transaction fees and future reward systems. You'll need a small amount for creating repos and pushing code.",
    ),
    KeywordRule::new(
        "send dot",
        &["send dot"],
        "To send DOT: Use the format \"Send 10 DOT to @username\" and I'll help you transfer tokens!",
    ),
    // search
    KeywordRule::new(
        "search",
        &["search"],
        "Search repositories by name, description, or author. Discover amazing open-source projects!",
    ),
    KeywordRule::new(
        "find repository",
        &["find repository"],
        "List repositories and filter by owner to find interesting projects to contribute to or learn from!",
    ),
    // technical
    KeywordRule::new(
        "ipfs",
        &["ipfs"],
        "IPFS (InterPlanetary File System) stores your code files in a decentralized way. It's like the internet's hard drive!",
    ),
    KeywordRule::new(
        "gas fees",
        &["gas fees"],
        "Transaction fees are minimal because we only store metadata on-chain. Your code files live on IPFS!",
    ),
    KeywordRule::new(
        "smart contract",
        &["smart contract"],
        "Our smart contracts handle repository metadata, NFT minting, and collaboration features on the blockchain.",
    ),
    // troubleshooting
    KeywordRule::new(
        "error",
        &["error"],
        "If you encounter errors: 1) Check your wallet connection, 2) Ensure you have enough DOT, 3) Try again.",
    ),
    KeywordRule::new(
        "transaction failed",
        &["transaction failed"],
        "Transaction failures usually mean insufficient fees or network issues. Check your DOT balance and try again!",
    ),
    KeywordRule::new(
        "not working",
        &["not working"],
        "Having issues? Make sure your wallet is connected, you're on the right network, and have sufficient DOT for fees.",
    ),
    // features
    KeywordRule::new(
        "features",
        &["features"],
        "PolkaForge features: Decentralized repos, NFT authorship proof, IPFS storage, DOT rewards, forking, starring, and more!",
    ),
    KeywordRule::new(
        "what can i do",
        &["what can i do"],
        "You can: Create repos, upload code, fork projects, mint NFTs, search repositories, collaborate, and earn DOT rewards!",
    ),
    KeywordRule::new(
        "how it works",
        &["how it works"],
        "PolkaForge combines IPFS storage with the Polkadot blockchain to create a decentralized GitHub where you own your code and get rewarded!",
    ),
    // general
    KeywordRule::new(
        "help",
        &["help"],
        "I can help you with: creating repos, uploading code, forking projects, wallet connection, NFTs, and more! What do you need?",
    ),
    KeywordRule::new("thanks", &["thanks"], "You're welcome! Happy coding on PolkaForge! 🚀"),
    KeywordRule::new("bye", &["bye"], "Goodbye! Keep building amazing things on PolkaForge! 👋"),
];

/// Main keyword and its variations. A hit answers with the main keyword's
/// template from `ANSWERS`; mains without a template never answer.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("repository", &["repo", "repositories", "reposity", "repositry"]),
    ("create", &["make", "build", "new", "add"]),
    ("fork", &["copy", "duplicate", "clone"]),
    ("wallet", &["connect", "talisman", "metamask"]),
    ("nft", &["token", "mint", "proof"]),
    ("ipfs", &["storage", "decentralized", "distributed"]),
    ("dot", &["polkadot", "token", "crypto"]),
    ("search", &["find", "lookup", "discover"]),
    ("star", &["like", "favorite", "bookmark"]),
    ("push", &["upload", "commit", "save"]),
    ("bug", &["error", "issue", "problem", "debug"]),
    ("gas", &["fee", "cost", "transaction"]),
    ("collaboration", &["collaborate", "team", "work together"]),
    ("smart contract", &["contract", "blockchain", "ethereum"]),
];

pub const DEFAULT_REPLIES: [&str; 5] = [
    "I'm not sure about that specific question, but I can help you with PolkaForge features like creating repositories, forking projects, or connecting your wallet!",
    "That's an interesting question! Try asking me about repositories, NFTs, wallet connection, or IPFS storage.",
    "I'd love to help! You can ask me about creating repos, pushing code, minting NFTs, or any other PolkaForge features.",
    "I'm here to help with PolkaForge! Try asking about forking, starring repos, DOT transfers, or troubleshooting.",
    "Not sure about that one! But I can guide you through using PolkaForge features. What would you like to know?",
];

const DETAILED_INPUT_CHARS: usize = 50;

fn send_reply(caps: &Captures<'_>, _: &()) -> Option<Response> {
    Some(Response::ok(format!(
        "I'll help you send {} DOT to {}. This feature is coming soon! For now, use your wallet directly.",
        caps.get("amount")?,
        caps.get("recipient")?
    )))
}

fn transfer_reply(caps: &Captures<'_>, _: &()) -> Option<Response> {
    Some(Response::ok(format!(
        "Transfer of {} DOT to {} noted! This feature will be available in the next update.",
        caps.get("amount")?,
        caps.get("recipient")?
    )))
}

fn bug_reply(caps: &Captures<'_>, _: &()) -> Option<Response> {
    Some(Response::ok(format!(
        "To check for bugs in {}, try: 1) Review variable names, 2) Check syntax, 3) Test edge cases, 4) Add logging while debugging!",
        caps.get("subject")?
    )))
}

fn how_to_reply(caps: &Captures<'_>, _: &()) -> Option<Response> {
    Some(Response::ok(format!(
        "To {}, check our documentation or ask me more specifically about PolkaForge features!",
        caps.get("subject")?
    )))
}

pub struct Widget {
    rules: RuleSet<()>,
}

impl Default for Widget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new()
                .pattern("send", r"(?i)send (?P<amount>\d+) dot to @?(?P<recipient>\w+)", send_reply)
                .pattern(
                    "transfer",
                    r"(?i)transfer (?P<amount>\d+) dot to @?(?P<recipient>\w+)",
                    transfer_reply,
                )
                .pattern("bug", r"(?i)bug in (?P<subject>.+)", bug_reply)
                .pattern("how to", r"(?i)how to (?P<subject>.+)", how_to_reply)
                .keywords(ANSWERS),
        }
    }

    pub fn reply(&self, input: &str) -> Response {
        let input = input.trim().to_lowercase();
        self.rules
            .respond(&input, &())
            .or_else(|| self.synonym(&input).map(Response::ok))
            .unwrap_or_else(|| Response::ok(default_reply(&input)))
    }

    fn synonym(&self, lowered: &str) -> Option<&'static str> {
        SYNONYMS
            .iter()
            .filter(|(main, variations)| lowered.contains(main) || variations.iter().any(|v| lowered.contains(v)))
            .find_map(|(main, _)| self.rules.template(main))
    }
}

fn default_reply(input: &str) -> String {
    let reply = DEFAULT_REPLIES.choose(&mut rand::rng()).copied().unwrap_or(DEFAULT_REPLIES[0]);
    if input.contains('?') {
        format!("Great question! {}", reply)
    } else if input.chars().count() > DETAILED_INPUT_CHARS {
        format!("That's quite detailed! {}", reply)
    } else {
        reply.to_string()
    }
}

impl Responder for Widget {
    fn name(&self) -> &'static str {
        "widget"
    }

    fn welcome(&self) -> &'static str {
        WELCOME
    }

    fn default_delay(&self) -> ThinkingDelay {
        ThinkingDelay::fixed(500)
    }

    fn respond(&self, input: &str, _wallet: &WalletSnapshot) -> Response {
        self.reply(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(input: &str) -> String {
        Widget::new().reply(input).text
    }

    fn is_default(text: &str) -> bool {
        DEFAULT_REPLIES.iter().any(|d| text.ends_with(d))
    }

    #[test]
    fn test_patterns_first() {
        assert_eq!(
            reply("Send 10 DOT to @Bob"),
            "I'll help you send 10 DOT to bob. This feature is coming soon! For now, use your wallet directly."
        );
        assert!(reply("transfer 3 dot to carol").starts_with("Transfer of 3 DOT to carol"));
        assert!(reply("there is a bug in my wallet").contains("bugs in my wallet"));
    }

    #[test]
    fn test_how_to_shadows_keyword() {
        // the keyword "how to create repository" is unreachable behind the pattern
        assert!(reply("how to create repository").starts_with("To create repository,"));
    }

    #[test]
    fn test_keyword_order_and_looseness() {
        // "hi" is contained in "this", and greetings come first
        assert!(reply("is this a fork?").starts_with("Hi there!"));
        assert!(reply("HELLO").starts_with("Hello! Welcome"));
        // "dot" precedes "send dot" in the table
        assert!(reply("send dot").starts_with("DOT is used"));
        assert!(reply("nft please").starts_with("Every time you push code"));
    }

    #[test]
    fn test_synonyms() {
        assert!(reply("copy a project").starts_with("To fork a repository"));
        assert!(reply("mint").starts_with("Every time you push code"));
        assert!(reply("connect").starts_with("Connect your wallet"));
    }

    #[test]
    fn test_synonym_without_template_falls_through() {
        // "commit" maps to "push", which has no answer of its own
        let text = reply("commit");
        assert!(is_default(&text));
    }

    #[test]
    fn test_default_prefixes() {
        let text = reply("quux?");
        assert!(text.starts_with("Great question! "));
        assert!(is_default(&text));

        let long = "zzzz ".repeat(12);
        let text = reply(&long);
        assert!(text.starts_with("That's quite detailed! "));

        assert!(is_default(&reply("zzz")));
    }

    #[test]
    fn test_never_an_error() {
        let widget = Widget::new();
        for input in ["send 1 dot to x", "error", "quux?", ""] {
            assert!(!widget.respond(input, &WalletSnapshot::disconnected()).is_error);
        }
    }
}
