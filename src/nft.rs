//! Authorship NFT metadata generation
//!
//! Pure mapping from repository facts to a metadata record. The image is an
//! SVG card colored deterministically from the repository name and shipped as
//! a percent-encoded `data:` URI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{char_code_sum, get_timestamp_millis, random_base36, truncate_with_ellipsis};

/// Card palette; the repository name picks the primary color, the next entry
/// is the gradient's secondary
const PALETTE: [&str; 8] = [
    "#e6007a", // Polkadot pink
    "#552bbf",
    "#00d4aa",
    "#ff6b35",
    "#4ecdc4",
    "#45b7d1",
    "#96ceb4",
    "#feca57",
];

const EXTERNAL_BASE_URL: &str = "https://polkaforge.dev/repo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(u64),
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<usize> for AttributeValue {
    fn from(n: usize) -> Self {
        Self::Number(n as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

impl Attribute {
    fn new(trait_type: &str, value: impl Into<AttributeValue>) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub address: String,
    pub share: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftProperties {
    pub category: String,
    pub creators: Vec<Creator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub attributes: Vec<Attribute>,
    pub properties: NftProperties,
}

impl NftMetadata {
    pub fn attribute(&self, trait_type: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }
}

/// Repository fields the metadata is derived from
#[derive(Debug, Clone)]
pub struct RepositoryFacts<'a> {
    pub name: &'a str,
    pub owner: &'a str,
    pub owner_address: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub ipfs_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

pub fn generate_metadata(facts: &RepositoryFacts<'_>) -> NftMetadata {
    let primary_language = facts.tags.first().map(String::as_str).unwrap_or("Unknown");

    NftMetadata {
        name: format!("{} - Repository Authorship", facts.name),
        description: format!(
            "Proof of authorship for the repository \"{}\" on PolkaForge. {}",
            facts.name, facts.description
        ),
        image: generate_image(facts.name, facts.owner, facts.tags),
        external_url: Some(format!("{}/{}", EXTERNAL_BASE_URL, facts.name)),
        attributes: vec![
            Attribute::new("Repository Name", facts.name),
            Attribute::new("Owner", facts.owner),
            Attribute::new("Creation Date", facts.created_at.format("%Y-%m-%d").to_string()),
            Attribute::new("IPFS Hash", facts.ipfs_hash),
            Attribute::new("Primary Language", primary_language),
            Attribute::new("Tag Count", facts.tags.len()),
            Attribute::new("Blockchain", "Polkadot"),
            Attribute::new("Platform", "PolkaForge"),
        ],
        properties: NftProperties {
            category: "Repository".to_string(),
            creators: vec![Creator {
                address: facts.owner_address.to_string(),
                share: 100,
            }],
        },
    }
}

/// Primary and secondary card colors for a repository name
pub fn palette_for(repo_name: &str) -> (&'static str, &'static str) {
    let index = (char_code_sum(repo_name) % PALETTE.len() as u64) as usize;
    (PALETTE[index], PALETTE[(index + 1) % PALETTE.len()])
}

/// Render the authorship card and wrap it in a `data:image/svg+xml` URI
pub fn generate_image(repo_name: &str, owner: &str, tags: &[String]) -> String {
    let (primary, secondary) = palette_for(repo_name);
    let title = truncate_with_ellipsis(repo_name, 15);
    let tag_line = tags.iter().take(3).map(String::as_str).collect::<Vec<_>>().join(" • ");

    let svg = format!(
        r##"<svg width="400" height="400" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:{primary};stop-opacity:1" />
      <stop offset="100%" style="stop-color:{secondary};stop-opacity:1" />
    </linearGradient>
    <filter id="glow">
      <feGaussianBlur stdDeviation="3" result="coloredBlur"/>
      <feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge>
    </filter>
  </defs>
  <rect width="400" height="400" fill="url(#bg)"/>
  <circle cx="100" cy="100" r="50" fill="rgba(255,255,255,0.1)"/>
  <circle cx="300" cy="300" r="70" fill="rgba(255,255,255,0.1)"/>
  <circle cx="350" cy="100" r="30" fill="rgba(255,255,255,0.1)"/>
  <rect x="40" y="80" width="320" height="240" rx="20" fill="rgba(255,255,255,0.95)" stroke="rgba(255,255,255,0.3)" stroke-width="2"/>
  <text x="200" y="120" text-anchor="middle" font-family="Arial, sans-serif" font-size="18" font-weight="bold" fill="{primary}">PolkaForge</text>
  <rect x="180" y="140" width="40" height="30" rx="5" fill="none" stroke="{primary}" stroke-width="2"/>
  <circle cx="185" cy="150" r="2" fill="{primary}"/>
  <line x1="190" y1="150" x2="210" y2="150" stroke="{primary}" stroke-width="2"/>
  <line x1="190" y1="160" x2="205" y2="160" stroke="{primary}" stroke-width="1"/>
  <text x="200" y="190" text-anchor="middle" font-family="Arial, sans-serif" font-size="16" font-weight="bold" fill="#333">{title}</text>
  <text x="200" y="210" text-anchor="middle" font-family="Arial, sans-serif" font-size="12" fill="#666">by {owner}</text>
  <text x="200" y="240" text-anchor="middle" font-family="Arial, sans-serif" font-size="10" fill="#888">{tag_line}</text>
  <text x="200" y="280" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" font-weight="bold" fill="{primary}" filter="url(#glow)">AUTHORSHIP NFT</text>
  <circle cx="80" cy="350" r="3" fill="rgba(255,255,255,0.8)"/>
  <circle cx="95" cy="350" r="3" fill="rgba(255,255,255,0.6)"/>
  <circle cx="110" cy="350" r="3" fill="rgba(255,255,255,0.4)"/>
  <circle cx="290" cy="350" r="3" fill="rgba(255,255,255,0.4)"/>
  <circle cx="305" cy="350" r="3" fill="rgba(255,255,255,0.6)"/>
  <circle cx="320" cy="350" r="3" fill="rgba(255,255,255,0.8)"/>
</svg>"##
    );

    format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
}

/// Token id of the form `PF-<millis>-<base36>`
pub fn generate_token_id() -> String {
    format!("PF-{}-{}", get_timestamp_millis(), random_base36(13))
}
