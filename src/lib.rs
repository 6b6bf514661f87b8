// src/lib.rs

pub mod chat;
pub mod config;
pub mod error;
pub mod nft;
pub mod repl;
pub mod store;
pub mod utils;
pub mod wallet;

pub use error::{ForgeError, Result};
