//! DexScreener latest pairs endpoint.

pub mod client;
pub mod messages;

pub use client::DexScreenerClient;
pub use messages::{DexPair, PairVolume, PairsResponse, TokenRef};
