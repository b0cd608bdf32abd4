//! Boundary detection algorithms.
//!
//! - [`RabinKarp`], [`RollingWindow`], [`RollingHash`] - Rolling hash
//! - [`Threshold`] - Match probability as an absolute hash threshold
//! - [`RabinKarpChunker`] - Single-level content-defined chunking
//! - [`MultiLevelChunker`] - Single-pass nested content-defined chunking
//! - [`StaticChunker`] - Fixed-size chunking
//! - [`LevelStack`] - Independent chunkers combined into levels

mod fixed;
mod multilevel;
mod rabin_karp;
mod ring;
mod single;
mod stack;

pub use fixed::StaticChunker;
pub use multilevel::MultiLevelChunker;
pub use rabin_karp::{
    RabinKarp, RollingHash, RollingWindow, Threshold, BASE, HASH_BITS, HASH_MASK, HASH_MODULUS,
};
pub use single::RabinKarpChunker;
pub use stack::LevelStack;
