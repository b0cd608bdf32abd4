//! Multi-level chunking of a file.
//!
//! Run with:
//!     RUST_LOG=rabinchunk=debug cargo run --example sync_file -- /path/to/file

use std::env;
use std::fs::File;

use rabinchunk::{ChunkConfig, ChunkIter, ChunkingStrategy, HashConfig, RabinKarpCdc};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "Cargo.toml".to_string());
    println!("Chunking file: {path}\n");

    let file = File::open(&path)?;
    println!("File size: {} bytes\n", file.metadata()?.len());

    // 4 KiB, 32 KiB and 256 KiB expected chunk sizes
    let sizes = [4 * 1024, 32 * 1024, 256 * 1024];
    let chunker = RabinKarpCdc::new(ChunkConfig::default()).create_multilevel_chunker(&sizes)?;

    let mut per_level = vec![0usize; sizes.len()];
    let mut total_chunks = 0;
    let mut total_bytes = 0;

    for chunk in ChunkIter::new(file, chunker, 48, HashConfig::enabled()) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();
        if let Some(level) = chunk.level {
            per_level[level] += 1;
        }
        println!("{chunk}");
    }

    println!("\nTotal: {total_chunks} chunks, {total_bytes} bytes");
    for (level, count) in per_level.iter().enumerate() {
        println!("Boundaries closing level {level}: {count}");
    }

    Ok(())
}
