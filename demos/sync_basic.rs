//! Push-based chunking of an in-memory stream.
//!
//! Run with:
//!     cargo run --example sync_basic

use bytes::Bytes;
use rabinchunk::{ChunkConfig, ChunkingStrategy, HashConfig, RabinKarpCdc, StreamChunker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1 MiB of xorshift noise
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let data: Vec<u8> = (0..1024 * 1024)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 56) as u8
        })
        .collect();

    let chunker = RabinKarpCdc::new(ChunkConfig::default()).create_chunker(16 * 1024)?;
    let mut stream = StreamChunker::new(chunker, 48, HashConfig::enabled());

    println!("Chunking {} bytes in 8 KiB pushes...\n", data.len());

    let mut chunks = Vec::new();
    for batch in data.chunks(8 * 1024) {
        chunks.extend(stream.push(Bytes::copy_from_slice(batch)));
    }
    chunks.extend(stream.finish());

    for (i, chunk) in chunks.iter().enumerate() {
        match &chunk.hash {
            Some(hash) => println!(
                "Chunk {:>3}: offset={:>8}, len={:>6}, hash={}",
                i,
                chunk.offset,
                chunk.len(),
                &hash.to_hex()[..16]
            ),
            None => println!("Chunk {:>3}: offset={:>8}, len={:>6}", i, chunk.offset, chunk.len()),
        }
    }

    let total: usize = chunks.iter().map(|c| c.len()).sum();
    println!("\nTotal: {} chunks, {} bytes", chunks.len(), total);
    if !chunks.is_empty() {
        println!("Average chunk size: {} bytes", total / chunks.len());
    }

    Ok(())
}
