//! Async chunking of several streams concurrently on tokio.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io

use futures_util::StreamExt;
use rabinchunk::{chunk_async, ChunkConfig, ChunkError, ChunkingStrategy, HashConfig, RabinKarpCdc};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let streams: Vec<Vec<u8>> = (0..3u32)
        .map(|seed| {
            (0..200_000u32)
                .map(|i| (i.wrapping_add(seed).wrapping_mul(0x9E37_79B9) >> 24) as u8)
                .collect()
        })
        .collect();

    println!("Processing {} streams concurrently...\n", streams.len());

    let handles: Vec<_> = streams
        .into_iter()
        .enumerate()
        .map(|(id, data)| tokio::spawn(process_stream(id, data)))
        .collect();

    for handle in handles {
        let (id, chunks, bytes) = handle.await??;
        println!("Stream {id}: {chunks} chunks, {bytes} bytes");
    }

    Ok(())
}

async fn process_stream(id: usize, data: Vec<u8>) -> Result<(usize, usize, usize), ChunkError> {
    let chunker = RabinKarpCdc::new(ChunkConfig::default()).create_multilevel_chunker(&[1024, 8192])?;
    let reader = std::io::Cursor::new(data).compat();
    let mut stream = chunk_async(reader, chunker, 48, HashConfig::enabled());

    let mut chunks = 0;
    let mut bytes = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        chunks += 1;
        bytes += chunk.len();
    }

    Ok((id, chunks, bytes))
}
