#![no_main]

use std::io::Cursor;

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use rabinchunk::{
    BoundaryChunker, ChunkConfig, ChunkIter, ChunkingStrategy, HashConfig, RabinKarpCdc,
    StreamChunker, split_chunks,
};

fuzz_target!(|data: Vec<u8>| {
    let strategy = RabinKarpCdc::new(ChunkConfig::new(8, 1).unwrap());
    let sizes = [4, 16];

    let mut direct = strategy.create_multilevel_chunker(&sizes).unwrap();
    let boundaries = direct.next_boundaries_with_levels(&data, 8);
    let expected = split_chunks(Bytes::from(data.clone()), &boundaries, HashConfig::enabled());

    // Reader adapter.
    let chunks: Vec<_> = ChunkIter::new(
        Cursor::new(&data),
        strategy.create_multilevel_chunker(&sizes).unwrap(),
        8,
        HashConfig::enabled(),
    )
    .collect::<Result<_, _>>()
    .unwrap();
    assert_eq!(chunks, expected);

    // Push adapter, fed in uneven pieces.
    let mut stream = StreamChunker::new(
        strategy.create_multilevel_chunker(&sizes).unwrap(),
        8,
        HashConfig::enabled(),
    );
    let mut pushed = Vec::new();
    for piece in data.chunks(7) {
        pushed.extend(stream.push(Bytes::copy_from_slice(piece)));
    }
    pushed.extend(stream.finish());
    assert_eq!(pushed, expected);

    // Chunks cover the input exactly.
    let total: usize = chunks.iter().map(|c| c.len()).sum();
    assert_eq!(total, data.len());
    assert!(chunks.iter().all(|c| c.hash.is_some()));
});
