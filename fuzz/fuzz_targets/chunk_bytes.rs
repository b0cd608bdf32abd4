#![no_main]

use libfuzzer_sys::fuzz_target;
use rabinchunk::{BoundaryChunker, ChunkConfig, ChunkTree, ChunkingStrategy, RabinKarpCdc};

fuzz_target!(|data: &[u8]| {
    let Some((&control, content)) = data.split_first() else {
        return;
    };

    // Small windows and chunk sizes so short inputs still produce boundaries.
    let window = 1 + (control & 0x0f) as usize;
    let seed = u32::from(control >> 4);
    let prepend = window + (control as usize % 3);
    let strategy = RabinKarpCdc::new(ChunkConfig::new(window, seed).unwrap());

    let sizes = [2, 8, 32];
    let mut chunker = strategy.create_multilevel_chunker(&sizes).unwrap();
    let boundaries = chunker.next_boundaries_with_levels(content, prepend);

    // Positions increase, stay in range, and levels are valid.
    let mut previous = 0;
    for boundary in &boundaries {
        assert!(boundary.position > previous);
        assert!(boundary.position <= content.len());
        assert!(boundary.level < sizes.len());
        previous = boundary.position;
    }

    // Determinism.
    let mut again = strategy.create_multilevel_chunker(&sizes).unwrap();
    assert_eq!(again.next_boundaries_with_levels(content, prepend), boundaries);

    // Every level tiles the content.
    let tree = ChunkTree::from_boundaries(content.len(), &boundaries, sizes.len()).unwrap();
    for level in 0..sizes.len() {
        let covered: usize = tree.level(level).iter().map(|n| n.len()).sum();
        assert_eq!(covered, content.len());
    }

    // Split feeding matches one call. Restart padding is per call, so
    // compare without it.
    let cut = content.len() / 2;
    let mut whole = strategy.create_multilevel_chunker(&sizes).unwrap();
    let expected = whole.next_boundaries_with_levels(content, 0);

    let mut split = strategy.create_multilevel_chunker(&sizes).unwrap();
    let mut joined = split.next_boundaries_with_levels(&content[..cut], 0);
    for mut boundary in split.next_boundaries_with_levels(&content[cut..], 0) {
        boundary.position += cut;
        joined.push(boundary);
    }
    assert_eq!(joined, expected);
});
