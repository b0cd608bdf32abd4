//! Builds the nested chunk tree of a buffer and prints it.
//!
//! Run with:
//!     cargo run --example chunk_tree

use rabinchunk::{
    BoundaryChunker, ChunkConfig, ChunkNode, ChunkTree, ChunkingStrategy, RabinKarpCdc,
};

fn print_node(node: &ChunkNode, depth: usize) {
    println!(
        "{:indent$}level {} [{}..{}) {} bytes",
        "",
        node.level,
        node.range.start,
        node.range.end,
        node.len(),
        indent = depth * 2
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
    let data: Vec<u8> = text
        .bytes()
        .enumerate()
        .map(|(i, b)| b ^ (i as u8).rotate_left(3))
        .collect();

    let sizes = [32, 128, 512];
    let strategy = RabinKarpCdc::new(ChunkConfig::new(16, 7)?);
    let mut chunker = strategy.create_multilevel_chunker(&sizes)?;
    let boundaries = chunker.next_boundaries_with_levels(&data, 16);

    let tree = ChunkTree::from_boundaries(data.len(), &boundaries, sizes.len())?;
    println!("{} bytes, {} boundaries\n", data.len(), boundaries.len());
    for root in tree.roots() {
        print_node(root, 0);
    }

    for level in 0..tree.levels() {
        println!("level {level}: {} chunks", tree.level(level).len());
    }

    Ok(())
}
