use mailblocks_engine::{Block, BlockKind, EmailDocument, EmailMeta};

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_section(index: usize) -> Block {
    let id = |name: &str| format!("{name}-{index}");
    Block::with_defaults(id("container"), BlockKind::Container).with_children(vec![
        Block::with_defaults(id("heading"), BlockKind::Heading),
        Block::with_defaults(id("text"), BlockKind::Text),
        Block::with_defaults(id("columns"), BlockKind::Columns).with_children(vec![
            Block::with_defaults(id("image"), BlockKind::Image),
            Block::with_defaults(id("button"), BlockKind::Button),
        ]),
        Block::with_defaults(id("divider"), BlockKind::Divider),
    ])
}

#[allow(dead_code)]
pub fn generate_document(sections: usize) -> EmailDocument {
    let blocks = (0..sections).map(generate_section).collect();
    EmailDocument::from_blocks(blocks, EmailMeta::new("Bench", "Benchmark email", "Preview"))
}
