//! Plain-text outline rendering.
//!
//! Each block becomes a vim fold:
//!
//! ```text
//! My Page page 4c6a54c6-8b3e-4ea2-af9c-faabcc88d58d {{{
//!    text 0b1f... {{{
//!     Hello world
//!   }}}
//! }}}
//! ```

use crate::resolve::BlockRef;
use notion_types::BlockType;

pub const FOLD_OPEN: &str = "{{{";
pub const FOLD_CLOSE: &str = "}}}";

/// Render `block` and its subtree, indenting each level by `indent`.
pub fn render_outline(block: BlockRef<'_>, indent: &str) -> String {
    let mut out = String::new();
    write_block(&mut out, block, indent, 0);
    out
}

fn write_block(out: &mut String, block: BlockRef<'_>, indent: &str, depth: usize) {
    write_line(
        out,
        indent,
        depth,
        &format!("{} {} {} {}", block.title, block.block_type, block.id, FOLD_OPEN),
    );

    for span in &block.inline_content {
        write_line(out, indent, depth + 1, &span.text);
    }
    if block.block_type == BlockType::Code {
        for line in block.code.lines() {
            write_line(out, indent, depth + 1, line);
        }
    }
    for child in block.children() {
        write_block(out, child, indent, depth + 1);
    }

    write_line(out, indent, depth, FOLD_CLOSE);
}

fn write_line(out: &mut String, indent: &str, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(indent);
    }
    out.push_str(text);
    out.push('\n');
}
