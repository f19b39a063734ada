use std::sync::LazyLock;

use regex::Regex;

static HTML_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<h[1-6][^>]*>").expect("html heading pattern is valid")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*+]\s+|\d{1,3}[.)]\s+)").expect("list item pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    List,
    Code,
    Markup,
    Prose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    /// Starts on the line right after the previous block, with no blank line.
    pub tight: bool,
}

impl Block {
    pub fn is_prose(&self) -> bool {
        self.kind == BlockKind::Prose
    }
}

/// Whether a single line is a Markdown (`#`) or HTML (`<h1>`–`<h6>`) heading.
pub fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    (trimmed.starts_with('#') && trimmed.trim_start_matches('#').starts_with(' '))
        || HTML_HEADING.is_match(line)
}

pub fn is_list_item_line(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}

fn classify(text: &str) -> BlockKind {
    let first = text.lines().next().unwrap_or_default();
    let trimmed = first.trim_start();
    if trimmed.starts_with("```") {
        BlockKind::Code
    } else if is_heading_line(first) {
        BlockKind::Heading
    } else if is_list_item_line(first) {
        BlockKind::List
    } else if trimmed.starts_with('<') || trimmed.starts_with('|') || trimmed.starts_with('>') {
        BlockKind::Markup
    } else {
        BlockKind::Prose
    }
}

#[derive(Default)]
struct BlockBuilder<'a> {
    blocks: Vec<Block>,
    current: Vec<&'a str>,
    blank_before: bool,
}

impl<'a> BlockBuilder<'a> {
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let text = self.current.join("\n");
        self.current.clear();
        if text.trim().is_empty() {
            return;
        }
        let tight = !self.blocks.is_empty() && !self.blank_before;
        self.blank_before = false;
        self.blocks.push(Block {
            kind: classify(&text),
            text,
            tight,
        });
    }

    fn blank_line(&mut self) {
        self.flush();
        if !self.blocks.is_empty() {
            self.blank_before = true;
        }
    }

    fn current_is_list(&self) -> bool {
        self.current.first().is_some_and(|line| is_list_item_line(line))
    }
}

/// Split a document into blocks.
///
/// Blank lines separate blocks. Heading lines always form their own block,
/// a list starts a new block even directly under a paragraph, and fenced
/// code is kept whole even when it contains blank lines. Indented lines
/// under a list item continue that item.
pub fn split_blocks(text: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if in_fence {
            builder.current.push(line);
            if trimmed.starts_with("```") {
                in_fence = false;
                builder.flush();
            }
            continue;
        }
        if trimmed.starts_with("```") {
            builder.flush();
            builder.current.push(line);
            in_fence = true;
            continue;
        }
        if line.trim().is_empty() {
            builder.blank_line();
            continue;
        }
        if is_heading_line(line) {
            builder.flush();
            builder.current.push(line);
            builder.flush();
            continue;
        }
        let item = is_list_item_line(line);
        let continues_item = line.starts_with([' ', '\t']);
        let in_list = builder.current_is_list();
        if (item && !in_list) || (!item && !continues_item && in_list) {
            builder.flush();
        }
        builder.current.push(line);
    }
    builder.flush();
    builder.blocks
}

/// Reassemble blocks, restoring a blank line wherever one separated them.
pub fn join_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push_str(if block.tight { "\n" } else { "\n\n" });
        }
        out.push_str(&block.text);
    }
    out
}

/// Apply `f` to every block whose kind satisfies `select`.
///
/// A block that `f` empties keeps its previous text.
pub fn map_blocks(
    text: &str,
    select: impl Fn(BlockKind) -> bool,
    mut f: impl FnMut(&str) -> String,
) -> String {
    let blocks: Vec<Block> = split_blocks(text)
        .into_iter()
        .map(|block| {
            if !select(block.kind) {
                return block;
            }
            let rewritten = f(&block.text);
            if rewritten.trim().is_empty() {
                block
            } else {
                Block {
                    text: rewritten,
                    ..block
                }
            }
        })
        .collect();
    join_blocks(&blocks)
}

/// Apply `f` to the text of every prose block, leaving other blocks alone.
pub fn map_prose(text: &str, f: impl FnMut(&str) -> String) -> String {
    map_blocks(text, |kind| kind == BlockKind::Prose, f)
}
