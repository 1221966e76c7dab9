//! Fence scanning: locate every well-formed ```/~~~ block in a message.

/// Minimum run length for a fence.
const MIN_FENCE_LEN: usize = 3;

/// The two accepted fence characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceChar {
    Backtick,
    Tilde,
}

impl FenceChar {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'`' => Some(FenceChar::Backtick),
            b'~' => Some(FenceChar::Tilde),
            _ => None,
        }
    }

    fn byte(self) -> u8 {
        match self {
            FenceChar::Backtick => b'`',
            FenceChar::Tilde => b'~',
        }
    }
}

/// A maximal run of one fence character, at least three long.
#[derive(Debug, Clone, Copy)]
struct FenceRun {
    ch: FenceChar,
    start: usize,
    end: usize,
}

impl FenceRun {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// One complete fenced block. `start..end` covers both delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FenceBlock<'a> {
    pub start: usize,
    pub end: usize,
    /// Trimmed remainder of the opening line (may be empty).
    pub info: &'a str,
    /// Raw text between the opening line and the closing fence.
    pub body: &'a str,
}

/// Find the next fence run starting at or after `from`. A run is counted from
/// `from`, so the tail of a split closing run is seen as a run of its own.
fn next_run(content: &str, from: usize) -> Option<FenceRun> {
    let bytes = content.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        let Some(ch) = FenceChar::from_byte(bytes[i]) else {
            i += 1;
            continue;
        };
        let start = i;
        while i < bytes.len() && bytes[i] == ch.byte() {
            i += 1;
        }
        if i - start >= MIN_FENCE_LEN {
            return Some(FenceRun { ch, start, end: i });
        }
    }
    None
}

/// Try to complete a block opened by `open`. Returns None when the opening line
/// has no newline or no matching closer follows.
fn close_block<'a>(content: &'a str, open: FenceRun) -> Option<FenceBlock<'a>> {
    let newline = open.end + content[open.end..].find('\n')?;
    let info = content[open.end..newline].trim();
    let body_start = newline + 1;

    let mut from = body_start;
    while let Some(run) = next_run(content, from) {
        if run.ch == open.ch && run.len() >= open.len() {
            // A closer with enough left over to be a fence ends at the opener's
            // length; the rest may open the next block.
            let end = if run.len() - open.len() >= MIN_FENCE_LEN {
                run.start + open.len()
            } else {
                run.end
            };
            return Some(FenceBlock {
                start: open.start,
                end,
                info,
                body: &content[body_start..run.start],
            });
        }
        from = run.end;
    }
    None
}

/// Scan `content` left to right and return every complete fenced block in
/// order of appearance. Blocks never overlap. An opener without a closer is
/// skipped and scanning resumes right after it.
pub(super) fn find_fence_blocks(content: &str) -> Vec<FenceBlock<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;
    while let Some(open) = next_run(content, pos) {
        match close_block(content, open) {
            Some(block) => {
                pos = block.end;
                blocks.push(block);
            }
            None => pos = open.end,
        }
    }
    blocks
}
