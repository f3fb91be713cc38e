//! Delimiter scanning for declaration text.
//!
//! Walks forward byte-by-byte, skipping string/template literals and
//! comments, to find matching brackets or the end of a statement. Every
//! delimiter is ASCII, so byte offsets always land on char boundaries.

/// Lexical context of the byte currently under the cursor.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexical {
    Code,
    /// Inside a string opened by the contained quote character.
    Str(u8),
    LineComment,
    BlockComment,
}

/// Visit every byte from `from` onward that sits in code (outside strings
/// and comments). The walk stops as soon as `visit` returns `Some`.
fn walk_code<F>(text: &str, from: usize, mut visit: F) -> Option<usize>
where
    F: FnMut(usize, u8) -> Option<usize>,
{
    let bytes = text.as_bytes();
    let mut state = Lexical::Code;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            Lexical::Code => match b {
                b'\'' | b'"' | b'`' => state = Lexical::Str(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    state = Lexical::LineComment;
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = Lexical::BlockComment;
                    i += 1;
                }
                _ => {
                    if let Some(found) = visit(i, b) {
                        return Some(found);
                    }
                }
            },
            Lexical::Str(quote) => {
                if b == b'\\' {
                    // Skip whatever is escaped, including the quote itself.
                    i += 1;
                } else if b == quote {
                    state = Lexical::Code;
                }
            }
            Lexical::LineComment => {
                if b == b'\n' {
                    state = Lexical::Code;
                }
            }
            Lexical::BlockComment => {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = Lexical::Code;
                    i += 1;
                }
            }
        }
        i += 1;
    }
    None
}

/// Find the offset of the delimiter closing the one at `start`.
///
/// `start` must point at `open`. Returns `None` when the text ends before
/// the nesting depth returns to zero.
pub fn find_matching(text: &str, start: usize, open: u8, close: u8) -> Option<usize> {
    if text.as_bytes().get(start) != Some(&open) {
        return None;
    }
    let mut depth = 0usize;
    walk_code(text, start, |i, b| {
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
        None
    })
}

/// Nesting counters for the four bracket kinds a type expression can use.
#[derive(Default)]
struct Depths {
    curly: usize,
    paren: usize,
    square: usize,
    angle: usize,
}

impl Depths {
    fn at_top(&self) -> bool {
        self.curly == 0 && self.paren == 0 && self.square == 0 && self.angle == 0
    }
}

/// Find the first top-level `;` at or after `from`.
///
/// Used for `type X = ...;` statements, which have no single enclosing
/// bracket pair. The `>` of an arrow (`=>`) is not a closing angle bracket.
pub fn find_statement_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depths = Depths::default();
    walk_code(text, from, |i, b| {
        match b {
            b'{' => depths.curly += 1,
            b'}' => depths.curly = depths.curly.saturating_sub(1),
            b'(' => depths.paren += 1,
            b')' => depths.paren = depths.paren.saturating_sub(1),
            b'[' => depths.square += 1,
            b']' => depths.square = depths.square.saturating_sub(1),
            b'<' => depths.angle += 1,
            b'>' if i > 0 && bytes[i - 1] == b'=' => {}
            b'>' => depths.angle = depths.angle.saturating_sub(1),
            b';' if depths.at_top() => return Some(i),
            _ => {}
        }
        None
    })
}

/// Find the first `/*` in `text[from..to]` that opens a comment.
///
/// `from` must sit in code. A `/*` inside a string (`"image/*"`) or a `//`
/// comment doesn't count.
pub fn find_comment_open(text: &str, from: usize, to: usize) -> Option<usize> {
    let bytes = &text.as_bytes()[..to.min(text.len())];
    let mut quote: Option<u8> = None;
    let mut line_comment = false;
    let mut i = from;

    while i < bytes.len() {
        let b = bytes[i];
        if line_comment {
            line_comment = b != b'\n';
        } else if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q || (b == b'\n' && q != b'`') {
                quote = None;
            }
        } else {
            match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    line_comment = true;
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => return Some(i),
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Offsets of the lines in `text` that begin in code at bracket depth zero.
///
/// The start of `text` always counts as a line start. Lines that begin
/// inside a nested `{}`/`()`/`[]`, a string, or a block comment are left
/// out, so fields of an inline object type are never seen as members of the
/// enclosing body.
pub fn top_level_line_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    let mut state = Lexical::Code;
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            Lexical::Code => match b {
                b'\'' | b'"' | b'`' => state = Lexical::Str(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    state = Lexical::LineComment;
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = Lexical::BlockComment;
                    i += 1;
                }
                b'{' | b'(' | b'[' => depth += 1,
                b'}' | b')' | b']' => depth = depth.saturating_sub(1),
                b'\n' if depth == 0 => starts.push(i + 1),
                _ => {}
            },
            Lexical::Str(quote) => {
                if b == b'\\' {
                    i += 1;
                } else if b == quote {
                    state = Lexical::Code;
                } else if b == b'\n' && quote != b'`' {
                    // Unterminated quote; don't let it swallow the body.
                    state = Lexical::Code;
                    if depth == 0 {
                        starts.push(i + 1);
                    }
                }
            }
            Lexical::LineComment => {
                if b == b'\n' {
                    state = Lexical::Code;
                    if depth == 0 {
                        starts.push(i + 1);
                    }
                }
            }
            Lexical::BlockComment => {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = Lexical::Code;
                    i += 1;
                }
            }
        }
        i += 1;
    }
    starts.retain(|&s| s < text.len());
    starts
}
