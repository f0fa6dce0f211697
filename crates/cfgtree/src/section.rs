//! recursive section parsing
//!
//! A region body is a recursive-descent parse over `(text, depth, path)`.
//! Indentation is the sole nesting signal: a block opener (`config <name>` /
//! `edit <name>`) sits at exactly `4 * depth` spaces, its body is the run of
//! following lines indented at least one level deeper, and its own directives
//! sit at exactly `4 * (depth + 1)` spaces inside that body.
//!
//! Two independent single-pass scans per level: [extract_blocks] finds the
//! openers and their bodies, [extract_directives] pulls the directive lines
//! out of a captured body. Anything at an unexpected indentation (free-form
//! comment text, `end`/`next` terminators) simply never matches and is
//! ignored.
//!
//! Directive lines that match the extraction shape but fail to decode are
//! logged via `tracing::warn!` and skipped instead of aborting the parse -
//! dumps routinely interleave noise and one bad line should not cost the
//! whole tree.

use crate::directive::{self, Value};
use crate::regions::strip_quotes;
use crate::tree::SectionNode;
use indexmap::IndexMap;

/// Parse one region body into its section tree.
pub fn parse_region(text: &str) -> SectionNode {
    let mut root = SectionNode::default();
    let mut path = Vec::new();
    parse_blocks(text, 0, &mut path, &mut root);
    root
}

fn parse_blocks(text: &str, depth: usize, path: &mut Vec<String>, root: &mut SectionNode) {
    for block in extract_blocks(text, depth) {
        let segments = name_segments(&block.name);
        if segments.is_empty() {
            continue;
        }

        let added = segments.len();
        path.extend(segments);
        tracing::trace!(?path, "section found");

        let fields = extract_directives(&block.body, depth + 1, path);
        root.insert(path, fields);

        parse_blocks(&block.body, depth + 1, path, root);
        path.truncate(path.len() - added);
    }
}

struct Block {
    name: String,
    body: String,
}

/// One scan for block openers at `4 * depth` spaces.
///
/// A body is the run of consecutive following lines indented at least one
/// level deeper; a blank line or a shallower line ends it. Bodies keep their
/// original indentation so recursion can keep counting absolute depth.
fn extract_blocks(text: &str, depth: usize) -> Vec<Block> {
    let opener_indent = 4 * depth;
    let body_indent = opener_indent + 4;

    let mut blocks = Vec::new();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(name) = opener_name(line, opener_indent) else {
            continue;
        };

        let mut body = String::new();
        while let Some(next) = lines.peek() {
            if leading_spaces(next) < body_indent || next.trim().is_empty() {
                break;
            }
            body.push_str(next);
            body.push('\n');
            lines.next();
        }

        blocks.push(Block { name, body });
    }

    blocks
}

fn opener_name(line: &str, indent: usize) -> Option<String> {
    if leading_spaces(line) != indent {
        return None;
    }

    let statement = &line[indent..];
    let name = statement
        .strip_prefix("config ")
        .or_else(|| statement.strip_prefix("edit "))?;

    Some(name.trim().to_string()).filter(|name| !name.is_empty())
}

/// One scan for the directives belonging to a captured body.
///
/// Only lines at exactly `4 * depth` spaces count; deeper lines belong to
/// child sections. Repeated fields overwrite (last-write-wins), which also
/// lets a later `unset` clear an earlier `set`.
fn extract_directives(body: &str, depth: usize, path: &[String]) -> IndexMap<String, Value> {
    let indent = 4 * depth;
    let mut fields = IndexMap::new();

    for line in body.lines() {
        if leading_spaces(line) != indent {
            continue;
        }
        let statement = line[indent..].trim_end();
        if !statement.starts_with("set ") && !statement.starts_with("unset ") {
            continue;
        }

        match directive::decode(statement, path) {
            Ok((field, value)) => {
                fields.insert(field, value);
            }
            Err(error) => {
                tracing::warn!(%error, ?path, "skipping malformed directive line");
            }
        }
    }

    fields
}

/// Path segments contributed by an opener name.
///
/// Unquoted names split on whitespace (`config firewall policy` nests two
/// levels deep); a quoted name is user data and stays one segment.
fn name_segments(name: &str) -> Vec<String> {
    if name.starts_with('"') {
        return vec![strip_quotes(name).to_string()];
    }

    name.split_whitespace().map(str::to_string).collect()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
