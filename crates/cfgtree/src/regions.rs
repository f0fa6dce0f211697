//! mode detection and region splitting
//!
//! A dump always carries a `:context-mode=<0|1>:` marker inside its comment
//! header. The marker decides how the document is cut into regions:
//!
//! - **single-context** (`0`): a `metadata` region (the leading run of `#`
//!   comment lines) and a `global` region running from the first
//!   `config system global` to the end of the document.
//! - **multi-context** (`1`): the trimmed document is split on blank-line
//!   paragraph boundaries. Paragraph 0 is `metadata`, 1 is `context-list`
//!   (one `edit <name>` line per declared context), 2 is `global`, and every
//!   later paragraph must be a context block - `config <word>`, `edit <name>`,
//!   the context body, a closing `end` - which becomes a region named after
//!   that context.
//!
//! Splitting is pure text slicing; nothing in here interprets section bodies.

use crate::ParseError;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

pub const METADATA_REGION: &str = "metadata";
pub const CONTEXT_LIST_REGION: &str = "context-list";
pub const GLOBAL_REGION: &str = "global";

/// Operating mode declared by the header marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMode {
    Single,
    Multi,
}

/// A dump cut into named text regions
///
/// `regions` preserves document order: `metadata`, (`context-list`,) `global`,
/// then one entry per declared context. `context_names` is the declaration
/// order from the `context-list` region, or `["global"]` in single-context
/// mode.
#[derive(Debug)]
pub struct Document {
    pub mode: ContextMode,
    pub regions: IndexMap<String, String>,
    pub context_names: Vec<String>,
}

static MODE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r":context-mode=(\d):").unwrap());
static COMMENT_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:#.+\n)+").unwrap());
static CONTEXT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\Aconfig \S+\nedit ([^\n]+)\n(.+)\nend\s*\z").unwrap());
static EDIT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^edit (.+)$").unwrap());

/// Read the mode marker and slice the dump into regions.
pub fn split_regions(text: &str) -> Result<Document, ParseError> {
    match detect_mode(text)? {
        ContextMode::Single => split_single(text),
        ContextMode::Multi => split_multi(text),
    }
}

fn detect_mode(text: &str) -> Result<ContextMode, ParseError> {
    let digit = MODE_MARKER
        .captures(text)
        .map(|captures| captures[1].to_string())
        .ok_or(ParseError::MalformedHeader)?;

    match digit.as_str() {
        "0" => Ok(ContextMode::Single),
        "1" => Ok(ContextMode::Multi),
        _ => Err(ParseError::MalformedHeader),
    }
}

fn split_single(text: &str) -> Result<Document, ParseError> {
    let trimmed = text.trim();

    // the global region is anchored on the first top-level system block
    let Some(start) = trimmed.find("config system global") else {
        return Err(ParseError::MalformedRegion("config system global".into()));
    };

    let metadata = COMMENT_BLOCK
        .find(trimmed)
        .map(|found| found.as_str().to_string())
        .unwrap_or_default();

    let mut regions = IndexMap::new();
    regions.insert(METADATA_REGION.to_string(), metadata);
    regions.insert(GLOBAL_REGION.to_string(), trimmed[start..].to_string());

    Ok(Document {
        mode: ContextMode::Single,
        regions,
        context_names: vec![GLOBAL_REGION.to_string()],
    })
}

fn split_multi(text: &str) -> Result<Document, ParseError> {
    let mut paragraphs = text.trim().split("\n\n");

    // the first three paragraphs have fixed roles
    let mut regions = IndexMap::new();
    for name in [METADATA_REGION, CONTEXT_LIST_REGION, GLOBAL_REGION] {
        let paragraph = paragraphs
            .next()
            .ok_or_else(|| ParseError::MalformedRegion(name.to_string()))?;
        regions.insert(name.to_string(), paragraph.to_string());
    }

    let context_names: Vec<String> = EDIT_LINE
        .captures_iter(&regions[CONTEXT_LIST_REGION])
        .map(|captures| strip_quotes(captures[1].trim()).to_string())
        .collect();
    tracing::debug!(?context_names, "contexts declared");

    for paragraph in paragraphs {
        let Some(captures) = CONTEXT_BLOCK.captures(paragraph) else {
            let first_line = paragraph.lines().next().unwrap_or_default();
            return Err(ParseError::MalformedRegion(first_line.to_string()));
        };

        let name = strip_quotes(captures[1].trim()).to_string();
        regions.insert(name, captures[2].to_string());
    }

    Ok(Document {
        mode: ContextMode::Multi,
        regions,
        context_names,
    })
}

pub(crate) fn strip_quotes(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(name)
}
