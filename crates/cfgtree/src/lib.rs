//! # cfgtree - network device configuration parser
//!
//! Parses a vendor configuration dump (the flat, indentation-structured text a
//! firewall or router emits) into a nested, order-preserving tree.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `cfgtree` works internally.
//!
//! ### Grammar terms
//!
//! Quick introduction to terms used to describe elements of a dump.
//!
//! In the dump...
//! - a `section` is a nested block opened by `config <name>` or `edit <name>`
//!   and closed by `end`/`next`
//! - a `directive` is a `set <field> <value...>` or `unset <field>` line
//!   inside a section
//! - a `context` is an isolated configuration namespace; a device is either in
//!   single-context mode or declares multiple named contexts
//!
//! Nesting is expressed purely through indentation, 4 spaces per level:
//!
//! ```text
//! #config-version=FGT60F-7.0.5:opmode=nat:context-mode=0:user=admin
//! config system global
//!     set hostname "fw1"
//! end
//! config firewall policy
//!     edit 1
//!         set srcaddr "net-a" "net-b"
//!         set action accept
//!     next
//! end
//! ```
//!
//! ### Region splitting
//!
//! [regions::split_regions] reads the `:context-mode=<0|1>:` marker from the
//! header and cuts the document into named text regions: `metadata`, `global`
//! and - in multi-context mode - `context-list` plus one region per declared
//! context. See [regions] for the exact rules.
//!
//! ### Section parsing
//!
//! Each region is handed to [section::parse_region] independently. The parser
//! is a recursive descent over `(text, depth, path)`: block openers at the
//! current indentation are found in one scan, the directives of each captured
//! block body in another, then the parser recurses into the body one level
//! deeper. Directive lines are decoded by [directive::decode], which consults
//! the static [policy] table to decide whether a field takes a scalar or a
//! list value - the grammar itself cannot tell `set member "a" "b"` (a list)
//! apart from a scalar that happens to contain quotes.
//!
//! ### Output
//!
//! The per-region trees are collected into a [tree::ParsedTree] keyed by
//! region name, which serializes via [serde] into plain nested mappings.

pub mod directive;
pub mod policy;
pub mod regions;
pub mod section;
pub mod tree;

pub use directive::Value;
pub use regions::ContextMode;
pub use tree::{ParsedTree, SectionNode};

/// All the ways a dump can fail to parse
///
/// Header and region failures are fatal - without them the indentation-depth
/// parse has no reliable starting point. Malformed directive lines are *not*
/// surfaced from [parse_config]; the section parser logs and skips them
/// (see [section]).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The `:context-mode=<0|1>:` marker is missing or carries another digit
    #[error("context-mode marker missing or invalid")]
    MalformedHeader,
    /// A multi-context paragraph does not have the expected
    /// `config .. / edit <name> / .. / end` shape
    #[error("region does not match the expected context block shape: {0:?}")]
    MalformedRegion(String),
    /// A line that looks like a directive but does not match the
    /// `set`/`unset` grammar
    #[error("line does not match the set/unset grammar: {0:?}")]
    MalformedDirective(String),
}

/// Parse a full configuration dump.
///
/// Returns the region-keyed tree and the declared context names in
/// declaration order (`["global"]` for a single-context dump).
///
/// ```
/// let input = ":context-mode=0:\n# fw\nconfig system global\n    set hostname \"fw1\"\nend\n";
/// let (tree, contexts) = cfgtree::parse_config(input).unwrap();
///
/// assert_eq!(contexts, ["global"]);
/// let node = tree.region("global").unwrap();
/// assert!(node.get(&["system".into(), "global".into()]).is_some());
/// ```
pub fn parse_config(text: &str) -> Result<(ParsedTree, Vec<String>), ParseError> {
    let document = regions::split_regions(text)?;
    tracing::debug!(mode = ?document.mode, contexts = ?document.context_names, "document split");

    let mut tree = ParsedTree::default();
    for (name, body) in &document.regions {
        tree.insert_region(name.clone(), section::parse_region(body));
    }

    Ok((tree, document.context_names))
}
