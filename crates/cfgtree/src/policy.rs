//! list-field policy table
//!
//! The directive grammar is ambiguous: `set member "a" "b"` is a list of two
//! names under `firewall addrgrp`, while `set comments "a" "b"` elsewhere is
//! one scalar that happens to contain quotes. Which reading applies is vendor
//! schema knowledge, not something the text can tell us, so it lives here as
//! a static table.
//!
//! Keys are space-joined section-path prefixes. A field takes a list value
//! iff it appears in the entry of *any* key whose segments are a prefix of
//! the section path being decoded. The pairs below are exact vendor data;
//! the same field name is frequently a scalar under every other path.

/// (section-path prefix, fields that take a list value at or under it)
const LIST_FIELDS: &[(&str, &[&str])] = &[
    ("system accprofile", &["vdom"]),
    (
        "wanopt content-delivery-network-rule",
        &["host-domain-name-suffix"],
    ),
    ("system ntp", &["interface"]),
    ("system automation-stitch", &["action", "email-to"]),
    ("system dhcp server", &["vci-string"]),
    ("firewall addrgrp", &["member"]),
    ("switch-controller managed-switch", &["allowed-vlans"]),
    (
        "firewall policy",
        &[
            "dstintf",
            "dstaddr",
            "interface",
            "internet-service-name",
            "fsso-groups",
            "groups",
            "service",
            "srcaddr",
            "srcintf",
        ],
    ),
    ("system zone", &["interface"]),
    ("wireless-controller wtp-profile", &["channel"]),
    ("router ospf", &["passive-interface"]),
    ("system admin", &["gui-vdom-menu-favorites"]),
    ("system ha", &["monitor"]),
    ("vpn ssl web portal", &["split-tunneling-routing-address"]),
    (
        "vpn ssl settings",
        &["tunnel-ip-pools", "source-interface", "source-address"],
    ),
    ("system sdwan", &["server", "members", "src", "dst"]),
    ("file-filter profile", &["filetype"]),
    ("firewall vipgrp", &["member"]),
    ("firewall service group", &["member"]),
];

/// Does `field` take a list value at `path`?
pub fn is_list(path: &[String], field: &str) -> bool {
    LIST_FIELDS
        .iter()
        .any(|(prefix, fields)| is_path_prefix(prefix, path) && fields.contains(&field))
}

/// Prefix match on path segments, not on substrings.
fn is_path_prefix(prefix: &str, path: &[String]) -> bool {
    let segments: Vec<&str> = prefix.split(' ').collect();

    path.len() >= segments.len()
        && segments
            .iter()
            .zip(path)
            .all(|(wanted, got)| *wanted == got.as_str())
}
