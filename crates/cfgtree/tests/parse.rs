//! End-to-end parses over small documents

use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn single_context_minimal_document() {
    let input = ":context-mode=0:\n# comment\nconfig system global\n    set hostname \"fw1\"\nend\n";
    let (tree, contexts) = cfgtree::parse_config(input).unwrap();

    assert_eq!(contexts, vec!["global"]);
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "metadata": {},
            "global": {
                "system": { "global": { "hostname": "fw1" } }
            }
        })
    );
}

#[test]
fn multi_context_declaration_order_is_preserved() {
    let input = "\
#config-version=FGT100F-7.2.1:opmode=vdom:context-mode=1:user=admin

config vdom
edit root
next
edit branch-a
next
edit branch-b
next
end

config system global
    set hostname \"fw-ha\"
end

config vdom
edit root
config system settings
    set opmode nat
end
end

config vdom
edit branch-a
config system settings
    set opmode transparent
end
end

config vdom
edit branch-b
config system settings
    set opmode nat
end
end
";
    let (tree, contexts) = cfgtree::parse_config(input).unwrap();

    assert_eq!(contexts, vec!["root", "branch-a", "branch-b"]);
    assert_eq!(
        serde_json::to_value(tree.region("branch-a").unwrap()).unwrap(),
        json!({ "system": { "settings": { "opmode": "transparent" } } })
    );
}

#[test]
fn list_and_scalar_readings_of_the_same_field() {
    let input = "\
:context-mode=0:
#meta
config system global
    set hostname \"fw1\"
end
config firewall policy
    edit \"1\"
        set srcaddr \"net-a\" \"net-b\"
        set comments \"net-a\" \"net-b\"
    next
end
";
    let (tree, _contexts) = cfgtree::parse_config(input).unwrap();

    assert_eq!(
        serde_json::to_value(tree.region("global").unwrap()).unwrap(),
        json!({
            "system": { "global": { "hostname": "fw1" } },
            "firewall": {
                "policy": {
                    "1": {
                        // in the policy table: a list of the quoted items
                        "srcaddr": ["net-a", "net-b"],
                        // not in the policy table: the literal text survives
                        "comments": "\"net-a\" \"net-b\""
                    }
                }
            }
        })
    );
}

#[test]
fn malformed_header_yields_no_partial_tree() {
    let input = "# no marker here\nconfig system global\n    set hostname \"fw1\"\nend\n";

    assert_eq!(
        cfgtree::parse_config(input).unwrap_err(),
        cfgtree::ParseError::MalformedHeader
    );
}

#[test]
fn reparsing_is_deterministic() {
    let input = ":context-mode=0:\n#meta\nconfig system global\n    set hostname \"fw1\"\nend\n";

    let (first, _) = cfgtree::parse_config(input).unwrap();
    let (second, _) = cfgtree::parse_config(input).unwrap();

    assert_eq!(first, second);
}
