//! Property-based tests for path values.
//!
//! The canonicalizer has its own inline property tests for the shape of the
//! canonical form. This module focuses on derived values and relationships.

use super::canonicalize::canonicalize;
use super::relationship::PathRelationship;
use super::value::PathValue;
use proptest::prelude::*;

// Strategy for generating path-like strings
fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn relative_path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(path_component_strategy(), 1..8)
}

fn absolute_path_strategy() -> impl Strategy<Value = PathValue> {
    relative_path_strategy().prop_map(|parts| {
        let root = crate::path::rootdir().unwrap();
        root.child(parts)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Joining segments is the same as joining them by hand
    #[test]
    fn segments_equal_joined_string(parts in relative_path_strategy()) {
        let from_segments = canonicalize(&parts).unwrap();
        let from_string = canonicalize([parts.join("/")]).unwrap();
        prop_assert_eq!(from_segments, from_string);
    }

    // A value survives a round trip through its string form
    #[test]
    fn string_round_trip(parts in relative_path_strategy()) {
        let value = canonicalize(&parts).unwrap();
        let reparsed: PathValue = value.to_string().parse().unwrap();
        prop_assert_eq!(value, reparsed);
    }

    // components() of a relative path are exactly its segments
    #[test]
    fn components_match_segments(parts in relative_path_strategy()) {
        let value = canonicalize(&parts).unwrap();
        let components: Vec<String> = value.components().into_iter().map(String::from).collect();
        prop_assert_eq!(components, parts);
    }

    // basename is the last segment and parent drops exactly one
    #[test]
    fn basename_and_parent_split_the_path(parts in relative_path_strategy()) {
        let value = canonicalize(&parts).unwrap();
        prop_assert_eq!(value.basename(), parts[parts.len() - 1].as_str());

        let parent = value.parent(1);
        if parts.len() > 1 {
            prop_assert_eq!(parent.child([value.basename()]), value);
        } else {
            prop_assert_eq!(parent.as_str(), ".");
        }
    }

    // parent(n) on an absolute path never climbs past the root
    #[test]
    fn parent_stops_at_root(path in absolute_path_strategy(), levels in 1..20usize) {
        let parent = path.parent(levels);
        prop_assert!(parent.is_absolute());
        if levels >= path.components().len() {
            prop_assert!(parent.is_rootdir());
        }
    }

    // Containment is transitive (if A contains B and B contains C, then A contains C)
    #[test]
    fn path_containment_transitive(base in absolute_path_strategy(), parts1 in 1..5usize, parts2 in 1..5usize) {
        let path_b = base.child((0..parts1).map(|i| format!("sub{i}")));
        let path_c = path_b.child((0..parts2).map(|i| format!("deep{i}")));

        prop_assert_eq!(PathRelationship::between(&base, &path_b), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&path_b, &path_c), PathRelationship::Ancestor);
        prop_assert_eq!(PathRelationship::between(&base, &path_c), PathRelationship::Ancestor);
    }

    // Relationship types are mutually exclusive
    #[test]
    fn path_is_hierarchical_consistent(path1 in absolute_path_strategy(), path2 in absolute_path_strategy()) {
        let rel = PathRelationship::between(&path1, &path2);
        prop_assert_eq!(rel.is_hierarchical(), rel != PathRelationship::Unrelated);
        prop_assert_eq!(path1.subsumes(&path2).unwrap(), matches!(rel, PathRelationship::Ancestor | PathRelationship::Same));
    }

    // relative() and absolute() are inverses for paths under a common root
    #[test]
    fn relative_then_absolute_round_trips(target in absolute_path_strategy(), base in absolute_path_strategy()) {
        let rel = target.relative(&base).unwrap();
        prop_assert!(rel.is_relative());

        // `..` is lexical, so compare the names that survive once it is applied
        let rejoined = base.child([rel.as_str()]);
        let mut names: Vec<&str> = Vec::new();
        for name in rejoined.names() {
            if name == ".." {
                names.pop();
            } else {
                names.push(name);
            }
        }
        prop_assert_eq!(names, target.names());
    }
}
