// ABOUTME: Integration tests for phantom-typed resource names.
// ABOUTME: Tests ordering, display, and serde transparency.

use ai_shell::types::*;
use std::collections::BTreeSet;

#[test]
fn names_display_their_value() {
    let name = ContainerName::new("ai-agent-shell-a1b2c3d4e5");
    assert_eq!(name.to_string(), "ai-agent-shell-a1b2c3d4e5");
    assert_eq!(name.as_str(), "ai-agent-shell-a1b2c3d4e5");
    assert!(!name.is_empty());
    assert!(VolumeName::new("").is_empty());
}

#[test]
fn names_sort_by_value() {
    let set: BTreeSet<VolumeName> = ["b", "a", "c", "a"].into_iter().map(VolumeName::new).collect();
    let sorted: Vec<&str> = set.iter().map(|v| v.as_str()).collect();
    assert_eq!(sorted, vec!["a", "b", "c"]);
}

#[test]
fn names_serialize_as_plain_strings() {
    let image = ImageName::new("ai-agent-shell:latest");

    let json = serde_json::to_string(&image).unwrap();
    assert_eq!(json, "\"ai-agent-shell:latest\"");

    let back: ImageName = serde_json::from_str(&json).unwrap();
    assert_eq!(back, image);
}
