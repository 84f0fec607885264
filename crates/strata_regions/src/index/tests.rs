#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use crate::SemanticRegions;

fn rules() -> SemanticRegions<&'static str> {
    let mut builder = SemanticRegions::builder();
    builder
        .add("stmt", 0, 10)
        .unwrap()
        .add("expr", 12, 20)
        .unwrap()
        .add("term", 14, 18)
        .unwrap()
        .add("expr", 22, 30)
        .unwrap();
    builder.build()
}

#[test]
fn index_finds_regions_by_key() {
    let regions = rules();
    let index = regions.index();
    assert_eq!(index.len(), 3);
    assert_eq!(index.get(&"term").map(|r| r.bounds()), Some(14..18));
    assert!(index.get(&"ident").is_none());
    assert!(index.contains_key(&"stmt"));
}

#[test]
fn duplicate_keys_keep_the_first_region() {
    let regions = rules();
    let index = regions.index();
    assert_eq!(index.get(&"expr").map(|r| r.index()), Some(1));
}

#[test]
fn index_iterates_in_key_order() {
    let regions = rules();
    let index = regions.index();
    let keys: Vec<&str> = index.iter().map(|(key, _)| **key).collect();
    assert_eq!(keys, vec!["expr", "stmt", "term"]);
}

#[test]
fn index_by_key_skips_missing_keys() {
    let mut builder = SemanticRegions::builder();
    builder
        .add(Some("alpha".to_owned()), 0, 5)
        .unwrap()
        .add(None, 6, 8)
        .unwrap()
        .add(Some("beta".to_owned()), 9, 12)
        .unwrap();
    let regions = builder.build();

    let index = regions.index_by_key(|key| key.as_deref());
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("beta").map(|r| r.index()), Some(2));
    assert!(index.get("gamma").is_none());
}

#[test]
fn index_by_derived_key() {
    let regions = rules();
    let by_length = regions.index_by_key(|key| Some(key.len()));
    // "stmt", "expr" and "term" all have length 4; first wins
    assert_eq!(by_length.len(), 1);
    assert_eq!(by_length.get(&4).map(|r| *r.key()), Some("stmt"));
}
