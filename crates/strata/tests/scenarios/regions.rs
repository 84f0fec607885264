use pretty_assertions::assert_eq;
use strata::{PriorRegion, RegionError, SemanticRegions, SemanticRegionsBuilder};

#[test]
fn innermost_region_at_offset() {
    let mut builder = SemanticRegions::builder();
    builder
        .add("A", 0, 10)
        .unwrap()
        .add("B", 0, 5)
        .unwrap()
        .add("C", 5, 10)
        .unwrap();
    let regions = builder.build();

    assert_eq!(regions.at(2).map(|r| *r.key()), Some("B"));
    assert_eq!(regions.at(7).map(|r| *r.key()), Some("C"));
    assert_eq!(
        regions.outermost_elements().map(|r| *r.key()).collect::<Vec<_>>(),
        vec!["A"]
    );
}

#[test]
fn straddle_is_rejected_at_insertion() {
    let mut builder: SemanticRegionsBuilder = SemanticRegionsBuilder::new();
    builder.add_bounds(0, 20).unwrap();
    let err = builder.add_bounds(5, 25).unwrap_err();
    assert!(matches!(
        err,
        RegionError::Straddle {
            start: 5,
            end: 25,
            prior: PriorRegion {
                index: 0,
                start: 0,
                end: 20
            }
        }
    ));
}

#[test]
fn read_queries_are_idempotent() {
    let mut builder = SemanticRegions::builder();
    for (key, start, end) in [(1, 0, 30), (2, 3, 9), (3, 4, 6), (4, 12, 20), (5, 31, 40)] {
        builder.add(key, start, end).unwrap();
    }
    let regions = builder.build();

    let snapshot = |regions: &SemanticRegions<i32>| {
        let at: Vec<Option<i32>> = (0..45).map(|pos| regions.key_at(pos).copied()).collect();
        let all: Vec<(i32, u32, u32)> = (0..regions.len())
            .map(|i| regions.for_index(i).unwrap())
            .map(|r| (*r.key(), r.start(), r.end()))
            .collect();
        let outermost: Vec<i32> = regions.outermost_keys().copied().collect();
        (at, all, outermost)
    };
    let first = snapshot(&regions);
    assert_eq!(snapshot(&regions), first);
    assert_eq!(first.2, vec![1, 5]);
}
