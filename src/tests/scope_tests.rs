use crate::scope::{Namespace, Region};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn tokens_with_equal_labels_are_distinct() {
    let first = Namespace::new("orders");
    let second = Namespace::new("orders");
    assert_ne!(first, second);
    assert_eq!(first.label(), second.label());
}

#[test]
fn global_tokens_are_stable() {
    assert_eq!(Namespace::global(), Namespace::global());
    assert_eq!(Region::global(), Region::global());
    assert!(Namespace::global().is_global());
    assert!(Region::global().is_global());
    assert_eq!(Namespace::global().label(), "global");
    assert_eq!(Region::global().label(), "global");
}

#[test]
fn global_differs_from_fresh_token_with_global_label() {
    assert_ne!(Region::global(), Region::new("global"));
    assert_ne!(Namespace::global(), Namespace::new("global"));
}

#[test]
fn display_renders_the_label() {
    assert_eq!(Region::new("http").to_string(), "http");
    assert_eq!(Namespace::new("api").to_string(), "api");
}

proptest! {
    /// Freshly constructed tokens never collide.
    #[test]
    fn prop_fresh_regions_are_unique(count in 2usize..64) {
        let regions: Vec<Region> = (0..count).map(|_| Region::new("r")).collect();
        let unique: HashSet<Region> = regions.iter().cloned().collect();
        prop_assert_eq!(unique.len(), regions.len());
    }
}
