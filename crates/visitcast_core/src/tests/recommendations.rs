use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::advice::{Category, Priority, advise};
use crate::model::LibraryParameters;

#[test]
fn test_order_is_always_staff_hours_collection() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..500 {
        let params = LibraryParameters {
            total_staff: rng.random_range(1.0..50.0),
            hours_open: rng.random_range(20.0..80.0),
            total_collection: rng.random_range(10_000.0..200_000.0),
            population: rng.random_range(5_000.0..100_000.0),
            ..Default::default()
        };
        let recs = advise(&params).unwrap();

        let rank = |c: Category| match c {
            Category::Staff => 0,
            Category::Hours => 1,
            Category::Collection => 2,
        };
        assert!(recs.windows(2).all(|w| rank(w[0].category) < rank(w[1].category)));
        assert!(recs.iter().all(|r| r.priority == r.impact));
        assert!(
            recs.iter()
                .all(|r| (r.category == Category::Staff) == (r.priority == Priority::High))
        );
    }
}

#[test]
fn test_rules_fire_independently() {
    let hours_only = LibraryParameters {
        total_staff: 30.0,
        hours_open: 30.0,
        ..Default::default()
    };
    let collection_only = LibraryParameters {
        total_staff: 30.0,
        total_collection: 25_000.0,
        ..Default::default()
    };

    let recs = advise(&hours_only).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, Category::Hours);

    let recs = advise(&collection_only).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, Category::Collection);
    assert!(recs[0].message.contains("1.0 items per resident"));
}
