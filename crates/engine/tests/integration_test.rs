//! Integration tests for the result-set engine.
//!
//! These exercise the whole pipeline — predicate, ordering, diffing — over a
//! realistic catalogue in the way an interactive caller would: one new query
//! per keystroke, tag toggle, or position update.

use catalogue::{Coordinates, Place};
use engine::{DiffOp, OrderingStrategy, Query, SortedResultSet, Tag, TagState};

fn place(id: &str, title: &str, category: &str, distance_m: f64) -> Place {
    let mut p = Place::new(id, title, category, Coordinates::new(0.0, 0.0)).unwrap();
    p.distance_m = distance_m;
    p
}

fn create_test_catalogue() -> Vec<Place> {
    let mut castle = place("castle", "Harewood Castle", "Castle", 800.0);
    castle.wheelchair_accessible = true;
    castle.child_friendly = true;

    let mut abbey = place("abbey", "Kirkstall Abbey", "Abbey", 4_400.0);
    abbey.free_entry = true;
    abbey.child_friendly = true;

    let mut museum = place("museum", "Abbey House Museum", "Museum", 4_500.0);
    museum.wheelchair_accessible = true;
    museum.cheap_entry = true;

    let mut gallery = place("gallery", "City Art Gallery", "Gallery", 300.0);
    gallery.free_entry = true;
    gallery.child_friendly = true;

    let bridge = place("bridge", "Leeds Bridge", "Bridge", 650.0);

    vec![castle, abbey, museum, gallery, bridge]
}

fn ids(places: &[Place]) -> Vec<&str> {
    places.iter().map(|p| p.id()).collect()
}

#[test]
fn test_empty_query_returns_whole_catalogue_ordered() {
    let catalogue = create_test_catalogue();
    let mut results = SortedResultSet::new();

    results.apply(&catalogue, &Query::new(OrderingStrategy::Alphabetic));

    assert_eq!(results.size(), catalogue.len());
    assert_eq!(
        ids(results.entries()),
        vec!["museum", "gallery", "castle", "abbey", "bridge"]
    );
}

#[test]
fn test_order_invariant_holds_for_adjacent_pairs() {
    let catalogue = create_test_catalogue();

    for ordering in [OrderingStrategy::Alphabetic, OrderingStrategy::ShortestDistance] {
        let mut results = SortedResultSet::new();
        results.apply(&catalogue, &Query::new(ordering));

        for pair in results.entries().windows(2) {
            assert_eq!(
                ordering.compare(&pair[0], &pair[1]),
                std::cmp::Ordering::Less,
                "view out of order under {ordering:?}"
            );
        }
    }
}

#[test]
fn test_predicate_soundness() {
    let catalogue = create_test_catalogue();
    let query = Query::new(OrderingStrategy::ShortestDistance)
        .with_text("a")
        .with_max_distance(5_000.0)
        .with_tags(TagState::new().with_tag(Tag::ChildFriendly, true));

    let mut results = SortedResultSet::new();
    results.apply(&catalogue, &query);

    // Everything in the view matches the query.
    for entry in results.entries() {
        assert!(engine::predicate::matches(entry, &query));
    }
    // Everything matching appears in the view.
    for candidate in &catalogue {
        if engine::predicate::matches(candidate, &query) {
            assert!(results.position_of(candidate.id()).is_some());
        }
    }
}

#[test]
fn test_text_search_narrows_as_typed() {
    let catalogue = create_test_catalogue();
    let mut results = SortedResultSet::new();

    // Each keystroke is a fresh query against the same snapshot.
    for (text, expected) in [
        ("", 5),
        ("a", 4),        // every title but "Leeds Bridge" contains an 'a'
        ("ab", 2),       // Kirkstall Abbey, Abbey House Museum
        ("abbey h", 1),  // Abbey House Museum
        ("abbey hq", 0),
    ] {
        let query = Query::new(OrderingStrategy::Alphabetic).with_text(text);
        results.apply(&catalogue, &query);
        assert_eq!(results.size(), expected, "text {text:?}");
    }
}

#[test]
fn test_tag_and_semantics() {
    let catalogue = create_test_catalogue();
    let mut results = SortedResultSet::new();

    // 2 pass wheelchair, 3 pass child-friendly, exactly 1 passes both.
    let wheelchair = TagState::new().with_tag(Tag::WheelchairAccessible, true);
    results.apply(
        &catalogue,
        &Query::new(OrderingStrategy::Alphabetic).with_tags(wheelchair.clone()),
    );
    assert_eq!(results.size(), 2);

    let child = TagState::new().with_tag(Tag::ChildFriendly, true);
    results.apply(
        &catalogue,
        &Query::new(OrderingStrategy::Alphabetic).with_tags(child),
    );
    assert_eq!(results.size(), 3);

    let both = wheelchair.with_tag(Tag::ChildFriendly, true);
    results.apply(
        &catalogue,
        &Query::new(OrderingStrategy::Alphabetic).with_tags(both),
    );
    assert_eq!(ids(results.entries()), vec!["castle"]);
}

#[test]
fn test_distance_boundary_is_inclusive() {
    let catalogue = create_test_catalogue();
    let mut results = SortedResultSet::new();

    // The castle sits at exactly 800 m.
    let at_boundary = Query::new(OrderingStrategy::ShortestDistance).with_max_distance(800.0);
    results.apply(&catalogue, &at_boundary);
    assert!(results.position_of("castle").is_some());

    let one_unit_short = Query::new(OrderingStrategy::ShortestDistance).with_max_distance(799.0);
    results.apply(&catalogue, &one_unit_short);
    assert!(results.position_of("castle").is_none());
}

#[test]
fn test_text_and_distance_scenario() {
    // Two places; "ca" within 10 m matches only the first.
    let candidates = vec![
        place("a", "Castle", "Castle", 5.0),
        place("b", "Cave", "Cave", 15.0),
    ];

    let mut results = SortedResultSet::new();
    let query = Query::new(OrderingStrategy::Alphabetic)
        .with_text("ca")
        .with_max_distance(10.0);
    let batch = results.apply(&candidates, &query);

    assert_eq!(ids(results.entries()), vec!["a"]);
    assert_eq!(
        batch.ops(),
        &[DiffOp::Insert {
            id: "a".into(),
            position: 0
        }]
    );
}

#[test]
fn test_apply_is_idempotent() {
    let catalogue = create_test_catalogue();
    let query = Query::new(OrderingStrategy::ShortestDistance)
        .with_text("a")
        .with_max_distance(5_000.0);

    let mut results = SortedResultSet::new();
    results.apply(&catalogue, &query);
    let view_after_first: Vec<Place> = results.entries().to_vec();

    let second = results.apply(&catalogue, &query);
    assert!(second.is_empty());
    assert_eq!(results.entries(), view_after_first.as_slice());
}

#[test]
fn test_tag_toggle_off_restores_previous_view() {
    let catalogue = create_test_catalogue();
    let mut results = SortedResultSet::new();

    let base = Query::new(OrderingStrategy::Alphabetic).with_text("a");
    results.apply(&catalogue, &base);
    let before_toggle: Vec<Place> = results.entries().to_vec();

    // Toggle a tag on, then off again, with candidates unchanged.
    let tagged = base
        .clone()
        .with_tags(TagState::new().with_tag(Tag::FreeEntry, true));
    results.apply(&catalogue, &tagged);
    assert_ne!(results.entries(), before_toggle.as_slice());

    results.apply(&catalogue, &base);
    assert_eq!(results.entries(), before_toggle.as_slice());
}

#[test]
fn test_position_update_reorders_with_replayable_diff() {
    let mut catalogue = create_test_catalogue();
    let query = Query::new(OrderingStrategy::ShortestDistance);

    let mut results = SortedResultSet::new();
    results.apply(&catalogue, &query);
    let prev: Vec<Place> = results.entries().to_vec();

    // The user walks across town: distances shift, order inverts in places.
    for p in catalogue.iter_mut() {
        p.distance_m = 10_000.0 - p.distance_m;
    }
    let batch = results.apply(&catalogue, &query);

    let replayed = batch.replay(&prev, results.entries());
    assert_eq!(ids(&replayed), ids(results.entries()));

    // Only moves: nothing entered, left, or changed content.
    for op in &batch {
        assert!(matches!(op, DiffOp::Move { .. }), "unexpected op {op:?}");
    }
}

#[test]
fn test_catalogue_refresh_with_content_change() {
    let catalogue = create_test_catalogue();
    let query = Query::new(OrderingStrategy::Alphabetic);

    let mut results = SortedResultSet::new();
    results.apply(&catalogue, &query);
    let prev: Vec<Place> = results.entries().to_vec();

    // Refresh: the bridge is gone, a new market appears, the gallery is
    // renamed in place.
    let mut refreshed: Vec<Place> = catalogue
        .iter()
        .filter(|p| p.id() != "bridge")
        .cloned()
        .collect();
    refreshed.push(place("market", "Kirkgate Market", "Market", 500.0));
    for p in refreshed.iter_mut() {
        if p.id() == "gallery" {
            p.title = "City Art Gallery & Library".to_string();
        }
    }

    let batch = results.apply(&refreshed, &query);

    assert!(results.position_of("bridge").is_none());
    assert!(results.position_of("market").is_some());
    assert!(
        batch
            .ops()
            .contains(&DiffOp::Changed { id: "gallery".into() })
    );

    let replayed = batch.replay(&prev, results.entries());
    assert_eq!(ids(&replayed), ids(results.entries()));
    for (got, want) in replayed.iter().zip(results.entries()) {
        assert!(got.same_content(want));
    }
}
