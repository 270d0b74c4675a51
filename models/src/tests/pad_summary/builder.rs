use crate::{ModelError, PadSummaryBuilder};

/// **VALUE**: Verifies that a summary cannot be built for a single-author pad.
///
/// **WHY THIS MATTERS**: Multi-author listings exist to find collaborative pads.
/// A single-author summary slipping through would pollute every report built on them.
///
/// **BUG THIS CATCHES**: Would catch if the author-count check is removed or off by one.
#[test]
fn given_single_author_when_building_pad_summary_then_returns_validation_error() {
    // GIVEN: Builder with one author
    let builder = PadSummaryBuilder::default()
        .with_pad_id("g.abcdefghijk")
        .with_last_edited(1_553_600_000_000)
        .with_author("a.one", "Alice");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error naming the count
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("1 author(s)"), "unexpected message: {message}");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies that duplicate author ids collapse instead of inflating the count.
///
/// **BUG THIS CATCHES**: Would catch a Vec-backed author list counting the same
/// author twice and letting a one-author pad pass the two-author threshold.
#[test]
fn given_same_author_twice_when_building_then_counts_once() {
    // GIVEN: The same author added twice
    let builder = PadSummaryBuilder::default()
        .with_pad_id("g.abcdefghijk")
        .with_last_edited(1)
        .with_author("a.one", "Alice")
        .with_author("a.one", "Alice B.");

    // WHEN: Building
    let result = builder.build();

    // THEN: Still rejected
    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

#[test]
fn given_missing_pad_id_when_building_then_returns_validation_error() {
    let result = PadSummaryBuilder::default()
        .with_last_edited(1)
        .with_author("a.one", "Alice")
        .with_author("a.two", "Bob")
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "Pad ID is required"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_missing_timestamp_when_building_then_returns_validation_error() {
    let result = PadSummaryBuilder::default()
        .with_pad_id("g.abcdefghijk")
        .with_author("a.one", "Alice")
        .with_author("a.two", "Bob")
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Last edited timestamp is required")
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn given_complete_builder_when_building_then_keeps_all_fields() {
    // GIVEN: All fields set, one author without a display name
    let summary = PadSummaryBuilder::default()
        .with_pad_id("g.abcdefghijk")
        .with_last_edited(42)
        .with_author("a.one", "Alice")
        .with_author("a.two", "")
        .build()
        .unwrap();

    // THEN: Everything carried through
    assert_eq!(summary.pad_id, "g.abcdefghijk");
    assert_eq!(summary.last_edited, 42);
    assert_eq!(summary.authors.len(), 2);
    assert_eq!(summary.authors["a.one"], "Alice");
    assert_eq!(summary.authors["a.two"], "");
}
