// Skip log: insert, find and ceiling lookups.

use skiplog::{Error, Options, SkipLog};
use test_log::test;

fn entry(offset: i64) -> Vec<u8> {
    format!("{offset} - entry").into_bytes()
}

fn log_with(offsets: &[i64]) -> SkipLog {
    let log = SkipLog::with_options(Options::default().seed(0xC0FFEE));
    for &offset in offsets {
        log.insert(offset, entry(offset));
    }
    log
}

// =============================================================================
// Test 1: Out-of-order inserts are all found
// =============================================================================
#[test]
fn insert_out_of_order_find_all() {
    let log = log_with(&[1, 984, 1345, 50, 1540]);

    assert_eq!(log.len(), 5);
    for offset in [984, 1, 1345, 50, 1540] {
        assert_eq!(log.find(offset), Ok(entry(offset)));
    }
}

// =============================================================================
// Test 2: New heads and new tails in alternation
// =============================================================================
// 55, 66 seed the log; 52 and 3 become new heads, 69 and 90 new tails,
// 30 lands in the interior.
#[test]
fn heads_and_tails() {
    let log = log_with(&[55, 66, 52, 69, 3, 30, 90]);

    assert_eq!(log.len(), 7);
    for offset in [55, 69, 3, 66, 30, 90, 52] {
        assert_eq!(log.find(offset), Ok(entry(offset)));
    }
    assert_eq!(log.first_offset(), Some(3));
    assert_eq!(log.last_offset(), Some(90));
}

// =============================================================================
// Test 3: Empty log
// =============================================================================
#[test]
fn empty_log_behavior() {
    let log = SkipLog::new();

    assert_eq!(log.len(), 0);
    assert!(log.is_empty());
    assert_eq!(log.find(222), Err(Error::EmptyLog));
    assert_eq!(log.first_gte(222), Err(Error::EmptyLog));
    assert_eq!(log.remove(222), Err(Error::EmptyLog));
    assert_eq!(log.first_offset(), None);
    assert_eq!(log.last_offset(), None);
}

// =============================================================================
// Test 4: Missing offset carries the queried key
// =============================================================================
#[test]
fn find_missing_offset() {
    let log = log_with(&[10, 20, 30]);

    assert_eq!(log.find(15), Err(Error::OffsetNotFound(15)));
    assert_eq!(log.find(5), Err(Error::OffsetNotFound(5)));
    assert_eq!(log.find(35), Err(Error::OffsetNotFound(35)));
}

// =============================================================================
// Test 5: Ceiling lookup over consecutive timestamps
// =============================================================================
// Offsets are unix seconds with a gap at +5; asking for +5 yields +6.
#[test]
fn first_gte_over_timestamps() {
    let now = 1_700_000_000;
    let log = SkipLog::new();
    for delta in [0, 1, 2, 3, 4, 6] {
        log.insert(now + delta, format!("{} - entry", 1000 + delta));
    }

    assert_eq!(log.len(), 6);
    assert_eq!(log.first_gte(now + 2), Ok((now + 2, b"1002 - entry".to_vec())));
    assert_eq!(log.first_gte(now + 4), Ok((now + 4, b"1004 - entry".to_vec())));
    assert_eq!(log.first_gte(now + 5), Ok((now + 6, b"1006 - entry".to_vec())));
}

// =============================================================================
// Test 6: Ceiling lookup at the edges
// =============================================================================
#[test]
fn first_gte_edges() {
    let log = log_with(&[100, 200, 300]);

    // Below everything: the head.
    assert_eq!(log.first_gte(i64::MIN), Ok((100, entry(100))));
    // Above everything: nothing.
    assert_eq!(log.first_gte(301), Err(Error::OffsetNotFound(301)));
    // Exactly the tail.
    assert_eq!(log.first_gte(300), Ok((300, entry(300))));
}

// =============================================================================
// Test 7: Duplicate offset overwrites in place
// =============================================================================
#[test]
fn duplicate_offset_overwrites() {
    let log = log_with(&[1, 2, 3]);

    assert_eq!(log.insert(2, "replacement"), Some(entry(2)));
    assert_eq!(log.len(), 3);
    assert_eq!(log.find(2), Ok(b"replacement".to_vec()));

    // Head and tail duplicates take the same path.
    assert_eq!(log.insert(1, "new head"), Some(entry(1)));
    assert_eq!(log.insert(3, "new tail"), Some(entry(3)));
    assert_eq!(log.len(), 3);
}

// =============================================================================
// Test 8: Negative and extreme offsets
// =============================================================================
#[test]
fn signed_offsets() {
    let log = log_with(&[0, -1, i64::MAX, i64::MIN, -1_000_000]);

    assert_eq!(log.first_offset(), Some(i64::MIN));
    assert_eq!(log.last_offset(), Some(i64::MAX));
    assert_eq!(log.first_gte(-999_999), Ok((-1, entry(-1))));
    assert_eq!(log.find(i64::MIN), Ok(entry(i64::MIN)));
}

// =============================================================================
// Test 9: Many inserts keep lookups logarithmic in height
// =============================================================================
#[test]
fn ten_thousand_entries() {
    let log = SkipLog::with_options(Options::default().seed(1));
    for i in 0..10_000i64 {
        // Scatter inserts: 7919 is coprime to 10_000.
        let offset = (i * 7919) % 10_000;
        log.insert(offset, offset.to_le_bytes());
    }

    assert_eq!(log.len(), 10_000);
    for offset in (0..10_000i64).step_by(37) {
        assert_eq!(log.find(offset), Ok(offset.to_le_bytes().to_vec()));
    }

    // log2(10_000) ≈ 13; a seeded run stays well under the ceiling.
    let stats = log.stats();
    assert!(stats.height > 1 && stats.height < 25, "height = {}", stats.height);
}

// =============================================================================
// Test 10: Injected bit source drives the height
// =============================================================================
#[test]
fn injected_bit_source() {
    let flat = SkipLog::with_bit_source(Options::default(), || false);
    let tall = SkipLog::with_bit_source(Options::default().max_level(4), || true);

    for offset in 0..16 {
        flat.insert(offset, "");
        tall.insert(offset, "");
    }

    assert_eq!(flat.stats().height, 1);
    assert_eq!(tall.stats().height, 4);
    assert_eq!(tall.find(9), Ok(Vec::new()));
}

// =============================================================================
// Test 11: Floor lookup
// =============================================================================
#[test]
fn last_lte_floor() {
    let log = log_with(&[100, 200, 300]);

    assert_eq!(log.last_lte(200), Ok((200, entry(200))));
    assert_eq!(log.last_lte(250), Ok((200, entry(200))));
    assert_eq!(log.last_lte(i64::MAX), Ok((300, entry(300))));
    assert_eq!(log.last_lte(99), Err(Error::OffsetNotFound(99)));

    // Back-links survive removal of the floor's neighbour.
    log.remove(200).unwrap();
    assert_eq!(log.last_lte(250), Ok((100, entry(100))));

    assert_eq!(SkipLog::new().last_lte(0), Err(Error::EmptyLog));
}
