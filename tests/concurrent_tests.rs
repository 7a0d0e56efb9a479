// Thread-safe access to a shared skip log.

use std::sync::Arc;
use std::thread;

use skiplog::{LogIterator, SkipLog};
use test_log::test;

// =============================================================================
// Test 1: Concurrent readers don't block each other
// =============================================================================
#[test]
fn concurrent_readers() {
    let log = Arc::new(SkipLog::new());
    for offset in 0..100 {
        log.insert(offset, offset.to_string());
    }

    let mut handles = vec![];
    for _ in 0..8 {
        let log = Arc::clone(&log);
        handles.push(thread::spawn(move || {
            for offset in 0..100 {
                assert_eq!(log.find(offset), Ok(offset.to_string().into_bytes()));
                assert_eq!(log.first_gte(offset).map(|(o, _)| o), Ok(offset));
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
}

// =============================================================================
// Test 2: Writers on disjoint offsets
// =============================================================================
#[test]
fn concurrent_writers() {
    let log = SkipLog::new();

    thread::scope(|s| {
        for t in 0..4i64 {
            let log = &log;
            s.spawn(move || {
                for i in 0..250 {
                    log.insert(i * 4 + t, "");
                }
            });
        }
    });

    assert_eq!(log.len(), 1000);
    let offsets: Vec<i64> = log.iter().entries().map(|(o, _)| o).collect();
    assert_eq!(offsets, (0..1000).collect::<Vec<_>>());
}

// =============================================================================
// Test 3: Writers and removers interleaved
// =============================================================================
#[test]
fn inserts_and_removes_interleaved() {
    let log = SkipLog::new();
    for offset in 0..500 {
        log.insert(offset * 2, "");
    }

    thread::scope(|s| {
        // Odd offsets go in...
        s.spawn(|| {
            for offset in 0..500 {
                log.insert(offset * 2 + 1, "");
            }
        });
        // ...while even ones come out.
        s.spawn(|| {
            for offset in 0..500 {
                log.remove(offset * 2).unwrap();
            }
        });
    });

    assert_eq!(log.len(), 500);
    assert!(log.iter().entries().all(|(o, _)| o % 2 == 1));
}

// =============================================================================
// Test 4: Scanning while writing
// =============================================================================
// A scan never holds the lock between steps, so it always finishes and
// always sees ascending offsets, whatever the writer does.
#[test]
fn scan_while_writing() {
    let log = SkipLog::new();
    for offset in 0..1000 {
        log.insert(offset, "");
    }

    thread::scope(|s| {
        s.spawn(|| {
            for offset in (0..1000).step_by(3) {
                log.remove(offset).unwrap();
            }
            for offset in 1000..1500 {
                log.insert(offset, "");
            }
        });

        for _ in 0..4 {
            s.spawn(|| {
                let mut iter = log.range(0, 2000).unwrap();
                let mut last = None;
                while iter.next() {
                    let offset = iter.offset();
                    assert!(offset > last, "{offset:?} after {last:?}");
                    last = offset;
                }
            });
        }
    });

    assert_eq!(log.len(), 1000 - 334 + 500);
}
