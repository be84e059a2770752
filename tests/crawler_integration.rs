use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use search_engine::crawler::Frontier;

/// A multi-threaded quiescence check: several workers race to drain a
/// frontier that keeps growing for a few generations before running dry.
/// Every worker must observe `Next::Done` eventually, and none should exit
/// while siblings are still discovering new links.
#[test]
fn frontier_reaches_quiescence_with_concurrent_workers() {
    let frontier = Arc::new(Frontier::new());
    frontier.seed("seed");
    let running = Arc::new(AtomicBool::new(true));
    let processed = Arc::new(AtomicUsize::new(0));

    const MAX_DEPTH: u32 = 3;
    const FANOUT: u32 = 2;

    let handles: Vec<_> = (0..4)
        .map(|worker_id| {
            let frontier = Arc::clone(&frontier);
            let running = Arc::clone(&running);
            let processed = Arc::clone(&processed);
            thread::spawn(move || {
                loop {
                    let entry = match frontier.next(&running) {
                        search_engine::crawler::frontier::Next::Task(entry) => entry,
                        search_engine::crawler::frontier::Next::Done => break,
                    };
                    processed.fetch_add(1, Ordering::SeqCst);
                    if entry.depth < MAX_DEPTH {
                        for child in 0..FANOUT {
                            let url = format!("{}-{}-{}-{}", entry.url, worker_id, entry.depth, child);
                            frontier.enqueue(&url, entry.depth + 1);
                        }
                    }
                    frontier.finish();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // depth 1: 1 node, depth 2: 2 nodes, depth 3: 4 nodes (depth 3 is the
    // last depth still < MAX_DEPTH, so it fans out once more before the
    // resulting depth-4 nodes would be rejected by a depth filter upstream
    // of the frontier — here every enqueued node is still processed).
    assert_eq!(processed.load(Ordering::SeqCst), 1 + 2 + 4);
}

#[test]
fn frontier_stops_promptly_when_running_is_cleared() {
    let frontier = Frontier::new();
    let running = AtomicBool::new(false);
    assert!(matches!(
        frontier.next(&running),
        search_engine::crawler::frontier::Next::Done
    ));
}
