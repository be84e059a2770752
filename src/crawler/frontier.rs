/// The crawl frontier: a FIFO queue of pending [`FrontierEntry`] items, a
/// visited set guarding against re-enqueuing the same URL, and a count of
/// workers currently holding a popped task. Workers wait on the condition
/// variable when the queue is empty; the terminal condition a waiting
/// worker checks for is "queue empty AND active == 0" — not a fixed poll
/// interval, which is what let a worker race a slow-to-arrive link
/// discovery and quit too early in the original design.
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::core::FrontierEntry;

/// How often a blocked worker rechecks the shared `running` flag while
/// waiting for new work.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(200);

struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    active: usize,
}

pub struct Frontier {
    state: Mutex<FrontierState>,
    cv: Condvar,
}

/// What a worker should do next: take a task, or stop because the frontier
/// is both empty and quiescent.
pub enum Next {
    Task(FrontierEntry),
    Done,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: VecDeque::new(),
                visited: HashSet::new(),
                active: 0,
            }),
            cv: Condvar::new(),
        }
    }

    /// Seeds the frontier with the starting URL at depth 1.
    pub fn seed(&self, start_url: &str) {
        let mut state = self.state.lock().expect("frontier mutex poisoned");
        state.visited.insert(start_url.to_string());
        state.queue.push_back(FrontierEntry::new(start_url, 1));
        self.cv.notify_all();
    }

    /// Enqueues `url` at `depth` if it hasn't been visited yet. Returns
    /// `true` if it was newly enqueued.
    pub fn enqueue(&self, url: &str, depth: u32) -> bool {
        let mut state = self.state.lock().expect("frontier mutex poisoned");
        if state.visited.contains(url) {
            return false;
        }
        state.visited.insert(url.to_string());
        state.queue.push_back(FrontierEntry::new(url, depth));
        self.cv.notify_all();
        true
    }

    /// Blocks until a task is available, the frontier is quiescent (empty
    /// queue, no active workers), or `running` is cleared by an external
    /// shutdown signal. Marks the returned task's worker as active; callers
    /// must call [`Frontier::finish`] when done with it.
    pub fn next(&self, running: &AtomicBool) -> Next {
        let mut state = self.state.lock().expect("frontier mutex poisoned");
        loop {
            if let Some(entry) = state.queue.pop_front() {
                state.active += 1;
                return Next::Task(entry);
            }
            if state.active == 0 || !running.load(Ordering::Relaxed) {
                self.cv.notify_all();
                return Next::Done;
            }
            let (guard, _timeout) = self
                .cv
                .wait_timeout(state, CANCEL_POLL_INTERVAL)
                .expect("frontier mutex poisoned");
            state = guard;
        }
    }

    /// Marks one active worker as finished with its current task. Must be
    /// called exactly once per [`Next::Task`] returned by [`Frontier::next`],
    /// after any links it discovered have been enqueued.
    pub fn finish(&self) {
        let mut state = self.state.lock().expect("frontier mutex poisoned");
        state.active -= 1;
        if state.active == 0 && state.queue.is_empty() {
            self.cv.notify_all();
        }
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
