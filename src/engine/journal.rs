//! engine::journal
//!
//! In-memory record of everything the navigation engine did in a session.
//!
//! # Architecture
//!
//! The watch channel behind [`StateReader`](super::state::StateReader)
//! coalesces updates, so a slow reader can miss short phases. The journal
//! is append-only, stamped with the time elapsed since the engine was
//! created (on the tokio clock, so paused-time tests see exact delays).
//!
//! It is a ring buffer: once `capacity` entries are held, each new entry
//! evicts the oldest one. Sequence numbers keep counting across evictions.
//!
//! The journal is evidence, not authority: navigation state lives in the
//! engine, the journal only records what happened to it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use super::machine::IgnoreReason;
use super::phase::NavPhase;
use crate::core::types::{Direction, RoutePath};

/// An event in the journal.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalEvent {
    /// `navigate_to` passed the guard and took the lock.
    Accepted {
        from: RoutePath,
        to: RoutePath,
        direction: Direction,
    },

    /// `navigate_to` was dropped by the guard.
    Ignored { to: RoutePath, reason: IgnoreReason },

    /// The engine entered a phase.
    PhaseEntered { phase: NavPhase },

    /// A smooth scroll-to-top was requested.
    ScrollRequested { offset: f64, wait_ms: u64 },

    /// The router committed the route.
    Committed { path: RoutePath },

    /// The router failed to commit the route.
    CommitFailed { path: RoutePath, error: String },

    /// A route change arrived from outside `navigate_to`.
    RouteNotified { path: RoutePath, direction: Direction },
}

/// A journal entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JournalEntry {
    /// Position in the session, starting at 0. Not reset by eviction.
    pub seq: u64,
    /// Time since the engine was created.
    #[serde(rename = "at_ms", serialize_with = "as_millis")]
    pub at: Duration,
    #[serde(flatten)]
    pub event: JournalEvent,
}

fn as_millis<S: serde::Serializer>(at: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(at.as_millis() as u64)
}

/// Bounded session journal, shared across clones.
#[derive(Debug, Clone)]
pub struct Journal {
    started: Instant,
    ring: Arc<Mutex<Ring>>,
}

#[derive(Debug)]
struct Ring {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
    next_seq: u64,
}

impl Journal {
    /// Entries kept by [`Journal::new`].
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create an empty journal starting now.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty journal that keeps at most `capacity` entries.
    ///
    /// A capacity of 0 keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            started: Instant::now(),
            ring: Arc::new(Mutex::new(Ring {
                entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
                capacity,
                next_seq: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event, evicting the oldest entry when full.
    pub fn record(&self, event: JournalEvent) {
        let at = self.started.elapsed();
        let mut ring = self.lock();
        let seq = ring.next_seq;
        ring.next_seq += 1;
        if ring.capacity == 0 {
            return;
        }
        if ring.entries.len() == ring.capacity {
            ring.entries.pop_front();
        }
        ring.entries.push_back(JournalEntry { seq, at, event });
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Number of entries evicted so far.
    pub fn evicted(&self) -> u64 {
        let ring = self.lock();
        ring.next_seq - ring.entries.len() as u64
    }

    /// A copy of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Retained phase entries, in order.
    pub fn phases(&self) -> Vec<NavPhase> {
        self.lock()
            .entries
            .iter()
            .filter_map(|e| match e.event {
                JournalEvent::PhaseEntered { phase } => Some(phase),
                _ => None,
            })
            .collect()
    }

    /// Time at which `phase` was entered for the `nth` time (0-based),
    /// counting retained entries only.
    pub fn phase_entered_at(&self, phase: NavPhase, nth: usize) -> Option<Duration> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.event == JournalEvent::PhaseEntered { phase })
            .nth(nth)
            .map(|e| e.at)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_are_sequenced_and_timed() {
        let journal = Journal::new();
        journal.record(JournalEvent::PhaseEntered {
            phase: NavPhase::ScrollSettling,
        });
        tokio::time::sleep(Duration::from_millis(250)).await;
        journal.record(JournalEvent::PhaseEntered {
            phase: NavPhase::Navigating,
        });

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].seq, 0);
        assert_eq!(entries[1].seq, 1);
        assert_eq!(entries[1].at - entries[0].at, Duration::from_millis(250));
        assert_eq!(
            journal.phase_entered_at(NavPhase::Navigating, 0),
            Some(entries[1].at)
        );
        assert_eq!(journal.phase_entered_at(NavPhase::Navigating, 1), None);
    }

    #[test]
    fn serializes_flat_with_millis() {
        let entry = JournalEntry {
            seq: 3,
            at: Duration::from_millis(410),
            event: JournalEvent::Committed {
                path: RoutePath::new("/about").unwrap(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "committed");
        assert_eq!(json["at_ms"], 410);
        assert_eq!(json["path"], "/about");
    }

    #[test]
    fn oldest_entries_are_evicted_at_capacity() {
        let journal = Journal::with_capacity(3);
        for _ in 0..5 {
            journal.record(JournalEvent::Ignored {
                to: RoutePath::new("/about").unwrap(),
                reason: IgnoreReason::AlreadyNavigating,
            });
        }

        let seqs: Vec<u64> = journal.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![2, 3, 4]);
        assert_eq!(journal.len(), 3);
        assert_eq!(journal.evicted(), 2);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let journal = Journal::with_capacity(0);
        journal.record(JournalEvent::PhaseEntered {
            phase: NavPhase::Idle,
        });
        assert!(journal.is_empty());
        assert_eq!(journal.evicted(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let journal = Journal::new();
        let other = journal.clone();
        other.record(JournalEvent::PhaseEntered {
            phase: NavPhase::Idle,
        });
        assert_eq!(journal.phases(), vec![NavPhase::Idle]);
    }
}
