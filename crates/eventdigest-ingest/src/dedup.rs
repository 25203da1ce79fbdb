//! Duplicate occurrence removal.

use std::collections::HashSet;

use eventdigest_core::Event;

/// Iterator adaptor yielding the first event of every identity key.
///
/// See [`Event::identity_key`]. Order is preserved; later duplicates are
/// dropped silently and counted.
#[derive(Debug)]
pub struct Deduplicate<I> {
    inner: I,
    seen: HashSet<String>,
    dropped: usize,
}

impl<I> Deduplicate<I> {
    /// Number of duplicates dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<I: Iterator<Item = Event>> Iterator for Deduplicate<I> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        for event in self.inner.by_ref() {
            if self.seen.insert(event.identity_key()) {
                return Some(event);
            }
            tracing::trace!(key = %event.identity_key(), "dropping duplicate event");
            self.dropped += 1;
        }
        None
    }
}

/// Wraps `events` so that only the first event per identity key comes out.
pub fn dedup_events<I>(events: I) -> Deduplicate<I::IntoIter>
where
    I: IntoIterator<Item = Event>,
{
    Deduplicate {
        inner: events.into_iter(),
        seen: HashSet::new(),
        dropped: 0,
    }
}
