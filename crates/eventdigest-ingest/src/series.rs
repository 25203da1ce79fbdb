//! Grouping of events into series.

use std::collections::HashMap;

use eventdigest_core::{Event, Series};

/// Folds events into series, keyed by [`Event::series_key`].
///
/// A series is opened the first time its key is seen and takes its
/// representative text from that event. Series come out in first-seen
/// order, and each series lists its starts in the order events were given,
/// so callers wanting chronological `starts` must pass sorted events.
///
/// Events with neither a recurring id nor an id are keyed by summary, so two
/// unrelated one-off events with the same title end up in one series.
pub fn aggregate_series(events: &[Event]) -> Vec<Series> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<Series> = Vec::new();

    for event in events {
        let slot = *index.entry(event.series_key()).or_insert_with(|| {
            series.push(Series::open(event));
            series.len() - 1
        });
        series[slot].record(event);
    }

    series
}
