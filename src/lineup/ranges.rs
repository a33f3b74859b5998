use std::fmt;

use serde::Serialize;

use crate::config::Minute;

/// A closed interval of match minutes, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: Minute,
    pub end: Minute,
}

impl TimeRange {
    pub fn new(start: Minute, end: Minute) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn duration(&self) -> Minute {
        self.end - self.start
    }

    /// Inclusive at both ends.
    pub fn contains(&self, minute: Minute) -> bool {
        self.start <= minute && minute <= self.end
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.end >= other.start && other.end >= self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.start, self.end)
    }
}

/// Sorted, disjoint, non-touching ranges of non-zero length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RangeSet {
    ranges: Vec<TimeRange>,
}

impl RangeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary ranges, sorting and merging as needed.
    pub fn from_ranges(ranges: impl IntoIterator<Item = TimeRange>) -> Self {
        let mut ranges: Vec<TimeRange> = ranges.into_iter().collect();
        ranges.sort_by_key(|range| (range.start, range.end));
        Self {
            ranges: coalesce(ranges),
        }
    }

    /// Pairs sorted boundaries consecutively: `(b0, b1), (b2, b3), ...`.
    /// An odd trailing boundary is closed at `close_at`.
    pub fn from_boundaries(mut boundaries: Vec<Minute>, close_at: Minute) -> Self {
        boundaries.sort_unstable();
        if boundaries.len() % 2 == 1 {
            boundaries.push(close_at.max(boundaries[boundaries.len() - 1]));
        }
        let pairs = boundaries
            .chunks_exact(2)
            .map(|pair| TimeRange::new(pair[0], pair[1]));
        Self::from_ranges(pairs)
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn total_minutes(&self) -> Minute {
        self.ranges.iter().map(TimeRange::duration).sum()
    }

    pub fn contains(&self, minute: Minute) -> bool {
        self.ranges.iter().any(|range| range.contains(minute))
    }

    /// Minutes covered by both sets, via a two-pointer sweep.
    pub fn intersect(&self, other: &RangeSet) -> RangeSet {
        let (a, b) = (&self.ranges, &other.ranges);
        let mut overlaps = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            let (left, right) = (a[i], b[j]);
            if left.overlaps(&right) {
                overlaps.push(TimeRange::new(
                    left.start.max(right.start),
                    left.end.min(right.end),
                ));
            }
            if left.end < right.end {
                i += 1;
            } else {
                j += 1;
            }
        }

        RangeSet {
            ranges: coalesce(overlaps),
        }
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Merges sorted ranges that overlap or touch, and drops empty ones.
fn coalesce(sorted: Vec<TimeRange>) -> Vec<TimeRange> {
    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted.into_iter().filter(|range| range.duration() > 0) {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
