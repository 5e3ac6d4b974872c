// WHY: shared interval model consumed by both the layer and the segment renderers

use serde::Serialize;

/// A feature-tagged half-open code-point interval `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureRange<F> {
    pub start: usize,
    pub end: usize,
    pub feature: F,
}

impl<F> FeatureRange<F> {
    pub fn new(start: usize, end: usize, feature: F) -> Self {
        Self { start, end, feature }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Inclusive overlap test: ranges that merely touch also count
    pub fn overlaps<G>(&self, other: &FeatureRange<G>) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// Merge raw ranges into the minimal set per feature.
///
/// Ranges are sorted by `(start asc, end desc)`. A range folds into the last
/// accepted range of the same feature when they overlap, touch, or leave a
/// gap of at most one code point. Ranges of different features never merge.
/// Zero-length ranges and ranges reaching past `text_len` are dropped first.
pub fn merge_ranges<F>(mut ranges: Vec<FeatureRange<F>>, text_len: usize) -> Vec<FeatureRange<F>>
where
    F: PartialEq,
{
    ranges.retain(|r| !r.is_empty() && r.end <= text_len);
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    let mut merged: Vec<FeatureRange<F>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        // last accepted range of this feature, searching from the back
        let last = merged.iter_mut().rev().find(|m| m.feature == range.feature);
        match last {
            Some(last) if last.end + 1 >= range.start => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// The ranges belonging to one feature, in start order
pub fn ranges_for<'r, F>(ranges: &'r [FeatureRange<F>], feature: &'r F) -> impl Iterator<Item = &'r FeatureRange<F>>
where
    F: PartialEq,
{
    ranges.iter().filter(move |r| &r.feature == feature)
}
