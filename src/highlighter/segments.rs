// WHY: token rendering needs one flat, non-overlapping sequence instead of stacked layers

use serde::Serialize;
use tracing::debug;

use super::ordering::FeatureOrder;
use super::ranges::FeatureRange;
use super::source_text::{CharPos, SourceText};

/// Maximal run of text sharing one exact set of active features
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<F> {
    pub text: String,
    /// Active features, in paint order
    pub features: Vec<F>,
    /// Code-point offset of the first character
    pub start: usize,
    /// Exclusive code-point end offset
    pub end: usize,
}

impl<F> Segment<F> {
    pub fn is_plain(&self) -> bool {
        self.features.is_empty()
    }
}

/// Partitions text by active-feature set
pub struct SegmentBuilder<'o, F> {
    order: &'o FeatureOrder<F>,
}

impl<'o, F> SegmentBuilder<'o, F>
where
    F: Clone + PartialEq + std::fmt::Debug,
{
    pub fn new(order: &'o FeatureOrder<F>) -> Self {
        Self { order }
    }

    /// Total partition of the text, whitespace runs included
    ///
    /// Adjacent segments always carry different feature sets and their
    /// concatenation is exactly the source text.
    pub fn partition(&self, source: &SourceText<'_>, ranges: &[FeatureRange<F>]) -> Vec<Segment<F>> {
        let len = source.char_len();
        if len == 0 {
            return Vec::new();
        }

        // per-code-point set of active paint ranks, kept sorted for set equality
        let mut active: Vec<Vec<usize>> = vec![Vec::new(); len];
        for range in ranges {
            let Some(rank) = self.order.rank(&range.feature) else {
                continue;
            };
            let end = range.end.min(len);
            let start = range.start.min(end);
            for slot in &mut active[start..end] {
                if let Err(idx) = slot.binary_search(&rank) {
                    slot.insert(idx, rank);
                }
            }
        }

        let features = self.order.features();
        let mut segments = Vec::new();
        let mut run_start = 0;

        for pos in 1..=len {
            if pos < len && active[pos] == active[run_start] {
                continue;
            }
            segments.push(Segment {
                text: source.slice(CharPos(run_start), CharPos(pos)).to_string(),
                features: active[run_start].iter().map(|&rank| features[rank].clone()).collect(),
                start: run_start,
                end: pos,
            });
            run_start = pos;
        }

        segments
    }

    /// Partition with whitespace-only segments elided
    pub fn build(&self, source: &SourceText<'_>, ranges: &[FeatureRange<F>]) -> Vec<Segment<F>> {
        let all = self.partition(source, ranges);
        let total = all.len();

        let segments: Vec<Segment<F>> = all
            .into_iter()
            .filter(|segment| !segment.text.chars().all(char::is_whitespace))
            .collect();

        debug!(total, kept = segments.len(), "Built text segments");
        segments
    }
}
