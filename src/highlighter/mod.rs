// WHY: Main highlighter interface - one match/merge/order core feeding both the
// layer renderer and the segment renderer

use anyhow::Result;
use tracing::{debug, info};

pub mod features;
pub mod fuzzy_matcher;
pub mod layers;
pub mod mapping;
pub mod normalization;
pub mod ordering;
pub mod ranges;
pub mod scorer;
pub mod segments;
pub mod source_text;

// Re-export core types
pub use features::TitleFeature;
pub use fuzzy_matcher::FuzzyPattern;
pub use layers::{Layer, LayerCompositor, LayerOutput, LayerStyle};
pub use mapping::PhraseMapping;
pub use normalization::PhraseNormalizer;
pub use ordering::FeatureOrder;
pub use ranges::{merge_ranges, FeatureRange};
pub use segments::{Segment, SegmentBuilder};
pub use source_text::{BytePos, CharPos, SourceText};

/// Configuration for phrase matching and layer styling
#[derive(Debug, Clone)]
pub struct HighlightConfig<F> {
    /// Phrases shorter than this after normalization are never matched
    pub min_phrase_chars: usize,
    /// Punctuation stripped from the end of each phrase
    pub trailing_punctuation: Vec<char>,
    /// Category always painted last and drawn outline-only
    pub reserved_last: Option<F>,
    pub style: LayerStyle,
}

impl<F> Default for HighlightConfig<F> {
    fn default() -> Self {
        Self {
            min_phrase_chars: 2,
            trailing_punctuation: vec![',', '.'],
            reserved_last: None,
            style: LayerStyle::default(),
        }
    }
}

/// Matched, merged and ordered view of one (text, features, mapping) triple
#[derive(Debug, Clone)]
pub struct Analysis<'a, F> {
    pub source: SourceText<'a>,
    /// Merged ranges, sorted by start
    pub ranges: Vec<FeatureRange<F>>,
    pub order: FeatureOrder<F>,
}

impl<'a, F> Analysis<'a, F>
where
    F: Clone + PartialEq + std::fmt::Debug,
{
    /// Later-painted ranges overlapping `range`
    pub fn intersection_count(&self, range: &FeatureRange<F>) -> usize {
        scorer::intersection_count(range, &self.ranges, &self.order)
    }

    pub fn segments(&self) -> Vec<Segment<F>> {
        SegmentBuilder::new(&self.order).build(&self.source, &self.ranges)
    }

    pub fn layers(&self, compositor: &LayerCompositor) -> LayerOutput<F> {
        compositor.compose(&self.source, &self.ranges, &self.order)
    }
}

/// Feature highlighting engine
pub struct Highlighter<F> {
    normalizer: PhraseNormalizer,
    reserved_last: Option<F>,
    compositor: LayerCompositor,
}

impl<F> Highlighter<F>
where
    F: Clone + PartialEq + std::fmt::Debug,
{
    /// Create new highlighter with custom configuration
    pub fn new(config: HighlightConfig<F>) -> Result<Self> {
        let compositor = LayerCompositor::new(config.style)?;
        Ok(Self {
            normalizer: PhraseNormalizer::new(config.min_phrase_chars, config.trailing_punctuation),
            reserved_last: config.reserved_last,
            compositor,
        })
    }

    pub fn compositor(&self) -> &LayerCompositor {
        &self.compositor
    }

    /// Locate, merge and order every requested feature's phrases
    pub fn analyze<'a>(&self, text: &'a str, features: &[F], mapping: &PhraseMapping<F>) -> Analysis<'a, F> {
        let source = SourceText::new(text);
        let order = FeatureOrder::compute(features, mapping, self.reserved_last.as_ref());

        let mut raw = Vec::new();
        let mut buffer = String::new();
        let mut skipped = 0usize;

        for feature in order.iter() {
            for phrase in mapping.phrases(feature) {
                if !self.normalizer.normalize_into(phrase, &mut buffer) {
                    skipped += 1;
                    continue;
                }
                let Some(pattern) = FuzzyPattern::compile(&buffer) else {
                    skipped += 1;
                    continue;
                };
                raw.extend(
                    pattern
                        .find_all(&source)
                        .into_iter()
                        .map(|(start, end)| FeatureRange::new(start, end, feature.clone())),
                );
            }
        }

        let raw_count = raw.len();
        let ranges = merge_ranges(raw, source.char_len());
        debug!(raw_count, merged = ranges.len(), skipped, "Matched feature phrases");
        info!(
            "Highlighted {} ranges across {} features in {} characters",
            ranges.len(),
            order.len(),
            source.char_len()
        );

        Analysis { source, ranges, order }
    }

    /// Layer mode: one full-text layer per feature plus the base pass
    pub fn layers(&self, text: &str, features: &[F], mapping: &PhraseMapping<F>) -> LayerOutput<F> {
        self.analyze(text, features, mapping).layers(&self.compositor)
    }

    /// Segment mode: whitespace-elided partition by active feature set
    pub fn segments(&self, text: &str, features: &[F], mapping: &PhraseMapping<F>) -> Vec<Segment<F>> {
        self.analyze(text, features, mapping).segments()
    }
}
