// WHY: one deterministic paint order shared by layer stacking and intersection scoring

use serde::Serialize;
use tracing::debug;

use super::mapping::PhraseMapping;

/// Paint order of the requested features, first = painted underneath
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureOrder<F> {
    features: Vec<F>,
    /// Outline-only category, present only when it was requested
    reserved: Option<F>,
}

impl<F> FeatureOrder<F>
where
    F: Clone + PartialEq + std::fmt::Debug,
{
    /// Order `requested` by descending total phrase length in `mapping`.
    ///
    /// Ties keep mapping declaration order; features the mapping does not
    /// mention weigh nothing and follow in request order. `reserved_last`, if
    /// requested, is moved to the very end whatever its weight. Duplicates in
    /// `requested` collapse to their first occurrence.
    pub fn compute(requested: &[F], mapping: &PhraseMapping<F>, reserved_last: Option<&F>) -> Self {
        let mut unique: Vec<&F> = Vec::with_capacity(requested.len());
        for feature in requested {
            if !unique.contains(&feature) {
                unique.push(feature);
            }
        }

        let mut keyed: Vec<(bool, usize, usize, usize, &F)> = unique
            .into_iter()
            .enumerate()
            .map(|(request_idx, feature)| {
                let is_reserved = reserved_last == Some(feature);
                let weight = mapping.total_phrase_chars(feature);
                let declared = mapping.position(feature).unwrap_or(usize::MAX);
                (is_reserved, weight, declared, request_idx, feature)
            })
            .collect();

        keyed.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.3.cmp(&b.3))
        });

        let features: Vec<F> = keyed.iter().map(|k| k.4.clone()).collect();
        let reserved = keyed.iter().find(|k| k.0).map(|k| k.4.clone());

        debug!(?features, "Computed feature paint order");
        Self { features, reserved }
    }

    pub fn features(&self) -> &[F] {
        &self.features
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Paint rank of a feature, None when it was not requested
    pub fn rank(&self, feature: &F) -> Option<usize> {
        self.features.iter().position(|f| f == feature)
    }

    /// Whether the feature renders outline-only
    pub fn is_outline(&self, feature: &F) -> bool {
        self.reserved.as_ref() == Some(feature)
    }

    /// Features painted after `feature` (the "higher" ones for scoring)
    pub fn later_than(&self, feature: &F) -> &[F] {
        match self.rank(feature) {
            Some(rank) => &self.features[rank + 1..],
            None => &[],
        }
    }
}
