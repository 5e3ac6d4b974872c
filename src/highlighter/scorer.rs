use super::ordering::FeatureOrder;
use super::ranges::FeatureRange;

/// Number of ranges of later-painted features that overlap `range`
///
/// Only features strictly after `range.feature` in paint order count; the
/// result is informational and never feeds back into merging or ordering.
pub fn intersection_count<F>(range: &FeatureRange<F>, all_ranges: &[FeatureRange<F>], order: &FeatureOrder<F>) -> usize
where
    F: Clone + PartialEq + std::fmt::Debug,
{
    let later = order.later_than(&range.feature);
    all_ranges
        .iter()
        .filter(|other| later.contains(&other.feature) && range.overlaps(*other))
        .count()
}

/// Halo radius for an intersection count, clamped to `max_px`
pub fn halo_radius(count: usize, step_px: u32, max_px: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(step_px).min(max_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighter::mapping::PhraseMapping;

    fn order() -> FeatureOrder<&'static str> {
        let mapping = PhraseMapping::new()
            .with("A", ["a much longer phrase"])
            .with("B", ["short"])
            .with("C", ["x"]);
        FeatureOrder::compute(&["A", "B", "C"], &mapping, None)
    }

    #[test]
    fn test_earlier_feature_counts_later_overlaps() {
        let ranges = vec![
            FeatureRange::new(0, 20, "A"),
            FeatureRange::new(5, 10, "B"),
        ];
        let order = order();
        assert!(intersection_count(&ranges[0], &ranges, &order) >= 1);
        assert_eq!(intersection_count(&ranges[1], &ranges, &order), 0);
    }

    #[test]
    fn test_counts_every_later_range() {
        let ranges = vec![
            FeatureRange::new(0, 20, "A"),
            FeatureRange::new(2, 4, "B"),
            FeatureRange::new(8, 9, "B"),
            FeatureRange::new(20, 22, "C"), // touches the end, inclusive test
            FeatureRange::new(30, 32, "C"),
        ];
        let order = order();
        assert_eq!(intersection_count(&ranges[0], &ranges, &order), 3);
        assert_eq!(intersection_count(&ranges[1], &ranges, &order), 0);
    }

    #[test]
    fn test_same_feature_never_counts() {
        let ranges = vec![FeatureRange::new(0, 5, "A"), FeatureRange::new(3, 8, "A")];
        assert_eq!(intersection_count(&ranges[0], &ranges, &order()), 0);
    }

    #[test]
    fn test_halo_radius_clamped() {
        assert_eq!(halo_radius(0, 2, 8), 0);
        assert_eq!(halo_radius(1, 2, 8), 2);
        assert_eq!(halo_radius(3, 2, 8), 6);
        assert_eq!(halo_radius(40, 2, 8), 8);
        assert_eq!(halo_radius(usize::MAX, 2, 8), 8);
    }
}
