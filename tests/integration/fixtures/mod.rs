// Test fixtures with transcribed title pages and their phrase catalogs
// WHY: Golden-file testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// Short title with one phrase per feature
pub const ELEMENTA_TEXT: &str = "Euclidis Elementa, translated by Jo. Dee";

/// Expected segment output for ELEMENTA_TEXT
/// Format: start<TAB>end<TAB>text<TAB>features joined by '|'
pub const ELEMENTA_SEGMENTS_EXPECTED: &str = "0\t8\tEuclidis\tEuclid References
8\t19\t Elementa, \t
19\t29\ttranslated\tVerbs
29\t33\t by \t
33\t40\tJo. Dee\tAdapter Attribution";

/// Multi-line title page with hyphen-broken words, a citation marker and stacked annotations
pub const BILLINGSLEY_TEXT: &str = "[STC 10560]: THE ELEMENTS OF GEOMETRIE of the most auncient Philosopher EV-
CLIDE of Megara. Faithfully (now first) translated into the En-
glishe toung, by H. Billingsley, Citizen of London.
With a very fruitfull Praeface made by M. I. Dee.
Imprinted at London by Iohn Daye.";

/// Phrase catalog for BILLINGSLEY_TEXT, in declaration order
pub fn billingsley_mapping() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Euclid References", vec!["Elements of Geometrie", "Evclide of Megara"]),
        ("Adapter Attribution", vec!["by H. Billingsley, Citizen of London", "M. I. Dee."]),
        ("Printer Attribution", vec!["by Iohn Daye"]),
        ("Imprint Place", vec!["London"]),
        ("Verbs", vec!["translated", "made by", "Imprinted"]),
        ("Patronage Dedication", vec![]),
    ]
}
