// WHY: closed vocabulary of title-page annotation categories used at the boundary;
// the engine itself stays generic over any feature key

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::HighlightConfig;

/// Known annotation categories for transcribed title pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TitleFeature {
    #[serde(rename = "Verbs")]
    Verbs,
    #[serde(rename = "Author Attribution")]
    AuthorAttribution,
    #[serde(rename = "Adapter Attribution")]
    AdapterAttribution,
    #[serde(rename = "Printer Attribution")]
    PrinterAttribution,
    #[serde(rename = "Bookseller Attribution")]
    BooksellerAttribution,
    #[serde(rename = "Euclid References")]
    EuclidReferences,
    #[serde(rename = "Patronage Dedication")]
    PatronageDedication,
    #[serde(rename = "Privilege Statement")]
    PrivilegeStatement,
    #[serde(rename = "Edition Statement")]
    EditionStatement,
    #[serde(rename = "Imprint Place")]
    ImprintPlace,
    #[serde(rename = "Imprint Date")]
    ImprintDate,
}

impl TitleFeature {
    pub const ALL: [TitleFeature; 11] = [
        TitleFeature::Verbs,
        TitleFeature::AuthorAttribution,
        TitleFeature::AdapterAttribution,
        TitleFeature::PrinterAttribution,
        TitleFeature::BooksellerAttribution,
        TitleFeature::EuclidReferences,
        TitleFeature::PatronageDedication,
        TitleFeature::PrivilegeStatement,
        TitleFeature::EditionStatement,
        TitleFeature::ImprintPlace,
        TitleFeature::ImprintDate,
    ];

    /// Human label, identical to the serialized name
    pub fn label(self) -> &'static str {
        match self {
            TitleFeature::Verbs => "Verbs",
            TitleFeature::AuthorAttribution => "Author Attribution",
            TitleFeature::AdapterAttribution => "Adapter Attribution",
            TitleFeature::PrinterAttribution => "Printer Attribution",
            TitleFeature::BooksellerAttribution => "Bookseller Attribution",
            TitleFeature::EuclidReferences => "Euclid References",
            TitleFeature::PatronageDedication => "Patronage Dedication",
            TitleFeature::PrivilegeStatement => "Privilege Statement",
            TitleFeature::EditionStatement => "Edition Statement",
            TitleFeature::ImprintPlace => "Imprint Place",
            TitleFeature::ImprintDate => "Imprint Date",
        }
    }

    /// Default engine configuration with the action-phrase category painted last
    pub fn default_config() -> HighlightConfig<TitleFeature> {
        HighlightConfig {
            reserved_last: Some(TitleFeature::Verbs),
            ..HighlightConfig::default()
        }
    }
}

impl fmt::Display for TitleFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TitleFeature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TitleFeature::ALL
            .iter()
            .copied()
            .find(|feature| feature.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow!("Unknown title feature: {s}"))
    }
}
