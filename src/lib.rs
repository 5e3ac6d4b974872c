pub mod highlighter;
pub mod request;
pub mod scheduler;

// Re-export main types for convenient access
pub use highlighter::{
    Analysis, FeatureOrder, FeatureRange, HighlightConfig, Highlighter, Layer, LayerOutput,
    LayerStyle, PhraseMapping, Segment, TitleFeature,
};

// Re-export scheduling types used by presentation layers
pub use scheduler::{
    HighlightJob, HighlightOutcome, HighlightResult, HighlightScheduler, OutputMode,
    PendingHighlight,
};

pub use request::HighlightRequest;
