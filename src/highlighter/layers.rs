// WHY: overlay rendering - every layer is the full text so layers stack with
// identical glyph geometry and only the wrapped spans show through

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ordering::FeatureOrder;
use super::ranges::{ranges_for, FeatureRange};
use super::scorer::{halo_radius, intersection_count};
use super::source_text::{BytePos, CharPos, SourceText};

/// Bracketed citation marker such as `[A.ii.]:`
pub const CITATION_PATTERN: &str = r"\[[^\]\n]*\]:";

const FALLBACK_COLOR: &str = "rgba(255, 235, 59, 0.45)";

/// Visual parameters for overlay layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyle {
    /// Background colors assigned by paint rank, cycling when exhausted
    pub palette: Vec<String>,
    /// Outline color for the reserved outline-only category
    pub outline_color: String,
    /// Text color for citation markers
    pub citation_color: String,
    /// Halo growth per intersecting later range
    pub halo_step_px: u32,
    /// Upper bound on the halo radius
    pub halo_max_px: u32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            palette: vec![
                "rgba(255, 205, 86, 0.45)".to_string(),
                "rgba(54, 162, 235, 0.35)".to_string(),
                "rgba(255, 99, 132, 0.35)".to_string(),
                "rgba(75, 192, 192, 0.40)".to_string(),
                "rgba(153, 102, 255, 0.35)".to_string(),
                "rgba(255, 159, 64, 0.40)".to_string(),
                "rgba(46, 204, 113, 0.35)".to_string(),
                "rgba(201, 203, 207, 0.50)".to_string(),
            ],
            outline_color: "#b03a2e".to_string(),
            citation_color: "#8a8a8a".to_string(),
            halo_step_px: 2,
            halo_max_px: 8,
        }
    }
}

impl LayerStyle {
    /// Background color for the feature painted at `rank`
    pub fn color_for(&self, rank: usize) -> &str {
        if self.palette.is_empty() {
            FALLBACK_COLOR
        } else {
            &self.palette[rank % self.palette.len()]
        }
    }

    fn citation_css(&self) -> String {
        format!("font-size:smaller;color:{}", self.citation_color)
    }
}

/// One feature's full-text overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer<F> {
    pub feature: F,
    /// True for the outline-only category
    pub outline: bool,
    /// Number of wrapped spans
    pub highlighted: usize,
    pub html: String,
}

/// Output of layer mode: layers in paint order plus the unhighlighted top pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerOutput<F> {
    pub layers: Vec<Layer<F>>,
    pub base: String,
}

/// A styled run boundary set; at most one highlight covers any position
struct StyledSpan {
    start: usize,
    end: usize,
    css: String,
}

pub struct LayerCompositor {
    style: LayerStyle,
    citation: Regex,
}

impl LayerCompositor {
    pub fn new(style: LayerStyle) -> Result<Self> {
        let citation = Regex::new(CITATION_PATTERN)?;
        debug!("Compiled citation marker pattern: {}", CITATION_PATTERN);
        Ok(Self { style, citation })
    }

    pub fn style(&self) -> &LayerStyle {
        &self.style
    }

    /// Citation markers as code-point spans
    pub fn citation_spans(&self, source: &SourceText<'_>) -> Vec<(usize, usize)> {
        self.citation
            .find_iter(source.as_str())
            .filter_map(|m| {
                let start = source.char_pos(BytePos(m.start()))?;
                let end = source.char_pos(BytePos(m.end()))?;
                Some((start.0, end.0))
            })
            .collect()
    }

    /// The base pass: full text with only citation markers styled
    pub fn base(&self, source: &SourceText<'_>) -> String {
        let citations = self.citation_spans(source);
        self.render(source, &citations, &[])
    }

    /// Build one layer per ordered feature from merged ranges
    pub fn compose<F>(&self, source: &SourceText<'_>, ranges: &[FeatureRange<F>], order: &FeatureOrder<F>) -> LayerOutput<F>
    where
        F: Clone + PartialEq + std::fmt::Debug,
    {
        let citations = self.citation_spans(source);

        let layers = order
            .iter()
            .enumerate()
            .map(|(rank, feature)| {
                let outline = order.is_outline(feature);
                let color = self.style.color_for(rank);

                let spans: Vec<StyledSpan> = ranges_for(ranges, feature)
                    .map(|range| {
                        let css = if outline {
                            format!("outline:1px solid {}", self.style.outline_color)
                        } else {
                            let count = intersection_count(range, ranges, order);
                            let radius = halo_radius(count, self.style.halo_step_px, self.style.halo_max_px);
                            if radius == 0 {
                                format!("background-color:{color}")
                            } else {
                                format!("background-color:{color};box-shadow:0 0 {radius}px {}px {color}", radius / 2)
                            }
                        };
                        StyledSpan { start: range.start, end: range.end, css }
                    })
                    .collect();

                debug!(?feature, spans = spans.len(), "Composed layer");
                Layer {
                    feature: feature.clone(),
                    outline,
                    highlighted: spans.len(),
                    html: self.render(source, &citations, &spans),
                }
            })
            .collect();

        LayerOutput {
            layers,
            base: self.render(source, &citations, &[]),
        }
    }

    /// Render the whole text, emitting one span per run of constant styling
    fn render(&self, source: &SourceText<'_>, citations: &[(usize, usize)], highlights: &[StyledSpan]) -> String {
        let len = source.char_len();
        let mut bounds: Vec<usize> = Vec::with_capacity(2 + 2 * (citations.len() + highlights.len()));
        bounds.push(0);
        bounds.push(len);
        for &(start, end) in citations {
            bounds.push(start);
            bounds.push(end);
        }
        for span in highlights {
            bounds.push(span.start);
            bounds.push(span.end);
        }
        bounds.retain(|&b| b <= len);
        bounds.sort_unstable();
        bounds.dedup();

        let citation_css = self.style.citation_css();
        let mut out = String::with_capacity(source.as_str().len() * 2);

        for window in bounds.windows(2) {
            let (start, end) = (window[0], window[1]);
            let in_citation = citations.iter().any(|&(s, e)| s <= start && end <= e);
            let highlight = highlights.iter().find(|h| h.start <= start && end <= h.end);

            let css = match (highlight, in_citation) {
                (Some(h), true) => format!("{};{}", h.css, citation_css),
                (Some(h), false) => h.css.clone(),
                (None, true) => citation_css.clone(),
                (None, false) => String::new(),
            };

            let text = source.slice(CharPos(start), CharPos(end));
            if css.is_empty() {
                push_escaped(&mut out, text);
            } else {
                out.push_str("<span style=\"");
                out.push_str(&css);
                out.push_str("\">");
                push_escaped(&mut out, text);
                out.push_str("</span>");
            }
        }

        out
    }
}

/// HTML-escape text, turning every line break (`\r\n`, `\r`, `\n`) into `<br/>`
fn push_escaped(out: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("<br/>");
            }
            '\n' => out.push_str("<br/>"),
            _ => out.push(ch),
        }
    }
}
