// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use title_highlight::highlighter::SourceText;
use title_highlight::{PhraseMapping, Segment};

/// Test fixture helper for creating temporary request documents
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Write a request JSON file with given content
    pub fn create_request_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write request file");
        file_path
    }
}

/// Build a string-keyed mapping from fixture tuples
pub fn mapping_from(entries: Vec<(&'static str, Vec<&'static str>)>) -> PhraseMapping<&'static str> {
    entries.into_iter().collect()
}

/// Format segments one per line: start<TAB>end<TAB>text<TAB>features
pub fn format_segments(segments: &[Segment<&str>]) -> String {
    segments
        .iter()
        .map(|s| format!("{}\t{}\t{}\t{}", s.start, s.end, s.text, s.features.join("|")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rebuild the source text from segments, filling elided gaps from the source
pub fn reassemble<F>(source: &str, segments: &[Segment<F>]) -> String {
    let source = SourceText::new(source);
    let mut out = String::new();
    let mut last = 0;
    for segment in segments {
        out.push_str(source.slice(
            title_highlight::highlighter::CharPos(last),
            title_highlight::highlighter::CharPos(segment.start),
        ));
        out.push_str(&segment.text);
        last = segment.end;
    }
    out.push_str(source.slice(
        title_highlight::highlighter::CharPos(last),
        title_highlight::highlighter::CharPos(source.char_len()),
    ));
    out
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines\n{}",
            context,
            expected_lines.len(),
            actual_lines.len(),
            actual
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {:?}\nActual:   {:?}",
                context,
                i + 1,
                expected_line,
                actual_line
            );
        }
    }
}
