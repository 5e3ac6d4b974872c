// WHY: keeps highlighting off the interactive rendering path; each call-site owns a
// generation counter and only the newest request's result is ever delivered

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::highlighter::{Highlighter, LayerOutput, PhraseMapping, Segment};

/// Which decomposition a job produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Layers,
    Segments,
}

/// One unit of highlighting work
#[derive(Debug, Clone)]
pub struct HighlightJob<F> {
    pub text: String,
    pub features: Vec<F>,
    pub mapping: PhraseMapping<F>,
    pub mode: OutputMode,
}

/// Computed highlight data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HighlightResult<F> {
    Layers(LayerOutput<F>),
    Segments { segments: Vec<Segment<F>> },
}

/// What a pending computation resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightOutcome<F> {
    Ready(HighlightResult<F>),
    /// A newer request or a cancel arrived first; the result was discarded
    Superseded,
}

impl<F> HighlightOutcome<F> {
    pub fn is_superseded(&self) -> bool {
        matches!(self, HighlightOutcome::Superseded)
    }

    pub fn into_result(self) -> Option<HighlightResult<F>> {
        match self {
            HighlightOutcome::Ready(result) => Some(result),
            HighlightOutcome::Superseded => None,
        }
    }
}

/// Run a job synchronously
pub fn compute<F>(highlighter: &Highlighter<F>, job: &HighlightJob<F>) -> HighlightResult<F>
where
    F: Clone + PartialEq + std::fmt::Debug,
{
    match job.mode {
        OutputMode::Layers => HighlightResult::Layers(highlighter.layers(&job.text, &job.features, &job.mapping)),
        OutputMode::Segments => HighlightResult::Segments {
            segments: highlighter.segments(&job.text, &job.features, &job.mapping),
        },
    }
}

/// Per-call-site scheduler with stale-result suppression
pub struct HighlightScheduler<F> {
    highlighter: Arc<Highlighter<F>>,
    generation: Arc<AtomicU64>,
}

impl<F> HighlightScheduler<F>
where
    F: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    pub fn new(highlighter: Arc<Highlighter<F>>) -> Self {
        Self {
            highlighter,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedule a job on the blocking pool, superseding any earlier request
    pub fn submit(&self, job: HighlightJob<F>) -> PendingHighlight<F> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let highlighter = Arc::clone(&self.highlighter);

        debug!(token, chars = job.text.len(), mode = ?job.mode, "Scheduling highlight job");
        let handle = tokio::task::spawn_blocking(move || compute(&highlighter, &job));

        PendingHighlight {
            token,
            generation: Arc::clone(&self.generation),
            handle,
        }
    }

    /// Invalidate every outstanding request without issuing a new one
    pub fn cancel(&self) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(token, "Cancelled pending highlight jobs");
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

/// Handle to a scheduled computation
pub struct PendingHighlight<F> {
    token: u64,
    generation: Arc<AtomicU64>,
    handle: JoinHandle<HighlightResult<F>>,
}

impl<F> PendingHighlight<F> {
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Whether no newer request or cancel has been issued since this one
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.token
    }

    /// Wait for the result; superseded requests resolve to `Superseded`
    pub async fn resolve(self) -> Result<HighlightOutcome<F>> {
        if !self.is_current() {
            // the blocking task finishes on its own; its output is dropped
            debug!(token = self.token, "Dropping superseded highlight job before completion");
            return Ok(HighlightOutcome::Superseded);
        }

        let result = self.handle.await.context("Highlight task failed to complete")?;

        if self.generation.load(Ordering::SeqCst) == self.token {
            Ok(HighlightOutcome::Ready(result))
        } else {
            debug!(token = self.token, "Discarding stale highlight result");
            Ok(HighlightOutcome::Superseded)
        }
    }

    /// Resolve and hand the result to `apply` only if still current; returns whether it was applied
    pub async fn deliver<A>(self, apply: A) -> Result<bool>
    where
        A: FnOnce(HighlightResult<F>),
    {
        match self.resolve().await? {
            HighlightOutcome::Ready(result) => {
                apply(result);
                Ok(true)
            }
            HighlightOutcome::Superseded => Ok(false),
        }
    }
}

/// Resolve computations from independent call-sites concurrently
pub async fn resolve_all<F>(pending: Vec<PendingHighlight<F>>) -> Vec<Result<HighlightOutcome<F>>> {
    join_all(pending.into_iter().map(PendingHighlight::resolve)).await
}
