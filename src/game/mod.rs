//! Game round coordination
//!
//! Wires the stroke recorder, shape classifier, and outcome decider into
//! one playable round loop: pointer events go in, round results come out
//! as a stream the host polls. Presentation stays on the host side.

pub mod outcome;

use crate::capture::recorder::{GestureObserver, RecorderConfig, StrokeRecorder};
use crate::capture::types::{PointerPosition, Sample, SurfaceRect};
use crate::crypto::{Entropy, Hasher, OsEntropy, Sha256Hasher};
use crate::error::Result;
use crate::processing::classifier::{ClassifierConfig, RejectReason, ShapeClassifier};
use crate::processing::fingerprint::Fingerprint;
use async_trait::async_trait;
use outcome::{Outcome, OutcomeDecider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// What the host shows for one finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RoundResult {
    /// The stroke did not read as a "C"; prompt a retry.
    Invalid { reason: RejectReason },
    Win,
    Lose,
}

/// Observer that turns accepted gestures into coin flips and relays
/// every verdict to the host channel.
struct RoundRelay {
    decider: OutcomeDecider,
    results: mpsc::UnboundedSender<RoundResult>,
}

#[async_trait]
impl GestureObserver for RoundRelay {
    async fn on_complete(&self, fingerprint: Fingerprint) {
        let outcome = self.decider.decide(&fingerprint);
        tracing::info!(%fingerprint, ?outcome, "round decided");
        let result = match outcome {
            Outcome::Win => RoundResult::Win,
            Outcome::Lose => RoundResult::Lose,
        };
        let _ = self.results.send(result);
    }

    async fn on_invalid(&self, reason: RejectReason) {
        let _ = self.results.send(RoundResult::Invalid { reason });
    }
}

/// One playable game: feed pointer events in, poll round results out.
pub struct Game {
    recorder: StrokeRecorder,
    results: mpsc::UnboundedReceiver<RoundResult>,
}

impl Game {
    /// Game with the stock thresholds, OS entropy, and SHA-256.
    pub fn new() -> Self {
        Self::with_parts(
            ClassifierConfig::default(),
            RecorderConfig::default(),
            Arc::new(OsEntropy),
            Arc::new(Sha256Hasher),
        )
    }

    pub fn with_parts(
        classifier_config: ClassifierConfig,
        recorder_config: RecorderConfig,
        entropy: Arc<dyn Entropy>,
        hasher: Arc<dyn Hasher>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let relay = Arc::new(RoundRelay {
            decider: OutcomeDecider::new(Arc::clone(&entropy), Arc::clone(&hasher)),
            results: tx,
        });
        let classifier = ShapeClassifier::with_config(classifier_config, entropy, hasher);
        Self {
            recorder: StrokeRecorder::with_config(recorder_config, classifier, relay),
            results: rx,
        }
    }

    pub fn pointer_down(&mut self, pos: PointerPosition, surface: SurfaceRect) {
        self.recorder.begin(pos, surface);
    }

    pub fn pointer_move(&mut self, pos: PointerPosition, surface: SurfaceRect) {
        self.recorder.extend(pos, surface);
    }

    pub async fn pointer_up(&mut self, pos: PointerPosition, surface: SurfaceRect) -> Result<()> {
        self.recorder.end(pos, surface).await
    }

    pub fn pointer_cancel(&mut self) {
        self.recorder.cancel();
    }

    /// Next finished round, if one is ready.
    pub fn try_next_result(&mut self) -> Option<RoundResult> {
        self.results.try_recv().ok()
    }

    /// Await the next finished round.
    pub async fn next_result(&mut self) -> Option<RoundResult> {
        self.results.recv().await
    }

    /// Drawable snapshot of the in-progress trace.
    pub fn trace(&self) -> Vec<Sample> {
        self.recorder.trace()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
