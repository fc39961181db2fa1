//! Stroke capture lifecycle
//!
//! Records one pointer gesture at a time as an ordered sequence of
//! timestamped samples. On pointer-up the finished stroke goes through
//! the shape classifier and exactly one observer callback fires; the
//! trace then fades after a short delay unless a new gesture preempts it.

use crate::capture::types::{PointerPosition, Sample, Stroke, SurfaceRect};
use crate::error::Result;
use crate::processing::classifier::{RejectReason, ShapeClassifier, Verdict};
use crate::processing::fingerprint::Fingerprint;
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Host-facing notification boundary.
///
/// Each finished gesture invokes at most one of these; a cancelled
/// gesture invokes neither.
#[async_trait]
pub trait GestureObserver: Send + Sync {
    async fn on_complete(&self, fingerprint: Fingerprint);
    async fn on_invalid(&self, reason: RejectReason);
}

/// Recorder tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderConfig {
    /// Delay before a finished trace is cleared for redraw, in ms.
    pub fade_delay_ms: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self { fade_delay_ms: 1000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Capturing,
}

/// Single-writer state machine for one pointer stream.
///
/// Only one stroke is ever in flight: `begin` supersedes whatever came
/// before it, including a pending fade.
///
/// Needs a tokio runtime context; the fade timer is a spawned task.
pub struct StrokeRecorder {
    state: CaptureState,
    samples: Arc<ParkingMutex<Vec<Sample>>>,
    clock_origin: Instant,
    fade_task: Option<JoinHandle<()>>,
    classifier: ShapeClassifier,
    observer: Arc<dyn GestureObserver>,
    config: RecorderConfig,
}

impl StrokeRecorder {
    pub fn new(classifier: ShapeClassifier, observer: Arc<dyn GestureObserver>) -> Self {
        Self::with_config(RecorderConfig::default(), classifier, observer)
    }

    pub fn with_config(
        config: RecorderConfig,
        classifier: ShapeClassifier,
        observer: Arc<dyn GestureObserver>,
    ) -> Self {
        Self {
            state: CaptureState::Idle,
            samples: Arc::new(ParkingMutex::new(Vec::new())),
            clock_origin: Instant::now(),
            fade_task: None,
            classifier,
            observer,
            config,
        }
    }

    /// Pointer-down: start a fresh stroke.
    pub fn begin(&mut self, pos: PointerPosition, surface: SurfaceRect) {
        self.cancel_fade();
        let sample = self.localized_sample(pos, surface);
        {
            let mut samples = self.samples.lock();
            samples.clear();
            samples.push(sample);
        }
        self.state = CaptureState::Capturing;
        tracing::debug!("stroke capture started");
    }

    /// Pointer-move: extend the active stroke. No-op while idle.
    pub fn extend(&mut self, pos: PointerPosition, surface: SurfaceRect) {
        if self.state != CaptureState::Capturing {
            return;
        }
        let sample = self.localized_sample(pos, surface);
        self.samples.lock().push(sample);
    }

    /// Pointer-up: close the stroke, classify it, notify the observer,
    /// then schedule the fade.
    pub async fn end(&mut self, pos: PointerPosition, surface: SurfaceRect) -> Result<()> {
        if self.state != CaptureState::Capturing {
            return Ok(());
        }
        self.state = CaptureState::Idle;

        let sample = self.localized_sample(pos, surface);
        let stroke = {
            let mut samples = self.samples.lock();
            samples.push(sample);
            Stroke::new(samples.clone())
        };

        match self.classifier.classify(&stroke, surface.bounds())? {
            Verdict::Accepted(fingerprint) => {
                tracing::info!(samples = stroke.len(), "gesture accepted");
                self.observer.on_complete(fingerprint).await;
            }
            Verdict::Rejected(reason) => {
                self.observer.on_invalid(reason).await;
            }
        }

        self.schedule_fade();
        Ok(())
    }

    /// Pointer-cancel: discard the stroke without classification.
    pub fn cancel(&mut self) {
        if self.state != CaptureState::Capturing {
            return;
        }
        self.state = CaptureState::Idle;
        tracing::debug!("stroke capture cancelled");
        self.schedule_fade();
    }

    /// Drawable snapshot of the current trace for an external renderer.
    pub fn trace(&self) -> Vec<Sample> {
        self.samples.lock().clone()
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    fn localized_sample(&self, pos: PointerPosition, surface: SurfaceRect) -> Sample {
        let (x, y) = surface.localize(pos);
        let t = self.clock_origin.elapsed().as_secs_f64() * 1000.0;
        Sample { x, y, t }
    }

    // Cancel-and-replace: at most one fade is pending at a time.
    fn schedule_fade(&mut self) {
        self.cancel_fade();
        let samples = Arc::clone(&self.samples);
        let delay = Duration::from_millis(self.config.fade_delay_ms);
        self.fade_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            samples.lock().clear();
        }));
    }

    fn cancel_fade(&mut self) {
        if let Some(task) = self.fade_task.take() {
            task.abort();
        }
    }
}

impl Drop for StrokeRecorder {
    fn drop(&mut self) {
        self.cancel_fade();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{OsEntropy, Sha256Hasher};

    const SURFACE: SurfaceRect = SurfaceRect {
        left: 10.0,
        top: 20.0,
        width: 400.0,
        height: 300.0,
    };

    #[derive(Default)]
    struct RecordingObserver {
        completed: ParkingMutex<Vec<Fingerprint>>,
        invalid: ParkingMutex<Vec<RejectReason>>,
    }

    #[async_trait]
    impl GestureObserver for RecordingObserver {
        async fn on_complete(&self, fingerprint: Fingerprint) {
            self.completed.lock().push(fingerprint);
        }

        async fn on_invalid(&self, reason: RejectReason) {
            self.invalid.lock().push(reason);
        }
    }

    fn recorder(observer: Arc<RecordingObserver>) -> StrokeRecorder {
        let classifier = ShapeClassifier::new(Arc::new(OsEntropy), Arc::new(Sha256Hasher));
        StrokeRecorder::new(classifier, observer)
    }

    /// Device-space positions tracing a valid "C" over `SURFACE`.
    fn c_positions(n: usize) -> Vec<PointerPosition> {
        let mut positions = Vec::with_capacity(n);
        for i in 0..n {
            let s = i as f64 / (n - 1) as f64;
            positions.push(PointerPosition {
                x: SURFACE.left + SURFACE.width * (0.9 - 0.6 * (std::f64::consts::PI * s).sin()),
                y: SURFACE.top + SURFACE.height * (0.1 + 0.8 * s),
            });
        }
        positions
    }

    async fn draw(recorder: &mut StrokeRecorder, positions: &[PointerPosition]) {
        recorder.begin(positions[0], SURFACE);
        for pos in &positions[1..positions.len() - 1] {
            recorder.extend(*pos, SURFACE);
        }
        recorder
            .end(positions[positions.len() - 1], SURFACE)
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_c_gesture_invokes_on_complete_once() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer.clone());

        draw(&mut recorder, &c_positions(20)).await;

        assert_eq!(observer.completed.lock().len(), 1);
        assert!(observer.invalid.lock().is_empty());
        assert!(!recorder.is_capturing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_invokes_on_invalid_with_too_few_samples() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer.clone());

        let pos = PointerPosition { x: 200.0, y: 100.0 };
        recorder.begin(pos, SURFACE);
        recorder.end(pos, SURFACE).await.unwrap();

        assert!(observer.completed.lock().is_empty());
        assert_eq!(
            observer.invalid.lock().as_slice(),
            &[RejectReason::TooFewSamples]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_invokes_neither_callback() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer.clone());

        let positions = c_positions(20);
        recorder.begin(positions[0], SURFACE);
        for pos in &positions[1..] {
            recorder.extend(*pos, SURFACE);
        }
        recorder.cancel();

        assert!(observer.completed.lock().is_empty());
        assert!(observer.invalid.lock().is_empty());
        assert!(!recorder.is_capturing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_extend_while_idle_is_noop() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer);

        recorder.extend(PointerPosition { x: 50.0, y: 50.0 }, SURFACE);

        assert!(recorder.trace().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_while_idle_is_noop() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer.clone());

        recorder
            .end(PointerPosition { x: 50.0, y: 50.0 }, SURFACE)
            .await
            .unwrap();

        assert!(observer.completed.lock().is_empty());
        assert!(observer.invalid.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_trace_fades_after_delay() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer);

        draw(&mut recorder, &c_positions(20)).await;
        assert_eq!(recorder.trace().len(), 20);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(recorder.trace().is_empty(), "fade should clear the trace");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_begin_preempts_pending_fade() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer);

        draw(&mut recorder, &c_positions(20)).await;
        recorder.begin(PointerPosition { x: 300.0, y: 60.0 }, SURFACE);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(
            recorder.trace().len(),
            1,
            "preempted fade must not clear the new stroke"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_samples_are_localized_and_monotonic() {
        let observer = Arc::new(RecordingObserver::default());
        let mut recorder = recorder(observer);

        let positions = c_positions(20);
        recorder.begin(positions[0], SURFACE);
        for pos in &positions[1..] {
            recorder.extend(*pos, SURFACE);
        }

        let trace = recorder.trace();
        assert!((trace[0].x - 0.9 * SURFACE.width).abs() < 1e-9);
        assert!((trace[0].y - 0.1 * SURFACE.height).abs() < 1e-9);
        for pair in trace.windows(2) {
            assert!(pair[1].t >= pair[0].t, "timestamps must be non-decreasing");
        }
    }
}
