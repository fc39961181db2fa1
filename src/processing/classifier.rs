//! C-shape heuristic
//!
//! Deliberately coarse: bounding box plus endpoint quadrants instead of
//! curve fitting. The thresholds below decide what counts as a "C", so
//! they are configuration, not constants buried in code.

use crate::capture::types::{Stroke, SurfaceBounds};
use crate::crypto::{Entropy, Hasher};
use crate::error::{GameError, Result};
use crate::processing::fingerprint::{self, Fingerprint};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shape-heuristic thresholds. Defaults are the values the game ships
/// with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Minimum number of samples in a classifiable stroke.
    pub min_samples: usize,
    /// Minimum bounding-box span per axis, as a fraction of that axis.
    pub min_span_ratio: f64,
    /// Midline used for the endpoint quadrant checks, as a fraction of
    /// each surface dimension.
    pub quadrant_split: f64,
    /// Minimum gap between the stroke and the right edge, as a fraction
    /// of surface width.
    pub edge_gap_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_samples: 12,
            min_span_ratio: 0.25,
            quadrant_split: 0.5,
            edge_gap_ratio: 0.05,
        }
    }
}

/// Why a stroke was not recognized as a "C".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    /// Too few samples; taps and noise land here.
    TooFewSamples,
    /// Bounding box too small relative to the surface.
    TooSmall,
    /// Stroke does not start top-right and finish bottom-right.
    WrongEndpoints,
    /// Stroke hugs the right edge instead of leaving it open.
    ClosedRight,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooFewSamples => "too-few-samples",
            Self::TooSmall => "too-small",
            Self::WrongEndpoints => "wrong-endpoints",
            Self::ClosedRight => "closed-right",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one finished stroke.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted(Fingerprint),
    Rejected(RejectReason),
}

struct BoundingBox {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl BoundingBox {
    fn of(stroke: &Stroke) -> Self {
        let mut bb = Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for sample in &stroke.samples {
            bb.min_x = bb.min_x.min(sample.x);
            bb.max_x = bb.max_x.max(sample.x);
            bb.min_y = bb.min_y.min(sample.y);
            bb.max_y = bb.max_y.max(sample.y);
        }
        bb
    }

    fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Decides whether a finished stroke resembles the letter "C" and, for
/// accepted strokes, derives a fingerprint from the normalized samples.
pub struct ShapeClassifier {
    config: ClassifierConfig,
    entropy: Arc<dyn Entropy>,
    hasher: Arc<dyn Hasher>,
}

impl ShapeClassifier {
    pub fn new(entropy: Arc<dyn Entropy>, hasher: Arc<dyn Hasher>) -> Self {
        Self::with_config(ClassifierConfig::default(), entropy, hasher)
    }

    pub fn with_config(
        config: ClassifierConfig,
        entropy: Arc<dyn Entropy>,
        hasher: Arc<dyn Hasher>,
    ) -> Self {
        Self {
            config,
            entropy,
            hasher,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Run the shape heuristic over a completed stroke.
    ///
    /// Rejections are normal verdicts. `Err` is reserved for contract
    /// violations (empty stroke, non-positive bounds) and serialization
    /// faults.
    pub fn classify(&self, stroke: &Stroke, bounds: SurfaceBounds) -> Result<Verdict> {
        if stroke.is_empty() {
            return Err(GameError::EmptyStroke);
        }
        if !bounds.is_positive() {
            return Err(GameError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }

        if let Some(reason) = self.shape_reject(stroke, bounds) {
            tracing::debug!(samples = stroke.len(), reason = reason.as_str(), "stroke rejected");
            return Ok(Verdict::Rejected(reason));
        }

        let fingerprint =
            fingerprint::derive(stroke, bounds, self.entropy.as_ref(), self.hasher.as_ref())?;
        Ok(Verdict::Accepted(fingerprint))
    }

    // Checks run in order; the first failure wins.
    fn shape_reject(&self, stroke: &Stroke, bounds: SurfaceBounds) -> Option<RejectReason> {
        if stroke.len() < self.config.min_samples {
            return Some(RejectReason::TooFewSamples);
        }

        let bb = BoundingBox::of(stroke);
        if bb.span_x() < bounds.width * self.config.min_span_ratio
            || bb.span_y() < bounds.height * self.config.min_span_ratio
        {
            return Some(RejectReason::TooSmall);
        }

        // Non-empty was checked by the caller.
        let start = stroke.samples[0];
        let end = stroke.samples[stroke.len() - 1];
        let mid_x = bounds.width * self.config.quadrant_split;
        let mid_y = bounds.height * self.config.quadrant_split;
        let starts_top_right = start.x > mid_x && start.y < mid_y;
        let ends_bottom_right = end.x > mid_x && end.y > mid_y;
        if !starts_top_right || !ends_bottom_right {
            return Some(RejectReason::WrongEndpoints);
        }

        let gap_to_right_edge = bounds.width - bb.max_x;
        if gap_to_right_edge < bounds.width * self.config.edge_gap_ratio {
            return Some(RejectReason::ClosedRight);
        }

        None
    }
}
