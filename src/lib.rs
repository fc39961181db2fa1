//! cdraw - Draw a C, flip a coin, win a token.
//!
//! Engine crate for the C-draw mini-game. It captures a pointer gesture
//! as timestamped samples, decides whether the finished stroke looks
//! like the letter "C", derives a high-entropy fingerprint from accepted
//! strokes, and turns the fingerprint into a win/lose coin flip.
//!
//! The host feeds pointer events into a [`Game`] (or a bare
//! [`StrokeRecorder`]) and renders results from the round stream; all
//! presentation lives on the host side.

pub mod capture;
pub mod crypto;
pub mod error;
pub mod game;
pub mod processing;

pub use capture::recorder::{GestureObserver, RecorderConfig, StrokeRecorder};
pub use capture::types::{PointerPosition, Sample, Stroke, SurfaceBounds, SurfaceRect};
pub use crypto::{Entropy, Hasher, OsEntropy, Sha256Hasher};
pub use error::{GameError, Result};
pub use game::outcome::{Outcome, OutcomeDecider};
pub use game::{Game, RoundResult};
pub use processing::classifier::{ClassifierConfig, RejectReason, ShapeClassifier, Verdict};
pub use processing::fingerprint::Fingerprint;
