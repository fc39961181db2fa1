//! Post-capture stroke processing
//!
//! Turns a finished stroke into an accept/reject verdict and, for
//! accepted strokes, a fingerprint digest over the normalized samples.

pub mod classifier;
pub mod fingerprint;

pub use classifier::{ClassifierConfig, RejectReason, ShapeClassifier, Verdict};
pub use fingerprint::Fingerprint;
