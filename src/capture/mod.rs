//! Gesture capture
//!
//! Records a continuous pointer gesture as an ordered sequence of
//! timestamped samples and manages the fade-clear lifecycle around it.

pub mod recorder;
pub mod types;

pub use recorder::{GestureObserver, RecorderConfig, StrokeRecorder};
pub use types::{PointerPosition, Sample, Stroke, SurfaceBounds, SurfaceRect};
