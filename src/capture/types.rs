use serde::{Deserialize, Serialize};

/// One pointer sample in local surface coordinates.
///
/// `t` is milliseconds from the recorder's clock origin. Samples within a
/// stroke are non-decreasing in `t` and immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

/// Ordered samples from one continuous gesture.
///
/// Insertion order is temporal order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub samples: Vec<Sample>,
}

impl Stroke {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

/// Capture-area size at classification time.
///
/// Not persisted; recomputed per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceBounds {
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Device-space placement of the capture area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn bounds(&self) -> SurfaceBounds {
        SurfaceBounds {
            width: self.width,
            height: self.height,
        }
    }

    /// Translate a device-space pointer position into local coordinates.
    pub fn localize(&self, pos: PointerPosition) -> (f64, f64) {
        (pos.x - self.left, pos.y - self.top)
    }
}

/// Raw pointer-event position in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}
