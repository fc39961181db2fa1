use crate::capture::types::{Sample, Stroke, SurfaceBounds};
use crate::crypto::{self, Entropy, Hasher};
use crate::error::Result;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Digest derived from an accepted stroke.
///
/// Used only as high-entropy input to the outcome decision. It is not an
/// identity; nothing looks it up later.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Canonical payload hashed into a fingerprint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedPayload {
    width: f64,
    height: f64,
    points: Vec<Sample>,
    session_id: Uuid,
    created_at: i64,
}

/// Normalize samples into the unit square and re-base timestamps so the
/// first sample sits at `t = 0`.
pub(crate) fn normalize(stroke: &Stroke, bounds: SurfaceBounds) -> Vec<Sample> {
    let t0 = stroke.first().map(|s| s.t).unwrap_or(0.0);
    stroke
        .samples
        .iter()
        .map(|s| Sample {
            x: s.x / bounds.width,
            y: s.y / bounds.height,
            t: s.t - t0,
        })
        .collect()
}

/// Hash the normalized stroke together with a fresh session id and the
/// capture timestamp.
pub(crate) fn derive(
    stroke: &Stroke,
    bounds: SurfaceBounds,
    entropy: &dyn Entropy,
    hasher: &dyn Hasher,
) -> Result<Fingerprint> {
    let payload = SeedPayload {
        width: bounds.width,
        height: bounds.height,
        points: normalize(stroke, bounds),
        session_id: crypto::session_id(entropy),
        created_at: Utc::now().timestamp_millis(),
    };
    let encoded = serde_json::to_vec(&payload)?;
    Ok(Fingerprint::from_bytes(hasher.digest(&encoded)))
}
