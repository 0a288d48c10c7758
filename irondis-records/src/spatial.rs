//! Orientation and location records.
//!
//! Float fields compare by bit pattern, so `NaN` equals itself and `0.0`
//! differs from `-0.0`.

use irondis_core::WireRecord;

/// Orientation as Euler angles, in radians.
#[derive(Debug, Clone, Copy, Default, WireRecord)]
pub struct EulerAngles {
    /// Heading.
    pub psi: f32,
    /// Pitch.
    pub theta: f32,
    /// Roll.
    pub phi: f32,
}

/// Double precision 3-vector, used for world coordinates in metres.
#[derive(Debug, Clone, Copy, Default, WireRecord)]
pub struct Vector3Double {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
