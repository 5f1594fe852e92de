// core/math.rs
//
// Small vector helpers on top of glam. No dependencies on Ball/Table, just math.

use std::fmt;

use glam::Vec2;

/// Returned when a vector has no direction (zero length or non-finite components).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateVectorError;

impl fmt::Display for DegenerateVectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("vector has zero length or non-finite components")
    }
}

impl std::error::Error for DegenerateVectorError {}

/// Scale `v` to unit length.
#[inline]
pub fn normalize(v: Vec2) -> Result<Vec2, DegenerateVectorError> {
    v.try_normalize().ok_or(DegenerateVectorError)
}

/// Component of `a` parallel to `b`.
///
/// Computed as `normalize(b) * (dot(a, b) / |b|)`, i.e. the scalar projection
/// of `a` on `b` laid along the direction of `b`.
pub fn project_onto(a: Vec2, b: Vec2) -> Result<Vec2, DegenerateVectorError> {
    let dir = normalize(b)?;
    let scalar = a.dot(b) / b.length();
    Ok(dir * scalar)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    p.distance(q)
}
