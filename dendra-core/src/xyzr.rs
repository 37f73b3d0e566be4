//! # Coordinate Samples
//!
//! Every branch owns one `Xyzr`: an ordered list of samples along the
//! branch, each holding a position and the local radius.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ sample 0 │ x │ y │ z │ radius │  (start) │
//! │ sample 1 │ x │ y │ z │ radius │          │
//! │   ...    │   │   │   │        │  (end)   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! A branch that has never been placed carries NaN positions. Translations
//! and rotations touch x, y and z only.

use std::ops::Index;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{DendraError, DendraResult};
use crate::traits::RotationPlane;
use crate::XYZR_COLUMNS;

/// One coordinate sample (32 bytes, `repr(C)`)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct XyzrSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
}

impl XyzrSample {
    pub const fn new(x: f64, y: f64, z: f64, radius: f64) -> Self {
        Self { x, y, z, radius }
    }

    /// Sample with unknown position
    pub const fn unplaced(radius: f64) -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, radius)
    }

    #[inline]
    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    fn column(&self, col: usize) -> &f64 {
        match col {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.radius,
            _ => panic!("xyzr column {} out of range", col),
        }
    }
}

impl From<[f64; XYZR_COLUMNS]> for XyzrSample {
    fn from(row: [f64; XYZR_COLUMNS]) -> Self {
        Self::new(row[0], row[1], row[2], row[3])
    }
}

/// Coordinate array of one branch, shape `(samples, 4)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "XyzrRecord")]
pub struct Xyzr {
    samples: Vec<XyzrSample>,
}

/// Unchecked serialized form of `Xyzr`
#[derive(Deserialize)]
struct XyzrRecord {
    samples: Vec<XyzrSample>,
}

impl TryFrom<XyzrRecord> for Xyzr {
    type Error = DendraError;

    fn try_from(record: XyzrRecord) -> DendraResult<Self> {
        Self::new(record.samples)
    }
}

impl Xyzr {
    /// Build from samples; at least one sample is required
    pub fn new(samples: Vec<XyzrSample>) -> DendraResult<Self> {
        if samples.is_empty() {
            return Err(DendraError::ShapeMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { samples })
    }

    /// Build from `[x, y, z, radius]` rows
    pub fn from_rows(rows: &[[f64; XYZR_COLUMNS]]) -> DendraResult<Self> {
        Self::new(rows.iter().copied().map(XyzrSample::from).collect())
    }

    /// Two-sample placeholder for a branch without known geometry
    pub fn unplaced(radius: f64) -> Self {
        Self {
            samples: vec![XyzrSample::unplaced(radius); 2],
        }
    }

    /// Straight segment from `start` to `end` with constant radius
    pub fn segment(start: [f64; 3], end: [f64; 3], radius: f64) -> Self {
        Self {
            samples: vec![
                XyzrSample::new(start[0], start[1], start[2], radius),
                XyzrSample::new(end[0], end[1], end[2], radius),
            ],
        }
    }

    pub fn samples(&self) -> &[XyzrSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample (the branch start)
    pub fn first(&self) -> &XyzrSample {
        &self.samples[0]
    }

    /// Last sample (the branch end)
    pub fn last(&self) -> &XyzrSample {
        &self.samples[self.samples.len() - 1]
    }

    /// Element at `(row, col)`, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= XYZR_COLUMNS {
            return None;
        }
        self.samples.get(row).map(|s| *s.column(col))
    }

    /// Row-major `(samples, 4)` view of the whole array
    pub fn as_flat(&self) -> &[f64] {
        bytemuck::cast_slice(&self.samples)
    }

    /// True when every sample has a finite position
    pub fn is_placed(&self) -> bool {
        self.samples.iter().all(XyzrSample::is_placed)
    }

    /// Shift every sample; radius is kept
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        for s in &mut self.samples {
            s.translate(dx, dy, dz);
        }
    }

    /// Rotate every sample counter-clockwise about the origin in `plane`
    pub fn rotate(&mut self, radians: f64, plane: RotationPlane) {
        let (sin, cos) = radians.sin_cos();
        for s in &mut self.samples {
            let (a, b) = match plane {
                RotationPlane::Xy => (&mut s.x, &mut s.y),
                RotationPlane::Xz => (&mut s.x, &mut s.z),
                RotationPlane::Yz => (&mut s.y, &mut s.z),
            };
            let (u, v) = (*a, *b);
            *a = u * cos - v * sin;
            *b = u * sin + v * cos;
        }
    }

    /// Total length of the polyline through all samples
    pub fn path_length(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| distance(w[0].position(), w[1].position()))
            .sum()
    }

    /// Point at `fraction` (0..=1) of the path length
    ///
    /// Degenerate paths (single sample or zero length) return the first
    /// sample's position.
    pub fn point_at_fraction(&self, fraction: f64) -> [f64; 3] {
        let total = self.path_length();
        let first = self.first().position();
        if self.samples.len() < 2 || total <= 0.0 {
            return first;
        }

        let target = fraction.clamp(0.0, 1.0) * total;
        let mut walked = 0.0;
        for w in self.samples.windows(2) {
            let (a, b) = (w[0].position(), w[1].position());
            let seg = distance(a, b);
            if seg > 0.0 && walked + seg >= target {
                let t = (target - walked) / seg;
                return [
                    a[0] + (b[0] - a[0]) * t,
                    a[1] + (b[1] - a[1]) * t,
                    a[2] + (b[2] - a[2]) * t,
                ];
            }
            walked += seg;
        }
        self.last().position()
    }
}

impl Index<(usize, usize)> for Xyzr {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        self.samples[row].column(col)
    }
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
