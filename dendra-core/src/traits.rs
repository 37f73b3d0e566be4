//! # Traits - Geometry Abstractions
//!
//! `Movable` is implemented by everything that owns (or borrows) branch
//! coordinates: cells, networks and the views into them. Implementors
//! only expose their in-scope coordinate arrays and decide how an
//! absolute placement is resolved; relative moves and rotations come
//! for free.

use serde::{Deserialize, Serialize};

use crate::error::DendraResult;
use crate::xyzr::Xyzr;

/// Plane in which `rotate` operates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationPlane {
    #[default]
    Xy,
    Xz,
    Yz,
}

/// Spatial translation and rotation of branch geometry
pub trait Movable {
    /// Visit every coordinate array in scope
    fn visit_xyzr_mut(&mut self, f: &mut dyn FnMut(&mut Xyzr));

    /// Place the scope so its reference sample lands on `(x, y, z)`
    ///
    /// Cells and networks place each cell by its root branch start.
    /// Fails when in-scope coordinates are not placed yet.
    fn move_to(&mut self, x: f64, y: f64, z: f64) -> DendraResult<()>;

    /// Shift every in-scope sample by `(dx, dy, dz)`; radii are untouched
    fn move_by(&mut self, dx: f64, dy: f64, dz: f64) {
        let mut branches = 0usize;
        self.visit_xyzr_mut(&mut |xyzr| {
            xyzr.translate(dx, dy, dz);
            branches += 1;
        });
        tracing::trace!("Moved {} branches by ({}, {}, {})", branches, dx, dy, dz);
    }

    /// Rotate every in-scope sample about the origin by `degrees`
    fn rotate(&mut self, degrees: f64, plane: RotationPlane) {
        let radians = degrees.to_radians();
        self.visit_xyzr_mut(&mut |xyzr| xyzr.rotate(radians, plane));
        tracing::trace!("Rotated by {} degrees in {:?}", degrees, plane);
    }
}
