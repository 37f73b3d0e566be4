//! # Views - Restricted-Scope Handles
//!
//! A view mutably borrows its parent and keeps an explicit list of
//! selected indices. All `Movable` operations on a view write straight
//! into the parent's coordinate arrays and never touch unselected
//! entities.

use dendra_core::{DendraError, DendraResult, Movable, Xyzr};

use crate::cell::Cell;
use crate::network::{self, Network};

/// Validate `indices` against `len`, dropping repeats but keeping order
fn selection(indices: &[usize], len: usize) -> DendraResult<Vec<usize>> {
    if indices.is_empty() {
        return Err(DendraError::InvalidSelection("empty selection".into()));
    }

    let mut selected = Vec::with_capacity(indices.len());
    for &index in indices {
        if index >= len {
            return Err(DendraError::IndexOutOfRange { index, len });
        }
        if !selected.contains(&index) {
            selected.push(index);
        }
    }
    if selected.len() != indices.len() {
        tracing::debug!("Dropped {} repeated indices from selection", indices.len() - selected.len());
    }
    Ok(selected)
}

/// Subset of a network's cells
pub struct CellView<'a> {
    network: &'a mut Network,
    cells: Vec<usize>,
}

impl<'a> CellView<'a> {
    pub(crate) fn new(network: &'a mut Network, indices: &[usize]) -> DendraResult<Self> {
        let cells = selection(indices, network.ncells())?;
        tracing::trace!("CellView over cells {:?}", cells);
        Ok(Self { network, cells })
    }

    /// Selected cell indices, in scope order
    pub fn indices(&self) -> &[usize] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Move selected cell `i` (scope order) to `(xs[i], ys[i], zs[i])`
    pub fn move_cells_to(&mut self, xs: &[f64], ys: &[f64], zs: &[f64]) -> DendraResult<()> {
        let targets = network::zip_targets(xs, ys, zs, self.cells.len())?;
        network::place_cells(self.network.cells_mut(), &self.cells, &targets)
    }
}

impl Movable for CellView<'_> {
    fn visit_xyzr_mut(&mut self, f: &mut dyn FnMut(&mut Xyzr)) {
        let cells = self.network.cells_mut();
        for &c in &self.cells {
            cells[c].visit_xyzr_mut(f);
        }
    }

    fn move_to(&mut self, x: f64, y: f64, z: f64) -> DendraResult<()> {
        let targets = vec![[x, y, z]; self.cells.len()];
        network::place_cells(self.network.cells_mut(), &self.cells, &targets)
    }
}

/// Subset of one cell's branches
pub struct BranchView<'a> {
    cell: &'a mut Cell,
    branches: Vec<usize>,
}

impl<'a> BranchView<'a> {
    pub(crate) fn new(cell: &'a mut Cell, indices: &[usize]) -> DendraResult<Self> {
        let branches = selection(indices, cell.nbranches())?;
        tracing::trace!("BranchView over branches {:?}", branches);
        Ok(Self { cell, branches })
    }

    /// Selected branch indices, in scope order
    pub fn indices(&self) -> &[usize] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl Movable for BranchView<'_> {
    fn visit_xyzr_mut(&mut self, f: &mut dyn FnMut(&mut Xyzr)) {
        let xyzr = self.cell.xyzr_mut();
        for &b in &self.branches {
            f(&mut xyzr[b]);
        }
    }

    /// Shift the selection so the first selected branch starts at `(x, y, z)`
    fn move_to(&mut self, x: f64, y: f64, z: f64) -> DendraResult<()> {
        let xyzr = self.cell.xyzr();
        if let Some(&branch) = self.branches.iter().find(|&&b| !xyzr[b].is_placed()) {
            return Err(DendraError::UnplacedGeometry { branch });
        }
        let [x0, y0, z0] = xyzr[self.branches[0]].first().position();
        self.move_by(x - x0, y - y0, z - z0);
        Ok(())
    }
}
