//! # Network - A Collection of Cells
//!
//! Cells are stored by value, so composing the same cell several times
//! yields independent copies. Branches are addressed by a flattened
//! global index: the branch counts of all preceding cells plus the local
//! branch index.

use dendra_core::{DendraError, DendraResult, LayoutConfig, Movable, Xyzr};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::view::CellView;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    cells: Vec<Cell>,
}

impl Network {
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Network of `count` independent copies of `cell`
    pub fn replicate(cell: &Cell, count: usize) -> Self {
        Self::new(std::iter::repeat(cell).take(count).cloned())
    }

    pub fn ncells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn get_cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn total_nbranches(&self) -> usize {
        self.cells.iter().map(Cell::nbranches).sum()
    }

    /// Global index of the root branch of `cell`
    pub fn global_branch_offset(&self, cell: usize) -> DendraResult<usize> {
        if cell >= self.cells.len() {
            return Err(DendraError::IndexOutOfRange {
                index: cell,
                len: self.cells.len(),
            });
        }
        Ok(self.cells[..cell].iter().map(Cell::nbranches).sum())
    }

    /// Coordinates of the branch at a global index
    pub fn xyzr(&self, global_branch: usize) -> Option<&Xyzr> {
        self.xyzr_iter().nth(global_branch)
    }

    /// All coordinate arrays in global branch order
    pub fn xyzr_iter(&self) -> impl Iterator<Item = &Xyzr> + '_ {
        self.cells.iter().flat_map(|c| c.xyzr().iter())
    }

    pub fn compute_xyz(&mut self) {
        self.compute_xyz_with(&LayoutConfig::default());
    }

    pub fn compute_xyz_with(&mut self, config: &LayoutConfig) {
        tracing::debug!("compute_xyz over {} cells", self.cells.len());
        for cell in &mut self.cells {
            cell.compute_xyz_with(config);
        }
    }

    /// Move cell `i` to `(xs[i], ys[i], zs[i])`
    pub fn move_cells_to(&mut self, xs: &[f64], ys: &[f64], zs: &[f64]) -> DendraResult<()> {
        let targets = zip_targets(xs, ys, zs, self.cells.len())?;
        let order: Vec<usize> = (0..self.cells.len()).collect();
        place_cells(&mut self.cells, &order, &targets)
    }

    /// View restricted to one cell
    pub fn cell(&mut self, index: usize) -> DendraResult<CellView<'_>> {
        CellView::new(self, &[index])
    }

    /// View restricted to several cells, in the given order
    pub fn select_cells(&mut self, indices: &[usize]) -> DendraResult<CellView<'_>> {
        CellView::new(self, indices)
    }

    /// Snapshot as JSON; every cell must be fully placed
    pub fn to_json(&self) -> DendraResult<String> {
        if let Some(branch) = self.cells.iter().find_map(Cell::first_unplaced) {
            return Err(DendraError::UnplacedGeometry { branch });
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore from a JSON snapshot, validating every cell
    pub fn from_json(json: &str) -> DendraResult<Self> {
        let network: Network = serde_json::from_str(json)?;
        tracing::debug!("Restored network of {} cells", network.ncells());
        Ok(network)
    }
}

impl Movable for Network {
    fn visit_xyzr_mut(&mut self, f: &mut dyn FnMut(&mut Xyzr)) {
        for cell in &mut self.cells {
            cell.visit_xyzr_mut(f);
        }
    }

    /// Move every cell so its own root branch starts at `(x, y, z)`
    fn move_to(&mut self, x: f64, y: f64, z: f64) -> DendraResult<()> {
        let targets = vec![[x, y, z]; self.cells.len()];
        let order: Vec<usize> = (0..self.cells.len()).collect();
        place_cells(&mut self.cells, &order, &targets)
    }
}

/// Pair up per-cell target coordinates, checking them against the scope size
pub(crate) fn zip_targets(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
    expected: usize,
) -> DendraResult<Vec<[f64; 3]>> {
    if xs.len() != expected || ys.len() != expected || zs.len() != expected {
        return Err(DendraError::LengthMismatch(format!(
            "got {}/{}/{} coordinates for {} cells",
            xs.len(),
            ys.len(),
            zs.len(),
            expected
        )));
    }
    Ok(xs
        .iter()
        .zip(ys)
        .zip(zs)
        .map(|((&x, &y), &z)| [x, y, z])
        .collect())
}

/// Move `cells[order[i]]` to `targets[i]`
///
/// All selected cells are checked before any is moved, so a failure
/// leaves the network untouched.
pub(crate) fn place_cells(
    cells: &mut [Cell],
    order: &[usize],
    targets: &[[f64; 3]],
) -> DendraResult<()> {
    for &c in order {
        if let Some(branch) = cells[c].first_unplaced() {
            tracing::debug!("Cell {} has unplaced branch {}", c, branch);
            return Err(DendraError::UnplacedGeometry { branch });
        }
    }

    for (&c, &[x, y, z]) in order.iter().zip(targets) {
        cells[c].move_to(x, y, z)?;
    }
    tracing::trace!("Placed {} cells", order.len());
    Ok(())
}
