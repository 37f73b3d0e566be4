//! # Cell - A Tree of Branches
//!
//! A cell owns its branches, a parent array describing the tree, and one
//! coordinate array per branch. Branch 0 is the root; the first sample of
//! its coordinate array is the reference point for `move_to`.

use dendra_core::{DendraError, DendraResult, LayoutConfig, Movable, Xyzr};
use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::layout;
use crate::tree;
use crate::view::BranchView;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CellRecord")]
pub struct Cell {
    branches: Vec<Branch>,
    parents: Vec<i64>,
    xyzr: Vec<Xyzr>,
}

/// Unchecked serialized form of `Cell`
#[derive(Deserialize)]
struct CellRecord {
    branches: Vec<Branch>,
    parents: Vec<i64>,
    xyzr: Vec<Xyzr>,
}

impl TryFrom<CellRecord> for Cell {
    type Error = DendraError;

    fn try_from(record: CellRecord) -> DendraResult<Self> {
        Cell::from_branches(record.branches, &record.parents)?.with_xyzr(record.xyzr)
    }
}

impl Cell {
    /// Cell whose every branch is a copy of `branch`
    pub fn new(branch: &Branch, parents: &[i64]) -> DendraResult<Self> {
        Self::from_branches(vec![branch.clone(); parents.len()], parents)
    }

    /// Cell from distinct branches, one per entry of `parents`
    pub fn from_branches(branches: Vec<Branch>, parents: &[i64]) -> DendraResult<Self> {
        tree::validate(parents)?;
        if branches.len() != parents.len() {
            return Err(DendraError::ShapeMismatch {
                expected: parents.len(),
                actual: branches.len(),
            });
        }

        let xyzr = branches.iter().map(|b| Xyzr::unplaced(b.radius())).collect();
        Ok(Self {
            branches,
            parents: parents.to_vec(),
            xyzr,
        })
    }

    /// Replace the geometry with explicit coordinates, one array per branch
    pub fn with_xyzr(mut self, xyzr: Vec<Xyzr>) -> DendraResult<Self> {
        if xyzr.len() != self.branches.len() {
            return Err(DendraError::ShapeMismatch {
                expected: self.branches.len(),
                actual: xyzr.len(),
            });
        }
        self.xyzr = xyzr;
        Ok(self)
    }

    pub fn nbranches(&self) -> usize {
        self.branches.len()
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn parents(&self) -> &[i64] {
        &self.parents
    }

    /// Coordinate arrays indexed by branch
    pub fn xyzr(&self) -> &[Xyzr] {
        &self.xyzr
    }

    pub(crate) fn xyzr_mut(&mut self) -> &mut [Xyzr] {
        &mut self.xyzr
    }

    /// True when every branch has finite coordinates
    pub fn is_placed(&self) -> bool {
        self.xyzr.iter().all(Xyzr::is_placed)
    }

    /// Index of the first branch without coordinates
    pub(crate) fn first_unplaced(&self) -> Option<usize> {
        self.xyzr.iter().position(|x| !x.is_placed())
    }

    /// Start of the root branch
    pub fn root_position(&self) -> [f64; 3] {
        self.xyzr[0].first().position()
    }

    /// Lay out unplaced branches with the default layout
    pub fn compute_xyz(&mut self) {
        self.compute_xyz_with(&LayoutConfig::default());
    }

    /// Lay out unplaced branches with an explicit layout
    pub fn compute_xyz_with(&mut self, config: &LayoutConfig) {
        let placed = layout::compute_xyz(self, config);
        if placed == 0 {
            tracing::warn!("compute_xyz: all {} branches already placed", self.nbranches());
        } else {
            tracing::debug!("compute_xyz: placed {} of {} branches", placed, self.nbranches());
        }
    }

    /// Compartment centers per branch, spaced evenly along each branch path
    pub fn compartment_centers(&self) -> DendraResult<Vec<Vec<[f64; 3]>>> {
        if let Some(branch) = self.first_unplaced() {
            return Err(DendraError::UnplacedGeometry { branch });
        }

        Ok(self
            .branches
            .iter()
            .zip(&self.xyzr)
            .map(|(branch, xyzr)| {
                let nseg = branch.nseg() as f64;
                (0..branch.nseg())
                    .map(|k| xyzr.point_at_fraction((k as f64 + 0.5) / nseg))
                    .collect()
            })
            .collect())
    }

    /// View restricted to one branch
    pub fn branch(&mut self, index: usize) -> DendraResult<BranchView<'_>> {
        BranchView::new(self, &[index])
    }

    /// View restricted to several branches
    pub fn select_branches(&mut self, indices: &[usize]) -> DendraResult<BranchView<'_>> {
        BranchView::new(self, indices)
    }

    /// Snapshot as JSON
    ///
    /// Unplaced positions are NaN, which JSON cannot carry, so the cell
    /// must be fully placed.
    pub fn to_json(&self) -> DendraResult<String> {
        if let Some(branch) = self.first_unplaced() {
            return Err(DendraError::UnplacedGeometry { branch });
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore from a JSON snapshot
    pub fn from_json(json: &str) -> DendraResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Movable for Cell {
    fn visit_xyzr_mut(&mut self, f: &mut dyn FnMut(&mut Xyzr)) {
        self.xyzr.iter_mut().for_each(|x| f(x));
    }

    fn move_to(&mut self, x: f64, y: f64, z: f64) -> DendraResult<()> {
        if let Some(branch) = self.first_unplaced() {
            return Err(DendraError::UnplacedGeometry { branch });
        }
        let [x0, y0, z0] = self.root_position();
        self.move_by(x - x0, y - y0, z - z0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Compartment;
    use dendra_core::RotationPlane;

    fn branch(nseg: usize) -> Branch {
        Branch::new(&Compartment::new(), nseg).unwrap()
    }

    fn explicit_cell() -> Cell {
        Cell::new(&branch(4), &[-1])
            .unwrap()
            .with_xyzr(vec![Xyzr::from_rows(&[
                [5.0, 10.0, 1.0, 10.0],
                [10.0, 15.0, 0.0, 10.0],
            ])
            .unwrap()])
            .unwrap()
    }

    #[test]
    fn test_move_cell() {
        let mut cell = Cell::new(&branch(4), &[-1, 0, 0, 1, 1]).unwrap();
        cell.compute_xyz();
        cell.move_by(20.0, 30.0, 5.0);
        assert_eq!(cell.xyzr()[0][(0, 0)], 20.0);
        assert_eq!(cell.xyzr()[0][(0, 1)], 30.0);
        assert_eq!(cell.xyzr()[0][(0, 2)], 5.0);
    }

    #[test]
    fn test_move_cell_with_explicit_xyzr() {
        let mut cell = explicit_cell();
        cell.move_by(6.0, 9.0, 3.0);
        assert_eq!(
            cell.xyzr()[0].as_flat(),
            &[11.0, 19.0, 4.0, 10.0, 16.0, 24.0, 3.0, 10.0]
        );
    }

    #[test]
    fn test_move_preserves_offsets_and_radius() {
        let mut cell = Cell::new(&branch(2), &[-1, 0, 0]).unwrap();
        cell.compute_xyz();
        let before = cell.clone();
        cell.move_by(1.5, -2.0, 7.25);

        for (a, b) in before.xyzr().iter().zip(cell.xyzr()) {
            for (s0, s1) in a.samples().iter().zip(b.samples()) {
                assert!((s1.x - s0.x - 1.5).abs() < 1e-12);
                assert!((s1.y - s0.y + 2.0).abs() < 1e-12);
                assert!((s1.z - s0.z - 7.25).abs() < 1e-12);
                assert_eq!(s1.radius, s0.radius);
            }
        }
    }

    #[test]
    fn test_move_to_cell() {
        let mut cell = Cell::new(&branch(4), &[-1, 0, 0, 1, 1]).unwrap();
        cell.compute_xyz();
        cell.move_to(20.0, 30.0, 5.0).unwrap();
        assert_eq!(cell.root_position(), [20.0, 30.0, 5.0]);
        assert_eq!(cell.xyzr()[0][(1, 0)], 60.0);

        let mut cell = explicit_cell();
        cell.move_to(6.0, 9.0, 3.0).unwrap();
        assert_eq!(cell.xyzr()[0][(0, 0)], 6.0);
        assert_eq!(cell.xyzr()[0][(0, 1)], 9.0);
        assert_eq!(cell.xyzr()[0][(0, 2)], 3.0);
        assert_eq!(cell.xyzr()[0][(0, 3)], 10.0);
        assert_eq!(cell.xyzr()[0][(1, 0)], 11.0);
    }

    #[test]
    fn test_move_to_unplaced_fails() {
        let mut cell = Cell::new(&branch(2), &[-1, 0]).unwrap();
        assert!(matches!(
            cell.move_to(1.0, 2.0, 3.0),
            Err(DendraError::UnplacedGeometry { branch: 0 })
        ));
        assert!(!cell.is_placed());
        assert_eq!(cell.xyzr()[0][(0, 3)], 1.0);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Cell::new(&branch(1), &[0, 0]),
            Err(DendraError::InvalidParents(_))
        ));
        assert!(matches!(
            Cell::from_branches(vec![branch(1)], &[-1, 0]),
            Err(DendraError::ShapeMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Cell::new(&branch(1), &[-1, 0]).unwrap().with_xyzr(Vec::new()),
            Err(DendraError::ShapeMismatch { expected: 2, actual: 0 })
        ));
    }

    #[test]
    fn test_rotate_keeps_radius() {
        let mut cell = explicit_cell();
        cell.rotate(180.0, RotationPlane::Xy);
        let s = cell.xyzr()[0].first();
        assert!((s.x + 5.0).abs() < 1e-9);
        assert!((s.y + 10.0).abs() < 1e-9);
        assert_eq!(s.z, 1.0);
        assert_eq!(s.radius, 10.0);
    }

    #[test]
    fn test_compartment_centers() {
        let mut cell = Cell::new(&branch(4), &[-1]).unwrap();
        assert!(cell.compartment_centers().is_err());

        cell.compute_xyz();
        cell.move_by(0.0, 1.0, 0.0);
        let centers = cell.compartment_centers().unwrap();
        assert_eq!(
            centers[0],
            vec![[5.0, 1.0, 0.0], [15.0, 1.0, 0.0], [25.0, 1.0, 0.0], [35.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_branch_view_moves_subset() {
        let mut cell = Cell::new(&branch(2), &[-1, 0, 0]).unwrap();
        cell.compute_xyz();
        let before = cell.clone();

        cell.branch(2).unwrap().move_by(0.0, 0.0, 4.0);
        assert_eq!(cell.xyzr()[0], before.xyzr()[0]);
        assert_eq!(cell.xyzr()[1], before.xyzr()[1]);
        assert_eq!(cell.xyzr()[2][(0, 2)], 4.0);
        assert!(cell.branch(3).is_err());
    }

    #[test]
    fn test_json_snapshot() {
        let mut cell = Cell::new(&branch(2), &[-1, 0, 0]).unwrap();
        cell.compute_xyz();
        let restored = Cell::from_json(&cell.to_json().unwrap()).unwrap();
        assert_eq!(restored, cell);
    }

    #[test]
    fn test_json_snapshot_requires_placed_geometry() {
        let mut cell = Cell::new(&branch(2), &[-1, 0]).unwrap();
        assert!(matches!(
            cell.to_json(),
            Err(DendraError::UnplacedGeometry { branch: 0 })
        ));

        cell.compute_xyz();
        assert!(Cell::from_json(&cell.to_json().unwrap()).is_ok());
    }

    #[test]
    fn test_json_rejects_empty_parts() {
        let empty_branch = r#"{"compartments":[]}"#;
        assert!(serde_json::from_str::<Branch>(empty_branch).is_err());

        let no_compartments = r#"{
            "branches": [{"compartments": []}],
            "parents": [-1],
            "xyzr": [{"samples": [{"x": 0.0, "y": 0.0, "z": 0.0, "radius": 1.0}]}]
        }"#;
        assert!(matches!(
            Cell::from_json(no_compartments),
            Err(DendraError::Serialization(_))
        ));

        let no_samples = r#"{
            "branches": [{"compartments": [{"length": 10.0, "radius": 1.0}]}],
            "parents": [-1],
            "xyzr": [{"samples": []}]
        }"#;
        assert!(Cell::from_json(no_samples).is_err());

        let bad_parents = r#"{
            "branches": [{"compartments": [{"length": 10.0, "radius": 1.0}]}],
            "parents": [0],
            "xyzr": [{"samples": [{"x": 0.0, "y": 0.0, "z": 0.0, "radius": 1.0}]}]
        }"#;
        assert!(Cell::from_json(bad_parents).is_err());

        let missing_xyzr = r#"{
            "branches": [{"compartments": [{"length": 10.0, "radius": 1.0}]}],
            "parents": [-1],
            "xyzr": []
        }"#;
        assert!(Cell::from_json(missing_xyzr).is_err());
    }
}
