//! # Dendra Morph
//!
//! Morphology containers for compartmental neuron models.
//!
//! The hierarchy composes bottom-up:
//! - **Compartment**: Atomic unit, carries length and radius
//! - **Branch**: Unbranched cable of `nseg` compartments
//! - **Cell**: Tree of branches described by a parent array
//! - **Network**: Ordered collection of independent cells
//!
//! Each branch of a cell owns one coordinate array (`Xyzr`). Networks
//! address branches by a flattened global index. Views (`CellView`,
//! `BranchView`) borrow their parent mutably and carry an index list, so
//! moving a view moves only the selected entities in place.
//!
//! ```
//! use dendra_core::Movable;
//! use dendra_morph::{Branch, Cell, Compartment, Network};
//!
//! let branch = Branch::new(&Compartment::new(), 2).unwrap();
//! let mut cell = Cell::new(&branch, &[-1, 0, 0]).unwrap();
//! cell.compute_xyz();
//!
//! let mut net = Network::replicate(&cell, 3);
//! net.move_cells_to(&[10.0, 20.0, 30.0], &[0.0; 3], &[0.0; 3]).unwrap();
//! assert_eq!(net.xyzr(3).unwrap()[(0, 0)], 20.0);
//!
//! net.cell(1).unwrap().move_by(1.0, 0.0, 0.0);
//! assert_eq!(net.xyzr(3).unwrap()[(0, 0)], 21.0);
//! assert_eq!(net.xyzr(0).unwrap()[(0, 0)], 10.0);
//! ```

pub mod branch;
pub mod cell;
pub mod compartment;
pub mod layout;
pub mod network;
pub mod tree;
pub mod view;

pub use branch::Branch;
pub use cell::Cell;
pub use compartment::Compartment;
pub use network::Network;
pub use view::{BranchView, CellView};
