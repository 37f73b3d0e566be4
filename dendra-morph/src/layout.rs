//! # Default Layout
//!
//! Synthesizes coordinates for branches built from scratch. Each unplaced
//! branch becomes a straight two-sample segment:
//!
//! - the root starts at the origin and runs along +x
//! - a child starts at its parent's end point
//! - siblings fan out along y; the fan narrows with depth
//!
//! Segment length equals the branch's total compartment length. Branches
//! that already have coordinates are left as they are.

use dendra_core::{LayoutConfig, Xyzr};

use crate::cell::Cell;
use crate::tree;

/// Lay out every unplaced branch of `cell`; returns how many were placed
pub fn compute_xyz(cell: &mut Cell, layout: &LayoutConfig) -> usize {
    let parents = cell.parents().to_vec();
    let levels = tree::levels(&parents);
    let num_children = tree::num_children(&parents);
    let index_of_child = tree::index_of_child(&parents);
    let max_level = levels.iter().copied().max().unwrap_or(0);
    let multipliers = layout.multipliers(max_level);

    let mut endpoints: Vec<[f64; 3]> = Vec::with_capacity(parents.len());
    let mut placed = 0;

    for (b, &parent) in parents.iter().enumerate() {
        let current = &cell.xyzr()[b];
        if current.is_placed() {
            endpoints.push(current.last().position());
            continue;
        }

        let (start, y_offset) = if parent < 0 {
            ([0.0; 3], 0.0)
        } else {
            let p = parent as usize;
            let siblings = num_children[p];
            let y_offset = if siblings > 1 {
                (index_of_child[b] as f64 / (siblings - 1) as f64 - 0.5) * multipliers[levels[b]]
            } else {
                0.0
            };
            (endpoints[p], y_offset)
        };

        let length = cell.branches()[b].length();
        let norm = (y_offset * y_offset + 1.0).sqrt();
        let end = [
            start[0] + length / norm,
            start[1] + length / norm * y_offset,
            start[2],
        ];

        let radius = current.first().radius;
        cell.xyzr_mut()[b] = Xyzr::segment(start, end, radius);
        endpoints.push(end);
        placed += 1;
    }

    placed
}
