//! Branch - an unbranched cable of compartments.

use dendra_core::{DendraError, DendraResult};
use serde::{Deserialize, Serialize};

use crate::compartment::Compartment;

/// Ordered sequence of `nseg` compartments
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BranchRecord")]
pub struct Branch {
    compartments: Vec<Compartment>,
}

/// Unchecked serialized form of `Branch`
#[derive(Deserialize)]
struct BranchRecord {
    compartments: Vec<Compartment>,
}

impl TryFrom<BranchRecord> for Branch {
    type Error = DendraError;

    fn try_from(record: BranchRecord) -> DendraResult<Self> {
        Self::from_compartments(record.compartments)
    }
}

impl Branch {
    /// Branch of `nseg` copies of `comp`
    pub fn new(comp: &Compartment, nseg: usize) -> DendraResult<Self> {
        Self::from_compartments(vec![comp.clone(); nseg])
    }

    pub fn from_compartments(compartments: Vec<Compartment>) -> DendraResult<Self> {
        if compartments.is_empty() {
            return Err(DendraError::ShapeMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { compartments })
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    /// Number of compartments
    pub fn nseg(&self) -> usize {
        self.compartments.len()
    }

    /// Summed compartment length
    pub fn length(&self) -> f64 {
        self.compartments.iter().map(|c| c.length).sum()
    }

    /// Radius at the branch start
    pub fn radius(&self) -> f64 {
        self.compartments[0].radius
    }
}
