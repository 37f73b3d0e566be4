//! Tree helpers over parent arrays.
//!
//! A parent array lists, for each branch, the index of its parent branch
//! or `-1` for the root. Branch 0 is the only root and every parent index
//! precedes its child.

use dendra_core::{DendraError, DendraResult};

/// Check that `parents` describes a single rooted tree in topological order
pub fn validate(parents: &[i64]) -> DendraResult<()> {
    match parents.first() {
        None => return Err(DendraError::InvalidParents("no branches".into())),
        Some(&p) if p != -1 => {
            return Err(DendraError::InvalidParents(format!(
                "branch 0 must be the root (-1), got {}",
                p
            )))
        }
        _ => {}
    }

    for (b, &p) in parents.iter().enumerate().skip(1) {
        if p < 0 || p as usize >= b {
            return Err(DendraError::InvalidParents(format!(
                "branch {} has parent {}, expected 0..{}",
                b, p, b
            )));
        }
    }
    Ok(())
}

/// Depth of every branch (root = 0)
pub fn levels(parents: &[i64]) -> Vec<usize> {
    let mut levels = vec![0usize; parents.len()];
    for (b, &p) in parents.iter().enumerate() {
        if p >= 0 {
            levels[b] = levels[p as usize] + 1;
        }
    }
    levels
}

/// Number of direct children of every branch
pub fn num_children(parents: &[i64]) -> Vec<usize> {
    let mut counts = vec![0usize; parents.len()];
    for &p in parents {
        if p >= 0 {
            counts[p as usize] += 1;
        }
    }
    counts
}

/// Position of every branch among its siblings (root = 0)
pub fn index_of_child(parents: &[i64]) -> Vec<usize> {
    let mut seen = vec![0usize; parents.len()];
    parents
        .iter()
        .map(|&p| {
            if p < 0 {
                return 0;
            }
            let idx = seen[p as usize];
            seen[p as usize] += 1;
            idx
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENTS: [i64; 5] = [-1, 0, 0, 1, 1];

    #[test]
    fn test_validate() {
        assert!(validate(&PARENTS).is_ok());
        assert!(validate(&[-1]).is_ok());
        assert!(validate(&[]).is_err());
        assert!(validate(&[0]).is_err());
        assert!(validate(&[-1, -1]).is_err());
        assert!(validate(&[-1, 2, 0]).is_err());
    }

    #[test]
    fn test_levels() {
        assert_eq!(levels(&PARENTS), vec![0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_num_children() {
        assert_eq!(num_children(&PARENTS), vec![2, 2, 0, 0, 0]);
    }

    #[test]
    fn test_index_of_child() {
        assert_eq!(index_of_child(&PARENTS), vec![0, 0, 1, 0, 1]);
    }
}
