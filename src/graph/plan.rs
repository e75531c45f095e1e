//! Setup-time validation and ordering of the pass set.
//!
//! [`FramePlan::new`] verifies that every declared input key has exactly
//! one producer and that the dependency graph is acyclic, then fixes an
//! execution order in which every producer precedes its consumers. All of
//! this happens once at setup; the scheduler never re-validates at
//! runtime, and a broken pass set can never surface as a mid-frame error.

use rustc_hash::FxHashMap;

use crate::errors::{PrismError, Result};
use crate::graph::pass::PassDesc;

/// A validated, topologically ordered pass set.
///
/// Passes without mutual dependencies keep their declaration order; a pass
/// declared before its producer is reordered behind it.
#[derive(Debug)]
pub struct FramePlan {
    passes: Vec<PassDesc>,
}

impl FramePlan {
    /// Validates and orders the pass set.
    ///
    /// # Errors
    ///
    /// - [`PrismError::DuplicateProducer`] if two passes declare the same
    ///   output key.
    /// - [`PrismError::MissingProducer`] if an input key has no producer.
    /// - [`PrismError::CyclicDependency`] if no valid order exists.
    pub fn new(passes: Vec<PassDesc>) -> Result<Self> {
        let n = passes.len();

        let mut producers: FxHashMap<&str, usize> = FxHashMap::default();
        for (index, pass) in passes.iter().enumerate() {
            for key in pass.outputs() {
                if let Some(&first) = producers.get(key.as_str()) {
                    return Err(PrismError::DuplicateProducer {
                        key: key.as_str().to_owned(),
                        first: passes[first].name().to_owned(),
                        second: pass.name().to_owned(),
                    });
                }
                producers.insert(key.as_str(), index);
            }
        }

        let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut indegree = vec![0usize; n];
        for (index, pass) in passes.iter().enumerate() {
            for key in pass.inputs() {
                let Some(&producer) = producers.get(key.as_str()) else {
                    return Err(PrismError::MissingProducer {
                        pass: pass.name().to_owned(),
                        key: key.as_str().to_owned(),
                    });
                };
                if producer == index {
                    // A pass consuming its own output is a cycle of length one.
                    return Err(PrismError::CyclicDependency {
                        passes: vec![pass.name().to_owned()],
                    });
                }
                consumers[producer].push(index);
                indegree[index] += 1;
            }
        }

        // Kahn's algorithm; always advancing the lowest declaration index
        // keeps independent passes stable. Pass counts are single digits,
        // so the linear scan per step is fine.
        let mut order = Vec::with_capacity(n);
        let mut placed = vec![false; n];
        while order.len() < n {
            let Some(next) = (0..n).find(|&i| !placed[i] && indegree[i] == 0) else {
                let cycle: Vec<String> = passes
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !placed[*i])
                    .map(|(_, p)| p.name().to_owned())
                    .collect();
                return Err(PrismError::CyclicDependency { passes: cycle });
            };
            placed[next] = true;
            order.push(next);
            for &consumer in &consumers[next] {
                indegree[consumer] -= 1;
            }
        }

        let passes = order.into_iter().map(|i| passes[i].clone()).collect();
        Ok(Self { passes })
    }

    /// The passes in execution order.
    #[must_use]
    pub fn passes(&self) -> &[PassDesc] {
        &self.passes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}
