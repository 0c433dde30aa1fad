//! Breadth-first closure over the depends-on relation.

use std::collections::btree_set;
use std::collections::BTreeSet;

use tracing::{debug, info, trace};

use crate::error::{ClosureError, ClosureResult};
use crate::lister::{DependencyLister, OtoolLister};

/// Computes dependency closures using a [`DependencyLister`] as the edge function.
#[derive(Debug, Clone, Default)]
pub struct ClosureResolver<L> {
    lister: L,
}

/// The set of paths reachable from a seed, seed included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    seed: String,
    paths: BTreeSet<String>,
    batches: usize,
}

impl<L: DependencyLister> ClosureResolver<L> {
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Expands `seed` until no new paths appear.
    ///
    /// Each distinct path is handed to the lister exactly once. A lister error
    /// aborts the walk and is returned unchanged.
    pub fn resolve(&self, seed: &str) -> ClosureResult<Closure> {
        if seed.is_empty() {
            return Err(ClosureError::EmptySeed);
        }

        let mut frontier = BTreeSet::from([seed.to_string()]);
        let mut visited = BTreeSet::new();
        let mut batches = 0;

        while !frontier.is_empty() {
            let batch = std::mem::take(&mut frontier);
            batches += 1;
            trace!(batch = batches, size = batch.len(), "expanding batch");

            for path in &batch {
                let deps = self.lister.list(path)?;
                debug!(path = path.as_str(), deps = deps.len(), "listed dependencies");
                frontier.extend(deps);
            }

            visited.extend(batch);
            frontier.retain(|path| !visited.contains(path));
        }

        info!(seed, paths = visited.len(), batches, "closure resolved");

        Ok(Closure {
            seed: seed.to_string(),
            paths: visited,
            batches,
        })
    }
}

impl Closure {
    /// The path the walk started from.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Iterates in ascending byte-wise order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.paths.iter()
    }

    /// Number of breadth-first rounds the walk took.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        self.paths.into_iter().collect()
    }
}

impl IntoIterator for Closure {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a Closure {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Resolves `seed` with the system `otool` and returns the sorted closure.
pub fn resolve(seed: &str) -> ClosureResult<Vec<String>> {
    ClosureResolver::new(OtoolLister::default())
        .resolve(seed)
        .map(Closure::into_sorted_vec)
}
