//! Disjoint-set forest (union-find)
//!
//! Path compression in `find` and union by rank in `union` keep both
//! operations near constant time. `find` walks iteratively, so deep chains
//! never exhaust the call stack.

use std::collections::HashMap;
use std::hash::Hash;

/// Partition of elements into disjoint sets
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    parent: HashMap<T, T>,
    rank: HashMap<T, u32>,
}

impl<T: Eq + Hash + Clone> DisjointSet<T> {
    /// One singleton set per element
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let mut set = Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
        };
        for element in elements {
            set.make_set(element);
        }
        set
    }

    /// Add `x` as its own singleton set. No-op if already present.
    pub fn make_set(&mut self, x: T) {
        if self.parent.contains_key(&x) {
            return;
        }
        self.parent.insert(x.clone(), x.clone());
        self.rank.insert(x, 0);
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn contains(&self, x: &T) -> bool {
        self.parent.contains_key(x)
    }

    pub fn rank(&self, x: &T) -> Option<u32> {
        self.rank.get(x).copied()
    }

    /// Representative of the set containing `x`.
    ///
    /// Every node on the walked path is re-pointed directly at the root.
    pub fn find(&mut self, x: &T) -> Option<T> {
        let mut root = self.parent.get(x)?.clone();
        loop {
            let next = &self.parent[&root];
            if *next == root {
                break;
            }
            root = next.clone();
        }

        let mut current = x.clone();
        while current != root {
            let next = self.parent.insert(current, root.clone())?;
            current = next;
        }

        Some(root)
    }

    /// Merge the sets containing `x` and `y`.
    ///
    /// Returns `false` when they already share a set or either element is
    /// unknown. On equal rank `x`'s root goes under `y`'s root.
    pub fn union(&mut self, x: &T, y: &T) -> bool {
        let (Some(rx), Some(ry)) = (self.find(x), self.find(y)) else {
            return false;
        };
        if rx == ry {
            return false;
        }

        let rank_x = self.rank[&rx];
        let rank_y = self.rank[&ry];

        if rank_x < rank_y {
            self.parent.insert(rx, ry);
        } else if rank_x > rank_y {
            self.parent.insert(ry, rx);
        } else {
            self.parent.insert(rx, ry.clone());
            self.rank.insert(ry, rank_y + 1);
        }

        true
    }

    pub fn same_set(&mut self, x: &T, y: &T) -> bool {
        match (self.find(x), self.find(y)) {
            (Some(rx), Some(ry)) => rx == ry,
            _ => false,
        }
    }
}
