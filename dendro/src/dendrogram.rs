//! Structure hierarchy of a dendrogram
//!
//! A dendrogram is a forest of nested emission structures. Each structure has
//! at most one parent; leaves have no children. The voxel footprint is kept
//! as an index map in (l, b, v) order where every voxel holds the id of the
//! deepest structure containing it, or -1 for emission-free voxels. A
//! structure's full footprint is its own voxels plus those of all its
//! descendants.

use ndarray::Array3;

use crate::error::DendroError;

/// Value of the index map for voxels outside every structure
pub const NO_STRUCTURE: i32 = -1;

/// Parent and children of one structure
#[derive(Debug, Clone, PartialEq)]
struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Dendrogram hierarchy plus its voxel index map
#[derive(Debug, Clone)]
pub struct Dendrogram {
    nodes: Vec<Node>,
    index_map: Array3<i32>,
}

impl Dendrogram {
    /// Build a dendrogram from one parent link per structure.
    ///
    /// `parents[i]` is the parent of structure `i`. The index map must be in
    /// (l, b, v) order and reference only known structures.
    pub fn from_parents(
        parents: &[Option<usize>],
        index_map: Array3<i32>,
    ) -> Result<Self, DendroError> {
        let n = parents.len();
        let mut nodes: Vec<Node> = parents
            .iter()
            .map(|&parent| Node {
                parent,
                children: Vec::new(),
            })
            .collect();

        for (idx, parent) in parents.iter().enumerate() {
            if let Some(parent) = *parent {
                if parent >= n {
                    return Err(DendroError::UnknownParent { idx, parent });
                }
                nodes[parent].children.push(idx);
            }
        }

        // Walking up from any node must terminate within n steps
        for idx in 0..n {
            let mut current = nodes[idx].parent;
            let mut steps = 0;
            while let Some(p) = current {
                if p == idx || steps > n {
                    return Err(DendroError::Cycle(idx));
                }
                current = nodes[p].parent;
                steps += 1;
            }
        }

        if let Some(bad) = index_map
            .iter()
            .copied()
            .find(|&v| v != NO_STRUCTURE && (v < 0 || v as usize >= n))
        {
            return Err(DendroError::UnknownIndex(bad));
        }

        Ok(Self { nodes, index_map })
    }

    /// Number of structures
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Voxel index map in (l, b, v) order
    pub fn index_map(&self) -> &Array3<i32> {
        &self.index_map
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.nodes.get(idx).and_then(|n| n.parent)
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        self.nodes
            .get(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestors of `idx`, nearest first
    pub fn ancestors(&self, idx: usize) -> Ancestors<'_> {
        Ancestors {
            dendrogram: self,
            current: self.parent(idx),
        }
    }

    /// All descendants of `idx` (depth-first, not including `idx`)
    pub fn descendants(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.children(idx).to_vec();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend_from_slice(self.children(next));
        }
        out
    }

    /// Whether `ancestor` lies strictly above `idx` in the hierarchy
    pub fn is_ancestor(&self, ancestor: usize, idx: usize) -> bool {
        self.ancestors(idx).any(|a| a == ancestor)
    }
}

/// Iterator over the ancestors of a structure
pub struct Ancestors<'a> {
    dendrogram: &'a Dendrogram,
    current: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let here = self.current?;
        self.current = self.dendrogram.parent(here);
        Some(here)
    }
}
