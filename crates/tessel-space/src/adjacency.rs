//! Weighted adjacency matrices for network automata.

use crate::error::SpaceError;

/// A square matrix of non-negative edge weights over `n` nodes.
///
/// Node `j` is a neighbour of node `i` when `weight(i, j) > 0`. The
/// matrix need not be symmetric; [`from_edges`](Self::from_edges) builds
/// the undirected case.
#[derive(Clone, Debug, PartialEq)]
pub struct Adjacency {
    n: usize,
    weights: Vec<f64>,
}

impl Adjacency {
    /// Build from a dense row list.
    ///
    /// Every row must have `rows.len()` entries, each finite and
    /// non-negative.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SpaceError> {
        let n = rows.len();
        if n == 0 {
            return Err(SpaceError::EmptyNetwork);
        }
        let mut weights = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(SpaceError::NonSquareAdjacency {
                    nodes: n,
                    row: i,
                    len: row.len(),
                });
            }
            for (j, &w) in row.iter().enumerate() {
                if !w.is_finite() || w < 0.0 {
                    return Err(SpaceError::InvalidEdge {
                        from: i,
                        to: j,
                        reason: format!("weight must be finite and non-negative, got {w}"),
                    });
                }
            }
            weights.extend(row);
        }
        Ok(Self { n, weights })
    }

    /// Build an undirected unit-weight network from an edge list.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, SpaceError> {
        if n == 0 {
            return Err(SpaceError::EmptyNetwork);
        }
        let mut weights = vec![0.0; n * n];
        for &(a, b) in edges {
            if a >= n || b >= n {
                return Err(SpaceError::InvalidEdge {
                    from: a,
                    to: b,
                    reason: format!("network has {n} nodes"),
                });
            }
            weights[a * n + b] = 1.0;
            weights[b * n + a] = 1.0;
        }
        Ok(Self { n, weights })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Weight of edge `i -> j`, or `None` if either node is out of range.
    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.n || j >= self.n {
            return None;
        }
        Some(self.weights[i * self.n + j])
    }

    /// Whether `j` is a neighbour of `i`.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.weight(i, j).is_some_and(|w| w > 0.0)
    }

    /// Neighbours of `i` in ascending order. Empty for out-of-range `i`.
    pub fn neighbours(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let row = if i < self.n {
            &self.weights[i * self.n..(i + 1) * self.n]
        } else {
            &[][..]
        };
        row.iter()
            .enumerate()
            .filter(|&(_, &w)| w > 0.0)
            .map(|(j, _)| j)
    }

    /// Number of neighbours of `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.neighbours(i).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_validates() {
        assert_eq!(Adjacency::from_rows(vec![]), Err(SpaceError::EmptyNetwork));
        assert!(matches!(
            Adjacency::from_rows(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(SpaceError::NonSquareAdjacency { row: 1, len: 1, .. })
        ));
        assert!(matches!(
            Adjacency::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(SpaceError::InvalidEdge { from: 0, to: 1, .. })
        ));
    }

    #[test]
    fn path_graph_from_edges() {
        let a = Adjacency::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(a.node_count(), 3);
        assert_eq!(a.neighbours(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(a.degree(0), 1);
        assert!(a.is_adjacent(2, 1));
        assert!(!a.is_adjacent(0, 2));
        assert_eq!(a.weight(3, 0), None);
        assert_eq!(a.degree(7), 0);
    }

    #[test]
    fn from_edges_rejects_unknown_node() {
        assert!(matches!(
            Adjacency::from_edges(2, &[(0, 2)]),
            Err(SpaceError::InvalidEdge { .. })
        ));
    }

    #[test]
    fn directed_rows_are_kept() {
        let a = Adjacency::from_rows(vec![vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
        assert!(a.is_adjacent(0, 1));
        assert!(!a.is_adjacent(1, 0));
        assert_eq!(a.weight(0, 1), Some(2.0));
    }
}
