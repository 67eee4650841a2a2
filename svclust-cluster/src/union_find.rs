use fxhash::FxHashMap;

/// Disjoint sets with path compression and union by rank.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x != root_y {
            if self.rank[root_x] < self.rank[root_y] {
                self.parent[root_x] = root_y;
            } else if self.rank[root_x] > self.rank[root_y] {
                self.parent[root_y] = root_x;
            } else {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }

    ///
    /// All sets as groups of element indices. Groups are ordered by their
    /// smallest element and each group is ascending, so the result does not
    /// depend on the union order.
    ///
    pub fn get_sets(&mut self) -> Vec<Vec<usize>> {
        let mut root_to_group: FxHashMap<usize, usize> = FxHashMap::default();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for i in 0..self.parent.len() {
            let root = self.find(i);
            let group = *root_to_group.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(i);
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::{assert_eq, assert_ne};
    use rstest::*;

    #[rstest]
    fn test_get_sets_ordered() {
        let mut uf = UnionFind::new(6);
        uf.union(5, 1);
        uf.union(3, 4);
        uf.union(4, 0);

        assert_eq!(uf.find(0), uf.find(3));
        assert_ne!(uf.find(1), uf.find(2));
        assert_eq!(uf.get_sets(), vec![vec![0, 3, 4], vec![1, 5], vec![2]]);
    }

    #[rstest]
    fn test_empty() {
        let mut uf = UnionFind::new(0);
        assert!(uf.get_sets().is_empty());
    }
}
