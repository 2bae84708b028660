use crate::balanced;
use crate::error::KdError;
use crate::node::{Iter, Node};
use crate::point::Point;
use crate::search;
use log::{debug, log_enabled, trace, Level};
use rayon::prelude::*;

/// How a [`KdTree`] is built from a point set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildStrategy {
    /// Median-split construction over the whole set, depth `O(log n)`.
    #[default]
    Balanced,
    /// Repeated insertion in input order, no rebalancing.
    Incremental,
}

/// A k-d tree over points of one fixed dimension.
///
/// Dimension and emptiness are checked once at each public entry point; the
/// walks below them assume a consistent tree.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    root: Option<Box<Node>>,
    k: usize,
    len: usize,
}

impl KdTree {
    /// Creates an empty tree. Its dimension is fixed by the first insertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree with the given strategy.
    pub fn build(points: Vec<Point>, strategy: BuildStrategy) -> Result<Self, KdError> {
        match strategy {
            BuildStrategy::Balanced => Self::build_balanced(points),
            BuildStrategy::Incremental => Self::build_incremental(points),
        }
    }

    /// Builds a balanced tree by recursive median splitting.
    ///
    /// The points are consumed; pass a copy to keep the original ordering.
    pub fn build_balanced(points: Vec<Point>) -> Result<Self, KdError> {
        let k = common_dimension(&points)?;
        let len = points.len();
        let tree = Self {
            root: balanced::build(points, 0),
            k,
            len,
        };
        tree.log_built(BuildStrategy::Balanced);
        Ok(tree)
    }

    /// Builds a tree by inserting the points one at a time, in order.
    pub fn build_incremental<I>(points: I) -> Result<Self, KdError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = Self::new();
        for point in points {
            tree.insert(point)?;
        }
        if tree.is_empty() {
            return Err(KdError::EmptyInput);
        }
        tree.log_built(BuildStrategy::Incremental);
        Ok(tree)
    }

    /// Inserts a point without rebalancing.
    ///
    /// On an empty tree the point becomes the root and fixes `k`.
    pub fn insert(&mut self, point: Point) -> Result<(), KdError> {
        match self.root.as_mut() {
            None => {
                if point.k() == 0 {
                    return Err(KdError::ZeroDimension);
                }
                self.k = point.k();
                self.root = Some(Box::new(Node::new(point)));
            }
            Some(root) => {
                check_dimension(self.k, &point)?;
                root.insert(point, 0);
            }
        }
        self.len += 1;
        Ok(())
    }

    /// Membership by exact coordinate equality.
    ///
    /// Follows a single comparison path without backtracking, so it is complete
    /// for points added by [`KdTree::insert`]. In a balanced tree a point sharing
    /// its splitting coordinate with an ancestor may sit off that path.
    pub fn contains(&self, point: &Point) -> Result<bool, KdError> {
        let Some(root) = self.root.as_deref() else {
            return Ok(false);
        };
        check_dimension(self.k, point)?;
        Ok(root.search(point, 0))
    }

    /// Nearest node to `target`, `None` on an empty tree.
    pub fn nearest(&self, target: &Point) -> Result<Option<&Node>, KdError> {
        self.nearest_neighbor(target, None)
    }

    /// Nearest node to `target`, optionally recording every visited node in `trace`.
    pub fn nearest_neighbor<'a>(
        &'a self,
        target: &Point,
        trace: Option<&mut Vec<&'a Node>>,
    ) -> Result<Option<&'a Node>, KdError> {
        let Some(root) = self.root.as_deref() else {
            return Ok(None);
        };
        check_dimension(self.k, target)?;

        let result = search::nearest(root, target, trace);
        trace!(
            "nearest neighbor visited {} of {} nodes, distance {}",
            result.visited,
            self.len,
            result.distance()
        );
        Ok(result.node)
    }

    /// Answers many nearest-neighbor queries in parallel.
    ///
    /// The result at index `i` belongs to `targets[i]`.
    pub fn nearest_many(&self, targets: &[Point]) -> Result<Vec<Option<&Node>>, KdError> {
        if self.root.is_some() {
            for target in targets {
                check_dimension(self.k, target)?;
            }
        }
        debug!("answering {} nearest neighbor queries", targets.len());
        targets.par_iter().map(|target| self.nearest(target)).collect()
    }

    #[inline]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Dimension of the stored points, `0` while the tree is empty.
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels, `0` for an empty tree.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Pre-order iterator over all nodes.
    pub fn iter(&self) -> Iter<'_> {
        match self.root() {
            Some(root) => root.iter(),
            None => Iter::default(),
        }
    }

    fn log_built(&self, strategy: BuildStrategy) {
        if log_enabled!(Level::Debug) {
            debug!(
                "built {:?} k-d tree: {} points, k = {}, height = {}",
                strategy,
                self.len,
                self.k,
                self.height()
            );
        }
    }
}

impl<'a> IntoIterator for &'a KdTree {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

fn check_dimension(k: usize, point: &Point) -> Result<(), KdError> {
    if point.k() == k {
        Ok(())
    } else {
        Err(KdError::DimensionMismatch {
            expected: k,
            found: point.k(),
        })
    }
}

fn common_dimension(points: &[Point]) -> Result<usize, KdError> {
    let first = points.first().ok_or(KdError::EmptyInput)?;
    let k = first.k();
    if k == 0 {
        return Err(KdError::ZeroDimension);
    }
    for point in &points[1..] {
        check_dimension(k, point)?;
    }
    Ok(k)
}
