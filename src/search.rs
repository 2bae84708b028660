use crate::node::Node;
use crate::point::Point;

/// Result of a nearest-neighbor descent.
#[derive(Clone, Copy, Debug)]
pub struct Nearest<'a> {
    /// Closest node found, `None` only if no distance was comparable (NaN coordinates).
    pub node: Option<&'a Node>,
    /// Squared distance from the target to `node`, `+infinity` when absent.
    pub sqr_distance: f64,
    /// Number of nodes visited.
    pub visited: usize,
}

impl<'a> Nearest<'a> {
    fn new() -> Self {
        Self {
            node: None,
            sqr_distance: f64::INFINITY,
            visited: 0,
        }
    }

    /// Euclidean distance from the target to the nearest node.
    pub fn distance(&self) -> f64 {
        self.sqr_distance.sqrt()
    }
}

/// Exact nearest-neighbor search below `root`, which sits at depth 0.
///
/// Branch-and-bound: the child on the target's side of the splitting hyperplane
/// is searched first, and the other child only if the hyperplane is closer than
/// the best candidate so far. Works on balanced and incrementally grown trees
/// alike since it only relies on the axis-cycling layout.
///
/// When `trace` is given, every visited node is appended in visitation order.
/// The trace has no influence on the result.
pub fn nearest<'a>(
    root: &'a Node,
    target: &Point,
    mut trace: Option<&mut Vec<&'a Node>>,
) -> Nearest<'a> {
    let mut best = Nearest::new();

    // Pending subtrees with their depth. A far child carries the squared distance
    // from the target to its splitting hyperplane and is only entered if that is
    // still below the best distance when it is popped.
    let mut stack: Vec<(&'a Node, usize, Option<f64>)> = vec![(root, 0, None)];
    while let Some((node, depth, plane)) = stack.pop() {
        if !plane.is_none_or(|plane| plane < best.sqr_distance) {
            continue;
        }

        best.visited += 1;
        if let Some(trace) = trace.as_deref_mut() {
            trace.push(node);
        }

        let d = node.pos().sqr_distance(target);
        if d < best.sqr_distance {
            best.node = Some(node);
            best.sqr_distance = d;
        }

        // A leaf is the best of its own subtree.
        if node.is_leaf() {
            continue;
        }

        let axis = depth % target.k();
        let diff = target[axis] - node.pos()[axis];
        let (near, far) = if diff < 0.0 {
            (node.left(), node.right())
        } else {
            (node.right(), node.left())
        };

        // Far first so the near subtree is finished before the far bound is tested.
        if let Some(far) = far {
            stack.push((far, depth + 1, Some(diff * diff)));
        }
        if let Some(near) = near {
            stack.push((near, depth + 1, None));
        }
    }
    best
}

/// Linear scan over `points`, used as the reference for tree queries.
pub fn brute_force<'a>(points: &'a [Point], target: &Point) -> Option<(&'a Point, f64)> {
    points
        .iter()
        .map(|p| (p, p.sqr_distance(target)))
        .filter(|(_, d)| !d.is_nan())
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
