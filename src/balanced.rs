use crate::node::Node;
use crate::point::Point;
use std::cmp::Ordering;

/// Builds a depth-balanced subtree by median splitting, rooted at `depth`.
///
/// The input is consumed: each level stable-sorts its points on the axis
/// `depth % k`, takes the element at `len / 2` as the node and hands the
/// elements before and after it to the left and right subtrees. Points sharing
/// the median's coordinate may end up on either side.
///
/// Returns `None` for an empty input. All points must share the same `k`.
pub fn build(mut points: Vec<Point>, depth: usize) -> Option<Box<Node>> {
    let k = points.first()?.k();
    let axis = depth % k;

    points.sort_by(|a, b| a[axis].partial_cmp(&b[axis]).unwrap_or(Ordering::Equal));

    let median = points.len() / 2;
    let after = points.split_off(median + 1);
    let pos = points.pop()?;
    let before = points;

    Some(Box::new(Node::with_children(
        pos,
        build(before, depth + 1),
        build(after, depth + 1),
    )))
}
