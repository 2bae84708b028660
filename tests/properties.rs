use kdnearest::{brute_force, point, BuildStrategy, KdTree, Node, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut StdRng, count: usize, k: usize) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new((0..k).map(|_| rng.gen_range(0.0..100.0)).collect()))
        .collect()
}

/// Points snapped to a coarse lattice so that ties on every axis are common.
fn lattice_points(rng: &mut StdRng, count: usize, k: usize) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new((0..k).map(|_| rng.gen_range(0..8) as f64).collect()))
        .collect()
}

/// Checks the splitting rule below `node` and returns the subtree's points.
///
/// `left_strict` demands `coord < split` on the left; otherwise `coord <= split`
/// is accepted, as balanced construction may put median ties on either side.
fn check_invariant(node: &Node, depth: usize, k: usize, left_strict: bool) -> Vec<Point> {
    let axis = depth % k;
    let split = node.pos()[axis];

    let mut points = vec![node.pos().clone()];
    if let Some(left) = node.left() {
        for p in check_invariant(left, depth + 1, k, left_strict) {
            if left_strict {
                assert!(
                    p[axis] < split,
                    "left point {:?} not below {} on axis {}",
                    p,
                    split,
                    axis
                );
            } else {
                assert!(
                    p[axis] <= split,
                    "left point {:?} above {} on axis {}",
                    p,
                    split,
                    axis
                );
            }
            points.push(p);
        }
    }
    if let Some(right) = node.right() {
        for p in check_invariant(right, depth + 1, k, left_strict) {
            assert!(
                p[axis] >= split,
                "right point {:?} below {} on axis {}",
                p,
                split,
                axis
            );
            points.push(p);
        }
    }
    points
}

fn same_shape(a: Option<&Node>, b: Option<&Node>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.pos() == b.pos()
                && same_shape(a.left(), b.left())
                && same_shape(a.right(), b.right())
        }
        _ => false,
    }
}

#[test]
fn test_invariant_after_construction() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(count, k) in &[(1, 1), (2, 2), (17, 2), (500, 3), (1000, 2), (300, 5)] {
        for points in [
            random_points(&mut rng, count, k),
            lattice_points(&mut rng, count, k),
        ] {
            let balanced = KdTree::build_balanced(points.clone()).unwrap();
            let collected = check_invariant(balanced.root().unwrap(), 0, k, false);
            assert_eq!(collected.len(), count);

            let incremental = KdTree::build_incremental(points.clone()).unwrap();
            let collected = check_invariant(incremental.root().unwrap(), 0, k, true);
            assert_eq!(collected.len(), count);
        }
    }
}

#[test]
fn test_nearest_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(42);
    for &count in &[1, 2, 3, 10, 64, 250, 1000, 2000] {
        for k in 1..=4 {
            let points = random_points(&mut rng, count, k);
            let targets = random_points(&mut rng, 25, k);

            for strategy in [BuildStrategy::Balanced, BuildStrategy::Incremental] {
                let tree = KdTree::build(points.clone(), strategy).unwrap();
                for target in &targets {
                    let found = tree.nearest(target).unwrap().expect("non-empty tree");
                    let (_, expected) = brute_force(&points, target).unwrap();
                    assert_eq!(
                        found.pos().sqr_distance(target),
                        expected,
                        "{:?} tree of {} points, k = {}, target {:?}",
                        strategy,
                        count,
                        k,
                        target
                    );
                }
            }
        }
    }
}

#[test]
fn test_nearest_with_duplicates_and_ties() {
    let mut rng = StdRng::seed_from_u64(3);
    let points = lattice_points(&mut rng, 800, 2);
    let targets = lattice_points(&mut rng, 100, 2);

    for strategy in [BuildStrategy::Balanced, BuildStrategy::Incremental] {
        let tree = KdTree::build(points.clone(), strategy).unwrap();
        for target in &targets {
            let found = tree.nearest(target).unwrap().unwrap();
            let (_, expected) = brute_force(&points, target).unwrap();
            assert_eq!(found.pos().sqr_distance(target), expected);
        }
    }
}

#[test]
fn test_incremental_membership() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = random_points(&mut rng, 1500, 3);
    let tree = KdTree::build_incremental(points.clone()).unwrap();

    for p in &points {
        assert!(tree.contains(p).unwrap(), "inserted point {:?} not found", p);
    }
    for p in random_points(&mut rng, 200, 3) {
        assert_eq!(tree.contains(&p).unwrap(), points.contains(&p));
    }
}

#[test]
fn test_membership_with_duplicates() {
    let mut rng = StdRng::seed_from_u64(5);
    let points = lattice_points(&mut rng, 400, 2);
    let tree = KdTree::build_incremental(points.clone()).unwrap();
    assert_eq!(tree.len(), 400);
    for p in &points {
        assert!(tree.contains(p).unwrap());
    }
    assert!(!tree.contains(&point![8.0, 8.0]).unwrap());
}

#[test]
fn test_balanced_construction_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    for points in [random_points(&mut rng, 700, 3), lattice_points(&mut rng, 700, 2)] {
        let a = KdTree::build_balanced(points.clone()).unwrap();
        let b = KdTree::build_balanced(points).unwrap();
        assert!(same_shape(a.root(), b.root()));
        assert_eq!(a.height(), b.height());
    }
}

#[test]
fn test_balanced_height() {
    let mut rng = StdRng::seed_from_u64(1);
    let points = random_points(&mut rng, 2000, 2);
    let tree = KdTree::build_balanced(points).unwrap();
    // floor(log2(2000)) + 1
    assert_eq!(tree.height(), 11);
}

#[test]
fn test_single_point_tree() {
    let mut rng = StdRng::seed_from_u64(8);
    let only = point![12.5, -3.0];
    for strategy in [BuildStrategy::Balanced, BuildStrategy::Incremental] {
        let tree = KdTree::build(vec![only.clone()], strategy).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert!(tree.root().unwrap().is_leaf());
        for target in random_points(&mut rng, 20, 2) {
            assert_eq!(tree.nearest(&target).unwrap().unwrap().pos(), &only);
        }
    }
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(21);
    let tree = KdTree::build_balanced(random_points(&mut rng, 2000, 3)).unwrap();
    let targets = random_points(&mut rng, 500, 3);

    let batch = tree.nearest_many(&targets).unwrap();
    assert_eq!(batch.len(), targets.len());
    for (target, found) in targets.iter().zip(&batch) {
        let sequential = tree.nearest(target).unwrap().unwrap();
        assert!(std::ptr::eq(found.unwrap(), sequential));
    }
}

#[test]
fn test_trace_is_sublinear_and_ordered() {
    let mut rng = StdRng::seed_from_u64(13);
    let tree = KdTree::build_balanced(random_points(&mut rng, 2000, 2)).unwrap();

    let mut total = 0;
    for target in random_points(&mut rng, 50, 2) {
        let mut trace = Vec::new();
        let found = tree.nearest_neighbor(&target, Some(&mut trace)).unwrap().unwrap();
        assert!(std::ptr::eq(trace[0], tree.root().unwrap()));
        assert!(trace.iter().any(|n| std::ptr::eq(*n, found)));
        total += trace.len();
    }
    // On uniform data the pruned search touches a small fraction of the tree.
    assert!(total / 50 < 200, "average of {} visited nodes", total / 50);
}

#[test]
fn test_sorted_insertion_chain_survives_queries_and_drop() {
    let count = 20_000;
    let mut tree = KdTree::new();
    for i in 0..count {
        tree.insert(point![i as f64]).unwrap();
    }
    assert_eq!(tree.len(), count);
    assert_eq!(tree.height(), count);

    let last = point![(count - 1) as f64];
    assert!(tree.contains(&last).unwrap());
    assert_eq!(tree.nearest(&point![1e9]).unwrap().unwrap().pos(), &last);
    assert_eq!(tree.nearest(&point![-5.0]).unwrap().unwrap().pos(), &point![0.0]);

    let copy = tree.clone();
    assert_eq!(copy.height(), count);
    drop(tree);
    drop(copy);
}
