use crate::error::KdError;
use crate::node::Node;
use crate::point::{points_from_flat, Point};
use crate::tree::KdTree;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// The k-d tree as seen from JavaScript.
///
/// Points cross the boundary as flat coordinate arrays: `[x, y, x, y, ...]` for
/// `k = 2`. Queries return coordinates rather than nodes so that a canvas can
/// draw them directly.
#[wasm_bindgen]
pub struct KdIndex {
    inner: KdTree,
    k: usize,
}

#[wasm_bindgen]
impl KdIndex {
    /// Creates an empty index for points with `k` coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(k: usize) -> KdIndex {
        KdIndex {
            inner: KdTree::new(),
            k,
        }
    }

    /// Builds a balanced index from a flat array of coordinates.
    ///
    /// # Arguments
    /// * `points` - A flat array of coordinates, `k` values per point.
    /// * `k` - The number of coordinates per point.
    #[wasm_bindgen(js_name = buildBalanced)]
    pub fn build_balanced(points: &[f64], k: usize) -> Result<KdIndex, JsValue> {
        let points = points_from_flat(points, k).map_err(to_js)?;
        let inner = KdTree::build_balanced(points).map_err(to_js)?;
        Ok(KdIndex { inner, k })
    }

    /// Builds an index by inserting the points in array order.
    #[wasm_bindgen(js_name = buildIncremental)]
    pub fn build_incremental(points: &[f64], k: usize) -> Result<KdIndex, JsValue> {
        let points = points_from_flat(points, k).map_err(to_js)?;
        let inner = KdTree::build_incremental(points).map_err(to_js)?;
        Ok(KdIndex { inner, k })
    }

    pub fn insert(&mut self, point: &[f64]) -> Result<(), JsValue> {
        let point = self.point(point).map_err(to_js)?;
        self.inner.insert(point).map_err(to_js)
    }

    pub fn contains(&self, point: &[f64]) -> Result<bool, JsValue> {
        let point = self.point(point).map_err(to_js)?;
        self.inner.contains(&point).map_err(to_js)
    }

    /// Coordinates of the point nearest to `target`, empty if the index is empty.
    pub fn nearest(&self, target: &[f64]) -> Result<Vec<f64>, JsValue> {
        let target = self.point(target).map_err(to_js)?;
        let nearest = self.inner.nearest(&target).map_err(to_js)?;
        Ok(nearest.map(|n| n.pos().coords().to_vec()).unwrap_or_default())
    }

    /// Coordinates of every node the nearest-neighbor search visits, in order.
    ///
    /// The last `k` values are not necessarily the result; call `nearest` for that.
    #[wasm_bindgen(js_name = nearestTrace)]
    pub fn nearest_trace(&self, target: &[f64]) -> Result<Vec<f64>, JsValue> {
        let target = self.point(target).map_err(to_js)?;
        let mut visited = Vec::new();
        self.inner
            .nearest_neighbor(&target, Some(&mut visited))
            .map_err(to_js)?;
        Ok(flatten(&visited))
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn k(&self) -> usize {
        self.k
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    /// All stored points in pre-order, flattened.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        let nodes: Vec<&Node> = self.inner.iter().collect();
        flatten(&nodes)
    }
}

impl KdIndex {
    fn point(&self, coords: &[f64]) -> Result<Point, KdError> {
        if coords.len() != self.k {
            return Err(KdError::DimensionMismatch {
                expected: self.k,
                found: coords.len(),
            });
        }
        Ok(Point::from(coords))
    }
}

fn to_js(err: KdError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Concatenates the coordinates of `nodes`.
pub(crate) fn flatten(nodes: &[&Node]) -> Vec<f64> {
    nodes.iter().flat_map(|n| n.pos().coords().iter().copied()).collect()
}
