//! # kdnearest
//!
//! `kdnearest` is a Rust library for exact nearest-neighbor search over points in
//! k-dimensional space, designed to be used in Rust as well as compiled to WebAssembly
//! (WASM). It builds k-d trees and answers queries with branch-and-bound pruning.
//!
//! ## Features
//!
//! - **Two construction strategies**: balanced median-split construction for static point sets,
//!   and incremental insertion for points that arrive one at a time.
//! - **Exact queries**: membership by exact coordinate equality and nearest-neighbor search
//!   that prunes subtrees behind the splitting hyperplanes.
//! - **Search traces**: an optional accumulator receives every node a query visits, in order,
//!   for visualizing how the search walks the tree.
//! - **Parallel batches**: many queries against one immutable tree run on `rayon`.
//! - **WASM-first**: [`KdIndex`] exposes the tree to JavaScript through `wasm-bindgen`.
//!
//! ## Example
//!
//! ```
//! use kdnearest::{point, KdTree};
//!
//! let tree = KdTree::build_balanced(vec![
//!     point![1.0, 2.0],
//!     point![3.0, 4.0],
//!     point![5.0, 1.0],
//!     point![0.0, 0.0],
//! ])
//! .unwrap();
//!
//! let nearest = tree.nearest(&point![4.0, 4.0]).unwrap().unwrap();
//! assert_eq!(nearest.pos(), &point![3.0, 4.0]);
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct. The lower level building blocks,
//! [`Node`], [`build`] and [`nearest`], work on bare subtrees without any checks.

mod balanced;
mod error;
mod node;
mod point;
mod search;
mod tree;
mod wasm;

pub use balanced::build;
pub use error::KdError;
pub use node::Iter;
pub use node::Node;
pub use point::Point;
pub use point::distance;
pub use point::points_from_flat;
pub use point::sqr_distance;
pub use search::Nearest;
pub use search::brute_force;
pub use search::nearest;
pub use tree::BuildStrategy;
pub use tree::KdTree;
pub use wasm::KdIndex;
#[cfg(target_arch = "wasm32")]
pub use wasm::init_threads;
