//! Exact orthogonal range counting over a fixed point set.
//!
//! Two interchangeable implementations share the [`RangeCount`] interface:
//! [`SpatialRangeIndex`], a kd-tree with subtree counts whose native query
//! is closed on every side (open boundaries are emulated by an epsilon
//! nudge), and [`NaiveRangeIndex`], a linear scan with exact open/closed
//! semantics used for cross-checks and small inputs.

mod kdtree;
mod naive;
mod query;

pub use kdtree::SpatialRangeIndex;
pub use naive::NaiveRangeIndex;
pub use query::{RangeCount, RangeQuery};
