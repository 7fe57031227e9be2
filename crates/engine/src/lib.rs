//! Aggregation pipeline: fetch every (exchange, pair) price, pivot, render.

pub mod collect;
pub mod dashboard;
pub mod pivot;
pub mod render;

pub use collect::collect_observations;
pub use dashboard::{Dashboard, Snapshot};
pub use pivot::{pivot, TableError};
pub use render::{format_price, render_text};
