mod edges;
mod geometry;
mod ids;

pub use edges::*;
pub use geometry::*;
pub use ids::*;
