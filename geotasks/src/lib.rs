pub mod collect;
pub mod commons;
pub mod geo_core;
pub mod geometric;

pub use geo_core::{BoundaryShape, BoundingBox};
pub use geometric::boundary::{OsmBoundary, ShapeCombination};
pub use geometric::grid::{sample_grid, sample_grid_default, CentroidPoint, GridError};
