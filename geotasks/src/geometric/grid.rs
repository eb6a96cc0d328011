//! Equidistant centroid grid over an administrative boundary
//!
//! Candidate points sit on a regular lattice anchored at the south-west
//! corner of the boundary's bounding box. The lattice step is
//! `2 * radius - overlap` meters, converted to degrees on a spherical earth
//! without longitude scaling, so east-west spacing shrinks (in meters) as
//! latitude grows. Only points inside or on the boundary are kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::commons::units::{km_to_degrees, m_to_km};
use crate::geo_core::BoundaryShape;

/// Ratios at most this many ULPs above a positive integer are snapped down
/// before `ceil`, absorbing the rounding of the meters to degrees conversion
const LATTICE_RATIO_ULPS: f64 = 4.0;

/// Lattices with more nodes than this are logged as a warning
const LARGE_LATTICE_NODES: usize = 100_000_000;

/// Errors reported before any grid point is enumerated
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    #[error("invalid radius {radius_m} m: the grid step must be a positive finite number of degrees")]
    InvalidRadius { radius_m: f64 },
    #[error("invalid overlap {overlap_m} m: must be in [0, {max_m}) m")]
    InvalidOverlap { overlap_m: f64, max_m: f64 },
    #[error("boundary polygon has no area")]
    EmptyPolygon,
}

/// A grid point inside the boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidPoint {
    pub lat: f64,
    pub lng: f64,
}

impl CentroidPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        CentroidPoint { lat, lng }
    }

    /// As a `geo` point (x = lng, y = lat)
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

impl From<CentroidPoint> for (f64, f64) {
    fn from(point: CentroidPoint) -> Self {
        (point.lat, point.lng)
    }
}

/// Grid step in decimal degrees for a radius and overlap in meters
pub fn step_degrees(radius_m: f64, overlap_m: f64) -> Result<f64, GridError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(GridError::InvalidRadius { radius_m });
    }

    let max_overlap_m = 2.0 * radius_m;
    if !overlap_m.is_finite() || overlap_m < 0.0 || overlap_m >= max_overlap_m {
        return Err(GridError::InvalidOverlap {
            overlap_m,
            max_m: max_overlap_m,
        });
    }

    let step_m = max_overlap_m - overlap_m;
    let step_deg = km_to_degrees(m_to_km(step_m));
    if !step_deg.is_finite() || step_deg <= 0.0 {
        return Err(GridError::InvalidRadius { radius_m });
    }

    Ok(step_deg)
}

/// Number of lattice values in `[start, start + extent)` with the given step
///
/// Same length as a half-open float `arange`: `ceil(extent / step)`.
pub fn lattice_count(extent: f64, step: f64) -> usize {
    let ratio = extent / step;
    if !ratio.is_finite() || extent <= 0.0 || step <= 0.0 {
        return 0;
    }
    let nearest = ratio.round();
    if nearest >= 1.0
        && ratio > nearest
        && ratio - nearest <= LATTICE_RATIO_ULPS * f64::EPSILON * nearest
    {
        return nearest as usize;
    }
    ratio.ceil() as usize
}

/// Sample an approximately equidistant grid of points inside `shape`
///
/// Points are returned as (lat, lng) in row-major order: latitude ascending,
/// then longitude ascending within a row.
pub fn sample_grid<S>(shape: &S, radius_m: f64, overlap_m: f64) -> Result<Vec<CentroidPoint>, GridError>
where
    S: BoundaryShape + ?Sized,
{
    let step_deg = step_degrees(radius_m, overlap_m)?;

    if shape.is_empty() {
        return Err(GridError::EmptyPolygon);
    }
    let bbox = shape.bounds().ok_or(GridError::EmptyPolygon)?;

    let rows = lattice_count(bbox.height(), step_deg);
    let cols = lattice_count(bbox.width(), step_deg);
    debug!(
        "Sampling grid: step={:.6}° ({} m radius, {} m overlap), lattice {}x{}",
        step_deg, radius_m, overlap_m, rows, cols
    );
    let nodes = rows.saturating_mul(cols);
    if nodes > LARGE_LATTICE_NODES {
        warn!(
            "Grid of {} nodes ({}x{}) for a {} m radius, sampling may take a long time",
            nodes, rows, cols, radius_m
        );
    }

    let mut centroids = Vec::new();
    for row in 0..rows {
        let lat = bbox.min_y + row as f64 * step_deg;
        for col in 0..cols {
            let lng = bbox.min_x + col as f64 * step_deg;
            if shape.contains_point(lng, lat) {
                centroids.push(CentroidPoint::new(lat, lng));
            }
        }
    }

    debug!("Kept {} of {} grid points", centroids.len(), nodes);
    Ok(centroids)
}

/// [`sample_grid`] without overlap
pub fn sample_grid_default<S>(shape: &S, radius_m: f64) -> Result<Vec<CentroidPoint>, GridError>
where
    S: BoundaryShape + ?Sized,
{
    sample_grid(shape, radius_m, 0.0)
}
