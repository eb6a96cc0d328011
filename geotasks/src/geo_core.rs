use geo::{Area, BoundingRect, Intersects, MultiPolygon, Point, Polygon};

/// Read-only polygon capabilities needed to sample a grid over a boundary
/// Any geometry backend can implement it; `geo` polygons are provided below
pub trait BoundaryShape {
    /// Axis-aligned bounding box, `None` when the shape has no coordinates
    fn bounds(&self) -> Option<BoundingBox>;

    /// Boundary-inclusive point-in-polygon test, coordinates in (lng, lat)
    fn contains_point(&self, lng: f64, lat: f64) -> bool;

    /// True when the shape encloses no area
    fn is_empty(&self) -> bool;
}

impl BoundaryShape for Polygon<f64> {
    fn bounds(&self) -> Option<BoundingBox> {
        self.bounding_rect().map(BoundingBox::from)
    }

    fn contains_point(&self, lng: f64, lat: f64) -> bool {
        self.intersects(&Point::new(lng, lat))
    }

    fn is_empty(&self) -> bool {
        let area = self.unsigned_area();
        !area.is_finite() || area == 0.0
    }
}

impl BoundaryShape for MultiPolygon<f64> {
    fn bounds(&self) -> Option<BoundingBox> {
        self.bounding_rect().map(BoundingBox::from)
    }

    fn contains_point(&self, lng: f64, lat: f64) -> bool {
        let point = Point::new(lng, lat);
        self.0.iter().any(|polygon| polygon.intersects(&point))
    }

    fn is_empty(&self) -> bool {
        let area = self.unsigned_area();
        !area.is_finite() || area == 0.0
    }
}

/// Bounding box structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64, // min longitude
    pub min_y: f64, // min latitude
    pub max_x: f64, // max longitude
    pub max_y: f64, // max latitude
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Longitude extent in degrees
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Latitude extent in degrees
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center as (lng, lat)
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Inclusive on every edge
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        lng >= self.min_x && lng <= self.max_x && lat >= self.min_y && lat <= self.max_y
    }
}

impl From<geo::Rect<f64>> for BoundingBox {
    fn from(rect: geo::Rect<f64>) -> Self {
        BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}
