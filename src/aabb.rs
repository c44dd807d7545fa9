//! Axis-aligned bounding boxes used for the broad phase of the point location queries

use nalgebra::Vector3;

/// An axis-aligned bounding box given by its componentwise minimum and maximum corners
#[derive(Clone, Debug, PartialEq)]
pub struct AxisAlignedBoundingBox3d {
    min: Vector3<f64>,
    max: Vector3<f64>,
}

impl AxisAlignedBoundingBox3d {
    /// Constructs a bounding box from the given corners
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Constructs the smallest bounding box containing all of the given points
    pub fn from_points(points: &[Vector3<f64>]) -> Self {
        let mut min = Vector3::repeat(f64::INFINITY);
        let mut max = Vector3::repeat(f64::NEG_INFINITY);
        for point in points {
            min = min.inf(point);
            max = max.sup(point);
        }
        Self { min, max }
    }

    /// Returns the minimum corner of the bounding box
    pub fn min(&self) -> &Vector3<f64> {
        &self.min
    }

    /// Returns the maximum corner of the bounding box
    pub fn max(&self) -> &Vector3<f64> {
        &self.max
    }

    /// Returns the componentwise extents of the bounding box
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Grows the box on each axis by the given fraction of that axis' extent
    pub fn grow_relative(&mut self, factor: f64) {
        let margin = self.extents() * factor;
        self.min -= margin;
        self.max += margin;
    }

    /// Returns whether the given point is inside of the box (boundary included)
    pub fn contains_point(&self, point: &Vector3<f64>) -> bool {
        (0..3).all(|d| self.min[d] <= point[d] && point[d] <= self.max[d])
    }
}
