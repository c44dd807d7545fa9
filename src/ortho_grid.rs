//! The uniform voxel grid aligned with the build direction
//!
//! The grid lives in an orthonormal right-handed (u, v, w) frame with w pointing along the
//! build direction. Layer `k = 0` is the baseplate and layers stack upward along w. All grid
//! internal math is expressed in uvw coordinates; nodes are addressed either by an `(i, j, k)`
//! index triple or by the serialized index `i + j * nu + k * nu * nv`.

use arrayvec::ArrayVec;
use log::info;
use nalgebra::Vector3;

use crate::FilterError;

/// Tolerance of the orthonormality checks on the basis vectors
const BASIS_TOL: f64 = 1e-12;

/// Offsets of the eight corners of a hex element relative to its lowest corner, in the
/// canonical interpolation order
const HEX_CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// A uniform voxel grid over an axis-aligned box in an orthonormal (u, v, w) frame
#[derive(Clone, Debug)]
pub struct OrthoGrid {
    u_basis: Vector3<f64>,
    v_basis: Vector3<f64>,
    w_basis: Vector3<f64>,
    min_uvw: Vector3<f64>,
    max_uvw: Vector3<f64>,
    elements: [usize; 3],
}

impl OrthoGrid {
    /// Constructs a grid by discretizing the bounds with the given target edge length.
    ///
    /// The element count per axis is the extent divided by the edge length, rounded down and
    /// clamped to at least one element.
    pub fn from_edge_length(
        u_basis: &Vector3<f64>,
        v_basis: &Vector3<f64>,
        w_basis: &Vector3<f64>,
        min_uvw: &Vector3<f64>,
        max_uvw: &Vector3<f64>,
        target_edge_length: f64,
    ) -> Result<Self, FilterError> {
        check_basis(u_basis, v_basis, w_basis)?;
        check_bounds(min_uvw, max_uvw)?;
        if target_edge_length <= 0.0 {
            return Err(FilterError::InvalidEdgeLength(target_edge_length));
        }

        let mut elements = [0; 3];
        for axis in 0..3 {
            let extent = max_uvw[axis] - min_uvw[axis];
            elements[axis] = ((extent / target_edge_length).floor() as usize).max(1);
        }

        Ok(Self {
            u_basis: *u_basis,
            v_basis: *v_basis,
            w_basis: *w_basis,
            min_uvw: *min_uvw,
            max_uvw: *max_uvw,
            elements,
        })
    }

    /// Constructs a grid with an explicit element count per axis
    pub fn from_element_counts(
        u_basis: &Vector3<f64>,
        v_basis: &Vector3<f64>,
        w_basis: &Vector3<f64>,
        min_uvw: &Vector3<f64>,
        max_uvw: &Vector3<f64>,
        elements: [usize; 3],
    ) -> Result<Self, FilterError> {
        check_basis(u_basis, v_basis, w_basis)?;
        check_bounds(min_uvw, max_uvw)?;
        if elements.iter().any(|&count| count == 0) {
            return Err(FilterError::InvalidElementCount { counts: elements });
        }

        Ok(Self {
            u_basis: *u_basis,
            v_basis: *v_basis,
            w_basis: *w_basis,
            min_uvw: *min_uvw,
            max_uvw: *max_uvw,
            elements,
        })
    }

    /// Returns the number of grid nodes along each axis (one more than the element count)
    pub fn dimensions(&self) -> [usize; 3] {
        [
            self.elements[0] + 1,
            self.elements[1] + 1,
            self.elements[2] + 1,
        ]
    }

    /// Returns the total number of grid nodes
    pub fn node_count(&self) -> usize {
        let [nu, nv, nw] = self.dimensions();
        nu * nv * nw
    }

    /// Returns the grid spacing along the given axis
    fn spacing(&self, axis: usize) -> f64 {
        (self.max_uvw[axis] - self.min_uvw[axis]) / self.elements[axis] as f64
    }

    /// Logs the essential grid properties on the info level
    pub fn log_grid_info(&self) {
        info!(
            "Grid dimensions: {:?} nodes, spacing: ({}, {}, {}), uvw bounds: {:?} to {:?}",
            self.dimensions(),
            self.spacing(0),
            self.spacing(1),
            self.spacing(2),
            self.min_uvw,
            self.max_uvw,
        );
    }

    /// Returns the serialized index of the grid node `(i, j, k)`, i.e. `i + j * nu + k * nu * nv`
    pub fn serialized_index(&self, i: usize, j: usize, k: usize) -> Result<usize, FilterError> {
        self.check_node_index(i, j, k)?;
        Ok(self.node_index_unchecked(i, j, k))
    }

    pub(crate) fn node_index_unchecked(&self, i: usize, j: usize, k: usize) -> usize {
        let [nu, nv, _] = self.dimensions();
        i + j * nu + k * nu * nv
    }

    fn check_node_index(&self, i: usize, j: usize, k: usize) -> Result<(), FilterError> {
        let dimensions = self.dimensions();
        if i >= dimensions[0] || j >= dimensions[1] || k >= dimensions[2] {
            return Err(FilterError::GridIndexOutOfRange { i, j, k, dimensions });
        }
        Ok(())
    }

    /// Returns the uvw coordinates of the grid node `(i, j, k)`
    pub fn node_uvw(&self, i: usize, j: usize, k: usize) -> Result<Vector3<f64>, FilterError> {
        self.check_node_index(i, j, k)?;
        Ok(self.node_uvw_unchecked(i, j, k))
    }

    fn node_uvw_unchecked(&self, i: usize, j: usize, k: usize) -> Vector3<f64> {
        Vector3::new(
            self.min_uvw.x + i as f64 * self.spacing(0),
            self.min_uvw.y + j as f64 * self.spacing(1),
            self.min_uvw.z + k as f64 * self.spacing(2),
        )
    }

    /// Returns the xyz coordinates of the grid node `(i, j, k)`
    pub fn node_xyz(&self, i: usize, j: usize, k: usize) -> Result<Vector3<f64>, FilterError> {
        self.check_node_index(i, j, k)?;
        Ok(self.node_xyz_unchecked(i, j, k))
    }

    fn node_xyz_unchecked(&self, i: usize, j: usize, k: usize) -> Vector3<f64> {
        let uvw = self.node_uvw_unchecked(i, j, k);
        self.u_basis * uvw.x + self.v_basis * uvw.y + self.w_basis * uvw.z
    }

    /// Returns the xyz coordinates of every grid node in serialized index order
    pub fn grid_point_coordinates(&self) -> Vec<Vector3<f64>> {
        let [nu, nv, nw] = self.dimensions();
        let mut coordinates = Vec::with_capacity(nu * nv * nw);
        for k in 0..nw {
            for j in 0..nv {
                for i in 0..nu {
                    coordinates.push(self.node_xyz_unchecked(i, j, k));
                }
            }
        }
        coordinates
    }

    /// Returns the uvw coordinates of an arbitrary point, i.e. its projections onto the three
    /// basis vectors
    pub fn point_uvw(&self, point: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            self.u_basis.dot(point),
            self.v_basis.dot(point),
            self.w_basis.dot(point),
        )
    }

    /// Returns the pair of 1-D node indices surrounding the given point on one axis.
    ///
    /// The pair is clamped so that it always addresses a valid element: points below the lower
    /// bound map to `(0, 1)` and points on or above the upper bound to `(n - 2, n - 1)`. For a
    /// point exactly on an interior node the lower index is that node.
    pub fn surrounding_indices(&self, axis: usize, point: &Vector3<f64>) -> [usize; 2] {
        let uvw = self.point_uvw(point);
        let offset = (uvw[axis] - self.min_uvw[axis]) / self.spacing(axis);
        let lower = (offset.floor().max(0.0) as usize).min(self.elements[axis] - 1);
        [lower, lower + 1]
    }

    /// Returns the eight corner indices of the grid element containing the given point, in the
    /// canonical interpolation order
    pub fn containing_element(&self, point: &Vector3<f64>) -> [[usize; 3]; 8] {
        let i = self.surrounding_indices(0, point);
        let j = self.surrounding_indices(1, point);
        let k = self.surrounding_indices(2, point);

        let mut corners = [[0; 3]; 8];
        for (corner, offset) in corners.iter_mut().zip(HEX_CORNER_OFFSETS) {
            *corner = [i[offset[0]], j[offset[1]], k[offset[2]]];
        }
        corners
    }

    /// Returns the support neighbourhood of the grid node `(i, j, k)`: the nodes on the layer
    /// immediately below it that count as valid supporters for printability.
    ///
    /// The baseplate layer `k = 0` has no supporters. Elsewhere the set holds the node directly
    /// below and its in-range face neighbours, i.e. three nodes at grid corners, four on grid
    /// edges and five in the interior.
    pub fn support_indices(
        &self,
        i: usize,
        j: usize,
        k: usize,
    ) -> Result<ArrayVec<[usize; 3], 5>, FilterError> {
        self.check_node_index(i, j, k)?;
        let [nu, nv, _] = self.dimensions();

        let mut support = ArrayVec::new();
        if k == 0 {
            return Ok(support);
        }

        support.push([i, j, k - 1]);
        if j >= 1 {
            support.push([i, j - 1, k - 1]);
        }
        if j + 1 < nv {
            support.push([i, j + 1, k - 1]);
        }
        if i >= 1 {
            support.push([i - 1, j, k - 1]);
        }
        if i + 1 < nu {
            support.push([i + 1, j, k - 1]);
        }
        Ok(support)
    }

    /// Computes the trilinear interpolation weights of the given point within the hex element
    /// spanned by the corner indices.
    ///
    /// The corners have to be passed in the canonical order of [OrthoGrid::containing_element];
    /// the weights are the values of the eight trilinear shape functions at the point, matching
    /// the corners index by index.
    pub fn trilinear_weights(
        &self,
        corners: &[[usize; 3]; 8],
        point: &Vector3<f64>,
    ) -> Result<[f64; 8], FilterError> {
        let [i, j, k] = corners[0];
        for (corner, offset) in corners.iter().zip(HEX_CORNER_OFFSETS) {
            if *corner != [i + offset[0], j + offset[1], k + offset[2]] {
                return Err(FilterError::NonCanonicalHexCorners);
            }
        }
        for corner in corners {
            self.check_node_index(corner[0], corner[1], corner[2])?;
        }

        let lower = self.node_uvw_unchecked(i, j, k);
        let upper = self.node_uvw_unchecked(i + 1, j + 1, k + 1);
        let uvw = self.point_uvw(point);
        let xi = (uvw.x - lower.x) / (upper.x - lower.x);
        let eta = (uvw.y - lower.y) / (upper.y - lower.y);
        let zeta = (uvw.z - lower.z) / (upper.z - lower.z);

        Ok([
            (1.0 - xi) * (1.0 - eta) * (1.0 - zeta),
            xi * (1.0 - eta) * (1.0 - zeta),
            (1.0 - xi) * eta * (1.0 - zeta),
            xi * eta * (1.0 - zeta),
            (1.0 - xi) * (1.0 - eta) * zeta,
            xi * (1.0 - eta) * zeta,
            (1.0 - xi) * eta * zeta,
            xi * eta * zeta,
        ])
    }

    /// Trilinearly interpolates a scalar from the eight corners of a hex element to the given
    /// point. The corner values match the corner indices index by index.
    pub fn interpolate_scalar(
        &self,
        corners: &[[usize; 3]; 8],
        values: &[f64; 8],
        point: &Vector3<f64>,
    ) -> Result<f64, FilterError> {
        let weights = self.trilinear_weights(corners, point)?;
        Ok(weights
            .iter()
            .zip(values)
            .map(|(weight, value)| weight * value)
            .sum())
    }
}

fn check_basis(
    u_basis: &Vector3<f64>,
    v_basis: &Vector3<f64>,
    w_basis: &Vector3<f64>,
) -> Result<(), FilterError> {
    for basis in [u_basis, v_basis, w_basis] {
        let norm = basis.norm();
        if (norm - 1.0).abs() > BASIS_TOL {
            return Err(FilterError::BasisNotUnitLength { norm });
        }
    }
    for (a, b) in [(u_basis, v_basis), (u_basis, w_basis), (v_basis, w_basis)] {
        let dot = a.dot(b);
        if dot.abs() > BASIS_TOL {
            return Err(FilterError::BasisNotOrthogonal { dot });
        }
    }
    if u_basis.cross(v_basis).dot(w_basis) <= 0.0 {
        return Err(FilterError::BasisNotRightHanded);
    }
    Ok(())
}

fn check_bounds(min_uvw: &Vector3<f64>, max_uvw: &Vector3<f64>) -> Result<(), FilterError> {
    for axis in 0..3 {
        if min_uvw[axis] >= max_uvw[axis] {
            return Err(FilterError::InvalidBounds { axis });
        }
    }
    Ok(())
}
