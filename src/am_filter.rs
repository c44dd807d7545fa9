//! The additive manufacturing printability filter
//!
//! The filter maps a per-node blueprint density on a tetrahedral mesh to a printable density in
//! which every material point is supported from below, layer by layer. It composes three
//! stages over an auxiliary voxel grid aligned with the build direction:
//!
//! 1. resample the blueprint density onto the grid (barycentric interpolation at each grid node
//!    sitting inside a tet, zero outside of the mesh),
//! 2. run the per-layer printability recursion on the grid: the support density of a node is
//!    the smoothed maximum of the printable densities over its support set on the layer below
//!    (one on the baseplate), and its printable density is the smoothed minimum of blueprint
//!    and support density,
//! 3. resample the grid printable density back onto the tet nodes (trilinear interpolation from
//!    the containing hex element).
//!
//! The recursion is strictly sequential across layers; within a layer, and within the two
//! resampling stages, all nodes are independent. Since every stage is smooth, a sensitivity
//! defined on the printable field can be pulled back onto the blueprint field by the adjoint
//! operations, sweeping the layers in reverse.

use arrayvec::ArrayVec;
use nalgebra::Vector3;
use rayon::prelude::*;

use crate::smoothing::{
    smooth_max, smooth_max_gradient, smooth_min, smooth_min_partials, SMOOTH_MIN_EPSILON,
};
use crate::workspace::{FilterWorkspace, LocalFilterWorkspace};
use crate::{FilterError, OrthoGrid, ParallelVector, TetMesh};

/// The printability filter over a tetrahedral mesh and an orthogonal grid.
///
/// Borrows the mesh and the grid; both are read-only after construction and may be shared
/// freely across concurrent filter evaluations. The xyz position of every grid node and the
/// index of the tet containing it are computed once at construction and cached for the
/// lifetime of the filter.
pub struct AmFilter<'a> {
    mesh: &'a TetMesh,
    grid: &'a OrthoGrid,
    p_norm: f64,
    grid_point_coordinates: Vec<Vector3<f64>>,
    containing_tets: Vec<Option<usize>>,
}

impl<'a> AmFilter<'a> {
    /// Constructs the filter and precomputes the grid point coordinates and the containing tet
    /// of every grid node. The p-norm controls the smoothed maximum of the layer recursion and
    /// must be at least one.
    pub fn new(mesh: &'a TetMesh, grid: &'a OrthoGrid, p_norm: f64) -> Result<Self, FilterError> {
        if p_norm < 1.0 {
            return Err(FilterError::InvalidPNorm(p_norm));
        }

        let grid_point_coordinates = grid.grid_point_coordinates();
        let containing_tets = mesh.containing_tets(&grid_point_coordinates);

        Ok(Self {
            mesh,
            grid,
            p_norm,
            grid_point_coordinates,
            containing_tets,
        })
    }

    /// Returns the cached xyz coordinates of every grid node in serialized index order
    pub fn grid_point_coordinates(&self) -> &[Vector3<f64>] {
        &self.grid_point_coordinates
    }

    /// Returns the cached containing tet of every grid node, `None` for nodes outside of the
    /// mesh
    pub fn containing_tets(&self) -> &[Option<usize>] {
        &self.containing_tets
    }

    fn check_grid_length(&self, actual: usize) -> Result<(), FilterError> {
        let expected = self.grid.node_count();
        if actual != expected {
            return Err(FilterError::LengthMismatch { expected, actual });
        }
        Ok(())
    }

    fn check_tet_length(&self, actual: usize) -> Result<(), FilterError> {
        let expected = self.mesh.node_count();
        if actual != expected {
            return Err(FilterError::LengthMismatch { expected, actual });
        }
        Ok(())
    }

    fn check_layer(&self, k: usize) -> Result<(), FilterError> {
        let layer_count = self.grid.dimensions()[2];
        if k >= layer_count {
            return Err(FilterError::LayerOutOfRange {
                layer: k,
                layer_count,
            });
        }
        Ok(())
    }

    fn node_blueprint_density(
        &self,
        node: usize,
        tet_density: &[f64],
    ) -> Result<f64, FilterError> {
        match self.containing_tets[node] {
            None => Ok(0.0),
            Some(tet_index) => {
                let tet = &self.mesh.tets()[tet_index];
                let weights = self
                    .mesh
                    .barycentric_coordinates(tet, &self.grid_point_coordinates[node])?;
                Ok(weights
                    .iter()
                    .zip(tet)
                    .map(|(weight, &tet_node)| weight * tet_density[tet_node])
                    .sum())
            }
        }
    }

    /// Computes the grid blueprint density from the tet mesh blueprint density.
    ///
    /// Each grid node takes the barycentric interpolation of the density at the four nodes of
    /// its containing tet, or zero for grid nodes outside of the mesh.
    pub fn grid_blueprint_density<V: ParallelVector>(
        &self,
        tet_density: &V,
    ) -> Result<Vec<f64>, FilterError> {
        let mut grid_density = Vec::new();
        self.grid_blueprint_density_inplace(tet_density, &mut grid_density)?;
        Ok(grid_density)
    }

    /// Computes the grid blueprint density from the tet mesh blueprint density, inplace
    pub fn grid_blueprint_density_inplace<V: ParallelVector>(
        &self,
        tet_density: &V,
        grid_density: &mut Vec<f64>,
    ) -> Result<(), FilterError> {
        self.check_tet_length(tet_density.len())?;

        let tet_density: Vec<f64> = (0..tet_density.len())
            .map(|node| tet_density.get(node))
            .collect();

        grid_density.clear();
        grid_density.resize(self.grid.node_count(), 0.0);
        grid_density
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(node, density)| -> Result<(), FilterError> {
                *density = self.node_blueprint_density(node, &tet_density)?;
                Ok(())
            })
    }

    /// Computes the blueprint density at the single grid node `(i, j, k)`
    pub fn grid_point_blueprint_density<V: ParallelVector>(
        &self,
        i: usize,
        j: usize,
        k: usize,
        tet_density: &V,
    ) -> Result<f64, FilterError> {
        self.check_tet_length(tet_density.len())?;
        let node = self.grid.serialized_index(i, j, k)?;

        match self.containing_tets[node] {
            None => Ok(0.0),
            Some(tet_index) => {
                let tet = &self.mesh.tets()[tet_index];
                let weights = self
                    .mesh
                    .barycentric_coordinates(tet, &self.grid_point_coordinates[node])?;
                Ok(weights
                    .iter()
                    .zip(tet)
                    .map(|(weight, &tet_node)| weight * tet_density.get(tet_node))
                    .sum())
            }
        }
    }

    /// Computes the support density on layer `k` from the grid printable density.
    ///
    /// The baseplate layer is maximally supported with a density of one, which is the boundary
    /// condition driving the recursion. Every other node aggregates the printable density over
    /// its support set on the layer below with the smoothed maximum. Only the entries of layer
    /// `k` in the output array are written.
    pub fn grid_layer_support_density(
        &self,
        k: usize,
        grid_printable_density: &[f64],
        grid_support_density: &mut [f64],
    ) -> Result<(), FilterError> {
        self.check_layer(k)?;
        self.check_grid_length(grid_printable_density.len())?;
        self.check_grid_length(grid_support_density.len())?;

        let [nu, nv, _] = self.grid.dimensions();
        let layer_len = nu * nv;
        let offset = k * layer_len;
        let layer = &mut grid_support_density[offset..offset + layer_len];

        if k == 0 {
            layer.fill(1.0);
            return Ok(());
        }

        layer
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(m, support)| -> Result<(), FilterError> {
                let (i, j) = (m % nu, m / nu);
                let mut values = ArrayVec::<f64, 5>::new();
                for index in self.grid.support_indices(i, j, k)? {
                    values.push(
                        grid_printable_density
                            [self.grid.node_index_unchecked(index[0], index[1], index[2])],
                    );
                }
                *support = smooth_max(&values, self.p_norm)?;
                Ok(())
            })
    }

    /// Computes the printable density on layer `k` as the smoothed minimum of blueprint and
    /// support density at each node of the layer. Only the entries of layer `k` in the output
    /// array are written.
    pub fn grid_layer_printable_density(
        &self,
        k: usize,
        grid_blueprint_density: &[f64],
        grid_support_density: &[f64],
        grid_printable_density: &mut [f64],
    ) -> Result<(), FilterError> {
        self.check_layer(k)?;
        self.check_grid_length(grid_blueprint_density.len())?;
        self.check_grid_length(grid_support_density.len())?;
        self.check_grid_length(grid_printable_density.len())?;

        let [nu, nv, _] = self.grid.dimensions();
        let layer_len = nu * nv;
        let offset = k * layer_len;

        grid_printable_density[offset..offset + layer_len]
            .par_iter_mut()
            .enumerate()
            .for_each(|(m, printable)| {
                let node = offset + m;
                *printable = smooth_min(grid_blueprint_density[node], grid_support_density[node]);
            });
        Ok(())
    }

    /// Runs the per-layer printability recursion over the whole grid.
    ///
    /// Layers are processed from the baseplate upward; the support density of layer `k` reads
    /// the printable density of layer `k - 1` written on the previous iteration, so the loop
    /// order is mandatory.
    pub fn grid_printable_density(
        &self,
        grid_blueprint_density: &[f64],
    ) -> Result<Vec<f64>, FilterError> {
        let mut grid_printable_density = Vec::new();
        let mut grid_support_density = Vec::new();
        self.grid_printable_density_inplace(
            grid_blueprint_density,
            &mut grid_printable_density,
            &mut grid_support_density,
        )?;
        Ok(grid_printable_density)
    }

    /// Runs the per-layer printability recursion over the whole grid, inplace
    pub fn grid_printable_density_inplace(
        &self,
        grid_blueprint_density: &[f64],
        grid_printable_density: &mut Vec<f64>,
        grid_support_density: &mut Vec<f64>,
    ) -> Result<(), FilterError> {
        self.check_grid_length(grid_blueprint_density.len())?;

        let node_count = self.grid.node_count();
        grid_printable_density.clear();
        grid_printable_density.resize(node_count, 0.0);
        grid_support_density.clear();
        grid_support_density.resize(node_count, 0.0);

        for k in 0..self.grid.dimensions()[2] {
            self.grid_layer_support_density(
                k,
                grid_printable_density.as_slice(),
                grid_support_density,
            )?;
            self.grid_layer_printable_density(
                k,
                grid_blueprint_density,
                grid_support_density.as_slice(),
                grid_printable_density,
            )?;
        }
        Ok(())
    }

    /// Computes the printable density at a single tet node by trilinear interpolation from the
    /// grid element containing it.
    ///
    /// Tet nodes exactly on the grid boundary resolve to the adjacent boundary element through
    /// the clamped surrounding indices; the grid normally brackets the mesh exactly, so every
    /// tet node lies within the grid.
    pub fn tet_node_printable_density(
        &self,
        tet_node_index: usize,
        grid_printable_density: &[f64],
    ) -> Result<f64, FilterError> {
        if tet_node_index >= self.mesh.node_count() {
            return Err(FilterError::TetNodeOutOfRange {
                index: tet_node_index,
                node_count: self.mesh.node_count(),
            });
        }
        self.check_grid_length(grid_printable_density.len())?;

        let point = &self.mesh.nodes()[tet_node_index];
        let corners = self.grid.containing_element(point);
        let mut values = [0.0; 8];
        for (value, corner) in values.iter_mut().zip(&corners) {
            *value = grid_printable_density
                [self.grid.node_index_unchecked(corner[0], corner[1], corner[2])];
        }
        self.grid.interpolate_scalar(&corners, &values, point)
    }

    /// Computes the printable density at every tet node from the grid printable density
    pub fn tet_mesh_printable_density<V: ParallelVector>(
        &self,
        grid_printable_density: &[f64],
        tet_density: &mut V,
    ) -> Result<(), FilterError> {
        self.check_tet_length(tet_density.len())?;
        self.check_grid_length(grid_printable_density.len())?;

        let values = (0..self.mesh.node_count())
            .into_par_iter()
            .map(|node| self.tet_node_printable_density(node, grid_printable_density))
            .collect::<Result<Vec<_>, _>>()?;
        for (node, value) in values.into_iter().enumerate() {
            tet_density.set(node, value);
        }
        Ok(())
    }

    /// Applies the full three stage filter to the density field, in place.
    ///
    /// On entry the vector holds the blueprint density of every tet node, on return the
    /// printable density. Scratch memory is taken from the given workspace and reused across
    /// calls.
    pub fn apply<V: ParallelVector>(
        &self,
        density: &mut V,
        workspace: &FilterWorkspace,
    ) -> Result<(), FilterError> {
        self.check_tet_length(density.len())?;

        let mut local = workspace
            .get_local_with_capacity(self.grid.node_count())
            .borrow_mut();
        let LocalFilterWorkspace {
            grid_blueprint_density,
            grid_support_density,
            grid_printable_density,
        } = &mut *local;

        self.grid_blueprint_density_inplace(&*density, grid_blueprint_density)?;
        self.grid_printable_density_inplace(
            grid_blueprint_density.as_slice(),
            grid_printable_density,
            grid_support_density,
        )?;
        self.tet_mesh_printable_density(grid_printable_density.as_slice(), density)
    }

    /// Pulls a tet-space sensitivity back onto the grid through the transpose of the trilinear
    /// interpolation. The trilinear scatter is constant for a fixed mesh and grid, so this is
    /// the exact adjoint of [AmFilter::tet_mesh_printable_density].
    pub fn tet_sensitivity_to_grid(
        &self,
        tet_sensitivity: &[f64],
    ) -> Result<Vec<f64>, FilterError> {
        self.check_tet_length(tet_sensitivity.len())?;

        let mut grid_sensitivity = vec![0.0; self.grid.node_count()];
        for (node, &sensitivity) in tet_sensitivity.iter().enumerate() {
            if sensitivity == 0.0 {
                continue;
            }
            let point = &self.mesh.nodes()[node];
            let corners = self.grid.containing_element(point);
            let weights = self.grid.trilinear_weights(&corners, point)?;
            for (corner, weight) in corners.iter().zip(weights) {
                grid_sensitivity[self.grid.node_index_unchecked(corner[0], corner[1], corner[2])] +=
                    sensitivity * weight;
            }
        }
        Ok(grid_sensitivity)
    }

    /// Propagates a sensitivity on the grid printable density back to the grid blueprint
    /// density through the layer recursion.
    ///
    /// Sweeps the layers from the top down to the baseplate: the Jacobian of the recursion is
    /// lower triangular in layer order, so the sensitivity of a node is final once every layer
    /// above it has been processed. Contributions flow through the smoothed minimum into the
    /// blueprint sensitivity of the node itself and through the smoothed maximum into the
    /// printable sensitivity of its support set on the layer below. The forward grid blueprint
    /// and printable densities of the evaluation point are required to evaluate the local
    /// derivatives.
    pub fn backpropagate_grid_sensitivity(
        &self,
        grid_blueprint_density: &[f64],
        grid_printable_density: &[f64],
        grid_printable_sensitivity: &[f64],
    ) -> Result<Vec<f64>, FilterError> {
        self.check_grid_length(grid_blueprint_density.len())?;
        self.check_grid_length(grid_printable_density.len())?;
        self.check_grid_length(grid_printable_sensitivity.len())?;

        let [nu, nv, nw] = self.grid.dimensions();
        let mut printable_sensitivity = grid_printable_sensitivity.to_vec();
        let mut blueprint_sensitivity = vec![0.0; self.grid.node_count()];

        for k in (0..nw).rev() {
            for j in 0..nv {
                for i in 0..nu {
                    let node = self.grid.node_index_unchecked(i, j, k);
                    let sensitivity = printable_sensitivity[node];

                    if k == 0 {
                        let (d_blueprint, _) = smooth_min_partials(
                            grid_blueprint_density[node],
                            1.0,
                            SMOOTH_MIN_EPSILON,
                        );
                        blueprint_sensitivity[node] += sensitivity * d_blueprint;
                        continue;
                    }

                    let support_set = self.grid.support_indices(i, j, k)?;
                    let mut values = ArrayVec::<f64, 5>::new();
                    for index in &support_set {
                        values.push(
                            grid_printable_density
                                [self.grid.node_index_unchecked(index[0], index[1], index[2])],
                        );
                    }
                    let support = smooth_max(&values, self.p_norm)?;

                    let (d_blueprint, d_support) = smooth_min_partials(
                        grid_blueprint_density[node],
                        support,
                        SMOOTH_MIN_EPSILON,
                    );
                    blueprint_sensitivity[node] += sensitivity * d_blueprint;

                    if sensitivity != 0.0 {
                        let support_gradient = smooth_max_gradient(&values, self.p_norm)?;
                        for (index, d_neighbour) in support_set.iter().zip(support_gradient) {
                            printable_sensitivity
                                [self.grid.node_index_unchecked(index[0], index[1], index[2])] +=
                                sensitivity * d_support * d_neighbour;
                        }
                    }
                }
            }
        }
        Ok(blueprint_sensitivity)
    }

    /// Pushes a grid-space sensitivity onto the tet nodes through the transpose of the
    /// barycentric interpolation. The barycentric gather is constant for a fixed mesh and
    /// grid, so this is the exact adjoint of [AmFilter::grid_blueprint_density].
    pub fn grid_sensitivity_to_tet(
        &self,
        grid_sensitivity: &[f64],
    ) -> Result<Vec<f64>, FilterError> {
        self.check_grid_length(grid_sensitivity.len())?;

        let mut tet_sensitivity = vec![0.0; self.mesh.node_count()];
        for (node, &sensitivity) in grid_sensitivity.iter().enumerate() {
            if sensitivity == 0.0 {
                continue;
            }
            if let Some(tet_index) = self.containing_tets[node] {
                let tet = &self.mesh.tets()[tet_index];
                let weights = self
                    .mesh
                    .barycentric_coordinates(tet, &self.grid_point_coordinates[node])?;
                for (&tet_node, weight) in tet.iter().zip(weights) {
                    tet_sensitivity[tet_node] += sensitivity * weight;
                }
            }
        }
        Ok(tet_sensitivity)
    }

    /// Computes the gradient of an objective with respect to the blueprint density, in place.
    ///
    /// On entry the sensitivity vector holds the partial derivatives of the objective with
    /// respect to the printable density of every tet node; on return it holds the derivatives
    /// with respect to the blueprint density. The forward recursion is re-evaluated at the
    /// given blueprint density to obtain the linearization point.
    pub fn gradient<V: ParallelVector>(
        &self,
        blueprint_density: &V,
        sensitivity: &mut V,
    ) -> Result<(), FilterError> {
        self.check_tet_length(blueprint_density.len())?;
        self.check_tet_length(sensitivity.len())?;

        let grid_blueprint_density = self.grid_blueprint_density(blueprint_density)?;
        let grid_printable_density = self.grid_printable_density(&grid_blueprint_density)?;

        let tet_sensitivity: Vec<f64> = (0..sensitivity.len())
            .map(|node| sensitivity.get(node))
            .collect();
        let grid_sensitivity = self.tet_sensitivity_to_grid(&tet_sensitivity)?;
        let blueprint_sensitivity = self.backpropagate_grid_sensitivity(
            &grid_blueprint_density,
            &grid_printable_density,
            &grid_sensitivity,
        )?;
        let tet_gradient = self.grid_sensitivity_to_tet(&blueprint_sensitivity)?;

        for (node, value) in tet_gradient.into_iter().enumerate() {
            sensitivity.set(node, value);
        }
        Ok(())
    }
}
