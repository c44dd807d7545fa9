//!
//! Library for enforcing additive manufacturing printability of per-node density fields on
//! tetrahedral meshes. Entry point is the [apply_printability_filter] function.
//!

/// Re-export the version of nalgebra used by this crate
pub use nalgebra;

mod aabb;
/// The printability filter composing the tet mesh and the orthogonal grid
pub mod am_filter;
/// The uniform voxel grid aligned with the build direction
pub mod ortho_grid;
/// Capability interface for the nodal density vectors exchanged with the host
mod parallel_vector;
/// Differentiable smoothed maximum and minimum primitives
pub mod smoothing;
/// Immutable tetrahedral mesh queries (bounding box, point location, barycentric coordinates)
pub mod tet_mesh;
/// Scratch buffers for reusing allocated memory between filter applications
pub(crate) mod workspace;

use log::info;
use nalgebra::Vector3;
use thiserror::Error as ThisError;

pub use aabb::AxisAlignedBoundingBox3d;
pub use am_filter::AmFilter;
pub use ortho_grid::OrthoGrid;
pub use parallel_vector::ParallelVector;
pub use tet_mesh::TetMesh;
pub use workspace::FilterWorkspace;

/// Parameters for the printability filter
#[derive(Clone, Debug)]
pub struct Parameters {
    /// Exponent of the smoothed maximum used to aggregate support densities.
    /// Larger values track the true maximum more closely; must be at least one.
    pub p_norm: f64,
    /// Edge length of the orthogonal voxel grid used to evaluate printability.
    /// If not provided, a quarter of the minimum tetrahedral edge length is used instead.
    pub target_edge_length: Option<f64>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            p_norm: 200.0,
            target_edge_length: None,
        }
    }
}

/// Coarse classification of [FilterError] values into the two failure families of the library
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The caller asked for something meaningless (mismatched lengths, malformed geometry, bad parameters)
    Domain,
    /// The caller indexed outside a valid range
    OutOfRange,
}

/// Error type returned when a filter operation fails
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum FilterError {
    /// The mesh node list is empty
    #[error("the mesh node list is empty")]
    EmptyNodes,
    /// The mesh connectivity list is empty
    #[error("the mesh connectivity list is empty")]
    EmptyConnectivity,
    /// A tetrahedron references a node outside of the mesh
    #[error("node index {node} is outside of the mesh ({node_count} nodes)")]
    NodeIndexOutOfRange { node: usize, node_count: usize },
    /// A tetrahedron references the same node more than once
    #[error("tetrahedron references node {node} more than once")]
    RepeatedNodeIndex { node: usize },
    /// A tetrahedron has (nearly) zero signed volume
    #[error("tetrahedron is degenerate (signed volume {volume:e})")]
    DegenerateTetrahedron { volume: f64 },
    /// A basis vector is not unit length
    #[error("basis vector is not unit length (norm {norm})")]
    BasisNotUnitLength { norm: f64 },
    /// Two basis vectors are not orthogonal
    #[error("basis vectors are not orthogonal (dot product {dot:e})")]
    BasisNotOrthogonal { dot: f64 },
    /// The basis is not right-handed
    #[error("basis is not right-handed")]
    BasisNotRightHanded,
    /// Grid bounds are inverted or empty on an axis
    #[error("grid bounds are not strictly increasing on axis {axis}")]
    InvalidBounds { axis: usize },
    /// The target edge length of the grid is not positive
    #[error("target edge length must be positive (got {0})")]
    InvalidEdgeLength(f64),
    /// An explicit element count is zero
    #[error("element count must be at least one on every axis (got {counts:?})")]
    InvalidElementCount { counts: [usize; 3] },
    /// A grid node index is outside of the grid
    #[error("grid node ({i}, {j}, {k}) is outside of the grid dimensions {dimensions:?}")]
    GridIndexOutOfRange {
        i: usize,
        j: usize,
        k: usize,
        dimensions: [usize; 3],
    },
    /// A layer index is outside of the grid
    #[error("layer {layer} is outside of the grid ({layer_count} layers)")]
    LayerOutOfRange { layer: usize, layer_count: usize },
    /// A tet node index is outside of the mesh
    #[error("tet node index {index} is outside of the mesh ({node_count} nodes)")]
    TetNodeOutOfRange { index: usize, node_count: usize },
    /// A density or sensitivity vector has the wrong length
    #[error("vector length {actual} does not match the expected length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Hex corner indices passed to the trilinear interpolation are not in canonical order
    #[error("hex corner indices are not in canonical order")]
    NonCanonicalHexCorners,
    /// The p-norm parameter of the smoothed maximum is below one
    #[error("p-norm must be at least one (got {0})")]
    InvalidPNorm(f64),
    /// The smoothed maximum was invoked with a negative argument
    #[error("smoothed maximum requires non-negative arguments (got {0})")]
    NegativeSmoothMaxArgument(f64),
    /// The smoothed maximum was invoked without arguments
    #[error("smoothed maximum of an empty argument list")]
    EmptySmoothMaxArguments,
    /// Any error that is not represented by some other explicit variant
    #[error("unknown error")]
    Unknown(#[from] anyhow::Error),
}

impl FilterError {
    /// Classifies the error per the library's two failure families
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::NodeIndexOutOfRange { .. }
            | FilterError::GridIndexOutOfRange { .. }
            | FilterError::LayerOutOfRange { .. }
            | FilterError::TetNodeOutOfRange { .. } => ErrorKind::OutOfRange,
            _ => ErrorKind::Domain,
        }
    }
}

/// Initializes the global thread pool used by this library with the given parameters.
///
/// Initialization of the global thread pool happens exactly once.
/// Therefore, if you call `initialize_thread_pool` a second time, it will return an error.
/// An `Ok` result indicates that this is the first initialization of the thread pool.
pub fn initialize_thread_pool(num_threads: usize) -> Result<(), anyhow::Error> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;
    Ok(())
}

/// Applies the printability filter to the given density field, in place.
///
/// The orthogonal grid is derived from the bounding box of the mesh in the (u, v, w) frame,
/// with w the build direction. The density vector carries one value per mesh node; on return
/// it holds the printable density field.
pub fn apply_printability_filter<V: ParallelVector>(
    mesh: &TetMesh,
    u_basis: &Vector3<f64>,
    v_basis: &Vector3<f64>,
    build_direction: &Vector3<f64>,
    parameters: &Parameters,
    density: &mut V,
) -> Result<(), FilterError> {
    let (min_uvw, max_uvw) = mesh.bounding_box(u_basis, v_basis, build_direction);

    let target_edge_length = parameters
        .target_edge_length
        .unwrap_or_else(|| mesh.min_edge_length() / 4.0);
    info!("Target grid edge length: {}", target_edge_length);

    let grid = OrthoGrid::from_edge_length(
        u_basis,
        v_basis,
        build_direction,
        &min_uvw,
        &max_uvw,
        target_edge_length,
    )?;
    grid.log_grid_info();

    let filter = AmFilter::new(mesh, &grid, parameters.p_norm)?;
    let workspace = FilterWorkspace::default();
    filter.apply(density, &workspace)
}
