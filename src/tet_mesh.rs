//! Immutable tetrahedral meshes and the point location queries used by the printability filter
//!
//! The mesh owns the node coordinates and the four-node connectivity of every tetrahedron and
//! only ever reads them after construction. Point location runs a broad phase over an R*-tree
//! of inflated per-tet bounding boxes followed by an exact same-side test.

use nalgebra::{Matrix4, Vector3, Vector4};
use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};

use crate::aabb::AxisAlignedBoundingBox3d;
use crate::FilterError;
use itertools::Itertools;

/// Tolerance below which the signed volume of a tetrahedron is considered degenerate
const DEGENERACY_TOL: f64 = 1e-12;
/// Relative inflation of the per-tet bounding boxes used by the broad phase. Absorbs
/// floating point slop for query points sitting exactly on inter-tet faces.
const RELATIVE_TOL: f64 = 1e-2;

/// Returns whether `point` and the corner `opposite` lie on the same side of the plane spanned
/// by `a`, `b` and `c`. Points exactly on the plane count as being on both sides.
fn same_side(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    c: &Vector3<f64>,
    opposite: &Vector3<f64>,
    point: &Vector3<f64>,
) -> bool {
    let normal = (b - a).cross(&(c - a));
    normal.dot(&(opposite - a)) * normal.dot(&(point - a)) >= 0.0
}

fn check_tet(nodes: &[Vector3<f64>], tet: &[usize; 4]) -> Result<(), FilterError> {
    for &node in tet {
        if node >= nodes.len() {
            return Err(FilterError::NodeIndexOutOfRange {
                node,
                node_count: nodes.len(),
            });
        }
    }
    for (position, &node) in tet.iter().enumerate() {
        if tet[position + 1..].contains(&node) {
            return Err(FilterError::RepeatedNodeIndex { node });
        }
    }
    Ok(())
}

/// Returns whether the given point lies inside of the tetrahedron (faces included), using the
/// same-side sign test against each of the four faces
pub fn is_point_in_tetrahedron(
    nodes: &[Vector3<f64>],
    tet: &[usize; 4],
    point: &Vector3<f64>,
) -> Result<bool, FilterError> {
    check_tet(nodes, tet)?;
    Ok(point_in_tet_unchecked(nodes, tet, point))
}

fn point_in_tet_unchecked(nodes: &[Vector3<f64>], tet: &[usize; 4], point: &Vector3<f64>) -> bool {
    let [a, b, c, d] = [&nodes[tet[0]], &nodes[tet[1]], &nodes[tet[2]], &nodes[tet[3]]];
    same_side(a, b, c, d, point)
        && same_side(b, c, d, a, point)
        && same_side(c, d, a, b, point)
        && same_side(d, a, b, c, point)
}

/// Per-tet bounding volume stored in the R*-tree of the broad phase
struct TetVolume {
    tet_index: usize,
    envelope: AABB<[f64; 3]>,
}

impl RTreeObject for TetVolume {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope.clone()
    }
}

/// An immutable tetrahedral mesh
#[derive(Clone, Debug)]
pub struct TetMesh {
    nodes: Vec<Vector3<f64>>,
    tets: Vec<[usize; 4]>,
}

impl TetMesh {
    /// Constructs a mesh from node coordinates and four-node connectivity.
    ///
    /// Both sequences have to be non-empty and every tetrahedron has to reference four distinct
    /// nodes of the mesh. Degeneracy is not checked here; a degenerate tetrahedron surfaces as
    /// an error from [TetMesh::barycentric_coordinates].
    pub fn new(nodes: Vec<Vector3<f64>>, tets: Vec<[usize; 4]>) -> Result<Self, FilterError> {
        if nodes.is_empty() {
            return Err(FilterError::EmptyNodes);
        }
        if tets.is_empty() {
            return Err(FilterError::EmptyConnectivity);
        }
        for tet in &tets {
            check_tet(&nodes, tet)?;
        }
        Ok(Self { nodes, tets })
    }

    /// Returns the node coordinates of the mesh
    pub fn nodes(&self) -> &[Vector3<f64>] {
        &self.nodes
    }

    /// Returns the tetrahedron connectivity of the mesh
    pub fn tets(&self) -> &[[usize; 4]] {
        &self.tets
    }

    /// Returns the number of nodes of the mesh
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of tetrahedra of the mesh
    pub fn tet_count(&self) -> usize {
        self.tets.len()
    }

    /// Computes the bounding box of the mesh in the given orthonormal frame.
    ///
    /// Every node is projected onto the three axes; the componentwise minima and maxima of the
    /// projections are returned as `(min_uvw, max_uvw)`.
    pub fn bounding_box(
        &self,
        u_basis: &Vector3<f64>,
        v_basis: &Vector3<f64>,
        w_basis: &Vector3<f64>,
    ) -> (Vector3<f64>, Vector3<f64>) {
        let mut min_uvw = Vector3::repeat(f64::INFINITY);
        let mut max_uvw = Vector3::repeat(f64::NEG_INFINITY);
        for node in &self.nodes {
            let projection = Vector3::new(u_basis.dot(node), v_basis.dot(node), w_basis.dot(node));
            min_uvw = min_uvw.inf(&projection);
            max_uvw = max_uvw.sup(&projection);
        }
        (min_uvw, max_uvw)
    }

    /// Returns the smallest Euclidean edge length over the six edges of every tetrahedron
    pub fn min_edge_length(&self) -> f64 {
        self.tets
            .iter()
            .flat_map(|tet| {
                tet.iter()
                    .tuple_combinations::<(_, _)>()
                    .map(|(&a, &b)| (self.nodes[a] - self.nodes[b]).norm())
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Computes the barycentric coordinates of the given point in the tetrahedron spanned by the
    /// four node indices.
    ///
    /// The four weights sum to one (up to round-off). Fails for malformed index tuples and for
    /// tetrahedra whose signed volume is within `1e-12` of zero.
    pub fn barycentric_coordinates(
        &self,
        tet: &[usize; 4],
        point: &Vector3<f64>,
    ) -> Result<[f64; 4], FilterError> {
        check_tet(&self.nodes, tet)?;
        let [a, b, c, d] = [
            &self.nodes[tet[0]],
            &self.nodes[tet[1]],
            &self.nodes[tet[2]],
            &self.nodes[tet[3]],
        ];

        let volume = (b - a).cross(&(c - a)).dot(&(d - a)) / 6.0;
        if volume.abs() < DEGENERACY_TOL {
            return Err(FilterError::DegenerateTetrahedron { volume });
        }

        #[rustfmt::skip]
        let system = Matrix4::new(
            1.0, 1.0, 1.0, 1.0,
            a.x, b.x, c.x, d.x,
            a.y, b.y, c.y, d.y,
            a.z, b.z, c.z, d.z,
        );
        let rhs = Vector4::new(1.0, point.x, point.y, point.z);
        let weights = system
            .lu()
            .solve(&rhs)
            .ok_or(FilterError::DegenerateTetrahedron { volume })?;
        Ok([weights[0], weights[1], weights[2], weights[3]])
    }

    /// Finds for each query point the tetrahedron containing it, or `None` for points outside
    /// of the mesh.
    ///
    /// The broad phase intersects the points with an R*-tree of per-tet bounding boxes inflated
    /// by a small relative tolerance; candidates are then filtered with the exact same-side
    /// test. A point on a shared face of several tetrahedra legitimately matches more than one
    /// candidate; the first match in traversal order wins, which is implementation-defined but
    /// stable within a build.
    pub fn containing_tets(&self, points: &[Vector3<f64>]) -> Vec<Option<usize>> {
        let volumes = self
            .tets
            .iter()
            .enumerate()
            .map(|(tet_index, tet)| {
                let corners = [
                    self.nodes[tet[0]],
                    self.nodes[tet[1]],
                    self.nodes[tet[2]],
                    self.nodes[tet[3]],
                ];
                let mut aabb = AxisAlignedBoundingBox3d::from_points(&corners);
                aabb.grow_relative(RELATIVE_TOL);
                TetVolume {
                    tet_index,
                    envelope: AABB::from_corners(
                        [aabb.min().x, aabb.min().y, aabb.min().z],
                        [aabb.max().x, aabb.max().y, aabb.max().z],
                    ),
                }
            })
            .collect();
        let tree = RTree::bulk_load(volumes);

        points
            .par_iter()
            .map(|point| {
                tree.locate_in_envelope_intersecting(&AABB::from_point([
                    point.x, point.y, point.z,
                ]))
                .find(|volume| {
                    point_in_tet_unchecked(&self.nodes, &self.tets[volume.tet_index], point)
                })
                .map(|volume| volume.tet_index)
            })
            .collect()
    }
}
