//! Alpha complex of a Delaunay triangulation.
//!
//! Every simplex gets an interval of alpha values (squared radii) during which
//! it is part of the complex and on its boundary; classifying the simplex at a
//! given alpha is then a couple of comparisons.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::geom::in_diametral_circle;
use crate::{Edge, Error, Point, Result, Triangle, Triangulation};

/// Position of a simplex relative to the alpha complex
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Classification {
    /// Not part of the complex
    Exterior,
    /// Part of the complex without bounding any solid triangle
    Singular,
    /// On the boundary of the solid part
    Regular,
    /// Strictly inside the solid part
    Interior,
}

/// Which simplices the boundary queries report
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Singular edges and vertices are kept
    General,
    /// Only the boundary of solid triangles; singular simplices are exterior
    Regularized,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Regularized
    }
}

/// Alpha values at which an edge changes its classification
#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeInterval {
    /// The edge alone enters the complex (meaningless when attached)
    min: f64,
    /// The first incident triangle becomes solid
    mid: f64,
    /// Every incident triangle is solid; `None` on the convex hull
    max: Option<f64>,
    /// Some opposite point lies inside the diametral circle of the edge
    attached: bool,
}

/// Alpha values at which a vertex changes its classification
#[derive(Clone, Copy, Debug, PartialEq)]
struct VertexInterval {
    /// The first incident triangle becomes solid
    min: f64,
    /// Every incident triangle is solid; `None` on the convex hull
    max: Option<f64>,
}

/// Delaunay triangulation with every vertex, edge and triangle classified
/// against a fixed alpha.
#[derive(Debug, Clone)]
pub struct AlphaComplex {
    triangulation: Triangulation,
    alpha: f64,
    mode: Mode,

    /// Maps triangle id to its squared circumradius
    face_alpha: Vec<f64>,

    /// Maps edge id to its interval, shared by both halves of an edge
    edge_intervals: Vec<EdgeInterval>,

    /// Maps point id to its interval, `None` for merged duplicates
    vertex_intervals: Vec<Option<VertexInterval>>,
}

impl AlphaComplex {
    /// Builds the regularized alpha complex of the points.
    pub fn new(points: &[Point], alpha: f64) -> Result<AlphaComplex> {
        AlphaComplex::with_mode(points, alpha, Mode::Regularized)
    }

    /// Builds the alpha complex of the points with the given mode.
    ///
    /// `alpha` is a squared radius: a triangle is solid when its squared
    /// circumradius does not exceed it.
    pub fn with_mode(points: &[Point], alpha: f64, mode: Mode) -> Result<AlphaComplex> {
        // also rejects NaN
        if !(alpha >= 0.0) {
            return Err(Error::InvalidAlpha(alpha));
        }

        let triangulation = Triangulation::new(points)?;
        let face_alpha = face_alphas(&triangulation);
        let edge_intervals = edge_intervals(&triangulation, &face_alpha);
        let vertex_intervals = vertex_intervals(&triangulation, &face_alpha);

        let complex = AlphaComplex {
            triangulation,
            alpha,
            mode,
            face_alpha,
            edge_intervals,
            vertex_intervals,
        };

        tracing::debug!(
            alpha,
            mode = ?mode,
            triangles = complex.triangulation.num_triangles(),
            solid = complex.solid_faces().count(),
            "classified alpha complex"
        );

        Ok(complex)
    }

    /// Returns the alpha the complex was classified against
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the classification mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the underlying triangulation
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// Returns the classification of the triangle with the given id.
    pub fn classify_face(&self, t: usize) -> Classification {
        if self.face_alpha[t] <= self.alpha {
            Classification::Interior
        } else {
            Classification::Exterior
        }
    }

    /// Returns the classification of the edge with the given id.
    pub fn classify_edge(&self, edge: usize) -> Classification {
        let interval = self.edge_intervals[edge];

        if interval.max.map_or(false, |max| max <= self.alpha) {
            Classification::Interior
        } else if interval.mid <= self.alpha {
            Classification::Regular
        } else if !interval.attached && interval.min <= self.alpha {
            self.singular()
        } else {
            Classification::Exterior
        }
    }

    /// Returns the classification of the point with the given id.
    ///
    /// Points merged into an earlier duplicate are `Exterior`.
    pub fn classify_vertex(&self, p: usize) -> Classification {
        let interval = match self.vertex_intervals[p] {
            Some(v) => v,
            None => return Classification::Exterior,
        };

        if interval.max.map_or(false, |max| max <= self.alpha) {
            Classification::Interior
        } else if interval.min <= self.alpha {
            Classification::Regular
        } else {
            self.singular()
        }
    }

    #[inline]
    fn singular(&self) -> Classification {
        match self.mode {
            Mode::General => Classification::Singular,
            Mode::Regularized => Classification::Exterior,
        }
    }

    /// Returns ids of the solid (interior) triangles
    pub fn solid_faces(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.triangulation.num_triangles())
            .filter(move |&t| self.classify_face(t) == Classification::Interior)
    }

    /// Returns the solid triangles, vertices in the triangulation's
    /// (counter-clockwise) order.
    pub fn solid_triangles(&self) -> Vec<Triangle> {
        let triangles = self
            .solid_faces()
            .map(|t| self.triangulation.triangle(t))
            .collect::<Vec<_>>();

        tracing::trace!(count = triangles.len(), "solid triangles");
        triangles
    }

    /// Returns the edges of the alpha shape: regular edges, plus singular
    /// ones in [`Mode::General`].
    pub fn boundary_edges(&self) -> Vec<Edge> {
        let edges = self
            .triangulation
            .edges()
            .filter(|&e| match self.classify_edge(e) {
                Classification::Regular | Classification::Singular => true,
                Classification::Exterior | Classification::Interior => false,
            })
            .map(|e| {
                let (a, b) = self.triangulation.edge_endpoints(e);
                Edge::new(self.triangulation.point(a), self.triangulation.point(b))
            })
            .collect::<Vec<_>>();

        tracing::trace!(count = edges.len(), "boundary edges");
        edges
    }

    /// Returns the sum of the signed areas of the solid triangles
    pub fn area(&self) -> f64 {
        crate::triangles_area(&self.solid_triangles())
    }

    /// Returns true if the half-edge bounds a solid triangle on its left and
    /// a non-solid region on its right.
    fn is_boundary_halfedge(&self, edge: usize) -> bool {
        let inside = |e: usize| {
            self.classify_face(self.triangulation.edge_triangle(e)) == Classification::Interior
        };

        inside(edge) && !self.triangulation.twin(edge).map_or(false, inside)
    }

    /// Returns the boundary half-edge following `edge` around its end point.
    fn next_boundary_halfedge(&self, edge: usize) -> usize {
        let mut next = Triangulation::next_edge(edge);

        while let Some(twin) = self.triangulation.twin(next) {
            if self.classify_face(self.triangulation.edge_triangle(twin))
                != Classification::Interior
            {
                break;
            }
            next = Triangulation::next_edge(twin);
        }

        next
    }

    /// Returns the boundary of the solid part as closed rings of points.
    ///
    /// The solid part is on the left of every ring: outer rings are
    /// counter-clockwise, holes clockwise. The first point is not repeated
    /// at the end.
    pub fn boundary_loops(&self) -> Vec<Vec<Point>> {
        let mut visited = vec![false; self.triangulation.num_halfedges()];
        let mut loops = Vec::new();

        for start in 0..self.triangulation.num_halfedges() {
            if visited[start] || !self.is_boundary_halfedge(start) {
                continue;
            }

            let mut ring = Vec::new();
            let mut edge = start;

            loop {
                visited[edge] = true;
                ring.push(self.triangulation.point(self.triangulation.origin(edge)));

                edge = self.next_boundary_halfedge(edge);

                // a ring ends when its first edge comes around again
                if edge == start || visited[edge] {
                    break;
                }
            }

            loops.push(ring);
        }

        tracing::trace!(count = loops.len(), "boundary loops");
        loops
    }

    /// Returns the number of connected components of solid triangles,
    /// triangles being connected through interior edges.
    pub fn number_of_solid_components(&self) -> usize {
        let num_triangles = self.triangulation.num_triangles();
        let mut parent = (0..num_triangles).collect::<Vec<_>>();

        fn find(parent: &mut [usize], mut t: usize) -> usize {
            while parent[t] != t {
                parent[t] = parent[parent[t]];
                t = parent[t];
            }
            t
        }

        for e in self.triangulation.edges() {
            if self.classify_edge(e) != Classification::Interior {
                continue;
            }

            if let Some(twin) = self.triangulation.twin(e) {
                let a = find(&mut parent, self.triangulation.edge_triangle(e));
                let b = find(&mut parent, self.triangulation.edge_triangle(twin));
                parent[a] = b;
            }
        }

        self.solid_faces()
            .filter(|&t| find(&mut parent, t) == t)
            .count()
    }
}

/// Squared circumradius of every triangle
fn face_alphas(triangulation: &Triangulation) -> Vec<f64> {
    #[cfg(feature = "rayon")]
    let iter = (0..triangulation.num_triangles()).into_par_iter();

    #[cfg(not(feature = "rayon"))]
    let iter = 0..triangulation.num_triangles();

    iter.map(|t| triangulation.triangle(t).circumradius_sq())
        .collect()
}

fn edge_intervals(triangulation: &Triangulation, face_alpha: &[f64]) -> Vec<EdgeInterval> {
    let mut intervals = vec![
        EdgeInterval {
            min: std::f64::INFINITY,
            mid: std::f64::INFINITY,
            max: None,
            attached: false,
        };
        triangulation.num_halfedges()
    ];

    for e in triangulation.edges() {
        let (a, b) = triangulation.edge_endpoints(e);
        let p = triangulation.point(a);
        let q = triangulation.point(b);

        let own = face_alpha[triangulation.edge_triangle(e)];
        let twin = triangulation.twin(e);

        let mut attached = in_diametral_circle(p, q, triangulation.point(triangulation.opposite(e)));
        let mut mid = own;
        let mut max = None;

        if let Some(twin) = twin {
            let other = face_alpha[triangulation.edge_triangle(twin)];
            attached |= in_diametral_circle(p, q, triangulation.point(triangulation.opposite(twin)));
            mid = own.min(other);
            max = Some(own.max(other));
        }

        let interval = EdgeInterval {
            min: if attached { mid } else { p.distance_sq(q) / 4.0 },
            mid,
            max,
            attached,
        };

        intervals[e] = interval;
        if let Some(twin) = twin {
            intervals[twin] = interval;
        }
    }

    intervals
}

fn vertex_intervals(triangulation: &Triangulation, face_alpha: &[f64]) -> Vec<Option<VertexInterval>> {
    let mut intervals: Vec<Option<VertexInterval>> = vec![None; triangulation.points().len()];

    for (t, &alpha) in face_alpha.iter().enumerate() {
        for &p in &triangulation.triangle_points(t) {
            let interval = intervals[p].get_or_insert(VertexInterval {
                min: alpha,
                max: Some(alpha),
            });

            interval.min = interval.min.min(alpha);
            interval.max = interval.max.map(|max| max.max(alpha));
        }
    }

    // vertices on the convex hull are never interior
    for e in 0..triangulation.num_halfedges() {
        if triangulation.is_hull_edge(e) {
            let (a, b) = triangulation.edge_endpoints(e);
            for &p in &[a, b] {
                if let Some(interval) = intervals[p].as_mut() {
                    interval.max = None;
                }
            }
        }
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]
    }

    /// 5x5 grid with the middle point removed
    fn grid_with_hole() -> Vec<Point> {
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                if (i, j) != (2, 2) {
                    points.push(Point::new(i as f64, j as f64));
                }
            }
        }
        points
    }

    #[test]
    fn square_faces() {
        let complex = AlphaComplex::new(&square(), 0.5).unwrap();
        assert_eq!(complex.solid_triangles().len(), 2);

        let complex = AlphaComplex::new(&square(), 0.49).unwrap();
        assert!(complex.solid_triangles().is_empty());
    }

    #[test]
    fn square_edges() {
        let complex = AlphaComplex::new(&square(), 1.0).unwrap();
        let t = complex.triangulation();

        for e in t.edges() {
            let expected = if t.is_hull_edge(e) {
                Classification::Regular
            } else {
                Classification::Interior
            };
            assert_eq!(complex.classify_edge(e), expected);
        }
    }

    #[test]
    fn singular_edges_in_general_mode() {
        // alpha between a side's half-length squared (0.25) and the
        // circumradius squared (0.5): the sides are in the complex alone
        let general = AlphaComplex::with_mode(&square(), 0.3, Mode::General).unwrap();
        let regularized = AlphaComplex::with_mode(&square(), 0.3, Mode::Regularized).unwrap();

        assert_eq!(general.boundary_edges().len(), 4);
        assert!(regularized.boundary_edges().is_empty());

        let t = general.triangulation();
        let diagonal = t.edges().find(|&e| !t.is_hull_edge(e)).unwrap();
        // the diagonal's half length squared is 0.5
        assert_eq!(general.classify_edge(diagonal), Classification::Exterior);
    }

    #[test]
    fn attached_edge_skips_singular() {
        // obtuse triangle: the long edge sees the apex inside its diametral circle
        let points = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 0.5)];
        let complex = AlphaComplex::with_mode(&points, 4.0, Mode::General).unwrap();
        let t = complex.triangulation();

        let long = t
            .edges()
            .find(|&e| {
                let (a, b) = t.edge_endpoints(e);
                t.point(a).distance_sq(t.point(b)) == 16.0
            })
            .unwrap();

        assert_eq!(complex.classify_face(0), Classification::Exterior);
        assert_eq!(complex.classify_edge(long), Classification::Exterior);
    }

    #[test]
    fn vertex_classes() {
        let points = grid_with_hole();
        let complex = AlphaComplex::with_mode(&points, 0.5, Mode::General).unwrap();

        // the hole is the diamond (2, 1), (3, 2), (2, 3), (1, 2)
        let interior = [(1.0, 1.0), (1.0, 3.0), (3.0, 1.0), (3.0, 3.0)];

        for (p, point) in points.iter().enumerate() {
            let expected = if interior.contains(&(point.x, point.y)) {
                Classification::Interior
            } else {
                Classification::Regular
            };
            assert_eq!(complex.classify_vertex(p), expected, "{:?}", point);
        }

        let isolated = AlphaComplex::with_mode(&points, 0.1, Mode::General).unwrap();
        assert_eq!(isolated.classify_vertex(0), Classification::Singular);

        let isolated = AlphaComplex::with_mode(&points, 0.1, Mode::Regularized).unwrap();
        assert_eq!(isolated.classify_vertex(0), Classification::Exterior);
    }

    #[test]
    fn interior_vertex() {
        let mut points = square();
        points.push(Point::new(0.5, 0.5));
        let complex = AlphaComplex::new(&points, 1.0).unwrap();

        assert_eq!(complex.classify_vertex(4), Classification::Interior);
        assert_eq!(complex.classify_vertex(0), Classification::Regular);
    }

    #[test]
    fn loops_of_square() {
        let complex = AlphaComplex::new(&square(), 1.0).unwrap();
        let loops = complex.boundary_loops();

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);

        let ring = &loops[0];
        let twice_area = (0..ring.len())
            .map(|i| {
                let a = ring[i];
                let b = ring[(i + 1) % ring.len()];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>();
        assert!((twice_area - 2.0).abs() < 1e-9);
    }

    #[test]
    fn loops_with_hole() {
        let complex = AlphaComplex::new(&grid_with_hole(), 0.5).unwrap();
        let mut loops = complex.boundary_loops();
        loops.sort_by_key(|ring| ring.len());

        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].len(), 4);
        assert_eq!(loops[1].len(), 16);
        assert_eq!(complex.number_of_solid_components(), 1);
        // 12 full cells and 4 half cells around the missing point
        assert!((complex.area() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn separate_components() {
        let mut points = square();
        points.extend(square().iter().map(|p| Point::new(p.x + 10.0, p.y)));

        let complex = AlphaComplex::new(&points, 0.5).unwrap();
        assert_eq!(complex.number_of_solid_components(), 2);
        assert_eq!(complex.boundary_loops().len(), 2);
        assert_eq!(complex.boundary_edges().len(), 8);

        let hull = AlphaComplex::new(&points, std::f64::INFINITY).unwrap();
        assert_eq!(hull.number_of_solid_components(), 1);
    }

    #[test]
    fn invalid_alpha() {
        assert_eq!(
            AlphaComplex::new(&square(), -1.0).unwrap_err(),
            Error::InvalidAlpha(-1.0)
        );
        assert!(matches!(
            AlphaComplex::new(&square(), std::f64::NAN),
            Err(Error::InvalidAlpha(_))
        ));
    }
}
