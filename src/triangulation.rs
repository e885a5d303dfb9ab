use crate::{Error, Point, Result, Triangle};

/// Delaunay triangulation stored as a doubly connected edge list
/// (a.k.a. half-edge data structure) of triangles.
///
/// Triangle `t` owns the edges `3t`, `3t + 1` and `3t + 2`; edge `e` starts at
/// point `vertices[e]` and ends at the start of [`next_edge(e)`](Triangulation::next_edge).
/// Triangles are always stored in counter-clockwise order.
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<Point>,

    /// Maps edge id to start point id
    vertices: Vec<usize>,

    /// Maps edge id to the opposite edge id in the adjacent triangle, if it exists
    halfedges: Vec<Option<usize>>,
}

impl Triangulation {
    /// Triangulates a set of given points.
    ///
    /// Fails if there are fewer than 3 points, if a coordinate is not finite,
    /// or if no triangle can be formed (all points collinear or coincident).
    /// Coincident points are merged: only one of them is referenced by
    /// the triangles.
    pub fn new(points: &[Point]) -> Result<Triangulation> {
        if points.len() < 3 {
            return Err(Error::degenerate(format!(
                "at least 3 points are required, got {}",
                points.len()
            )));
        }

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::NonFiniteCoordinate { index });
        }

        let input = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect::<Vec<_>>();

        let raw = delaunator::triangulate(&input);

        if raw.triangles.is_empty() {
            return Err(Error::degenerate(format!(
                "{} points are collinear, no triangle can be formed",
                points.len()
            )));
        }

        let num_edges = raw.triangles.len();

        let flipped = raw
            .triangles
            .chunks_exact(3)
            .map(|t| Triangle(points[t[0]], points[t[1]], points[t[2]]).is_clockwise())
            .collect::<Vec<_>>();

        // reversing a triangle [a, b, c] into [a, c, b] maps its edge `i` to `2 - i`
        let remap = |e: usize| {
            if flipped[e / 3] {
                e - e % 3 + (2 - e % 3)
            } else {
                e
            }
        };

        let mut vertices = vec![0; num_edges];
        let mut halfedges = vec![None; num_edges];

        for e in 0..num_edges {
            let target = remap(e);

            vertices[target] = if flipped[e / 3] {
                raw.triangles[delaunator::next_halfedge(e)]
            } else {
                raw.triangles[e]
            };

            if raw.halfedges[e] != delaunator::EMPTY {
                halfedges[target] = Some(remap(raw.halfedges[e]));
            }
        }

        tracing::debug!(
            points = points.len(),
            triangles = num_edges / 3,
            hull = raw.hull.len(),
            "built delaunay triangulation"
        );

        Ok(Triangulation {
            points: points.to_vec(),
            vertices,
            halfedges,
        })
    }

    /// Returns the input points, including the ones merged as duplicates
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the point with the given id
    #[inline]
    pub fn point(&self, p: usize) -> Point {
        self.points[p]
    }

    /// Returns the number of triangles in the triangulation
    pub fn num_triangles(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of half-edges (three per triangle)
    pub fn num_halfedges(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the start point id of the given edge
    #[inline]
    pub fn origin(&self, edge: usize) -> usize {
        self.vertices[edge]
    }

    /// Returns the iterator over all triangles in the triangulation
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.num_triangles()).map(move |t| self.triangle(t))
    }

    /// Returns point ids of the given triangle in counter-clockwise order.
    #[inline]
    pub fn triangle_points(&self, t: usize) -> [usize; 3] {
        let e = 3 * t;
        [self.vertices[e], self.vertices[e + 1], self.vertices[e + 2]]
    }

    /// Returns the actual triangle associated with the given id.
    #[inline]
    pub fn triangle(&self, t: usize) -> Triangle {
        let [a, b, c] = self.triangle_points(t);
        Triangle(self.points[a], self.points[b], self.points[c])
    }

    /// Returns id of the triangle the edge belongs to
    #[inline]
    pub fn edge_triangle(&self, edge: usize) -> usize {
        edge / 3
    }

    /// Returns the edge next to the specified one (counter-clockwise order).
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::Triangulation;
    /// assert_eq!(Triangulation::next_edge(0), 1);
    /// assert_eq!(Triangulation::next_edge(1), 2);
    /// assert_eq!(Triangulation::next_edge(2), 0);
    /// ```
    #[inline]
    pub fn next_edge(edge: usize) -> usize {
        if edge % 3 == 2 {
            edge - 2
        } else {
            edge + 1
        }
    }

    /// Returns the edge previous to the specified one (counter-clockwise order).
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::Triangulation;
    /// assert_eq!(Triangulation::prev_edge(0), 2);
    /// assert_eq!(Triangulation::prev_edge(1), 0);
    /// assert_eq!(Triangulation::prev_edge(2), 1);
    /// ```
    #[inline]
    pub fn prev_edge(edge: usize) -> usize {
        if edge % 3 == 0 {
            edge + 2
        } else {
            edge - 1
        }
    }

    /// Returns the twin edge id, if it exists.
    #[inline]
    pub fn twin(&self, edge: usize) -> Option<usize> {
        self.halfedges[edge]
    }

    /// Returns true if the edge lies on the convex hull
    #[inline]
    pub fn is_hull_edge(&self, edge: usize) -> bool {
        self.halfedges[edge].is_none()
    }

    /// Returns start and end point ids of the edge
    #[inline]
    pub fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        (
            self.vertices[edge],
            self.vertices[Triangulation::next_edge(edge)],
        )
    }

    /// Returns the point opposite to the edge in its triangle
    #[inline]
    pub fn opposite(&self, edge: usize) -> usize {
        self.vertices[Triangulation::prev_edge(edge)]
    }

    /// Returns the iterator over undirected edges: one representative
    /// half-edge id per edge.
    pub fn edges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertices.len()).filter(move |&e| match self.halfedges[e] {
            Some(twin) => e < twin,
            None => true,
        })
    }
}
