//! Alpha shapes of 2D point sets.
//!
//! The alpha shape sits between the convex hull (`alpha = ∞`) and the bare
//! point set (`alpha = 0`): a Delaunay triangle is kept when its squared
//! circumradius does not exceed `alpha`. Every query rebuilds the
//! triangulation from scratch, so all of them are pure functions of
//! `(points, alpha)`.
//!
//! ```
//! use alpha_shape::Point;
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//! ];
//!
//! assert_eq!(alpha_shape::solid_triangles(&points, 1.0).unwrap().len(), 2);
//! assert_eq!(alpha_shape::boundary_edges(&points, 1.0).unwrap().len(), 4);
//! assert!((alpha_shape::area(&points, 1.0).unwrap() - 1.0).abs() < 1e-9);
//! assert_eq!(alpha_shape::area(&points, 0.0).unwrap(), 0.0);
//! ```

pub mod alpha;
pub mod error;
pub mod geom;
pub mod triangulation;

pub use alpha::{AlphaComplex, Classification, Mode};
pub use error::{Error, Result};
pub use geom::{Edge, Point, Triangle};
pub use triangulation::Triangulation;

/// Triangulates the points and classifies every simplex against `alpha`
/// (regularized mode).
pub fn build_complex(points: &[Point], alpha: f64) -> Result<AlphaComplex> {
    AlphaComplex::new(points, alpha)
}

/// Returns the edges bounding the solid part of the alpha shape, each with
/// its endpoints ordered `(max, min)`.
pub fn boundary_edges(points: &[Point], alpha: f64) -> Result<Vec<Edge>> {
    Ok(build_complex(points, alpha)?.boundary_edges())
}

/// Returns the triangles of the alpha complex.
pub fn solid_triangles(points: &[Point], alpha: f64) -> Result<Vec<Triangle>> {
    Ok(build_complex(points, alpha)?.solid_triangles())
}

/// Returns the area covered by the solid triangles of the alpha shape.
pub fn area(points: &[Point], alpha: f64) -> Result<f64> {
    Ok(triangles_area(&solid_triangles(points, alpha)?))
}

/// Sums the signed areas of the triangles.
///
/// Triangles of opposite orientation cancel each other out; the ones
/// produced by this crate are all counter-clockwise.
///
/// # Examples
/// ```
/// # use alpha_shape::{Point, Triangle};
/// let a = Triangle(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0));
/// let b = Triangle(a.0, a.2, a.1);
///
/// assert_eq!(alpha_shape::triangles_area(&[a, a]), 1.0);
/// assert_eq!(alpha_shape::triangles_area(&[a, b]), 0.0);
/// assert_eq!(alpha_shape::triangles_area(&[]), 0.0);
/// ```
pub fn triangles_area(triangles: &[Triangle]) -> f64 {
    triangles.iter().map(|t| t.signed_area()).sum()
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

    fn regular_polygon(count: usize, radius: f64) -> Vec<Point> {
        (0..count)
            .map(|i| {
                let angle = i as f64 / count as f64 * 2.0 * std::f64::consts::PI;
                let (sin, cos) = angle.sin_cos();
                Point::new(cos * radius, sin * radius)
            })
            .collect()
    }

    #[test]
    fn square_large_alpha() {
        let triangles = solid_triangles(&square(), 0.5).unwrap();
        assert_eq!(triangles.len(), 2);
        assert!((area(&square(), 0.5).unwrap() - 1.0).abs() < 1e-9);
        assert!((area(&square(), 1e6).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn square_zero_alpha() {
        assert!(solid_triangles(&square(), 0.0).unwrap().is_empty());
        assert!(boundary_edges(&square(), 0.0).unwrap().is_empty());
        assert_eq!(area(&square(), 0.0).unwrap(), 0.0);
    }

    #[test]
    fn area_matches_shoelace() {
        let points = regular_polygon(12, 5.0);
        let triangles = solid_triangles(&points, 100.0).unwrap();

        let expected = triangles
            .iter()
            .map(|t| {
                let (Point { x: x0, y: y0 }, Point { x: x1, y: y1 }, Point { x: x2, y: y2 }) =
                    (t.0, t.1, t.2);
                0.5 * (x1 * y2 - x2 * y1 - x0 * y2 + x2 * y0 + x0 * y1 - x1 * y0)
            })
            .sum::<f64>();

        assert!((area(&points, 100.0).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn convex_hull_edges() {
        let count = 9;
        let points = regular_polygon(count, 10.0);
        let edges = boundary_edges(&points, std::f64::INFINITY).unwrap();

        assert_eq!(edges.len(), count);

        for i in 0..count {
            let hull = Edge::new(points[i], points[(i + 1) % count]);
            assert_eq!(edges.iter().filter(|&&e| e == hull).count(), 1);
        }
    }

    #[test]
    fn edges_are_ordered() {
        for Edge(max, min) in boundary_edges(&square(), 1.0).unwrap() {
            assert_eq!(max.lex_cmp(min), std::cmp::Ordering::Greater);
        }
    }

    #[test]
    fn idempotent() {
        let points = regular_polygon(20, 3.0);
        assert_eq!(
            boundary_edges(&points, 2.0).unwrap(),
            boundary_edges(&points, 2.0).unwrap()
        );
        assert_eq!(
            solid_triangles(&points, 2.0).unwrap(),
            solid_triangles(&points, 2.0).unwrap()
        );
        assert_eq!(area(&points, 2.0).unwrap(), area(&points, 2.0).unwrap());
    }

    #[test]
    fn too_few_points() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];

        assert!(boundary_edges(&points, 1.0).unwrap_err().is_degenerate());
        assert!(solid_triangles(&points, 1.0).unwrap_err().is_degenerate());
        assert!(area(&points, 1.0).unwrap_err().is_degenerate());
        assert!(area(&[], 1.0).unwrap_err().is_degenerate());
    }

    #[test]
    fn collinear() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        assert!(area(&points, 1.0).unwrap_err().is_degenerate());
    }

    #[test]
    fn monotonic_area() {
        let points = regular_polygon(16, 4.0)
            .into_iter()
            .chain(regular_polygon(7, 1.5))
            .chain(Some(Point::new(0.1, 0.2)))
            .collect::<Vec<_>>();

        let areas = [0.0, 0.5, 1.0, 2.0, 4.0, 8.0, 100.0]
            .iter()
            .map(|&alpha| area(&points, alpha).unwrap())
            .collect::<Vec<_>>();

        for pair in areas.windows(2) {
            assert!(pair[1] + 1e-9 >= pair[0], "{:?}", areas);
        }
        assert!(areas[areas.len() - 1] > 0.0);
    }
}
