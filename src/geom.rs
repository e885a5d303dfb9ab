use std::cmp::Ordering;

use serde::{Serialize, Serializer};

/// 2D point represented by x and y coordinates
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Returns square of the distance between `self` and `other` point
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::Point;
    /// let a = Point::new(10.0, 10.0);
    /// let b = Point::new(10.0, 110.0);
    /// assert!((a.distance_sq(b) - 10000.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns true if points are approximately equal
    ///
    /// # Examples
    ///
    /// ```
    /// # use alpha_shape::Point;
    /// let a = Point::new(10.0, 10.0);
    /// let b = Point::new(10.0, 10.0 + 1e-18);
    /// assert!(a.approx_eq(b))
    /// ```
    #[inline]
    pub fn approx_eq(self, other: Point) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.abs() <= std::f64::EPSILON && dy.abs() <= std::f64::EPSILON
    }

    /// Returns true if both coordinates are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Total lexicographic order: x first, then y.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::Point;
    /// use std::cmp::Ordering;
    ///
    /// let a = Point::new(1.0, 5.0);
    /// let b = Point::new(2.0, 0.0);
    /// assert_eq!(a.lex_cmp(b), Ordering::Less);
    /// assert_eq!(b.lex_cmp(Point::new(2.0, -1.0)), Ordering::Greater);
    /// ```
    #[inline]
    pub fn lex_cmp(self, other: Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Point {
        Point { x, y }
    }
}

impl Into<(i32, i32)> for Point {
    fn into(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl Into<(f64, f64)> for Point {
    fn into(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

/// Undirected segment between two points.
///
/// The endpoints are kept as `(max, min)` under [`Point::lex_cmp`] so that
/// the same segment always compares and prints the same way.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Edge(pub Point, pub Point);

impl Edge {
    /// Creates an edge, ordering the endpoints.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::{Edge, Point};
    /// let a = Point::new(0.0, 1.0);
    /// let b = Point::new(1.0, 0.0);
    /// assert_eq!(Edge::new(a, b), Edge(b, a));
    /// assert_eq!(Edge::new(b, a), Edge(b, a));
    /// ```
    pub fn new(a: Point, b: Point) -> Edge {
        if a.lex_cmp(b) == Ordering::Less {
            Edge(b, a)
        } else {
            Edge(a, b)
        }
    }

    /// Returns square of the edge length
    #[inline]
    pub fn length_sq(self) -> f64 {
        self.0.distance_sq(self.1)
    }
}

/// A triangle made of 3 points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Triangle(pub Point, pub Point, pub Point);

impl Triangle {
    #[inline]
    fn circumcircle_delta(self) -> (f64, f64) {
        let p = Point {
            x: self.1.x - self.0.x,
            y: self.1.y - self.0.y,
        };

        let q = Point {
            x: self.2.x - self.0.x,
            y: self.2.y - self.0.y,
        };

        let p2 = p.x * p.x + p.y * p.y;
        let q2 = q.x * q.x + q.y * q.y;
        let d = 2.0 * (p.x * q.y - p.y * q.x);

        if d == 0.0 {
            return (std::f64::INFINITY, std::f64::INFINITY);
        }

        let dx = (q.y * p2 - p.y * q2) / d;
        let dy = (p.x * q2 - q.x * p2) / d;

        (dx, dy)
    }

    /// Returns square of the circumcircle radius, infinite for degenerate
    /// triangles. This is the alpha value at which the triangle enters
    /// the alpha complex.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::{Triangle, Point};
    /// let t = Triangle(
    ///     Point::new(10.0, 10.0),
    ///     Point::new(10.0, 110.0),
    ///     Point::new(110.0, 10.0)
    /// );
    /// assert!((t.circumradius_sq() - 5000.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn circumradius_sq(self) -> f64 {
        let (x, y) = self.circumcircle_delta();
        x * x + y * y
    }

    /// Returns the circumcenter.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::{Triangle, Point};
    /// let t = Triangle(
    ///     Point::new(10.0, 10.0),
    ///     Point::new(10.0, 110.0),
    ///     Point::new(110.0, 10.0)
    /// );
    /// assert!(t.circumcenter().approx_eq(Point::new(60.0, 60.0)));
    /// ```
    #[inline]
    pub fn circumcenter(self) -> Point {
        let (x, y) = self.circumcircle_delta();

        Point {
            x: x + self.0.x,
            y: y + self.0.y,
        }
    }

    /// Returns twice the signed area: positive for counter-clockwise order,
    /// negative for clockwise order, zero for collinear points.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::{Triangle, Point};
    /// let t = Triangle(
    ///     Point::new(0.0, 0.0),
    ///     Point::new(1.0, 0.0),
    ///     Point::new(0.0, 1.0)
    /// );
    /// assert!(t.orientation() > 0.0);
    /// ```
    #[inline]
    pub fn orientation(self) -> f64 {
        let v01x = self.1.x - self.0.x;
        let v01y = self.1.y - self.0.y;
        let v02x = self.2.x - self.0.x;
        let v02y = self.2.y - self.0.y;
        v01x * v02y - v01y * v02x
    }

    /// Returns the signed area, `det([[1, x0, y0], [1, x1, y1], [1, x2, y2]]) / 2`.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::{Triangle, Point};
    /// let ccw = Triangle(
    ///     Point::new(0.0, 0.0),
    ///     Point::new(2.0, 0.0),
    ///     Point::new(0.0, 2.0)
    /// );
    /// assert_eq!(ccw.signed_area(), 2.0);
    ///
    /// let cw = Triangle(ccw.0, ccw.2, ccw.1);
    /// assert_eq!(cw.signed_area(), -2.0);
    /// ```
    #[inline]
    pub fn signed_area(self) -> f64 {
        0.5 * self.orientation()
    }

    /// Returns true if the triangle is in counter-clockwise order.
    #[inline]
    pub fn is_counterclockwise(self) -> bool {
        self.orientation() > 0.0
    }

    /// Returns true if the triangle is in clockwise order.
    #[inline]
    pub fn is_clockwise(self) -> bool {
        self.orientation() < 0.0
    }

    /// Returns true if the given point lies inside the circumcircle of a
    /// counter-clockwise triangle.
    ///
    /// # Examples
    /// ```
    /// # use alpha_shape::{Triangle, Point};
    ///
    /// let t = Triangle(
    ///     Point::new(10.0, 10.0),
    ///     Point::new(110.0, 10.0),
    ///     Point::new(10.0, 110.0)
    /// );
    /// assert!(t.in_circumcircle(Point::new(30.0, 30.0)));
    /// assert!(!t.in_circumcircle(Point::new(5.0, 5.0)));
    /// ```
    #[inline]
    pub fn in_circumcircle(self, point: Point) -> bool {
        let dx = self.0.x - point.x;
        let dy = self.0.y - point.y;
        let ex = self.1.x - point.x;
        let ey = self.1.y - point.y;
        let fx = self.2.x - point.x;
        let fy = self.2.y - point.y;

        let ap = dx * dx + dy * dy;
        let bp = ex * ex + ey * ey;
        let cp = fx * fx + fy * fy;

        dx * (ey * cp - bp * fy) - dy * (ex * cp - bp * fx) + ap * (ex * fy - ey * fx) > 0.0
    }
}

/// Returns true if `r` lies strictly inside the circle with diameter `pq`,
/// i.e. the angle at `r` is obtuse.
///
/// # Examples
/// ```
/// # use alpha_shape::Point;
/// use alpha_shape::geom::in_diametral_circle;
///
/// let p = Point::new(0.0, 0.0);
/// let q = Point::new(2.0, 0.0);
/// assert!(in_diametral_circle(p, q, Point::new(1.0, 0.5)));
/// assert!(!in_diametral_circle(p, q, Point::new(1.0, 1.5)));
/// ```
#[inline]
pub fn in_diametral_circle(p: Point, q: Point, r: Point) -> bool {
    (p.x - r.x) * (q.x - r.x) + (p.y - r.y) * (q.y - r.y) < 0.0
}
