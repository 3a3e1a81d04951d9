//! Core geometric types: points, bounding boxes, affine transforms

/// A 2D point in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between this point and another
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A bounding box representing the spatial extent of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Expand this bounding box to include a point
    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Smallest bounding box containing every point in the slice
    pub fn from_points(points: &[Point]) -> BoundingBox {
        match points.split_first() {
            None => BoundingBox::zero(),
            Some((first, rest)) => rest.iter().fold(
                BoundingBox::new(first.x, first.y, 0.0, 0.0),
                |bounds, p| bounds.expand_to_include(*p),
            ),
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// A 2D affine transform in row-major `[a, b, c, d, e, f]` form:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// The identity transform leaves points unchanged; composition follows
/// the usual matrix product (left operand applied last).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A pure translation by `(tx, ty)`
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::identity()
        }
    }

    /// A pure scale by `(sx, sy)` around the origin
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Check if this is effectively the identity transform
    pub fn is_identity(&self) -> bool {
        let id = Self::identity();
        (self.a - id.a).abs() < f64::EPSILON
            && self.b.abs() < f64::EPSILON
            && self.c.abs() < f64::EPSILON
            && (self.d - id.d).abs() < f64::EPSILON
            && self.e.abs() < f64::EPSILON
            && self.f.abs() < f64::EPSILON
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Compose two transforms: the result applies `other` first, then `self`
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Invert the transform, or `None` when it is singular
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f64::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Matrix {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            e: (self.c * self.f - self.d * self.e) * inv_det,
            f: (self.b * self.e - self.a * self.f) * inv_det,
        })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Minimum separation applied before angle math so coincident endpoints
/// never feed a zero-length vector into the slope computation.
pub(crate) const MIN_SEPARATION: f64 = 0.01;

/// Direction of the segment from `p1` to `p2` in degrees, in `[0, 360)`.
///
/// Quadrant handling is explicit rather than `atan2`-based so the axis
/// cases (`x == 0` or `y == 0`) resolve to exact cardinal values. 0° points
/// along +x, 90° along +y (downward on canvas).
pub fn line_angle_degrees(p1: Point, p2: Point) -> f64 {
    let mut x = p2.x - p1.x;
    let mut y = p2.y - p1.y;
    if x == 0.0 && y == 0.0 {
        // degenerate: nudge apart so the caller still gets a stable angle
        x = MIN_SEPARATION;
        y = MIN_SEPARATION;
    }

    let radians = if x == 0.0 {
        if y > 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            std::f64::consts::PI * 3.0 / 2.0
        }
    } else if y == 0.0 {
        if x > 0.0 {
            0.0
        } else {
            std::f64::consts::PI
        }
    } else if x < 0.0 {
        (y / x).atan() + std::f64::consts::PI
    } else if y < 0.0 {
        (y / x).atan() + 2.0 * std::f64::consts::PI
    } else {
        (y / x).atan()
    };

    radians.to_degrees() % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_point_midpoint() {
        let m = Point::new(0.0, 0.0).midpoint(Point::new(10.0, 20.0));
        assert_eq!(m, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_bounding_box_edges() {
        let bb = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bb.right(), 110.0);
        assert_eq!(bb.bottom(), 70.0);
    }

    #[test]
    fn test_bounding_box_contains() {
        let bb = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert!(bb.contains(Point::new(50.0, 50.0)));
        assert!(bb.contains(Point::new(0.0, 0.0)));
        assert!(bb.contains(Point::new(100.0, 100.0)));
        assert!(!bb.contains(Point::new(-1.0, 50.0)));
        assert!(!bb.contains(Point::new(101.0, 50.0)));
    }

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
        let union = a.union(&b);

        assert_eq!(union.x, 0.0);
        assert_eq!(union.y, 0.0);
        assert_eq!(union.width, 150.0);
        assert_eq!(union.height, 150.0);
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bb = BoundingBox::from_points(&[
            Point::new(10.0, 5.0),
            Point::new(-20.0, 15.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(bb.x, -20.0);
        assert_eq!(bb.y, 0.0);
        assert_eq!(bb.width, 30.0);
        assert_eq!(bb.height, 15.0);
    }

    #[test]
    fn test_bounding_box_from_no_points() {
        assert_eq!(BoundingBox::from_points(&[]), BoundingBox::zero());
    }

    #[test]
    fn test_matrix_identity_transform() {
        let m = Matrix::identity();
        assert!(m.is_identity());
        let p = Point::new(12.0, -3.0);
        assert_eq!(m.transform_point(p), p);
    }

    #[test]
    fn test_matrix_translation() {
        let m = Matrix::translation(10.0, -5.0);
        let p = m.transform_point(Point::new(1.0, 2.0));
        assert!(approx_eq(p.x, 11.0));
        assert!(approx_eq(p.y, -3.0));
    }

    #[test]
    fn test_matrix_scale() {
        let m = Matrix::scale(2.0, 3.0);
        let p = m.transform_point(Point::new(4.0, 5.0));
        assert!(approx_eq(p.x, 8.0));
        assert!(approx_eq(p.y, 15.0));
    }

    #[test]
    fn test_matrix_multiply_order() {
        // translate after scaling: scale is applied to the point first
        let m = Matrix::translation(10.0, 0.0).multiply(&Matrix::scale(2.0, 2.0));
        let p = m.transform_point(Point::new(3.0, 4.0));
        assert!(approx_eq(p.x, 16.0));
        assert!(approx_eq(p.y, 8.0));
    }

    #[test]
    fn test_matrix_invert_round_trip() {
        let m = Matrix::translation(10.0, -5.0).multiply(&Matrix::scale(2.0, 4.0));
        let inv = m.invert().expect("invertible");
        let p = Point::new(7.0, 9.0);
        let back = inv.transform_point(m.transform_point(p));
        assert!(approx_eq(back.x, p.x));
        assert!(approx_eq(back.y, p.y));
    }

    #[test]
    fn test_matrix_invert_singular() {
        assert!(Matrix::scale(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn test_line_angle_cardinals() {
        let o = Point::new(0.0, 0.0);
        assert!(approx_eq(line_angle_degrees(o, Point::new(10.0, 0.0)), 0.0));
        assert!(approx_eq(line_angle_degrees(o, Point::new(0.0, 10.0)), 90.0));
        assert!(approx_eq(
            line_angle_degrees(o, Point::new(-10.0, 0.0)),
            180.0
        ));
        assert!(approx_eq(
            line_angle_degrees(o, Point::new(0.0, -10.0)),
            270.0
        ));
    }

    #[test]
    fn test_line_angle_quadrants() {
        let o = Point::new(0.0, 0.0);
        assert!(approx_eq(line_angle_degrees(o, Point::new(10.0, 10.0)), 45.0));
        assert!(approx_eq(
            line_angle_degrees(o, Point::new(-10.0, 10.0)),
            135.0
        ));
        assert!(approx_eq(
            line_angle_degrees(o, Point::new(-10.0, -10.0)),
            225.0
        ));
        assert!(approx_eq(
            line_angle_degrees(o, Point::new(10.0, -10.0)),
            315.0
        ));
    }

    #[test]
    fn test_line_angle_degenerate_is_finite() {
        let p = Point::new(5.0, 5.0);
        let angle = line_angle_degrees(p, p);
        assert!(angle.is_finite());
        assert!((0.0..360.0).contains(&angle));
    }
}
